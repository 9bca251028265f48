// SPDX-License-Identifier: MIT OR Apache-2.0

//! Dotted-path CRUD over a backend.
//!
//! [`KvStore`] binds one backend to one location and offers `get`, `set` and
//! `delete` by key path. It holds no document of its own: every operation
//! loads a fresh snapshot from the backend, works on it, and (for writes)
//! dumps it back exactly once.

use crate::domain::{Document, KeyPath, KvError, Node, Result, StoreLocation};
use crate::ports::KvBackend;
use std::fmt;

/// A key-value store over a single backend.
///
/// # Concurrency
///
/// Each call is one `load -> mutate -> dump` cycle. Two overlapping writers on
/// the same medium both load, mutate independently and dump, so the last one
/// wins and the other's changes are lost. Callers that write from several
/// threads or processes must serialize those writes themselves.
///
/// # Examples
///
/// ```rust
/// use hexkv::adapters::MemoryBackend;
/// use hexkv::domain::{Node, StoreLocation};
/// use hexkv::service::KvStore;
///
/// # fn main() -> hexkv::domain::Result<()> {
/// let location = StoreLocation::parse("dict://example")?;
/// let store = KvStore::new(location, Box::new(MemoryBackend::new("example")));
///
/// store.set(&["a.b.c"], vec![Node::from("v1")])?;
/// assert_eq!(store.get(&["a.b.c", "a.b.x"])?, vec![Some(Node::from("v1")), None]);
///
/// store.delete(&["a.b.c"])?;
/// assert!(store.delete(&["a.b.c"]).is_err());
/// # Ok(())
/// # }
/// ```
pub struct KvStore {
    /// Where the backend reads and writes
    location: StoreLocation,
    /// The storage medium
    backend: Box<dyn KvBackend>,
}

impl KvStore {
    /// Creates a store over `backend`, bound to `location`.
    pub fn new(location: StoreLocation, backend: Box<dyn KvBackend>) -> Self {
        Self { location, backend }
    }

    /// Returns the parsed location.
    pub fn location(&self) -> &StoreLocation {
        &self.location
    }

    /// Returns the location authority (host, port, name...).
    pub fn loc(&self) -> &str {
        self.location.loc()
    }

    /// Returns the location path.
    pub fn path(&self) -> &str {
        self.location.path()
    }

    /// Returns the name of the backend.
    pub fn backend_name(&self) -> &str {
        self.backend.name()
    }

    /// Loads the full document from the backend.
    pub fn load(&self) -> Result<Document> {
        self.backend.load()
    }

    /// Replaces the full document on the backend.
    pub fn dump(&self, document: &Document) -> Result<()> {
        self.backend.dump(document)
    }

    /// Looks up each key, in order.
    ///
    /// A key whose path does not fully resolve yields `None`; this is never an
    /// error. A key naming a mapping yields the whole subtree. The document is
    /// loaded once and never written back.
    pub fn get<K: AsRef<str>>(&self, keys: &[K]) -> Result<Vec<Option<Node>>> {
        let keys = KeyPath::parse_all(keys)?;
        let document = self.load()?;

        let values: Vec<Option<Node>> = keys
            .iter()
            .map(|key| document.lookup(key).cloned())
            .collect();

        tracing::debug!(
            "get {} keys from {}: {} found",
            keys.len(),
            self.location,
            values.iter().filter(|v| v.is_some()).count()
        );
        Ok(values)
    }

    /// Stores each value at the matching key and persists once.
    ///
    /// Missing intermediate mappings are created; the final segment is
    /// overwritten whatever it held.
    ///
    /// # Errors
    ///
    /// * [`KvError::InvalidArguments`] if the counts differ or a key is
    ///   malformed; nothing is loaded or written.
    /// * [`KvError::TypeConflict`] if a key descends through a non-mapping
    ///   value; nothing is written.
    pub fn set<K: AsRef<str>>(&self, keys: &[K], vals: Vec<Node>) -> Result<()> {
        if keys.len() != vals.len() {
            return Err(KvError::invalid_arguments(format!(
                "Mismatched keys & values {}:{}",
                keys.len(),
                vals.len()
            )));
        }
        let keys = KeyPath::parse_all(keys)?;

        let mut document = self.load()?;
        for (key, val) in keys.iter().zip(vals) {
            document.insert(key, val)?;
        }
        self.dump(&document)?;

        tracing::debug!("set {} keys in {}", keys.len(), self.location);
        Ok(())
    }

    /// Removes each key and persists once.
    ///
    /// A key with a missing intermediate segment is skipped silently.
    ///
    /// # Errors
    ///
    /// * [`KvError::InvalidArguments`] if a key is malformed.
    /// * [`KvError::KeyNotFound`] if every intermediate segment of a key
    ///   resolves but its final segment does not; nothing is written.
    pub fn delete<K: AsRef<str>>(&self, keys: &[K]) -> Result<()> {
        let keys = KeyPath::parse_all(keys)?;

        let mut document = self.load()?;
        let mut removed = 0;
        for key in &keys {
            if document.remove(key)?.is_some() {
                removed += 1;
            }
        }
        self.dump(&document)?;

        tracing::debug!(
            "delete {} keys from {}: {} removed",
            keys.len(),
            self.location,
            removed
        );
        Ok(())
    }
}

impl fmt::Debug for KvStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KvStore")
            .field("location", &self.location.to_string())
            .field("backend", &self.backend.name())
            .finish()
    }
}
