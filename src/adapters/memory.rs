// SPDX-License-Identifier: MIT OR Apache-2.0

//! In-process backend.
//!
//! The `dict://` backend keeps its document in memory for the life of the
//! process. It is the natural backend for tests and for scratch configuration
//! that never needs to outlive the process.

use crate::domain::{Document, Result, StoreLocation};
use crate::ports::{BackendFactory, KvBackend};
use std::sync::{Mutex, PoisonError};

/// Backend holding its document in memory.
///
/// A new backend starts with an empty document. `load` returns a copy, so a
/// caller mutating a loaded document sees no effect until it calls `dump`.
///
/// # Examples
///
/// ```rust
/// use hexkv::adapters::MemoryBackend;
/// use hexkv::domain::{Document, KeyPath, Node};
/// use hexkv::ports::KvBackend;
///
/// let backend = MemoryBackend::new("scratch");
/// assert!(backend.load().unwrap().is_empty());
///
/// let mut doc = Document::new();
/// doc.insert(&KeyPath::parse("a.b").unwrap(), Node::from("v")).unwrap();
/// backend.dump(&doc).unwrap();
/// assert_eq!(backend.load().unwrap(), doc);
/// ```
#[derive(Debug, Default)]
pub struct MemoryBackend {
    /// Name from the location authority, used only for diagnostics
    label: String,
    /// The current document
    document: Mutex<Document>,
}

impl MemoryBackend {
    /// Creates an empty in-memory backend.
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            document: Mutex::new(Document::new()),
        }
    }

    /// Creates an in-memory backend seeded with `document`.
    pub fn with_document(label: impl Into<String>, document: Document) -> Self {
        Self {
            label: label.into(),
            document: Mutex::new(document),
        }
    }

    /// Returns the label this backend was created with.
    pub fn label(&self) -> &str {
        &self.label
    }
}

impl KvBackend for MemoryBackend {
    fn name(&self) -> &str {
        Self::SCHEME
    }

    fn load(&self) -> Result<Document> {
        let document = self
            .document
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();
        tracing::debug!("Loaded {} top-level keys from dict://{}", document.root().len(), self.label);
        Ok(document)
    }

    fn dump(&self, document: &Document) -> Result<()> {
        *self
            .document
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = document.clone();
        tracing::debug!("Dumped {} top-level keys to dict://{}", document.root().len(), self.label);
        Ok(())
    }
}

impl BackendFactory for MemoryBackend {
    const SCHEME: &'static str = "dict";

    fn open(location: &StoreLocation) -> Result<Self> {
        Ok(Self::new(location.loc()))
    }
}
