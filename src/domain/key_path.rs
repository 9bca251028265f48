// SPDX-License-Identifier: MIT OR Apache-2.0

//! Dotted key paths.
//!
//! A [`KeyPath`] addresses a node inside a document: `database.primary.host`
//! walks the `database` mapping, then `primary`, and names `host` inside it.
//! There is no escaping mechanism, so a segment can never contain a `.`.

use crate::domain::errors::{KvError, Result};
use std::fmt;
use std::str::FromStr;

/// The hierarchy separator.
pub const SEPARATOR: char = '.';

/// A validated, dot-separated key path.
///
/// Construction rejects the empty string, empty segments (`a..b`, `.a`, `a.`)
/// and non-ASCII input, so every `KeyPath` has at least one non-empty segment.
///
/// # Examples
///
/// ```
/// use hexkv::domain::KeyPath;
///
/// let key = KeyPath::parse("database.host").unwrap();
/// assert_eq!(key.segments().collect::<Vec<_>>(), vec!["database", "host"]);
/// assert_eq!(key.leaf(), "host");
///
/// assert!(KeyPath::parse("").is_err());
/// assert!(KeyPath::parse("a..b").is_err());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct KeyPath(String);

impl KeyPath {
    /// Parses and validates a key path.
    pub fn parse(key: impl Into<String>) -> Result<Self> {
        let key = key.into();
        if key.is_empty() {
            return Err(KvError::invalid_arguments("Key path must not be empty"));
        }
        if !key.is_ascii() {
            return Err(KvError::invalid_arguments(format!(
                "Key path '{}' must be ASCII",
                key
            )));
        }
        if key.split(SEPARATOR).any(str::is_empty) {
            return Err(KvError::invalid_arguments(format!(
                "Key path '{}' contains an empty segment",
                key
            )));
        }
        Ok(KeyPath(key))
    }

    /// Parses every key in `keys`, failing on the first invalid one.
    pub fn parse_all<K: AsRef<str>>(keys: &[K]) -> Result<Vec<KeyPath>> {
        keys.iter().map(|k| KeyPath::parse(k.as_ref())).collect()
    }

    /// Returns the key as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Iterates over the path segments, root first.
    pub fn segments(&self) -> impl DoubleEndedIterator<Item = &str> + '_ {
        self.0.split(SEPARATOR)
    }

    /// Returns the number of segments.
    pub fn depth(&self) -> usize {
        self.segments().count()
    }

    /// Iterates over every segment except the last.
    pub fn parents(&self) -> impl Iterator<Item = &str> + '_ {
        let depth = self.depth();
        self.segments().take(depth - 1)
    }

    /// Returns the final segment.
    pub fn leaf(&self) -> &str {
        self.0.rsplit(SEPARATOR).next().unwrap_or(&self.0)
    }

    /// Returns the path up to and including the segment at `index`.
    ///
    /// Used to name the exact node involved in a conflict.
    pub fn prefix(&self, index: usize) -> &str {
        let end = self
            .0
            .match_indices(SEPARATOR)
            .nth(index)
            .map(|(pos, _)| pos)
            .unwrap_or(self.0.len());
        &self.0[..end]
    }
}

impl FromStr for KeyPath {
    type Err = KvError;

    fn from_str(s: &str) -> Result<Self> {
        KeyPath::parse(s)
    }
}

impl TryFrom<&str> for KeyPath {
    type Error = KvError;

    fn try_from(s: &str) -> Result<Self> {
        KeyPath::parse(s)
    }
}

impl TryFrom<String> for KeyPath {
    type Error = KvError;

    fn try_from(s: String) -> Result<Self> {
        KeyPath::parse(s)
    }
}

impl From<KeyPath> for String {
    fn from(key: KeyPath) -> Self {
        key.0
    }
}

impl AsRef<str> for KeyPath {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for KeyPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
