// SPDX-License-Identifier: MIT OR Apache-2.0

//! Document codec trait definition.
//!
//! File backends share everything except the text format. A [`DocumentCodec`]
//! supplies that format: it decodes file contents into a [`Document`] and
//! encodes a document back into text.

use crate::domain::{Document, Result};

/// A text format that can carry a [`Document`].
///
/// The root of the text must be a mapping. Decoding blank input should yield
/// an empty document so that a freshly created (empty) file is usable.
///
/// # Examples
///
/// ```rust
/// use hexkv::domain::{Document, KvError, Result};
/// use hexkv::ports::DocumentCodec;
///
/// #[derive(Default)]
/// struct NullCodec;
///
/// impl DocumentCodec for NullCodec {
///     const SCHEME: &'static str = "null";
///
///     fn decode(&self, content: &str) -> Result<Document> {
///         if content.trim().is_empty() {
///             Ok(Document::new())
///         } else {
///             Err(KvError::backend_msg(Self::SCHEME, "expected empty input"))
///         }
///     }
///
///     fn encode(&self, _document: &Document) -> Result<String> {
///         Ok(String::new())
///     }
///
///     fn supported_extensions(&self) -> &[&str] {
///         &["null"]
///     }
/// }
/// ```
pub trait DocumentCodec: Default + Send + Sync + 'static {
    /// The URL scheme of file backends using this codec.
    const SCHEME: &'static str;

    /// Decodes file contents into a document.
    ///
    /// Malformed input fails with
    /// [`KvError::BackendUnavailable`](crate::domain::KvError::BackendUnavailable).
    fn decode(&self, content: &str) -> Result<Document>;

    /// Encodes a document as file contents.
    fn encode(&self, document: &Document) -> Result<String>;

    /// Returns the file extensions this format conventionally uses.
    fn supported_extensions(&self) -> &[&str];
}
