// SPDX-License-Identifier: MIT OR Apache-2.0

//! YAML file backend.
//!
//! This module provides the `yaml://` scheme: a [`FileBackend`] whose contents
//! are YAML.

use crate::adapters::file::FileBackend;
use crate::domain::{Document, KvError, Result};
use crate::ports::DocumentCodec;

/// YAML codec.
///
/// An empty file, or one holding only comments or an explicit `null`, decodes
/// to an empty document. Any other root that is not a mapping is rejected.
/// Nested mappings with non-string keys, such as `404: not found`, decode to
/// [`Value::Table`](crate::domain::Value::Table) leaves and are written back
/// unchanged.
///
/// # Examples
///
/// ```rust
/// use hexkv::adapters::YamlCodec;
/// use hexkv::domain::KeyPath;
/// use hexkv::ports::DocumentCodec;
///
/// let codec = YamlCodec::new();
/// let doc = codec.decode("database:\n  host: localhost\n  port: 5432").unwrap();
/// let host = doc.lookup(&KeyPath::parse("database.host").unwrap()).unwrap();
/// assert_eq!(host.as_str(), Some("localhost"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct YamlCodec;

impl YamlCodec {
    /// Creates a new YAML codec.
    pub fn new() -> Self {
        YamlCodec
    }
}

impl DocumentCodec for YamlCodec {
    const SCHEME: &'static str = "yaml";

    fn decode(&self, content: &str) -> Result<Document> {
        let value: serde_yaml::Value = serde_yaml::from_str(content)
            .map_err(|e| KvError::backend(Self::SCHEME, format!("Failed to parse YAML: {}", e), e))?;

        if value.is_null() {
            return Ok(Document::new());
        }

        serde_yaml::from_value(value).map_err(|e| {
            KvError::backend(
                Self::SCHEME,
                format!("YAML root is not a mapping of string keys: {}", e),
                e,
            )
        })
    }

    fn encode(&self, document: &Document) -> Result<String> {
        serde_yaml::to_string(document).map_err(|e| {
            KvError::backend(Self::SCHEME, format!("Failed to serialize YAML: {}", e), e)
        })
    }

    fn supported_extensions(&self) -> &[&str] {
        &["yaml", "yml"]
    }
}

/// Backend for `yaml://` locations.
///
/// # Examples
///
/// ```rust,no_run
/// use hexkv::adapters::YamlFileBackend;
/// use hexkv::ports::KvBackend;
///
/// let backend = YamlFileBackend::from_file("/etc/myapp/config.yaml");
/// let document = backend.load().unwrap();
/// ```
pub type YamlFileBackend = FileBackend<YamlCodec>;
