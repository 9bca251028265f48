// SPDX-License-Identifier: MIT OR Apache-2.0

//! JSON file backend.

use crate::adapters::file::FileBackend;
use crate::domain::{Document, KvError, Result};
use crate::ports::DocumentCodec;

/// JSON codec.
///
/// Blank input decodes to an empty document; any root other than an object is
/// rejected. Output is pretty-printed with a trailing newline.
#[derive(Debug, Clone, Default)]
pub struct JsonCodec;

impl JsonCodec {
    /// Creates a new JSON codec.
    pub fn new() -> Self {
        JsonCodec
    }
}

impl DocumentCodec for JsonCodec {
    const SCHEME: &'static str = "json";

    fn decode(&self, content: &str) -> Result<Document> {
        if content.trim().is_empty() {
            return Ok(Document::new());
        }
        serde_json::from_str(content)
            .map_err(|e| KvError::backend(Self::SCHEME, format!("Failed to parse JSON: {}", e), e))
    }

    fn encode(&self, document: &Document) -> Result<String> {
        let mut text = serde_json::to_string_pretty(document).map_err(|e| {
            KvError::backend(Self::SCHEME, format!("Failed to serialize JSON: {}", e), e)
        })?;
        text.push('\n');
        Ok(text)
    }

    fn supported_extensions(&self) -> &[&str] {
        &["json"]
    }
}

/// Backend for `json://` locations.
pub type JsonFileBackend = FileBackend<JsonCodec>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ErrorKind, KeyPath, Node};
    use crate::ports::KvBackend;
    use std::fs;

    fn key(s: &str) -> KeyPath {
        KeyPath::parse(s).unwrap()
    }

    #[test]
    fn test_json_codec_nested() {
        let doc = JsonCodec::new()
            .decode(r#"{"database": {"host": "localhost", "port": 5432, "ratio": 0.5}}"#)
            .unwrap();

        assert_eq!(
            doc.lookup(&key("database.host")),
            Some(&Node::from("localhost"))
        );
        assert_eq!(doc.lookup(&key("database.port")), Some(&Node::from(5432)));
        assert_eq!(doc.lookup(&key("database.ratio")), Some(&Node::from(0.5)));
    }

    #[test]
    fn test_json_codec_blank_is_empty() {
        assert!(JsonCodec::new().decode("  \n").unwrap().is_empty());
        assert!(JsonCodec::new().decode("{}").unwrap().is_empty());
    }

    #[test]
    fn test_json_codec_rejects_non_object_root() {
        let err = JsonCodec::new().decode("[1, 2, 3]").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::BackendUnavailable);
    }

    #[test]
    fn test_json_codec_rejects_malformed() {
        assert!(JsonCodec::new().decode("{\"a\": ").is_err());
    }

    #[test]
    fn test_json_codec_round_trip_preserves_opaque_values() {
        let codec = JsonCodec::new();
        let text = r#"{"list": [1, "two", {"three": 3}], "none": null, "flag": false}"#;
        let doc = codec.decode(text).unwrap();

        let encoded = codec.encode(&doc).unwrap();
        assert!(encoded.ends_with('\n'));
        assert_eq!(codec.decode(&encoded).unwrap(), doc);
    }

    #[test]
    fn test_json_codec_large_unsigned_round_trip() {
        let codec = JsonCodec::new();
        let doc = codec.decode(r#"{"id": 18446744073709551615, "small": 7}"#).unwrap();

        assert_eq!(doc.lookup(&key("id")), Some(&Node::from(u64::MAX)));
        assert_eq!(doc.lookup(&key("small")), Some(&Node::from(7)));

        let encoded = codec.encode(&doc).unwrap();
        assert!(encoded.contains("18446744073709551615"));
        assert_eq!(codec.decode(&encoded).unwrap(), doc);
    }

    #[test]
    fn test_json_codec_keeps_key_order() {
        let codec = JsonCodec::new();
        let doc = codec.decode(r#"{"zeta": 1, "alpha": 2}"#).unwrap();

        assert_eq!(doc.leaf_paths(), vec!["zeta", "alpha"]);
        let encoded = codec.encode(&doc).unwrap();
        assert!(encoded.find("zeta").unwrap() < encoded.find("alpha").unwrap());
    }

    #[test]
    fn test_json_backend_dump_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        let backend = JsonFileBackend::from_file(&path);

        let mut doc = Document::new();
        doc.insert(&key("a.b.c"), Node::from("v1")).unwrap();
        backend.dump(&doc).unwrap();

        let on_disk: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(on_disk, serde_json::json!({"a": {"b": {"c": "v1"}}}));
        assert_eq!(backend.load().unwrap(), doc);
        assert_eq!(backend.name(), "json");
    }
}
