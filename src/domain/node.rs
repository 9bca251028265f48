// SPDX-License-Identifier: MIT OR Apache-2.0

//! Document tree and dotted-path traversal.
//!
//! A [`Document`] is the full snapshot a backend loads and dumps. Its root is
//! always a [`Mapping`]; every child is a [`Node`], which is either another
//! mapping (an internal node) or a [`Value`] leaf. Keeping the two cases as
//! distinct variants lets the traversal engine reject "descend through a leaf"
//! with a match arm instead of a runtime type probe.

use crate::domain::errors::{KvError, Result};
use crate::domain::key_path::KeyPath;
use indexmap::IndexMap;
use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// A string-keyed mapping of child nodes, in insertion order.
///
/// Order read from a backend is kept, and new keys are appended, so a file
/// keeps its layout across writes.
pub type Mapping = IndexMap<String, Node>;

/// A node in the document tree.
///
/// Serializes without a tag, so a `Node` reads and writes as plain JSON/YAML.
///
/// # Examples
///
/// ```
/// use hexkv::domain::{Mapping, Node};
///
/// let leaf = Node::from("localhost");
/// assert_eq!(leaf.as_str(), Some("localhost"));
///
/// let mapping = Node::Mapping(Mapping::new());
/// assert!(mapping.is_mapping());
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Node {
    /// An internal node.
    Mapping(Mapping),
    /// A leaf holding a value.
    Leaf(Value),
}

/// A leaf value.
///
/// Sequences are opaque to the store: it never descends into them, but
/// backends round-trip them unchanged.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    /// An explicit null.
    #[default]
    Null,
    /// A boolean.
    Bool(bool),
    /// A signed integer.
    Integer(i64),
    /// An unsigned integer above `i64::MAX`.
    Unsigned(u64),
    /// A floating point number.
    Float(f64),
    /// A string.
    String(String),
    /// An ordered sequence of nodes.
    Sequence(Vec<Node>),
    /// A mapping with at least one key that is not a string.
    Table(Table),
}

/// A mapping whose keys are arbitrary nodes, such as `404: not found` in YAML.
///
/// Key paths cannot address into it, so it is carried as an opaque leaf and
/// written back with its entries in their original order.
///
/// # Examples
///
/// ```
/// use hexkv::domain::{Node, Table};
///
/// let table = Table::new(vec![(Node::from(404), Node::from("not found"))]);
/// assert_eq!(table.len(), 1);
/// assert_eq!(table.get(&Node::from(404)), Some(&Node::from("not found")));
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Table(Vec<(Node, Node)>);

impl Table {
    /// Creates a table from key-value pairs.
    pub fn new(entries: Vec<(Node, Node)>) -> Self {
        Table(entries)
    }

    /// Returns the entries in order.
    pub fn entries(&self) -> &[(Node, Node)] {
        &self.0
    }

    /// Returns the value stored under `key`.
    pub fn get(&self, key: &Node) -> Option<&Node> {
        self.0.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    /// Returns the number of entries.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if the table has no entries.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Serialize for Table {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_map(self.0.iter().map(|(k, v)| (k, v)))
    }
}

impl<'de> Deserialize<'de> for Table {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        struct TableVisitor;

        impl<'de> Visitor<'de> for TableVisitor {
            type Value = Table;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a mapping")
            }

            fn visit_map<A: MapAccess<'de>>(
                self,
                mut map: A,
            ) -> std::result::Result<Table, A::Error> {
                let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some(entry) = map.next_entry::<Node, Node>()? {
                    entries.push(entry);
                }
                Ok(Table(entries))
            }
        }

        deserializer.deserialize_map(TableVisitor)
    }
}

impl Node {
    /// Creates an empty mapping node.
    pub fn mapping() -> Self {
        Node::Mapping(Mapping::new())
    }

    /// Creates a null leaf.
    pub fn null() -> Self {
        Node::Leaf(Value::Null)
    }

    /// Returns true if this node is a mapping.
    pub fn is_mapping(&self) -> bool {
        matches!(self, Node::Mapping(_))
    }

    /// Returns the mapping, if this node is one.
    pub fn as_mapping(&self) -> Option<&Mapping> {
        match self {
            Node::Mapping(map) => Some(map),
            Node::Leaf(_) => None,
        }
    }

    /// Returns the leaf value, if this node is one.
    pub fn as_value(&self) -> Option<&Value> {
        match self {
            Node::Leaf(value) => Some(value),
            Node::Mapping(_) => None,
        }
    }

    /// Returns the string, if this node is a string leaf.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Node::Leaf(Value::String(s)) => Some(s),
            _ => None,
        }
    }

    /// Returns the integer, if this node is an integer leaf.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Node::Leaf(Value::Integer(n)) => Some(*n),
            _ => None,
        }
    }

    /// Returns the integer, if this node is a non-negative integer leaf.
    pub fn as_u64(&self) -> Option<u64> {
        match self {
            Node::Leaf(Value::Integer(n)) => u64::try_from(*n).ok(),
            Node::Leaf(Value::Unsigned(n)) => Some(*n),
            _ => None,
        }
    }

    /// Returns the number as a float, if this node is a numeric leaf.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Node::Leaf(Value::Float(n)) => Some(*n),
            Node::Leaf(Value::Integer(n)) => Some(*n as f64),
            Node::Leaf(Value::Unsigned(n)) => Some(*n as f64),
            _ => None,
        }
    }

    /// Returns the boolean, if this node is a boolean leaf.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Node::Leaf(Value::Bool(b)) => Some(*b),
            _ => None,
        }
    }

    /// Returns true if this node is a null leaf.
    pub fn is_null(&self) -> bool {
        matches!(self, Node::Leaf(Value::Null))
    }
}

impl From<Value> for Node {
    fn from(value: Value) -> Self {
        Node::Leaf(value)
    }
}

impl From<Mapping> for Node {
    fn from(map: Mapping) -> Self {
        Node::Mapping(map)
    }
}

impl From<&str> for Node {
    fn from(s: &str) -> Self {
        Node::Leaf(Value::String(s.to_string()))
    }
}

impl From<String> for Node {
    fn from(s: String) -> Self {
        Node::Leaf(Value::String(s))
    }
}

impl From<bool> for Node {
    fn from(b: bool) -> Self {
        Node::Leaf(Value::Bool(b))
    }
}

impl From<i64> for Node {
    fn from(n: i64) -> Self {
        Node::Leaf(Value::Integer(n))
    }
}

impl From<i32> for Node {
    fn from(n: i32) -> Self {
        Node::Leaf(Value::Integer(i64::from(n)))
    }
}

impl From<u64> for Node {
    fn from(n: u64) -> Self {
        match i64::try_from(n) {
            Ok(n) => Node::Leaf(Value::Integer(n)),
            Err(_) => Node::Leaf(Value::Unsigned(n)),
        }
    }
}

impl From<Table> for Node {
    fn from(table: Table) -> Self {
        Node::Leaf(Value::Table(table))
    }
}

impl From<f64> for Node {
    fn from(n: f64) -> Self {
        Node::Leaf(Value::Float(n))
    }
}

impl<T: Into<Node>> From<Vec<T>> for Node {
    fn from(items: Vec<T>) -> Self {
        Node::Leaf(Value::Sequence(items.into_iter().map(Into::into).collect()))
    }
}

/// A full configuration snapshot for one store.
///
/// # Examples
///
/// ```
/// use hexkv::domain::{Document, KeyPath, Node};
///
/// let mut doc = Document::new();
/// let key = KeyPath::parse("a.b.c").unwrap();
///
/// doc.insert(&key, Node::from("v1")).unwrap();
/// assert_eq!(doc.lookup(&key), Some(&Node::from("v1")));
///
/// doc.remove(&key).unwrap();
/// assert_eq!(doc.lookup(&key), None);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Document {
    root: Mapping,
}

impl Document {
    /// Creates an empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the root mapping.
    pub fn root(&self) -> &Mapping {
        &self.root
    }

    /// Consumes the document, returning the root mapping.
    pub fn into_mapping(self) -> Mapping {
        self.root
    }

    /// Returns true if the root mapping has no entries.
    pub fn is_empty(&self) -> bool {
        self.root.is_empty()
    }

    /// Returns the node at `key`.
    ///
    /// Traversal stops with `None` as soon as a segment is missing or an
    /// intermediate node is not a mapping.
    pub fn lookup(&self, key: &KeyPath) -> Option<&Node> {
        let mut current = &self.root;
        for segment in key.parents() {
            current = current.get(segment)?.as_mapping()?;
        }
        current.get(key.leaf())
    }

    /// Stores `value` at `key`, creating missing intermediate mappings.
    ///
    /// Returns the node previously at `key`, if any. Fails with
    /// [`KvError::TypeConflict`] when an intermediate segment holds a leaf; in
    /// that case any mappings created for earlier segments of this key remain,
    /// so callers that need all-or-nothing should work on a copy.
    pub fn insert(&mut self, key: &KeyPath, value: Node) -> Result<Option<Node>> {
        let mut current = &mut self.root;
        for (index, segment) in key.parents().enumerate() {
            let child = current
                .entry(segment.to_string())
                .or_insert_with(Node::mapping);
            current = match child {
                Node::Mapping(map) => map,
                Node::Leaf(_) => {
                    return Err(KvError::TypeConflict {
                        key: key.to_string(),
                        segment: key.prefix(index).to_string(),
                    })
                }
            };
        }
        Ok(current.insert(key.leaf().to_string(), value))
    }

    /// Removes the node at `key`.
    ///
    /// Returns `Ok(None)` without touching the document when an intermediate
    /// segment is missing or is not a mapping. Fails with
    /// [`KvError::KeyNotFound`] when every intermediate resolves but the final
    /// segment is absent.
    pub fn remove(&mut self, key: &KeyPath) -> Result<Option<Node>> {
        let mut current = &mut self.root;
        for segment in key.parents() {
            current = match current.get_mut(segment) {
                Some(Node::Mapping(map)) => map,
                _ => return Ok(None),
            };
        }
        current
            .shift_remove(key.leaf())
            .map(Some)
            .ok_or_else(|| KvError::KeyNotFound {
                key: key.to_string(),
            })
    }

    /// Lists the dotted path of every leaf, in document order.
    ///
    /// Empty mappings contribute no paths.
    pub fn leaf_paths(&self) -> Vec<String> {
        fn walk(map: &Mapping, prefix: &str, out: &mut Vec<String>) {
            for (name, node) in map {
                let path = if prefix.is_empty() {
                    name.clone()
                } else {
                    format!("{}.{}", prefix, name)
                };
                match node {
                    Node::Mapping(child) => walk(child, &path, out),
                    Node::Leaf(_) => out.push(path),
                }
            }
        }

        let mut out = Vec::new();
        walk(&self.root, "", &mut out);
        out
    }
}

impl From<Mapping> for Document {
    fn from(root: Mapping) -> Self {
        Document { root }
    }
}

impl FromIterator<(String, Node)> for Document {
    fn from_iter<I: IntoIterator<Item = (String, Node)>>(iter: I) -> Self {
        Document {
            root: iter.into_iter().collect(),
        }
    }
}
