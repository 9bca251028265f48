// SPDX-License-Identifier: MIT OR Apache-2.0

//! Domain layer containing core types and the path-traversal engine.
//!
//! This module is independent of any storage medium. It defines what a key
//! path is, what a document looks like, how locations are parsed and which
//! errors the rest of the crate can report.

pub mod errors;
pub mod key_path;
pub mod location;
pub mod node;

// Re-export commonly used types
pub use errors::{ErrorKind, KvError, Result};
pub use key_path::KeyPath;
pub use location::StoreLocation;
pub use node::{Document, Mapping, Node, Table, Value};
