// SPDX-License-Identifier: MIT OR Apache-2.0

//! A hierarchical key-value store with pluggable backends.
//!
//! Values live in a tree of nested mappings and are addressed by dotted key
//! paths such as `database.connection.host`. A store is named by a location
//! URL whose scheme picks the backend (`dict://`, `json://`, `yaml://`,
//! `redis://`); the rest of the URL tells that backend where its data lives.
//!
//! # Architecture
//!
//! The crate follows hexagonal architecture principles:
//!
//! - **Domain Layer**: Core types and path traversal (`KeyPath`, `Document`, `Node`, errors)
//! - **Ports**: Trait definitions for storage media (`KvBackend`, `BackendFactory`, `DocumentCodec`)
//! - **Adapters**: Backends for specific media (memory, JSON and YAML files, Redis)
//! - **Service**: The store that performs CRUD and the registry that hands stores out
//!
//! Backends only know how to load and dump a whole document. Everything that
//! involves key paths happens once, in [`service::KvStore`], on top of any
//! backend.
//!
//! # Feature Flags
//!
//! - `json`: Enable the `json://` file backend (default)
//! - `yaml`: Enable the `yaml://` file backend (default)
//! - `cli`: Build the `hexkv` command-line tool (default)
//! - `redis`: Enable the `redis://` backend
//! - `remote`: Enable all remote backends
//! - `full`: Enable all features
//!
//! # Quick Start
//!
//! ```rust
//! use hexkv::prelude::*;
//!
//! # fn main() -> Result<()> {
//! let registry = StoreRegistry::with_defaults();
//! let store = registry.resolve("dict://quickstart")?;
//!
//! store.set(&["a.b.c"], vec![Node::from("v1")])?;
//! assert_eq!(store.get(&["a.b.c"])?, vec![Some(Node::from("v1"))]);
//! assert_eq!(store.get(&["a.b.x"])?, vec![None]);
//!
//! store.delete(&["a.b.c"])?;
//! let err = store.delete(&["a.b.c"]).unwrap_err();
//! assert_eq!(err.kind(), ErrorKind::KeyNotFound);
//! # Ok(())
//! # }
//! ```
//!
//! # Concurrency
//!
//! Every operation is a full `load -> mutate -> dump` cycle with no locking
//! across it. Overlapping writers to the same medium are last-writer-wins.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![warn(clippy::all)]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod service;

/// Commonly used types and traits.
///
/// This module re-exports the most commonly used types and traits for convenient access.
pub mod prelude {
    pub use crate::domain::{
        Document, ErrorKind, KeyPath, KvError, Mapping, Node, Result, StoreLocation, Table,
        Value,
    };
    pub use crate::ports::{BackendFactory, BackendRegistration, DocumentCodec, KvBackend};
    pub use crate::service::{KvStore, StoreRegistry, StoreRegistryBuilder};

    // Re-export adapters based on feature flags
    pub use crate::adapters::MemoryBackend;
    #[cfg(feature = "json")]
    pub use crate::adapters::{JsonCodec, JsonFileBackend};
    #[cfg(feature = "redis")]
    pub use crate::adapters::RedisBackend;
    #[cfg(feature = "yaml")]
    pub use crate::adapters::{YamlCodec, YamlFileBackend};
}
