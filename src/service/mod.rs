// SPDX-License-Identifier: MIT OR Apache-2.0

//! Service layer containing the store and the registry.
//!
//! [`KvStore`] performs dotted-path CRUD against one backend;
//! [`StoreRegistry`] turns location URLs into shared stores.

pub mod kv_store;
pub mod registry;

// Re-export commonly used types
pub use kv_store::KvStore;
pub use registry::{StoreRegistry, StoreRegistryBuilder};
