// SPDX-License-Identifier: MIT OR Apache-2.0

//! Adapters layer containing backend implementations.
//!
//! Each adapter implements the `KvBackend` and `BackendFactory` traits from the
//! ports layer for one storage medium. File formats share a single
//! `FileBackend` and differ only in their codec.

pub mod file;
#[cfg(feature = "json")]
pub mod json_file;
pub mod memory;
#[cfg(feature = "redis")]
pub mod redis;
#[cfg(feature = "yaml")]
pub mod yaml_file;

use crate::ports::BackendRegistration;

// Re-export adapters based on feature flags
pub use file::{default_config_url, FileBackend};
#[cfg(feature = "json")]
pub use json_file::{JsonCodec, JsonFileBackend};
pub use memory::MemoryBackend;
#[cfg(feature = "redis")]
pub use redis::RedisBackend;
#[cfg(feature = "yaml")]
pub use yaml_file::{YamlCodec, YamlFileBackend};

/// Returns a registration for every backend compiled into this build.
///
/// # Examples
///
/// ```rust
/// use hexkv::adapters::builtin_backends;
///
/// let schemes: Vec<_> = builtin_backends().iter().map(|r| r.scheme()).collect();
/// assert!(schemes.contains(&"dict"));
/// ```
pub fn builtin_backends() -> Vec<BackendRegistration> {
    #[allow(unused_mut)]
    let mut backends = vec![BackendRegistration::of::<MemoryBackend>()];
    #[cfg(feature = "json")]
    backends.push(BackendRegistration::of::<JsonFileBackend>());
    #[cfg(feature = "yaml")]
    backends.push(BackendRegistration::of::<YamlFileBackend>());
    #[cfg(feature = "redis")]
    backends.push(BackendRegistration::of::<RedisBackend>());
    backends
}
