// SPDX-License-Identifier: MIT OR Apache-2.0

//! Ports layer containing trait definitions.
//!
//! These traits define what a storage backend must provide. Adapters in the
//! adapters layer implement them; the service layer only ever talks to them.

pub mod backend;
pub mod codec;

// Re-export commonly used types
pub use backend::{BackendFactory, BackendRegistration, KvBackend};
pub use codec::DocumentCodec;
