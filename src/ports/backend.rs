// SPDX-License-Identifier: MIT OR Apache-2.0

//! Backend trait definitions.
//!
//! A backend owns one storage medium. It knows how to turn that medium into a
//! [`Document`] (`load`) and how to persist a whole document back (`dump`).
//! Everything else, dotted paths included, is handled by the store.

use crate::domain::{Document, Result, StoreLocation};

/// A storage medium that can load and dump a full document.
///
/// Both methods are required: a backend that cannot do either does not
/// compile.
///
/// # Contract
///
/// * `load` fails with [`KvError::BackendUnavailable`](crate::domain::KvError::BackendUnavailable)
///   if the medium cannot be read or its contents are malformed. A backend may
///   return an empty document only when it has confirmed the medium does not
///   exist yet, and must say so in its documentation.
/// * `dump` persists the entire document and must not leave a partially
///   written medium behind where the medium allows it (write-then-rename for
///   files, a single command for remote stores).
///
/// # Thread Safety
///
/// Implementations must be `Send + Sync` so stores can be shared across
/// threads. This does not make concurrent writes safe: two overlapping
/// load/dump cycles are last-writer-wins.
///
/// # Examples
///
/// ```rust
/// use hexkv::domain::{Document, Result};
/// use hexkv::ports::KvBackend;
///
/// struct ReadOnlyEmpty;
///
/// impl KvBackend for ReadOnlyEmpty {
///     fn name(&self) -> &str {
///         "empty"
///     }
///
///     fn load(&self) -> Result<Document> {
///         Ok(Document::new())
///     }
///
///     fn dump(&self, _document: &Document) -> Result<()> {
///         Ok(())
///     }
/// }
/// ```
pub trait KvBackend: Send + Sync {
    /// Returns a short name for logging and error messages, like `"json"`.
    fn name(&self) -> &str;

    /// Reads the full document from the medium.
    fn load(&self) -> Result<Document>;

    /// Replaces the full document on the medium.
    fn dump(&self, document: &Document) -> Result<()>;
}

/// A backend that can be discovered by scheme.
///
/// The registry matches a location's scheme against [`BackendFactory::SCHEME`]
/// and calls [`BackendFactory::open`] with the parsed location. `open` should
/// validate the location and prepare any clients, but should not read the
/// medium.
pub trait BackendFactory: KvBackend + Sized + 'static {
    /// The URL scheme this backend serves.
    const SCHEME: &'static str;

    /// Creates a backend bound to `location`.
    fn open(location: &StoreLocation) -> Result<Self>;
}

type OpenFn = fn(&StoreLocation) -> Result<Box<dyn KvBackend>>;

/// A registry entry: a scheme plus a constructor for its backend.
///
/// # Examples
///
/// ```rust
/// use hexkv::adapters::MemoryBackend;
/// use hexkv::ports::BackendRegistration;
///
/// let registration = BackendRegistration::of::<MemoryBackend>();
/// assert_eq!(registration.scheme(), "dict");
/// ```
#[derive(Clone, Copy)]
pub struct BackendRegistration {
    scheme: &'static str,
    open: OpenFn,
}

impl BackendRegistration {
    /// Captures the scheme and constructor of `B`.
    pub fn of<B: BackendFactory>() -> Self {
        Self {
            scheme: B::SCHEME,
            open: open_boxed::<B>,
        }
    }

    /// Returns the scheme this registration serves.
    pub fn scheme(&self) -> &'static str {
        self.scheme
    }

    /// Opens a backend for `location`.
    pub fn open(&self, location: &StoreLocation) -> Result<Box<dyn KvBackend>> {
        (self.open)(location)
    }
}

impl std::fmt::Debug for BackendRegistration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BackendRegistration")
            .field("scheme", &self.scheme)
            .finish_non_exhaustive()
    }
}

fn open_boxed<B: BackendFactory>(location: &StoreLocation) -> Result<Box<dyn KvBackend>> {
    Ok(Box::new(B::open(location)?))
}
