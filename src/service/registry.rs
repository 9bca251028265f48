// SPDX-License-Identifier: MIT OR Apache-2.0

//! Scheme-keyed store registry.
//!
//! A [`StoreRegistry`] maps a location URL's scheme to the backend that serves
//! it, and hands out one shared [`KvStore`] per scheme. The first resolution of
//! a scheme decides its location; later resolutions get the same store back.

use crate::domain::{KvError, Result, StoreLocation};
use crate::ports::{BackendFactory, BackendRegistration};
use crate::service::KvStore;
use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

static GLOBAL: Lazy<StoreRegistry> = Lazy::new(StoreRegistry::with_defaults);

/// Resolves location URLs to shared stores.
///
/// # Examples
///
/// ```rust
/// use hexkv::service::StoreRegistry;
/// use std::sync::Arc;
///
/// # fn main() -> hexkv::domain::Result<()> {
/// let registry = StoreRegistry::with_defaults();
///
/// let first = registry.resolve("dict://settings")?;
/// let second = registry.resolve("dict://settings")?;
/// assert!(Arc::ptr_eq(&first, &second));
///
/// assert!(registry.resolve("bogus://x").is_err());
/// # Ok(())
/// # }
/// ```
pub struct StoreRegistry {
    /// Known backends keyed by scheme
    backends: HashMap<&'static str, BackendRegistration>,
    /// Stores constructed so far, keyed by scheme
    stores: Mutex<HashMap<String, Arc<KvStore>>>,
}

impl StoreRegistry {
    /// Creates a new registry builder.
    pub fn builder() -> StoreRegistryBuilder {
        StoreRegistryBuilder::new()
    }

    /// Creates a registry holding every backend compiled into this build.
    pub fn with_defaults() -> Self {
        let backends = crate::adapters::builtin_backends()
            .into_iter()
            .map(|registration| (registration.scheme(), registration))
            .collect();
        Self::from_backends(backends)
    }

    /// Returns the process-wide registry, created with the default backends on
    /// first use.
    ///
    /// Stores resolved through it live until the process exits. Prefer an
    /// explicit [`StoreRegistry`] where the lifetime of stores matters, such as
    /// in tests.
    pub fn global() -> &'static StoreRegistry {
        &GLOBAL
    }

    fn from_backends(backends: HashMap<&'static str, BackendRegistration>) -> Self {
        Self {
            backends,
            stores: Mutex::new(HashMap::new()),
        }
    }

    /// Returns the store for `url`'s scheme, constructing it on first use.
    ///
    /// Once a scheme has a store, the authority and path of later URLs for
    /// that scheme are ignored.
    ///
    /// # Errors
    ///
    /// * [`KvError::InvalidArguments`] if `url` cannot be parsed.
    /// * [`KvError::InvalidConfiguration`] if no backend serves the scheme.
    /// * Any error from the backend's `open`.
    pub fn resolve(&self, url: &str) -> Result<Arc<KvStore>> {
        let location = StoreLocation::parse(url)?;
        let scheme = location.scheme().to_string();

        let mut stores = self.stores.lock().unwrap_or_else(PoisonError::into_inner);

        if let Some(store) = stores.get(&scheme) {
            if store.location() != &location {
                tracing::warn!(
                    "Store for '{}' already bound to {}, ignoring {}",
                    scheme,
                    store.location(),
                    location
                );
            }
            return Ok(Arc::clone(store));
        }

        let registration = self
            .backends
            .get(scheme.as_str())
            .ok_or_else(|| KvError::unknown_scheme(&scheme))?;
        let backend = registration.open(&location)?;

        tracing::info!("Opened {} store at {}", backend.name(), location);
        let store = Arc::new(KvStore::new(location, backend));
        stores.insert(scheme, Arc::clone(&store));
        Ok(store)
    }

    /// Returns the registered schemes, sorted.
    pub fn schemes(&self) -> Vec<&'static str> {
        let mut schemes: Vec<_> = self.backends.keys().copied().collect();
        schemes.sort_unstable();
        schemes
    }

    /// Returns `true` if a store has been constructed for `scheme`.
    pub fn is_cached(&self, scheme: &str) -> bool {
        self.stores
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(scheme)
    }
}

impl Default for StoreRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl std::fmt::Debug for StoreRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StoreRegistry")
            .field("schemes", &self.schemes())
            .finish_non_exhaustive()
    }
}

/// Builder for constructing a [`StoreRegistry`].
///
/// # Examples
///
/// ```rust
/// use hexkv::adapters::MemoryBackend;
/// use hexkv::service::StoreRegistryBuilder;
///
/// # fn main() -> hexkv::domain::Result<()> {
/// let registry = StoreRegistryBuilder::new()
///     .with_backend::<MemoryBackend>()
///     .build()?;
/// assert_eq!(registry.schemes(), vec!["dict"]);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Default)]
pub struct StoreRegistryBuilder {
    registrations: Vec<BackendRegistration>,
}

impl StoreRegistryBuilder {
    /// Creates a new builder with no backends.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds the backend type `B` under its scheme.
    pub fn with_backend<B: BackendFactory>(self) -> Self {
        self.with_registration(BackendRegistration::of::<B>())
    }

    /// Adds a prepared registration.
    pub fn with_registration(mut self, registration: BackendRegistration) -> Self {
        self.registrations.push(registration);
        self
    }

    /// Adds every backend compiled into this build.
    pub fn with_default_backends(mut self) -> Self {
        self.registrations.extend(crate::adapters::builtin_backends());
        self
    }

    /// Builds the registry.
    ///
    /// # Errors
    ///
    /// Fails with [`KvError::InvalidConfiguration`] if two registrations share a
    /// scheme.
    pub fn build(self) -> Result<StoreRegistry> {
        let mut backends = HashMap::with_capacity(self.registrations.len());

        for registration in self.registrations {
            if backends
                .insert(registration.scheme(), registration)
                .is_some()
            {
                return Err(KvError::InvalidConfiguration {
                    scheme: registration.scheme().to_string(),
                    reason: "scheme is registered more than once".to_string(),
                });
            }
        }

        Ok(StoreRegistry::from_backends(backends))
    }
}
