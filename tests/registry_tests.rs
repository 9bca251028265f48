// SPDX-License-Identifier: MIT OR Apache-2.0

//! Integration tests for scheme resolution and store sharing.

mod common;

use common::RecordingBackend;
use hexkv::prelude::*;
use std::sync::{Arc, Barrier};
use std::thread;

#[test]
fn test_same_scheme_same_store() {
    let registry = StoreRegistry::with_defaults();
    let a = registry.resolve("dict://one").unwrap();
    let b = registry.resolve("dict://one").unwrap();
    assert!(Arc::ptr_eq(&a, &b));
}

#[cfg(feature = "json")]
#[test]
fn test_different_schemes_different_stores() {
    let dir = tempfile::tempdir().unwrap();
    let json_url = format!("json://{}", dir.path().join("c.json").display());

    let registry = StoreRegistry::with_defaults();
    let dict = registry.resolve("dict://one").unwrap();
    let json = registry.resolve(&json_url).unwrap();

    assert!(!Arc::ptr_eq(&dict, &json));
    assert_eq!(dict.backend_name(), "dict");
    assert_eq!(json.backend_name(), "json");
}

#[test]
fn test_first_location_wins() {
    let registry = StoreRegistry::with_defaults();
    let first = registry.resolve("dict://alpha/one").unwrap();
    let second = registry.resolve("dict://beta/two").unwrap();

    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(second.loc(), "alpha");
    assert_eq!(second.path(), "/one");
}

#[test]
fn test_unknown_scheme() {
    let registry = StoreRegistry::with_defaults();
    let err = registry.resolve("bogus://x").unwrap_err();

    assert_eq!(err.kind(), ErrorKind::InvalidConfiguration);
    assert_eq!(err.code(), 22);
    assert!(err.to_string().contains("bogus"));
}

#[test]
fn test_registries_are_independent() {
    let a = StoreRegistry::with_defaults();
    let b = StoreRegistry::with_defaults();

    let from_a = a.resolve("dict://x").unwrap();
    let from_b = b.resolve("dict://x").unwrap();
    assert!(!Arc::ptr_eq(&from_a, &from_b));

    from_a.set(&["k"], vec![Node::from(1)]).unwrap();
    assert_eq!(from_b.get(&["k"]).unwrap(), vec![None]);
}

#[test]
fn test_custom_backend_registration() {
    let registry = StoreRegistry::builder()
        .with_default_backends()
        .with_backend::<RecordingBackend>()
        .build()
        .unwrap();

    assert!(registry.schemes().contains(&"recording"));
    let store = registry.resolve("recording://anything").unwrap();
    assert_eq!(store.backend_name(), "recording");
}

#[test]
fn test_duplicate_registration_rejected() {
    let err = StoreRegistry::builder()
        .with_default_backends()
        .with_registration(BackendRegistration::of::<MemoryBackend>())
        .build()
        .unwrap_err();

    assert!(matches!(err, KvError::InvalidConfiguration { ref scheme, .. } if scheme == "dict"));
}

#[test]
fn test_empty_registry_knows_nothing() {
    let registry = StoreRegistry::builder().build().unwrap();
    assert!(registry.schemes().is_empty());
    assert!(registry.resolve("dict://x").is_err());
}

#[test]
fn test_concurrent_resolution_yields_one_store() {
    let registry = Arc::new(StoreRegistry::with_defaults());
    let barrier = Arc::new(Barrier::new(8));

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let registry = Arc::clone(&registry);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                registry.resolve(&format!("dict://thread{}", i)).unwrap()
            })
        })
        .collect();

    let stores: Vec<Arc<KvStore>> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    for store in &stores[1..] {
        assert!(Arc::ptr_eq(&stores[0], store));
    }
}

#[test]
fn test_global_registry() {
    let a = StoreRegistry::global().resolve("dict://global").unwrap();
    let b = StoreRegistry::global().resolve("dict://global").unwrap();
    assert!(Arc::ptr_eq(&a, &b));
    assert!(StoreRegistry::global().is_cached("dict"));
}
