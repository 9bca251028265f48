// SPDX-License-Identifier: MIT OR Apache-2.0

//! Integration tests for dotted-path CRUD on a store.

mod common;

use common::recording_store;
use hexkv::prelude::*;

fn key(s: &str) -> KeyPath {
    KeyPath::parse(s).unwrap()
}

fn doc(pairs: &[(&str, Node)]) -> Document {
    let mut document = Document::new();
    for (k, v) in pairs {
        document.insert(&key(k), v.clone()).unwrap();
    }
    document
}

#[test]
fn test_full_scenario_on_memory_store() {
    let registry = StoreRegistry::with_defaults();
    let store = registry.resolve("dict://scenario").unwrap();
    assert!(store.load().unwrap().is_empty());

    store.set(&["a.b.c"], vec![Node::from("v1")]).unwrap();
    assert_eq!(store.load().unwrap(), doc(&[("a.b.c", Node::from("v1"))]));

    assert_eq!(store.get(&["a.b.c"]).unwrap(), vec![Some(Node::from("v1"))]);
    assert_eq!(store.get(&["a.b.x"]).unwrap(), vec![None]);

    store.delete(&["a.b.c"]).unwrap();
    assert_eq!(store.load().unwrap(), doc(&[("a.b", Node::mapping())]));

    let err = store.delete(&["a.b.c"]).unwrap_err();
    assert!(matches!(err, KvError::KeyNotFound { ref key } if key == "a.b.c"));
    assert_eq!(err.code(), 2);
}

#[test]
fn test_get_never_errors_on_absent_paths() {
    let (store, _) = recording_store(doc(&[("a.b", Node::from(1))]));

    let values = store.get(&["z", "a.x", "a.b.c", "a.b.c.d"]).unwrap();
    assert_eq!(values, vec![None, None, None, None]);
}

#[test]
fn test_get_mixed_present_and_absent() {
    let (store, probe) = recording_store(doc(&[
        ("server.host", Node::from("localhost")),
        ("server.port", Node::from(8080)),
    ]));

    let values = store
        .get(&["server.port", "server.tls", "server.host"])
        .unwrap();
    assert_eq!(
        values,
        vec![
            Some(Node::from(8080)),
            None,
            Some(Node::from("localhost"))
        ]
    );
    assert_eq!(probe.loads(), 1);
    assert_eq!(probe.dumps(), 0);
}

#[test]
fn test_set_many_keys_one_dump() {
    let (store, probe) = recording_store(Document::new());
    store
        .set(
            &["db.host", "db.port", "db.pool.size", "debug"],
            vec![
                Node::from("h"),
                Node::from(5432),
                Node::from(10),
                Node::from(true),
            ],
        )
        .unwrap();

    assert_eq!(probe.loads(), 1);
    assert_eq!(probe.dumps(), 1);
    assert_eq!(
        store.load().unwrap().leaf_paths(),
        vec!["db.host", "db.port", "db.pool.size", "debug"]
    );
}

#[test]
fn test_set_later_pair_wins_for_repeated_key() {
    let (store, _) = recording_store(Document::new());
    store
        .set(&["k", "k"], vec![Node::from("first"), Node::from("second")])
        .unwrap();
    assert_eq!(store.get(&["k"]).unwrap(), vec![Some(Node::from("second"))]);
}

#[test]
fn test_set_mismatch_leaves_document_untouched() {
    let seed = doc(&[("keep", Node::from("me"))]);
    let (store, probe) = recording_store(seed.clone());

    let err = store
        .set(&["a", "b", "c"], vec![Node::from(1), Node::from(2)])
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::InvalidArguments);
    assert_eq!(err.code(), 22);
    assert_eq!(probe.loads(), 0);
    assert_eq!(probe.dumps(), 0);
    assert_eq!(store.load().unwrap(), seed);
}

#[test]
fn test_set_through_leaf_is_type_conflict() {
    let seed = doc(&[("a.b", Node::from("leaf"))]);
    let (store, probe) = recording_store(seed.clone());

    let err = store.set(&["a.b.c"], vec![Node::from(1)]).unwrap_err();
    match err {
        KvError::TypeConflict {
            ref key,
            ref segment,
        } => {
            assert_eq!(key, "a.b.c");
            assert_eq!(segment, "a.b");
        }
        other => panic!("expected a type conflict, got {:?}", other),
    }
    assert_eq!(err.code(), 20);
    assert_eq!(probe.dumps(), 0);
    assert_eq!(store.load().unwrap(), seed);
}

#[test]
fn test_set_replaces_subtree() {
    let (store, _) = recording_store(doc(&[
        ("a.b.c", Node::from(1)),
        ("a.b.d", Node::from(2)),
    ]));

    store.set(&["a.b"], vec![Node::from("flat")]).unwrap();
    assert_eq!(store.load().unwrap(), doc(&[("a.b", Node::from("flat"))]));
}

#[test]
fn test_set_stores_whole_mapping_value() {
    let (store, _) = recording_store(Document::new());
    let value: Node = serde_json::from_str(r#"{"x": 1, "y": {"z": true}}"#).unwrap();

    store.set(&["obj"], vec![value]).unwrap();
    assert_eq!(store.get(&["obj.y.z"]).unwrap(), vec![Some(Node::from(true))]);
}

#[test]
fn test_delete_skips_missing_or_leaf_intermediates() {
    let seed = doc(&[("a.b", Node::from(1))]);
    let (store, probe) = recording_store(seed.clone());

    store.delete(&["x.y", "a.b.c"]).unwrap();
    assert_eq!(probe.dumps(), 1);
    assert_eq!(store.load().unwrap(), seed);
}

#[test]
fn test_delete_many_keys_one_dump() {
    let (store, probe) = recording_store(doc(&[
        ("a", Node::from(1)),
        ("b.c", Node::from(2)),
        ("b.d", Node::from(3)),
    ]));

    store.delete(&["a", "b.c"]).unwrap();
    assert_eq!(probe.dumps(), 1);
    assert_eq!(store.load().unwrap(), doc(&[("b.d", Node::from(3))]));
}

#[test]
fn test_delete_missing_final_segment_dumps_nothing() {
    let seed = doc(&[("a.x", Node::from(1)), ("a.y", Node::from(2))]);
    let (store, probe) = recording_store(seed.clone());

    let err = store.delete(&["a.x", "a.missing"]).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::KeyNotFound);
    assert_eq!(probe.dumps(), 0);
    assert_eq!(store.load().unwrap(), seed);
}

#[test]
fn test_delete_subtree() {
    let (store, _) = recording_store(doc(&[("a.b.c", Node::from(1)), ("z", Node::from(0))]));

    store.delete(&["a"]).unwrap();
    assert_eq!(store.load().unwrap(), doc(&[("z", Node::from(0))]));
}

#[test]
fn test_invalid_keys_rejected_before_load() {
    let (store, probe) = recording_store(Document::new());

    for bad in ["", ".a", "a.", "a..b", "ключ"] {
        assert_eq!(
            store.get(&[bad]).unwrap_err().kind(),
            ErrorKind::InvalidArguments
        );
        assert_eq!(
            store.delete(&[bad]).unwrap_err().kind(),
            ErrorKind::InvalidArguments
        );
    }
    assert_eq!(probe.loads(), 0);
}

#[test]
fn test_backend_errors_propagate_unchanged() {
    let (store, probe) = recording_store(Document::new());

    probe.fail_dumps(true);
    let err = store.set(&["a"], vec![Node::from(1)]).unwrap_err();
    assert!(matches!(err, KvError::BackendUnavailable { ref backend, .. } if backend == "recording"));
    assert_eq!(err.code(), 5);

    probe.fail_dumps(false);
    probe.fail_loads(true);
    assert_eq!(
        store.get(&["a"]).unwrap_err().kind(),
        ErrorKind::BackendUnavailable
    );
}

#[test]
fn test_no_caching_between_operations() {
    let registry = StoreRegistry::with_defaults();
    let store = registry.resolve("dict://external").unwrap();

    store
        .dump(&doc(&[("written", Node::from("outside"))]))
        .unwrap();
    assert_eq!(
        store.get(&["written"]).unwrap(),
        vec![Some(Node::from("outside"))]
    );
}
