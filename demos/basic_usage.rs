// SPDX-License-Identifier: MIT OR Apache-2.0

//! Basic usage example for the hexkv crate.
//!
//! This example demonstrates:
//! - Resolving a JSON file store from a location URL
//! - Setting, getting and deleting values by dotted path
//! - Handling the structured errors the store reports
//!
//! To run this example:
//! ```bash
//! RUST_LOG=debug cargo run --example basic_usage
//! ```

use hexkv::prelude::*;

fn main() -> Result<()> {
    // Initialize tracing subscriber for logging
    tracing_subscriber::fmt::init();

    println!("=== hexkv: Basic Usage ===\n");

    let dir = std::env::temp_dir().join("hexkv-demo");
    let url = format!("json://{}", dir.join("settings.json").display());

    let registry = StoreRegistry::with_defaults();
    let store = registry.resolve(&url)?;
    println!("Store opened at {}\n", store.location());

    // Example 1: Set several values in one write
    println!("--- Example 1: Set ---");
    store.set(
        &["server.host", "server.port", "server.tls.enabled"],
        vec![Node::from("0.0.0.0"), Node::from(8080), Node::from(false)],
    )?;
    for key in store.load()?.leaf_paths() {
        println!("  {}", key);
    }

    // Example 2: Get, with absent keys reported as None
    println!("\n--- Example 2: Get ---");
    let keys = ["server.port", "server.tls", "server.missing"];
    for (key, value) in keys.iter().zip(store.get(&keys)?) {
        match value {
            Some(node) => println!("✓ {} = {:?}", key, node),
            None => println!("✗ {} is not set", key),
        }
    }

    // Example 3: Writing through a leaf is refused
    println!("\n--- Example 3: Type conflicts ---");
    match store.set(&["server.port.number"], vec![Node::from(1)]) {
        Err(e @ KvError::TypeConflict { .. }) => println!("✓ Refused: {} (code {})", e, e.code()),
        other => println!("✗ Unexpected: {:?}", other),
    }

    // Example 4: Delete, then delete again
    println!("\n--- Example 4: Delete ---");
    store.delete(&["server.tls.enabled"])?;
    println!("✓ Deleted server.tls.enabled");
    if let Err(e) = store.delete(&["server.tls.enabled"]) {
        println!("✓ Second delete failed as expected: {}", e);
    }

    // The same scheme always yields the same store
    let again = registry.resolve(&url)?;
    println!(
        "\nSame store on second resolve: {}",
        std::sync::Arc::ptr_eq(&store, &again)
    );

    Ok(())
}
