//! Basic cache example
//!
//! set/get/release/miss, the smallest useful walkthrough of the cache
//! API.

use anvil::Cache;
use std::time::Duration;

fn main() {
    println!("=== Cache Basic Example ===\n");

    let cache = Cache::new(100, Duration::from_secs(300));

    cache.set(b"k", b"v", None).expect("set should succeed");
    println!("set(\"k\", \"v\")");

    match cache.get(b"k") {
        Some(r) => {
            println!("get(\"k\") -> {:?}", String::from_utf8_lossy(r.as_bytes()));
            r.release();
        }
        None => println!("get(\"k\") -> miss (unexpected)"),
    }

    match cache.get(b"missing") {
        Some(_) => println!("get(\"missing\") -> hit (unexpected)"),
        None => println!("get(\"missing\") -> miss"),
    }

    println!("len={} capacity={}", cache.len(), cache.capacity());
    println!("\n=== Example Complete ===");
}
