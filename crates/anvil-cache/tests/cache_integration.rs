//! End-to-end cache scenarios.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use anvil_cache::{Cache, CacheConfig};
use anvil_core::clock::FakeClock;

/// Scenario A: basic set/get/release/miss.
#[test]
fn test_scenario_a_basic_set_get() {
    let cache = Cache::new(100, Duration::from_secs(300));
    cache.set(b"k", b"v", None).unwrap();

    let r = cache.get(b"k").expect("key should be present");
    assert_eq!(r.as_bytes(), b"v");
    r.release();

    assert!(cache.get(b"missing").is_none());
}

/// Scenario B: per-shard capacity forces LRU eviction; the most
/// recently inserted key survives, aggregate size stays bounded.
#[test]
fn test_scenario_b_lru_eviction() {
    let cache = Cache::new(48, Duration::from_secs(300)); // 3 per shard across 16 shards
    for i in 0..200 {
        let key = format!("k{i}");
        cache.set(key.as_bytes(), b"data", None).unwrap();
    }

    assert!(cache.len() <= cache.capacity());
    assert!(cache.get(b"k199").is_some());
}

/// Scenario C: expiry via a deterministic clock, no sleeping on wall
/// time.
#[test]
fn test_scenario_c_expiration() {
    let clock = Arc::new(FakeClock::new());
    let mut config = CacheConfig::default();
    config.capacity = 16;
    let cache = Cache::with_config_and_clock(config, clock.clone());

    cache
        .set(b"x", b"tmp", Some(Duration::from_secs(1)))
        .unwrap();
    assert_eq!(cache.len(), 1);

    clock.advance(Duration::from_secs(2));
    assert!(cache.get(b"x").is_none());
    assert_eq!(cache.len(), 0);
}

/// Scenario E: concurrent readers and writers across a shared key
/// space, no deadlocks, aggregate size stays within capacity.
#[test]
fn test_scenario_e_concurrent_readers_writers() {
    let cache = Arc::new(Cache::new(64, Duration::from_secs(60)));
    for i in 0..50 {
        cache
            .set(format!("key{i}").as_bytes(), b"seed", None)
            .unwrap();
    }

    let released = Arc::new(AtomicUsize::new(0));
    let mut handles = Vec::new();

    for t in 0..8 {
        let cache = Arc::clone(&cache);
        let released = Arc::clone(&released);
        handles.push(std::thread::spawn(move || {
            for i in 0..200 {
                let key = format!("key{}", i % 50);
                if t % 2 == 0 {
                    if let Some(r) = cache.get(key.as_bytes()) {
                        let _ = r.as_bytes();
                        released.fetch_add(1, Ordering::Relaxed);
                        r.release();
                    }
                } else {
                    cache.set(key.as_bytes(), b"updated", None).unwrap();
                }
            }
        }));
    }

    for h in handles {
        h.join().unwrap();
    }

    assert!(cache.len() <= cache.capacity());
}

/// Scenario F: a reference taken before `invalidate` stays valid after
/// the key is gone from the cache.
#[test]
fn test_scenario_f_ref_survives_invalidate() {
    let cache = Cache::new(16, Duration::from_secs(300));
    cache.set(b"k", b"abcd", None).unwrap();

    let r = cache.get(b"k").expect("key should be present");
    cache.invalidate(b"k");
    assert!(cache.get(b"k").is_none());

    assert_eq!(r.as_bytes(), b"abcd");
    r.release();
}
