//! Sharded, TTL-aware LRU cache with zero-copy references.
//!
//! Entries are distributed across `CACHE_SHARD_COUNT` independently
//! locked shards by an FNV-1a hash of the key. Reads are lazy: expiry
//! and LRU promotion both happen inline in [`Cache::get`], with no
//! background sweeper thread. See [`Cache::new`] to get started.
//!
//! ```ignore
//! use std::time::Duration;
//! use anvil_cache::Cache;
//!
//! let cache = Cache::new(1024, Duration::from_secs(300));
//! cache.set(b"key", b"value", None).unwrap();
//! let r = cache.get(b"key").unwrap();
//! assert_eq!(r.as_bytes(), b"value");
//! ```

mod cache;
mod cache_ref;
mod config;
mod entry;
mod shard;

pub use cache::Cache;
pub use cache_ref::CacheRef;
pub use config::CacheConfig;
