//! The sharded cache: hashing, shard selection, and the public API.

use std::sync::Arc;
use std::time::Duration;

use anvil_core::clock::{Clock, SystemClock};
use anvil_core::error::CacheError;

use crate::cache_ref::CacheRef;
use crate::config::CacheConfig;
use crate::shard::{fnv1a, GetOutcome, Shard};

/// A sharded, TTL-aware, LRU-evicting cache of byte blobs.
///
/// Keyed and valued by raw bytes rather than generic types — opaque
/// blobs in, opaque blobs out. Callers serialize their own types before
/// calling in.
pub struct Cache {
    shards: Vec<Shard>,
    default_ttl: Duration,
    key_max_len: usize,
    clock: Arc<dyn Clock>,
}

impl Cache {
    /// Builds a cache with `capacity` entries split evenly across
    /// `CACHE_SHARD_COUNT` shards, and `default_ttl` applied to any
    /// `set` that doesn't specify its own.
    pub fn new(capacity: usize, default_ttl: Duration) -> Self {
        let mut config = CacheConfig::default();
        config.capacity = capacity;
        config.default_ttl = default_ttl;
        Self::with_config_and_clock(config, Arc::new(SystemClock::new()))
    }

    /// Builds a cache from an explicit configuration.
    pub fn with_config(config: CacheConfig) -> Self {
        Self::with_config_and_clock(config, Arc::new(SystemClock::new()))
    }

    /// Builds a cache with an injected clock — used by tests that need
    /// deterministic TTL expiry via `FakeClock`.
    pub fn with_config_and_clock(config: CacheConfig, clock: Arc<dyn Clock>) -> Self {
        let shard_count = config.shard_count.max(1);
        let per_shard_cap = (config.capacity + shard_count - 1) / shard_count;
        let shards = (0..shard_count)
            .map(|_| Shard::new(per_shard_cap.max(1)))
            .collect();

        Self {
            shards,
            default_ttl: config.default_ttl,
            key_max_len: config.key_max_len,
            clock,
        }
    }

    fn shard_for(&self, hash: u32) -> &Shard {
        &self.shards[hash as usize % self.shards.len()]
    }

    /// Looks up `key`. Returns `None` on a miss or an expired entry (the
    /// latter also invalidates the entry as a side effect).
    pub fn get(&self, key: &[u8]) -> Option<CacheRef> {
        let hash = fnv1a(key);
        let shard = self.shard_for(hash);
        let now = self.clock.now_ns();

        match shard.get(key, hash, now) {
            GetOutcome::Hit(entry) => Some(CacheRef { inner: entry }),
            GetOutcome::Expired => {
                shard.invalidate(key, hash);
                None
            }
            GetOutcome::Miss => None,
        }
    }

    /// Inserts or updates `key`. `ttl_override` of `None` uses the
    /// cache's default TTL.
    pub fn set(
        &self,
        key: &[u8],
        value: &[u8],
        ttl_override: Option<Duration>,
    ) -> Result<(), CacheError> {
        if key.is_empty() {
            return Err(CacheError::InvalidArgument("key must not be empty".into()));
        }
        if key.len() > self.key_max_len {
            return Err(CacheError::InvalidArgument(format!(
                "key length {} exceeds max {}",
                key.len(),
                self.key_max_len
            )));
        }

        let ttl = ttl_override.unwrap_or(self.default_ttl);
        let now = self.clock.now_ns();
        let expires_at_ns = now.saturating_add(ttl.as_nanos() as u64);

        let hash = fnv1a(key);
        self.shard_for(hash).set(key, value, hash, expires_at_ns);
        Ok(())
    }

    /// Removes `key` if present. A no-op if it isn't.
    pub fn invalidate(&self, key: &[u8]) {
        let hash = fnv1a(key);
        self.shard_for(hash).invalidate(key, hash);
    }

    /// Removes every entry from every shard.
    pub fn clear(&self) {
        for shard in &self.shards {
            shard.clear();
        }
    }

    /// Total live entry count, summed across shards (locks acquired in
    /// increasing shard-index order).
    pub fn len(&self) -> usize {
        self.shards.iter().map(Shard::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Total capacity, summed across shards. May exceed the
    /// constructor's `capacity` argument slightly due to integer
    /// division rounding per shard.
    pub fn capacity(&self) -> usize {
        self.shards.iter().map(Shard::capacity).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_get_roundtrip() {
        let cache = Cache::new(16, Duration::from_secs(60));
        cache.set(b"k", b"v", None).unwrap();
        let r = cache.get(b"k").unwrap();
        assert_eq!(r.as_bytes(), b"v");
    }

    #[test]
    fn test_miss_returns_none() {
        let cache = Cache::new(16, Duration::from_secs(60));
        assert!(cache.get(b"nope").is_none());
    }

    #[test]
    fn test_empty_key_rejected() {
        let cache = Cache::new(16, Duration::from_secs(60));
        let err = cache.set(b"", b"v", None).unwrap_err();
        assert!(matches!(err, CacheError::InvalidArgument(_)));
    }

    #[test]
    fn test_oversized_key_rejected() {
        let cache = Cache::new(16, Duration::from_secs(60));
        let key = vec![0u8; 10_000];
        assert!(cache.set(&key, b"v", None).is_err());
    }

    #[test]
    fn test_invalidate_and_clear() {
        let cache = Cache::new(16, Duration::from_secs(60));
        cache.set(b"a", b"1", None).unwrap();
        cache.set(b"b", b"2", None).unwrap();
        cache.invalidate(b"a");
        assert!(cache.get(b"a").is_none());
        assert!(cache.get(b"b").is_some());
        cache.clear();
        assert!(cache.get(b"b").is_none());
        assert_eq!(cache.len(), 0);
    }

    #[test]
    fn test_ttl_expiry_with_fake_clock() {
        let clock = Arc::new(anvil_core::clock::FakeClock::new());
        let mut config = CacheConfig::default();
        config.capacity = 16;
        config.default_ttl = Duration::from_secs(10);
        let cache = Cache::with_config_and_clock(config, clock.clone());

        cache.set(b"k", b"v", None).unwrap();
        assert!(cache.get(b"k").is_some());

        clock.advance(Duration::from_secs(10));
        assert!(cache.get(b"k").is_none());
    }

    #[test]
    fn test_ttl_override() {
        let clock = Arc::new(anvil_core::clock::FakeClock::new());
        let mut config = CacheConfig::default();
        config.capacity = 16;
        config.default_ttl = Duration::from_secs(1000);
        let cache = Cache::with_config_and_clock(config, clock.clone());

        cache
            .set(b"k", b"v", Some(Duration::from_secs(1)))
            .unwrap();
        clock.advance(Duration::from_secs(1));
        assert!(cache.get(b"k").is_none());
    }

    #[test]
    fn test_reference_outlives_cache() {
        let cache = Cache::new(4, Duration::from_secs(60));
        cache.set(b"k", b"v", None).unwrap();
        let r = cache.get(b"k").unwrap();
        drop(cache);
        assert_eq!(r.as_bytes(), b"v");
    }

    #[test]
    fn test_second_set_wins_over_first() {
        let cache = Cache::new(16, Duration::from_secs(60));
        cache.set(b"k", b"v1", None).unwrap();
        cache.set(b"k", b"v2", None).unwrap();
        let r = cache.get(b"k").unwrap();
        assert_eq!(r.as_bytes(), b"v2");
    }
}
