//! Compile-time tunables, shared between the pool and the cache.
//!
//! All of these are overridable at construction time through
//! `PoolConfig`/`CacheConfig`; the values here are only the defaults a
//! fresh `Config::default()` starts from.

use std::time::Duration;

/// Per-worker local queue capacity. Must be a power of two.
pub const RING_BUFFER_SIZE: usize = 256;

/// Global overflow queue capacity. Must be a power of two.
pub const GLOBAL_QUEUE_SIZE: usize = 4096;

/// Number of independently-locked cache shards.
pub const CACHE_SHARD_COUNT: usize = 16;

/// Access count at which a `get` escalates to a write lock to promote
/// the entry to the LRU head. Tuning knob, not a correctness parameter.
pub const CACHE_PROMOTION_THRESHOLD: u32 = 3;

/// Default time-to-live applied when `set` is called without an
/// explicit override.
pub const CACHE_DEFAULT_TTL: Duration = Duration::from_secs(300);

/// Maximum key length accepted by the cache.
pub const CACHE_KEY_MAX_LEN: usize = 255;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ring_sizes_are_powers_of_two() {
        assert!(RING_BUFFER_SIZE.is_power_of_two());
        assert!(GLOBAL_QUEUE_SIZE.is_power_of_two());
    }
}
