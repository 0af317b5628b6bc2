//! Cache configuration: compile-time defaults, overridable by
//! environment variables, overridable again by explicit constructor
//! arguments.

use std::time::Duration;

use anvil_core::constants::{
    CACHE_DEFAULT_TTL, CACHE_KEY_MAX_LEN, CACHE_SHARD_COUNT,
};
use anvil_core::env::env_get;

/// Tunables for [`crate::Cache::with_config`].
#[derive(Debug, Clone, Copy)]
pub struct CacheConfig {
    pub capacity: usize,
    pub default_ttl: Duration,
    pub shard_count: usize,
    pub key_max_len: usize,
}

impl CacheConfig {
    /// Reads `ANVIL_CACHE_CAPACITY`, `ANVIL_CACHE_DEFAULT_TTL_SECS`,
    /// `ANVIL_CACHE_SHARD_COUNT`, and `ANVIL_CACHE_KEY_MAX_LEN`, falling
    /// back to compiled-in defaults for any that are unset or
    /// unparsable.
    pub fn from_env() -> Self {
        let ttl_secs: u64 = env_get("ANVIL_CACHE_DEFAULT_TTL_SECS", CACHE_DEFAULT_TTL.as_secs());
        Self {
            capacity: env_get("ANVIL_CACHE_CAPACITY", 10_000),
            default_ttl: Duration::from_secs(ttl_secs),
            shard_count: env_get("ANVIL_CACHE_SHARD_COUNT", CACHE_SHARD_COUNT),
            key_max_len: env_get("ANVIL_CACHE_KEY_MAX_LEN", CACHE_KEY_MAX_LEN),
        }
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            capacity: 10_000,
            default_ttl: CACHE_DEFAULT_TTL,
            shard_count: CACHE_SHARD_COUNT,
            key_max_len: CACHE_KEY_MAX_LEN,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let cfg = CacheConfig::default();
        assert_eq!(cfg.shard_count, CACHE_SHARD_COUNT);
        assert_eq!(cfg.key_max_len, CACHE_KEY_MAX_LEN);
    }
}
