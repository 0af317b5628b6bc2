//! Pool configuration: compile-time defaults, overridable by environment
//! variables, overridable again by explicit constructor arguments.

use anvil_core::constants::{GLOBAL_QUEUE_SIZE, RING_BUFFER_SIZE};
use anvil_core::env::env_get;

/// Tunables for [`crate::Pool::with_config`].
///
/// Priority order, highest first: explicit field values set on this
/// struct, then the matching environment variable, then the compiled-in
/// default.
#[derive(Debug, Clone, Copy)]
pub struct PoolConfig {
    pub num_workers: usize,
    pub local_queue_size: usize,
    pub global_queue_size: usize,
}

impl PoolConfig {
    /// Reads `ANVIL_POOL_WORKERS`, `ANVIL_POOL_LOCAL_QUEUE_SIZE`, and
    /// `ANVIL_POOL_GLOBAL_QUEUE_SIZE`, falling back to the compiled-in
    /// defaults for any that are unset or unparsable.
    pub fn from_env() -> Self {
        Self {
            num_workers: env_get("ANVIL_POOL_WORKERS", default_workers()),
            local_queue_size: env_get("ANVIL_POOL_LOCAL_QUEUE_SIZE", RING_BUFFER_SIZE),
            global_queue_size: env_get("ANVIL_POOL_GLOBAL_QUEUE_SIZE", GLOBAL_QUEUE_SIZE),
        }
    }
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            num_workers: default_workers(),
            local_queue_size: RING_BUFFER_SIZE,
            global_queue_size: GLOBAL_QUEUE_SIZE,
        }
    }
}

fn default_workers() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_sizes_are_powers_of_two() {
        let cfg = PoolConfig::default();
        assert!(cfg.local_queue_size.is_power_of_two());
        assert!(cfg.global_queue_size.is_power_of_two());
        assert!(cfg.num_workers >= 1);
    }
}
