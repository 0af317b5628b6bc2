//! # anvil-core
//!
//! Shared, allocation-light primitives used by both `anvil-pool` and
//! `anvil-cache`. This crate has no knowledge of queues, workers, shards,
//! or LRU lists — it only provides the small set of collaborators both
//! subsystems are built on.
//!
//! ## Modules
//!
//! - `error` - error kinds for the pool and the cache
//! - `clock` - abstract wall clock, for TTL and deterministic tests
//! - `env` - environment variable parsing helpers
//! - `logging` - kernel-style structured debug logging macros
//! - `constants` - shared tunables

pub mod clock;
pub mod constants;
pub mod env;
pub mod error;
pub mod logging;

pub use clock::{Clock, FakeClock, SystemClock};
pub use env::{env_get, env_get_bool, env_get_opt, env_get_str, env_is_set};
pub use error::{CacheError, PoolError};
