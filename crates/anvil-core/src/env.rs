//! Environment variable utilities.
//!
//! Generic `env_get<T>` for parsing environment variable overrides with a
//! compile-time default, used by `PoolConfig`/`CacheConfig::from_env`.
//!
//! ```ignore
//! use anvil_core::env::{env_get, env_get_bool};
//!
//! let workers: usize = env_get("ANVIL_POOL_WORKERS", 4);
//! let debug: bool = env_get_bool("ANVIL_LOG_DEBUG", false);
//! ```

use std::str::FromStr;

/// Get an environment variable parsed as `T`, or return `default`.
#[inline]
pub fn env_get<T>(key: &str, default: T) -> T
where
    T: FromStr,
{
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

/// Get an environment variable as a boolean.
///
/// Accepts `"1"`, `"true"`, `"yes"`, `"on"` (case-insensitive) as true.
/// Everything else, including unset, returns `default`.
#[inline]
pub fn env_get_bool(key: &str, default: bool) -> bool {
    match std::env::var(key) {
        Ok(val) => matches!(val.to_lowercase().as_str(), "1" | "true" | "yes" | "on"),
        Err(_) => default,
    }
}

/// Get an environment variable as `Option<T>`.
#[inline]
pub fn env_get_opt<T>(key: &str) -> Option<T>
where
    T: FromStr,
{
    std::env::var(key).ok().and_then(|v| v.parse().ok())
}

/// Get an environment variable as a string, or return `default`.
#[inline]
pub fn env_get_str(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Check whether an environment variable is set, regardless of value.
#[inline]
pub fn env_is_set(key: &str) -> bool {
    std::env::var(key).is_ok()
}
