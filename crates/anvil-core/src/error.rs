//! Error types for the worker pool and the sharded cache.

use core::fmt;

/// Errors the worker pool can return.
///
/// A cache miss (`NotFound`-shaped) is never an error here — `submit`
/// failing is the only pool-side error condition, and it is represented
/// as a plain `bool` at the API boundary rather than a `Result`: a full
/// queue is routine backpressure, not exceptional. This enum exists for
/// the one case that genuinely cannot be reported as `false`: pool
/// construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PoolError {
    /// A worker thread or one of its queues could not be created.
    ResourceExhausted(String),
}

impl fmt::Display for PoolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PoolError::ResourceExhausted(msg) => write!(f, "resource exhausted: {msg}"),
        }
    }
}

impl std::error::Error for PoolError {}

/// Errors the sharded cache can return.
///
/// A cache miss or expired entry is surfaced as `None` from `get`, not
/// as an error kind: it's the expected outcome of a lookup, not a
/// failure of the cache.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CacheError {
    /// The key was empty or longer than `CACHE_KEY_MAX_LEN`.
    InvalidArgument(String),
}

impl fmt::Display for CacheError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CacheError::InvalidArgument(msg) => write!(f, "invalid argument: {msg}"),
        }
    }
}

impl std::error::Error for CacheError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pool_error_display() {
        let e = PoolError::ResourceExhausted("spawn failed".into());
        assert_eq!(format!("{e}"), "resource exhausted: spawn failed");
    }

    #[test]
    fn test_cache_error_display() {
        let e = CacheError::InvalidArgument("key too long".into());
        assert_eq!(format!("{e}"), "invalid argument: key too long");
    }
}
