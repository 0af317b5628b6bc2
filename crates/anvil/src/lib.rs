//! # anvil
//!
//! A fixed-size worker pool with work stealing, and a sharded TTL/LRU
//! cache with zero-copy references — two independent concurrency
//! primitives bundled behind one facade crate.
//!
//! ## Quick Start
//!
//! ```ignore
//! use anvil::{Pool, Cache};
//! use std::time::Duration;
//!
//! let pool = Pool::new(4)?;
//! pool.submit(|| println!("running on the pool"));
//!
//! let cache = Cache::new(1024, Duration::from_secs(300));
//! cache.set(b"key", b"value", None)?;
//! if let Some(r) = cache.get(b"key") {
//!     assert_eq!(r.as_bytes(), b"value");
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌───────────────────────────────────────────────────────────┐
//! │                       User Code                           │
//! │              pool.submit(), cache.get()/set()              │
//! └───────────────────────────────────────────────────────────┘
//!                  │                            │
//!                  ▼                            ▼
//! ┌───────────────────────────┐   ┌───────────────────────────┐
//! │         anvil-pool        │   │        anvil-cache        │
//! │  local queues + overflow  │   │   16 shards, FNV-1a hash   │
//! │   + random-victim steal   │   │   intrusive LRU, lazy TTL  │
//! └───────────────────────────┘   └───────────────────────────┘
//!                  │                            │
//!                  └─────────────┬──────────────┘
//!                                ▼
//!                      ┌───────────────────┐
//!                      │     anvil-core     │
//!                      │ clock, env, errors  │
//!                      │      logging        │
//!                      └───────────────────┘
//! ```

pub use anvil_cache::{Cache, CacheConfig, CacheRef};
pub use anvil_core::clock::{Clock, FakeClock, SystemClock};
pub use anvil_core::error::{CacheError, PoolError};
pub use anvil_core::{alog_debug, alog_error, alog_info, alog_trace, alog_warn};
pub use anvil_pool::{Pool, PoolConfig};
