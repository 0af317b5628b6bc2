//! Structured, context-aware debug logging.
//!
//! A small kernel-style print facility, not a facade over the `log`
//! crate: output is plain text to stderr with a `[LEVEL] [context]`
//! prefix, controlled entirely by environment variables so it needs no
//! initialization call in normal use.
//!
//! # Environment variables
//!
//! - `ANVIL_LOG_LEVEL` - `off`/`error`/`warn`/`info`/`debug`/`trace`
//!   (or `0`-`5`). Default: `info`.
//! - `ANVIL_LOG_TIME=1` - prefix each line with a nanosecond timestamp
//!   relative to process start.
//! - `ANVIL_LOG_FLUSH=1` - flush stderr after every line (useful when
//!   debugging a crash, at a throughput cost).
//!
//! # Usage
//!
//! ```ignore
//! use anvil_core::{alog_info, alog_warn};
//!
//! alog_info!("pool", "worker {} started", id);
//! alog_warn!("cache", "shard {} at capacity", shard_id);
//! ```

use crate::env::env_get_bool;
use std::io::Write;
use std::sync::atomic::{AtomicBool, AtomicU8, Ordering};
use std::sync::OnceLock;
use std::time::Instant;

/// Log verbosity levels, in increasing order of chattiness.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Off = 0,
    Error = 1,
    Warn = 2,
    Info = 3,
    Debug = 4,
    Trace = 5,
}

impl LogLevel {
    pub fn from_u8(v: u8) -> Self {
        match v {
            0 => LogLevel::Off,
            1 => LogLevel::Error,
            2 => LogLevel::Warn,
            3 => LogLevel::Info,
            4 => LogLevel::Debug,
            _ => LogLevel::Trace,
        }
    }

    pub fn prefix(&self) -> &'static str {
        match self {
            LogLevel::Off => "",
            LogLevel::Error => "[ERROR]",
            LogLevel::Warn => "[WARN] ",
            LogLevel::Info => "[INFO] ",
            LogLevel::Debug => "[DEBUG]",
            LogLevel::Trace => "[TRACE]",
        }
    }
}

static FLUSH_ENABLED: AtomicBool = AtomicBool::new(false);
static TIME_ENABLED: AtomicBool = AtomicBool::new(false);
static LOG_LEVEL: AtomicU8 = AtomicU8::new(LogLevel::Info as u8);
static INITIALIZED: AtomicBool = AtomicBool::new(false);
static START_TIME: OnceLock<Instant> = OnceLock::new();

/// Read environment overrides. Called lazily on first log line, but can
/// be called explicitly for deterministic startup behavior.
pub fn init() {
    if INITIALIZED.swap(true, Ordering::SeqCst) {
        return;
    }

    START_TIME.get_or_init(Instant::now);
    FLUSH_ENABLED.store(env_get_bool("ANVIL_LOG_FLUSH", false), Ordering::Relaxed);
    TIME_ENABLED.store(env_get_bool("ANVIL_LOG_TIME", false), Ordering::Relaxed);

    if let Ok(val) = std::env::var("ANVIL_LOG_LEVEL") {
        let level = match val.to_lowercase().as_str() {
            "off" | "0" => LogLevel::Off,
            "error" | "1" => LogLevel::Error,
            "warn" | "2" => LogLevel::Warn,
            "info" | "3" => LogLevel::Info,
            "debug" | "4" => LogLevel::Debug,
            "trace" | "5" => LogLevel::Trace,
            _ => LogLevel::Info,
        };
        LOG_LEVEL.store(level as u8, Ordering::Relaxed);
    }
}

#[inline]
fn ensure_init() {
    if !INITIALIZED.load(Ordering::Relaxed) {
        init();
    }
}

#[inline]
pub fn log_level() -> LogLevel {
    ensure_init();
    LogLevel::from_u8(LOG_LEVEL.load(Ordering::Relaxed))
}

pub fn set_log_level(level: LogLevel) {
    LOG_LEVEL.store(level as u8, Ordering::Relaxed);
}

pub fn set_flush_enabled(enabled: bool) {
    FLUSH_ENABLED.store(enabled, Ordering::Relaxed);
}

pub fn set_time_enabled(enabled: bool) {
    TIME_ENABLED.store(enabled, Ordering::Relaxed);
}

/// Emit one log line if `level` is enabled. Not meant to be called
/// directly — use the `alog_*!` macros, which supply `context` for you.
#[doc(hidden)]
pub fn emit(level: LogLevel, context: &str, args: std::fmt::Arguments<'_>) {
    ensure_init();
    if level > log_level() {
        return;
    }

    let mut stderr = std::io::stderr();
    if TIME_ENABLED.load(Ordering::Relaxed) {
        let ns = START_TIME
            .get()
            .map(|t| t.elapsed().as_nanos())
            .unwrap_or(0);
        let _ = writeln!(stderr, "{} [{ns}] [{context}] {args}", level.prefix());
    } else {
        let _ = writeln!(stderr, "{} [{context}] {args}", level.prefix());
    }

    if FLUSH_ENABLED.load(Ordering::Relaxed) {
        let _ = stderr.flush();
    }
}

/// Log at `Error` level, tagged with a context string (e.g. `"pool"`).
#[macro_export]
macro_rules! alog_error {
    ($ctx:expr, $($arg:tt)*) => {
        $crate::logging::emit($crate::logging::LogLevel::Error, $ctx, format_args!($($arg)*))
    };
}

/// Log at `Warn` level, tagged with a context string.
#[macro_export]
macro_rules! alog_warn {
    ($ctx:expr, $($arg:tt)*) => {
        $crate::logging::emit($crate::logging::LogLevel::Warn, $ctx, format_args!($($arg)*))
    };
}

/// Log at `Info` level, tagged with a context string.
#[macro_export]
macro_rules! alog_info {
    ($ctx:expr, $($arg:tt)*) => {
        $crate::logging::emit($crate::logging::LogLevel::Info, $ctx, format_args!($($arg)*))
    };
}

/// Log at `Debug` level, tagged with a context string.
#[macro_export]
macro_rules! alog_debug {
    ($ctx:expr, $($arg:tt)*) => {
        $crate::logging::emit($crate::logging::LogLevel::Debug, $ctx, format_args!($($arg)*))
    };
}

/// Log at `Trace` level, tagged with a context string.
#[macro_export]
macro_rules! alog_trace {
    ($ctx:expr, $($arg:tt)*) => {
        $crate::logging::emit($crate::logging::LogLevel::Trace, $ctx, format_args!($($arg)*))
    };
}
