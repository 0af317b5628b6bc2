//! Task representation.

/// A unit of work submitted to the pool.
///
/// Tasks are not identified (there is no handle) and carry no return
/// value. Whatever the closure captures is owned by it exactly as the
/// caller wrote it; the pool never inspects, clones, or copies the
/// payload, only calls it once.
pub type Task = Box<dyn FnOnce() + Send + 'static>;
