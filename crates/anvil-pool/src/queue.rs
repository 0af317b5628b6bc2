//! Bounded task queues: per-worker local queues and the shared global
//! overflow queue.
//!
//! Both are backed by a `VecDeque` under a `Mutex`, bounded to a fixed
//! power-of-two capacity, with `not_empty`/`not_full` condition
//! variables so workers can park when empty and submitters can block
//! when full instead of spinning. A raw head/tail-indexed ring buffer
//! would need `unsafe` to manage uninitialized slots for no behavioral
//! gain over a capacity-bounded `VecDeque`, so the latter is what's used
//! here — the bound is enforced in `try_push`, never by the collection
//! itself.
//!
//! The owner of a local queue consumes from the front (`pop_front`);
//! producers (the owner's own submissions, and tasks redistributed while
//! stealing) push to the back. A stealer takes from the back instead —
//! the opposite end from the owner's consumption, so a thief and the
//! owner rarely contend for the same slot.

use std::collections::VecDeque;
use std::sync::{Condvar, Mutex};
use std::time::Duration;

use crate::task::Task;

/// A worker's private queue. Single-consumer (the owning worker calls
/// `pop_front`) / multi-producer (any submitter, or a thief pushing back
/// overflow from a steal).
pub struct LocalQueue {
    capacity: usize,
    inner: Mutex<VecDeque<Task>>,
    not_empty: Condvar,
    not_full: Condvar,
}

impl LocalQueue {
    pub fn new(capacity: usize) -> Self {
        debug_assert!(capacity.is_power_of_two());
        Self {
            capacity,
            inner: Mutex::new(VecDeque::with_capacity(capacity)),
            not_empty: Condvar::new(),
            not_full: Condvar::new(),
        }
    }

    /// Non-blocking push to the back. Returns the task back on failure
    /// if the queue is full.
    pub fn try_push(&self, task: Task) -> Result<(), Task> {
        let mut q = self.inner.lock().unwrap();
        if q.len() >= self.capacity {
            return Err(task);
        }
        q.push_back(task);
        drop(q);
        self.not_empty.notify_one();
        Ok(())
    }

    /// Non-blocking pop from the front (owner's consumption end).
    pub fn try_pop_front(&self) -> Option<Task> {
        let mut q = self.inner.lock().unwrap();
        let task = q.pop_front();
        if task.is_some() {
            drop(q);
            self.not_full.notify_one();
        }
        task
    }

    /// Non-blocking steal from the back (opposite of the owner's
    /// consumption end).
    pub fn try_steal(&self) -> Option<Task> {
        let mut q = self.inner.lock().unwrap();
        let task = q.pop_back();
        if task.is_some() {
            drop(q);
            self.not_full.notify_one();
        }
        task
    }

    /// Park on `not_empty` until a task is available, `shutdown` is
    /// observed, or `timeout` elapses (so the caller can re-check
    /// shutdown periodically rather than blocking forever on a queue
    /// that will never receive more work).
    pub fn park(&self, timeout: Duration, shutdown: &std::sync::atomic::AtomicBool) {
        use std::sync::atomic::Ordering;
        let guard = self.inner.lock().unwrap();
        if guard.is_empty() && !shutdown.load(Ordering::Acquire) {
            let _ = self.not_empty.wait_timeout(guard, timeout).unwrap();
        }
    }

    pub fn wake_all(&self) {
        self.not_empty.notify_all();
        self.not_full.notify_all();
    }

    pub fn len(&self) -> usize {
        self.inner.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// The shared overflow queue. Multi-producer / multi-consumer.
pub struct GlobalQueue {
    capacity: usize,
    inner: Mutex<VecDeque<Task>>,
    not_empty: Condvar,
    not_full: Condvar,
}

impl GlobalQueue {
    pub fn new(capacity: usize) -> Self {
        debug_assert!(capacity.is_power_of_two());
        Self {
            capacity,
            inner: Mutex::new(VecDeque::with_capacity(capacity)),
            not_empty: Condvar::new(),
            not_full: Condvar::new(),
        }
    }

    pub fn try_push(&self, task: Task) -> Result<(), Task> {
        let mut q = self.inner.lock().unwrap();
        if q.len() >= self.capacity {
            return Err(task);
        }
        q.push_back(task);
        drop(q);
        self.not_empty.notify_one();
        Ok(())
    }

    pub fn try_pop(&self) -> Option<Task> {
        let mut q = self.inner.lock().unwrap();
        let task = q.pop_front();
        if task.is_some() {
            drop(q);
            self.not_full.notify_one();
        }
        task
    }

    /// Block on `not_full` until space frees up or `shutdown` fires.
    /// Returns once either is true; caller re-attempts `try_push`.
    pub fn wait_not_full(&self, timeout: Duration, shutdown: &std::sync::atomic::AtomicBool) {
        use std::sync::atomic::Ordering;
        let guard = self.inner.lock().unwrap();
        if guard.len() >= self.capacity && !shutdown.load(Ordering::Acquire) {
            let _ = self.not_full.wait_timeout(guard, timeout).unwrap();
        }
    }

    pub fn wake_all(&self) {
        self.not_empty.notify_all();
        self.not_full.notify_all();
    }

    pub fn len(&self) -> usize {
        self.inner.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
