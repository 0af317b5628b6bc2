//! The worker pool: submission, shutdown, and the shared state every
//! worker thread reads and mutates.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Condvar, Mutex};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use anvil_core::error::PoolError;
use anvil_core::alog_info;

use crate::config::PoolConfig;
use crate::queue::{GlobalQueue, LocalQueue};
use crate::task::Task;
use crate::worker;

/// How long a blocked submitter waits for overflow-queue space before
/// re-checking shutdown.
const SUBMIT_RETRY_TIMEOUT: Duration = Duration::from_millis(50);

/// State shared between the `Pool` handle and every worker thread.
pub(crate) struct PoolShared {
    pub(crate) locals: Vec<LocalQueue>,
    pub(crate) global: GlobalQueue,
    pub(crate) shutdown: AtomicBool,
    pub(crate) working: AtomicUsize,
    pub(crate) alive: AtomicUsize,
    pub(crate) count_lock: Mutex<()>,
    pub(crate) all_idle: Condvar,
    submit_rng: AtomicUsize,
    steal_rngs: Vec<AtomicUsize>,
}

impl PoolShared {
    pub(crate) fn all_queues_empty(&self) -> bool {
        self.global.is_empty() && self.locals.iter().all(LocalQueue::is_empty)
    }

    /// xorshift/LCG-style PRNG, seeded per caller (submitter or worker
    /// id) at construction — no external RNG dependency, same
    /// constants the scheduler this pool is modeled on uses.
    pub(crate) fn random_index(&self, worker_id: usize) -> usize {
        let rng = &self.steal_rngs[worker_id];
        let old = rng.load(Ordering::Relaxed);
        let new = old.wrapping_mul(1_103_515_245).wrapping_add(12_345);
        rng.store(new, Ordering::Relaxed);
        new % self.locals.len()
    }

    fn random_submit_index(&self) -> usize {
        let old = self.submit_rng.load(Ordering::Relaxed);
        let new = old.wrapping_mul(1_103_515_245).wrapping_add(12_345);
        self.submit_rng.store(new, Ordering::Relaxed);
        new % self.locals.len()
    }
}

/// A fixed-size pool of worker threads with per-worker local queues, a
/// shared overflow queue, and random-victim work stealing.
pub struct Pool {
    shared: Arc<PoolShared>,
    handles: Vec<JoinHandle<()>>,
}

impl Pool {
    /// Spawns `num_threads` workers (treated as 1 if zero) with default
    /// queue sizes.
    pub fn new(num_threads: usize) -> Result<Pool, PoolError> {
        let mut config = PoolConfig::default();
        config.num_workers = num_threads;
        Self::with_config(config)
    }

    /// Spawns a pool from an explicit configuration.
    pub fn with_config(config: PoolConfig) -> Result<Pool, PoolError> {
        let num_workers = config.num_workers.max(1);

        let locals = (0..num_workers)
            .map(|_| LocalQueue::new(config.local_queue_size))
            .collect();
        let steal_rngs = (0..num_workers)
            .map(|i| AtomicUsize::new(i.wrapping_mul(2_654_435_761).wrapping_add(1)))
            .collect();

        let shared = Arc::new(PoolShared {
            locals,
            global: GlobalQueue::new(config.global_queue_size),
            shutdown: AtomicBool::new(false),
            working: AtomicUsize::new(0),
            alive: AtomicUsize::new(num_workers),
            count_lock: Mutex::new(()),
            all_idle: Condvar::new(),
            submit_rng: AtomicUsize::new(0x9E3779B9),
            steal_rngs,
        });

        let mut handles = Vec::with_capacity(num_workers);
        for id in 0..num_workers {
            let shared = Arc::clone(&shared);
            let spawned = thread::Builder::new()
                .name(format!("anvil-pool-worker-{id}"))
                .spawn(move || worker::run(id, shared));
            match spawned {
                Ok(handle) => handles.push(handle),
                Err(e) => {
                    shared.shutdown.store(true, Ordering::Release);
                    for h in &shared.locals {
                        h.wake_all();
                    }
                    shared.global.wake_all();
                    for handle in handles {
                        let _ = handle.join();
                    }
                    return Err(PoolError::ResourceExhausted(e.to_string()));
                }
            }
        }

        alog_info!("pool", "started with {num_workers} workers");
        Ok(Pool { shared, handles })
    }

    /// Enqueues `f`. Returns `false` only if the pool is shutting down;
    /// otherwise blocks (bounded by internal retry, never indefinitely
    /// without re-checking shutdown) until the task is accepted.
    pub fn submit<F>(&self, f: F) -> bool
    where
        F: FnOnce() + Send + 'static,
    {
        if self.shared.shutdown.load(Ordering::Acquire) {
            return false;
        }

        let mut task: Task = Box::new(f);
        let idx = self.shared.random_submit_index();
        task = match self.shared.locals[idx].try_push(task) {
            Ok(()) => return true,
            Err(task) => task,
        };

        loop {
            task = match self.shared.global.try_push(task) {
                Ok(()) => return true,
                Err(task) => task,
            };
            if self.shared.shutdown.load(Ordering::Acquire) {
                return false;
            }
            self.shared
                .global
                .wait_not_full(SUBMIT_RETRY_TIMEOUT, &self.shared.shutdown);
            if self.shared.shutdown.load(Ordering::Acquire) {
                return false;
            }
        }
    }

    /// Waits for all in-flight and queued work to finish, then sets
    /// shutdown, wakes every worker, and joins every thread. Idempotent
    /// — calling it twice (or letting `Drop` run after an explicit
    /// call) is a no-op the second time.
    pub fn shutdown(&mut self) {
        if self.shared.shutdown.load(Ordering::Acquire) && self.handles.is_empty() {
            return;
        }

        {
            let mut guard = self.shared.count_lock.lock().unwrap();
            while !(self.shared.working.load(Ordering::Acquire) == 0
                && self.shared.all_queues_empty())
            {
                let (g, _timeout) = self
                    .shared
                    .all_idle
                    .wait_timeout(guard, Duration::from_millis(50))
                    .unwrap();
                guard = g;
            }
        }

        self.shared.shutdown.store(true, Ordering::Release);

        for local in &self.shared.locals {
            local.wake_all();
        }
        self.shared.global.wake_all();

        for handle in self.handles.drain(..) {
            let _ = handle.join();
        }

        alog_info!("pool", "shutdown complete");
    }

    /// Number of worker threads in this pool.
    pub fn num_workers(&self) -> usize {
        self.shared.locals.len()
    }

    /// Diagnostic: how many worker threads have not yet exited their
    /// loop. Equal to `num_workers()` until shutdown starts tearing
    /// threads down.
    pub fn alive(&self) -> usize {
        self.shared.alive.load(Ordering::Acquire)
    }

    /// Diagnostic: how many tasks are currently executing across all
    /// workers.
    pub fn working(&self) -> usize {
        self.shared.working.load(Ordering::Acquire)
    }
}

impl Drop for Pool {
    fn drop(&mut self) {
        self.shutdown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;

    #[test]
    fn test_num_threads_zero_treated_as_one() {
        let pool = Pool::new(0).unwrap();
        assert_eq!(pool.num_workers(), 1);
    }

    #[test]
    fn test_alive_matches_num_workers_before_shutdown() {
        let pool = Pool::new(3).unwrap();
        assert_eq!(pool.alive(), 3);
    }

    #[test]
    fn test_alive_drops_to_zero_after_shutdown() {
        let mut pool = Pool::new(2).unwrap();
        pool.shutdown();
        assert_eq!(pool.alive(), 0);
    }

    #[test]
    fn test_submit_runs_task() {
        let pool = Pool::new(2).unwrap();
        let done = Arc::new(AtomicUsize::new(0));
        let done2 = Arc::clone(&done);
        assert!(pool.submit(move || {
            done2.fetch_add(1, Ordering::SeqCst);
        }));
        drop(pool);
        assert_eq!(done.load(Ordering::SeqCst), 1);
    }
}
