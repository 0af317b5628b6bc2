//! The per-worker thread loop: local queue, then global queue, then
//! work-stealing, then park.

use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::time::Duration;

use anvil_core::alog_error;

use crate::pool::PoolShared;

/// How long a worker parks before re-checking shutdown, in the absence
/// of a wakeup. Bounds the time between `shutdown` being set and a
/// parked worker noticing it.
const PARK_TIMEOUT: Duration = Duration::from_millis(50);

/// Runs on the worker's dedicated OS thread until shutdown is observed
/// with no remaining work anywhere in the pool.
pub fn run(id: usize, shared: Arc<PoolShared>) {
    loop {
        if let Some(task) = find_task(&shared, id) {
            run_task(&shared, id, task);
            continue;
        }

        if shared.shutdown.load(Ordering::Acquire) {
            break;
        }

        shared.locals[id].park(PARK_TIMEOUT, &shared.shutdown);
    }

    shared.alive.fetch_sub(1, Ordering::AcqRel);
}

fn run_task(shared: &PoolShared, id: usize, task: crate::task::Task) {
    shared.working.fetch_add(1, Ordering::AcqRel);

    if catch_unwind(AssertUnwindSafe(task)).is_err() {
        alog_error!("pool", "worker {id} task panicked; continuing");
    }

    let prev = shared.working.fetch_sub(1, Ordering::AcqRel);
    if prev == 1 && shared.all_queues_empty() {
        let _guard = shared.count_lock.lock().unwrap();
        shared.all_idle.notify_all();
    }
}

/// Local queue, then global queue, then a bounded random-victim steal
/// sweep. Each step is non-blocking; only the caller's park is allowed
/// to wait.
fn find_task(shared: &PoolShared, id: usize) -> Option<crate::task::Task> {
    if let Some(task) = shared.locals[id].try_pop_front() {
        return Some(task);
    }
    if let Some(task) = shared.global.try_pop() {
        return Some(task);
    }
    steal(shared, id)
}

fn steal(shared: &PoolShared, id: usize) -> Option<crate::task::Task> {
    let n = shared.locals.len();
    if n <= 1 {
        return None;
    }
    let start = shared.random_index(id);
    for offset in 0..n {
        let victim = (start + offset) % n;
        if victim == id {
            continue;
        }
        if let Some(task) = shared.locals[victim].try_steal() {
            return Some(task);
        }
    }
    None
}
