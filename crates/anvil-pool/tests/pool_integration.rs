//! End-to-end pool scenarios: high task volume, serial correctness with
//! a single worker, and queue-full backpressure.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use anvil_pool::{Pool, PoolConfig};

/// Scenario D: many workers, many tasks, all must run exactly once.
#[test]
fn test_high_volume_increments_all_run() {
    let pool = Pool::new(4).expect("pool should start");
    let counter = Arc::new(AtomicUsize::new(0));

    for _ in 0..10_000 {
        let counter = Arc::clone(&counter);
        let accepted = pool.submit(move || {
            counter.fetch_add(1, Ordering::Relaxed);
        });
        assert!(accepted);
    }

    drop(pool); // Drop blocks until all submitted work has finished.
    assert_eq!(counter.load(Ordering::Relaxed), 10_000);
}

/// With a single worker, there's no stealing and no cross-worker
/// concurrency, so submission order observed by that worker's own local
/// queue must be preserved.
#[test]
fn test_single_worker_preserves_submission_order() {
    let pool = Pool::new(1).expect("pool should start");
    let order = Arc::new(std::sync::Mutex::new(Vec::new()));

    for i in 0..200 {
        let order = Arc::clone(&order);
        assert!(pool.submit(move || order.lock().unwrap().push(i)));
    }

    drop(pool);
    let order = order.lock().unwrap();
    let expected: Vec<usize> = (0..200).collect();
    assert_eq!(*order, expected);
}

/// A panicking task must not take down its worker or strand later
/// submissions.
#[test]
fn test_panicking_task_does_not_kill_worker() {
    let pool = Pool::new(2).expect("pool should start");
    let ran_after = Arc::new(AtomicUsize::new(0));

    assert!(pool.submit(|| panic!("boom")));

    let ran_after_clone = Arc::clone(&ran_after);
    assert!(pool.submit(move || {
        ran_after_clone.fetch_add(1, Ordering::Relaxed);
    }));

    drop(pool);
    assert_eq!(ran_after.load(Ordering::Relaxed), 1);
}

/// Filling a tiny local+global queue combo should still accept work —
/// submitters block on backpressure rather than fail outright while the
/// pool is alive.
#[test]
fn test_small_queues_apply_backpressure_not_rejection() {
    let pool = Pool::with_config(PoolConfig {
        num_workers: 1,
        local_queue_size: 2,
        global_queue_size: 2,
    })
    .expect("pool should start");

    let counter = Arc::new(AtomicUsize::new(0));
    for _ in 0..50 {
        let counter = Arc::clone(&counter);
        let accepted = pool.submit(move || {
            std::thread::sleep(Duration::from_micros(50));
            counter.fetch_add(1, Ordering::Relaxed);
        });
        assert!(accepted);
    }

    drop(pool);
    assert_eq!(counter.load(Ordering::Relaxed), 50);
}

#[test]
fn test_submit_after_shutdown_returns_false() {
    let mut pool = Pool::new(2).expect("pool should start");
    pool.shutdown();
    assert!(!pool.submit(|| {}));
}
