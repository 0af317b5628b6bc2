//! Pool stress example
//!
//! 4 workers, 10,000 increment tasks. Prints the final counter value,
//! which must equal the submission count exactly.

use anvil::Pool;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Instant;

const NUM_WORKERS: usize = 4;
const NUM_TASKS: usize = 10_000;

fn main() {
    println!("=== Pool Stress Example ===\n");
    println!("workers={NUM_WORKERS} tasks={NUM_TASKS}");

    let pool = Pool::new(NUM_WORKERS).expect("failed to start pool");
    let counter = Arc::new(AtomicUsize::new(0));
    let start = Instant::now();

    for _ in 0..NUM_TASKS {
        let counter = Arc::clone(&counter);
        let accepted = pool.submit(move || {
            counter.fetch_add(1, Ordering::Relaxed);
        });
        debug_assert!(accepted, "submission should never fail before shutdown");
    }

    drop(pool);
    let elapsed = start.elapsed();

    let final_count = counter.load(Ordering::Relaxed);
    println!("counter = {final_count} (expected {NUM_TASKS})");
    println!("elapsed = {elapsed:?}");
    assert_eq!(final_count, NUM_TASKS);

    println!("\n=== Example Complete ===");
}
