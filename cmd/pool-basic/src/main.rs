//! Basic pool example
//!
//! Submits a handful of tasks and prints completion order (expect it to
//! be scrambled across workers — that's the point).

use anvil::Pool;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

fn main() {
    println!("=== Pool Basic Example ===\n");

    let pool = Pool::new(4).expect("failed to start pool");
    let completed = Arc::new(AtomicUsize::new(0));

    for i in 0..10 {
        let completed = Arc::clone(&completed);
        let accepted = pool.submit(move || {
            println!("[task {i}] running on some worker");
            completed.fetch_add(1, Ordering::SeqCst);
        });
        println!("submitted task {i}: accepted={accepted}");
    }

    drop(pool); // blocks until every submitted task has run

    println!(
        "\n{}/10 tasks completed",
        completed.load(Ordering::SeqCst)
    );
    println!("=== Example Complete ===");
}
