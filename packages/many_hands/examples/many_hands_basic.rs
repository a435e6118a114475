//! Runs each of the three coordination workloads once and prints what
//! they accomplished.
//!
//! Run with: `cargo run --example many_hands_basic`.

use many_hands::{Behavior, RunConfig, run_queue, run_sharded_counters, run_single_counter};
use new_zealand::nz;

fn main() {
    let thread_count = nz!(4);

    println!("=== Shared counter, {thread_count} workers ===");

    let config = RunConfig::new(100_000, thread_count, Behavior::SingleCounter);
    let report = run_single_counter(&config).unwrap();

    println!("Final count: {}", report.final_count());
    println!("Total time: {:.6} seconds", report.elapsed().as_secs_f64());
    println!();

    println!("=== Sharded counters, {thread_count} workers ===");

    let config = RunConfig::new(100_000, thread_count, Behavior::ShardedCounters);
    let report = run_sharded_counters(&config).unwrap();

    println!("Combined count: {}", report.combined_count());
    println!("Total time: {:.6} seconds", report.elapsed().as_secs_f64());
    println!();

    println!("=== Queue, 1 producer + 3 consumers ===");

    let config = RunConfig::new(10_000, thread_count, Behavior::Queue);
    let report = run_queue(&config).unwrap();

    for consumer in report.consumers() {
        println!(
            "Thread/Count/Sum = ({}, {}, {})",
            consumer.worker_index(),
            consumer.consumed_count(),
            consumer.consumed_sum()
        );
    }

    println!("Total Sum: {}", report.consumed_sum());
    println!("Total time: {:.6} seconds", report.elapsed().as_secs_f64());
}
