//! Integration tests that drive the workloads through the public API the
//! same way the command-line binary does: parse a behavior name, build a
//! configuration, run it and inspect the report.

#![cfg(not(miri))] // Every test here spawns real threads and reads the real clock.

use std::num::NonZero;

use many_hands::{Behavior, Error, RunConfig, WorkloadReport, run};
use new_zealand::nz;

#[test]
fn counter_name_selects_the_shared_counter() {
    let behavior: Behavior = "counter".parse().unwrap();

    let config = RunConfig::new(10, nz!(2), behavior);
    let report = run(&config).unwrap();

    let WorkloadReport::SingleCounter(counter) = report else {
        panic!("'counter' selects the shared counter workload");
    };

    assert_eq!(counter.final_count(), 20);
}

#[test]
fn counters_name_selects_the_sharded_counters() {
    let behavior: Behavior = "counters".parse().unwrap();

    let config = RunConfig::new(10, nz!(2), behavior);
    let report = run(&config).unwrap();

    let WorkloadReport::ShardedCounters(shards) = report else {
        panic!("'counters' selects the sharded counters workload");
    };

    assert_eq!(shards.combined_count(), 20);
}

#[test]
fn queue_name_selects_the_queue() {
    let behavior: Behavior = "queue".parse().unwrap();

    let config = RunConfig::new(10, nz!(2), behavior);
    let report = run(&config).unwrap();

    let WorkloadReport::Queue(queue) = report else {
        panic!("'queue' selects the producer/consumer workload");
    };

    assert_eq!(queue.consumed_count(), 10);
}

#[test]
fn unknown_behavior_name_is_rejected_before_anything_runs() {
    let error = "bogus".parse::<Behavior>().unwrap_err();

    assert!(matches!(
        &error,
        Error::UnknownBehavior { requested } if requested == "bogus"
    ));

    // The message carries the rejected name, so whoever typed it can see
    // what did not match.
    assert!(error.to_string().contains("bogus"));
}

#[test]
fn queue_accounting_holds_at_every_worker_count() {
    // One producer plus zero to three consumers, 100 items per consumer.
    // The items are the sequence 0..n, so the expected sum is n * (n - 1) / 2.
    let cases = [(1, 0, 0), (2, 100, 4950), (3, 200, 19900), (4, 300, 44850)];

    for (thread_count, expected_count, expected_sum) in cases {
        let config = RunConfig::new(
            100,
            NonZero::new(thread_count).expect("test thread counts start at one"),
            Behavior::Queue,
        );

        let report = run(&config).unwrap();

        let WorkloadReport::Queue(queue) = report else {
            panic!("configured behavior was the queue");
        };

        assert_eq!(
            queue.consumed_count(),
            expected_count,
            "wrong item count for {thread_count} workers"
        );
        assert_eq!(
            queue.consumed_sum(),
            expected_sum,
            "wrong item sum for {thread_count} workers"
        );
    }
}

#[test]
fn reports_are_stable_across_reruns() {
    let config = RunConfig::new(500, nz!(3), Behavior::SingleCounter);

    let first = run(&config).unwrap();
    let second = run(&config).unwrap();

    let (WorkloadReport::SingleCounter(first), WorkloadReport::SingleCounter(second)) =
        (first, second)
    else {
        panic!("configured behavior was the single counter");
    };

    assert_eq!(first.final_count(), 1500);
    assert_eq!(second.final_count(), 1500);
}

#[test]
fn default_configuration_runs_out_of_the_box() {
    let report = run(&RunConfig::default()).unwrap();

    let WorkloadReport::SingleCounter(counter) = report else {
        panic!("default behavior is the single counter");
    };

    assert_eq!(counter.final_count(), 64);
}
