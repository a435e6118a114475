#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
#![cfg_attr(coverage_nightly, coverage(off))]

//! Binary entry point for the `many_hands` workload runner.
//!
//! This module is excluded from mutation testing because exercising process
//! entry and exit would require spawning subprocesses and checking exit codes.

use std::num::NonZero;
use std::process::ExitCode;

use argh::FromArgs;
use many_hands::{Behavior, RunConfig, WorkloadReport, run};
use new_zealand::nz;

/// Times how long worker threads take to collaborate on a shared task.
#[derive(FromArgs)]
struct Args {
    /// number of work items each worker processes (default: 64)
    #[argh(option, short = 'n', default = "64")]
    iterations: u64,

    /// number of worker threads to spawn (default: 1)
    #[argh(option, short = 't', default = "nz!(1)")]
    threads: NonZero<usize>,

    /// workload to run: counter, counters or queue (default: counter)
    #[argh(option, short = 'b', default = "Behavior::SingleCounter")]
    behavior: Behavior,
}

// Binary entry point - mutations here would only be observable through subprocess exit codes.
#[cfg_attr(test, mutants::skip)]
fn main() -> ExitCode {
    let args: Args = argh::from_env();

    let config = RunConfig::new(args.iterations, args.threads, args.behavior);

    match run(&config) {
        Ok(report) => {
            print_report(&report);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn print_report(report: &WorkloadReport) {
    if let WorkloadReport::Queue(queue) = report {
        for consumer in queue.consumers() {
            println!(
                "Thread/Count/Sum = ({}, {}, {})",
                consumer.worker_index(),
                consumer.consumed_count(),
                consumer.consumed_sum()
            );
        }

        println!("Total Sum: {}", queue.consumed_sum());
    }

    println!("Total time: {:.6} seconds", report.elapsed().as_secs_f64());
}
