#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Timed multithreaded workloads that demonstrate how the coordination
//! pattern between threads determines how well the work scales.
//!
//! Each run spawns a configurable number of worker threads, has them
//! collaborate on a shared task and reports the wall-clock duration of the
//! whole run, together with counters proving that no work was lost. Three
//! behaviors are available:
//!
//! * [`SingleCounter`][Behavior::SingleCounter] - every worker increments
//!   one mutex-guarded counter, so the lock serializes all of them and
//!   extra workers only add contention.
//! * [`ShardedCounters`][Behavior::ShardedCounters] - workers increment
//!   randomly picked counters from a table of cache-line-padded atomics,
//!   so they rarely interfere with each other.
//! * [`Queue`][Behavior::Queue] - one worker produces items into a
//!   lock-guarded queue while all other workers consume from it.
//!
//! This is part of the [Folo project](https://github.com/folo-rs/folo) that provides mechanisms for
//! high-performance hardware-aware programming in Rust.
//!
//! # Examples
//!
//! Run the workload chosen by a configuration via [`run()`]:
//!
//! ```
//! use many_hands::{Behavior, RunConfig, run};
//! use new_zealand::nz;
//!
//! let config = RunConfig::new(1000, nz!(4), Behavior::ShardedCounters);
//! let report = run(&config).unwrap();
//!
//! println!("finished in {} seconds", report.elapsed().as_secs_f64());
//! ```
//!
//! Or call a workload directly when the choice is fixed at compile time:
//!
//! ```
//! use many_hands::{Behavior, RunConfig, run_queue};
//! use new_zealand::nz;
//!
//! let config = RunConfig::new(100, nz!(4), Behavior::Queue);
//! let report = run_queue(&config).unwrap();
//!
//! assert_eq!(report.consumed_count(), 300);
//! ```
//!
//! The `many_hands` binary exposes the same workloads on the command line:
//!
//! ```text
//! many_hands --threads 4 --iterations 100 --behavior queue
//! ```

mod behavior;
mod error;
mod run;
mod run_config;
mod run_queue;
mod run_sharded_counters;
mod run_single_counter;
mod run_timed;

pub use behavior::*;
pub use error::*;
pub use run::*;
pub use run_config::*;
pub use run_queue::*;
pub use run_sharded_counters::*;
pub use run_single_counter::*;
pub use run_timed::*;

const ERR_POISONED_LOCK: &str = "encountered poisoned lock - a worker panicked while holding it";
