use std::time::Duration;

use crate::{
    Behavior, CounterReport, QueueReport, Result, RunConfig, ShardsReport, run_queue,
    run_sharded_counters, run_single_counter,
};

/// Outcome of a [`run()`] call, carrying the report of whichever workload
/// the configuration selected.
#[derive(Clone, Debug, Eq, PartialEq)]
#[non_exhaustive]
pub enum WorkloadReport {
    /// The shared counter workload ran.
    SingleCounter(CounterReport),

    /// The sharded counters workload ran.
    ShardedCounters(ShardsReport),

    /// The producer/consumer workload ran.
    Queue(QueueReport),
}

impl WorkloadReport {
    /// Wall-clock duration of the run, regardless of which workload ran.
    #[must_use]
    pub fn elapsed(&self) -> Duration {
        match self {
            Self::SingleCounter(report) => report.elapsed(),
            Self::ShardedCounters(report) => report.elapsed(),
            Self::Queue(report) => report.elapsed(),
        }
    }
}

/// Runs the workload selected by the configuration's behavior and returns
/// its report.
///
/// This is the top-level entry point. Callers that know at compile time
/// which workload they want can call [`run_single_counter()`],
/// [`run_sharded_counters()`] or [`run_queue()`] directly and receive the
/// concrete report type.
///
/// # Errors
///
/// Returns [`Error::SpawnWorker`][crate::Error::SpawnWorker] if a worker
/// thread cannot be created.
///
/// # Examples
///
/// ```
/// use many_hands::{RunConfig, WorkloadReport, run};
///
/// // The default configuration runs the single counter workload
/// // with one worker and 64 work items.
/// let report = run(&RunConfig::default()).unwrap();
///
/// let WorkloadReport::SingleCounter(counter) = report else {
///     panic!("default behavior is the single counter");
/// };
///
/// assert_eq!(counter.final_count(), 64);
/// ```
pub fn run(config: &RunConfig) -> Result<WorkloadReport> {
    match config.behavior() {
        Behavior::SingleCounter => Ok(WorkloadReport::SingleCounter(run_single_counter(config)?)),
        Behavior::ShardedCounters => {
            Ok(WorkloadReport::ShardedCounters(run_sharded_counters(config)?))
        }
        Behavior::Queue => Ok(WorkloadReport::Queue(run_queue(config)?)),
    }
}

#[cfg(not(miri))] // Spawns real threads and reads the real clock.
#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use new_zealand::nz;

    use super::*;

    #[test]
    fn selects_the_single_counter() {
        let config = RunConfig::new(100, nz!(2), Behavior::SingleCounter);

        let report = run(&config).unwrap();

        let WorkloadReport::SingleCounter(counter) = report else {
            panic!("configured behavior was the single counter");
        };

        assert_eq!(counter.final_count(), 200);
    }

    #[test]
    fn selects_the_sharded_counters() {
        let config = RunConfig::new(100, nz!(2), Behavior::ShardedCounters);

        let report = run(&config).unwrap();

        let WorkloadReport::ShardedCounters(shards) = report else {
            panic!("configured behavior was the sharded counters");
        };

        assert_eq!(shards.combined_count(), 200);
    }

    #[test]
    fn selects_the_queue() {
        let config = RunConfig::new(100, nz!(2), Behavior::Queue);

        let report = run(&config).unwrap();

        let WorkloadReport::Queue(queue) = report else {
            panic!("configured behavior was the queue");
        };

        assert_eq!(queue.consumed_count(), 100);
    }

    #[test]
    fn elapsed_covers_a_real_run() {
        let config = RunConfig::new(100, nz!(2), Behavior::SingleCounter);

        let report = run(&config).unwrap();

        // Spawning and joining threads alone takes a measurable amount
        // of time.
        assert!(report.elapsed() > Duration::ZERO);
    }
}
