use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::{ERR_POISONED_LOCK, Result, RunConfig, run_timed};

/// Outcome of a [`run_single_counter()`] run.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct CounterReport {
    elapsed: Duration,
    final_count: u64,
}

impl CounterReport {
    /// Wall-clock duration of the run, including thread creation and teardown.
    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// The value of the shared counter once all workers have finished.
    ///
    /// This is always `thread_count * iterations` because the mutex makes
    /// every increment take effect.
    #[must_use]
    pub fn final_count(&self) -> u64 {
        self.final_count
    }
}

/// Runs the shared counter workload: every worker increments the same
/// mutex-guarded counter once per work item.
///
/// All workers compete for one lock, so adding workers adds contention
/// instead of throughput. This workload is the baseline that the sharded
/// variant in [`run_sharded_counters()`][crate::run_sharded_counters]
/// improves on.
///
/// # Errors
///
/// Returns [`Error::SpawnWorker`][crate::Error::SpawnWorker] if a worker
/// thread cannot be created.
///
/// # Examples
///
/// ```
/// use many_hands::{Behavior, RunConfig, run_single_counter};
/// use new_zealand::nz;
///
/// let config = RunConfig::new(100, nz!(4), Behavior::SingleCounter);
/// let report = run_single_counter(&config).unwrap();
///
/// assert_eq!(report.final_count(), 400);
/// ```
pub fn run_single_counter(config: &RunConfig) -> Result<CounterReport> {
    let iterations = config.iterations();

    #[expect(
        clippy::mutex_integer,
        reason = "this workload measures a lock-guarded counter, an atomic would measure something else"
    )]
    let counter = Arc::new(Mutex::new(0_u64));

    let elapsed = run_timed(config.thread_count(), {
        let counter = Arc::clone(&counter);
        move |_| {
            for _ in 0..iterations {
                let mut value = counter.lock().expect(ERR_POISONED_LOCK);

                *value = value
                    .checked_add(1)
                    .expect("counter grows by one per work item, far below u64 capacity");
            }
        }
    })?;

    let final_count = *counter.lock().expect(ERR_POISONED_LOCK);

    Ok(CounterReport {
        elapsed,
        final_count,
    })
}
