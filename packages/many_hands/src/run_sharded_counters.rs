use std::iter;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::{Result, RunConfig, run_timed};

/// Number of counters in the table. With this many counters, workers rarely
/// pick the same one at the same time.
const SHARD_COUNT: usize = 1024;

/// A counter that occupies its own cache line pair.
///
/// 64 bytes would isolate the counter on its own L1 cache line but the L2
/// prefetches adjacent sectors, so neighboring counters must be a full
/// 128 bytes apart to stay out of each other's way.
#[repr(align(128))]
struct PaddedCounter {
    value: AtomicU64,
}

impl PaddedCounter {
    fn new() -> Self {
        Self {
            value: AtomicU64::new(0),
        }
    }
}

/// Outcome of a [`run_sharded_counters()`] run.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct ShardsReport {
    elapsed: Duration,
    combined_count: u64,
}

impl ShardsReport {
    /// Wall-clock duration of the run, including thread creation and teardown.
    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// The sum of every counter in the table once all workers have finished.
    ///
    /// This is always `thread_count * iterations` regardless of how the
    /// increments were distributed over the table.
    #[must_use]
    pub fn combined_count(&self) -> u64 {
        self.combined_count
    }
}

/// Runs the sharded counters workload: each worker increments counters
/// picked at random from a table of 1024, one pick per work item.
///
/// Every counter is an atomic sitting alone on its own cache line pair, so
/// two workers only interfere when they happen to pick the same counter.
/// Unlike the single counter workload, this one scales with worker count.
///
/// Each worker seeds its random number generator with its own worker index,
/// making the sequence of picks deterministic for a given configuration.
///
/// # Errors
///
/// Returns [`Error::SpawnWorker`][crate::Error::SpawnWorker] if a worker
/// thread cannot be created.
///
/// # Examples
///
/// ```
/// use many_hands::{Behavior, RunConfig, run_sharded_counters};
/// use new_zealand::nz;
///
/// let config = RunConfig::new(100, nz!(4), Behavior::ShardedCounters);
/// let report = run_sharded_counters(&config).unwrap();
///
/// assert_eq!(report.combined_count(), 400);
/// ```
pub fn run_sharded_counters(config: &RunConfig) -> Result<ShardsReport> {
    let iterations = config.iterations();

    let shards: Arc<[PaddedCounter]> = iter::repeat_with(PaddedCounter::new)
        .take(SHARD_COUNT)
        .collect();

    let elapsed = run_timed(config.thread_count(), {
        let shards = Arc::clone(&shards);
        move |index| {
            let mut rng = SmallRng::seed_from_u64(index as u64);

            for _ in 0..iterations {
                let pick = rng.random_range(0..SHARD_COUNT);

                shards
                    .get(pick)
                    .expect("random_range keeps the pick below the table length")
                    .value
                    .fetch_add(1, Ordering::Relaxed);
            }
        }
    })?;

    let combined_count = shards.iter().fold(0_u64, |total, shard| {
        total
            .checked_add(shard.value.load(Ordering::Relaxed))
            .expect("combined count equals the number of work items processed, far below u64 capacity")
    });

    Ok(ShardsReport {
        elapsed,
        combined_count,
    })
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use std::mem;
    use std::ptr;

    use new_zealand::nz;
    use static_assertions::const_assert_eq;

    use super::*;
    use crate::Behavior;

    const_assert_eq!(mem::size_of::<PaddedCounter>(), 128);
    const_assert_eq!(mem::align_of::<PaddedCounter>(), 128);

    #[test]
    fn neighboring_counters_are_a_full_cache_line_pair_apart() {
        let pair = [PaddedCounter::new(), PaddedCounter::new()];
        let [first, second] = &pair;

        let distance = ptr::from_ref(second)
            .addr()
            .checked_sub(ptr::from_ref(first).addr())
            .expect("array elements are laid out in order of increasing address");

        assert_eq!(distance, 128);
    }

    #[test]
    #[cfg_attr(miri, ignore)] // Spawns real threads and reads the real clock.
    fn every_increment_lands_in_the_table() {
        let config = RunConfig::new(1000, nz!(4), Behavior::ShardedCounters);

        let report = run_sharded_counters(&config).unwrap();

        assert_eq!(report.combined_count(), 4000);
    }

    #[test]
    #[cfg_attr(miri, ignore)] // Spawns real threads and reads the real clock.
    fn lone_worker_fills_the_table_alone() {
        let config = RunConfig::new(64, nz!(1), Behavior::ShardedCounters);

        let report = run_sharded_counters(&config).unwrap();

        assert_eq!(report.combined_count(), 64);
    }

    #[test]
    #[cfg_attr(miri, ignore)] // Spawns real threads and reads the real clock.
    fn zero_iterations_leave_the_table_untouched() {
        let config = RunConfig::new(0, nz!(4), Behavior::ShardedCounters);

        let report = run_sharded_counters(&config).unwrap();

        assert_eq!(report.combined_count(), 0);
    }

    #[test]
    #[cfg_attr(miri, ignore)] // Spawns real threads and reads the real clock.
    fn each_run_starts_from_a_fresh_table() {
        let config = RunConfig::new(100, nz!(2), Behavior::ShardedCounters);

        let first = run_sharded_counters(&config).unwrap();
        let second = run_sharded_counters(&config).unwrap();

        assert_eq!(first.combined_count(), 200);
        assert_eq!(second.combined_count(), 200);
    }
}
