use std::collections::VecDeque;
use std::hint::spin_loop;
use std::mem;
use std::sync::atomic::{AtomicBool, AtomicI64, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::{ERR_POISONED_LOCK, Result, RunConfig, run_timed};

/// What one consumer accomplished during a [`run_queue()`] run.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct ConsumerStats {
    worker_index: usize,
    consumed_count: u64,
    consumed_sum: i64,
}

impl ConsumerStats {
    /// Index of the worker these statistics belong to.
    ///
    /// Worker 0 is the producer, so this is always at least 1.
    #[must_use]
    pub fn worker_index(&self) -> usize {
        self.worker_index
    }

    /// How many items this consumer took from the queue.
    #[must_use]
    pub fn consumed_count(&self) -> u64 {
        self.consumed_count
    }

    /// The sum of the item values this consumer took from the queue.
    #[must_use]
    pub fn consumed_sum(&self) -> i64 {
        self.consumed_sum
    }
}

/// Outcome of a [`run_queue()`] run.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct QueueReport {
    elapsed: Duration,
    consumers: Vec<ConsumerStats>,
    consumed_count: u64,
    consumed_sum: i64,
}

impl QueueReport {
    /// Wall-clock duration of the run, including thread creation and teardown.
    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// Per-consumer statistics, in the order the consumers finished.
    #[must_use]
    pub fn consumers(&self) -> &[ConsumerStats] {
        &self.consumers
    }

    /// Total number of items consumed, across all consumers.
    ///
    /// Every published item is consumed exactly once, so this always equals
    /// `(thread_count - 1) * iterations`.
    #[must_use]
    pub fn consumed_count(&self) -> u64 {
        self.consumed_count
    }

    /// Sum of all consumed item values, across all consumers.
    ///
    /// The producer publishes the sequence `0..n`, so for `n` items this
    /// always equals `n * (n - 1) / 2`.
    #[must_use]
    pub fn consumed_sum(&self) -> i64 {
        self.consumed_sum
    }
}

/// Shared state of one producer/consumer run.
struct WorkQueue {
    /// The queue itself. Item values are sequential, starting from zero.
    items: Mutex<VecDeque<i64>>,

    /// Set by the producer once every item has been published. Consumers
    /// finding the queue empty cannot stop until this is set, as the
    /// producer may simply not have caught up yet.
    production_complete: AtomicBool,

    /// Sum of all consumed item values.
    consumed_sum: AtomicI64,

    /// Total number of consumed items. Reaching the published item count
    /// releases the completion barrier that all workers wait on.
    consumed_count: AtomicU64,

    consumer_stats: Mutex<Vec<ConsumerStats>>,
}

/// Runs the producer/consumer workload: worker 0 publishes sequential items
/// into a lock-guarded queue and every other worker consumes from it.
///
/// The producer publishes `iterations` items per consumer, taking the lock
/// once per item. Consumers likewise compete for the lock on every take.
/// Once all items have been published, the producer raises a completion flag
/// so that consumers can distinguish "queue drained" from "producer not yet
/// caught up". All workers then hold position until every published item has
/// been consumed.
///
/// With a single worker there are no consumers. The producer publishes
/// nothing, raises the flag, and the run completes immediately with zero
/// counts.
///
/// # Errors
///
/// Returns [`Error::SpawnWorker`][crate::Error::SpawnWorker] if a worker
/// thread cannot be created.
///
/// # Examples
///
/// ```
/// use many_hands::{Behavior, RunConfig, run_queue};
/// use new_zealand::nz;
///
/// // One producer, three consumers, 100 items per consumer.
/// let config = RunConfig::new(100, nz!(4), Behavior::Queue);
/// let report = run_queue(&config).unwrap();
///
/// // All 300 items are consumed, and the items were 0..300.
/// assert_eq!(report.consumed_count(), 300);
/// assert_eq!(report.consumed_sum(), 44850);
/// ```
#[cfg_attr(test, mutants::skip)] // Mutating the completion barrier hangs the run instead of failing a test.
pub fn run_queue(config: &RunConfig) -> Result<QueueReport> {
    let consumer_count = config
        .thread_count()
        .get()
        .checked_sub(1)
        .expect("thread count is nonzero, so it is at least one") as u64;

    let expected_count = config
        .iterations()
        .checked_mul(consumer_count)
        .expect("total item count is limited by memory, far below u64 capacity");

    let item_count = i64::try_from(expected_count)
        .expect("item values are sequential, so a count that fits in memory also fits i64");

    let queue = Arc::new(WorkQueue {
        items: Mutex::new(VecDeque::new()),
        production_complete: AtomicBool::new(false),
        consumed_sum: AtomicI64::new(0),
        consumed_count: AtomicU64::new(0),
        consumer_stats: Mutex::new(Vec::new()),
    });

    let elapsed = run_timed(config.thread_count(), {
        let queue = Arc::clone(&queue);
        move |index| {
            if index == 0 {
                produce(&queue, item_count);
            } else {
                consume(&queue, index);
            }

            // Every worker holds position until all published items have
            // been consumed, so the producer does not exit the run while
            // consumers are still draining the queue.
            while queue.consumed_count.load(Ordering::Acquire) != expected_count {
                spin_loop();
            }
        }
    })?;

    let consumers = mem::take(&mut *queue.consumer_stats.lock().expect(ERR_POISONED_LOCK));
    let consumed_count = queue.consumed_count.load(Ordering::Acquire);
    let consumed_sum = queue.consumed_sum.load(Ordering::Acquire);

    Ok(QueueReport {
        elapsed,
        consumers,
        consumed_count,
        consumed_sum,
    })
}

#[cfg_attr(test, mutants::skip)] // Mutating the completion flag store hangs consumers instead of failing a test.
fn produce(queue: &WorkQueue, item_count: i64) {
    for item in 0..item_count {
        queue.items.lock().expect(ERR_POISONED_LOCK).push_back(item);
    }

    queue.production_complete.store(true, Ordering::Release);
}

#[cfg_attr(test, mutants::skip)] // Mutating the stop condition makes this loop endless instead of failing a test.
fn consume(queue: &WorkQueue, worker_index: usize) {
    let mut consumed_sum: i64 = 0;
    let mut consumed_count: u64 = 0;

    loop {
        let mut items = queue.items.lock().expect(ERR_POISONED_LOCK);

        if let Some(item) = items.pop_front() {
            consumed_sum = consumed_sum
                .checked_add(item)
                .expect("sum of sequential item values stays within i64 for any feasible item count");

            consumed_count = consumed_count
                .checked_add(1)
                .expect("count grows by one per item, far below u64 capacity");
        } else if queue.production_complete.load(Ordering::Acquire) {
            // Empty with production complete: every item has been taken.
            break;
        }

        // Empty with production still in progress: release the lock so the
        // producer can make headway, then look again.
    }

    queue
        .consumer_stats
        .lock()
        .expect(ERR_POISONED_LOCK)
        .push(ConsumerStats {
            worker_index,
            consumed_count,
            consumed_sum,
        });

    queue.consumed_sum.fetch_add(consumed_sum, Ordering::Relaxed);

    // Published last, with Release ordering, so whoever observes the full
    // count also observes every sum contribution and stats entry.
    queue.consumed_count.fetch_add(consumed_count, Ordering::Release);
}
