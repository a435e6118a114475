use std::num::NonZero;

use new_zealand::nz;

use crate::Behavior;

/// Configuration of a single workload run.
///
/// The default configuration processes 64 work items on one worker thread,
/// exercising the [`SingleCounter`][Behavior::SingleCounter] behavior.
///
/// # Examples
///
/// ```
/// use many_hands::{Behavior, RunConfig};
/// use new_zealand::nz;
///
/// let config = RunConfig::new(100, nz!(4), Behavior::Queue);
///
/// assert_eq!(config.iterations(), 100);
/// assert_eq!(config.thread_count().get(), 4);
/// assert_eq!(config.behavior(), Behavior::Queue);
/// ```
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct RunConfig {
    iterations: u64,
    thread_count: NonZero<usize>,
    behavior: Behavior,
}

impl RunConfig {
    /// Creates a configuration that processes `iterations` work items per
    /// worker, using `thread_count` workers, exercising `behavior`.
    #[must_use]
    pub fn new(iterations: u64, thread_count: NonZero<usize>, behavior: Behavior) -> Self {
        Self {
            iterations,
            thread_count,
            behavior,
        }
    }

    /// The number of work items each worker processes.
    ///
    /// For the queue behavior this is the number of items the producer
    /// publishes per consumer, as the producer itself processes no items.
    #[must_use]
    pub fn iterations(&self) -> u64 {
        self.iterations
    }

    /// The number of worker threads the run spawns.
    #[must_use]
    pub fn thread_count(&self) -> NonZero<usize> {
        self.thread_count
    }

    /// The coordination pattern the run exercises.
    #[must_use]
    pub fn behavior(&self) -> Behavior {
        self.behavior
    }
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            iterations: 64,
            thread_count: nz!(1),
            behavior: Behavior::SingleCounter,
        }
    }
}
