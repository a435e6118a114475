use std::num::NonZero;
use std::panic;
use std::thread;
use std::time::{Duration, Instant};

use crate::{Error, Result};

/// Spawns `thread_count` worker threads that all execute the same routine,
/// waits for every one of them to finish and returns the elapsed wall-clock
/// time of the whole run.
///
/// Each worker receives its own index in `0..thread_count`, so a routine can
/// assign different roles to different workers.
///
/// The measured time includes thread creation and teardown, not just the time
/// spent inside the worker routine. As long as the work itself dominates, the
/// spawn overhead disappears into the noise.
///
/// # Errors
///
/// Returns [`Error::SpawnWorker`] if the operating system refuses to create a
/// thread. Workers spawned before the failure are joined before the error is
/// returned.
///
/// # Panics
///
/// If a worker routine panics, the panic is resumed on the calling thread,
/// but only once every worker has been joined.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use std::sync::atomic::{AtomicUsize, Ordering};
///
/// use many_hands::run_timed;
/// use new_zealand::nz;
///
/// let counter = Arc::new(AtomicUsize::new(0));
///
/// let elapsed = run_timed(nz!(4), {
///     let counter = Arc::clone(&counter);
///     move |_| {
///         counter.fetch_add(1, Ordering::Relaxed);
///     }
/// })
/// .unwrap();
///
/// assert_eq!(counter.load(Ordering::Relaxed), 4);
/// println!("4 increments took {} seconds", elapsed.as_secs_f64());
/// ```
#[cfg_attr(test, mutants::skip)] // Mutations to spawn/join logic hang the test suite instead of failing it.
pub fn run_timed<F>(thread_count: NonZero<usize>, worker: F) -> Result<Duration>
where
    F: Fn(usize) + Clone + Send + 'static,
{
    let start = Instant::now();

    let mut join_handles = Vec::with_capacity(thread_count.get());
    let mut spawn_failure = None;

    for index in 0..thread_count.get() {
        let spawn_result = thread::Builder::new()
            .name(format!("worker-{index}"))
            .spawn({
                let worker = worker.clone();
                move || worker(index)
            });

        match spawn_result {
            Ok(handle) => join_handles.push(handle),
            Err(source) => {
                // No worker may outlive this call, so the already-spawned
                // workers are joined before the failure is reported.
                spawn_failure = Some(source);
                break;
            }
        }
    }

    let mut worker_panic = None;

    for handle in join_handles {
        if let Err(payload) = handle.join() {
            // Keep joining the remaining workers; the first panic is
            // resumed once no worker is left running.
            if worker_panic.is_none() {
                worker_panic = Some(payload);
            }
        }
    }

    if let Some(payload) = worker_panic {
        panic::resume_unwind(payload);
    }

    if let Some(source) = spawn_failure {
        return Err(Error::SpawnWorker { source });
    }

    Ok(start.elapsed())
}
