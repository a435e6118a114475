use std::io;

use thiserror::Error;

/// Errors that can occur when selecting or executing a workload.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// The caller named a behavior that is not part of the known set.
    #[error("unknown behavior '{requested}' - valid behaviors are counter, counters and queue")]
    UnknownBehavior {
        /// The behavior name that failed to match any known workload.
        requested: String,
    },

    /// The operating system refused to create a worker thread.
    ///
    /// Any workers spawned before the failure have already been joined by the
    /// time this error is returned, so no threads are leaked.
    #[error("failed to spawn worker thread: {source}")]
    SpawnWorker {
        /// The underlying spawn failure reported by the operating system.
        source: io::Error,
    },
}

/// A specialized `Result` type for workload operations, returning the crate's
/// [`Error`] type as the error value.
pub(crate) type Result<T> = std::result::Result<T, Error>;
