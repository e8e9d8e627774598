//! Progress tracker capability.

/// Batch-progress tracker of a long-running job.
///
/// A tracker counts processed items, measures elapsed wall-clock time and runs a callback at every
/// batch boundary. Anything implementing this trait can be decorated with metrics reporting,
/// including test doubles.
///
/// All operations are synchronous and expected to be driven from a single thread.
pub trait ProgressTracker {
    /// Value produced by [`ProgressTracker::final_line`].
    type Final;
    /// Value produced by [`ProgressTracker::on_batch`].
    type Batch;

    /// Increment the item counter by `n`.
    fn incr(&mut self, n: u64);

    /// Cumulative number of items processed.
    fn count(&self) -> u64;

    /// Wall-clock seconds elapsed since the tracker started.
    fn total_seconds_so_far(&self) -> f64;

    /// Mark a batch boundary.
    ///
    /// Implementations perform their own bookkeeping first and then invoke `callback` with
    /// themselves, synchronously and exactly once.
    fn on_batch<F>(&mut self, callback: F) -> Self::Batch
    where
        F: FnOnce(&mut Self);

    /// Finish the job and return the tracker's closing result.
    fn final_line(&mut self) -> Self::Final;
}
