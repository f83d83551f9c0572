use std::sync::atomic::{AtomicU64, Ordering};

/// Receives the completion ratio of a stage, returns `false` to request cancellation.
pub type ProgressCallback<'a> = dyn Fn(f64) -> bool + Sync + 'a;

/// Turns individually finished work items into a completion ratio.
pub(crate) struct CountingProgressCallback<'a> {
    count: f64,
    counter: AtomicU64,
    progress_callback: Option<&'a ProgressCallback<'a>>,
}

impl<'a> CountingProgressCallback<'a> {
    pub(crate) fn new(count: u64, progress_callback: Option<&'a ProgressCallback<'a>>) -> Self {
        Self {
            count: count.max(1) as f64,
            counter: AtomicU64::new(1),
            progress_callback,
        }
    }

    /// Reports one more finished item, returns `false` once cancellation was requested.
    pub(crate) fn increment(&self) -> bool {
        match self.progress_callback {
            Some(progress_callback) => {
                progress_callback(self.counter.fetch_add(1, Ordering::Relaxed) as f64 / self.count)
            }
            None => true,
        }
    }
}
