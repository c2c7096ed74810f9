/// Trait for reporting ingest progress.
///
/// The CLI implements it with indicatif bars. All methods default to no-ops.
pub trait ProgressReporter: Send + Sync {
    fn on_list_start(&self) {}
    fn on_list_complete(&self, _total_files: usize, _duration_secs: f64) {}
    fn on_classify_start(&self, _total_files: usize) {}
    fn on_classify_progress(&self, _files_done: usize, _current_file: &str) {}
    fn on_classify_complete(&self, _records: usize, _skipped: usize, _duration_secs: f64) {}
    fn on_store_write_start(&self) {}
    fn on_store_write_complete(&self, _rows: usize, _duration_secs: f64) {}
}

/// No-op progress reporter for silent operation.
pub struct SilentReporter;

impl ProgressReporter for SilentReporter {}
