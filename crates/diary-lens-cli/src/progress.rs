use diary_lens_core::ProgressReporter;
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::Mutex;
use std::time::Duration;

const TICKS: &str = "⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏";

/// CLI progress reporter using indicatif progress bars.
///
/// - Listing phase: spinner
/// - Classification phase: progress bar (file count known from listing)
/// - Store write phase: spinner
pub struct CliReporter {
    bar: Mutex<Option<ProgressBar>>,
}

impl CliReporter {
    pub fn new() -> Self {
        Self {
            bar: Mutex::new(None),
        }
    }

    fn spinner(message: &'static str) -> ProgressBar {
        let pb = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::with_template("{spinner:.cyan} {msg}") {
            pb.set_style(style.tick_chars(TICKS));
        }
        pb.set_message(message);
        pb.enable_steady_tick(Duration::from_millis(80));
        pb
    }

    fn set_bar(&self, pb: ProgressBar) {
        if let Ok(mut guard) = self.bar.lock() {
            if let Some(old) = guard.take() {
                old.finish_and_clear();
            }
            *guard = Some(pb);
        }
    }

    fn finish_bar(&self) {
        if let Ok(mut guard) = self.bar.lock() {
            if let Some(pb) = guard.take() {
                pb.finish_and_clear();
            }
        }
    }
}

impl ProgressReporter for CliReporter {
    fn on_list_start(&self) {
        self.set_bar(Self::spinner("Listing diary files..."));
    }

    fn on_list_complete(&self, total_files: usize, duration_secs: f64) {
        self.finish_bar();
        eprintln!(
            "  \x1b[32m✓\x1b[0m Listing complete: {} files in {:.2}s",
            total_files, duration_secs
        );
    }

    fn on_classify_start(&self, total_files: usize) {
        let pb = ProgressBar::new(total_files as u64);
        if let Ok(style) = ProgressStyle::with_template(
            "  {spinner:.cyan} Classifying [{bar:30.cyan/dim}] {pos}/{len} files {msg}",
        ) {
            pb.set_style(style.progress_chars("━╸─").tick_chars(TICKS));
        }
        pb.enable_steady_tick(Duration::from_millis(80));
        self.set_bar(pb);
    }

    fn on_classify_progress(&self, files_done: usize, current_file: &str) {
        if let Ok(guard) = self.bar.lock() {
            if let Some(pb) = guard.as_ref() {
                pb.set_position(files_done as u64);
                pb.set_message(current_file.to_string());
            }
        }
    }

    fn on_classify_complete(&self, records: usize, skipped: usize, duration_secs: f64) {
        self.finish_bar();
        eprintln!(
            "  \x1b[32m✓\x1b[0m Classification complete: {} entries ({} skipped) in {:.2}s",
            records, skipped, duration_secs
        );
    }

    fn on_store_write_start(&self) {
        self.set_bar(Self::spinner("Writing table and CSV snapshot..."));
    }

    fn on_store_write_complete(&self, rows: usize, duration_secs: f64) {
        self.finish_bar();
        eprintln!(
            "  \x1b[32m✓\x1b[0m Store write complete: {} records in {:.2}s",
            rows, duration_secs
        );
    }
}
