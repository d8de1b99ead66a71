use indicatif::{ProgressBar, ProgressStyle};
use orphan_finder_core::{ProgressReporter, RunSummary};
use std::sync::Mutex;
use std::time::Duration;

const TICK_CHARS: &str = "⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏";

/// CLI progress reporter: a spinner while records load and while the tree
/// is walked.
pub struct CliReporter {
    bar: Mutex<Option<ProgressBar>>,
}

impl CliReporter {
    pub fn new() -> Self {
        Self {
            bar: Mutex::new(None),
        }
    }

    fn start_spinner(&self, message: &'static str) {
        let pb = ProgressBar::new_spinner();
        let style = ProgressStyle::with_template("{spinner:.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_chars(TICK_CHARS);
        pb.set_style(style);
        pb.set_message(message);
        pb.enable_steady_tick(Duration::from_millis(80));
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
    fn on_load_start(&self) {
        self.start_spinner("Loading records...");
    }

    fn on_load_complete(&self, links: usize, roots: usize, settings: usize) {
        self.finish_bar();
        eprintln!(
            "  \x1b[32m✓\x1b[0m Records loaded: {} file links, {} root locations, {} settings",
            links, roots, settings
        );
    }

    fn on_scan_start(&self) {
        self.start_spinner("Scanning files...");
    }

    fn on_scan_progress(&self, files_processed: usize, _current_path: &str) {
        if files_processed % 64 != 0 {
            return;
        }
        if let Ok(guard) = self.bar.lock() {
            if let Some(pb) = guard.as_ref() {
                pb.set_message(format!("Scanning... {} files processed", files_processed));
            }
        }
    }

    fn on_scan_complete(&self, summary: &RunSummary) {
        self.finish_bar();
        eprintln!(
            "  \x1b[32m✓\x1b[0m Scan complete: {} files in {:.2}s",
            summary.files_processed,
            summary.duration.as_secs_f64()
        );
    }
}
