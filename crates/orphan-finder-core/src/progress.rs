use crate::engine::RunSummary;

/// Hooks for reporting reconciliation progress.
///
/// All methods have default no-op implementations.
pub trait ProgressReporter {
    fn on_load_start(&self) {}
    fn on_load_complete(&self, _links: usize, _roots: usize, _settings: usize) {}
    fn on_scan_start(&self) {}
    fn on_scan_progress(&self, _files_processed: usize, _current_path: &str) {}
    fn on_scan_complete(&self, _summary: &RunSummary) {}
}

/// No-op progress reporter for silent operation.
pub struct SilentReporter;

impl ProgressReporter for SilentReporter {}
