use crate::config::AppConfig;
use crate::error::Error;
use crate::loader;
use crate::matcher::{LinkLookup, Matcher};
use crate::model::{ClassificationResult, FileDescriptor};
use crate::progress::ProgressReporter;
use crate::scanner::FileWalk;
use crate::source::{PgRecordSource, RecordSource};
use crate::storage::ResultStore;
use std::path::Path;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// Receives one classification per file.
pub trait ClassificationSink {
    fn persist(&mut self, result: &ClassificationResult) -> Result<(), Error>;
}

impl ClassificationSink for ResultStore {
    fn persist(&mut self, result: &ClassificationResult) -> Result<(), Error> {
        self.upsert_result(result)?;
        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Every non-directory entry the walk produced.
    pub files_processed: usize,
    pub files_orphaned: usize,
    /// Files whose link lookup or persistence failed.
    pub files_failed: usize,
    /// Walk entries below the root that could not be read.
    pub entries_skipped: usize,
    pub duration: Duration,
}

/// Run every file from `files` through `matcher` into `sink`.
///
/// Only [`Error::RootAccess`] aborts the pass. Unreadable entries, failed
/// link lookups and failed writes are logged and counted, and the pass
/// moves on to the next file.
pub fn reconcile<I, L, S>(
    files: I,
    matcher: &mut Matcher<L>,
    sink: &mut S,
    reporter: &dyn ProgressReporter,
) -> Result<RunSummary, Error>
where
    I: IntoIterator<Item = Result<FileDescriptor, Error>>,
    L: LinkLookup,
    S: ClassificationSink + ?Sized,
{
    let start = Instant::now();
    let mut summary = RunSummary::default();

    for item in files {
        let file = match item {
            Ok(file) => file,
            Err(err @ Error::RootAccess { .. }) => return Err(err),
            Err(err) => {
                warn!("Skipping unreadable entry: {}", err);
                summary.entries_skipped += 1;
                continue;
            }
        };

        summary.files_processed += 1;
        reporter.on_scan_progress(summary.files_processed, &file.path);
        debug!("Processing file: {}", file.path);

        let outcome = match matcher.classify(&file.path) {
            Ok(outcome) => outcome,
            Err(err) => {
                warn!("Link lookup failed for {}: {}", file.path, err);
                summary.files_failed += 1;
                continue;
            }
        };

        let result = ClassificationResult::new(file, outcome);
        if result.is_orphaned() {
            summary.files_orphaned += 1;
            debug!("Orphaned file found: {}", result.path);
        }

        if let Err(err) = sink.persist(&result) {
            warn!("Error storing result for {}: {}", result.path, err);
            summary.files_failed += 1;
        }
    }

    summary.duration = start.elapsed();
    Ok(summary)
}

/// Wires configuration, record source, walk and results store into one pass.
pub struct ReconcileEngine {
    config: AppConfig,
}

impl ReconcileEngine {
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Full pass against the configured PostgreSQL record database, writing
    /// into the configured results database.
    pub fn run(&self, root: &Path, reporter: &dyn ProgressReporter) -> Result<RunSummary, Error> {
        let database_url = self.config.resolved_database_url().ok_or_else(|| {
            Error::Other("no record database configured (set database_url or DATABASE_URL)".into())
        })?;
        let mut store = ResultStore::open(&self.config.results_db)?;
        info!("Writing results to {}", self.config.results_db);

        self.tracked(&mut store, root, |store| {
            let mut source = PgRecordSource::connect(&database_url)?;
            self.pass(&mut source, store, root, reporter)
        })
    }

    /// Full pass against an already opened source and store.
    pub fn run_with_source<R>(
        &self,
        source: &mut R,
        store: &mut ResultStore,
        root: &Path,
        reporter: &dyn ProgressReporter,
    ) -> Result<RunSummary, Error>
    where
        R: RecordSource + ?Sized,
    {
        self.tracked(store, root, |store| self.pass(source, store, root, reporter))
    }

    fn pass<R>(
        &self,
        source: &mut R,
        store: &mut ResultStore,
        root: &Path,
        reporter: &dyn ProgressReporter,
    ) -> Result<RunSummary, Error>
    where
        R: RecordSource + ?Sized,
    {
        info!("Loading record sources...");
        reporter.on_load_start();
        let records = loader::load_all(source, &self.config.matching)?;
        reporter.on_load_complete(records.links.len(), records.roots.len(), records.settings.len());

        let walk = FileWalk::new(root, &self.config.ignore_patterns)?;
        let mut matcher = records.into_matcher();

        info!("Scanning {}...", root.display());
        reporter.on_scan_start();
        let summary = reconcile(walk, &mut matcher, store, reporter)?;
        reporter.on_scan_complete(&summary);
        debug!(
            "Scan completed in {:.2}s: {} files, {} orphaned, {} failed",
            summary.duration.as_secs_f64(),
            summary.files_processed,
            summary.files_orphaned,
            summary.files_failed,
        );
        Ok(summary)
    }

    /// Record the pass in `scan_run`, marking it failed if `f` errors.
    fn tracked<F>(&self, store: &mut ResultStore, root: &Path, f: F) -> Result<RunSummary, Error>
    where
        F: FnOnce(&mut ResultStore) -> Result<RunSummary, Error>,
    {
        let run_id = store.begin_run(root)?;
        match f(&mut *store) {
            Ok(summary) => {
                store.complete_run(run_id, &summary)?;
                Ok(summary)
            }
            Err(err) => {
                if let Err(mark_err) = store.fail_run(run_id, &RunSummary::default()) {
                    warn!("Could not mark scan run {} failed: {}", run_id, mark_err);
                }
                Err(err)
            }
        }
    }
}
