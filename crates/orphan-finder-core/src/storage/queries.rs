use super::models::*;
use super::sqlite::ResultStore;
use crate::engine::RunSummary;
use crate::model::ClassificationResult;
use rusqlite::{params, OptionalExtension, Result, Row};
use std::path::Path;
use tracing::debug;

const RESULT_COLUMNS: &str =
    "path, size, last_modified, table_name, record_id, module, is_orphaned";

fn stored_result_from_row(row: &Row<'_>) -> Result<StoredResult> {
    Ok(StoredResult {
        path: row.get(0)?,
        size: row.get(1)?,
        last_modified: row.get(2)?,
        table_name: row.get(3)?,
        record_id: row.get(4)?,
        module: row.get(5)?,
        is_orphaned: row.get(6)?,
    })
}

fn scan_run_from_row(row: &Row<'_>) -> Result<ScanRun> {
    Ok(ScanRun {
        id: row.get(0)?,
        root: row.get(1)?,
        started_at: row.get(2)?,
        completed_at: row.get(3)?,
        status: row.get(4)?,
        files_processed: row.get(5)?,
        files_orphaned: row.get(6)?,
        files_failed: row.get(7)?,
    })
}

impl ResultStore {
    // ── Classifications ──────────────────────────────────────────

    /// Insert or replace the classification for `result.path`.
    pub fn upsert_result(&self, result: &ClassificationResult) -> Result<()> {
        let mut stmt = self.connection().prepare_cached(
            "INSERT INTO file_search_results \
             (path, size, last_modified, table_name, record_id, module, is_orphaned) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7) \
             ON CONFLICT(path) DO UPDATE SET \
                 size = excluded.size, \
                 last_modified = excluded.last_modified, \
                 table_name = excluded.table_name, \
                 record_id = excluded.record_id, \
                 module = excluded.module, \
                 is_orphaned = excluded.is_orphaned",
        )?;
        stmt.execute(params![
            result.path,
            i64::try_from(result.size).unwrap_or(i64::MAX),
            result.last_modified.to_rfc3339(),
            result.table_name(),
            result.record_id,
            result.module,
            result.is_orphaned(),
        ])?;
        Ok(())
    }

    pub fn get_result(&self, path: &str) -> Result<Option<StoredResult>> {
        self.connection()
            .query_row(
                &format!("SELECT {RESULT_COLUMNS} FROM file_search_results WHERE path = ?1"),
                params![path],
                stored_result_from_row,
            )
            .optional()
    }

    pub fn all_results(&self) -> Result<Vec<StoredResult>> {
        let mut stmt = self.connection().prepare(&format!(
            "SELECT {RESULT_COLUMNS} FROM file_search_results ORDER BY path"
        ))?;
        let rows = stmt
            .query_map([], stored_result_from_row)?
            .collect::<Result<Vec<_>>>()?;
        Ok(rows)
    }

    pub fn orphaned_files(&self) -> Result<Vec<StoredResult>> {
        let mut stmt = self.connection().prepare(&format!(
            "SELECT {RESULT_COLUMNS} FROM file_search_results \
             WHERE is_orphaned = 1 ORDER BY path"
        ))?;
        let rows = stmt
            .query_map([], stored_result_from_row)?
            .collect::<Result<Vec<_>>>()?;
        Ok(rows)
    }

    /// Stored files per source table, orphans under `""`.
    pub fn source_counts(&self) -> Result<Vec<SourceCount>> {
        let mut stmt = self.connection().prepare(
            "SELECT table_name, COUNT(*) FROM file_search_results \
             GROUP BY table_name ORDER BY table_name",
        )?;
        let rows = stmt
            .query_map([], |row| {
                Ok(SourceCount {
                    table_name: row.get(0)?,
                    files: row.get(1)?,
                })
            })?
            .collect::<Result<Vec<_>>>()?;
        Ok(rows)
    }

    // ── Scan Runs ────────────────────────────────────────────────

    pub fn begin_run(&self, root: &Path) -> Result<i64> {
        let now = chrono::Utc::now().to_rfc3339();
        self.connection().execute(
            "INSERT INTO scan_run (root, started_at, status) VALUES (?1, ?2, 'running')",
            params![root.to_string_lossy().into_owned(), now],
        )?;
        let id = self.connection().last_insert_rowid();
        debug!("Started scan run {} for {}", id, root.display());
        Ok(id)
    }

    pub fn complete_run(&self, run_id: i64, summary: &RunSummary) -> Result<()> {
        self.finish_run(run_id, "completed", summary)
    }

    pub fn fail_run(&self, run_id: i64, summary: &RunSummary) -> Result<()> {
        self.finish_run(run_id, "failed", summary)
    }

    fn finish_run(&self, run_id: i64, status: &str, summary: &RunSummary) -> Result<()> {
        let now = chrono::Utc::now().to_rfc3339();
        self.connection().execute(
            "UPDATE scan_run SET completed_at = ?1, status = ?2, files_processed = ?3, \
             files_orphaned = ?4, files_failed = ?5 WHERE id = ?6",
            params![
                now,
                status,
                summary.files_processed as i64,
                summary.files_orphaned as i64,
                summary.files_failed as i64,
                run_id
            ],
        )?;
        debug!("Scan run {} marked {}", run_id, status);
        Ok(())
    }

    pub fn latest_run(&self) -> Result<Option<ScanRun>> {
        self.connection()
            .query_row(
                "SELECT id, root, started_at, completed_at, status, files_processed, \
                 files_orphaned, files_failed FROM scan_run ORDER BY id DESC LIMIT 1",
                [],
                scan_run_from_row,
            )
            .optional()
    }
}
