/// A classification row as read back from `file_search_results`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredResult {
    pub path: String,
    pub size: i64,
    pub last_modified: String,
    pub table_name: String,
    pub record_id: i64,
    pub module: String,
    pub is_orphaned: bool,
}

/// One reconciliation pass recorded in `scan_run`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanRun {
    pub id: i64,
    pub root: String,
    pub started_at: String,
    pub completed_at: Option<String>,
    pub status: String,
    pub files_processed: i64,
    pub files_orphaned: i64,
    pub files_failed: i64,
}

/// Number of stored files claimed by one source table; `""` counts orphans.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceCount {
    pub table_name: String,
    pub files: i64,
}
