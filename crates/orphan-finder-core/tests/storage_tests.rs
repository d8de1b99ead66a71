use chrono::{TimeZone, Utc};
use orphan_finder_core::model::{ClassificationResult, SourceKind};
use orphan_finder_core::report;
use orphan_finder_core::storage::ResultStore;
use orphan_finder_core::RunSummary;
use std::path::Path;
use tempfile::tempdir;

fn make_result(path: &str, source: SourceKind, record_id: i64, module: &str) -> ClassificationResult {
    ClassificationResult {
        path: path.to_string(),
        size: 1024,
        last_modified: Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap(),
        source,
        record_id,
        module: module.to_string(),
    }
}

#[test]
fn test_upsert_writes_all_columns() {
    let store = ResultStore::open_in_memory().unwrap();
    store
        .upsert_result(&make_result("/data/a.txt", SourceKind::Linked, 7, "billing"))
        .unwrap();

    let row = store.get_result("/data/a.txt").unwrap().unwrap();
    assert_eq!(row.size, 1024);
    assert_eq!(row.last_modified, "2024-03-01T12:00:00+00:00");
    assert_eq!(row.table_name, "file_link");
    assert_eq!(row.record_id, 7);
    assert_eq!(row.module, "billing");
    assert!(!row.is_orphaned);
}

#[test]
fn test_upsert_replaces_by_path() {
    let store = ResultStore::open_in_memory().unwrap();
    store
        .upsert_result(&make_result("/data/a.txt", SourceKind::Unmatched, 0, ""))
        .unwrap();
    store
        .upsert_result(&make_result("/data/a.txt", SourceKind::Rooted, 3, ""))
        .unwrap();

    let rows = store.all_results().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].table_name, "tree_report");
    assert_eq!(rows[0].record_id, 3);
    assert!(!rows[0].is_orphaned);
}

#[test]
fn test_orphan_rows_have_empty_source() {
    let store = ResultStore::open_in_memory().unwrap();
    store
        .upsert_result(&make_result("/x/lost.bin", SourceKind::Unmatched, 0, ""))
        .unwrap();
    let row = store.get_result("/x/lost.bin").unwrap().unwrap();
    assert_eq!(row.table_name, "");
    assert_eq!(row.record_id, 0);
    assert_eq!(row.module, "");
    assert!(row.is_orphaned);
}

#[test]
fn test_source_counts_and_orphan_listing() {
    let store = ResultStore::open_in_memory().unwrap();
    store
        .upsert_result(&make_result("/b/orphan.txt", SourceKind::Unmatched, 0, ""))
        .unwrap();
    store
        .upsert_result(&make_result("/a/orphan.txt", SourceKind::Unmatched, 0, ""))
        .unwrap();
    store
        .upsert_result(&make_result("/r/one.txt", SourceKind::Rooted, 1, ""))
        .unwrap();
    store
        .upsert_result(&make_result("/s/one.txt", SourceKind::Settings, 2, "exportfolder"))
        .unwrap();

    let counts: Vec<(String, i64)> = store
        .source_counts()
        .unwrap()
        .into_iter()
        .map(|c| (c.table_name, c.files))
        .collect();
    assert_eq!(
        counts,
        vec![
            ("".to_string(), 2),
            ("settings".to_string(), 1),
            ("tree_report".to_string(), 1),
        ]
    );

    let orphans: Vec<String> = store
        .orphaned_files()
        .unwrap()
        .into_iter()
        .map(|r| r.path)
        .collect();
    assert_eq!(orphans, vec!["/a/orphan.txt", "/b/orphan.txt"]);
}

#[test]
fn test_scan_run_lifecycle() {
    let store = ResultStore::open_in_memory().unwrap();
    assert!(store.latest_run().unwrap().is_none());

    let run_id = store.begin_run(Path::new("/data")).unwrap();
    let running = store.latest_run().unwrap().unwrap();
    assert_eq!(running.id, run_id);
    assert_eq!(running.status, "running");
    assert!(running.completed_at.is_none());

    let summary = RunSummary {
        files_processed: 10,
        files_orphaned: 4,
        files_failed: 1,
        ..Default::default()
    };
    store.complete_run(run_id, &summary).unwrap();

    let done = store.latest_run().unwrap().unwrap();
    assert_eq!(done.status, "completed");
    assert_eq!(done.root, "/data");
    assert_eq!(done.files_processed, 10);
    assert_eq!(done.files_orphaned, 4);
    assert_eq!(done.files_failed, 1);
    assert!(done.completed_at.is_some());
}

#[test]
fn test_results_persist_across_reopen() {
    let dir = tempdir().unwrap();
    let db_path = dir.path().join("results.db");
    {
        let store = ResultStore::open(&db_path).unwrap();
        store
            .upsert_result(&make_result("/keep/me.txt", SourceKind::Linked, 5, ""))
            .unwrap();
    }
    let store = ResultStore::open(&db_path).unwrap();
    assert_eq!(store.all_results().unwrap().len(), 1);
}

#[test]
fn test_export_orphans_csv() {
    let dir = tempdir().unwrap();
    let store = ResultStore::open_in_memory().unwrap();
    store
        .upsert_result(&make_result("/a/lost, with comma.txt", SourceKind::Unmatched, 0, ""))
        .unwrap();
    store
        .upsert_result(&make_result("/a/linked.txt", SourceKind::Linked, 1, ""))
        .unwrap();

    let csv_path = dir.path().join("orphans.csv");
    let count = report::export_orphans_csv(&store, &csv_path).unwrap();
    assert_eq!(count, 1);

    let contents = std::fs::read_to_string(&csv_path).unwrap();
    let lines: Vec<&str> = contents.lines().collect();
    assert_eq!(lines[0], "path,size,last_modified");
    assert_eq!(
        lines[1],
        "\"/a/lost, with comma.txt\",1024,2024-03-01T12:00:00+00:00"
    );
    assert_eq!(lines.len(), 2);
}
