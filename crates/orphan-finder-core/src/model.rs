use crate::path::PathPrefix;
use chrono::{DateTime, Utc};

/// A file discovered by the walk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileDescriptor {
    pub path: String,
    pub size: u64,
    pub last_modified: DateTime<Utc>,
}

/// A direct, exact-path association from the `file_link` table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkRecord {
    pub id: i64,
    pub path: String,
    pub module: Option<String>,
}

/// A `tree_report` row whose root location owns every path beneath it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RootLocationRecord {
    pub id: i64,
    pub root_prefix: PathPrefix,
}

/// A settings row reinterpreted as a path prefix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettingRecord {
    pub id: i64,
    pub name: String,
    pub path_prefix: PathPrefix,
}

/// Which record source claimed a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceKind {
    Linked,
    Rooted,
    Settings,
    Unmatched,
}

impl SourceKind {
    /// Table name written to the results database; empty for orphans.
    pub fn table_name(self) -> &'static str {
        match self {
            SourceKind::Linked => "file_link",
            SourceKind::Rooted => "tree_report",
            SourceKind::Settings => "settings",
            SourceKind::Unmatched => "",
        }
    }
}

/// Result of running one path through the matcher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchOutcome {
    pub source: SourceKind,
    pub record_id: i64,
    pub label: String,
}

impl MatchOutcome {
    pub fn unmatched() -> Self {
        MatchOutcome {
            source: SourceKind::Unmatched,
            record_id: 0,
            label: String::new(),
        }
    }

    pub fn linked(link: &LinkRecord) -> Self {
        MatchOutcome {
            source: SourceKind::Linked,
            record_id: link.id,
            label: link.module.clone().unwrap_or_default(),
        }
    }

    pub fn rooted(record: &RootLocationRecord) -> Self {
        MatchOutcome {
            source: SourceKind::Rooted,
            record_id: record.id,
            label: String::new(),
        }
    }

    pub fn setting(record: &SettingRecord) -> Self {
        MatchOutcome {
            source: SourceKind::Settings,
            record_id: record.id,
            label: record.name.clone(),
        }
    }
}

/// One persisted classification, keyed by `path`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassificationResult {
    pub path: String,
    pub size: u64,
    pub last_modified: DateTime<Utc>,
    pub source: SourceKind,
    pub record_id: i64,
    pub module: String,
}

impl ClassificationResult {
    pub fn new(file: FileDescriptor, outcome: MatchOutcome) -> Self {
        ClassificationResult {
            path: file.path,
            size: file.size,
            last_modified: file.last_modified,
            source: outcome.source,
            record_id: outcome.record_id,
            module: outcome.label,
        }
    }

    pub fn table_name(&self) -> &'static str {
        self.source.table_name()
    }

    pub fn is_orphaned(&self) -> bool {
        self.source == SourceKind::Unmatched
    }
}
