use super::{FileLinkRow, RecordSource, SettingRow, SettingsFilter, TreeReportRow};
use crate::error::Error;

/// Record source serving rows held in memory.
///
/// `fetch_settings` applies the filter and name ordering the way the SQL
/// source does.
#[derive(Debug, Clone, Default)]
pub struct InMemorySource {
    pub file_links: Vec<FileLinkRow>,
    pub tree_reports: Vec<TreeReportRow>,
    pub settings: Vec<SettingRow>,
}

impl InMemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_link(mut self, id: i32, path: &str, module: Option<&str>) -> Self {
        self.file_links.push(FileLinkRow {
            id,
            path: path.to_string(),
            module: module.map(str::to_string),
        });
        self
    }

    pub fn with_tree_report(mut self, id: i32, rootlocation: &str) -> Self {
        self.tree_reports.push(TreeReportRow {
            id,
            rootlocation: Some(rootlocation.to_string()),
        });
        self
    }

    pub fn with_setting(mut self, id: i32, name: &str, value: &str) -> Self {
        self.settings.push(SettingRow {
            id,
            name: name.to_string(),
            value: Some(value.to_string()),
        });
        self
    }
}

impl RecordSource for InMemorySource {
    fn fetch_file_links(&mut self) -> Result<Vec<FileLinkRow>, Error> {
        Ok(self.file_links.clone())
    }

    fn fetch_tree_reports(&mut self) -> Result<Vec<TreeReportRow>, Error> {
        Ok(self.tree_reports.clone())
    }

    fn fetch_settings(&mut self, filter: &SettingsFilter) -> Result<Vec<SettingRow>, Error> {
        let mut rows: Vec<SettingRow> = self
            .settings
            .iter()
            .filter(|row| {
                row.value
                    .as_deref()
                    .is_some_and(|value| filter.accepts(&row.name, value))
            })
            .cloned()
            .collect();
        rows.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(rows)
    }
}
