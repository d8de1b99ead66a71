//! Record sources: where link, root-location and settings rows come from.
//!
//! [`PgRecordSource`] reads them from PostgreSQL through diesel;
//! [`InMemorySource`] serves fixed rows for tests and offline runs.

pub mod memory;
pub mod pg;
pub mod schema;

use crate::error::Error;
use diesel::prelude::*;

pub use memory::InMemorySource;
pub use pg::PgRecordSource;

#[derive(Debug, Clone, PartialEq, Eq, Queryable)]
pub struct FileLinkRow {
    pub id: i32,
    pub path: String,
    pub module: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Queryable)]
pub struct TreeReportRow {
    pub id: i32,
    pub rootlocation: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Queryable)]
pub struct SettingRow {
    pub id: i32,
    pub name: String,
    pub value: Option<String>,
}

/// Fetches the raw rows the loader turns into match targets.
pub trait RecordSource {
    fn fetch_file_links(&mut self) -> Result<Vec<FileLinkRow>, Error>;

    /// All root locations, in the order the source returns them.
    fn fetch_tree_reports(&mut self) -> Result<Vec<TreeReportRow>, Error>;

    /// Settings rows passing `filter`, ordered by name.
    fn fetch_settings(&mut self, filter: &SettingsFilter) -> Result<Vec<SettingRow>, Error>;
}

/// Content filter selecting settings whose values look like file locations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettingsFilter {
    /// Substring every accepted value must contain.
    pub marker: String,
    /// Names containing this substring are rejected.
    pub excluded_name: String,
    /// Exact name that is always rejected.
    pub reserved_name: String,
    /// Value prefixes (URI schemes) that are rejected.
    pub excluded_schemes: Vec<String>,
}

impl SettingsFilter {
    /// All comparisons ignore case.
    pub fn accepts(&self, name: &str, value: &str) -> bool {
        let name = name.to_lowercase();
        let value = value.to_lowercase();

        if !value.contains(&self.marker.to_lowercase()) {
            return false;
        }
        if !self.excluded_name.is_empty() && name.contains(&self.excluded_name.to_lowercase()) {
            return false;
        }
        if name == self.reserved_name.to_lowercase() {
            return false;
        }
        !self
            .excluded_schemes
            .iter()
            .any(|scheme| value.starts_with(&scheme.to_lowercase()))
    }
}

/// Escape `\`, `%` and `_` so `text` is matched literally inside a LIKE pattern.
pub fn escape_like(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        if matches!(ch, '\\' | '%' | '_') {
            out.push('\\');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MatchingConfig;

    fn filter() -> SettingsFilter {
        MatchingConfig::default().settings_filter()
    }

    #[test]
    fn test_accepts_path_like_values() {
        assert!(filter().accepts("reportfolder", r"\\fileserver\reports"));
        assert!(filter().accepts("ArchiveRoot", r"D:\archive\${year}"));
    }

    #[test]
    fn test_rejects_values_without_marker() {
        assert!(!filter().accepts("reportfolder", "/data/reports"));
    }

    #[test]
    fn test_rejects_excluded_and_reserved_names() {
        assert!(!filter().accepts("ReportPath", r"\\fileserver\reports"));
        assert!(!filter().accepts("UploadFolder", r"\\fileserver\uploads"));
        // only the exact reserved name is rejected
        assert!(filter().accepts("uploadfolder2", r"\\fileserver\uploads"));
    }

    #[test]
    fn test_rejects_uri_values() {
        let f = SettingsFilter {
            marker: "csdportal".to_string(),
            ..filter()
        };
        assert!(!f.accepts("portal", "http://csdportal/x"));
        assert!(!f.accepts("db", "JDBC:sqlserver://csdportal;db=x"));
        assert!(f.accepts("share", r"\\csdportal\share"));
    }

    #[test]
    fn test_default_filter_drops_uri_values_carrying_the_marker() {
        assert!(!filter().accepts("portal", r"http://csdportal/x\y"));
        assert!(!filter().accepts("db", r"jdbc:sqlserver://srv\inst;db=x"));
        assert!(filter().accepts("portal", r"\\csdportal\x"));
    }

    #[test]
    fn test_escape_like() {
        assert_eq!(escape_like(r"\"), r"\\");
        assert_eq!(escape_like("100%_done"), r"100\%\_done");
        assert_eq!(escape_like("plain"), "plain");
    }
}
