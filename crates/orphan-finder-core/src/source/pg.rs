use super::schema::{file_link, settings, tree_report};
use super::{escape_like, FileLinkRow, RecordSource, SettingRow, SettingsFilter, TreeReportRow};
use crate::error::Error;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use tracing::debug;

/// Record source backed by the PostgreSQL record database.
///
/// The connection closes when the source is dropped.
pub struct PgRecordSource {
    conn: PgConnection,
}

impl PgRecordSource {
    pub fn connect(database_url: &str) -> Result<Self, Error> {
        let conn = PgConnection::establish(database_url)?;
        debug!("Connected to record database");
        Ok(PgRecordSource { conn })
    }
}

impl RecordSource for PgRecordSource {
    fn fetch_file_links(&mut self) -> Result<Vec<FileLinkRow>, Error> {
        let rows = file_link::table
            .select((file_link::id, file_link::path, file_link::module))
            .load::<FileLinkRow>(&mut self.conn)?;
        debug!("Fetched {} file_link rows", rows.len());
        Ok(rows)
    }

    fn fetch_tree_reports(&mut self) -> Result<Vec<TreeReportRow>, Error> {
        let rows = tree_report::table
            .select((tree_report::id, tree_report::rootlocation))
            .load::<TreeReportRow>(&mut self.conn)?;
        debug!("Fetched {} tree_report rows", rows.len());
        Ok(rows)
    }

    fn fetch_settings(&mut self, filter: &SettingsFilter) -> Result<Vec<SettingRow>, Error> {
        let mut query = settings::table
            .select((settings::id, settings::name, settings::value))
            .filter(settings::value.ilike(format!("%{}%", escape_like(&filter.marker))))
            .filter(settings::name.not_ilike(escape_like(&filter.reserved_name)))
            .into_boxed();

        if !filter.excluded_name.is_empty() {
            query = query.filter(
                settings::name.not_ilike(format!("%{}%", escape_like(&filter.excluded_name))),
            );
        }
        for scheme in &filter.excluded_schemes {
            query = query.filter(settings::value.not_ilike(format!("{}%", escape_like(scheme))));
        }

        let rows = query
            .order(settings::name.asc())
            .load::<SettingRow>(&mut self.conn)?;
        debug!("Fetched {} settings rows", rows.len());
        Ok(rows)
    }
}
