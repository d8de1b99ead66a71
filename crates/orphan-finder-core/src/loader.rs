//! One-shot loading of match targets from a [`RecordSource`].
//!
//! Any fetch error aborts loading; a partially loaded set would turn owned
//! files into false orphans.

use crate::config::MatchingConfig;
use crate::error::Error;
use crate::matcher::{LinkIndex, Matcher};
use crate::model::{LinkRecord, RootLocationRecord, SettingRecord};
use crate::path::{normalize, PathPrefix};
use crate::source::{RecordSource, SettingsFilter};
use tracing::{debug, info};

/// Everything a run matches against, loaded once before the walk.
#[derive(Debug, Clone, Default)]
pub struct LoadedRecords {
    pub links: LinkIndex,
    pub roots: Vec<RootLocationRecord>,
    pub settings: Vec<SettingRecord>,
}

impl LoadedRecords {
    pub fn into_matcher(self) -> Matcher<LinkIndex> {
        Matcher::new(self.links, self.roots, self.settings)
    }
}

pub fn load_all<R>(source: &mut R, matching: &MatchingConfig) -> Result<LoadedRecords, Error>
where
    R: RecordSource + ?Sized,
{
    let links = load_links(source)?;
    let roots = load_root_locations(source, matching.min_prefix_len)?;
    let settings = load_settings(source, &matching.settings_filter(), matching.min_prefix_len)?;
    info!(
        "Loaded {} file links, {} root locations, {} settings",
        links.len(),
        roots.len(),
        settings.len()
    );
    Ok(LoadedRecords {
        links,
        roots,
        settings,
    })
}

pub fn load_links<R>(source: &mut R) -> Result<LinkIndex, Error>
where
    R: RecordSource + ?Sized,
{
    let mut index = LinkIndex::new();
    for row in source.fetch_file_links()? {
        let path = normalize(&row.path);
        if path.is_empty() {
            debug!("Skipping file_link {} with empty path", row.id);
            continue;
        }
        let id = i64::from(row.id);
        if !index.insert(LinkRecord {
            id,
            path,
            module: row.module,
        }) {
            debug!("Skipping file_link {}: path already linked", id);
        }
    }
    Ok(index)
}

/// Valid root locations in arrival order.
pub fn load_root_locations<R>(source: &mut R, min_len: usize) -> Result<Vec<RootLocationRecord>, Error>
where
    R: RecordSource + ?Sized,
{
    let rows = source.fetch_tree_reports()?;
    let mut roots = Vec::with_capacity(rows.len());
    for row in rows {
        let raw = row.rootlocation.unwrap_or_default();
        match PathPrefix::parse(&raw, min_len) {
            Some(root_prefix) => roots.push(RootLocationRecord {
                id: i64::from(row.id),
                root_prefix,
            }),
            None => debug!("Skipping invalid root location: {} (ID: {})", raw, row.id),
        }
    }
    debug!("Loaded {} valid tree reports", roots.len());
    Ok(roots)
}

/// Valid path-bearing settings, ordered by name.
pub fn load_settings<R>(
    source: &mut R,
    filter: &SettingsFilter,
    min_len: usize,
) -> Result<Vec<SettingRecord>, Error>
where
    R: RecordSource + ?Sized,
{
    let mut rows = source.fetch_settings(filter)?;
    rows.sort_by(|a, b| a.name.cmp(&b.name));

    let mut settings = Vec::with_capacity(rows.len());
    for row in rows {
        let Some(value) = row.value else {
            continue;
        };
        if !filter.accepts(&row.name, &value) {
            debug!("Skipping setting {} ({}): filtered out", row.name, row.id);
            continue;
        }
        match PathPrefix::parse(&value, min_len) {
            Some(path_prefix) => settings.push(SettingRecord {
                id: i64::from(row.id),
                name: row.name,
                path_prefix,
            }),
            None => debug!("Skipping invalid setting location: {} ({})", value, row.name),
        }
    }
    debug!("Loaded {} valid settings", settings.len());
    Ok(settings)
}
