//! Decides which record source, if any, owns a file path.
//!
//! Sources are tried in a fixed priority order and the first hit wins:
//!
//! 1. direct links, exact path match
//! 2. root locations, prefix match in load order
//! 3. settings, prefix match in name order
//!
//! Prefix scans are linear and stop at the first matching record, so with
//! nested roots the one loaded first wins even when a later one is more
//! specific.

use crate::error::Error;
use crate::model::{LinkRecord, MatchOutcome, RootLocationRecord, SettingRecord};
use crate::path::fold;
use std::collections::HashMap;
use tracing::debug;

/// Exact-path lookup of direct links.
pub trait LinkLookup {
    /// `normalized_path` has already been through [`crate::path::normalize`].
    fn find(&mut self, normalized_path: &str) -> Result<Option<LinkRecord>, Error>;
}

/// Preloaded direct links keyed by folded, normalized path.
#[derive(Debug, Clone, Default)]
pub struct LinkIndex {
    by_path: HashMap<String, LinkRecord>,
}

impl LinkIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns false when a link with the same folded path is already
    /// present; the earlier link is kept.
    pub fn insert(&mut self, link: LinkRecord) -> bool {
        let key = fold(&link.path);
        if self.by_path.contains_key(&key) {
            return false;
        }
        self.by_path.insert(key, link);
        true
    }

    pub fn len(&self) -> usize {
        self.by_path.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_path.is_empty()
    }
}

impl LinkLookup for LinkIndex {
    fn find(&mut self, normalized_path: &str) -> Result<Option<LinkRecord>, Error> {
        Ok(self.by_path.get(&fold(normalized_path)).cloned())
    }
}

pub struct Matcher<L> {
    links: L,
    roots: Vec<RootLocationRecord>,
    settings: Vec<SettingRecord>,
}

impl<L: LinkLookup> Matcher<L> {
    pub fn new(links: L, roots: Vec<RootLocationRecord>, settings: Vec<SettingRecord>) -> Self {
        Matcher {
            links,
            roots,
            settings,
        }
    }

    /// Classify one normalized file path.
    ///
    /// Only the direct-link lookup can fail; the prefix scans are pure.
    pub fn classify(&mut self, normalized_path: &str) -> Result<MatchOutcome, Error> {
        if let Some(link) = self.links.find(normalized_path)? {
            debug!("{} matched file_link {}", normalized_path, link.id);
            return Ok(MatchOutcome::linked(&link));
        }

        let folded = fold(normalized_path);

        if let Some(root) = first_root_match(&self.roots, &folded) {
            debug!("{} matched tree_report {}", normalized_path, root.id);
            return Ok(MatchOutcome::rooted(root));
        }

        if let Some(setting) = first_setting_match(&self.settings, &folded) {
            debug!(
                "{} matched setting {} ({})",
                normalized_path, setting.id, setting.name
            );
            return Ok(MatchOutcome::setting(setting));
        }

        Ok(MatchOutcome::unmatched())
    }
}

pub fn first_root_match<'a>(
    roots: &'a [RootLocationRecord],
    folded_path: &str,
) -> Option<&'a RootLocationRecord> {
    roots.iter().find(|root| root.root_prefix.matches(folded_path))
}

pub fn first_setting_match<'a>(
    settings: &'a [SettingRecord],
    folded_path: &str,
) -> Option<&'a SettingRecord> {
    settings
        .iter()
        .find(|setting| setting.path_prefix.matches(folded_path))
}
