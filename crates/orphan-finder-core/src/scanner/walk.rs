use crate::error::Error;
use crate::model::FileDescriptor;
use crate::path::normalize;
use chrono::{DateTime, Utc};
use glob::Pattern;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::UNIX_EPOCH;
use tracing::error;
use walkdir::{DirEntry, WalkDir};

/// Lazy, single-pass traversal yielding one [`FileDescriptor`] per
/// non-directory entry under a root.
///
/// Errors on the root itself come out as [`Error::RootAccess`]; errors on
/// anything below it come out as [`Error::Walk`] and the walk carries on.
pub struct FileWalk {
    root: PathBuf,
    entries: Box<dyn Iterator<Item = walkdir::Result<DirEntry>>>,
}

impl FileWalk {
    /// Fails with [`Error::RootAccess`] when `root` cannot be stat'ed.
    pub fn new(root: &Path, ignore_globs: &[String]) -> Result<Self, Error> {
        fs::metadata(root).map_err(|source| Error::RootAccess {
            path: root.to_path_buf(),
            source,
        })?;

        let ignore_patterns: Vec<Pattern> = ignore_globs
            .iter()
            .filter_map(|glob| match Pattern::new(glob) {
                Ok(p) => Some(p),
                Err(e) => {
                    error!("Invalid glob pattern '{}': {}", glob, e);
                    None
                }
            })
            .collect();

        let entries = WalkDir::new(root)
            .into_iter()
            .filter_entry(move |entry| {
                entry.depth() == 0
                    || !ignore_patterns
                        .iter()
                        .any(|pattern| pattern.matches_path(entry.path()))
            });

        Ok(FileWalk {
            root: root.to_path_buf(),
            entries: Box::new(entries),
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn describe(entry: &DirEntry) -> Result<FileDescriptor, Error> {
        let metadata = entry.metadata()?;
        let last_modified = metadata
            .modified()
            .map(DateTime::<Utc>::from)
            .unwrap_or_else(|_| DateTime::<Utc>::from(UNIX_EPOCH));
        Ok(FileDescriptor {
            path: normalize(&entry.path().to_string_lossy()),
            size: metadata.len(),
            last_modified,
        })
    }
}

impl Iterator for FileWalk {
    type Item = Result<FileDescriptor, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let entry = match self.entries.next()? {
                Ok(entry) => entry,
                Err(err) if err.depth() == 0 => {
                    let source = err
                        .into_io_error()
                        .unwrap_or_else(|| std::io::Error::other("filesystem loop at root"));
                    return Some(Err(Error::RootAccess {
                        path: self.root.clone(),
                        source,
                    }));
                }
                Err(err) => return Some(Err(Error::Walk(err))),
            };

            if entry.file_type().is_dir() {
                continue;
            }
            return Some(Self::describe(&entry));
        }
    }
}
