use crate::error::Error;
use crate::storage::models::StoredResult;
use crate::storage::ResultStore;
use csv::Writer;
use std::io::Write;
use std::path::Path;
use tracing::info;

/// Write the stored orphaned files as CSV to `path`. Returns the row count.
pub fn export_orphans_csv(store: &ResultStore, path: &Path) -> Result<usize, Error> {
    let orphans = store.orphaned_files()?;
    let writer = Writer::from_path(path)?;
    let count = write_orphans(writer, &orphans)?;
    info!("Exported {} orphaned files to {}", count, path.display());
    Ok(count)
}

pub fn write_orphans<W: Write>(mut writer: Writer<W>, orphans: &[StoredResult]) -> Result<usize, Error> {
    writer.write_record(["path", "size", "last_modified"])?;
    for orphan in orphans {
        writer.write_record([
            orphan.path.as_str(),
            orphan.size.to_string().as_str(),
            orphan.last_modified.as_str(),
        ])?;
    }
    writer.flush()?;
    Ok(orphans.len())
}
