use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Results database error: {0}")]
    Store(#[from] rusqlite::Error),

    #[error("Record source query failed: {0}")]
    Source(#[from] diesel::result::Error),

    #[error("Record source connection failed: {0}")]
    Connection(#[from] diesel::ConnectionError),

    #[error("Cannot access root folder {}: {source}", path.display())]
    RootAccess {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Directory walk error: {0}")]
    Walk(#[from] walkdir::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("{0}")]
    Other(String),
}
