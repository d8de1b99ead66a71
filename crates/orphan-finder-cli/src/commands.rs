use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "orphan-finder")]
#[command(about = "Find files on disk that no database record points to", long_about = None)]
pub struct Cli {
    /// Enable verbose (debug) output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Classify every file under a root folder against the record database
    Scan {
        /// Root folder to search
        #[arg(short, long)]
        root: PathBuf,
        /// PostgreSQL URL of the record database (overrides configuration)
        #[arg(long)]
        database_url: Option<String>,
        /// Results database file (overrides configuration)
        #[arg(long)]
        results_db: Option<String>,
    },
    /// Summarize the stored classifications
    Report {
        /// Results database file (overrides configuration)
        #[arg(long)]
        results_db: Option<String>,
        /// Also export the orphaned files to this CSV file
        #[arg(long)]
        csv: Option<PathBuf>,
    },
    /// Print configuration values
    PrintConfig,
}
