mod commands;
mod logging;
mod progress;

use std::path::Path;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use colored::*;
use commands::{Cli, Commands};
use dotenv::dotenv;
use orphan_finder_core::config::{self, AppConfig};
use orphan_finder_core::storage::ResultStore;
use orphan_finder_core::{report, ReconcileEngine, RunSummary};
use progress::CliReporter;
use tracing::{error, info};

fn main() -> ExitCode {
    dotenv().ok();

    let args = Cli::parse();
    let _guard = logging::init_logger(args.verbose);

    let config = match config::load_configuration() {
        Ok(config) => config,
        Err(err) => {
            error!("Error loading configuration: {}", err);
            return ExitCode::FAILURE;
        }
    };

    let outcome = match args.command {
        Some(Commands::Scan {
            root,
            database_url,
            results_db,
        }) => {
            let mut config = config;
            if database_url.is_some() {
                config.database_url = database_url;
            }
            if let Some(results_db) = results_db {
                config.results_db = results_db;
            }
            run_scan(config, &root)
        }
        Some(Commands::Report { results_db, csv }) => {
            let results_db = results_db.unwrap_or(config.results_db);
            run_report(&results_db, csv.as_deref())
        }
        Some(Commands::PrintConfig) => {
            print_config(&config);
            Ok(())
        }
        None => {
            let _ = Cli::command().print_long_help();
            Ok(())
        }
    };

    match outcome {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("Error: {:#}", err);
            ExitCode::FAILURE
        }
    }
}

fn run_scan(config: AppConfig, root: &Path) -> Result<()> {
    let results_db = config.results_db.clone();
    let engine = ReconcileEngine::new(config);
    let reporter = CliReporter::new();
    let summary = engine
        .run(root, &reporter)
        .with_context(|| format!("reconciliation of {} aborted", root.display()))?;

    println!();
    println!("{}", summary_line(&summary, &results_db));
    if summary.files_failed > 0 || summary.entries_skipped > 0 {
        info!(
            "{} files could not be classified or stored, {} entries could not be read",
            format!("{}", summary.files_failed).yellow(),
            format!("{}", summary.entries_skipped).yellow(),
        );
    }

    Ok(())
}

fn summary_line(summary: &RunSummary, results_db: &str) -> String {
    format!(
        "File search completed. Processed {} files, found {} orphaned files. Results stored in {}",
        format!("{}", summary.files_processed).green(),
        format!("{}", summary.files_orphaned).red(),
        results_db.cyan(),
    )
}

fn run_report(results_db: &str, csv: Option<&Path>) -> Result<()> {
    let store = ResultStore::open(results_db)
        .with_context(|| format!("cannot open results database {}", results_db))?;

    if let Some(run) = store.latest_run()? {
        info!(
            "Last run #{} of {}: {} ({} files, {} orphaned)",
            run.id,
            run.root,
            run.status,
            run.files_processed,
            run.files_orphaned,
        );
    }

    for count in store.source_counts()? {
        let label = if count.table_name.is_empty() {
            "orphaned".red()
        } else {
            count.table_name.as_str().green()
        };
        println!("{:>12}  {}", count.files, label);
    }

    if let Some(csv_path) = csv {
        let exported = report::export_orphans_csv(&store, csv_path)
            .with_context(|| format!("cannot write {}", csv_path.display()))?;
        println!("Exported {} orphaned files to {}", exported, csv_path.display());
    }

    Ok(())
}

fn print_config(config: &AppConfig) {
    let database_url = config
        .resolved_database_url()
        .map(|url| config::mask_url(&url))
        .unwrap_or_else(|| "<not set>".to_string());
    println!("database_url: {}", database_url);
    println!("results_db: {}", config.results_db);
    println!("ignore_patterns: {:?}", config.ignore_patterns);
    println!("matching: {:?}", config.matching);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_line() {
        colored::control::set_override(false);
        let summary = RunSummary {
            files_processed: 6,
            files_orphaned: 2,
            ..RunSummary::default()
        };
        assert_eq!(
            summary_line(&summary, "out.db"),
            "File search completed. Processed 6 files, found 2 orphaned files. Results stored in out.db"
        );
    }
}
