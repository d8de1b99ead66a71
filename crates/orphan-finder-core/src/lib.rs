pub mod config;
pub mod engine;
pub mod error;
pub mod loader;
pub mod matcher;
pub mod model;
pub mod path;
pub mod progress;
pub mod report;
pub mod scanner;
pub mod source;
pub mod storage;

pub use config::AppConfig;
pub use engine::{reconcile, ClassificationSink, ReconcileEngine, RunSummary};
pub use error::Error;
pub use matcher::Matcher;
pub use progress::{ProgressReporter, SilentReporter};
