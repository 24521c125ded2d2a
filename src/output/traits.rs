//! Export collaborator interface
//!
//! The coordinator hands the finished report to a `ReportExporter`; the
//! tabular format lives behind this trait.

use crate::output::report::CrawlReport;
use std::path::Path;
use thiserror::Error;

/// Errors that can occur during output operations
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;

/// Writes a crawl report to a file
pub trait ReportExporter: Send + Sync {
    /// Writes `report` to `path`, replacing any existing file
    ///
    /// # Arguments
    ///
    /// * `report` - The report, rows in crawl order
    /// * `path` - Destination file
    fn export(&self, report: &CrawlReport, path: &Path) -> OutputResult<()>;
}
