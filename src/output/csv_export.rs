//! CSV report export

use crate::output::report::CrawlReport;
use crate::output::traits::{OutputError, OutputResult, ReportExporter};
use std::fs::File;
use std::path::{Path, PathBuf};

/// Header written before the first row, also for an empty report
const HEADER: [&str; 3] = ["Link", "Position", "Emails"];

/// Writes reports as CSV with a `Link,Position,Emails` header
#[derive(Debug, Clone, Copy, Default)]
pub struct CsvExporter;

impl CsvExporter {
    pub fn new() -> Self {
        Self
    }
}

impl ReportExporter for CsvExporter {
    /// Writes the report next to `path` first and renames it into place, so
    /// a failed export leaves no truncated report behind
    fn export(&self, report: &CrawlReport, path: &Path) -> OutputResult<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }

        let partial = partial_path(path);
        let result = write_report(report, &partial)
            .and_then(|()| std::fs::rename(&partial, path).map_err(OutputError::from));

        if let Err(e) = result {
            if let Err(cleanup) = std::fs::remove_file(&partial) {
                tracing::debug!("No partial report to remove at {}: {}", partial.display(), cleanup);
            }
            return Err(e);
        }

        tracing::info!("Saved {} job details to {}", report.len(), path.display());
        Ok(())
    }
}

fn write_report(report: &CrawlReport, path: &Path) -> OutputResult<()> {
    let file = File::create(path)?;
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(file);

    writer.write_record(HEADER)?;
    for row in report.rows() {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}

/// Hidden sibling of `path` the report is written to before the rename
fn partial_path(path: &Path) -> PathBuf {
    let name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "report".to_string());
    path.with_file_name(format!(".{}.partial", name))
}
