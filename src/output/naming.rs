//! Report file naming

use chrono::{DateTime, Utc};
use std::path::{Path, PathBuf};

/// Builds the report file name `<keyword><unix-millis><suffix>`
///
/// The millisecond timestamp makes each run's file unique. Path separators
/// in the keyword are replaced so the name stays a single path component.
///
/// # Examples
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use job_ad_scout::output::report_file_name;
///
/// let at = Utc.timestamp_millis_opt(1_700_000_000_123).unwrap();
/// assert_eq!(report_file_name("clerk", "_jobs.csv", at), "clerk1700000000123_jobs.csv");
/// ```
pub fn report_file_name(keyword: &str, suffix: &str, at: DateTime<Utc>) -> String {
    let keyword: String = keyword
        .trim()
        .chars()
        .map(|c| if matches!(c, '/' | '\\') { '_' } else { c })
        .collect();
    format!("{}{}{}", keyword, at.timestamp_millis(), suffix)
}

/// Full path of the report file inside `output_dir`
pub fn report_path(output_dir: &str, keyword: &str, suffix: &str, at: DateTime<Utc>) -> PathBuf {
    Path::new(output_dir).join(report_file_name(keyword, suffix, at))
}
