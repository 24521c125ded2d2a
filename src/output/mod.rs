//! Output module for crawl reports and notifications
//!
//! This module handles:
//! - Assembling scraped job details into a report
//! - Exporting the report as a tabular file
//! - Composing and sending the completion notification

mod csv_export;
mod naming;
pub mod notify;
mod report;
mod traits;

pub use csv_export::CsvExporter;
pub use naming::{report_file_name, report_path};
pub use notify::{compose, Mailer, Notification, NotificationError, SmtpMailer};
pub use report::{
    aggregate, CrawlReport, JobDetail, JobLink, ReportAggregator, ReportRow, NOT_FOUND,
};
pub use traits::{OutputError, OutputResult, ReportExporter};
