//! Crawl records and report assembly

use serde::Serialize;

/// Placeholder rendered for a field the page did not provide
pub const NOT_FOUND: &str = "Not Found";

/// A job-detail page URL, exactly as it appeared in the listing markup
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct JobLink {
    pub url: String,
}

impl JobLink {
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }
}

/// Fields extracted from one detail page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobDetail {
    pub link: JobLink,

    /// Position title, or "Not Found"
    pub position: String,

    /// Contact addresses without duplicates; empty when none were listed
    pub emails: Vec<String>,
}

impl JobDetail {
    pub fn new(link: JobLink, position: impl Into<String>, emails: Vec<String>) -> Self {
        Self {
            link,
            position: position.into(),
            emails,
        }
    }

    /// Emails joined for export, or "Not Found" when there are none
    pub fn emails_display(&self) -> String {
        if self.emails.is_empty() {
            NOT_FOUND.to_string()
        } else {
            self.emails.join(", ")
        }
    }
}

/// One exported line of the report
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportRow {
    #[serde(rename = "Link")]
    pub link: String,

    #[serde(rename = "Position")]
    pub position: String,

    #[serde(rename = "Emails")]
    pub emails: String,
}

impl From<&JobDetail> for ReportRow {
    fn from(detail: &JobDetail) -> Self {
        Self {
            link: detail.link.url.clone(),
            position: detail.position.clone(),
            emails: detail.emails_display(),
        }
    }
}

/// Job details in the order they were scraped
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CrawlReport {
    details: Vec<JobDetail>,
}

impl CrawlReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.details.len()
    }

    pub fn is_empty(&self) -> bool {
        self.details.is_empty()
    }

    pub fn details(&self) -> &[JobDetail] {
        &self.details
    }

    /// Number of details that listed at least one contact address
    pub fn with_emails(&self) -> usize {
        self.details.iter().filter(|d| !d.emails.is_empty()).count()
    }

    /// Export rows, one per detail, in crawl order
    pub fn rows(&self) -> Vec<ReportRow> {
        self.details.iter().map(ReportRow::from).collect()
    }
}

/// Assembles scraped details into a report
///
/// Details are kept in the order they are recorded. Links were already
/// deduplicated upstream, so no further dedup or sorting happens here.
#[derive(Debug, Default)]
pub struct ReportAggregator {
    details: Vec<JobDetail>,
}

impl ReportAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, detail: JobDetail) {
        self.details.push(detail);
    }

    pub fn finish(self) -> CrawlReport {
        CrawlReport {
            details: self.details,
        }
    }
}

/// Builds a report from details already in crawl order
pub fn aggregate(details: impl IntoIterator<Item = JobDetail>) -> CrawlReport {
    let mut aggregator = ReportAggregator::new();
    for detail in details {
        aggregator.record(detail);
    }
    aggregator.finish()
}
