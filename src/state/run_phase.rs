//! Run phase definitions for the crawl coordinator
//!
//! A run moves forward through the pipeline phases. `Cleanup` can be entered
//! from any phase, including after a failure, and is always the last one.
use std::fmt;

/// Represents the current phase of a crawl run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RunPhase {
    /// Fetch session open, nothing fetched yet
    Init,

    /// Detail links gathered from every listing page
    LinksCollected,

    /// Every detail page fetched and extracted
    DetailsScraped,

    /// Report handed to the exporter
    ReportExported,

    /// Notification composed and handed to the mail transport
    Notified,

    /// Pipeline finished
    Done,

    /// Fetch session released
    Cleanup,
}

impl RunPhase {
    /// Returns true if the run may move from this phase to `next`
    pub fn can_transition_to(&self, next: RunPhase) -> bool {
        if next == Self::Cleanup {
            return *self != Self::Cleanup;
        }

        matches!(
            (self, next),
            (Self::Init, Self::LinksCollected)
                | (Self::LinksCollected, Self::DetailsScraped)
                | (Self::DetailsScraped, Self::ReportExported)
                | (Self::ReportExported, Self::Notified)
                | (Self::ReportExported, Self::Done)
                | (Self::Notified, Self::Done)
        )
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Init => "init",
            Self::LinksCollected => "links_collected",
            Self::DetailsScraped => "details_scraped",
            Self::ReportExported => "report_exported",
            Self::Notified => "notified",
            Self::Done => "done",
            Self::Cleanup => "cleanup",
        }
    }
}

impl fmt::Display for RunPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
