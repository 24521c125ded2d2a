//! Crawler coordinator - main run orchestration logic
//!
//! This module sequences one crawl run:
//! - Collecting detail links from every listing page
//! - Scraping each detail page in discovery order
//! - Exporting the report
//! - Sending the completion notification when enabled
//! - Releasing the fetch session on every exit path

use crate::config::{Config, FailurePolicy};
use crate::crawler::detail::DetailExtractor;
use crate::crawler::fetcher::{fetch_with_deadline, HttpFetcher, PageFetcher};
use crate::crawler::links::LinkCollector;
use crate::crawler::markup::MarkupProfile;
use crate::crawler::pacer::Pacer;
use crate::output::{
    compose, report_path, CrawlReport, CsvExporter, JobDetail, JobLink, Mailer, ReportAggregator,
    ReportExporter, SmtpMailer,
};
use crate::state::RunPhase;
use crate::url::SearchQuery;
use crate::ScoutError;
use chrono::Utc;
use std::path::PathBuf;
use std::time::Duration;

/// How a run ended when it did not fail
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    /// The search produced no detail links; nothing was exported
    NoLinks,

    /// The report was exported
    Completed {
        report: CrawlReport,
        output_path: PathBuf,
        /// True if the notification was delivered
        notified: bool,
    },
}

/// Main crawl coordinator
///
/// The coordinator exclusively owns the fetch session for the duration of a
/// run and lends it to the link collector and detail scraping steps.
pub struct Coordinator {
    config: Config,
    query: SearchQuery,
    fetcher: Box<dyn PageFetcher>,
    exporter: Box<dyn ReportExporter>,
    mailer: Box<dyn Mailer>,
    links: LinkCollector,
    extractor: DetailExtractor,
    pacer: Pacer,
    detail_interval: Duration,
    fetch_timeout: Duration,
    phase: RunPhase,
}

impl Coordinator {
    /// Creates a coordinator with the HTTP fetch session, CSV export and
    /// SMTP notification
    ///
    /// # Returns
    ///
    /// * `Ok(Coordinator)` - Ready to run
    /// * `Err(ScoutError)` - The configuration or HTTP client is unusable
    pub fn new(config: Config) -> Result<Self, ScoutError> {
        let fetcher = HttpFetcher::new(&config.scraper)?;
        let mailer = SmtpMailer::from_config(&config.email);
        Self::with_components(
            config,
            Box::new(fetcher),
            Box::new(CsvExporter::new()),
            Box::new(mailer),
        )
    }

    /// Creates a coordinator around the given collaborators
    pub fn with_components(
        config: Config,
        fetcher: Box<dyn PageFetcher>,
        exporter: Box<dyn ReportExporter>,
        mailer: Box<dyn Mailer>,
    ) -> Result<Self, ScoutError> {
        let markup = MarkupProfile::from_overrides(&config.markup)?;
        let query = SearchQuery::from_config(&config.scraper)?;
        let fetch_timeout = Duration::from_secs(config.scraper.fetch_timeout_secs);

        let links = LinkCollector::new(
            markup.clone(),
            config.scraper.on_fetch_failure,
            fetch_timeout,
        );
        let extractor = DetailExtractor::new(markup, config.scraper.text_email_fallback);
        let pacer = Pacer::from_millis(config.scraper.listing_delay_ms, config.scraper.jitter_ms);
        let detail_interval = Duration::from_millis(config.scraper.detail_delay_ms);

        Ok(Self {
            config,
            query,
            fetcher,
            exporter,
            mailer,
            links,
            extractor,
            pacer,
            detail_interval,
            fetch_timeout,
            phase: RunPhase::Init,
        })
    }

    /// Runs the crawl to completion
    ///
    /// The fetch session is released exactly once before this returns,
    /// whether the run succeeded, found nothing, or failed. A failed run
    /// exports nothing.
    pub async fn run(mut self) -> Result<RunOutcome, ScoutError> {
        tracing::info!(
            "Starting crawl for keyword '{}' at {}",
            self.query.keyword(),
            self.query.base_url()
        );

        let result = self.run_pipeline().await;

        if let Err(e) = &result {
            tracing::error!("Run failed after phase {}: {}", self.phase, e);
        }

        self.cleanup().await;
        result
    }

    async fn run_pipeline(&mut self) -> Result<RunOutcome, ScoutError> {
        let links = self
            .links
            .collect(&self.query, self.fetcher.as_ref(), &mut self.pacer)
            .await?;
        self.advance(RunPhase::LinksCollected)?;

        if links.is_empty() {
            tracing::info!("No job links were found to scrape details from");
            return Ok(RunOutcome::NoLinks);
        }

        let report = self.scrape_details(&links).await?;
        self.advance(RunPhase::DetailsScraped)?;

        let output_path = report_path(
            &self.config.scraper.output_dir,
            self.query.keyword(),
            &self.config.scraper.output_file,
            Utc::now(),
        );
        self.exporter.export(&report, &output_path)?;
        self.advance(RunPhase::ReportExported)?;

        let notified = self.notify(&report, &output_path).await?;
        self.advance(RunPhase::Done)?;

        tracing::info!(
            "Crawl completed: {} jobs, {} with contact emails",
            report.len(),
            report.with_emails()
        );

        Ok(RunOutcome::Completed {
            report,
            output_path,
            notified,
        })
    }

    /// Fetches and extracts every detail page, one at a time
    async fn scrape_details(&mut self, links: &[JobLink]) -> Result<CrawlReport, ScoutError> {
        let mut aggregator = ReportAggregator::new();

        // One pacer spans both phases so the first detail fetch still waits
        // after the last listing fetch.
        self.pacer.set_interval(self.detail_interval);

        for (index, link) in links.iter().enumerate() {
            self.pacer.wait_turn().await;
            tracing::info!(
                "Scraping details {}/{} from: {}",
                index + 1,
                links.len(),
                link.url
            );

            let html =
                match fetch_with_deadline(self.fetcher.as_ref(), &link.url, self.fetch_timeout)
                    .await
                {
                    Ok(html) => html,
                    Err(e) if self.config.scraper.on_fetch_failure == FailurePolicy::Skip => {
                        tracing::warn!("Skipping detail page {}: {}", link.url, e);
                        continue;
                    }
                    Err(e) => return Err(e.into()),
                };

            let extracted = self.extractor.extract(&html);
            tracing::debug!(
                "{} -> position '{}', {} emails",
                link.url,
                extracted.position,
                extracted.emails.len()
            );

            aggregator.record(JobDetail::new(
                link.clone(),
                extracted.position,
                extracted.emails,
            ));
        }

        Ok(aggregator.finish())
    }

    /// Sends the completion notification if enabled
    ///
    /// Delivery failures are logged and reported as `Ok(false)`.
    async fn notify(
        &mut self,
        report: &CrawlReport,
        output_path: &std::path::Path,
    ) -> Result<bool, ScoutError> {
        if !self.config.email.enabled {
            tracing::info!("Email sending is disabled");
            return Ok(false);
        }

        let notification = compose(report, &output_path.display().to_string());
        let delivered = match self.mailer.send(&notification).await {
            Ok(()) => true,
            Err(e) => {
                tracing::error!("Failed to send email: {}", e);
                false
            }
        };

        self.advance(RunPhase::Notified)?;
        Ok(delivered)
    }

    /// Releases the fetch session and enters the final phase
    async fn cleanup(&mut self) {
        if self.phase == RunPhase::Cleanup {
            return;
        }

        self.fetcher.release().await;
        self.phase = RunPhase::Cleanup;
        tracing::info!("Fetch session released");
    }

    fn advance(&mut self, next: RunPhase) -> Result<(), ScoutError> {
        if !self.phase.can_transition_to(next) {
            return Err(ScoutError::InvalidTransition {
                from: self.phase,
                to: next,
            });
        }

        tracing::debug!("Run phase {} -> {}", self.phase, next);
        self.phase = next;
        Ok(())
    }
}

/// Runs a complete crawl with the production collaborators
///
/// # Example
///
/// ```no_run
/// use job_ad_scout::config::load_config;
/// use job_ad_scout::crawler::run_crawl;
/// use std::path::Path;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let config = load_config(Path::new("config.toml"))?;
/// let outcome = run_crawl(config).await?;
/// println!("{:?}", outcome);
/// # Ok(())
/// # }
/// ```
pub async fn run_crawl(config: Config) -> Result<RunOutcome, ScoutError> {
    Coordinator::new(config)?.run().await
}
