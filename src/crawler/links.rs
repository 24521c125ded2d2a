//! Detail-link discovery across the paginated search results

use crate::config::FailurePolicy;
use crate::crawler::fetcher::{fetch_with_deadline, PageFetcher};
use crate::crawler::markup::MarkupProfile;
use crate::crawler::pacer::Pacer;
use crate::crawler::pagination::resolve_page_count;
use crate::output::JobLink;
use crate::url::SearchQuery;
use crate::FetchError;
use scraper::Html;
use std::collections::HashSet;
use std::time::Duration;

/// One fetched page of search results
#[derive(Debug, Clone)]
pub struct ListingPage {
    /// 1-based page index
    pub page_number: u32,
    pub html_content: String,
}

/// Walks every listing page of a search and gathers detail-page links
#[derive(Debug, Clone)]
pub struct LinkCollector {
    markup: MarkupProfile,
    on_failure: FailurePolicy,
    fetch_timeout: Duration,
}

impl LinkCollector {
    pub fn new(markup: MarkupProfile, on_failure: FailurePolicy, fetch_timeout: Duration) -> Self {
        Self {
            markup,
            on_failure,
            fetch_timeout,
        }
    }

    /// Collects the distinct detail-page links of a search
    ///
    /// The first results page is fetched to learn the page count, then
    /// every page from 1 to that count is fetched in turn, honoring the
    /// pacer between requests. Links are deduplicated by exact string and
    /// returned in the order they were first discovered.
    ///
    /// # Errors
    ///
    /// A failure on the first page always aborts. Failures on numbered pages
    /// abort under `FailurePolicy::Abort` and are skipped under
    /// `FailurePolicy::Skip`.
    pub async fn collect(
        &self,
        query: &SearchQuery,
        fetcher: &dyn PageFetcher,
        pacer: &mut Pacer,
    ) -> Result<Vec<JobLink>, FetchError> {
        let first_url = query.first_page_url();
        pacer.wait_turn().await;
        tracing::info!("Opening search results: {}", first_url);
        let first_html = fetch_with_deadline(fetcher, first_url.as_str(), self.fetch_timeout).await?;

        let page_count = resolve_page_count(&first_html, &self.markup);
        tracing::info!("Found {} pages of job listings", page_count);

        let mut links = LinkSet::default();

        for page_number in 1..=page_count {
            let page_url = query.page_url(page_number);
            pacer.wait_turn().await;
            tracing::info!(
                "Scraping job links from page {}/{}: {}",
                page_number,
                page_count,
                page_url
            );

            let html_content =
                match fetch_with_deadline(fetcher, page_url.as_str(), self.fetch_timeout).await {
                    Ok(html) => html,
                    Err(e) if self.on_failure == FailurePolicy::Skip => {
                        tracing::warn!("Skipping listing page {}: {}", page_number, e);
                        continue;
                    }
                    Err(e) => return Err(e),
                };

            let page = ListingPage {
                page_number,
                html_content,
            };

            let mut added = 0;
            for href in self.extract_detail_links(&page) {
                if links.insert(href) {
                    added += 1;
                }
            }
            tracing::debug!(
                "Page {} yielded {} new job links",
                page.page_number,
                added
            );
        }

        tracing::info!("Found {} unique job links", links.len());
        Ok(links.into_links())
    }

    /// Returns the hrefs on a listing page that match the detail-page shape
    pub fn extract_detail_links(&self, page: &ListingPage) -> Vec<String> {
        let document = Html::parse_document(&page.html_content);

        document
            .select(&self.markup.anchor)
            .filter_map(|element| element.value().attr("href"))
            .filter(|href| self.markup.detail_link.is_match(href))
            .map(str::to_string)
            .collect()
    }
}

/// Insertion-ordered set of links keyed by the exact URL string
#[derive(Debug, Default)]
struct LinkSet {
    seen: HashSet<String>,
    ordered: Vec<JobLink>,
}

impl LinkSet {
    fn insert(&mut self, url: String) -> bool {
        if self.seen.contains(&url) {
            return false;
        }
        self.seen.insert(url.clone());
        self.ordered.push(JobLink { url });
        true
    }

    fn len(&self) -> usize {
        self.ordered.len()
    }

    fn into_links(self) -> Vec<JobLink> {
        self.ordered
    }
}
