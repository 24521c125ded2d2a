//! Crawler module for page fetching and job extraction
//!
//! This module contains the core crawling logic, including:
//! - The fetch session and its per-fetch deadline
//! - Pagination discovery and detail-link collection
//! - Position and contact email extraction
//! - Request pacing
//! - Overall run coordination

mod coordinator;
mod detail;
mod fetcher;
mod links;
mod markup;
mod pacer;
mod pagination;

#[cfg(test)]
pub(crate) mod testing;

pub use coordinator::{run_crawl, Coordinator, RunOutcome};
pub use detail::{DetailExtractor, ExtractedDetail};
pub use fetcher::{
    build_http_client, fetch_with_deadline, HttpFetcher, PageFetcher, DEFAULT_USER_AGENT,
};
pub use links::{LinkCollector, ListingPage};
pub use markup::MarkupProfile;
pub use pacer::Pacer;
pub use pagination::resolve_page_count;
