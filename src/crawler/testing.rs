//! In-memory fetch session for unit tests

use crate::crawler::PageFetcher;
use crate::{FetchError, FetchResult};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Instant;

/// Serves canned HTML by exact URL and records every request
#[derive(Default)]
pub struct StaticFetcher {
    pages: HashMap<String, String>,
    requests: Arc<Mutex<Vec<String>>>,
    fetched_at: Arc<Mutex<Vec<Instant>>>,
    releases: Arc<AtomicUsize>,
}

impl StaticFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_page(mut self, url: impl Into<String>, html: impl Into<String>) -> Self {
        self.pages.insert(url.into(), html.into());
        self
    }

    /// Shared view of the URLs requested so far
    pub fn requests(&self) -> Arc<Mutex<Vec<String>>> {
        Arc::clone(&self.requests)
    }

    /// Shared view of when each request arrived, in request order
    pub fn fetched_at(&self) -> Arc<Mutex<Vec<Instant>>> {
        Arc::clone(&self.fetched_at)
    }

    /// Shared counter of `release` calls
    pub fn releases(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.releases)
    }
}

#[async_trait]
impl PageFetcher for StaticFetcher {
    async fn fetch(&self, url: &str) -> FetchResult<String> {
        self.requests.lock().unwrap().push(url.to_string());
        self.fetched_at.lock().unwrap().push(Instant::now());
        self.pages
            .get(url)
            .cloned()
            .ok_or_else(|| FetchError::Status {
                url: url.to_string(),
                status: 404,
            })
    }

    async fn release(&mut self) {
        self.releases.fetch_add(1, Ordering::SeqCst);
    }
}
