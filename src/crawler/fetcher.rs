//! Fetch session
//!
//! This module defines the `PageFetcher` seam the crawler pulls HTML through
//! and the reqwest-backed session used in production. The session is a single
//! resource owned by the coordinator; it is released exactly once when the
//! run ends, whatever the outcome.

use crate::config::ScraperConfig;
use crate::{FetchError, FetchResult};
use async_trait::async_trait;
use reqwest::{Client, Proxy};
use std::time::Duration;

/// Browser-like identification used when the configuration sets none
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0 Safari/537.36";

/// Source of rendered page HTML
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Fetches the page at `url` and returns its HTML
    async fn fetch(&self, url: &str) -> FetchResult<String>;

    /// Releases the underlying session; later fetches fail with
    /// `FetchError::Session`
    async fn release(&mut self);
}

/// Fetches a page, failing with `FetchError::Timeout` once `deadline` passes
///
/// This bounds every fetch regardless of the session's own timeouts, so a
/// stalled page is handled by the run's failure policy like any other
/// failed fetch.
pub async fn fetch_with_deadline(
    fetcher: &dyn PageFetcher,
    url: &str,
    deadline: Duration,
) -> FetchResult<String> {
    match tokio::time::timeout(deadline, fetcher.fetch(url)).await {
        Ok(result) => result,
        Err(_) => Err(FetchError::Timeout {
            url: url.to_string(),
        }),
    }
}

/// Builds an HTTP client from the scraper configuration
///
/// # Arguments
///
/// * `config` - The scraper configuration (user agent, proxy, timeout)
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(reqwest::Error)` - Failed to build client, e.g. an unusable proxy
///
/// # Example
///
/// ```no_run
/// use job_ad_scout::config::load_config;
/// use job_ad_scout::crawler::build_http_client;
/// use std::path::Path;
///
/// let config = load_config(Path::new("config.toml")).unwrap();
/// let client = build_http_client(&config.scraper).unwrap();
/// ```
pub fn build_http_client(config: &ScraperConfig) -> Result<Client, reqwest::Error> {
    let user_agent = config
        .user_agent
        .clone()
        .unwrap_or_else(|| DEFAULT_USER_AGENT.to_string());

    let mut builder = Client::builder()
        .user_agent(user_agent)
        .timeout(Duration::from_secs(config.fetch_timeout_secs))
        .connect_timeout(Duration::from_secs(10))
        .cookie_store(true)
        .gzip(true)
        .brotli(true);

    if let Some(proxy) = &config.proxy {
        builder = builder.proxy(Proxy::all(proxy.as_str())?);
    }

    builder.build()
}

/// Fetch session backed by a reqwest client
pub struct HttpFetcher {
    client: Option<Client>,
}

impl HttpFetcher {
    /// Opens a fetch session for the given scraper configuration
    pub fn new(config: &ScraperConfig) -> Result<Self, reqwest::Error> {
        Ok(Self::with_client(build_http_client(config)?))
    }

    pub fn with_client(client: Client) -> Self {
        Self {
            client: Some(client),
        }
    }

    /// Returns true while the session can still fetch pages
    pub fn is_open(&self) -> bool {
        self.client.is_some()
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> FetchResult<String> {
        let client = self
            .client
            .as_ref()
            .ok_or_else(|| FetchError::Session("fetch session already released".to_string()))?;

        let response = client.get(url).send().await.map_err(|e| {
            if e.is_timeout() {
                FetchError::Timeout {
                    url: url.to_string(),
                }
            } else {
                FetchError::Http {
                    url: url.to_string(),
                    source: e,
                }
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        response.text().await.map_err(|e| {
            if e.is_timeout() {
                FetchError::Timeout {
                    url: url.to_string(),
                }
            } else {
                FetchError::Body {
                    url: url.to_string(),
                    source: e,
                }
            }
        })
    }

    async fn release(&mut self) {
        if self.client.take().is_some() {
            tracing::debug!("HTTP fetch session released");
        }
    }
}
