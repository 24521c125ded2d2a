use crate::config::ScraperConfig;
use crate::ScoutError;
use url::Url;

/// Query parameter carrying the search keyword
const KEYWORD_PARAM: &str = "Keyword";

/// Query parameter carrying the 1-based listing page index
const PAGE_PARAM: &str = "Page";

/// A keyword search against the job board, fixed for the whole run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    base_url: Url,
    keyword: String,
}

impl SearchQuery {
    /// Creates a search query from a base URL and a keyword
    ///
    /// # Errors
    ///
    /// Returns `ScoutError::UrlParse` if the base URL is malformed.
    ///
    /// # Examples
    ///
    /// ```
    /// use job_ad_scout::url::SearchQuery;
    ///
    /// let query = SearchQuery::new("https://example.com/search", "data analyst").unwrap();
    /// assert_eq!(
    ///     query.first_page_url().as_str(),
    ///     "https://example.com/search?Keyword=data+analyst"
    /// );
    /// assert_eq!(
    ///     query.page_url(3).as_str(),
    ///     "https://example.com/search?Keyword=data+analyst&Page=3"
    /// );
    /// ```
    pub fn new(base_url: &str, keyword: &str) -> Result<Self, ScoutError> {
        Ok(Self {
            base_url: Url::parse(base_url)?,
            keyword: keyword.to_string(),
        })
    }

    /// Creates the search query described by the scraper configuration
    pub fn from_config(config: &ScraperConfig) -> Result<Self, ScoutError> {
        Self::new(&config.base_url, &config.keyword)
    }

    pub fn keyword(&self) -> &str {
        &self.keyword
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// URL of the search results without an explicit page index
    pub fn first_page_url(&self) -> Url {
        let mut url = self.base_url.clone();
        url.query_pairs_mut()
            .append_pair(KEYWORD_PARAM, &self.keyword);
        url
    }

    /// URL of the given 1-based listing page
    pub fn page_url(&self, page_number: u32) -> Url {
        let mut url = self.first_page_url();
        url.query_pairs_mut()
            .append_pair(PAGE_PARAM, &page_number.to_string());
        url
    }
}
