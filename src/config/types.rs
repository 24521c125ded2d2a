use serde::Deserialize;

/// Main configuration structure for Job-Ad-Scout
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub scraper: ScraperConfig,
    #[serde(default)]
    pub markup: MarkupOverrides,
    #[serde(default)]
    pub email: EmailConfig,
}

/// What to do when a listing or detail page cannot be fetched
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FailurePolicy {
    /// Fail the whole run on the first fetch error
    #[default]
    Abort,
    /// Log the failure and continue with the next page
    Skip,
}

/// Search and crawl behavior configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ScraperConfig {
    /// Search page URL, without query parameters
    #[serde(rename = "base-url", alias = "base_url")]
    pub base_url: String,

    /// Search keyword sent as the `Keyword` query parameter
    pub keyword: String,

    /// Optional proxy handed to the HTTP client
    #[serde(default)]
    pub proxy: Option<String>,

    /// Suffix appended to `<keyword><timestamp>` to name the report file
    #[serde(rename = "output-file", alias = "output_file")]
    pub output_file: String,

    /// Directory the report is written into
    #[serde(rename = "output-dir", alias = "output_dir", default = "default_output_dir")]
    pub output_dir: String,

    /// Minimum time between listing page requests (milliseconds)
    #[serde(
        rename = "listing-delay-ms",
        alias = "listing_delay_ms",
        default = "default_listing_delay_ms"
    )]
    pub listing_delay_ms: u64,

    /// Minimum time between detail page requests (milliseconds)
    #[serde(
        rename = "detail-delay-ms",
        alias = "detail_delay_ms",
        default = "default_detail_delay_ms"
    )]
    pub detail_delay_ms: u64,

    /// Upper bound of the random delay added to each interval (milliseconds)
    #[serde(rename = "jitter-ms", alias = "jitter_ms", default)]
    pub jitter_ms: u64,

    /// Deadline for a single page fetch (seconds)
    #[serde(
        rename = "fetch-timeout-secs",
        alias = "fetch_timeout_secs",
        default = "default_fetch_timeout_secs"
    )]
    pub fetch_timeout_secs: u64,

    #[serde(rename = "on-fetch-failure", alias = "on_fetch_failure", default)]
    pub on_fetch_failure: FailurePolicy,

    /// Also scan the contact block's text for bare email addresses
    #[serde(rename = "text-email-fallback", alias = "text_email_fallback", default)]
    pub text_email_fallback: bool,

    #[serde(rename = "user-agent", alias = "user_agent", default)]
    pub user_agent: Option<String>,
}

/// Optional replacements for the built-in selector and pattern table
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MarkupOverrides {
    /// CSS selector of the pagination indicator on listing pages
    pub pagination: Option<String>,

    /// Regex with one capture group yielding the page count
    #[serde(rename = "page-count-pattern", alias = "page_count_pattern")]
    pub page_count_pattern: Option<String>,

    /// Regex every detail-page href must match
    #[serde(rename = "detail-link-pattern", alias = "detail_link_pattern")]
    pub detail_link_pattern: Option<String>,

    /// CSS selector of the position title on detail pages
    pub position: Option<String>,

    /// CSS selector of the block holding contact information
    #[serde(rename = "contact-container", alias = "contact_container")]
    pub contact_container: Option<String>,

    /// CSS selector of mailto anchors inside the contact block
    pub mailto: Option<String>,
}

/// Completion notification configuration
#[derive(Debug, Clone, Deserialize)]
pub struct EmailConfig {
    #[serde(default)]
    pub enabled: bool,

    #[serde(default, alias = "sender_email")]
    pub sender: String,

    #[serde(default, alias = "recipient_email")]
    pub recipient: String,

    #[serde(rename = "smtp-server", alias = "smtp_server", default)]
    pub smtp_server: String,

    #[serde(rename = "smtp-port", alias = "smtp_port", default = "default_smtp_port")]
    pub smtp_port: u16,

    #[serde(rename = "sender-password", alias = "sender_password", default)]
    pub sender_password: String,
}

impl Default for EmailConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            sender: String::new(),
            recipient: String::new(),
            smtp_server: String::new(),
            smtp_port: default_smtp_port(),
            sender_password: String::new(),
        }
    }
}

fn default_output_dir() -> String {
    ".".to_string()
}

fn default_listing_delay_ms() -> u64 {
    2000
}

fn default_detail_delay_ms() -> u64 {
    1000
}

fn default_fetch_timeout_secs() -> u64 {
    30
}

fn default_smtp_port() -> u16 {
    587
}
