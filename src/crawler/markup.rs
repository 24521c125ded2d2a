//! Selector and pattern table for the job board markup
//!
//! Every CSS selector and regular expression the crawler relies on lives in
//! this one table, so a markup change on the source site is a config change
//! (the `[markup]` section) rather than a code change.

use crate::config::MarkupOverrides;
use crate::ConfigError;
use regex::Regex;
use scraper::Selector;

/// Anchors considered as detail-page link candidates
pub const ANCHOR: &str = "a[href]";

/// Pagination indicator on listing pages
pub const PAGINATION: &str = "li.space";

/// Page count phrase inside the pagination indicator
pub const PAGE_COUNT_PATTERN: &str = r"Total (\d+) Page\(s\)";

/// URL shape of a job-detail page
pub const DETAIL_LINK_PATTERN: &str = r"^https://jump\.mingpao\.com/job/detail/Jobs/2";

/// Position title on detail pages
pub const POSITION: &str = ".color_position.txt_16px.bold h1.h3";

/// Block holding the contact section of a detail page
pub const CONTACT_CONTAINER: &str = "div.margin1em0.pull-left";

/// Mail links inside the contact block
pub const MAILTO: &str = r#"a[href^="mailto"]"#;

/// Address portion of a mailto href, stopping at the query suffix
pub const MAILTO_ADDRESS: &str = r"mailto:([^?]+)";

/// Bare email address in free text
pub const EMAIL_TEXT: &str = r"[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}";

/// Compiled selectors and patterns used by the pagination resolver, the link
/// collector and the detail extractor
#[derive(Debug, Clone)]
pub struct MarkupProfile {
    pub pagination: Selector,
    pub page_count: Regex,
    pub anchor: Selector,
    pub detail_link: Regex,
    pub position: Selector,
    pub contact_container: Selector,
    pub mailto: Selector,
    pub mailto_address: Regex,
    pub email_text: Regex,
}

impl MarkupProfile {
    /// Builds the profile from the built-in table, replacing any entry the
    /// configuration overrides
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidPattern` if an override does not compile,
    /// or if the page count pattern lacks a capture group.
    pub fn from_overrides(overrides: &MarkupOverrides) -> Result<Self, ConfigError> {
        let page_count = compile_regex(
            "page-count-pattern",
            overrides.page_count_pattern.as_deref().unwrap_or(PAGE_COUNT_PATTERN),
        )?;
        if page_count.captures_len() < 2 {
            return Err(ConfigError::InvalidPattern(format!(
                "page-count-pattern '{}' must contain a capture group for the page count",
                page_count.as_str()
            )));
        }

        Ok(Self {
            pagination: compile_selector(
                "pagination",
                overrides.pagination.as_deref().unwrap_or(PAGINATION),
            )?,
            page_count,
            anchor: compile_selector("anchor", ANCHOR)?,
            detail_link: compile_regex(
                "detail-link-pattern",
                overrides
                    .detail_link_pattern
                    .as_deref()
                    .unwrap_or(DETAIL_LINK_PATTERN),
            )?,
            position: compile_selector(
                "position",
                overrides.position.as_deref().unwrap_or(POSITION),
            )?,
            contact_container: compile_selector(
                "contact-container",
                overrides
                    .contact_container
                    .as_deref()
                    .unwrap_or(CONTACT_CONTAINER),
            )?,
            mailto: compile_selector("mailto", overrides.mailto.as_deref().unwrap_or(MAILTO))?,
            mailto_address: compile_regex("mailto-address", MAILTO_ADDRESS)?,
            email_text: compile_regex("email-text", EMAIL_TEXT)?,
        })
    }

    /// Builds the profile from the built-in table alone
    pub fn builtin() -> Result<Self, ConfigError> {
        Self::from_overrides(&MarkupOverrides::default())
    }
}

fn compile_selector(name: &str, css: &str) -> Result<Selector, ConfigError> {
    Selector::parse(css).map_err(|e| {
        ConfigError::InvalidPattern(format!("{} selector '{}': {:?}", name, css, e))
    })
}

fn compile_regex(name: &str, pattern: &str) -> Result<Regex, ConfigError> {
    Regex::new(pattern)
        .map_err(|e| ConfigError::InvalidPattern(format!("{} '{}': {}", name, pattern, e)))
}
