//! Page count inference for search listings

use crate::crawler::markup::MarkupProfile;
use scraper::Html;

/// Determines how many listing pages a search result set spans
///
/// Listings with few results omit the pagination indicator, and the
/// indicator may not carry a recognizable page count. Both cases mean a
/// single page; this function never fails.
///
/// # Arguments
///
/// * `html` - HTML of the first listing page
/// * `markup` - Selector and pattern table
///
/// # Returns
///
/// The page count, always at least 1
pub fn resolve_page_count(html: &str, markup: &MarkupProfile) -> u32 {
    let document = Html::parse_document(html);

    let Some(indicator) = document.select(&markup.pagination).next() else {
        return 1;
    };

    let text: String = indicator.text().collect();

    markup
        .page_count
        .captures(&text)
        .and_then(|caps| caps.get(1))
        .and_then(|count| count.as_str().parse::<u32>().ok())
        .filter(|count| *count >= 1)
        .unwrap_or(1)
}
