//! Field extraction for job-detail pages
//!
//! A detail page yields a position title and the contact email addresses
//! listed in its contact block. Missing markup is expected here: detail
//! pages vary, so absence resolves to the "Not Found" title or an empty
//! email list rather than an error.

use crate::crawler::markup::MarkupProfile;
use crate::output::NOT_FOUND;
use scraper::{ElementRef, Html};
use std::collections::HashSet;

/// Fields pulled from one detail page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedDetail {
    /// Position title, or "Not Found" when the page has none
    pub position: String,

    /// Contact addresses in first-seen order, without duplicates
    pub emails: Vec<String>,
}

/// Extracts position titles and contact emails from detail-page HTML
#[derive(Debug, Clone)]
pub struct DetailExtractor {
    markup: MarkupProfile,
    text_fallback: bool,
}

impl DetailExtractor {
    /// Creates an extractor
    ///
    /// # Arguments
    ///
    /// * `markup` - Selector and pattern table
    /// * `text_fallback` - Also scan the contact block's text for bare
    ///   addresses after collecting its mailto links
    pub fn new(markup: MarkupProfile, text_fallback: bool) -> Self {
        Self {
            markup,
            text_fallback,
        }
    }

    /// Extracts the position title and contact emails from a detail page
    pub fn extract(&self, html: &str) -> ExtractedDetail {
        let document = Html::parse_document(html);

        let position = self
            .extract_position(&document)
            .unwrap_or_else(|| NOT_FOUND.to_string());

        let emails = match document.select(&self.markup.contact_container).next() {
            Some(container) => self.extract_emails(container),
            None => Vec::new(),
        };

        ExtractedDetail { position, emails }
    }

    /// Returns the whitespace-normalized text of the first title element
    fn extract_position(&self, document: &Html) -> Option<String> {
        document
            .select(&self.markup.position)
            .next()
            .map(|element| normalize_text(element.text()))
            .filter(|title| !title.is_empty())
    }

    /// Collects addresses from the contact block only, so navigation and
    /// footer boilerplate never contribute
    fn extract_emails(&self, container: ElementRef<'_>) -> Vec<String> {
        let mut seen = HashSet::new();
        let mut emails = Vec::new();

        for anchor in container.select(&self.markup.mailto) {
            let Some(href) = anchor.value().attr("href") else {
                continue;
            };

            let address = self
                .markup
                .mailto_address
                .captures(href)
                .and_then(|caps| caps.get(1))
                .map(|m| m.as_str().trim())
                .filter(|address| !address.is_empty());

            if let Some(address) = address {
                if seen.insert(address.to_string()) {
                    emails.push(address.to_string());
                }
            }
        }

        if self.text_fallback {
            let text = container.text().collect::<Vec<_>>().join(" ");
            for found in self.markup.email_text.find_iter(&text) {
                if seen.insert(found.as_str().to_string()) {
                    emails.push(found.as_str().to_string());
                }
            }
        }

        emails
    }
}

fn normalize_text<'a>(pieces: impl Iterator<Item = &'a str>) -> String {
    pieces
        .flat_map(|piece| piece.split_whitespace())
        .collect::<Vec<_>>()
        .join(" ")
}
