//! URL handling module for Job-Ad-Scout
//!
//! This module builds the search listing URLs the crawler walks. Detail-page
//! links are never rewritten: they are compared and deduplicated exactly as
//! they appear in the listing markup.

mod search;

pub use search::SearchQuery;
