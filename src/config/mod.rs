//! Configuration module for Job-Ad-Scout
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//!
//! # Example
//!
//! ```no_run
//! use job_ad_scout::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("config.toml")).unwrap();
//! println!("Searching for: {}", config.scraper.keyword);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{Config, EmailConfig, FailurePolicy, MarkupOverrides, ScraperConfig};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash, parse_config};
