use crate::config::types::Config;
use crate::config::validation::validate;
use crate::ConfigError;
use sha2::{Digest, Sha256};
use std::path::Path;

/// Loads and parses a configuration file from the given path
///
/// # Arguments
///
/// * `path` - Path to the TOML configuration file
///
/// # Returns
///
/// * `Ok(Config)` - Successfully loaded and validated configuration
/// * `Err(ConfigError)` - Failed to load, parse, or validate the configuration
///
/// # Example
///
/// ```no_run
/// use std::path::Path;
/// use job_ad_scout::config::load_config;
///
/// let config = load_config(Path::new("config.toml")).unwrap();
/// println!("Base URL: {}", config.scraper.base_url);
/// ```
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    parse_config(&content)
}

/// Parses and validates configuration from TOML text
pub fn parse_config(content: &str) -> Result<Config, ConfigError> {
    let config: Config = toml::from_str(content)?;

    validate(&config)?;

    Ok(config)
}

/// Computes a SHA-256 hash of the configuration file content
///
/// The hash is logged at startup so a report can be traced back to the exact
/// configuration that produced it.
pub fn compute_config_hash(path: &Path) -> Result<String, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    let mut hasher = Sha256::new();
    hasher.update(content.as_bytes());
    let result = hasher.finalize();
    Ok(hex::encode(result))
}

/// Loads a configuration and returns both the config and its hash
pub fn load_config_with_hash(path: &Path) -> Result<(Config, String), ConfigError> {
    let config = load_config(path)?;
    let hash = compute_config_hash(path)?;
    Ok((config, hash))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FailurePolicy;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_temp_config(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_load_valid_config() {
        let config_content = r#"
[scraper]
base-url = "https://jump.mingpao.com/job/search/"
keyword = "accountant"
output-file = "_jobs.csv"
listing-delay-ms = 1500
on-fetch-failure = "skip"

[email]
enabled = true
sender = "bot@example.com"
recipient = "me@example.com"
smtp-server = "smtp.example.com"
smtp-port = 465
sender-password = "secret"
"#;

        let file = create_temp_config(config_content);
        let config = load_config(file.path()).unwrap();

        assert_eq!(config.scraper.keyword, "accountant");
        assert_eq!(config.scraper.listing_delay_ms, 1500);
        assert_eq!(config.scraper.detail_delay_ms, 1000);
        assert_eq!(config.scraper.on_fetch_failure, FailurePolicy::Skip);
        assert!(config.email.enabled);
        assert_eq!(config.email.smtp_port, 465);
    }

    #[test]
    fn test_defaults_when_sections_missing() {
        let config = parse_config(
            r#"
[scraper]
base-url = "https://example.com/search"
keyword = "nurse"
output-file = ".csv"
"#,
        )
        .unwrap();

        assert_eq!(config.scraper.output_dir, ".");
        assert_eq!(config.scraper.fetch_timeout_secs, 30);
        assert_eq!(config.scraper.on_fetch_failure, FailurePolicy::Abort);
        assert!(!config.scraper.text_email_fallback);
        assert!(config.scraper.proxy.is_none());
        assert!(!config.email.enabled);
        assert_eq!(config.email.smtp_port, 587);
        assert!(config.markup.position.is_none());
    }

    #[test]
    fn test_snake_case_aliases() {
        let config = parse_config(
            r#"
[scraper]
base_url = "https://example.com/search"
keyword = "chef"
output_file = ".csv"

[email]
enabled = false
smtp_server = "smtp.example.com"
smtp_port = 25
"#,
        )
        .unwrap();

        assert_eq!(config.scraper.base_url, "https://example.com/search");
        assert_eq!(config.email.smtp_server, "smtp.example.com");
        assert_eq!(config.email.smtp_port, 25);
    }

    #[test]
    fn test_load_config_with_invalid_path() {
        let result = load_config(Path::new("/nonexistent/config.toml"));
        assert!(result.is_err());
    }

    #[test]
    fn test_load_config_with_invalid_toml() {
        let config_content = "this is not valid TOML {{{";
        let file = create_temp_config(config_content);
        let result = load_config(file.path());
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_load_config_with_validation_error() {
        let config_content = r#"
[scraper]
base-url = "https://example.com/search"
keyword = ""
output-file = ".csv"
"#;

        let file = create_temp_config(config_content);
        let result = load_config(file.path());
        assert!(matches!(result.unwrap_err(), ConfigError::Validation(_)));
    }

    #[test]
    fn test_compute_config_hash() {
        let file = create_temp_config("test content");

        let hash1 = compute_config_hash(file.path()).unwrap();
        let hash2 = compute_config_hash(file.path()).unwrap();

        assert_eq!(hash1, hash2);
        assert_eq!(hash1.len(), 64);
    }

    #[test]
    fn test_different_content_different_hash() {
        let file1 = create_temp_config("content 1");
        let file2 = create_temp_config("content 2");

        let hash1 = compute_config_hash(file1.path()).unwrap();
        let hash2 = compute_config_hash(file2.path()).unwrap();

        assert_ne!(hash1, hash2);
    }
}
