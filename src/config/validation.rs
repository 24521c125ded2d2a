use crate::config::types::{Config, EmailConfig, ScraperConfig};
use crate::crawler::MarkupProfile;
use crate::ConfigError;
use lettre::Address;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_scraper_config(&config.scraper)?;
    MarkupProfile::from_overrides(&config.markup)?;
    validate_email_config(&config.email)?;
    Ok(())
}

/// Validates search and crawl configuration
fn validate_scraper_config(config: &ScraperConfig) -> Result<(), ConfigError> {
    let base_url = Url::parse(&config.base_url)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid base_url: {}", e)))?;

    if base_url.scheme() != "https" && base_url.scheme() != "http" {
        return Err(ConfigError::Validation(format!(
            "base_url '{}' must use the http or https scheme",
            config.base_url
        )));
    }

    if config.keyword.trim().is_empty() {
        return Err(ConfigError::Validation("keyword cannot be empty".to_string()));
    }

    if config.output_file.is_empty() {
        return Err(ConfigError::Validation(
            "output_file cannot be empty".to_string(),
        ));
    }

    if let Some(proxy) = &config.proxy {
        Url::parse(proxy)
            .map_err(|e| ConfigError::InvalidUrl(format!("Invalid proxy '{}': {}", proxy, e)))?;
    }

    if config.fetch_timeout_secs < 1 {
        return Err(ConfigError::Validation(format!(
            "fetch_timeout_secs must be >= 1, got {}",
            config.fetch_timeout_secs
        )));
    }

    Ok(())
}

/// Validates notification configuration; a disabled section is not checked
fn validate_email_config(config: &EmailConfig) -> Result<(), ConfigError> {
    if !config.enabled {
        return Ok(());
    }

    validate_email("email.sender", &config.sender)?;
    validate_email("email.recipient", &config.recipient)?;

    if config.smtp_server.trim().is_empty() {
        return Err(ConfigError::Validation(
            "email.smtp_server cannot be empty when email is enabled".to_string(),
        ));
    }

    if config.smtp_port == 0 {
        return Err(ConfigError::Validation(
            "email.smtp_port must be non-zero".to_string(),
        ));
    }

    Ok(())
}

/// Validates an address the way the mail transport will parse it
fn validate_email(field: &str, email: &str) -> Result<(), ConfigError> {
    if email.is_empty() {
        return Err(ConfigError::Validation(format!("{} cannot be empty", field)));
    }

    let address = email.parse::<Address>().map_err(|e| {
        ConfigError::Validation(format!(
            "Invalid email format for {}: '{}' ({})",
            field, email, e
        ))
    })?;

    if !address.domain().contains('.') {
        return Err(ConfigError::Validation(format!(
            "Invalid email domain for {}: '{}'",
            field, email
        )));
    }

    Ok(())
}
