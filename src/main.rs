//! Job-Ad-Scout main entry point
//!
//! This is the command-line interface for the Job-Ad-Scout listing harvester.

use clap::Parser;
use job_ad_scout::config::{load_config_with_hash, Config};
use job_ad_scout::crawler::{run_crawl, MarkupProfile, RunOutcome};
use job_ad_scout::url::SearchQuery;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Job-Ad-Scout: a polite job-listing harvester
///
/// Job-Ad-Scout walks the results of a keyword search on a job board, visits
/// every job-detail page, extracts the position title and contact emails,
/// writes them to a CSV report and optionally mails a completion notice.
#[derive(Parser, Debug)]
#[command(name = "job-ad-scout")]
#[command(version = "1.0.0")]
#[command(about = "A polite job-listing harvester", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(value_name = "CONFIG")]
    config: PathBuf,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Validate config and show what would be searched without fetching anything
    #[arg(long)]
    dry_run: bool,

    /// Search keyword, overriding the configured one
    #[arg(short, long, value_name = "KEYWORD")]
    keyword: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    tracing::info!("Loading configuration from: {}", cli.config.display());
    let mut config = match load_config_with_hash(&cli.config) {
        Ok((cfg, hash)) => {
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            cfg
        }
        Err(e) => {
            tracing::error!("Failed to load configuration: {}", e);
            return Err(e.into());
        }
    };

    if let Some(keyword) = cli.keyword {
        if keyword.trim().is_empty() {
            return Err("--keyword cannot be empty".into());
        }
        tracing::info!("Keyword overridden on the command line: {}", keyword);
        config.scraper.keyword = keyword;
    }

    if cli.dry_run {
        handle_dry_run(&config)?;
    } else {
        handle_crawl(config).await?;
    }

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("job_ad_scout=info,warn"),
            1 => EnvFilter::new("job_ad_scout=debug,info"),
            2 => EnvFilter::new("job_ad_scout=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Handles the --dry-run mode: validates config and shows what would be searched
fn handle_dry_run(config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let query = SearchQuery::from_config(&config.scraper)?;
    MarkupProfile::from_overrides(&config.markup)?;

    println!("=== Job-Ad-Scout Dry Run ===\n");

    println!("Search:");
    println!("  Keyword: {}", query.keyword());
    println!("  First page: {}", query.first_page_url());
    match &config.scraper.proxy {
        Some(proxy) => println!("  Proxy: {}", proxy),
        None => println!("  Proxy: none"),
    }

    println!("\nPacing:");
    println!("  Listing delay: {}ms", config.scraper.listing_delay_ms);
    println!("  Detail delay: {}ms", config.scraper.detail_delay_ms);
    println!("  Jitter: up to {}ms", config.scraper.jitter_ms);
    println!("  Fetch timeout: {}s", config.scraper.fetch_timeout_secs);
    println!("  On fetch failure: {:?}", config.scraper.on_fetch_failure);

    println!("\nExtraction:");
    println!(
        "  Text email fallback: {}",
        if config.scraper.text_email_fallback {
            "on"
        } else {
            "off"
        }
    );
    let overrides = [
        ("pagination", &config.markup.pagination),
        ("page-count-pattern", &config.markup.page_count_pattern),
        ("detail-link-pattern", &config.markup.detail_link_pattern),
        ("position", &config.markup.position),
        ("contact-container", &config.markup.contact_container),
        ("mailto", &config.markup.mailto),
    ];
    for (name, value) in overrides {
        if let Some(value) = value {
            println!("  Override {}: {}", name, value);
        }
    }

    println!("\nOutput:");
    println!("  Directory: {}", config.scraper.output_dir);
    println!(
        "  File name: {}<timestamp>{}",
        config.scraper.keyword.trim(),
        config.scraper.output_file
    );

    println!("\nEmail:");
    if config.email.enabled {
        println!("  From: {}", config.email.sender);
        println!("  To: {}", config.email.recipient);
        println!(
            "  Server: {}:{}",
            config.email.smtp_server, config.email.smtp_port
        );
    } else {
        println!("  Disabled");
    }

    println!("\n✓ Configuration is valid");

    Ok(())
}

/// Handles the main crawl operation
async fn handle_crawl(config: Config) -> Result<(), Box<dyn std::error::Error>> {
    tracing::info!(
        "Searching '{}' for keyword '{}'",
        config.scraper.base_url,
        config.scraper.keyword
    );

    match run_crawl(config).await {
        Ok(RunOutcome::NoLinks) => {
            tracing::info!("Crawl finished without any job links");
            Ok(())
        }
        Ok(RunOutcome::Completed {
            report,
            output_path,
            notified,
        }) => {
            tracing::info!(
                "Crawl completed successfully: {} jobs written to {}{}",
                report.len(),
                output_path.display(),
                if notified { " (notification sent)" } else { "" }
            );
            Ok(())
        }
        Err(e) => {
            tracing::error!("Crawl failed: {}", e);
            Err(e.into())
        }
    }
}
