//! SEO-Probe main entry point
//!
//! This is the command-line interface for the SEO-Probe page auditor.

use anyhow::Context;
use clap::Parser;
use seo_probe::config::{load_config_with_hash, Config};
use seo_probe::output::{write_report, AuditReport, OutputFormat, SiteAudit};
use seo_probe::{Analyzer, Crawler};
use std::path::PathBuf;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::EnvFilter;

/// SEO-Probe: a page crawler and search-ranking quality scorer
///
/// SEO-Probe fetches a page (or a bounded set of pages on one host),
/// extracts the signals search engines care about and prints a weighted
/// score with itemized issues and opportunities.
#[derive(Parser, Debug)]
#[command(name = "seo-probe")]
#[command(version)]
#[command(about = "A page crawler and SEO quality scorer", long_about = None)]
struct Cli {
    /// Page to audit (the seed page with --site)
    #[arg(value_name = "URL")]
    url: String,

    /// Path to TOML configuration file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Target keywords, comma separated
    #[arg(short, long, value_delimiter = ',')]
    keywords: Vec<String>,

    /// Crawl the seed's host breadth-first instead of a single page
    #[arg(long)]
    site: bool,

    /// Page budget for --site (overrides crawler.max-pages)
    #[arg(long, value_name = "N", requires = "site")]
    max_pages: Option<usize>,

    /// Report format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Json)]
    format: OutputFormat,

    /// Write the report to a file instead of stdout
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    let (config, config_hash) = load(&cli)?;
    let crawler = Crawler::new(&config)?;
    let analyzer = Analyzer::new(&cli.keywords);
    if !analyzer.keywords().is_empty() {
        tracing::info!("Target keywords: {}", analyzer.keywords().join(", "));
    }

    let rendered = if cli.site {
        let max_pages = cli.max_pages.unwrap_or(config.crawler.max_pages);
        handle_site(&crawler, &analyzer, &cli.url, max_pages, config_hash, cli.format).await?
    } else {
        handle_page(&crawler, &analyzer, &cli.url, config_hash, cli.format).await?
    };

    match &cli.output {
        Some(path) => {
            write_report(&rendered, path)
                .with_context(|| format!("Failed to write report to {}", path.display()))?;
            tracing::info!("Report written to {}", path.display());
        }
        None => println!("{}", rendered),
    }

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("seo_probe=info,warn"),
            1 => EnvFilter::new("seo_probe=debug,info"),
            2 => EnvFilter::new("seo_probe=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    // Logs go to stderr so stdout carries only the report
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Loads the configuration file if one was given, otherwise the defaults
fn load(cli: &Cli) -> anyhow::Result<(Config, Option<String>)> {
    let Some(path) = &cli.config else {
        tracing::debug!("No configuration file given; using defaults");
        return Ok((Config::default(), None));
    };

    tracing::info!("Loading configuration from: {}", path.display());
    let (config, hash) = load_config_with_hash(path)
        .with_context(|| format!("Failed to load configuration from {}", path.display()))?;
    tracing::info!("Configuration loaded successfully (hash: {})", hash);

    Ok((config, Some(hash)))
}

/// Audits a single page
async fn handle_page(
    crawler: &Crawler,
    analyzer: &Analyzer,
    url: &str,
    config_hash: Option<String>,
    format: OutputFormat,
) -> anyhow::Result<String> {
    let result = crawler
        .crawl_page(url)
        .await
        .with_context(|| format!("Failed to crawl {}", url))?;

    let report = AuditReport::new(result, analyzer).with_config_hash(config_hash);
    tracing::info!(
        "Scored {}: {:.1} ({} issues, {} opportunities)",
        url,
        report.seo_score.overall,
        report.seo_score.issues.len(),
        report.seo_score.opportunities.len()
    );

    Ok(format.render_page(&report)?)
}

/// Audits up to `max_pages` pages of the seed's host; Ctrl-C stops early
async fn handle_site(
    crawler: &Crawler,
    analyzer: &Analyzer,
    url: &str,
    max_pages: usize,
    config_hash: Option<String>,
    format: OutputFormat,
) -> anyhow::Result<String> {
    let cancel = CancellationToken::new();
    let on_interrupt = cancel.clone();
    let interrupt = tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::warn!("Interrupted; finishing with the pages crawled so far");
            on_interrupt.cancel();
        }
    });

    let crawl = crawler.crawl_site(url, max_pages, &cancel).await;
    interrupt.abort();
    let crawl = crawl.with_context(|| format!("Failed to crawl site {}", url))?;

    let audit = SiteAudit::from_crawl(url, crawl, analyzer).with_config_hash(config_hash);
    tracing::info!(
        "Audited {} pages of {} (average score {:.1})",
        audit.pages.len(),
        url,
        audit.average_score
    );

    Ok(format.render_site(&audit)?)
}
