//! SEO-Probe: page crawler and search-ranking quality scorer
//!
//! This crate fetches a web page (or a bounded, host-scoped set of pages),
//! extracts the structural signals search engines care about, and turns them
//! into a deterministic weighted score with itemized issues and opportunities.

pub mod analyzer;
pub mod config;
pub mod crawler;
pub mod insight;
pub mod output;
pub mod url;

use thiserror::Error;

/// Main error type for SEO-Probe operations
#[derive(Debug, Error)]
pub enum ProbeError {
    #[error("Invalid URL '{url}': {message}")]
    InvalidUrl { url: String, message: String },

    #[error("Failed to fetch {url}: {source}")]
    Fetch { url: String, source: reqwest::Error },

    #[error("Request timeout for {url}")]
    Timeout { url: String },

    #[error("Too many redirects from {url}")]
    TooManyRedirects { url: String },

    #[error("HTML parse error for {url}: {message}")]
    HtmlParse { url: String, message: String },

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// URL-specific errors
#[derive(Debug, Error)]
pub enum UrlError {
    #[error("Failed to parse URL: {0}")]
    Parse(String),

    #[error("Invalid URL scheme: {0}")]
    InvalidScheme(String),

    #[error("Missing host in URL")]
    MissingHost,
}

/// Result type alias for SEO-Probe operations
pub type Result<T> = std::result::Result<T, ProbeError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for URL operations
pub type UrlResult<T> = std::result::Result<T, UrlError>;

// Re-export commonly used types
pub use analyzer::{Analyzer, Issue, Opportunity, SeoScore};
pub use config::Config;
pub use crawler::{CrawlResult, Crawler, Image, SiteCrawl};
pub use insight::{InsightError, NarrativeGenerator};
pub use output::{AuditReport, SiteAudit};
pub use crate::url::{extract_host, frontier_key};
