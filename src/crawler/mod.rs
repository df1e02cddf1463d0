//! Crawler module for web page fetching and signal extraction
//!
//! This module contains the core crawling logic, including:
//! - HTTP fetching with a fixed header set and redirect cap
//! - Per-host politeness pacing safe under concurrent callers
//! - HTML parsing and SEO signal extraction
//! - Host-scoped breadth-first site traversal

mod coordinator;
mod fetcher;
mod mobile;
mod parser;
mod politeness;
mod result;

pub use coordinator::{Crawler, SiteCrawl};
pub use fetcher::{build_http_client, fetch_url, FetchedPage, MAX_REDIRECTS};
pub use mobile::is_mobile_friendly;
pub use parser::{parse_html, ExtractedImage, ExtractedPage};
pub use politeness::PolitenessLimiter;
pub use result::{CrawlResult, Image};

use crate::config::Config;
use crate::ProbeError;

/// Crawls a single page with a one-off crawler
///
/// Convenience entry point for callers that do not need to share session
/// state across crawls.
///
/// # Returns
///
/// * `Ok(CrawlResult)` - Page fetched and extracted
/// * `Err(ProbeError)` - The page could not be crawled
pub async fn crawl(config: &Config, url: &str) -> Result<CrawlResult, ProbeError> {
    Crawler::new(config)?.crawl_page(url).await
}
