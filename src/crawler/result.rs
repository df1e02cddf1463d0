//! Crawl result records
//!
//! These are the structured snapshots handed to the scoring engine and
//! serialized to callers. A result is built once per fetch and not changed
//! afterwards.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// An image element found on a page
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Image {
    /// Absolute image URL
    pub src: String,

    /// `alt` attribute, verbatim (may be empty)
    pub alt: String,

    /// `title` attribute, verbatim (may be empty)
    pub title: String,

    /// `width` attribute when it is a plain integer, else 0
    pub width: u32,

    /// `height` attribute when it is a plain integer, else 0
    pub height: u32,
}

impl Image {
    /// Returns true when the image carries no alternative text
    pub fn is_missing_alt(&self) -> bool {
        self.alt.is_empty()
    }
}

/// Snapshot of one fetched page's SEO-relevant signals
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CrawlResult {
    /// The URL that was requested
    pub url: String,

    /// HTTP status code of the final response
    pub status_code: u16,

    /// Text of the first `<title>` element
    pub title: String,

    /// First `description` / `og:description` meta content
    pub meta_description: String,

    /// Trimmed H1 texts in document order
    pub h1_tags: Vec<String>,

    /// Trimmed H2 texts in document order
    pub h2_tags: Vec<String>,

    /// Absolute anchor targets in document order
    pub links: Vec<String>,

    /// Images in document order
    pub images: Vec<Image>,

    /// Whitespace-delimited tokens across all text nodes
    pub word_count: usize,

    /// Wall-clock time from sending the request to having the full body
    pub load_time_ms: u64,

    pub mobile_friendly: bool,

    /// Whether the requested URL used the `https` scheme
    pub has_https: bool,

    /// `href` of the first `<link rel="canonical">`, as written
    pub canonical_url: String,

    /// Non-fatal problems noticed while building this result
    pub errors: Vec<String>,

    /// Response headers, last value per name
    pub headers: BTreeMap<String, String>,

    /// Body size in bytes
    pub response_size: u64,
}

impl CrawlResult {
    /// Number of images without alternative text
    pub fn missing_alt_count(&self) -> usize {
        self.images.iter().filter(|img| img.is_missing_alt()).count()
    }
}
