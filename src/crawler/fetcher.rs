//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests for the crawler:
//! - Building the HTTP client with the fixed header set
//! - One GET per call, following at most 10 redirects
//! - Latency measurement from send to full body
//! - Error classification into the crawl error taxonomy
//!
//! Nothing here retries; retry policy belongs to the caller.

use crate::config::{CrawlerConfig, UserAgentConfig};
use crate::ProbeError;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE};
use reqwest::{redirect::Policy, Client};
use std::collections::BTreeMap;
use std::time::{Duration, Instant};
use url::Url;

/// Maximum number of redirects followed for one fetch
pub const MAX_REDIRECTS: usize = 10;

const ACCEPT_VALUE: &str = "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8";
const ACCEPT_LANGUAGE_VALUE: &str = "de-DE,de;q=0.9,en;q=0.8";

/// Raw outcome of a successful fetch
#[derive(Debug, Clone)]
pub struct FetchedPage {
    /// URL of the final response after redirects
    pub final_url: Url,

    /// HTTP status code
    pub status_code: u16,

    /// Response headers, last value per name
    pub headers: BTreeMap<String, String>,

    /// Body decoded as UTF-8
    pub body: String,

    /// Whether invalid UTF-8 had to be replaced while decoding
    pub lossy: bool,

    /// Body size in bytes
    pub response_size: u64,

    /// Time from sending the request until the body was fully read
    pub load_time: Duration,
}

/// Builds an HTTP client with proper configuration
///
/// # Arguments
///
/// * `crawler` - Crawler settings (request deadline)
/// * `user_agent` - The user agent configuration
///
/// # Example
///
/// ```no_run
/// use seo_probe::config::Config;
/// use seo_probe::crawler::build_http_client;
///
/// let config = Config::default();
/// let client = build_http_client(&config.crawler, &config.user_agent).unwrap();
/// ```
pub fn build_http_client(
    crawler: &CrawlerConfig,
    user_agent: &UserAgentConfig,
) -> Result<Client, reqwest::Error> {
    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static(ACCEPT_VALUE));
    headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static(ACCEPT_LANGUAGE_VALUE));

    let timeout = Duration::from_secs(crawler.request_timeout_secs);

    Client::builder()
        .user_agent(user_agent.header_value())
        .default_headers(headers)
        .timeout(timeout)
        .connect_timeout(timeout.min(Duration::from_secs(10)))
        .redirect(Policy::limited(MAX_REDIRECTS))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches a URL with a single GET request
///
/// # Arguments
///
/// * `client` - The HTTP client to use
/// * `url` - The URL to fetch
/// * `deadline` - Upper bound for the whole request, body included
///
/// # Errors
///
/// | Condition | Error |
/// |-----------|-------|
/// | URL does not parse | `InvalidUrl` |
/// | Redirect chain > 10 | `TooManyRedirects` |
/// | Deadline elapsed | `Timeout` |
/// | DNS, TLS, connection refused, body read | `Fetch` |
///
/// Non-2xx statuses are not errors; they are reported in `status_code`.
pub async fn fetch_url(
    client: &Client,
    url: &str,
    deadline: Duration,
) -> Result<FetchedPage, ProbeError> {
    let parsed = Url::parse(url).map_err(|e| ProbeError::InvalidUrl {
        url: url.to_string(),
        message: e.to_string(),
    })?;

    tracing::debug!("GET {}", parsed);
    let started = Instant::now();

    let response = client
        .get(parsed.clone())
        .timeout(deadline)
        .send()
        .await
        .map_err(|e| classify_error(url, e))?;

    let status_code = response.status().as_u16();
    let final_url = response.url().clone();
    let headers = collect_headers(response.headers());

    let bytes = response
        .bytes()
        .await
        .map_err(|e| classify_error(url, e))?;
    let load_time = started.elapsed();

    let (body, lossy) = match String::from_utf8(bytes.to_vec()) {
        Ok(body) => (body, false),
        Err(e) => (String::from_utf8_lossy(e.as_bytes()).into_owned(), true),
    };

    tracing::debug!(
        "{} -> {} ({} bytes in {:?})",
        url,
        status_code,
        bytes.len(),
        load_time
    );

    Ok(FetchedPage {
        final_url,
        status_code,
        headers,
        body,
        lossy,
        response_size: bytes.len() as u64,
        load_time,
    })
}

/// Copies response headers into a map, keeping the last value of repeated names
fn collect_headers(headers: &HeaderMap) -> BTreeMap<String, String> {
    let mut map = BTreeMap::new();
    for (name, value) in headers {
        map.insert(
            name.as_str().to_string(),
            String::from_utf8_lossy(value.as_bytes()).into_owned(),
        );
    }
    map
}

/// Maps a transport error onto the crawl error taxonomy
fn classify_error(url: &str, error: reqwest::Error) -> ProbeError {
    if error.is_redirect() {
        ProbeError::TooManyRedirects {
            url: url.to_string(),
        }
    } else if error.is_timeout() {
        ProbeError::Timeout {
            url: url.to_string(),
        }
    } else {
        ProbeError::Fetch {
            url: url.to_string(),
            source: error,
        }
    }
}
