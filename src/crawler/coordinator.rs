//! Crawler coordinator - single-page crawls and host-scoped site traversal
//!
//! A [`Crawler`] owns the session state shared by every crawl made through it:
//! the per-host politeness table and the set of pages it has fetched. Both are
//! internally synchronized, so one crawler can serve concurrent callers
//! (wrap it in an `Arc`).

use crate::config::{Config, CrawlerConfig};
use crate::crawler::fetcher::{build_http_client, fetch_url, FetchedPage};
use crate::crawler::mobile::is_mobile_friendly;
use crate::crawler::parser::{parse_html, ExtractedPage};
use crate::crawler::politeness::PolitenessLimiter;
use crate::crawler::result::{CrawlResult, Image};
use crate::url::{extract_host, frontier_key, parse_target, same_host};
use crate::ProbeError;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::collections::{HashSet, VecDeque};
use std::sync::Mutex;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use url::Url;

/// Recovered parse errors listed individually before they are summarized
const MAX_REPORTED_PARSE_ERRORS: usize = 25;

/// Outcome of a site traversal
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SiteCrawl {
    /// Successfully crawled pages in BFS order
    pub results: Vec<CrawlResult>,

    /// Whether the traversal stopped early because it was cancelled
    pub cancelled: bool,
}

/// Main crawler structure
#[derive(Debug)]
pub struct Crawler {
    client: Client,
    config: CrawlerConfig,
    limiter: PolitenessLimiter,
    visited: Mutex<HashSet<String>>,
}

impl Crawler {
    /// Creates a new crawler from configuration
    ///
    /// # Returns
    ///
    /// * `Ok(Crawler)` - Ready to crawl
    /// * `Err(ProbeError)` - The HTTP client could not be built
    pub fn new(config: &Config) -> Result<Self, ProbeError> {
        let client = build_http_client(&config.crawler, &config.user_agent)?;

        if config.crawler.respect_robots_txt {
            tracing::debug!("robots.txt is not consulted; respect-robots-txt has no effect");
        }

        Ok(Self {
            client,
            config: config.crawler.clone(),
            limiter: PolitenessLimiter::new(Duration::from_millis(config.crawler.crawl_delay_ms)),
            visited: Mutex::new(HashSet::new()),
        })
    }

    /// The crawler settings in use
    pub fn config(&self) -> &CrawlerConfig {
        &self.config
    }

    /// Returns whether this crawler has successfully fetched `url` before
    pub fn is_visited(&self, url: &str) -> bool {
        let Ok(parsed) = Url::parse(url) else {
            return false;
        };
        self.visited_set().contains(&frontier_key(&parsed))
    }

    /// Crawls a single page
    ///
    /// Waits for the host's politeness delay, fetches the page, extracts its
    /// signals and records it as visited.
    ///
    /// # Errors
    ///
    /// * `InvalidUrl` - `url` is not an HTTP(S) URL with a host
    /// * `Fetch` / `Timeout` / `TooManyRedirects` - transport failure
    /// * `HtmlParse` - markup needed recovery and `strict-html` is enabled
    pub async fn crawl_page(&self, url: &str) -> Result<CrawlResult, ProbeError> {
        let target = parse_target(url).map_err(|e| ProbeError::InvalidUrl {
            url: url.to_string(),
            message: e.to_string(),
        })?;
        let host = extract_host(&target).ok_or_else(|| ProbeError::InvalidUrl {
            url: url.to_string(),
            message: "missing host".to_string(),
        })?;

        self.limiter.acquire(&host).await;

        let deadline = Duration::from_secs(self.config.request_timeout_secs);
        let fetched = fetch_url(&self.client, target.as_str(), deadline).await?;

        // Relative links resolve against where the content actually came from
        let extracted = parse_html(&fetched.body, &fetched.final_url);

        if self.config.strict_html && !extracted.parse_errors.is_empty() {
            return Err(ProbeError::HtmlParse {
                url: url.to_string(),
                message: extracted.parse_errors.join("; "),
            });
        }

        let result = self.build_result(&target, fetched, extracted);

        self.visited_set().insert(frontier_key(&target));
        tracing::info!(
            "Crawled {} ({} status, {} words, {} links, {}ms)",
            result.url,
            result.status_code,
            result.word_count,
            result.links.len(),
            result.load_time_ms
        );

        Ok(result)
    }

    /// Crawls up to `max_pages` pages of the seed's host, breadth-first
    ///
    /// # Traversal
    ///
    /// 1. The frontier is a FIFO queue seeded with `start_url`
    /// 2. Each URL is fetched at most once per traversal
    /// 3. Links from a crawled page are enqueued when they are HTTP(S), on the
    ///    seed's host, and not yet discovered (fragments are ignored)
    /// 4. A failed page is logged and skipped; it does not stop the traversal
    ///    and is not fetched again
    /// 5. Stops when the queue is empty, `max_pages` results are collected, or
    ///    `cancel` fires
    ///
    /// Cancellation is checked between pages and also interrupts the page in
    /// flight; the partial results are returned with `cancelled` set.
    ///
    /// # Errors
    ///
    /// Only an unusable `start_url` fails the traversal (`InvalidUrl`).
    pub async fn crawl_site(
        &self,
        start_url: &str,
        max_pages: usize,
        cancel: &CancellationToken,
    ) -> Result<SiteCrawl, ProbeError> {
        let seed = parse_target(start_url).map_err(|e| ProbeError::InvalidUrl {
            url: start_url.to_string(),
            message: e.to_string(),
        })?;

        let seed_key = frontier_key(&seed);
        let mut discovered: HashSet<String> = HashSet::from([seed_key.clone()]);
        let mut queue: VecDeque<String> = VecDeque::from([seed_key]);
        let mut crawl = SiteCrawl::default();
        let mut failures = 0usize;

        tracing::info!("Starting site crawl of {} (max {} pages)", seed, max_pages);

        while crawl.results.len() < max_pages {
            if cancel.is_cancelled() {
                crawl.cancelled = true;
                break;
            }

            let Some(current) = queue.pop_front() else {
                break;
            };

            let outcome = tokio::select! {
                biased;
                _ = cancel.cancelled() => None,
                outcome = self.crawl_page(&current) => Some(outcome),
            };

            match outcome {
                None => {
                    crawl.cancelled = true;
                    break;
                }
                Some(Ok(result)) => {
                    for link in &result.links {
                        if let Some(key) = follow_key(&seed, link) {
                            if discovered.insert(key.clone()) {
                                queue.push_back(key);
                            }
                        }
                    }
                    crawl.results.push(result);
                }
                Some(Err(e)) => {
                    failures += 1;
                    tracing::warn!("Skipping {}: {}", current, e);
                }
            }

            tracing::debug!(
                "Progress: {} crawled, {} failed, {} queued",
                crawl.results.len(),
                failures,
                queue.len()
            );
        }

        if crawl.cancelled {
            tracing::warn!(
                "Site crawl of {} cancelled after {} pages ({} still queued)",
                seed,
                crawl.results.len(),
                queue.len()
            );
        } else {
            tracing::info!(
                "Site crawl of {} finished: {} pages, {} failures",
                seed,
                crawl.results.len(),
                failures
            );
        }

        Ok(crawl)
    }

    fn build_result(&self, target: &Url, fetched: FetchedPage, extracted: ExtractedPage) -> CrawlResult {
        let mobile_friendly = is_mobile_friendly(
            self.config.mobile_check,
            &fetched.headers,
            extracted.viewport_meta.as_deref(),
        );

        let mut errors = Vec::new();
        if fetched.lossy {
            errors.push("Response body was not valid UTF-8; decoded lossily".to_string());
        }
        let parse_error_count = extracted.parse_errors.len();
        errors.extend(
            extracted
                .parse_errors
                .into_iter()
                .take(MAX_REPORTED_PARSE_ERRORS)
                .map(|e| format!("HTML parse: {}", e)),
        );
        if parse_error_count > MAX_REPORTED_PARSE_ERRORS {
            errors.push(format!(
                "HTML parse: and {} more",
                parse_error_count - MAX_REPORTED_PARSE_ERRORS
            ));
        }

        CrawlResult {
            url: target.to_string(),
            status_code: fetched.status_code,
            title: extracted.title,
            meta_description: extracted.meta_description,
            h1_tags: extracted.h1_tags,
            h2_tags: extracted.h2_tags,
            links: extracted.links,
            images: extracted
                .images
                .into_iter()
                .map(|img| Image {
                    src: img.src,
                    alt: img.alt,
                    title: img.title,
                    width: img.width,
                    height: img.height,
                })
                .collect(),
            word_count: extracted.word_count,
            load_time_ms: fetched.load_time.as_millis() as u64,
            mobile_friendly,
            has_https: target.scheme() == "https",
            canonical_url: extracted.canonical_url,
            errors,
            headers: fetched.headers,
            response_size: fetched.response_size,
        }
    }

    fn visited_set(&self) -> std::sync::MutexGuard<'_, HashSet<String>> {
        // The set stays consistent even if a holder panicked mid-insert
        self.visited.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

/// Returns the frontier key for `link` if a traversal from `seed` should follow it
fn follow_key(seed: &Url, link: &str) -> Option<String> {
    let url = Url::parse(link).ok()?;
    if url.scheme() != "http" && url.scheme() != "https" {
        return None;
    }
    if !same_host(seed, &url) {
        return None;
    }
    Some(frontier_key(&url))
}
