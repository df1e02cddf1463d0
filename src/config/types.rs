use serde::Deserialize;

/// Main configuration structure for SEO-Probe
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub crawler: CrawlerConfig,
    #[serde(rename = "user-agent", default)]
    pub user_agent: UserAgentConfig,
    #[serde(default)]
    pub insight: InsightConfig,
}

/// How mobile-friendliness is decided for a fetched page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MobileCheck {
    /// Look for a `viewport` response header containing `width=device-width`
    #[default]
    ViewportHeader,
    /// Look for a parsed `<meta name="viewport">` tag containing `width=device-width`
    ViewportMeta,
}

/// Crawler behavior configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CrawlerConfig {
    /// Per-request deadline (seconds)
    #[serde(rename = "request-timeout-secs", default = "default_request_timeout")]
    pub request_timeout_secs: u64,

    /// Minimum time between requests to the same host (milliseconds)
    #[serde(rename = "crawl-delay-ms", default = "default_crawl_delay")]
    pub crawl_delay_ms: u64,

    /// Page budget for a site traversal
    #[serde(rename = "max-pages", default = "default_max_pages")]
    pub max_pages: usize,

    /// Accepted for compatibility; robots.txt is not enforced
    #[serde(rename = "respect-robots-txt", default = "default_true")]
    pub respect_robots_txt: bool,

    /// Mobile-friendliness heuristic
    #[serde(rename = "mobile-check", default)]
    pub mobile_check: MobileCheck,

    /// Fail a page when the HTML parser had to recover from markup errors
    #[serde(rename = "strict-html", default)]
    pub strict_html: bool,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            request_timeout_secs: default_request_timeout(),
            crawl_delay_ms: default_crawl_delay(),
            max_pages: default_max_pages(),
            respect_robots_txt: true,
            mobile_check: MobileCheck::default(),
            strict_html: false,
        }
    }
}

/// User agent identification configuration
#[derive(Debug, Clone, Deserialize)]
pub struct UserAgentConfig {
    /// Name of the crawler
    #[serde(rename = "crawler-name", default = "default_crawler_name")]
    pub crawler_name: String,

    /// Version of the crawler
    #[serde(rename = "crawler-version", default = "default_crawler_version")]
    pub crawler_version: String,

    /// URL with information about the crawler
    #[serde(rename = "contact-url", default = "default_contact_url")]
    pub contact_url: String,
}

impl UserAgentConfig {
    /// Formats the user agent header value: `Name/Version (+ContactURL)`
    pub fn header_value(&self) -> String {
        format!(
            "{}/{} (+{})",
            self.crawler_name, self.crawler_version, self.contact_url
        )
    }
}

impl Default for UserAgentConfig {
    fn default() -> Self {
        Self {
            crawler_name: default_crawler_name(),
            crawler_version: default_crawler_version(),
            contact_url: default_contact_url(),
        }
    }
}

/// Narrative insight collaborator configuration
#[derive(Debug, Clone, Deserialize)]
pub struct InsightConfig {
    /// Deadline for one narrative generation call (seconds)
    #[serde(rename = "timeout-secs", default = "default_insight_timeout")]
    pub timeout_secs: u64,
}

impl InsightConfig {
    /// Deadline for one narrative generation call
    pub fn deadline(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.timeout_secs)
    }
}

impl Default for InsightConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_insight_timeout(),
        }
    }
}

fn default_request_timeout() -> u64 {
    30
}

fn default_crawl_delay() -> u64 {
    1000
}

fn default_max_pages() -> usize {
    10
}

fn default_true() -> bool {
    true
}

fn default_crawler_name() -> String {
    "SeoProbe".to_string()
}

fn default_crawler_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

fn default_contact_url() -> String {
    "https://github.com/seo-probe/seo-probe".to_string()
}

fn default_insight_timeout() -> u64 {
    30
}
