//! Audit report types
//!
//! An [`AuditReport`] pairs one crawled page with its score, optional
//! narrative insights, the analysis timestamp and the configuration
//! fingerprint. A [`SiteAudit`] collects the reports of a site traversal.

use crate::analyzer::{Analyzer, SeoScore};
use crate::crawler::{CrawlResult, SiteCrawl};
use crate::insight::{generate_insights, NarrativeGenerator};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Scored audit of one page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditReport {
    pub crawl_result: CrawlResult,
    pub seo_score: SeoScore,

    /// Narrative commentary, absent when no generator ran or it failed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ai_insights: Option<String>,

    pub analyzed_at: DateTime<Utc>,

    /// SHA-256 of the configuration file the audit ran with
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config_hash: Option<String>,
}

impl AuditReport {
    /// Scores `crawl_result` and stamps the report with the current time
    pub fn new(crawl_result: CrawlResult, analyzer: &Analyzer) -> Self {
        let seo_score = analyzer.analyze(&crawl_result);
        Self {
            crawl_result,
            seo_score,
            ai_insights: None,
            analyzed_at: Utc::now(),
            config_hash: None,
        }
    }

    /// Records the configuration fingerprint
    pub fn with_config_hash(mut self, hash: Option<String>) -> Self {
        self.config_hash = hash;
        self
    }

    /// Asks `generator` for insights under `deadline`
    ///
    /// A failed or late generator leaves `ai_insights` as `None`.
    pub async fn attach_insights<G: NarrativeGenerator>(&mut self, generator: &G, deadline: Duration) {
        self.ai_insights =
            generate_insights(generator, &self.seo_score, &self.crawl_result, deadline).await;
    }
}

/// Scored audit of a site traversal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SiteAudit {
    /// URL the traversal started from
    pub seed: String,

    /// One report per crawled page, in traversal order
    pub pages: Vec<AuditReport>,

    /// Mean overall score across `pages` (0 when no page was crawled)
    pub average_score: f64,

    /// Whether the traversal was cut short
    pub cancelled: bool,

    pub analyzed_at: DateTime<Utc>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config_hash: Option<String>,
}

impl SiteAudit {
    /// Scores every page of a traversal
    pub fn from_crawl(seed: &str, crawl: SiteCrawl, analyzer: &Analyzer) -> Self {
        let pages: Vec<AuditReport> = crawl
            .results
            .into_iter()
            .map(|result| AuditReport::new(result, analyzer))
            .collect();
        let average_score = average_overall(&pages);

        Self {
            seed: seed.to_string(),
            pages,
            average_score,
            cancelled: crawl.cancelled,
            analyzed_at: Utc::now(),
            config_hash: None,
        }
    }

    /// Records the configuration fingerprint on the audit and every page
    pub fn with_config_hash(mut self, hash: Option<String>) -> Self {
        for page in &mut self.pages {
            page.config_hash = hash.clone();
        }
        self.config_hash = hash;
        self
    }
}

fn average_overall(pages: &[AuditReport]) -> f64 {
    if pages.is_empty() {
        return 0.0;
    }
    let total: f64 = pages.iter().map(|p| p.seo_score.overall).sum();
    total / pages.len() as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::insight::InsightResult;

    struct FixedGenerator;

    impl NarrativeGenerator for FixedGenerator {
        async fn generate(&self, _payload: &serde_json::Value) -> InsightResult<String> {
            Ok("Add a meta description.".to_string())
        }
    }

    fn page(url: &str, https: bool) -> CrawlResult {
        CrawlResult {
            url: url.to_string(),
            status_code: 200,
            has_https: https,
            ..CrawlResult::default()
        }
    }

    #[test]
    fn test_report_scores_page() {
        let result = page("https://example.com/", true);
        let expected = Analyzer::default().analyze(&result);
        let report = AuditReport::new(result, &Analyzer::default());

        assert_eq!(report.seo_score, expected);
        assert!(report.ai_insights.is_none());
        assert!(report.config_hash.is_none());
    }

    #[test]
    fn test_report_json_field_names() {
        let report = AuditReport::new(page("https://example.com/", true), &Analyzer::default())
            .with_config_hash(Some("abc123".to_string()));
        let json = serde_json::to_value(&report).unwrap();

        assert_eq!(json["crawl_result"]["url"], "https://example.com/");
        assert!(json["seo_score"]["overall"].is_number());
        assert!(json["analyzed_at"].is_string());
        assert_eq!(json["config_hash"], "abc123");
        assert!(json.get("ai_insights").is_none());
    }

    #[test]
    fn test_report_json_round_trip() {
        let report = AuditReport::new(page("https://example.com/", false), &Analyzer::new(["seo"]));
        let json = serde_json::to_string(&report).unwrap();
        let back: AuditReport = serde_json::from_str(&json).unwrap();
        assert_eq!(back, report);
    }

    #[tokio::test]
    async fn test_attach_insights() {
        let mut report = AuditReport::new(page("https://example.com/", true), &Analyzer::default());
        let deadline = crate::config::Config::default().insight.deadline();
        assert_eq!(deadline, Duration::from_secs(30));
        report.attach_insights(&FixedGenerator, deadline).await;
        assert_eq!(report.ai_insights.as_deref(), Some("Add a meta description."));
    }

    #[test]
    fn test_site_audit_averages_overall() {
        let crawl = SiteCrawl {
            results: vec![
                page("https://example.com/", true),
                page("https://example.com/a", false),
            ],
            cancelled: false,
        };
        let analyzer = Analyzer::default();
        let first = analyzer.analyze(&crawl.results[0]).overall;
        let second = analyzer.analyze(&crawl.results[1]).overall;

        let audit = SiteAudit::from_crawl("https://example.com/", crawl, &analyzer);
        assert_eq!(audit.pages.len(), 2);
        assert!((audit.average_score - (first + second) / 2.0).abs() < 1e-9);
        assert!(!audit.cancelled);
    }

    #[test]
    fn test_empty_site_audit() {
        let crawl = SiteCrawl {
            results: vec![],
            cancelled: true,
        };
        let audit = SiteAudit::from_crawl("https://example.com/", crawl, &Analyzer::default());
        assert_eq!(audit.average_score, 0.0);
        assert!(audit.cancelled);
    }

    #[test]
    fn test_site_config_hash_reaches_pages() {
        let crawl = SiteCrawl {
            results: vec![page("https://example.com/", true)],
            cancelled: false,
        };
        let audit = SiteAudit::from_crawl("https://example.com/", crawl, &Analyzer::default())
            .with_config_hash(Some("feed".to_string()));
        assert_eq!(audit.config_hash.as_deref(), Some("feed"));
        assert_eq!(audit.pages[0].config_hash.as_deref(), Some("feed"));
    }
}
