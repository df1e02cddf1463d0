//! SEO scoring engine
//!
//! Turns one [`CrawlResult`] (plus optional target keywords) into an
//! [`SeoScore`]. Scoring is a pure function: no I/O, no hidden state, and the
//! same input always produces the same score, issue list and opportunity list.
//!
//! Four categories start at 100 and lose points according to the rule tables
//! in [`rules`]; each is clamped to `[0, 100]` and the overall score is their
//! weighted sum.

mod keywords;
mod readability;
pub mod rules;

pub use keywords::keyword_score;
pub use readability::{count_syllables, readability};

use crate::crawler::CrawlResult;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Weight of the technical category in the overall score
pub const TECHNICAL_WEIGHT: f64 = 0.25;
/// Weight of the content category in the overall score
pub const CONTENT_WEIGHT: f64 = 0.35;
/// Weight of the on-page category in the overall score
pub const ON_PAGE_WEIGHT: f64 = 0.25;
/// Weight of the performance category in the overall score
pub const PERFORMANCE_WEIGHT: f64 = 0.15;

/// Share of the content score taken by keyword relevance when keywords are given
pub const KEYWORD_BLEND: f64 = 0.2;

/// How bad an issue is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Critical,
    High,
    Medium,
    Low,
}

/// How urgent an opportunity is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    Low,
}

/// How much work an opportunity takes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Effort {
    Low,
    Medium,
    High,
}

/// Area a finding belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Security,
    Technical,
    Mobile,
    Content,
    OnPage,
    Performance,
}

impl Severity {
    /// Returns the lowercase name used in reports
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Critical => "critical",
            Severity::High => "high",
            Severity::Medium => "medium",
            Severity::Low => "low",
        }
    }
}

impl Priority {
    /// Returns the lowercase name used in reports
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::High => "high",
            Priority::Medium => "medium",
            Priority::Low => "low",
        }
    }
}

impl Effort {
    /// Returns the lowercase name used in reports
    pub fn as_str(&self) -> &'static str {
        match self {
            Effort::Low => "low",
            Effort::Medium => "medium",
            Effort::High => "high",
        }
    }
}

impl Category {
    /// Returns the snake_case name used in reports
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Security => "security",
            Category::Technical => "technical",
            Category::Mobile => "mobile",
            Category::Content => "content",
            Category::OnPage => "on_page",
            Category::Performance => "performance",
        }
    }
}

/// A hard rule violation with negative ranking impact
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
    pub severity: Severity,
    pub category: Category,
    pub title: String,
    pub description: String,
    pub impact: String,
    pub how_to_fix: String,
}

/// A soft, prioritized improvement suggestion
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Opportunity {
    pub priority: Priority,
    pub category: Category,
    pub title: String,
    pub description: String,
    pub impact: String,
    pub effort: Effort,
    /// Score points recoverable by acting on this
    pub potential: f64,
}

/// Weighted quality score for one page
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeoScore {
    pub overall: f64,
    pub technical: f64,
    pub content: f64,
    pub on_page: f64,
    pub performance: f64,
    pub issues: Vec<Issue>,
    pub opportunities: Vec<Opportunity>,
    /// Points awarded per passed check (and the keyword score, when used)
    pub breakdown: BTreeMap<String, f64>,
}

/// Scores crawl results against an optional keyword list
#[derive(Debug, Clone, Default)]
pub struct Analyzer {
    keywords: Vec<String>,
}

impl Analyzer {
    /// Creates an analyzer for the given target keywords
    ///
    /// Keywords are trimmed and lowercased; blank entries are dropped.
    pub fn new<I, S>(keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let keywords = keywords
            .into_iter()
            .map(|k| k.as_ref().trim().to_lowercase())
            .filter(|k| !k.is_empty())
            .collect();
        Self { keywords }
    }

    /// The normalized target keywords
    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }

    /// Scores one page
    pub fn analyze(&self, result: &CrawlResult) -> SeoScore {
        let mut score = SeoScore::default();

        let technical = rules::apply(rules::TECHNICAL_RULES, result, &mut score);

        let mut content = rules::apply(rules::CONTENT_RULES, result, &mut score);
        if !self.keywords.is_empty() {
            let relevance = keyword_score(result, &self.keywords);
            content = content * (1.0 - KEYWORD_BLEND) + relevance * KEYWORD_BLEND;
            score.breakdown.insert("keywords".to_string(), relevance);
        }

        let on_page = rules::apply(rules::ON_PAGE_RULES, result, &mut score);
        let performance = rules::apply(rules::PERFORMANCE_RULES, result, &mut score);

        score.technical = clamp_score(technical);
        score.content = clamp_score(content);
        score.on_page = clamp_score(on_page);
        score.performance = clamp_score(performance);
        score.overall = score.technical * TECHNICAL_WEIGHT
            + score.content * CONTENT_WEIGHT
            + score.on_page * ON_PAGE_WEIGHT
            + score.performance * PERFORMANCE_WEIGHT;

        score
    }
}

/// Scores one page; shorthand for `Analyzer::new(keywords).analyze(result)`
pub fn score_page(result: &CrawlResult, keywords: &[String]) -> SeoScore {
    Analyzer::new(keywords).analyze(result)
}

fn clamp_score(points: f64) -> f64 {
    points.clamp(0.0, 100.0)
}
