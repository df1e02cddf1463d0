//! Rule tables for the four scoring categories
//!
//! Each category is a table of [`Rule`]s. A rule inspects the crawl result and
//! returns a [`Verdict`]: pass (its credit is recorded in the breakdown), no
//! effect, or a deduction together with the issue/opportunity it emits. The
//! wording of every finding lives in the template constants below.
//!
//! Title and description lengths are UTF-8 byte lengths: a title of 30 `ü`
//! has length 60.
//!
//! | Category | Check | Deduction | Finding |
//! |----------|-------|-----------|---------|
//! | Technical | not HTTPS | 15 | critical issue |
//! | Technical | status != 200 | 20 | critical issue |
//! | Technical | no canonical URL | 5 | medium opportunity (+5) |
//! | Technical | not mobile-friendly | 10 | high issue |
//! | Content | words < 300 | 20 | high issue |
//! | Content | words 300..600 | 10 | medium opportunity (+10) |
//! | Content | no H1 | 15 | high issue |
//! | Content | more than one H1 | 5 | low opportunity (+5) |
//! | Content | no H2 and words > 300 | 10 | medium opportunity (+10) |
//! | On-page | no title | 30 | critical issue |
//! | On-page | title < 30 bytes | 10 | medium issue |
//! | On-page | title > 60 bytes | 5 | low opportunity (+5) |
//! | On-page | no meta description | 20 | high opportunity (+20) |
//! | On-page | description outside 120..=160 bytes | 5 | medium opportunity (+5) |
//! | On-page | M images without ALT | min(10, M) | medium opportunity (+10) |
//! | Performance | load > 3000ms | 30 | high issue |
//! | Performance | load 2001..=3000ms | 15 | medium opportunity (+15) |

use super::{Category, Effort, Issue, Opportunity, Priority, SeoScore, Severity};
use crate::crawler::CrawlResult;

/// Something a rule reports when it deducts points
#[derive(Debug, Clone, PartialEq)]
pub enum Finding {
    Issue(Issue),
    Opportunity(Opportunity),
}

/// Result of evaluating one rule
#[derive(Debug, Clone, PartialEq)]
pub enum Verdict {
    /// The check passed; its credit goes into the breakdown
    Pass,
    /// Nothing to award or deduct
    Neutral,
    /// Points lost, with the finding explaining why
    Deduct { points: f64, finding: Finding },
}

/// One row of a category's rule table
#[derive(Debug, Clone, Copy)]
pub struct Rule {
    /// Breakdown key credited on pass
    pub key: &'static str,
    /// Points credited on pass
    pub credit: f64,
    pub check: fn(&CrawlResult) -> Verdict,
}

/// Wording and classification of an issue; `{}` is replaced by the detail value
struct IssueTemplate {
    severity: Severity,
    category: Category,
    title: &'static str,
    description: &'static str,
    impact: &'static str,
    how_to_fix: &'static str,
}

impl IssueTemplate {
    fn deduct(&self, points: f64, detail: impl ToString) -> Verdict {
        let detail = detail.to_string();
        Verdict::Deduct {
            points,
            finding: Finding::Issue(Issue {
                severity: self.severity,
                category: self.category,
                title: fill(self.title, &detail),
                description: fill(self.description, &detail),
                impact: self.impact.to_string(),
                how_to_fix: self.how_to_fix.to_string(),
            }),
        }
    }
}

/// Wording and classification of an opportunity; `{}` is replaced by the detail value
struct OpportunityTemplate {
    priority: Priority,
    category: Category,
    title: &'static str,
    description: &'static str,
    impact: &'static str,
    effort: Effort,
    potential: f64,
}

impl OpportunityTemplate {
    fn deduct(&self, points: f64, detail: impl ToString) -> Verdict {
        let detail = detail.to_string();
        Verdict::Deduct {
            points,
            finding: Finding::Opportunity(Opportunity {
                priority: self.priority,
                category: self.category,
                title: fill(self.title, &detail),
                description: fill(self.description, &detail),
                impact: self.impact.to_string(),
                effort: self.effort,
                potential: self.potential,
            }),
        }
    }
}

fn fill(text: &str, detail: &str) -> String {
    text.replacen("{}", detail, 1)
}

/// Evaluates a rule table, records findings and credits, returns the raw points
pub fn apply(rules: &[Rule], result: &CrawlResult, score: &mut SeoScore) -> f64 {
    let mut points = 100.0;
    for rule in rules {
        match (rule.check)(result) {
            Verdict::Pass => {
                score.breakdown.insert(rule.key.to_string(), rule.credit);
            }
            Verdict::Neutral => {}
            Verdict::Deduct {
                points: lost,
                finding,
            } => {
                points -= lost;
                match finding {
                    Finding::Issue(issue) => score.issues.push(issue),
                    Finding::Opportunity(opportunity) => score.opportunities.push(opportunity),
                }
            }
        }
    }
    points
}

// Thresholds

const THIN_CONTENT_WORDS: usize = 300;
const RICH_CONTENT_WORDS: usize = 600;
const TITLE_MIN_LEN: usize = 30;
const TITLE_MAX_LEN: usize = 60;
const DESCRIPTION_MIN_LEN: usize = 120;
const DESCRIPTION_MAX_LEN: usize = 160;
const MAX_ALT_DEDUCTION: usize = 10;
const SLOW_LOAD_MS: u64 = 3000;
const OK_LOAD_MS: u64 = 2000;

// Technical rules

pub const TECHNICAL_RULES: &[Rule] = &[
    Rule {
        key: "https",
        credit: 15.0,
        check: check_https,
    },
    Rule {
        key: "status_code",
        credit: 20.0,
        check: check_status_code,
    },
    Rule {
        key: "canonical",
        credit: 5.0,
        check: check_canonical,
    },
    Rule {
        key: "mobile",
        credit: 10.0,
        check: check_mobile,
    },
];

const MISSING_HTTPS: IssueTemplate = IssueTemplate {
    severity: Severity::Critical,
    category: Category::Security,
    title: "Missing HTTPS",
    description: "Website is not using HTTPS encryption",
    impact: "Negative ranking factor and security risk",
    how_to_fix: "Install a TLS certificate and redirect all HTTP traffic to HTTPS",
};

const BAD_STATUS: IssueTemplate = IssueTemplate {
    severity: Severity::Critical,
    category: Category::Technical,
    title: "Non-200 Status Code: {}",
    description: "Page returns status {} instead of 200",
    impact: "Search engines may not index this page",
    how_to_fix: "Fix the server configuration or the broken link",
};

const MISSING_CANONICAL: OpportunityTemplate = OpportunityTemplate {
    priority: Priority::Medium,
    category: Category::Technical,
    title: "Missing Canonical URL",
    description: "No canonical link tag found",
    impact: "May cause duplicate content issues",
    effort: Effort::Low,
    potential: 5.0,
};

const NOT_MOBILE_FRIENDLY: IssueTemplate = IssueTemplate {
    severity: Severity::High,
    category: Category::Mobile,
    title: "Not Mobile-Friendly",
    description: "Missing or incorrect viewport declaration",
    impact: "Poor mobile experience and ranking penalty",
    how_to_fix: "Add <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">",
};

fn check_https(result: &CrawlResult) -> Verdict {
    if result.has_https {
        Verdict::Pass
    } else {
        MISSING_HTTPS.deduct(15.0, "")
    }
}

fn check_status_code(result: &CrawlResult) -> Verdict {
    if result.status_code == 200 {
        Verdict::Pass
    } else {
        BAD_STATUS.deduct(20.0, result.status_code)
    }
}

fn check_canonical(result: &CrawlResult) -> Verdict {
    if result.canonical_url.is_empty() {
        MISSING_CANONICAL.deduct(5.0, "")
    } else {
        Verdict::Pass
    }
}

fn check_mobile(result: &CrawlResult) -> Verdict {
    if result.mobile_friendly {
        Verdict::Pass
    } else {
        NOT_MOBILE_FRIENDLY.deduct(10.0, "")
    }
}

// Content rules

pub const CONTENT_RULES: &[Rule] = &[
    Rule {
        key: "word_count",
        credit: 20.0,
        check: check_word_count,
    },
    Rule {
        key: "h1",
        credit: 15.0,
        check: check_h1,
    },
    Rule {
        key: "h2",
        credit: 10.0,
        check: check_h2,
    },
];

const THIN_CONTENT: IssueTemplate = IssueTemplate {
    severity: Severity::High,
    category: Category::Content,
    title: "Thin Content",
    description: "Only {} words found (recommended: 300+)",
    impact: "May be considered low-quality by search engines",
    how_to_fix: "Add more valuable, relevant content to the page",
};

const EXPAND_CONTENT: OpportunityTemplate = OpportunityTemplate {
    priority: Priority::Medium,
    category: Category::Content,
    title: "Expand Content",
    description: "Page has {} words (recommended: 600+ for better rankings)",
    impact: "More comprehensive content tends to rank better",
    effort: Effort::Medium,
    potential: 10.0,
};

const MISSING_H1: IssueTemplate = IssueTemplate {
    severity: Severity::High,
    category: Category::Content,
    title: "Missing H1 Tag",
    description: "No H1 heading found on page",
    impact: "H1 is important for SEO and accessibility",
    how_to_fix: "Add a clear, keyword-rich H1 heading",
};

const MULTIPLE_H1: OpportunityTemplate = OpportunityTemplate {
    priority: Priority::Low,
    category: Category::Content,
    title: "Multiple H1 Tags",
    description: "Found {} H1 tags (recommended: 1)",
    impact: "May dilute the main topic signal",
    effort: Effort::Low,
    potential: 5.0,
};

const MISSING_H2: OpportunityTemplate = OpportunityTemplate {
    priority: Priority::Medium,
    category: Category::Content,
    title: "No H2 Headings",
    description: "Page lacks subheadings for content structure",
    impact: "Subheadings improve readability and SEO",
    effort: Effort::Low,
    potential: 10.0,
};

fn check_word_count(result: &CrawlResult) -> Verdict {
    match result.word_count {
        n if n < THIN_CONTENT_WORDS => THIN_CONTENT.deduct(20.0, n),
        n if n < RICH_CONTENT_WORDS => EXPAND_CONTENT.deduct(10.0, n),
        _ => Verdict::Pass,
    }
}

fn check_h1(result: &CrawlResult) -> Verdict {
    match result.h1_tags.len() {
        0 => MISSING_H1.deduct(15.0, ""),
        1 => Verdict::Pass,
        n => MULTIPLE_H1.deduct(5.0, n),
    }
}

fn check_h2(result: &CrawlResult) -> Verdict {
    if !result.h2_tags.is_empty() {
        Verdict::Pass
    } else if result.word_count > THIN_CONTENT_WORDS {
        MISSING_H2.deduct(10.0, "")
    } else {
        Verdict::Neutral
    }
}

// On-page rules

pub const ON_PAGE_RULES: &[Rule] = &[
    Rule {
        key: "title",
        credit: 30.0,
        check: check_title,
    },
    Rule {
        key: "meta_description",
        credit: 20.0,
        check: check_meta_description,
    },
    Rule {
        key: "image_alt",
        credit: 10.0,
        check: check_image_alt,
    },
];

const MISSING_TITLE: IssueTemplate = IssueTemplate {
    severity: Severity::Critical,
    category: Category::OnPage,
    title: "Missing Title Tag",
    description: "No title tag found",
    impact: "Critical for rankings and click-through rate",
    how_to_fix: "Add a unique, descriptive title tag (50-60 characters)",
};

const SHORT_TITLE: IssueTemplate = IssueTemplate {
    severity: Severity::Medium,
    category: Category::OnPage,
    title: "Title Too Short",
    description: "Title is {} characters (recommended: 50-60)",
    impact: "Not using the available search result space",
    how_to_fix: "Expand the title with more relevant keywords",
};

const LONG_TITLE: OpportunityTemplate = OpportunityTemplate {
    priority: Priority::Low,
    category: Category::OnPage,
    title: "Title Too Long",
    description: "Title is {} characters (may be truncated)",
    impact: "May be cut off in search results",
    effort: Effort::Low,
    potential: 5.0,
};

const MISSING_DESCRIPTION: OpportunityTemplate = OpportunityTemplate {
    priority: Priority::High,
    category: Category::OnPage,
    title: "Missing Meta Description",
    description: "No meta description found",
    impact: "Missed chance to improve click-through rate",
    effort: Effort::Low,
    potential: 20.0,
};

const DESCRIPTION_LENGTH: OpportunityTemplate = OpportunityTemplate {
    priority: Priority::Medium,
    category: Category::OnPage,
    title: "Meta Description Length",
    description: "Description is {} characters (optimal: 120-160)",
    impact: "May be truncated or too short to persuade",
    effort: Effort::Low,
    potential: 5.0,
};

const MISSING_ALT: OpportunityTemplate = OpportunityTemplate {
    priority: Priority::Medium,
    category: Category::OnPage,
    title: "Missing Image ALT Text",
    description: "{} images without ALT attributes",
    impact: "Hurts accessibility and image search visibility",
    effort: Effort::Low,
    potential: 10.0,
};

fn check_title(result: &CrawlResult) -> Verdict {
    if result.title.is_empty() {
        return MISSING_TITLE.deduct(30.0, "");
    }
    match result.title.len() {
        n if n < TITLE_MIN_LEN => SHORT_TITLE.deduct(10.0, n),
        n if n > TITLE_MAX_LEN => LONG_TITLE.deduct(5.0, n),
        _ => Verdict::Pass,
    }
}

fn check_meta_description(result: &CrawlResult) -> Verdict {
    if result.meta_description.is_empty() {
        return MISSING_DESCRIPTION.deduct(20.0, "");
    }
    let length = result.meta_description.len();
    if (DESCRIPTION_MIN_LEN..=DESCRIPTION_MAX_LEN).contains(&length) {
        Verdict::Pass
    } else {
        DESCRIPTION_LENGTH.deduct(5.0, length)
    }
}

fn check_image_alt(result: &CrawlResult) -> Verdict {
    let missing = result.missing_alt_count();
    if missing > 0 {
        MISSING_ALT.deduct(missing.min(MAX_ALT_DEDUCTION) as f64, missing)
    } else if result.images.is_empty() {
        Verdict::Neutral
    } else {
        Verdict::Pass
    }
}

// Performance rules

pub const PERFORMANCE_RULES: &[Rule] = &[Rule {
    key: "load_time",
    credit: 30.0,
    check: check_load_time,
}];

const SLOW_LOAD: IssueTemplate = IssueTemplate {
    severity: Severity::High,
    category: Category::Performance,
    title: "Slow Page Load",
    description: "Page loads in {}ms (target: under 3000ms)",
    impact: "Negative ranking factor and user experience",
    how_to_fix: "Optimize images, enable caching, use a CDN, minimize CSS/JS",
};

const IMPROVE_LOAD: OpportunityTemplate = OpportunityTemplate {
    priority: Priority::Medium,
    category: Category::Performance,
    title: "Improve Load Time",
    description: "Page loads in {}ms (good, but can be faster)",
    impact: "Faster pages help both users and rankings",
    effort: Effort::Medium,
    potential: 15.0,
};

fn check_load_time(result: &CrawlResult) -> Verdict {
    match result.load_time_ms {
        ms if ms > SLOW_LOAD_MS => SLOW_LOAD.deduct(30.0, ms),
        ms if ms > OK_LOAD_MS => IMPROVE_LOAD.deduct(15.0, ms),
        _ => Verdict::Pass,
    }
}
