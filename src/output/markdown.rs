//! Markdown report generation
//!
//! Renders audit reports as human-readable markdown: a score table, the
//! itemized issues and opportunities, and the extracted page signals.

use crate::analyzer::SeoScore;
use crate::output::report::{AuditReport, SiteAudit};
use crate::output::OutputResult;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Writes a rendered report to a file
///
/// # Arguments
///
/// * `content` - Rendered report text
/// * `output_path` - Path where the report should be written
///
/// # Returns
///
/// * `Ok(())` - Successfully wrote the report
/// * `Err(OutputError)` - Failed to write the file
pub fn write_report(content: &str, output_path: &Path) -> OutputResult<()> {
    let mut file = File::create(output_path)?;
    file.write_all(content.as_bytes())?;

    Ok(())
}

/// Formats a single-page audit as markdown
///
/// # Arguments
///
/// * `report` - The audit report
///
/// # Returns
///
/// A formatted markdown string
pub fn format_markdown_report(report: &AuditReport) -> String {
    let mut md = String::new();
    let page = &report.crawl_result;

    // Title
    md.push_str(&format!("# SEO Audit: {}\n\n", page.url));

    // Run metadata
    md.push_str(&format!(
        "- **Analyzed**: {}\n",
        report.analyzed_at.to_rfc3339()
    ));
    md.push_str(&format!("- **Status**: {}\n", page.status_code));
    md.push_str(&format!("- **Load Time**: {}ms\n", page.load_time_ms));
    md.push_str(&format!("- **Response Size**: {} bytes\n", page.response_size));
    if let Some(hash) = &report.config_hash {
        md.push_str(&format!("- **Config Hash**: {}\n", hash));
    }
    md.push('\n');

    push_score_table(&mut md, &report.seo_score);
    push_findings(&mut md, &report.seo_score);

    // Extracted signals
    md.push_str("## Page Signals\n\n");
    md.push_str(&format!("- **Title**: {}\n", or_none(&page.title)));
    md.push_str(&format!(
        "- **Meta Description**: {}\n",
        or_none(&page.meta_description)
    ));
    md.push_str(&format!(
        "- **Canonical URL**: {}\n",
        or_none(&page.canonical_url)
    ));
    md.push_str(&format!("- **H1 Headings**: {}\n", page.h1_tags.len()));
    md.push_str(&format!("- **H2 Headings**: {}\n", page.h2_tags.len()));
    md.push_str(&format!("- **Word Count**: {}\n", page.word_count));
    md.push_str(&format!("- **Links**: {}\n", page.links.len()));
    md.push_str(&format!(
        "- **Images**: {} ({} without ALT)\n",
        page.images.len(),
        page.missing_alt_count()
    ));
    md.push_str(&format!("- **HTTPS**: {}\n", yes_no(page.has_https)));
    md.push_str(&format!(
        "- **Mobile-Friendly**: {}\n\n",
        yes_no(page.mobile_friendly)
    ));

    // Narrative
    if let Some(insights) = &report.ai_insights {
        md.push_str("## Insights\n\n");
        md.push_str(insights.trim_end());
        md.push_str("\n\n");
    }

    // Extraction diagnostics
    if !page.errors.is_empty() {
        md.push_str("## Crawl Errors\n\n");
        for error in &page.errors {
            md.push_str(&format!("- {}\n", error));
        }
        md.push('\n');
    }

    md
}

/// Formats a site audit as markdown
///
/// # Arguments
///
/// * `audit` - The site audit
///
/// # Returns
///
/// A formatted markdown string
pub fn format_site_markdown(audit: &SiteAudit) -> String {
    let mut md = String::new();

    md.push_str(&format!("# SEO Site Audit: {}\n\n", audit.seed));
    md.push_str(&format!(
        "- **Analyzed**: {}\n",
        audit.analyzed_at.to_rfc3339()
    ));
    md.push_str(&format!("- **Pages Audited**: {}\n", audit.pages.len()));
    md.push_str(&format!(
        "- **Average Score**: {:.1}\n",
        audit.average_score
    ));
    if audit.cancelled {
        md.push_str("- **Cancelled**: yes (partial results)\n");
    }
    if let Some(hash) = &audit.config_hash {
        md.push_str(&format!("- **Config Hash**: {}\n", hash));
    }
    md.push('\n');

    if audit.pages.is_empty() {
        md.push_str("No pages were crawled.\n");
        return md;
    }

    md.push_str("## Pages\n\n");
    md.push_str("| URL | Status | Overall | Technical | Content | On-Page | Performance | Issues |\n");
    md.push_str("|-----|--------|---------|-----------|---------|---------|-------------|--------|\n");
    for page in &audit.pages {
        let score = &page.seo_score;
        md.push_str(&format!(
            "| {} | {} | {:.1} | {:.1} | {:.1} | {:.1} | {:.1} | {} |\n",
            page.crawl_result.url,
            page.crawl_result.status_code,
            score.overall,
            score.technical,
            score.content,
            score.on_page,
            score.performance,
            score.issues.len()
        ));
    }
    md.push('\n');

    let with_issues: Vec<&AuditReport> = audit
        .pages
        .iter()
        .filter(|p| !p.seo_score.issues.is_empty())
        .collect();
    if !with_issues.is_empty() {
        md.push_str("## Issues by Page\n\n");
        for page in with_issues {
            md.push_str(&format!("### {}\n\n", page.crawl_result.url));
            for issue in &page.seo_score.issues {
                md.push_str(&format!(
                    "- **[{}]** {}: {}\n",
                    issue.severity.as_str().to_uppercase(),
                    issue.title,
                    issue.description
                ));
            }
            md.push('\n');
        }
    }

    md
}

fn push_score_table(md: &mut String, score: &SeoScore) {
    md.push_str("## Scores\n\n");
    md.push_str("| Category | Score |\n");
    md.push_str("|----------|-------|\n");
    md.push_str(&format!("| **Overall** | **{:.1}** |\n", score.overall));
    md.push_str(&format!("| Technical | {:.1} |\n", score.technical));
    md.push_str(&format!("| Content | {:.1} |\n", score.content));
    md.push_str(&format!("| On-Page | {:.1} |\n", score.on_page));
    md.push_str(&format!("| Performance | {:.1} |\n\n", score.performance));

    if let Some(keywords) = score.breakdown.get("keywords") {
        md.push_str(&format!("Keyword relevance: {:.1}\n\n", keywords));
    }
}

fn push_findings(md: &mut String, score: &SeoScore) {
    md.push_str(&format!("## Issues ({})\n\n", score.issues.len()));
    if score.issues.is_empty() {
        md.push_str("No issues found.\n\n");
    }
    for issue in &score.issues {
        md.push_str(&format!(
            "### [{}] {}\n\n",
            issue.severity.as_str().to_uppercase(),
            issue.title
        ));
        md.push_str(&format!("{}\n\n", issue.description));
        md.push_str(&format!("- **Category**: {}\n", issue.category.as_str()));
        md.push_str(&format!("- **Impact**: {}\n", issue.impact));
        md.push_str(&format!("- **How to Fix**: {}\n\n", issue.how_to_fix));
    }

    md.push_str(&format!(
        "## Opportunities ({})\n\n",
        score.opportunities.len()
    ));
    if score.opportunities.is_empty() {
        md.push_str("No opportunities found.\n\n");
        return;
    }
    md.push_str("| Priority | Title | Category | Effort | Potential |\n");
    md.push_str("|----------|-------|----------|--------|-----------|\n");
    for opportunity in &score.opportunities {
        md.push_str(&format!(
            "| {} | {} | {} | {} | +{:.0} |\n",
            opportunity.priority.as_str(),
            opportunity.title,
            opportunity.category.as_str(),
            opportunity.effort.as_str(),
            opportunity.potential
        ));
    }
    md.push('\n');
}

fn or_none(value: &str) -> &str {
    if value.is_empty() {
        "(none)"
    } else {
        value
    }
}

fn yes_no(value: bool) -> &'static str {
    if value {
        "yes"
    } else {
        "no"
    }
}
