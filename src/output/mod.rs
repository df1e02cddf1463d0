//! Output module for audit reports
//!
//! This module handles:
//! - Building scored audit reports from crawl results
//! - Rendering reports as JSON or markdown
//! - Writing rendered reports to disk

mod markdown;
mod report;

pub use markdown::{format_markdown_report, format_site_markdown, write_report};
pub use report::{AuditReport, SiteAudit};

use thiserror::Error;

/// Errors that can occur during output operations
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("Failed to format output: {0}")]
    Format(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;

/// Supported report formats
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Pretty-printed JSON
    #[default]
    Json,
    /// Human-readable markdown
    Markdown,
}

impl OutputFormat {
    /// Renders a single-page audit
    pub fn render_page(&self, report: &AuditReport) -> OutputResult<String> {
        match self {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(report)?),
            OutputFormat::Markdown => Ok(format_markdown_report(report)),
        }
    }

    /// Renders a site audit
    pub fn render_site(&self, audit: &SiteAudit) -> OutputResult<String> {
        match self {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(audit)?),
            OutputFormat::Markdown => Ok(format_site_markdown(audit)),
        }
    }
}
