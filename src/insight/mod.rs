//! Narrative insight boundary
//!
//! Free-form commentary on an audit comes from an external text generator.
//! This module only defines the seam: the [`NarrativeGenerator`] trait, the
//! JSON payload handed to it, and a deadline-bounded call that never fails the
//! audit. No concrete generator ships with the crate.

use crate::analyzer::SeoScore;
use crate::crawler::CrawlResult;
use serde::Serialize;
use std::future::Future;
use std::time::Duration;
use thiserror::Error;

/// Errors raised by a narrative generator
#[derive(Debug, Error)]
pub enum InsightError {
    #[error("Insight generation timed out after {0:?}")]
    Timeout(Duration),

    #[error("Insight generation failed: {0}")]
    Generation(String),

    #[error("Failed to serialize insight payload: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Result type alias for insight operations
pub type InsightResult<T> = std::result::Result<T, InsightError>;

/// Produces opaque narrative text about a scored page
///
/// Implementors receive the payload built by [`build_payload`] and return
/// whatever text they like; the crate places no contract on its content.
pub trait NarrativeGenerator {
    /// Generates narrative text for the payload
    fn generate(
        &self,
        payload: &serde_json::Value,
    ) -> impl Future<Output = InsightResult<String>> + Send;
}

#[derive(Serialize)]
struct InsightPayload<'a> {
    url: &'a str,
    score: &'a SeoScore,
    crawl_data: &'a CrawlResult,
}

/// Builds the `{url, score, crawl_data}` payload sent to a generator
pub fn build_payload(score: &SeoScore, crawl: &CrawlResult) -> InsightResult<serde_json::Value> {
    let payload = InsightPayload {
        url: &crawl.url,
        score,
        crawl_data: crawl,
    };
    Ok(serde_json::to_value(payload)?)
}

/// Asks `generator` for insights, bounded by `deadline`
///
/// Any failure (payload serialization, generator error or timeout) is logged
/// and yields `None`; the audit carries on without insights.
pub async fn generate_insights<G>(
    generator: &G,
    score: &SeoScore,
    crawl: &CrawlResult,
    deadline: Duration,
) -> Option<String>
where
    G: NarrativeGenerator,
{
    match request_insights(generator, score, crawl, deadline).await {
        Ok(text) => {
            tracing::debug!("Received {} bytes of insights for {}", text.len(), crawl.url);
            Some(text)
        }
        Err(e) => {
            tracing::warn!("No insights for {}: {}", crawl.url, e);
            None
        }
    }
}

async fn request_insights<G>(
    generator: &G,
    score: &SeoScore,
    crawl: &CrawlResult,
    deadline: Duration,
) -> InsightResult<String>
where
    G: NarrativeGenerator,
{
    let payload = build_payload(score, crawl)?;
    tokio::time::timeout(deadline, generator.generate(&payload))
        .await
        .map_err(|_| InsightError::Timeout(deadline))?
}
