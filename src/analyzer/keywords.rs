//! Keyword relevance scoring

use crate::crawler::CrawlResult;

const MAX_SCORE: f64 = 100.0;

const TITLE_SHARE: f64 = 0.4;
const DESCRIPTION_SHARE: f64 = 0.2;
const H1_SHARE: f64 = 0.3;
const H2_SHARE: f64 = 0.1;

/// Scores how well a page targets the given keywords, in `[0, 100]`
///
/// Each keyword is worth `100 / K` points, split across the places it can
/// appear: title (40%), meta description (20%), any H1 (30%) and any H2
/// (10%). Matching is case-insensitive substring containment.
///
/// # Arguments
///
/// * `result` - The crawled page
/// * `keywords` - Target keywords; an empty list scores 100
pub fn keyword_score(result: &CrawlResult, keywords: &[String]) -> f64 {
    if keywords.is_empty() {
        return MAX_SCORE;
    }

    let per_keyword = MAX_SCORE / keywords.len() as f64;
    let title = result.title.to_lowercase();
    let description = result.meta_description.to_lowercase();
    let h1_tags = lowercase_all(&result.h1_tags);
    let h2_tags = lowercase_all(&result.h2_tags);

    let mut score = 0.0;
    for keyword in keywords {
        let keyword = keyword.to_lowercase();
        if title.contains(&keyword) {
            score += per_keyword * TITLE_SHARE;
        }
        if description.contains(&keyword) {
            score += per_keyword * DESCRIPTION_SHARE;
        }
        if h1_tags.iter().any(|h| h.contains(&keyword)) {
            score += per_keyword * H1_SHARE;
        }
        if h2_tags.iter().any(|h| h.contains(&keyword)) {
            score += per_keyword * H2_SHARE;
        }
    }

    score.min(MAX_SCORE)
}

fn lowercase_all(items: &[String]) -> Vec<String> {
    items.iter().map(|s| s.to_lowercase()).collect()
}
