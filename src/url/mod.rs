//! URL handling module for SEO-Probe
//!
//! This module provides crawl-target validation, href resolution, host keys
//! for scoping and pacing, and the fragment-free keys a traversal dedups on.

mod domain;
mod normalize;

pub use domain::extract_host;
pub use normalize::{frontier_key, parse_target, resolve_href};

use ::url::Url;

/// Returns true when `candidate` lives on the same host as `seed`
///
/// # Examples
///
/// ```
/// use seo_probe::url::same_host;
/// use url::Url;
///
/// let seed = Url::parse("https://example.com/").unwrap();
/// assert!(same_host(&seed, &Url::parse("https://EXAMPLE.com/a").unwrap()));
/// assert!(!same_host(&seed, &Url::parse("https://blog.example.com/").unwrap()));
/// ```
pub fn same_host(seed: &Url, candidate: &Url) -> bool {
    match (extract_host(seed), extract_host(candidate)) {
        (Some(a), Some(b)) => a == b,
        _ => false,
    }
}
