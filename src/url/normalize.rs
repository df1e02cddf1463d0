use crate::{UrlError, UrlResult};
use url::Url;

/// Parses a crawl target, accepting only HTTP(S) URLs with a host
///
/// # Examples
///
/// ```
/// use seo_probe::url::parse_target;
///
/// assert!(parse_target("https://example.com/").is_ok());
/// assert!(parse_target("ftp://example.com/").is_err());
/// assert!(parse_target("not a url").is_err());
/// ```
pub fn parse_target(url_str: &str) -> UrlResult<Url> {
    let url = Url::parse(url_str.trim()).map_err(|e| UrlError::Parse(e.to_string()))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(UrlError::InvalidScheme(format!(
            "Only HTTP and HTTPS schemes are supported, got: {}",
            url.scheme()
        )));
    }

    if url.host_str().is_none() {
        return Err(UrlError::MissingHost);
    }

    Ok(url)
}

/// Resolves an attribute value (href/src) against the page's base URL
///
/// Returns `None` for empty values and for values the URL parser rejects.
/// Absolute values are re-serialized in canonical form.
pub fn resolve_href(href: &str, base_url: &Url) -> Option<String> {
    let href = href.trim();
    if href.is_empty() {
        return None;
    }

    base_url.join(href).ok().map(|resolved| resolved.to_string())
}

/// Returns the key a traversal uses to recognise a page it has already seen
///
/// The fragment is removed; everything else is kept as serialized.
///
/// # Examples
///
/// ```
/// use seo_probe::url::frontier_key;
/// use url::Url;
///
/// let url = Url::parse("https://example.com/docs#install").unwrap();
/// assert_eq!(frontier_key(&url), "https://example.com/docs");
/// ```
pub fn frontier_key(url: &Url) -> String {
    let mut url = url.clone();
    url.set_fragment(None);
    url.to_string()
}
