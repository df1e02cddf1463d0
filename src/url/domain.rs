use url::Url;

/// Extracts the host key of a URL
///
/// The key is the lowercase host, followed by `:port` when the URL carries an
/// explicit non-default port. It is what traversal scoping and politeness
/// pacing compare, so `http://example.com/` and `https://example.com/` share a
/// key while `http://127.0.0.1:8080/` and `http://127.0.0.1:9090/` do not.
///
/// # Returns
///
/// * `Some(String)` - The host key
/// * `None` - If the URL has no host (e.g. `mailto:`)
///
/// # Examples
///
/// ```
/// use url::Url;
/// use seo_probe::url::extract_host;
///
/// let url = Url::parse("https://EXAMPLE.COM/path").unwrap();
/// assert_eq!(extract_host(&url), Some("example.com".to_string()));
///
/// let url = Url::parse("http://localhost:8080/").unwrap();
/// assert_eq!(extract_host(&url), Some("localhost:8080".to_string()));
/// ```
pub fn extract_host(url: &Url) -> Option<String> {
    let host = url.host_str()?.to_lowercase();
    match url.port() {
        Some(port) => Some(format!("{}:{}", host, port)),
        None => Some(host),
    }
}
