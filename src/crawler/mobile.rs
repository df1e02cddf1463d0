//! Mobile-friendliness heuristic
//!
//! Two modes are supported, selected by `crawler.mobile-check`:
//!
//! - `viewport-header` (default): true iff a response header named `viewport`
//!   exists and contains `width=device-width`, case-insensitively. Real servers
//!   rarely send such a header, so most pages are not mobile-friendly here.
//! - `viewport-meta`: the same test applied to the parsed
//!   `<meta name="viewport">` content.

use crate::config::MobileCheck;
use std::collections::BTreeMap;

const DEVICE_WIDTH: &str = "width=device-width";

/// Decides whether a page is mobile-friendly
///
/// # Arguments
///
/// * `check` - Which signal to inspect
/// * `headers` - Response headers of the page
/// * `viewport_meta` - Content of the page's `<meta name="viewport">`, if any
pub fn is_mobile_friendly(
    check: MobileCheck,
    headers: &BTreeMap<String, String>,
    viewport_meta: Option<&str>,
) -> bool {
    let viewport = match check {
        MobileCheck::ViewportHeader => headers
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case("viewport"))
            .map(|(_, value)| value.as_str()),
        MobileCheck::ViewportMeta => viewport_meta,
    };

    viewport
        .map(|value| value.to_lowercase().contains(DEVICE_WIDTH))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    const META: Option<&str> = Some("width=device-width, initial-scale=1");

    #[test]
    fn test_header_mode_accepts_viewport_header() {
        let h = headers(&[("viewport", "Width=Device-Width, initial-scale=1")]);
        assert!(is_mobile_friendly(MobileCheck::ViewportHeader, &h, None));
    }

    #[test]
    fn test_header_mode_ignores_meta_tag() {
        // The parsed meta tag is deliberately not consulted in this mode
        let h = headers(&[("content-type", "text/html")]);
        assert!(!is_mobile_friendly(MobileCheck::ViewportHeader, &h, META));
    }

    #[test]
    fn test_header_mode_requires_device_width() {
        let h = headers(&[("viewport", "width=1024")]);
        assert!(!is_mobile_friendly(MobileCheck::ViewportHeader, &h, None));
    }

    #[test]
    fn test_meta_mode_uses_parsed_tag() {
        let h = headers(&[]);
        assert!(is_mobile_friendly(MobileCheck::ViewportMeta, &h, META));
        assert!(!is_mobile_friendly(MobileCheck::ViewportMeta, &h, Some("width=1024")));
        assert!(!is_mobile_friendly(MobileCheck::ViewportMeta, &h, None));
    }

    #[test]
    fn test_meta_mode_ignores_header() {
        let h = headers(&[("viewport", "width=device-width")]);
        assert!(!is_mobile_friendly(MobileCheck::ViewportMeta, &h, None));
    }
}
