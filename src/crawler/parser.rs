//! HTML extraction of SEO signals
//!
//! One pre-order walk over the parsed DOM collects everything the scoring
//! engine needs. Nodes are dispatched by kind: elements feed the tag-specific
//! collectors, text nodes feed the word count, everything else is ignored.
//!
//! The parser is lenient (html5ever error recovery); markup errors it had to
//! recover from are reported in [`ExtractedPage::parse_errors`].

use crate::url::resolve_href;
use scraper::node::{Element, Node};
use scraper::{ElementRef, Html};
use url::Url;

/// Signals extracted from one HTML document
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExtractedPage {
    /// Trimmed text of the first `<title>` element
    pub title: String,

    /// Content of the first `name="description"` or `property="og:description"` meta tag
    pub meta_description: String,

    pub h1_tags: Vec<String>,
    pub h2_tags: Vec<String>,

    /// Absolute anchor targets in document order
    pub links: Vec<String>,

    pub images: Vec<ExtractedImage>,

    /// `href` of the first `<link rel="canonical">`, as written
    pub canonical_url: String,

    /// Content of the first `<meta name="viewport">` tag, if any
    pub viewport_meta: Option<String>,

    pub word_count: usize,

    /// Markup errors the parser recovered from
    pub parse_errors: Vec<String>,
}

/// An `<img>` element with a resolvable `src`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractedImage {
    pub src: String,
    pub alt: String,
    pub title: String,
    pub width: u32,
    pub height: u32,
}

/// Parses HTML content and extracts SEO signals
///
/// # Extraction Rules
///
/// - `title`: first `<title>` only
/// - meta description: first `description` / `og:description`, first wins
/// - `h1`/`h2`: trimmed text per element, empty headings skipped
/// - links: non-empty `href` of every `<a>`, resolved against `base_url`;
///   unresolvable values are dropped
/// - images: non-empty `src` of every `<img>`, resolved; `alt`/`title` verbatim
/// - canonical: `href` of the first `<link rel="canonical">`
/// - word count: whitespace tokens over every text node, boilerplate included
///
/// # Example
///
/// ```
/// use seo_probe::crawler::parse_html;
/// use url::Url;
///
/// let html = r#"<html><head><title>Test</title></head><body><a href="/page">Link</a></body></html>"#;
/// let base_url = Url::parse("https://example.com/").unwrap();
/// let page = parse_html(html, &base_url);
/// assert_eq!(page.title, "Test");
/// assert_eq!(page.links, vec!["https://example.com/page".to_string()]);
/// ```
pub fn parse_html(html: &str, base_url: &Url) -> ExtractedPage {
    let document = Html::parse_document(html);
    let mut page = ExtractedPage {
        parse_errors: document.errors.iter().map(|e| e.to_string()).collect(),
        ..ExtractedPage::default()
    };
    let mut seen_title = false;

    for node in document.tree.root().descendants() {
        match node.value() {
            Node::Element(_) => {
                if let Some(element) = ElementRef::wrap(node) {
                    visit_element(&mut page, &mut seen_title, element, base_url);
                }
            }
            Node::Text(text) => page.word_count += text.split_whitespace().count(),
            _ => {}
        }
    }

    page
}

fn visit_element(
    page: &mut ExtractedPage,
    seen_title: &mut bool,
    node: ElementRef<'_>,
    base_url: &Url,
) {
    let element = node.value();
    match element.name() {
        "title" if !*seen_title => {
            *seen_title = true;
            page.title = element_text(node);
        }
        "meta" => visit_meta(page, element),
        "h1" => push_heading(&mut page.h1_tags, node),
        "h2" => push_heading(&mut page.h2_tags, node),
        "a" => {
            if let Some(link) = element.attr("href").and_then(|href| resolve_href(href, base_url)) {
                page.links.push(link);
            }
        }
        "img" => {
            if let Some(src) = element.attr("src").and_then(|src| resolve_href(src, base_url)) {
                page.images.push(ExtractedImage {
                    src,
                    alt: element.attr("alt").unwrap_or_default().to_string(),
                    title: element.attr("title").unwrap_or_default().to_string(),
                    width: dimension(element.attr("width")),
                    height: dimension(element.attr("height")),
                });
            }
        }
        "link" if page.canonical_url.is_empty() && has_rel(element, "canonical") => {
            if let Some(href) = element.attr("href") {
                page.canonical_url = href.trim().to_string();
            }
        }
        _ => {}
    }
}

fn visit_meta(page: &mut ExtractedPage, element: &Element) {
    let name = element.attr("name").unwrap_or_default();
    let property = element.attr("property").unwrap_or_default();
    let content = element.attr("content").unwrap_or_default();

    let is_description =
        name.eq_ignore_ascii_case("description") || property.eq_ignore_ascii_case("og:description");
    if is_description && page.meta_description.is_empty() {
        page.meta_description = content.to_string();
    }

    if name.eq_ignore_ascii_case("viewport") && page.viewport_meta.is_none() {
        page.viewport_meta = Some(content.to_string());
    }
}

fn push_heading(headings: &mut Vec<String>, node: ElementRef<'_>) {
    let text = element_text(node);
    if !text.is_empty() {
        headings.push(text);
    }
}

/// Concatenated descendant text, trimmed
fn element_text(node: ElementRef<'_>) -> String {
    node.text().collect::<String>().trim().to_string()
}

fn has_rel(element: &Element, wanted: &str) -> bool {
    element
        .attr("rel")
        .map(|rel| rel.split_whitespace().any(|t| t.eq_ignore_ascii_case(wanted)))
        .unwrap_or(false)
}

/// Parses a `width`/`height` attribute; anything but a plain integer is 0
fn dimension(value: Option<&str>) -> u32 {
    value
        .map(|v| v.trim().trim_end_matches("px"))
        .and_then(|v| v.parse().ok())
        .unwrap_or(0)
}
