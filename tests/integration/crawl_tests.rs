//! Integration tests for the crawler
//!
//! These tests use wiremock to create mock HTTP servers and test
//! the full fetch, extract and score cycle end-to-end.

use seo_probe::config::{Config, MobileCheck};
use seo_probe::output::{AuditReport, OutputFormat, SiteAudit};
use seo_probe::{extract_host, Analyzer, Crawler, ProbeError};
use std::time::{Duration, Instant};
use tokio_util::sync::CancellationToken;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates a test configuration with the given politeness delay
fn create_test_config(crawl_delay_ms: u64) -> Config {
    let mut config = Config::default();
    config.crawler.crawl_delay_ms = crawl_delay_ms;
    config.crawler.request_timeout_secs = 5;
    config.user_agent.crawler_name = "TestBot".to_string();
    config.user_agent.crawler_version = "1.0.0".to_string();
    config
}

fn html(body: &str) -> ResponseTemplate {
    ResponseTemplate::new(200)
        .set_body_string(body)
        .insert_header("content-type", "text/html; charset=utf-8")
}

/// A page whose body is just links to `hrefs`
fn link_page(title: &str, hrefs: &[&str]) -> String {
    let links: String = hrefs
        .iter()
        .map(|href| format!(r#"<a href="{}">{}</a>"#, href, href))
        .collect();
    format!(
        "<!DOCTYPE html><html><head><title>{}</title></head><body>{}</body></html>",
        title, links
    )
}

async fn mount_page(server: &MockServer, route: &str, body: String, expected_hits: u64) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(html(&body))
        .expect(expected_hits)
        .mount(server)
        .await;
}

fn host_of(url: &str) -> String {
    extract_host(&url::Url::parse(url).unwrap()).unwrap()
}

#[tokio::test]
async fn test_single_page_crawl_extracts_signals() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    let body = format!(
        r#"<!DOCTYPE html>
        <html><head>
            <title>Crawler Test Page</title>
            <meta name="description" content="A page used to test signal extraction">
            <link rel="canonical" href="{base}/">
        </head><body>
            <h1>Main Heading</h1>
            <h2>First Section</h2>
            <h2>Second Section</h2>
            <p>Some body text for the word counter.</p>
            <a href="/about">About</a>
            <a href="contact">Contact</a>
            <img src="/logo.png" alt="Logo" width="120" height="40">
            <img src="/banner.png">
        </body></html>"#,
        base = base_url
    );
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(html(&body).insert_header("x-served-by", "mock"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let crawler = Crawler::new(&create_test_config(0)).unwrap();
    let result = crawler.crawl_page(&format!("{}/", base_url)).await.unwrap();

    assert_eq!(result.status_code, 200);
    assert_eq!(result.title, "Crawler Test Page");
    assert_eq!(result.meta_description, "A page used to test signal extraction");
    assert_eq!(result.canonical_url, format!("{}/", base_url));
    assert_eq!(result.h1_tags, vec!["Main Heading"]);
    assert_eq!(result.h2_tags, vec!["First Section", "Second Section"]);
    assert_eq!(
        result.links,
        vec![format!("{}/about", base_url), format!("{}/contact", base_url)]
    );
    assert_eq!(result.images.len(), 2);
    assert_eq!(result.images[0].src, format!("{}/logo.png", base_url));
    assert_eq!(result.images[0].width, 120);
    assert_eq!(result.missing_alt_count(), 1);
    assert!(result.word_count > 0);
    assert!(!result.has_https);
    assert_eq!(result.headers.get("x-served-by").map(String::as_str), Some("mock"));
    assert_eq!(result.response_size, body.len() as u64);
    assert!(crawler.is_visited(&format!("{}/", base_url)));
}

#[tokio::test]
async fn test_links_resolve_against_final_url() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    Mock::given(method("GET"))
        .and(path("/old"))
        .respond_with(ResponseTemplate::new(301).insert_header("location", "/docs/"))
        .mount(&mock_server)
        .await;
    mount_page(&mock_server, "/docs/", link_page("Docs", &["guide"]), 1).await;

    let crawler = Crawler::new(&create_test_config(0)).unwrap();
    let result = crawler.crawl_page(&format!("{}/old", base_url)).await.unwrap();

    assert_eq!(result.status_code, 200);
    assert_eq!(result.links, vec![format!("{}/docs/guide", base_url)]);
}

#[tokio::test]
async fn test_site_crawl_stays_on_host_and_respects_budget() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();
    let port = url::Url::parse(&base_url).unwrap().port().unwrap();
    let foreign = format!("http://localhost:{}/external", port);

    mount_page(
        &mock_server,
        "/",
        link_page("Home", &[foreign.as_str(), "/a", "/b", "/c"]),
        1,
    )
    .await;
    mount_page(&mock_server, "/a", link_page("A", &["/"]), 1).await;
    mount_page(&mock_server, "/b", link_page("B", &["/"]), 0).await;
    mount_page(&mock_server, "/c", link_page("C", &["/"]), 0).await;
    mount_page(&mock_server, "/external", link_page("External", &[]), 0).await;

    let crawler = Crawler::new(&create_test_config(0)).unwrap();
    let crawl = crawler
        .crawl_site(&format!("{}/", base_url), 2, &CancellationToken::new())
        .await
        .unwrap();

    assert!(!crawl.cancelled);
    assert_eq!(crawl.results.len(), 2);
    let seed_host = host_of(&base_url);
    for result in &crawl.results {
        assert_eq!(host_of(&result.url), seed_host);
    }
    assert_eq!(crawl.results[0].title, "Home");
    assert_eq!(crawl.results[1].title, "A");
}

#[tokio::test]
async fn test_site_crawl_never_revisits_a_url() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    // Every page links back to every other page, with and without fragments
    let all = ["/", "/a", "/b", "/#top", "/a#section", "./b", "/b"];
    mount_page(&mock_server, "/", link_page("Home", &all), 1).await;
    mount_page(&mock_server, "/a", link_page("A", &all), 1).await;
    mount_page(&mock_server, "/b", link_page("B", &all), 1).await;

    let crawler = Crawler::new(&create_test_config(0)).unwrap();
    let crawl = crawler
        .crawl_site(&format!("{}/", base_url), 10, &CancellationToken::new())
        .await
        .unwrap();

    let mut urls: Vec<&str> = crawl.results.iter().map(|r| r.url.as_str()).collect();
    let total = urls.len();
    urls.sort();
    urls.dedup();
    assert_eq!(urls.len(), total);
    assert_eq!(total, 3);
}

#[tokio::test]
async fn test_site_crawl_skips_failed_page_once() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_page(
        &mock_server,
        "/",
        link_page("Home", &["/broken", "/ok", "/broken"]),
        1,
    )
    .await;
    mount_page(&mock_server, "/ok", link_page("Ok", &["/broken"]), 1).await;
    Mock::given(method("GET"))
        .and(path("/broken"))
        .respond_with(ResponseTemplate::new(302).insert_header("location", "/broken"))
        .mount(&mock_server)
        .await;

    let crawler = Crawler::new(&create_test_config(0)).unwrap();
    let crawl = crawler
        .crawl_site(&format!("{}/", base_url), 10, &CancellationToken::new())
        .await
        .unwrap();

    let titles: Vec<&str> = crawl.results.iter().map(|r| r.title.as_str()).collect();
    assert_eq!(titles, vec!["Home", "Ok"]);
    assert!(!crawler.is_visited(&format!("{}/broken", base_url)));

    // One failed attempt follows the redirect chain once; a second attempt would double it
    let requests = mock_server.received_requests().await.unwrap();
    let broken_hits = requests.iter().filter(|r| r.url.path() == "/broken").count();
    assert!(broken_hits >= 1);
    assert!(broken_hits <= seo_probe::crawler::MAX_REDIRECTS + 2);
}

#[tokio::test]
async fn test_crawl_page_redirect_loop_error() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/loop"))
        .respond_with(ResponseTemplate::new(302).insert_header("location", "/loop"))
        .mount(&mock_server)
        .await;

    let crawler = Crawler::new(&create_test_config(0)).unwrap();
    let result = crawler
        .crawl_page(&format!("{}/loop", mock_server.uri()))
        .await;
    assert!(matches!(result, Err(ProbeError::TooManyRedirects { .. })));
}

#[tokio::test]
async fn test_same_host_requests_are_spaced() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();
    mount_page(&mock_server, "/one", link_page("One", &[]), 1).await;
    mount_page(&mock_server, "/two", link_page("Two", &[]), 1).await;

    let delay = Duration::from_millis(300);
    let crawler = Crawler::new(&create_test_config(delay.as_millis() as u64)).unwrap();

    let started = Instant::now();
    crawler.crawl_page(&format!("{}/one", base_url)).await.unwrap();
    crawler.crawl_page(&format!("{}/two", base_url)).await.unwrap();

    // 5ms scheduling tolerance
    assert!(started.elapsed() + Duration::from_millis(5) >= delay);
}

#[tokio::test]
async fn test_cancellation_returns_partial_results() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    for (route, title) in [("/", "Home"), ("/p1", "P1"), ("/p2", "P2"), ("/p3", "P3")] {
        Mock::given(method("GET"))
            .and(path(route))
            .respond_with(
                html(&link_page(title, &["/p1", "/p2", "/p3"]))
                    .set_delay(Duration::from_millis(300)),
            )
            .mount(&mock_server)
            .await;
    }

    let crawler = Crawler::new(&create_test_config(0)).unwrap();
    let token = CancellationToken::new();
    let canceller = token.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(450)).await;
        canceller.cancel();
    });

    let crawl = crawler
        .crawl_site(&format!("{}/", base_url), 10, &token)
        .await
        .unwrap();

    assert!(crawl.cancelled);
    assert!(!crawl.results.is_empty());
    assert!(crawl.results.len() < 4);
    assert_eq!(crawl.results[0].title, "Home");
}

#[tokio::test]
async fn test_mobile_check_modes() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    Mock::given(method("GET"))
        .and(path("/header"))
        .respond_with(
            html(&link_page("Header", &[])).insert_header("viewport", "width=device-width"),
        )
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/meta"))
        .respond_with(html(
            r#"<!DOCTYPE html><html><head><title>Meta</title>
            <meta name="viewport" content="width=device-width, initial-scale=1">
            </head><body></body></html>"#,
        ))
        .mount(&mock_server)
        .await;

    let header_mode = Crawler::new(&create_test_config(0)).unwrap();
    assert!(header_mode.config().mobile_check == MobileCheck::ViewportHeader);
    let by_header = header_mode
        .crawl_page(&format!("{}/header", base_url))
        .await
        .unwrap();
    let by_meta = header_mode
        .crawl_page(&format!("{}/meta", base_url))
        .await
        .unwrap();
    assert!(by_header.mobile_friendly);
    assert!(!by_meta.mobile_friendly);

    let mut config = create_test_config(0);
    config.crawler.mobile_check = MobileCheck::ViewportMeta;
    let meta_mode = Crawler::new(&config).unwrap();
    let by_header = meta_mode
        .crawl_page(&format!("{}/header", base_url))
        .await
        .unwrap();
    let by_meta = meta_mode
        .crawl_page(&format!("{}/meta", base_url))
        .await
        .unwrap();
    assert!(!by_header.mobile_friendly);
    assert!(by_meta.mobile_friendly);
}

#[tokio::test]
async fn test_malformed_markup_recovers_unless_strict() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();
    Mock::given(method("GET"))
        .and(path("/messy"))
        .respond_with(html(
            "<html><title>Messy</title><body><p><b>unclosed</p></i><h1>Still here</h1>",
        ))
        .mount(&mock_server)
        .await;

    let lenient = Crawler::new(&create_test_config(0)).unwrap();
    let result = lenient
        .crawl_page(&format!("{}/messy", base_url))
        .await
        .unwrap();
    assert_eq!(result.title, "Messy");
    assert_eq!(result.h1_tags, vec!["Still here"]);
    assert!(result.errors.iter().any(|e| e.starts_with("HTML parse:")));

    let mut config = create_test_config(0);
    config.crawler.strict_html = true;
    let strict = Crawler::new(&config).unwrap();
    let result = strict.crawl_page(&format!("{}/messy", base_url)).await;
    assert!(matches!(result, Err(ProbeError::HtmlParse { .. })));
}

#[tokio::test]
async fn test_crawl_and_score_end_to_end() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();
    mount_page(
        &mock_server,
        "/",
        r#"<!DOCTYPE html><html><head><title>Rust SEO</title></head>
        <body><h1>Rust crawler</h1><p>Short page.</p></body></html>"#
            .to_string(),
        1,
    )
    .await;

    let crawler = Crawler::new(&create_test_config(0)).unwrap();
    let result = crawler.crawl_page(&format!("{}/", base_url)).await.unwrap();
    let report = AuditReport::new(result, &Analyzer::new(["rust"]));
    let score = &report.seo_score;

    let titles: Vec<&str> = score.issues.iter().map(|i| i.title.as_str()).collect();
    assert_eq!(
        titles,
        vec![
            "Missing HTTPS",
            "Not Mobile-Friendly",
            "Thin Content",
            "Title Too Short"
        ]
    );
    // title 40% + h1 30%
    assert_eq!(score.breakdown.get("keywords"), Some(&70.0));
    assert!((0.0..=100.0).contains(&score.overall));

    let rendered = OutputFormat::Json.render_page(&report).unwrap();
    let json: serde_json::Value = serde_json::from_str(&rendered).unwrap();
    assert_eq!(json["crawl_result"]["title"], "Rust SEO");
    assert_eq!(json["seo_score"]["issues"][0]["category"], "security");
}

#[tokio::test]
async fn test_site_audit_end_to_end() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();
    mount_page(&mock_server, "/", link_page("Home", &["/about"]), 1).await;
    mount_page(&mock_server, "/about", link_page("About", &[]), 1).await;

    let crawler = Crawler::new(&create_test_config(0)).unwrap();
    let seed = format!("{}/", base_url);
    let crawl = crawler
        .crawl_site(&seed, 5, &CancellationToken::new())
        .await
        .unwrap();
    let audit = SiteAudit::from_crawl(&seed, crawl, &Analyzer::default());

    assert_eq!(audit.pages.len(), 2);
    let mean = audit
        .pages
        .iter()
        .map(|p| p.seo_score.overall)
        .sum::<f64>()
        / 2.0;
    assert!((audit.average_score - mean).abs() < 1e-9);

    let markdown = OutputFormat::Markdown.render_site(&audit).unwrap();
    assert!(markdown.contains("- **Pages Audited**: 2"));
}
