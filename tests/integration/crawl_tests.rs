//! Integration tests for the crawler

use crate::helpers::{html_page, test_config};
use content_agent::crawler::{crawl, Crawler};
use std::time::{Duration, Instant};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_crawl_stays_on_site() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();
    let port = url::Url::parse(&base_url).unwrap().port().unwrap();

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(html_page(
            "Home",
            &format!(
                r#"<h1>Welcome to Acme</h1>
                <script>var tracking = "hidden";</script>
                <a href="/about">About</a>
                <a href="{}/services">Services</a>
                <a href="/about#team">Team</a>
                <a href="https://other.example.com/">Elsewhere</a>
                <a href="http://localhost:{}/private">Same port, other host</a>
                <a href="mailto:hello@example.com">Mail</a>"#,
                base_url, port
            ),
        ))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/about"))
        .respond_with(html_page("About", r#"<p>We build clouds</p><a href="/">Home</a>"#))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/services"))
        .respond_with(html_page("Services", "<p>Managed hosting</p>"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let config = test_config(&base_url);
    let corpus = crawl(&config).await.expect("Crawl failed");

    assert_eq!(corpus.len(), 3);
    assert_eq!(
        corpus.urls(),
        vec![
            format!("{}/", base_url),
            format!("{}/about", base_url),
            format!("{}/services", base_url),
        ]
    );

    let home = &corpus.pages()[0];
    assert!(home.content.contains("Welcome to Acme"));
    assert!(!home.content.contains("tracking"));
    assert!(corpus.pages()[1].content.contains("We build clouds"));
}

#[tokio::test]
async fn test_crawl_respects_max_pages() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    let links: String = (1..=5)
        .map(|i| format!(r#"<a href="/p{}">Page {}</a>"#, i, i))
        .collect();

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(html_page("Home", &links))
        .mount(&mock_server)
        .await;

    for i in 1..=5 {
        Mock::given(method("GET"))
            .and(path(format!("/p{}", i)))
            .respond_with(html_page("Page", &format!("<p>page {}</p>", i)))
            .expect(if i <= 2 { 1 } else { 0 })
            .mount(&mock_server)
            .await;
    }

    let mut config = test_config(&base_url);
    config.crawler.max_pages = 3;

    let corpus = crawl(&config).await.expect("Crawl failed");

    assert_eq!(corpus.len(), 3);
    assert_eq!(corpus.urls()[1], format!("{}/p1", base_url));
    assert_eq!(corpus.urls()[2], format!("{}/p2", base_url));
}

#[tokio::test]
async fn test_failed_start_page_gives_empty_corpus() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&mock_server)
        .await;

    let config = test_config(&mock_server.uri());
    let corpus = crawl(&config).await.expect("Crawl should not fail");

    assert!(corpus.is_empty());
}

#[tokio::test]
async fn test_failed_page_is_dropped_and_not_retried() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(html_page(
            "Home",
            r#"<a href="/missing">Missing</a><a href="/ok">Ok</a>"#,
        ))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/missing"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/ok"))
        .respond_with(html_page(
            "Ok",
            r#"<p>Still here</p><a href="/missing">Missing again</a>"#,
        ))
        .mount(&mock_server)
        .await;

    let config = test_config(&base_url);
    let corpus = crawl(&config).await.expect("Crawl failed");

    assert_eq!(
        corpus.urls(),
        vec![format!("{}/", base_url), format!("{}/ok", base_url)]
    );
}

#[tokio::test]
async fn test_failed_pages_count_toward_max_pages() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(html_page(
            "Home",
            r#"<a href="/broken">Broken</a><a href="/fine">Fine</a>"#,
        ))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/broken"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/fine"))
        .respond_with(html_page("Fine", "<p>fine</p>"))
        .expect(0)
        .mount(&mock_server)
        .await;

    let mut config = test_config(&base_url);
    config.crawler.max_pages = 2;

    let corpus = crawl(&config).await.expect("Crawl failed");
    assert_eq!(corpus.len(), 1);
}

#[tokio::test]
async fn test_page_text_is_truncated() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(html_page("Long", &format!("<p>{}</p>", "a".repeat(100))))
        .mount(&mock_server)
        .await;

    let mut config = test_config(&mock_server.uri());
    config.crawler.max_page_chars = 10;

    let crawler = Crawler::new(&config).unwrap();
    let corpus = crawler
        .crawl(&config.crawler.start_url, 1)
        .await
        .expect("Crawl failed");

    assert_eq!(corpus.len(), 1);
    assert_eq!(corpus.pages()[0].content.chars().count(), 10);
}

#[tokio::test]
async fn test_pause_follows_each_successful_fetch() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(html_page("Home", r#"<a href="/next">Next</a>"#))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/next"))
        .respond_with(html_page("Next", "<p>next</p>"))
        .mount(&mock_server)
        .await;

    let mut config = test_config(&mock_server.uri());
    config.crawler.pacing_delay_ms = 200;

    let started = Instant::now();
    let corpus = crawl(&config).await.expect("Crawl failed");

    assert_eq!(corpus.len(), 2);
    assert!(started.elapsed() >= Duration::from_millis(400));
}

#[tokio::test]
async fn test_no_pause_after_failed_fetch() {
    let mock_server = MockServer::start().await;

    let links: String = (1..=4)
        .map(|i| format!(r#"<a href="/gone{}">Gone</a>"#, i))
        .collect();

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(html_page("Home", &links))
        .mount(&mock_server)
        .await;

    let mut config = test_config(&mock_server.uri());
    config.crawler.pacing_delay_ms = 500;

    let started = Instant::now();
    let corpus = crawl(&config).await.expect("Crawl failed");
    let elapsed = started.elapsed();

    // One pause for the start page; the four 404s add none.
    assert_eq!(corpus.len(), 1);
    assert!(elapsed >= Duration::from_millis(500));
    assert!(elapsed < Duration::from_millis(1500));
}
