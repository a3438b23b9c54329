use sift_web::{HttpPageFetcher, PageFetcher};
use std::time::Duration;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const RELEASE_HTML: &str = r#"<!doctype html>
<html><head>
<meta property="og:title" content="Cabinet approves PM-KUSUM extension">
<title>Press Information Bureau</title>
</head><body>
<nav>Home</nav>
<article><h2>Cabinet approves PM-KUSUM extension</h2><p>The Union Cabinet approved an outlay of ₹34,422 crore.</p><p>Posted On: 12 Jan 2024</p></article>
</body></html>"#;

fn fetcher() -> HttpPageFetcher {
    HttpPageFetcher::new(Duration::from_secs(2), "sift-test").unwrap()
}

#[tokio::test]
async fn fetches_title_and_article_text() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/release"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_raw(RELEASE_HTML, "text/html; charset=utf-8"),
        )
        .mount(&server)
        .await;

    let page = fetcher().fetch(&format!("{}/release", server.uri())).await;

    assert!(!page.is_error());
    assert_eq!(page.title, "Cabinet approves PM-KUSUM extension");
    assert_eq!(
        page.content,
        "Cabinet approves PM-KUSUM extension\nThe Union Cabinet approved an outlay of ₹34,422 crore.\nPosted On: 12 Jan 2024"
    );
}

#[tokio::test]
async fn http_error_status_becomes_error_content() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let url = format!("{}/broken", server.uri());
    let page = fetcher().fetch(&url).await;

    assert!(page.is_error());
    assert_eq!(page.title, url);
    assert!(page.content.starts_with("Error: server returned error 500"));
}

#[tokio::test]
async fn malformed_url_becomes_error_content() {
    let page = fetcher().fetch("not-a-url").await;
    assert!(page.is_error());
    assert_eq!(page.title, "not-a-url");
    assert!(page.content.starts_with("Error: invalid URL"));
}

#[tokio::test]
async fn timeout_becomes_error_content() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(5)))
        .mount(&server)
        .await;

    let fetcher = HttpPageFetcher::new(Duration::from_millis(200), "sift-test").unwrap();
    let page = fetcher.fetch(&server.uri()).await;
    assert!(page.is_error());
    assert!(page.content.contains("timed out"));
}
