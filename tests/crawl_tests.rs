//! Integration tests for the harvester
//!
//! These tests use wiremock to create mock HTTP servers and test
//! the full crawl and export cycle end-to-end.

use chrono::Local;
use site_harvester::config::Config;
use site_harvester::crawler::{Coordinator, CrawlReport};
use site_harvester::identity::UserAgentPool;
use site_harvester::output::{export, read_results_json, ExportPaths};
use site_harvester::proxy::ProxyRotator;
use site_harvester::HarvestError;
use std::time::Duration;
use tempfile::TempDir;
use url::Url;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const TEST_AGENT: &str = "HarvestTest/1.0";

/// Creates a test configuration with no politeness delay
fn create_test_config(max_pages: Option<usize>) -> Config {
    let mut config = Config::default();
    config.crawler.delay_secs = 0.0;
    config.crawler.timeout_secs = 5;
    config.crawler.max_pages = max_pages;
    config
}

fn coordinator(config: Config, seed: &str) -> Coordinator {
    Coordinator::new(
        config,
        Url::parse(seed).expect("Failed to parse seed URL"),
        UserAgentPool::with_seed(vec![TEST_AGENT.to_string()], 7),
        ProxyRotator::direct(),
    )
    .expect("Failed to create coordinator")
}

async fn crawl(config: Config, seed: &str) -> CrawlReport {
    coordinator(config, seed)
        .run()
        .await
        .expect("Crawl should complete")
}

fn html_page(body: &str) -> ResponseTemplate {
    ResponseTemplate::new(200)
        .set_body_string(format!("<html><body>{}</body></html>", body))
        .insert_header("content-type", "text/html")
}

async fn mount_page(server: &MockServer, route: &str, body: &str, expected_hits: u64) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(html_page(body))
        .expect(expected_hits)
        .mount(server)
        .await;
}

fn visited_paths(report: &CrawlReport) -> Vec<String> {
    report.visited.iter().map(|u| u.path().to_string()).collect()
}

#[tokio::test]
async fn test_breadth_first_crawl_with_page_limit() {
    let mock_server = MockServer::start().await;
    let other_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_page(
        &mock_server,
        "/",
        &format!(
            r#"<a href="/a">A</a> <a href="{}/b">B</a> <a href="{}/c">C</a>
               <p>Contact a@b.com or call 555-123-4567</p>"#,
            base_url,
            other_server.uri()
        ),
        1,
    )
    .await;
    mount_page(&mock_server, "/a", r#"<a href="/d">D</a>"#, 1).await;
    mount_page(&mock_server, "/b", r#"<a href="/e">E</a>"#, 1).await;
    mount_page(&mock_server, "/d", "", 0).await;
    mount_page(&mock_server, "/e", "", 0).await;

    // Different port, different network location
    Mock::given(method("GET"))
        .respond_with(html_page("elsewhere"))
        .expect(0)
        .mount(&other_server)
        .await;

    let report = crawl(create_test_config(Some(3)), &format!("{}/", base_url)).await;

    assert_eq!(visited_paths(&report), vec!["/", "/a", "/b"]);
    assert_eq!(report.pages_scraped(), 3);
    assert_eq!(report.store.len(), 3);
    assert_eq!(report.failures, 0);
    assert!(!report.cancelled);

    let seed_record = &report.store.records()[0];
    assert!(seed_record.emails.contains("a@b.com"));
    assert!(seed_record.phones.contains("555-123-4567"));
    assert_eq!(seed_record.links.len(), 3);
}

#[tokio::test]
async fn test_not_found_page_is_skipped() {
    let mock_server = MockServer::start().await;

    mount_page(
        &mock_server,
        "/",
        r#"<a href="/missing">Missing</a> <a href="/ok">Ok</a>"#,
        1,
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/missing"))
        .respond_with(ResponseTemplate::new(404).set_body_string(r#"<a href="/hidden">x</a>"#))
        .expect(1)
        .mount(&mock_server)
        .await;
    mount_page(&mock_server, "/ok", "fine", 1).await;
    mount_page(&mock_server, "/hidden", "", 0).await;

    let report = crawl(create_test_config(None), &format!("{}/", mock_server.uri())).await;

    assert_eq!(visited_paths(&report), vec!["/", "/missing", "/ok"]);
    assert_eq!(report.failures, 1);
    let recorded: Vec<&str> = report
        .store
        .records()
        .iter()
        .map(|r| r.url.as_str())
        .collect();
    assert_eq!(recorded.len(), 2);
    assert!(recorded.iter().all(|u| !u.ends_with("/missing")));
}

#[tokio::test]
async fn test_empty_body_is_visited_but_not_recorded() {
    let mock_server = MockServer::start().await;
    let output_dir = TempDir::new().expect("Failed to create temp dir");

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(200).set_body_string(""))
        .expect(1)
        .mount(&mock_server)
        .await;

    let report = crawl(create_test_config(None), &format!("{}/", mock_server.uri())).await;

    assert_eq!(report.pages_scraped(), 1);
    assert_eq!(report.failures, 0);
    assert!(report.store.is_empty());

    let result = export(&report, output_dir.path(), &Local::now());
    assert!(matches!(result, Err(HarvestError::EmptyResultSet)));
}

#[tokio::test]
async fn test_empty_linked_page_does_not_stop_crawl() {
    let mock_server = MockServer::start().await;

    mount_page(
        &mock_server,
        "/",
        r#"<a href="/blank">Blank</a> <a href="/full">Full</a>"#,
        1,
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/blank"))
        .respond_with(ResponseTemplate::new(200).set_body_string(""))
        .expect(1)
        .mount(&mock_server)
        .await;
    mount_page(&mock_server, "/full", "content", 1).await;

    let report = crawl(create_test_config(None), &format!("{}/", mock_server.uri())).await;

    assert_eq!(visited_paths(&report), vec!["/", "/blank", "/full"]);
    let recorded: Vec<&str> = report
        .store
        .records()
        .iter()
        .map(|r| r.url.as_str())
        .collect();
    assert_eq!(recorded.len(), 2);
    assert!(recorded.iter().all(|u| !u.ends_with("/blank")));
}

#[tokio::test]
async fn test_page_without_links_fetched_once() {
    let mock_server = MockServer::start().await;
    mount_page(&mock_server, "/", "<p>Nothing to see</p>", 1).await;

    let report = crawl(create_test_config(None), &format!("{}/", mock_server.uri())).await;

    assert_eq!(report.pages_scraped(), 1);
    assert_eq!(report.store.len(), 1);
}

#[tokio::test]
async fn test_zero_page_limit_makes_no_requests() {
    let mock_server = MockServer::start().await;
    mount_page(&mock_server, "/", "<p>never</p>", 0).await;

    let report = crawl(create_test_config(Some(0)), &format!("{}/", mock_server.uri())).await;

    assert_eq!(report.pages_scraped(), 0);
    assert!(report.store.is_empty());
}

#[tokio::test]
async fn test_seed_fetched_once_despite_self_links() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_page(
        &mock_server,
        "/",
        &format!(
            r##"<a href="/">Home</a> <a href="{}/">Home again</a> <a href="#top">Top</a>
                <a href="/a">A</a>"##,
            base_url
        ),
        1,
    )
    .await;
    mount_page(&mock_server, "/a", r#"<a href="/">Back</a>"#, 1).await;

    let report = crawl(create_test_config(None), &format!("{}/", base_url)).await;

    assert_eq!(visited_paths(&report), vec!["/", "/a"]);
}

#[tokio::test]
async fn test_skipped_extensions_never_requested() {
    let mock_server = MockServer::start().await;

    mount_page(
        &mock_server,
        "/",
        r#"<a href="/doc.pdf">Doc</a> <a href="/logo.png">Logo</a>
           <a href="/anim.gif">Gif</a> <a href="/photo.PNG">Photo</a>"#,
        1,
    )
    .await;
    mount_page(&mock_server, "/doc.pdf", "", 0).await;
    mount_page(&mock_server, "/logo.png", "", 0).await;
    mount_page(&mock_server, "/anim.gif", "", 0).await;
    // Suffix match is case-sensitive by default
    mount_page(&mock_server, "/photo.PNG", "", 1).await;

    let report = crawl(create_test_config(None), &format!("{}/", mock_server.uri())).await;

    assert_eq!(visited_paths(&report), vec!["/", "/photo.PNG"]);
}

#[tokio::test]
async fn test_case_insensitive_extensions_option() {
    let mock_server = MockServer::start().await;

    mount_page(&mock_server, "/", r#"<a href="/photo.PNG">Photo</a>"#, 1).await;
    mount_page(&mock_server, "/photo.PNG", "", 0).await;

    let mut config = create_test_config(None);
    config.crawler.case_insensitive_extensions = true;
    let report = crawl(config, &format!("{}/", mock_server.uri())).await;

    assert_eq!(visited_paths(&report), vec!["/"]);
}

#[tokio::test]
async fn test_request_headers_sent() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/"))
        .and(header("user-agent", TEST_AGENT))
        .and(header("dnt", "1"))
        .and(header("upgrade-insecure-requests", "1"))
        .respond_with(html_page("hello"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let report = crawl(create_test_config(None), &format!("{}/", mock_server.uri())).await;

    assert_eq!(report.store.len(), 1);
}

#[tokio::test]
async fn test_cancellation_interrupts_delay() {
    let mock_server = MockServer::start().await;

    mount_page(&mock_server, "/", r#"<a href="/a">A</a>"#, 1).await;
    mount_page(&mock_server, "/a", "", 0).await;

    let mut config = create_test_config(None);
    config.crawler.delay_secs = 60.0;
    let coordinator = coordinator(config, &format!("{}/", mock_server.uri()));
    let cancel = coordinator.cancellation_token();

    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(300)).await;
        cancel.cancel();
    });

    let report = tokio::time::timeout(Duration::from_secs(10), coordinator.run())
        .await
        .expect("Cancellation should end the crawl promptly")
        .expect("Crawl should complete");

    assert!(report.cancelled);
    assert_eq!(visited_paths(&report), vec!["/"]);
    assert_eq!(report.store.len(), 1);
}

#[tokio::test]
async fn test_export_writes_all_artifacts() {
    let mock_server = MockServer::start().await;
    let output_dir = TempDir::new().expect("Failed to create temp dir");

    mount_page(
        &mock_server,
        "/",
        r#"<a href="/a">A</a> <form action="/s"><input name="q"></form>"#,
        1,
    )
    .await;
    mount_page(&mock_server, "/a", "write to x@y.io", 1).await;

    let report = crawl(create_test_config(None), &format!("{}/", mock_server.uri())).await;

    let started = Local::now();
    let target = output_dir.path().join("nested");
    let (paths, summary) = export(&report, &target, &started).expect("Export should succeed");

    assert_eq!(paths, ExportPaths::for_run(&target, &started));
    assert!(paths.results_csv.exists());
    assert!(paths.summary_json.exists());

    let restored = read_results_json(&paths.results_json).expect("Failed to read dump");
    assert_eq!(restored, report.store.records());

    assert_eq!(summary.pages_scraped, 2);
    assert_eq!(summary.total_links, 1);
    assert_eq!(summary.total_emails, 1);
    assert_eq!(summary.total_forms, 1);
    assert!(summary.start_time <= summary.end_time);
}

#[tokio::test]
async fn test_export_without_records_fails_after_dump() {
    let mock_server = MockServer::start().await;
    let output_dir = TempDir::new().expect("Failed to create temp dir");

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&mock_server)
        .await;

    let report = crawl(create_test_config(None), &format!("{}/", mock_server.uri())).await;
    assert_eq!(report.pages_scraped(), 1);
    assert!(report.store.is_empty());

    let started = Local::now();
    let result = export(&report, output_dir.path(), &started);
    assert!(matches!(result, Err(HarvestError::EmptyResultSet)));

    let paths = ExportPaths::for_run(output_dir.path(), &started);
    assert!(paths.results_json.exists());
    assert!(paths.results_csv.exists());
    assert!(!paths.summary_json.exists());
}
