//! Integration tests for the crawler
//!
//! These tests use wiremock to stand in for the job board and run the
//! fetch session and the full crawl cycle end-to-end.

use job_ad_scout::config::{parse_config, Config};
use job_ad_scout::crawler::{fetch_with_deadline, Coordinator, HttpFetcher, PageFetcher};
use job_ad_scout::{FetchError, RunOutcome, ScoutError};
use std::path::Path;
use std::time::Duration;
use tempfile::TempDir;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates a test configuration pointing at the mock server
fn create_test_config(server_uri: &str, output_dir: &Path, extra: &str) -> Config {
    let toml = format!(
        r#"
[scraper]
base-url = "{uri}/job/search/"
keyword = "clerk"
output-file = "_jobs.csv"
output-dir = '{dir}'
listing-delay-ms = 0
detail-delay-ms = 0
fetch-timeout-secs = 2

[markup]
detail-link-pattern = '/job/detail/\d+$'

{extra}
"#,
        uri = server_uri,
        dir = output_dir.display(),
        extra = extra
    );
    parse_config(&toml).expect("test config should be valid")
}

fn html(body: String) -> ResponseTemplate {
    ResponseTemplate::new(200)
        .set_body_string(format!("<html><body>{}</body></html>", body))
        .insert_header("content-type", "text/html; charset=utf-8")
}

fn listing_page(server_uri: &str, total_pages: u32, ids: &[u32]) -> ResponseTemplate {
    let anchors: String = ids
        .iter()
        .map(|id| format!(r#"<a href="{}/job/detail/{}">Job {}</a>"#, server_uri, id, id))
        .collect();
    html(format!(
        r#"{}<a href="{}/about">About</a><ul><li class="space">Total {} Page(s)</li></ul>"#,
        anchors, server_uri, total_pages
    ))
}

fn detail_page(title: &str, contact: &str) -> ResponseTemplate {
    html(format!(
        r#"<div class="color_position txt_16px bold"><h1 class="h3"> {} </h1></div>
        <div class="margin1em0 pull-left">{}</div>"#,
        title, contact
    ))
}

/// Mounts a two page search: page 1 lists jobs 1 and 2, page 2 lists 2 and 3
async fn mount_job_board(server: &MockServer) {
    let uri = server.uri();

    // Numbered pages first so they win over the bare search mock
    Mock::given(method("GET"))
        .and(path("/job/search/"))
        .and(query_param("Page", "2"))
        .respond_with(listing_page(&uri, 2, &[2, 3]))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/job/search/"))
        .and(query_param("Keyword", "clerk"))
        .respond_with(listing_page(&uri, 2, &[1, 2]))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/job/detail/1"))
        .respond_with(detail_page(
            "Accounts Clerk",
            r#"<a href="mailto:hr@acme.example?subject=Application">Apply</a>
               <a href="mailto:jobs@acme.example">Or here</a>"#,
        ))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/job/detail/2"))
        .respond_with(detail_page("Office Clerk", "Call us on 1234 5678"))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/job/detail/3"))
        .respond_with(html(
            r#"<div class="margin1em0 pull-left"><a href="mailto:talent@corp.example">Mail</a></div>"#
                .to_string(),
        ))
        .mount(server)
        .await;
}

fn read_rows(path: &Path) -> Vec<Vec<String>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .from_path(path)
        .expect("report should be readable");
    reader
        .records()
        .map(|record| {
            record
                .expect("valid csv record")
                .iter()
                .map(str::to_string)
                .collect()
        })
        .collect()
}

#[tokio::test]
async fn test_full_crawl_writes_report() {
    let server = MockServer::start().await;
    mount_job_board(&server).await;
    let dir = TempDir::new().unwrap();
    let config = create_test_config(&server.uri(), dir.path(), "");

    let coordinator = Coordinator::new(config).expect("Failed to create coordinator");
    let outcome = coordinator.run().await.expect("Crawl failed");

    let RunOutcome::Completed {
        report,
        output_path,
        notified,
    } = outcome
    else {
        panic!("expected a completed run");
    };

    assert_eq!(report.len(), 3, "job 2 appears on both pages but is kept once");
    assert!(!notified);
    assert!(output_path.starts_with(dir.path()));

    let file_name = output_path.file_name().unwrap().to_string_lossy().to_string();
    assert!(file_name.starts_with("clerk"));
    assert!(file_name.ends_with("_jobs.csv"));

    let uri = server.uri();
    let rows = read_rows(&output_path);
    assert_eq!(rows[0], vec!["Link", "Position", "Emails"]);
    assert_eq!(
        rows[1],
        vec![
            format!("{}/job/detail/1", uri),
            "Accounts Clerk".to_string(),
            "hr@acme.example, jobs@acme.example".to_string(),
        ]
    );
    assert_eq!(
        rows[2],
        vec![
            format!("{}/job/detail/2", uri),
            "Office Clerk".to_string(),
            "Not Found".to_string(),
        ]
    );
    assert_eq!(
        rows[3],
        vec![
            format!("{}/job/detail/3", uri),
            "Not Found".to_string(),
            "talent@corp.example".to_string(),
        ]
    );
    assert_eq!(rows.len(), 4);
}

#[tokio::test]
async fn test_text_fallback_finds_plain_addresses() {
    let server = MockServer::start().await;
    let uri = server.uri();

    Mock::given(method("GET"))
        .and(path("/job/search/"))
        .respond_with(listing_page(&uri, 1, &[9]))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/job/detail/9"))
        .respond_with(detail_page(
            "Receptionist",
            "Send your CV to cv@front.example today",
        ))
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let mut config = create_test_config(&uri, dir.path(), "");
    config.scraper.text_email_fallback = true;

    let outcome = Coordinator::new(config).unwrap().run().await.unwrap();
    let RunOutcome::Completed { report, .. } = outcome else {
        panic!("expected a completed run");
    };

    assert_eq!(report.details()[0].emails, vec!["cv@front.example"]);
}

#[tokio::test]
async fn test_search_without_results_exports_nothing() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/job/search/"))
        .respond_with(html("<p>No jobs matched your search</p>".to_string()))
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let config = create_test_config(&server.uri(), dir.path(), "");

    let outcome = Coordinator::new(config).unwrap().run().await.unwrap();
    assert_eq!(outcome, RunOutcome::NoLinks);
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[tokio::test]
async fn test_detail_failure_aborts_by_default() {
    let server = MockServer::start().await;
    let uri = server.uri();

    Mock::given(method("GET"))
        .and(path("/job/search/"))
        .respond_with(listing_page(&uri, 1, &[1, 2]))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/job/detail/1"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let config = create_test_config(&uri, dir.path(), "");

    let result = Coordinator::new(config).unwrap().run().await;
    assert!(matches!(
        result,
        Err(ScoutError::Fetch(FetchError::Status { status: 500, .. }))
    ));
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[tokio::test]
async fn test_detail_failure_skipped_when_configured() {
    let server = MockServer::start().await;
    let uri = server.uri();

    Mock::given(method("GET"))
        .and(path("/job/search/"))
        .respond_with(listing_page(&uri, 1, &[1, 2]))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/job/detail/1"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/job/detail/2"))
        .respond_with(detail_page("Clerk", r#"<a href="mailto:ok@ok.example">x</a>"#))
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let mut config = create_test_config(&uri, dir.path(), "");
    config.scraper.on_fetch_failure = job_ad_scout::config::FailurePolicy::Skip;

    let outcome = Coordinator::new(config).unwrap().run().await.unwrap();
    let RunOutcome::Completed { report, .. } = outcome else {
        panic!("expected a completed run");
    };
    assert_eq!(report.len(), 1);
    assert_eq!(report.details()[0].emails, vec!["ok@ok.example"]);
}

#[tokio::test]
async fn test_unreachable_mail_server_does_not_fail_run() {
    let server = MockServer::start().await;
    mount_job_board(&server).await;
    let dir = TempDir::new().unwrap();
    let config = create_test_config(
        &server.uri(),
        dir.path(),
        r#"
[email]
enabled = true
sender = "bot@example.com"
recipient = "me@example.com"
smtp-server = "127.0.0.1"
smtp-port = 1
sender-password = "secret"
"#,
    );

    let outcome = Coordinator::new(config).unwrap().run().await.unwrap();
    let RunOutcome::Completed {
        report, notified, ..
    } = outcome
    else {
        panic!("expected a completed run");
    };
    assert_eq!(report.len(), 3);
    assert!(!notified);
}

#[tokio::test]
async fn test_fetcher_reads_page() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/page"))
        .respond_with(html("<p>hello</p>".to_string()))
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let config = create_test_config(&server.uri(), dir.path(), "");
    let fetcher = HttpFetcher::new(&config.scraper).unwrap();

    let body = fetcher
        .fetch(&format!("{}/page", server.uri()))
        .await
        .unwrap();
    assert!(body.contains("<p>hello</p>"));
}

#[tokio::test]
async fn test_fetcher_reports_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/missing"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let config = create_test_config(&server.uri(), dir.path(), "");
    let fetcher = HttpFetcher::new(&config.scraper).unwrap();

    let result = fetcher.fetch(&format!("{}/missing", server.uri())).await;
    assert!(matches!(result, Err(FetchError::Status { status: 404, .. })));
}

#[tokio::test]
async fn test_fetch_deadline_expires() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/slow"))
        .respond_with(html("<p>late</p>".to_string()).set_delay(Duration::from_secs(5)))
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let config = create_test_config(&server.uri(), dir.path(), "");
    let fetcher = HttpFetcher::new(&config.scraper).unwrap();

    let result = fetch_with_deadline(
        &fetcher,
        &format!("{}/slow", server.uri()),
        Duration::from_millis(200),
    )
    .await;
    assert!(matches!(result, Err(FetchError::Timeout { .. })));
}
