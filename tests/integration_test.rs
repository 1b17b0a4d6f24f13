//! Integration tests for wellscrape
//!
//! End-to-end coordinator runs against a mock upstream and a real
//! SQLite store.

use std::sync::Arc;
use std::time::Duration;

use tempfile::TempDir;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use wellscrape::fields::{COORDINATES_LOCATOR, FIELD_LOCATORS};
use wellscrape::scraping::{
    FetchConfig, FieldExtractor, RunMode, RunReport, ScrapeCoordinator, WellFetcher,
};
use wellscrape::store::WellStore;

/// A detail page with every known locator populated.
fn well_page(operator: &str) -> String {
    let mut body = String::from("<html><body>");
    for (_, id) in FIELD_LOCATORS {
        let inner = if id.ends_with("lblOperator") {
            operator
        } else if id.contains("Elevation") || id.contains("Depth") {
            "5,280"
        } else {
            "value"
        };
        body.push_str(&format!(r#"<span id="{}">{}</span>"#, id, inner));
    }
    body.push_str(&format!(
        r#"<span id="{}">35.123,-106.456 NAD83</span>"#,
        COORDINATES_LOCATOR
    ));
    body.push_str("</body></html>");
    body
}

/// A page carrying none of the known locators.
fn empty_page() -> String {
    "<html><body><p>No well found.</p></body></html>".to_string()
}

fn test_fetcher(server: &MockServer) -> WellFetcher {
    WellFetcher::new(FetchConfig {
        base_url: format!("{}/WellDetails.aspx?api={{api}}", server.uri()),
        max_retries: 2,
        backoff_factor: Duration::ZERO,
        timeout: Duration::from_secs(5),
        ..FetchConfig::default()
    })
    .unwrap()
}

fn coordinator(server: &MockServer, store: Arc<WellStore>) -> Arc<ScrapeCoordinator> {
    Arc::new(ScrapeCoordinator::new(
        test_fetcher(server),
        FieldExtractor::new(),
        store,
    ))
}

async fn mount_well(server: &MockServer, api: &str, body: String) {
    Mock::given(method("GET"))
        .and(path("/WellDetails.aspx"))
        .and(query_param("api", api))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .mount(server)
        .await;
}

async fn run_two_identifier_mix(mode: RunMode) -> (RunReport, Arc<WellStore>) {
    let server = MockServer::start().await;
    mount_well(&server, "30-001", well_page("ACME Energy")).await;
    mount_well(&server, "30-002", empty_page()).await;

    let store = Arc::new(WellStore::open_in_memory().unwrap());
    let coordinator = coordinator(&server, store.clone());

    let report = coordinator
        .run(vec!["30-001".to_string(), "30-002".to_string()], mode)
        .await;

    (report, store)
}

#[tokio::test]
async fn one_good_one_empty_sequential() {
    let mode = RunMode::Sequential {
        delay: Duration::ZERO,
    };
    let (report, store) = run_two_identifier_mix(mode).await;

    assert_eq!(report.summary.inserted, 1);
    assert_eq!(report.summary.errored, 1);
    assert_eq!(report.summary.skipped, 0);
    assert_eq!(report.failed, vec!["30-002".to_string()]);

    let record = store.get("30-001").unwrap().unwrap();
    assert_eq!(record.operator.as_deref(), Some("ACME Energy"));
    assert_eq!(record.latitude, Some(35.123));
    assert_eq!(record.longitude, Some(-106.456));
    assert_eq!(record.crs.as_deref(), Some("NAD83"));

    assert!(store.get("30-002").unwrap().is_none());
}

#[tokio::test]
async fn final_totals_match_across_modes() {
    let sequential = RunMode::Sequential {
        delay: Duration::ZERO,
    };
    let parallel = RunMode::Parallel { workers: 4 };

    let (seq_report, _) = run_two_identifier_mix(sequential).await;
    let (par_report, _) = run_two_identifier_mix(parallel).await;

    assert_eq!(seq_report.summary, par_report.summary);
}

#[tokio::test]
async fn blank_identifier_never_reaches_the_fetcher() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/WellDetails.aspx"))
        .and(query_param("api", "30-001"))
        .respond_with(ResponseTemplate::new(200).set_body_string(well_page("ACME Energy")))
        .expect(1) // the blank identifier must not produce a request
        .mount(&server)
        .await;

    let store = Arc::new(WellStore::open_in_memory().unwrap());
    let coordinator = coordinator(&server, store.clone());

    let report = coordinator
        .run(
            vec!["  ".to_string(), "30-001".to_string()],
            RunMode::Sequential {
                delay: Duration::ZERO,
            },
        )
        .await;
    let summary = report.summary;

    assert_eq!(summary.skipped, 1);
    assert_eq!(summary.inserted, 1);
    assert_eq!(summary.errored, 0);
}

#[tokio::test]
async fn reprocessing_an_identifier_upserts_once() {
    let server = MockServer::start().await;
    mount_well(&server, "30-001", well_page("ACME Energy")).await;

    let store = Arc::new(WellStore::open_in_memory().unwrap());
    let coordinator = coordinator(&server, store.clone());

    let summary = coordinator
        .run(
            vec!["30-001".to_string(), "30-001".to_string()],
            RunMode::Sequential {
                delay: Duration::ZERO,
            },
        )
        .await
        .summary;

    assert_eq!(summary.inserted, 2);
    assert_eq!(store.count().unwrap(), 1);
}

#[tokio::test]
async fn failing_fetch_counts_as_error_without_aborting() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/WellDetails.aspx"))
        .and(query_param("api", "30-bad"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    mount_well(&server, "30-001", well_page("ACME Energy")).await;

    let store = Arc::new(WellStore::open_in_memory().unwrap());
    let coordinator = coordinator(&server, store.clone());

    let report = coordinator
        .run(
            vec!["30-bad".to_string(), "30-001".to_string()],
            RunMode::Sequential {
                delay: Duration::ZERO,
            },
        )
        .await;
    let summary = report.summary;

    assert_eq!(report.failed, vec!["30-bad".to_string()]);
    assert_eq!(summary.errored, 1);
    assert_eq!(summary.inserted, 1);
    assert!(store.get("30-001").unwrap().is_some());
}

#[tokio::test]
async fn retry_pass_recovers_transient_failures() {
    let server = MockServer::start().await;
    // The first two requests fail, exhausting the fetcher's retry
    // budget; the end-of-run retry pass then sees a healthy upstream.
    Mock::given(method("GET"))
        .and(path("/WellDetails.aspx"))
        .and(query_param("api", "30-001"))
        .respond_with(ResponseTemplate::new(500))
        .up_to_n_times(2)
        .mount(&server)
        .await;
    mount_well(&server, "30-001", well_page("ACME Energy")).await;

    let store = Arc::new(WellStore::open_in_memory().unwrap());
    let coordinator = coordinator(&server, store.clone());

    let summary = coordinator
        .run_with_retry(
            vec!["30-001".to_string()],
            RunMode::Sequential {
                delay: Duration::ZERO,
            },
        )
        .await;

    assert_eq!(summary.inserted, 1);
    assert_eq!(summary.errored, 0);
    assert!(store.get("30-001").unwrap().is_some());
}

#[tokio::test]
async fn scraped_records_survive_reopen() {
    let server = MockServer::start().await;
    mount_well(&server, "30-001", well_page("ACME Energy")).await;

    let dir = TempDir::new().unwrap();
    let db_path = dir.path().join("wells.db");

    {
        let store = Arc::new(WellStore::open(&db_path).unwrap());
        let coordinator = coordinator(&server, store);
        let summary = coordinator
            .run(
                vec!["30-001".to_string()],
                RunMode::Sequential {
                    delay: Duration::ZERO,
                },
            )
            .await
            .summary;
        assert_eq!(summary.inserted, 1);
    }

    let reopened = WellStore::open(&db_path).unwrap();
    let record = reopened.get("30-001").unwrap().unwrap();
    assert_eq!(record.operator.as_deref(), Some("ACME Energy"));
}
