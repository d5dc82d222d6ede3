//! Integration tests for the walker
//!
//! These tests use wiremock to serve a fake Redfish tree over HTTP and drive
//! the real HTTP fetcher and filesystem persister end-to-end.

use redfish_walker::crawler::{CrawlEvent, MemorySink};
use redfish_walker::output::FailureKind;
use redfish_walker::resource::LinkIssue;
use redfish_walker::{crawl, CrawlSettings, ResourceId, Walker};
use serde_json::{json, Value};
use std::path::Path;
use std::sync::Arc;
use tempfile::TempDir;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates plain-HTTP settings pointing at the mock server
fn create_test_settings(server: &MockServer, start: &str, output_dir: &Path) -> CrawlSettings {
    let mut settings = CrawlSettings::new(server.address().to_string(), start, output_dir);
    settings.scheme = "http".to_string();
    settings
}

/// Mounts a JSON document that must be requested exactly once
async fn mount_once(server: &MockServer, resource: &str, body: Value) {
    Mock::given(method("GET"))
        .and(path(resource))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .expect(1)
        .mount(server)
        .await;
}

fn read_json(path: &Path) -> Value {
    let content = std::fs::read_to_string(path).expect("artifact missing");
    serde_json::from_str(&content).expect("artifact is not JSON")
}

fn id(path: &str) -> ResourceId {
    ResourceId::parse(path).expect("invalid identifier")
}

#[tokio::test]
async fn test_chassis_collection_snapshot() {
    let server = MockServer::start().await;
    let output = TempDir::new().expect("Failed to create temp dir");

    let collection = json!({
        "@odata.id": "/redfish/v1/Chassis",
        "Members": [{"@odata.id": "/redfish/v1/Chassis/1"}]
    });
    let chassis = json!({"@odata.id": "/redfish/v1/Chassis/1"});
    mount_once(&server, "/redfish/v1/Chassis", collection.clone()).await;
    mount_once(&server, "/redfish/v1/Chassis/1", chassis.clone()).await;

    let settings = create_test_settings(&server, "/redfish/v1/Chassis", output.path());
    let report = crawl(&settings).await.expect("Crawl setup failed");

    assert_eq!(report.stored, 2);
    assert!(report.failures.is_empty());
    assert_eq!(
        report.visited,
        vec![id("/redfish/v1/Chassis"), id("/redfish/v1/Chassis/1")]
    );
    assert_eq!(
        read_json(&output.path().join("redfish/v1/Chassis/index.json")),
        collection
    );
    assert_eq!(
        read_json(&output.path().join("redfish/v1/Chassis/1/index.json")),
        chassis
    );
}

#[tokio::test]
async fn test_cyclic_tree_fetched_once_per_resource() {
    let server = MockServer::start().await;
    let output = TempDir::new().expect("Failed to create temp dir");

    mount_once(
        &server,
        "/redfish/v1",
        json!({
            "@odata.id": "/redfish/v1",
            "Systems": {"@odata.id": "/redfish/v1/Systems"},
            "Chassis": {"@odata.id": "/redfish/v1/Chassis"}
        }),
    )
    .await;
    mount_once(
        &server,
        "/redfish/v1/Systems",
        json!({"@odata.id": "/redfish/v1/Systems", "Members": [{"@odata.id": "/redfish/v1/Systems/1"}]}),
    )
    .await;
    mount_once(
        &server,
        "/redfish/v1/Systems/1",
        json!({
            "@odata.id": "/redfish/v1/Systems/1",
            "Links": {"Chassis": [{"@odata.id": "/redfish/v1/Chassis/1"}]}
        }),
    )
    .await;
    mount_once(
        &server,
        "/redfish/v1/Chassis",
        json!({"@odata.id": "/redfish/v1/Chassis", "Members": [{"@odata.id": "/redfish/v1/Chassis/1"}]}),
    )
    .await;
    mount_once(
        &server,
        "/redfish/v1/Chassis/1",
        json!({
            "@odata.id": "/redfish/v1/Chassis/1",
            "Links": {"ComputerSystems": [{"@odata.id": "/redfish/v1/Systems/1"}]}
        }),
    )
    .await;

    let settings = create_test_settings(&server, "/redfish/v1", output.path());
    let report = crawl(&settings).await.expect("Crawl setup failed");

    assert_eq!(report.visited.len(), 5);
    assert_eq!(report.stored, 5);
    assert!(!report.cancelled);
    // Mock expectations verify the single fetch per resource on drop
}

#[tokio::test]
async fn test_failures_are_isolated() {
    let server = MockServer::start().await;
    let output = TempDir::new().expect("Failed to create temp dir");

    mount_once(
        &server,
        "/redfish/v1/Managers",
        json!({
            "@odata.id": "/redfish/v1/Managers",
            "Members": [
                {"@odata.id": "/redfish/v1/Managers/1"},
                {"@odata.id": "/redfish/v1/Managers/2"},
                {"@odata.id": "/redfish/v1/Managers/3"},
                {"@odata.id": "/redfish/v1/Managers/4"}
            ]
        }),
    )
    .await;
    mount_once(&server, "/redfish/v1/Managers/1", json!({"Id": "1"})).await;
    Mock::given(method("GET"))
        .and(path("/redfish/v1/Managers/2"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/redfish/v1/Managers/3"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>login</html>"))
        .expect(1)
        .mount(&server)
        .await;
    mount_once(&server, "/redfish/v1/Managers/4", json!({"Id": "4"})).await;

    let settings = create_test_settings(&server, "/redfish/v1/Managers", output.path());
    let report = crawl(&settings).await.expect("Crawl setup failed");

    assert_eq!(report.stored, 3);
    assert_eq!(report.failures.len(), 2);
    assert_eq!(report.failures[0].identifier, id("/redfish/v1/Managers/2"));
    assert_eq!(
        report.failures[0].kind,
        FailureKind::HttpStatus { status: 500 }
    );
    assert_eq!(report.failures[1].identifier, id("/redfish/v1/Managers/3"));
    assert_eq!(report.failures[1].kind, FailureKind::Decode);
    assert_eq!(
        report.stored,
        report.visited.len() - report.failed_fetches() - report.failed_persists()
    );

    assert!(output.path().join("redfish/v1/Managers/4/index.json").is_file());
    assert!(!output.path().join("redfish/v1/Managers/2").exists());
}

#[tokio::test]
async fn test_unreachable_host_is_transport_failure() {
    let output = TempDir::new().expect("Failed to create temp dir");

    // Bind and drop a listener to get a port nothing listens on
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind failed");
        listener.local_addr().expect("no local addr").port()
    };
    let mut settings = CrawlSettings::new(format!("127.0.0.1:{}", port), "/redfish/v1", output.path());
    settings.scheme = "http".to_string();

    let report = crawl(&settings).await.expect("Crawl setup failed");

    assert_eq!(report.stored, 0);
    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].kind, FailureKind::Transport);
}

#[tokio::test]
async fn test_basic_auth_is_sent() {
    let server = MockServer::start().await;
    let output = TempDir::new().expect("Failed to create temp dir");

    Mock::given(method("GET"))
        .and(path("/redfish/v1/Systems"))
        .and(header("authorization", "Basic YWRtaW46c2VjcmV0"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"Members": []})))
        .expect(1)
        .mount(&server)
        .await;

    let mut settings = create_test_settings(&server, "/redfish/v1/Systems", output.path());
    settings.username = Some("admin".to_string());
    settings.password = Some("secret".to_string());

    let report = crawl(&settings).await.expect("Crawl setup failed");

    assert_eq!(report.stored, 1);
    assert!(report.failures.is_empty());
}

#[tokio::test]
async fn test_missing_credentials_surface_as_status() {
    let server = MockServer::start().await;
    let output = TempDir::new().expect("Failed to create temp dir");

    Mock::given(method("GET"))
        .and(path("/redfish/v1/Systems"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let settings = create_test_settings(&server, "/redfish/v1/Systems", output.path());
    let report = crawl(&settings).await.expect("Crawl setup failed");

    assert_eq!(
        report.failures[0].kind,
        FailureKind::HttpStatus { status: 401 }
    );
}

#[tokio::test]
async fn test_second_crawl_produces_identical_files() {
    let server = MockServer::start().await;
    let output = TempDir::new().expect("Failed to create temp dir");

    Mock::given(method("GET"))
        .and(path("/redfish/v1/Chassis"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "@odata.id": "/redfish/v1/Chassis",
            "Name": "Chassis Collection",
            "Members": [{"@odata.id": "/redfish/v1/Chassis/1"}]
        })))
        .expect(2)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/redfish/v1/Chassis/1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "@odata.id": "/redfish/v1/Chassis/1",
            "Status": {"State": "Enabled", "Health": "OK"}
        })))
        .expect(2)
        .mount(&server)
        .await;

    let settings = create_test_settings(&server, "/redfish/v1/Chassis", output.path());
    let walker = Walker::from_settings(&settings).expect("Walker setup failed");

    let first = walker.crawl().await;
    let collection_path = output.path().join("redfish/v1/Chassis/index.json");
    let chassis_path = output.path().join("redfish/v1/Chassis/1/index.json");
    let first_collection = std::fs::read(&collection_path).expect("missing artifact");
    let first_chassis = std::fs::read(&chassis_path).expect("missing artifact");

    let second = walker.crawl().await;

    assert!(first.failures.is_empty());
    assert!(second.failures.is_empty());
    assert_eq!(second.stored, 2);
    assert_eq!(std::fs::read(&collection_path).unwrap(), first_collection);
    assert_eq!(std::fs::read(&chassis_path).unwrap(), first_chassis);
}

#[tokio::test]
async fn test_absolute_links_and_malformed_values() {
    let server = MockServer::start().await;
    let output = TempDir::new().expect("Failed to create temp dir");
    let base = server.uri();

    mount_once(
        &server,
        "/redfish/v1",
        json!({
            "@odata.id": "/redfish/v1",
            "Systems": {"@odata.id": format!("{}/redfish/v1/Systems", base)},
            "Broken": {"@odata.id": ""},
            "Elsewhere": {"@odata.id": "https://other.example.com/redfish/v1"}
        }),
    )
    .await;
    mount_once(
        &server,
        "/redfish/v1/Systems",
        json!({"@odata.id": "/redfish/v1/Systems#/Members"}),
    )
    .await;

    let settings = create_test_settings(&server, "/redfish/v1", output.path());
    let report = crawl(&settings).await.expect("Crawl setup failed");

    assert_eq!(report.visited, vec![id("/redfish/v1"), id("/redfish/v1/Systems")]);
    assert_eq!(report.stored, 2);
    assert!(report.failures.is_empty());

    let issues: Vec<_> = report.warnings.iter().map(|w| w.issue.clone()).collect();
    assert_eq!(issues.len(), 2);
    assert!(issues.contains(&LinkIssue::Empty));
    assert!(issues
        .iter()
        .any(|issue| matches!(issue, LinkIssue::ForeignOrigin { .. })));
}

#[tokio::test]
async fn test_link_prefix_scope() {
    let server = MockServer::start().await;
    let output = TempDir::new().expect("Failed to create temp dir");

    mount_once(
        &server,
        "/redfish/v1",
        json!({
            "Chassis": {"@odata.id": "/redfish/v1/Chassis"},
            "Schemas": {"@odata.id": "/schemas/v1"}
        }),
    )
    .await;
    mount_once(&server, "/redfish/v1/Chassis", json!({"Members": []})).await;
    Mock::given(method("GET"))
        .and(path("/schemas/v1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(0)
        .mount(&server)
        .await;

    let mut settings = create_test_settings(&server, "/redfish/v1", output.path());
    settings.scope.prefix = Some("/redfish/v1".to_string());

    let report = crawl(&settings).await.expect("Crawl setup failed");

    assert_eq!(report.stored, 2);
    assert_eq!(report.out_of_scope, 1);
}

#[tokio::test]
async fn test_debug_sink_receives_progress() {
    let server = MockServer::start().await;
    let output = TempDir::new().expect("Failed to create temp dir");

    mount_once(
        &server,
        "/redfish/v1/Chassis",
        json!({"Members": [{"@odata.id": "/redfish/v1/Chassis/9"}]}),
    )
    .await;

    let mut settings = create_test_settings(&server, "/redfish/v1/Chassis", output.path());
    settings.debug = true;
    let sink = Arc::new(MemorySink::new());
    let walker = Walker::from_settings(&settings)
        .expect("Walker setup failed")
        .with_sink(sink.clone());

    walker.crawl().await;

    let events = sink.events();
    assert!(events.iter().any(|e| matches!(
        e,
        CrawlEvent::Stored { id, path } if id.as_str() == "/redfish/v1/Chassis"
            && path.ends_with("redfish/v1/Chassis/index.json")
    )));
    assert!(events.iter().any(|e| matches!(
        e,
        CrawlEvent::FetchFailed { id, .. } if id.as_str() == "/redfish/v1/Chassis/9"
    )));
}

#[tokio::test]
async fn test_invalid_settings_rejected_before_crawl() {
    let output = TempDir::new().expect("Failed to create temp dir");

    let settings = CrawlSettings::new("10.0.0.5", "redfish/v1", output.path());
    assert!(Walker::from_settings(&settings).is_err());

    let settings = CrawlSettings::new("https://10.0.0.5", "/redfish/v1", output.path());
    assert!(Walker::from_settings(&settings).is_err());
}

#[tokio::test]
async fn test_http_fetcher_classifies_responses() {
    use redfish_walker::crawler::{Fetch, FetchError, HttpFetcher};

    let server = MockServer::start().await;
    let output = TempDir::new().expect("Failed to create temp dir");

    Mock::given(method("GET"))
        .and(path("/redfish/v1"))
        .and(header("accept", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"RedfishVersion": "1.6.0"})))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/redfish/v1/Text"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let settings = create_test_settings(&server, "/redfish/v1", output.path());
    let fetcher = HttpFetcher::new(settings.fetcher_config().expect("bad settings"))
        .expect("client setup failed");

    let document = fetcher.fetch(&id("/redfish/v1")).await.expect("fetch failed");
    assert_eq!(document["RedfishVersion"], "1.6.0");

    match fetcher.fetch(&id("/redfish/v1/Missing")).await {
        Err(FetchError::HttpStatus { status, .. }) => assert_eq!(status, 404),
        other => panic!("expected status failure, got {:?}", other),
    }
    assert!(matches!(
        fetcher.fetch(&id("/redfish/v1/Text")).await,
        Err(FetchError::Decode { .. })
    ));
}
