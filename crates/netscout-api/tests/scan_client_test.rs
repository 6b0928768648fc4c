#![allow(clippy::unwrap_used)]
// Integration tests for `ScanClient` using wiremock.

use std::time::Duration;

use serde_json::json;
use url::Url;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use netscout_api::{Error, ScanClient, TransportConfig};

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup() -> (MockServer, ScanClient) {
    let server = MockServer::start().await;
    let base_url = Url::parse(&server.uri()).unwrap();
    let client = ScanClient::with_client(reqwest::Client::new(), base_url);
    (server, client)
}

// ── Success ─────────────────────────────────────────────────────────

#[tokio::test]
async fn test_scan_success() {
    let (server, client) = setup().await;

    let body = json!({
        "status": "success",
        "devices": [
            { "ip": "192.168.1.1", "mac": "00:11:22:33:44:55", "vendor": "Netgear" },
            { "ip": "192.168.1.2", "mac": "aa:bb:cc:dd:ee:ff", "vendor": "Acme" }
        ],
        "count": 2
    });

    Mock::given(method("GET"))
        .and(path("/api/scan"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .expect(1)
        .mount(&server)
        .await;

    let report = client.scan().await.unwrap();

    assert_eq!(report.devices.len(), 2);
    assert_eq!(report.reported_count, Some(2));
    assert_eq!(report.devices[0].ip, "192.168.1.1");
    assert_eq!(report.devices[1].mac, "aa:bb:cc:dd:ee:ff");
    assert_eq!(report.devices[1].vendor, "Acme");
}

#[tokio::test]
async fn test_scan_empty_network() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/scan"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "status": "success", "devices": [], "count": 0 })),
        )
        .mount(&server)
        .await;

    let report = client.scan().await.unwrap();
    assert!(report.devices.is_empty());
}

// ── Service-reported errors ─────────────────────────────────────────

#[tokio::test]
async fn test_scan_service_error_passes_message_through() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/scan"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "status": "error", "message": "Permission denied" })),
        )
        .mount(&server)
        .await;

    let result = client.scan().await;

    match result {
        Err(Error::Service { message }) => assert_eq!(message, "Permission denied"),
        other => panic!("expected Service error, got: {other:?}"),
    }
}

// ── Transport-class errors ──────────────────────────────────────────

#[tokio::test]
async fn test_scan_http_500() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/scan"))
        .respond_with(ResponseTemplate::new(500).set_body_string("Internal Server Error"))
        .mount(&server)
        .await;

    let err = client.scan().await.unwrap_err();

    assert!(
        matches!(err, Error::Http { status: 500, ref body_preview } if body_preview == "Internal Server Error"),
        "got: {err:?}"
    );
    assert!(err.is_transient());
    assert!(!err.is_service_error());
}

#[tokio::test]
async fn test_scan_malformed_body() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/scan"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>not json</html>"))
        .mount(&server)
        .await;

    let err = client.scan().await.unwrap_err();
    assert!(matches!(err, Error::Deserialization { .. }), "got: {err:?}");
}

#[tokio::test]
async fn test_scan_connection_refused() {
    // Bind to learn a free port, then release it so connects are refused.
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    let base_url = Url::parse(&format!("http://127.0.0.1:{port}")).unwrap();

    let client = ScanClient::new(base_url, &TransportConfig::default()).unwrap();
    let err = client.scan().await.unwrap_err();

    assert!(matches!(err, Error::Transport(_)), "got: {err:?}");
    assert!(err.is_transient());
}

#[tokio::test]
async fn test_scan_timeout_when_configured() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/scan"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "status": "success", "devices": [] }))
                .set_delay(Duration::from_secs(2)),
        )
        .mount(&server)
        .await;

    let transport = TransportConfig::default().with_timeout(Duration::from_millis(100));
    let client = ScanClient::new(Url::parse(&server.uri()).unwrap(), &transport).unwrap();

    let err = client.scan().await.unwrap_err();
    assert!(matches!(err, Error::Transport(ref e) if e.is_timeout()), "got: {err:?}");
}
