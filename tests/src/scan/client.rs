#![cfg(test)]
use infoguard_common::config::{ApiCredential, Endpoints};
use infoguard_common::error::ApiError;
use infoguard_common::gateway::ScanGateway;
use infoguard_common::scan::{ScanHandle, ScanKind};
use infoguard_core::ScanClient;
use serde_json::json;
use wiremock::matchers::{body_string_contains, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::support::{self, API_KEY, api_path};

const SAMPLE: &str = "X5O!P%@AP-sample-content";

#[tokio::test]
async fn submit_file_returns_the_resource_token() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(api_path("file/scan")))
        .and(query_param("apikey", API_KEY))
        .and(body_string_contains("name=\"file\"; filename=\"eicar.txt\""))
        .and(body_string_contains(SAMPLE))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "resource": "abc123",
            "verbose_msg": "Scan request successfully queued"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let handle = support::client(&server)
        .submit_file(SAMPLE.as_bytes().to_vec(), "eicar.txt")
        .await
        .unwrap();

    assert_eq!(handle, ScanHandle::new("abc123"));
}

#[tokio::test]
async fn submit_url_returns_the_scan_id_token() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(api_path("url/scan")))
        .and(query_param("apikey", API_KEY))
        .and(body_string_contains("url=http%3A%2F%2Fexample.com"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "scan_id": "xyz789" })))
        .expect(1)
        .mount(&server)
        .await;

    let handle = support::client(&server).submit_url("http://example.com").await.unwrap();

    assert_eq!(handle.as_str(), "xyz789");
}

#[tokio::test]
async fn submissions_without_a_token_are_rejected() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(api_path("file/scan")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "scan_id": "wrong-field" })))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(api_path("url/scan")))
        .respond_with(ResponseTemplate::new(200).set_body_string("queued"))
        .mount(&server)
        .await;

    let client = support::client(&server);

    let file = client.submit_file(b"data".to_vec(), "a.bin").await;
    assert!(matches!(file, Err(ApiError::SubmissionRejected)), "{file:?}");

    let url = client.submit_url("http://example.com").await;
    assert!(matches!(url, Err(ApiError::SubmissionRejected)), "{url:?}");
}

#[tokio::test]
async fn non_200_statuses_are_reported_exactly() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(api_path("file/scan")))
        .respond_with(ResponseTemplate::new(403).set_body_json(json!({ "resource": "ignored" })))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(api_path("url/scan")))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(api_path("file/report")))
        .respond_with(ResponseTemplate::new(429))
        .mount(&server)
        .await;

    let client = support::client(&server);

    assert!(matches!(
        client.submit_file(b"data".to_vec(), "a.bin").await,
        Err(ApiError::Http(403))
    ));
    assert!(matches!(
        client.submit_url("http://example.com").await,
        Err(ApiError::Http(204))
    ));
    assert!(matches!(
        client.fetch_report(&ScanHandle::new("abc123"), ScanKind::File).await,
        Err(ApiError::Http(429))
    ));
}

#[tokio::test]
async fn report_kind_selects_the_endpoint() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(api_path("file/report")))
        .and(query_param("apikey", API_KEY))
        .and(query_param("resource", "shared"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "source": "file-report" })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(api_path("url/report")))
        .and(query_param("apikey", API_KEY))
        .and(query_param("resource", "shared"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "source": "url-report" })))
        .expect(1)
        .mount(&server)
        .await;

    let client = support::client(&server);
    let handle = ScanHandle::new("shared");

    let file = client.fetch_report(&handle, ScanKind::File).await.unwrap();
    let url = client.fetch_report(&handle, ScanKind::Url).await.unwrap();

    assert_eq!(file.as_json(), &json!({ "source": "file-report" }));
    assert_eq!(url.as_json(), &json!({ "source": "url-report" }));
}

#[tokio::test]
async fn report_body_that_is_not_json_is_malformed() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(api_path("url/report")))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
        .mount(&server)
        .await;

    let result = support::client(&server)
        .fetch_report(&ScanHandle::new("xyz789"), ScanKind::Url)
        .await;

    assert!(matches!(result, Err(ApiError::MalformedReport(_))), "{result:?}");
}

#[tokio::test]
async fn unreachable_service_is_a_transport_error() {
    // Reserve a free port, then release it so nothing is listening there.
    let port = std::net::TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap()
        .port();
    let endpoints = Endpoints::from_base(&format!("http://127.0.0.1:{port}/ig/v2")).unwrap();
    let client = ScanClient::new(ApiCredential::new(API_KEY).unwrap(), endpoints);

    let submit = client.submit_url("http://example.com").await;
    assert!(matches!(submit, Err(ApiError::Transport(_))), "{submit:?}");

    let report = client.fetch_report(&ScanHandle::new("abc123"), ScanKind::File).await;
    assert!(matches!(report, Err(ApiError::Transport(_))), "{report:?}");
}

#[tokio::test]
async fn transport_errors_do_not_carry_the_key() {
    let port = std::net::TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap()
        .port();
    let endpoints = Endpoints::from_base(&format!("http://127.0.0.1:{port}/ig/v2")).unwrap();
    let client = ScanClient::new(ApiCredential::new(API_KEY).unwrap(), endpoints);

    let errors = [
        client.submit_url("http://example.com").await.unwrap_err(),
        client.submit_file(b"data".to_vec(), "a.bin").await.unwrap_err(),
        client
            .fetch_report(&ScanHandle::new("abc123"), ScanKind::Url)
            .await
            .unwrap_err(),
    ];

    for err in errors {
        assert!(matches!(err, ApiError::Transport(_)), "{err:?}");
        assert!(!err.to_string().contains(API_KEY), "{err}");
        assert!(!format!("{err:?}").contains(API_KEY), "{err:?}");
    }
}
