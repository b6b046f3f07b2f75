#![cfg(test)]
use std::sync::Arc;
use std::time::Duration;

use infoguard_common::config::ReportPolicy;
use infoguard_common::error::{ApiError, CallerError, ScanError};
use infoguard_common::scan::{ScanKind, ScanRequest};
use infoguard_core::{ScanOutcome, ScanService};
use serde_json::json;
use wiremock::matchers::{any, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::support::{self, api_path};

fn service(server: &MockServer, attempts: u32) -> ScanService {
    let policy = ReportPolicy {
        attempts,
        interval: Duration::ZERO,
    };
    ScanService::new(Arc::new(support::client(server)), policy)
}

/// eicar.txt -> `{resource: "abc123"}` -> file report returned field-for-field.
#[tokio::test]
async fn file_scan_returns_the_file_report_unmodified() {
    let server = MockServer::start().await;
    let report = json!({
        "resource": "abc123",
        "response_code": 1,
        "positives": 58,
        "total": 62,
        "scans": {
            "EngineA": { "detected": true, "result": "EICAR-Test-File" },
            "EngineB": { "detected": false, "result": null }
        }
    });

    Mock::given(method("POST"))
        .and(path(api_path("file/scan")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "resource": "abc123" })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(api_path("file/report")))
        .and(query_param("resource", "abc123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(report.clone()))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(api_path("url/report")))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let request = ScanRequest::from_parts(Some((b"X5O!P%@AP".to_vec(), "eicar.txt".into())), None).unwrap();
    let outcome = service(&server, 1).check(request).await.unwrap();

    assert_eq!(outcome.submission.handle.as_str(), "abc123");
    assert_eq!(outcome.submission.kind, ScanKind::File);
    assert_eq!(outcome.report.into_json(), report);
}

/// http://example.com -> `{scan_id: "xyz789"}` -> URL report returned unmodified.
#[tokio::test]
async fn url_scan_returns_the_url_report_unmodified() {
    let server = MockServer::start().await;
    let report = json!({ "url": "http://example.com", "positives": 0, "scan_date": "2026-10-17 09:00:00" });

    Mock::given(method("POST"))
        .and(path(api_path("url/scan")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "scan_id": "xyz789" })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(api_path("url/report")))
        .and(query_param("resource", "xyz789"))
        .respond_with(ResponseTemplate::new(200).set_body_json(report.clone()))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(api_path("file/report")))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let request = ScanRequest::from_parts(None, Some("http://example.com".into())).unwrap();
    let outcome = service(&server, 1).check(request).await.unwrap();

    assert_eq!(outcome.submission.kind, ScanKind::Url);
    assert_eq!(outcome.report.into_json(), report);
}

/// Builds a request from optional form parts and runs it, as the web frontend does.
async fn check_parts(
    service: &ScanService,
    file: Option<(Vec<u8>, String)>,
    url: Option<String>,
) -> Result<ScanOutcome, ScanError> {
    let request = ScanRequest::from_parts(file, url)?;
    service.check(request).await
}

#[tokio::test]
async fn missing_input_makes_no_outbound_call() {
    let server = MockServer::start().await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "resource": "abc123", "scan_id": "xyz789" })))
        .expect(0)
        .mount(&server)
        .await;
    let service = service(&server, 3);

    let none = check_parts(&service, None, None).await;
    assert!(matches!(none, Err(ScanError::Caller(CallerError::MissingInput))), "{none:?}");

    let blank = check_parts(&service, Some((b"data".to_vec(), String::new())), Some("  ".into())).await;
    assert!(matches!(blank, Err(ScanError::Caller(CallerError::MissingInput))), "{blank:?}");
}

#[tokio::test]
async fn failed_submission_returns_status_and_no_report() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(api_path("file/scan")))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(0)
        .mount(&server)
        .await;

    let request = ScanRequest::File {
        content: b"data".to_vec(),
        display_name: "sample.bin".into(),
    };
    let result = service(&server, 3).check(request).await;

    assert!(matches!(result, Err(ScanError::Api(ApiError::Http(500)))));
}

#[tokio::test]
async fn single_shot_report_fetch_is_not_retried() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(api_path("url/scan")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "scan_id": "xyz789" })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(api_path("url/report")))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&server)
        .await;

    let result = service(&server, 1)
        .check(ScanRequest::Url("http://example.com".into()))
        .await;

    assert!(matches!(result, Err(ScanError::Api(ApiError::Http(404)))));
}

#[tokio::test]
async fn bounded_polling_waits_for_the_report() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(api_path("file/scan")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "resource": "abc123" })))
        .mount(&server)
        .await;
    // Mounted first, so it answers until exhausted.
    Mock::given(method("GET"))
        .and(path(api_path("file/report")))
        .respond_with(ResponseTemplate::new(404))
        .up_to_n_times(2)
        .expect(2)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(api_path("file/report")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "positives": 0 })))
        .expect(1)
        .mount(&server)
        .await;

    let request = ScanRequest::File {
        content: b"data".to_vec(),
        display_name: "sample.bin".into(),
    };
    let outcome = service(&server, 5).check(request).await.unwrap();

    assert_eq!(outcome.report.into_json(), json!({ "positives": 0 }));
}
