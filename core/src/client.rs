//! HTTP client for the InfoGuard scanning API.
//!
//! Every operation issues exactly one request. The credential travels as the
//! `apikey` query parameter on all four endpoints.

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{Response, StatusCode};
use tracing::{debug, warn};
use url::Url;

use infoguard_common::config::{ApiCredential, Config, Endpoints};
use infoguard_common::error::ApiError;
use infoguard_common::gateway::ScanGateway;
use infoguard_common::scan::{ScanHandle, ScanKind, ScanReport};

const FILE_TOKEN_FIELD: &str = "resource";
const URL_TOKEN_FIELD: &str = "scan_id";

#[derive(Debug, Clone)]
pub struct ScanClient {
    http: reqwest::Client,
    credential: ApiCredential,
    endpoints: Endpoints,
}

impl ScanClient {
    pub fn new(credential: ApiCredential, endpoints: Endpoints) -> Self {
        Self::with_http(reqwest::Client::new(), credential, endpoints)
    }

    pub fn from_config(cfg: &Config) -> Self {
        Self::new(cfg.credential.clone(), cfg.endpoints.clone())
    }

    /// Uses a caller-provided `reqwest::Client` (proxies, custom TLS, timeouts).
    pub fn with_http(http: reqwest::Client, credential: ApiCredential, endpoints: Endpoints) -> Self {
        Self {
            http,
            credential,
            endpoints,
        }
    }

    pub fn report_endpoint(&self, kind: ScanKind) -> &Url {
        match kind {
            ScanKind::File => &self.endpoints.file_report,
            ScanKind::Url => &self.endpoints.url_report,
        }
    }

    fn auth(&self) -> [(&'static str, &str); 1] {
        [("apikey", self.credential.expose())]
    }
}

#[async_trait]
impl ScanGateway for ScanClient {
    async fn submit_file(
        &self,
        content: Vec<u8>,
        display_name: &str,
    ) -> Result<ScanHandle, ApiError> {
        debug!(file = display_name, bytes = content.len(), "submitting file for scanning");

        let part = Part::bytes(content).file_name(display_name.to_string());
        let form = Form::new().part("file", part);

        let response = self
            .http
            .post(self.endpoints.file_scan.clone())
            .query(&self.auth())
            .multipart(form)
            .send()
            .await
            .map_err(transport)?;

        read_token(response, FILE_TOKEN_FIELD).await
    }

    async fn submit_url(&self, url: &str) -> Result<ScanHandle, ApiError> {
        debug!(url, "submitting url for scanning");

        let response = self
            .http
            .post(self.endpoints.url_scan.clone())
            .query(&self.auth())
            .form(&[("url", url)])
            .send()
            .await
            .map_err(transport)?;

        read_token(response, URL_TOKEN_FIELD).await
    }

    async fn fetch_report(
        &self,
        handle: &ScanHandle,
        kind: ScanKind,
    ) -> Result<ScanReport, ApiError> {
        debug!(resource = %handle, %kind, "fetching scan report");

        let response = self
            .http
            .get(self.report_endpoint(kind).clone())
            .query(&self.auth())
            .query(&[("resource", handle.as_str())])
            .send()
            .await
            .map_err(transport)?;

        let status = response.status();
        if status != StatusCode::OK {
            warn!(resource = %handle, status = status.as_u16(), "report request failed");
            return Err(ApiError::Http(status.as_u16()));
        }

        let body = response.bytes().await.map_err(transport)?;
        let report = serde_json::from_slice(&body).map_err(ApiError::MalformedReport)?;
        Ok(ScanReport::new(report))
    }
}

async fn read_token(response: Response, field: &str) -> Result<ScanHandle, ApiError> {
    let status = response.status();
    if status != StatusCode::OK {
        warn!(status = status.as_u16(), "submission failed");
        return Err(ApiError::Http(status.as_u16()));
    }

    let body = response.bytes().await.map_err(transport)?;
    token_from_body(&body, field).ok_or_else(|| {
        warn!(field, "submission response carried no token");
        ApiError::SubmissionRejected
    })
}

/// Extracts a non-empty string token from a JSON object body.
fn token_from_body(body: &[u8], field: &str) -> Option<ScanHandle> {
    let json: serde_json::Value = serde_json::from_slice(body).ok()?;
    json.get(field)?
        .as_str()
        .filter(|token| !token.is_empty())
        .map(ScanHandle::from)
}

/// The request URL carries the credential, so it is stripped before the error
/// is logged or handed upward.
fn transport(err: reqwest::Error) -> ApiError {
    let err = err.without_url();
    warn!(error = %err, "scanning service unreachable");
    ApiError::Transport(Box::new(err))
}
