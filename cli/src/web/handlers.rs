use std::sync::Arc;

use axum::Json;
use axum::extract::multipart::MultipartError;
use axum::extract::{Multipart, Path, Query, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use serde::Deserialize;
use serde_json::json;
use tracing::{error, warn};

use infoguard_common::error::{ApiError, ScanError};
use infoguard_common::scan::{ScanHandle, ScanKind, ScanReport, ScanRequest};

use super::{AppState, pages};

#[derive(Debug, thiserror::Error)]
pub enum WebError {
    #[error(transparent)]
    Scan(#[from] ScanError),

    #[error("malformed form data: {0}")]
    Form(#[from] MultipartError),
}

impl WebError {
    fn status(&self) -> StatusCode {
        match self {
            WebError::Scan(ScanError::Caller(_)) | WebError::Form(_) => StatusCode::BAD_REQUEST,
            WebError::Scan(ScanError::Api(err)) => api_status(err),
            WebError::Scan(ScanError::Upload(_)) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!("{self}");
        } else {
            warn!("{self}");
        }
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

/// Upstream failures are the service's, not the client's.
fn api_status(_err: &ApiError) -> StatusCode {
    StatusCode::BAD_GATEWAY
}

pub async fn index() -> Html<&'static str> {
    Html(pages::INDEX)
}

pub async fn health() -> &'static str {
    "ok"
}

/// Accepts a multipart form with a `file` part or a `url` field and answers
/// with the report JSON.
pub async fn scan(
    State(state): State<Arc<AppState>>,
    multipart: Multipart,
) -> Result<Json<ScanReport>, WebError> {
    let form = read_scan_form(multipart).await?;
    let request = ScanRequest::from_parts(form.file, form.url).map_err(ScanError::from)?;

    // The upstream service sees the same bare name the upload was stored under.
    let request = match request {
        ScanRequest::File { content, display_name } => {
            let stored = state
                .uploads
                .persist(&display_name, &content)
                .await
                .map_err(ScanError::from)?;
            let display_name = stored
                .file_name()
                .and_then(|name| name.to_str())
                .map_or(display_name, str::to_string);
            ScanRequest::File { content, display_name }
        }
        request => request,
    };

    let outcome = state.service.check(request).await?;
    Ok(Json(outcome.report))
}

#[derive(Debug, Deserialize)]
pub struct ResultsQuery {
    #[serde(default)]
    pub kind: ScanKind,
}

pub async fn results(
    State(state): State<Arc<AppState>>,
    Path(resource): Path<String>,
    Query(query): Query<ResultsQuery>,
) -> Response {
    let handle = ScanHandle::from(resource);

    match state.service.lookup(&handle, query.kind).await {
        Ok(report) => Html(pages::results(&handle, query.kind, &report)).into_response(),
        Err(err) => {
            warn!("Report for {handle} unavailable: {err}");
            (api_status(&err), Html(pages::error(&handle, &err.to_string()))).into_response()
        }
    }
}

#[derive(Default)]
struct ScanForm {
    file: Option<(Vec<u8>, String)>,
    url: Option<String>,
}

async fn read_scan_form(mut multipart: Multipart) -> Result<ScanForm, MultipartError> {
    let mut form = ScanForm::default();

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "file" => {
                let file_name = field.file_name().unwrap_or_default().to_string();
                let content = field.bytes().await?;
                if !file_name.is_empty() {
                    form.file = Some((content.to_vec(), file_name));
                }
            }
            "url" => {
                let url = field.text().await?;
                if !url.trim().is_empty() {
                    form.url = Some(url);
                }
            }
            _ => {}
        }
    }

    Ok(form)
}
