//! # Scan Workflow Service
//!
//! Implements the "check a file or URL" use case:
//! 1. submit the request through the [`ScanGateway`], keeping the handle's kind,
//! 2. fetch the report from the endpoint matching that kind.
//!
//! Report fetching follows the configured [`ReportPolicy`]. With the default
//! policy a single report request is made right after submission. Additional
//! attempts are only spent on statuses meaning the report is not ready yet
//! (see `report_pending`). Any other status and transport failures are
//! returned immediately.

use std::sync::Arc;

use tracing::{debug, warn};

use infoguard_common::config::ReportPolicy;
use infoguard_common::error::{ApiError, ScanError};
use infoguard_common::gateway::ScanGateway;
use infoguard_common::scan::{ScanHandle, ScanKind, ScanReport, ScanRequest, Submission};
use infoguard_common::success;

/// A finished check: what was submitted and what the service reported.
#[derive(Debug, Clone)]
pub struct ScanOutcome {
    pub submission: Submission,
    pub report: ScanReport,
}

#[derive(Clone)]
pub struct ScanService {
    gateway: Arc<dyn ScanGateway>,
    policy: ReportPolicy,
}

impl ScanService {
    pub fn new(gateway: Arc<dyn ScanGateway>, policy: ReportPolicy) -> Self {
        Self { gateway, policy }
    }

    pub fn policy(&self) -> ReportPolicy {
        self.policy
    }

    /// Submits `request` and returns the handle tagged with its kind.
    pub async fn submit(&self, request: ScanRequest) -> Result<Submission, ApiError> {
        let kind = request.kind();
        let handle = match request {
            ScanRequest::File {
                content,
                display_name,
            } => self.gateway.submit_file(content, &display_name).await?,
            ScanRequest::Url(url) => self.gateway.submit_url(&url).await?,
        };

        success!("Submission accepted, resource {handle}");
        Ok(Submission { handle, kind })
    }

    /// Fetches the report for a submission according to the report policy.
    pub async fn report(&self, submission: &Submission) -> Result<ScanReport, ApiError> {
        self.lookup(&submission.handle, submission.kind).await
    }

    /// Fetches the report for a handle whose kind the caller remembers.
    pub async fn lookup(&self, handle: &ScanHandle, kind: ScanKind) -> Result<ScanReport, ApiError> {
        let attempts = self.policy.attempts.max(1);
        let mut attempt: u32 = 1;

        loop {
            debug!(resource = %handle, attempt, attempts, "requesting report");
            match self.gateway.fetch_report(handle, kind).await {
                Err(ApiError::Http(status)) if attempt < attempts && report_pending(status) => {
                    warn!(
                        "Report for {handle} not available (HTTP {status}), retrying in {:.1}s",
                        self.policy.interval.as_secs_f64()
                    );
                    tokio::time::sleep(self.policy.interval).await;
                    attempt += 1;
                }
                result => return result,
            }
        }
    }

    /// Submits `request` and fetches its report.
    pub async fn check(&self, request: ScanRequest) -> Result<ScanOutcome, ScanError> {
        let submission = self.submit(request).await?;
        let report = self.report(&submission).await?;
        Ok(ScanOutcome { submission, report })
    }
}

/// `204`, `404`, `429` and `503` can turn into a report later; other statuses
/// (bad credential, forbidden resource) never will.
fn report_pending(status: u16) -> bool {
    matches!(status, 204 | 404 | 429 | 503)
}
