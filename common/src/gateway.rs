//! # Scanning Service Port
//!
//! The contract the application requires from the external scanning service.
//! Implemented over HTTP in `infoguard-core`, and by in-memory fakes in tests.

use async_trait::async_trait;

use crate::error::ApiError;
use crate::scan::{ScanHandle, ScanKind, ScanReport};

#[async_trait]
pub trait ScanGateway: Send + Sync {
    /// Uploads a file and returns the service's `resource` token.
    async fn submit_file(
        &self,
        content: Vec<u8>,
        display_name: &str,
    ) -> Result<ScanHandle, ApiError>;

    /// Submits a URL and returns the service's `scan_id` token.
    async fn submit_url(&self, url: &str) -> Result<ScanHandle, ApiError>;

    /// Fetches the report for `handle` from the report endpoint matching `kind`.
    async fn fetch_report(&self, handle: &ScanHandle, kind: ScanKind)
    -> Result<ScanReport, ApiError>;
}
