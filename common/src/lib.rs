//! # InfoGuard Common
//!
//! Types shared by every crate of the workspace:
//!
//! * **[`config`]**: the immutable process configuration (credential, endpoints, polling).
//! * **[`error`]**: the error taxonomy of the scan workflow.
//! * **[`scan`]**: requests, handles, kinds and reports.
//! * **[`gateway`]**: the trait the scanning service client implements.

pub mod config;
pub mod error;
pub mod gateway;
pub mod log;
pub mod scan;

#[doc(hidden)]
pub use tracing as __tracing;
