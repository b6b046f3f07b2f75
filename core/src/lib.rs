//! # InfoGuard Core
//!
//! * **[`client`]**: [`ScanClient`], the HTTP implementation of the scanning service port.
//! * **[`service`]**: [`ScanService`], the submit-then-fetch workflow.
//! * **[`uploads`]**: [`UploadStore`], durable storage for uploaded files.

pub mod client;
pub mod service;
pub mod uploads;

pub use client::ScanClient;
pub use service::{ScanOutcome, ScanService};
pub use uploads::UploadStore;
