//! # Error Taxonomy
//!
//! Every failure of the scan workflow is a typed value. Nothing is retried or
//! swallowed at this level; callers decide how to present each variant.

use thiserror::Error;

pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Raised while building [`Config`](crate::config::Config) at startup.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} environment variable not set")]
    Missing(&'static str),

    #[error("{0} is empty")]
    Empty(&'static str),

    #[error("invalid base url '{value}': {source}")]
    InvalidBaseUrl {
        value: String,
        #[source]
        source: url::ParseError,
    },

    #[error("invalid value for {var}: '{value}'")]
    InvalidValue { var: &'static str, value: String },
}

/// Failures of a single exchange with the scanning service.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The service answered with anything but `200 OK`.
    #[error("scanning service responded with HTTP {0}")]
    Http(u16),

    /// `200 OK`, but the body carried no usable resource token.
    #[error("scanning service accepted the request but returned no resource token")]
    SubmissionRejected,

    /// The request never produced a response (connection, DNS, timeout).
    #[error("could not reach the scanning service: {0}")]
    Transport(#[source] BoxError),

    /// `200 OK` on the report endpoint with a body that is not JSON.
    #[error("scanning service returned a report that is not valid JSON: {0}")]
    MalformedReport(#[source] serde_json::Error),
}

/// Invalid input handed to the workflow by its caller.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CallerError {
    #[error("No file or URL provided")]
    MissingInput,

    #[error("Provide either a file or a URL, not both")]
    ConflictingInput,
}

/// Everything that can go wrong between receiving a request and returning a report.
#[derive(Debug, Error)]
pub enum ScanError {
    #[error(transparent)]
    Caller(#[from] CallerError),

    #[error(transparent)]
    Api(#[from] ApiError),

    #[error("could not store the uploaded file: {0}")]
    Upload(#[from] std::io::Error),
}
