//! # Scan Model
//!
//! The values flowing through a submission and a report fetch.
//!
//! A [`ScanHandle`] is opaque: it says nothing about whether it came from a
//! file or a URL submission. Its provenance travels next to it as a
//! [`ScanKind`], bundled together in a [`Submission`].

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CallerError;

/// What the user asked to have scanned. Always exactly one of the two.
#[derive(Clone, PartialEq, Eq)]
pub enum ScanRequest {
    File {
        content: Vec<u8>,
        display_name: String,
    },
    Url(String),
}

impl ScanRequest {
    /// Builds a request from the optional parts of a form.
    ///
    /// A file without a name and a blank URL count as absent.
    pub fn from_parts(
        file: Option<(Vec<u8>, String)>,
        url: Option<String>,
    ) -> Result<Self, CallerError> {
        let file = file.filter(|(_, name)| !name.trim().is_empty());
        let url = url
            .map(|u| u.trim().to_string())
            .filter(|u| !u.is_empty());

        match (file, url) {
            (Some((content, display_name)), None) => Ok(Self::File {
                content,
                display_name,
            }),
            (None, Some(url)) => Ok(Self::Url(url)),
            (Some(_), Some(_)) => Err(CallerError::ConflictingInput),
            (None, None) => Err(CallerError::MissingInput),
        }
    }

    pub fn kind(&self) -> ScanKind {
        match self {
            Self::File { .. } => ScanKind::File,
            Self::Url(_) => ScanKind::Url,
        }
    }
}

impl fmt::Debug for ScanRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::File {
                content,
                display_name,
            } => f
                .debug_struct("File")
                .field("display_name", display_name)
                .field("bytes", &content.len())
                .finish(),
            Self::Url(url) => f.debug_tuple("Url").field(url).finish(),
        }
    }
}

/// Which endpoint pair a handle belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScanKind {
    #[default]
    File,
    Url,
}

impl fmt::Display for ScanKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::File => f.write_str("file"),
            Self::Url => f.write_str("url"),
        }
    }
}

impl FromStr for ScanKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "file" => Ok(Self::File),
            "url" => Ok(Self::Url),
            _ => Err(format!("unknown scan kind: {s}. Use 'file' or 'url'.")),
        }
    }
}

/// Opaque resource token issued by the scanning service.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScanHandle(String);

impl ScanHandle {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for ScanHandle {
    fn from(token: String) -> Self {
        Self(token)
    }
}

impl From<&str> for ScanHandle {
    fn from(token: &str) -> Self {
        Self(token.to_string())
    }
}

impl fmt::Display for ScanHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A handle together with the kind of submission that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Submission {
    pub handle: ScanHandle,
    pub kind: ScanKind,
}

/// The service's report, passed through without interpretation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScanReport(serde_json::Value);

impl ScanReport {
    pub fn new(body: serde_json::Value) -> Self {
        Self(body)
    }

    pub fn as_json(&self) -> &serde_json::Value {
        &self.0
    }

    pub fn into_json(self) -> serde_json::Value {
        self.0
    }
}
