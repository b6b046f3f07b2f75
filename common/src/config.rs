//! # Process Configuration
//!
//! Built exactly once at startup and handed to the components that need it.
//! Nothing below reads the environment after [`Config::from_env`] returns.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use url::Url;

use crate::error::ConfigError;

pub const API_KEY_VAR: &str = "INFO_GUARD_KEY";
pub const BASE_URL_VAR: &str = "INFO_GUARD_BASE_URL";
pub const UPLOAD_DIR_VAR: &str = "INFO_GUARD_UPLOAD_DIR";
pub const REPORT_ATTEMPTS_VAR: &str = "INFO_GUARD_REPORT_ATTEMPTS";
pub const REPORT_INTERVAL_VAR: &str = "INFO_GUARD_REPORT_INTERVAL_MS";

pub const DEFAULT_BASE_URL: &str = "https://www.infoguard.com/ig/v2";
pub const DEFAULT_UPLOAD_DIR: &str = "uploads";
const DEFAULT_REPORT_INTERVAL_MS: u64 = 2_000;

pub struct Config {
    /// Secret attached to every outbound call.
    pub credential: ApiCredential,
    pub endpoints: Endpoints,
    /// Where uploaded files are written before they are submitted.
    pub upload_dir: PathBuf,
    pub report_policy: ReportPolicy,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Builds the configuration from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let key = lookup(API_KEY_VAR).ok_or(ConfigError::Missing(API_KEY_VAR))?;
        let credential = ApiCredential::new(key)?;

        let base = lookup(BASE_URL_VAR).unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let endpoints = Endpoints::from_base(&base)?;

        let upload_dir = lookup(UPLOAD_DIR_VAR)
            .filter(|dir| !dir.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_UPLOAD_DIR));

        let attempts: u32 = parse_var(&lookup, REPORT_ATTEMPTS_VAR, 1)?;
        if attempts == 0 {
            return Err(ConfigError::InvalidValue {
                var: REPORT_ATTEMPTS_VAR,
                value: attempts.to_string(),
            });
        }
        let interval_ms: u64 = parse_var(&lookup, REPORT_INTERVAL_VAR, DEFAULT_REPORT_INTERVAL_MS)?;

        Ok(Self {
            credential,
            endpoints,
            upload_dir,
            report_policy: ReportPolicy {
                attempts,
                interval: Duration::from_millis(interval_ms),
            },
        })
    }
}

fn parse_var<F, T>(lookup: &F, var: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(var) {
        None => Ok(default),
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidValue { var, value }),
    }
}

/// The service API key. Never printed.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiCredential(String);

impl ApiCredential {
    pub fn new(key: impl Into<String>) -> Result<Self, ConfigError> {
        let key: String = key.into();
        if key.trim().is_empty() {
            return Err(ConfigError::Empty(API_KEY_VAR));
        }
        Ok(Self(key))
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiCredential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiCredential(<redacted>)")
    }
}

/// The four service endpoints: one submission and one report endpoint per scan kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    pub file_scan: Url,
    pub file_report: Url,
    pub url_scan: Url,
    pub url_report: Url,
}

impl Endpoints {
    /// Derives every endpoint from the API root, e.g. `https://host/ig/v2`.
    pub fn from_base(base: &str) -> Result<Self, ConfigError> {
        let mut root = base.trim().to_string();
        if !root.ends_with('/') {
            root.push('/');
        }

        let invalid = |source| ConfigError::InvalidBaseUrl {
            value: base.to_string(),
            source,
        };
        let root: Url = Url::parse(&root).map_err(invalid)?;
        let join = |path: &str| root.join(path).map_err(invalid);

        Ok(Self {
            file_scan: join("file/scan")?,
            file_report: join("file/report")?,
            url_scan: join("url/scan")?,
            url_report: join("url/report")?,
        })
    }
}

/// How often a report is requested before the last failure is handed back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportPolicy {
    /// Total number of report requests, at least one.
    pub attempts: u32,
    /// Pause between two report requests.
    pub interval: Duration,
}

impl ReportPolicy {
    pub const fn single_shot() -> Self {
        Self {
            attempts: 1,
            interval: Duration::ZERO,
        }
    }
}

impl Default for ReportPolicy {
    fn default() -> Self {
        Self::single_shot()
    }
}
