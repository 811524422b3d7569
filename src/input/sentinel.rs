//! Remote sanitization client.
//!
//! Posts `{input, profile, encoding}` as JSON to the sanitization
//! endpoint and returns its report verbatim.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default sanitization endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://dealer-app.com.ar/sentinel/sanitize";

/// Which characters the service keeps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Profile {
    /// Unaccented letters and digits.
    #[serde(rename = "alnum")]
    AlphaNumeric,
    /// Digits and dots.
    #[serde(rename = "numeric+dot")]
    NumericDot,
    /// Everything, with special characters encoded.
    #[serde(rename = "any")]
    Any,
}

/// How the service encodes special characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Encoding {
    Html,
    Unicode,
    Ascii,
}

/// Threat categories detected in the input.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Matches {
    pub xss: bool,
    pub sql: bool,
    pub cmd: bool,
    pub sym: bool,
}

/// Report returned by the service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SentinelReport {
    pub profile: Profile,
    pub encoding: Encoding,
    /// Cleaned value.
    pub value: String,
    /// True when an attack attempt is suspected.
    #[serde(default)]
    pub hostility: bool,
    #[serde(default)]
    pub matches: Matches,
}

#[derive(Debug, Serialize)]
struct SanitizeRequest<'a> {
    input: &'a str,
    profile: Profile,
    encoding: Encoding,
}

/// Errors from the sanitization service.
#[derive(Debug, Error)]
pub enum SentinelError {
    #[error("sentinel request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("sentinel returned status {status}: {reason}")]
    Status { status: u16, reason: String },
}

/// HTTP client for the sanitization service.
#[derive(Debug, Clone)]
pub struct SentinelClient {
    client: reqwest::Client,
    endpoint: String,
}

impl SentinelClient {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self::with_timeout(endpoint, Duration::from_secs(10))
    }

    pub fn with_timeout(endpoint: impl Into<String>, timeout: Duration) -> Self {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_default();
        Self {
            client,
            endpoint: endpoint.into(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Ask the service to clean `input`.
    pub async fn sanitize(
        &self,
        input: &str,
        profile: Profile,
        encoding: Encoding,
    ) -> Result<SentinelReport, SentinelError> {
        let res = self
            .client
            .post(&self.endpoint)
            .json(&SanitizeRequest {
                input,
                profile,
                encoding,
            })
            .send()
            .await?;

        let status = res.status();
        if !status.is_success() {
            return Err(SentinelError::Status {
                status: status.as_u16(),
                reason: status.canonical_reason().unwrap_or("unknown").to_string(),
            });
        }

        let report: SentinelReport = res.json().await?;
        if report.hostility {
            tracing::warn!(matches = ?report.matches, "Sentinel flagged hostile input");
        }
        Ok(report)
    }
}

impl Default for SentinelClient {
    fn default() -> Self {
        Self::new(DEFAULT_ENDPOINT)
    }
}
