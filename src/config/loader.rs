//! Configuration loading from objects, URLs and files.

use std::path::{Path, PathBuf};
use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;
use tokio::time::timeout;
use url::Url;

use crate::config::properties::parse_properties;
use crate::config::schema::RouterConfig;
use crate::config::validation::ValidationError;
use crate::observability::metrics;

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The source is neither an object nor a fetchable location.
    #[error("invalid config source: {0}")]
    InvalidSource(String),

    /// Fetching the resource failed (network, I/O or timeout).
    #[error("failed to fetch config from {location}: {reason}")]
    Fetch { location: String, reason: String },

    /// The resource answered with a non-success status.
    #[error("config resource {location} returned status {status}")]
    Status { location: String, status: u16 },

    /// An object-shaped resource (JSON/TOML) did not deserialize.
    #[error("parse error in {location}: {reason}")]
    Parse { location: String, reason: String },

    #[error("missing required field '{0}'")]
    MissingField(&'static str),

    #[error("invalid baseURL: {0}")]
    InvalidBaseUrl(String),

    #[error("validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Where a router configuration comes from.
#[derive(Debug, Clone)]
pub enum ConfigSource {
    /// Already parsed configuration.
    Object(RouterConfig),
    /// Fetchable resource.
    Url(Url),
    /// String naming a fetchable resource; must parse as an absolute URL.
    Location(String),
    /// Local file.
    File(PathBuf),
}

impl ConfigSource {
    /// Interpret a command-line style argument: absolute URLs are
    /// fetched, anything else is read as a local path.
    pub fn from_arg(arg: &str) -> Self {
        match Url::parse(arg) {
            Ok(url) if url.scheme().len() > 1 => ConfigSource::Url(url),
            _ => ConfigSource::File(PathBuf::from(arg)),
        }
    }

    fn kind(&self) -> &'static str {
        match self {
            ConfigSource::Object(_) => "object",
            ConfigSource::Url(_) | ConfigSource::Location(_) => "url",
            ConfigSource::File(_) => "file",
        }
    }
}

impl From<RouterConfig> for ConfigSource {
    fn from(config: RouterConfig) -> Self {
        ConfigSource::Object(config)
    }
}

impl From<Url> for ConfigSource {
    fn from(url: Url) -> Self {
        ConfigSource::Url(url)
    }
}

impl From<&str> for ConfigSource {
    fn from(location: &str) -> Self {
        ConfigSource::Location(location.to_string())
    }
}

/// Fetches the text of a config resource.
#[async_trait]
pub trait ConfigFetcher: Send + Sync {
    async fn fetch_text(&self, url: &Url) -> Result<String, ConfigError>;
}

/// Default fetcher: `reqwest` for http(s), `tokio::fs` for `file:` URLs.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: reqwest::Client,
    timeout: Duration,
}

impl HttpFetcher {
    pub fn new(timeout_secs: u64) -> Self {
        Self {
            client: reqwest::Client::new(),
            timeout: Duration::from_secs(timeout_secs),
        }
    }
}

impl Default for HttpFetcher {
    fn default() -> Self {
        Self::new(10)
    }
}

#[async_trait]
impl ConfigFetcher for HttpFetcher {
    async fn fetch_text(&self, url: &Url) -> Result<String, ConfigError> {
        let location = url.to_string();
        let fetch_err = |reason: String| ConfigError::Fetch {
            location: location.clone(),
            reason,
        };

        match url.scheme() {
            "file" => {
                let path = url
                    .to_file_path()
                    .map_err(|_| fetch_err("not a local path".into()))?;
                read_file(&path).await
            }
            "http" | "https" => {
                let fut = async {
                    let res = self
                        .client
                        .get(url.clone())
                        .send()
                        .await
                        .map_err(|e| fetch_err(e.to_string()))?;
                    let status = res.status();
                    if !status.is_success() {
                        return Err(ConfigError::Status {
                            location: location.clone(),
                            status: status.as_u16(),
                        });
                    }
                    res.text().await.map_err(|e| fetch_err(e.to_string()))
                };
                match timeout(self.timeout, fut).await {
                    Ok(result) => result,
                    Err(_) => Err(fetch_err(format!(
                        "timed out after {} seconds",
                        self.timeout.as_secs()
                    ))),
                }
            }
            other => Err(ConfigError::InvalidSource(format!(
                "unsupported scheme '{}'",
                other
            ))),
        }
    }
}

async fn read_file(path: &Path) -> Result<String, ConfigError> {
    tokio::fs::read_to_string(path)
        .await
        .map_err(|e| ConfigError::Fetch {
            location: path.display().to_string(),
            reason: e.to_string(),
        })
}

/// Parse resource text according to the extension of its location:
/// `.json` and `.toml` carry the object shape, anything else is
/// properties text.
pub fn parse_config_text(location: &str, text: &str) -> Result<RouterConfig, ConfigError> {
    let path = location
        .split(['?', '#'])
        .next()
        .unwrap_or(location)
        .to_ascii_lowercase();
    let parse_err = |reason: String| ConfigError::Parse {
        location: location.to_string(),
        reason,
    };

    if path.ends_with(".json") {
        serde_json::from_str(text).map_err(|e| parse_err(e.to_string()))
    } else if path.ends_with(".toml") {
        toml::from_str(text).map_err(|e| parse_err(e.to_string()))
    } else {
        Ok(parse_properties(text))
    }
}

/// Load a configuration from any source.
pub async fn load_config(
    source: ConfigSource,
    fetcher: &dyn ConfigFetcher,
) -> Result<RouterConfig, ConfigError> {
    let kind = source.kind();
    let result = match source {
        ConfigSource::Object(config) => Ok(config),
        ConfigSource::Url(url) => fetch_and_parse(&url, fetcher).await,
        ConfigSource::Location(raw) => match Url::parse(&raw) {
            Ok(url) => fetch_and_parse(&url, fetcher).await,
            Err(e) => Err(ConfigError::InvalidSource(format!("'{}': {}", raw, e))),
        },
        ConfigSource::File(path) => match read_file(&path).await {
            Ok(text) => parse_config_text(&path.to_string_lossy(), &text),
            Err(e) => Err(e),
        },
    };

    metrics::record_config_load(kind, result.is_ok());
    match &result {
        Ok(config) => tracing::info!(
            source = kind,
            subdomains = config.subdomains.len(),
            "Configuration loaded"
        ),
        Err(e) => tracing::error!(source = kind, error = %e, "Configuration load failed"),
    }
    result
}

async fn fetch_and_parse(url: &Url, fetcher: &dyn ConfigFetcher) -> Result<RouterConfig, ConfigError> {
    let text = fetcher.fetch_text(url).await?;
    parse_config_text(url.path(), &text)
}
