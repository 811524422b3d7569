//! Router error definitions.

use thiserror::Error;

use crate::config::loader::ConfigError;
use crate::loader::component::ModuleLoadError;

/// Errors surfaced by `init` and `navigate`.
#[derive(Debug, Error)]
pub enum RouterError {
    /// Configuration source invalid or unreachable.
    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    /// `navigate` called before `init` completed.
    #[error("router is not ready; await init() before navigating")]
    NotReady,

    /// Malformed navigation target or state.
    #[error("invalid navigation input: {0}")]
    InvalidInput(String),

    /// Mount point missing from the document.
    #[error("container '{0}' not found in the document")]
    ContainerNotFound(String),

    /// Component resolution or rendering failed.
    #[error("module load failed: {0}")]
    ModuleLoad(#[from] ModuleLoadError),

    /// No matching route and no "404" to fall back to.
    #[error("no route for '{path}' and no \"404\" fallback in subdomain '{subdomain}'")]
    MissingFallback { subdomain: String, path: String },
}

/// Any failure while constructing, initializing, or performing the first
/// navigation of a router.
#[derive(Debug, Error)]
#[error("router bootstrap failed: {source}")]
pub struct RouterBootstrapError {
    #[from]
    pub source: RouterError,
}

/// Result type for router operations.
pub type RouterResult<T> = Result<T, RouterError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = RouterError::MissingFallback {
            subdomain: "shop".into(),
            path: "a/b".into(),
        };
        assert!(err.to_string().contains("'shop'"));

        let err: RouterBootstrapError = RouterError::NotReady.into();
        assert!(err.to_string().starts_with("router bootstrap failed"));
    }
}
