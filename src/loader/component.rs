//! Component and loader traits.

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

use crate::host::node::Node;

/// Errors raised while resolving or rendering a component.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ModuleLoadError {
    /// No module is registered under the path.
    #[error("module not found: {0}")]
    NotFound(String),

    /// The configuration entry names no component.
    #[error("no component configured for {0}")]
    MissingComponent(String),

    /// The component failed to produce its root node.
    #[error("component '{name}' failed to render: {reason}")]
    Render { name: String, reason: String },

    /// Loading did not complete in time.
    #[error("loading '{path}' timed out after {secs} seconds")]
    Timeout { path: String, secs: u64 },
}

/// A renderable view.
#[async_trait]
pub trait Component: Send + Sync {
    /// Name used in logs and serialized configs.
    fn name(&self) -> &str {
        "component"
    }

    /// Produce the root node of this component.
    async fn render(&self) -> Result<Node, ModuleLoadError>;
}

/// Resolves module paths to components.
#[async_trait]
pub trait ComponentLoader: Send + Sync {
    async fn load(&self, path: &str) -> Result<Arc<dyn Component>, ModuleLoadError>;
}

/// Component backed by a plain factory function.
pub struct FnComponent<F> {
    name: String,
    factory: F,
}

impl<F> FnComponent<F>
where
    F: Fn() -> Node + Send + Sync,
{
    pub fn new(name: impl Into<String>, factory: F) -> Self {
        Self {
            name: name.into(),
            factory,
        }
    }
}

#[async_trait]
impl<F> Component for FnComponent<F>
where
    F: Fn() -> Node + Send + Sync,
{
    fn name(&self) -> &str {
        &self.name
    }

    async fn render(&self) -> Result<Node, ModuleLoadError> {
        Ok((self.factory)())
    }
}

/// Wrap a factory function as a shared component.
pub fn component_fn<F>(name: impl Into<String>, factory: F) -> Arc<dyn Component>
where
    F: Fn() -> Node + Send + Sync + 'static,
{
    Arc::new(FnComponent::new(name, factory))
}

impl fmt::Debug for dyn Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Component").field(&self.name()).finish()
    }
}
