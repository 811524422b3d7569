//! Lazily materialized component registry.
//!
//! Hosts register a factory per module path. The factory runs on the
//! first `load` of that path; later loads are served from the cache.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use dashmap::DashMap;

use crate::loader::component::{Component, ComponentLoader, ModuleLoadError};
use crate::observability::metrics;

type Factory = Box<dyn Fn() -> Arc<dyn Component> + Send + Sync>;

/// Path-keyed component loader.
#[derive(Default)]
pub struct ModuleRegistry {
    factories: HashMap<String, Factory>,
    loaded: DashMap<String, Arc<dyn Component>>,
}

impl ModuleRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a factory for `path`. Replaces any previous registration.
    pub fn register<F>(&mut self, path: impl Into<String>, factory: F)
    where
        F: Fn() -> Arc<dyn Component> + Send + Sync + 'static,
    {
        let path = normalize(&path.into());
        self.loaded.remove(&path);
        self.factories.insert(path, Box::new(factory));
    }

    /// Register an already built component for `path`.
    pub fn insert(&mut self, path: impl Into<String>, component: Arc<dyn Component>) {
        self.register(path, move || component.clone());
    }

    /// Number of modules materialized so far.
    pub fn loaded_count(&self) -> usize {
        self.loaded.len()
    }

    pub fn contains(&self, path: &str) -> bool {
        self.factories.contains_key(&normalize(path))
    }
}

/// Strip leading slashes and a trailing `.js` so `"/views/Home.js"` and
/// `"views/Home"` name the same module.
fn normalize(path: &str) -> String {
    let trimmed = path.trim().trim_start_matches('/');
    trimmed.strip_suffix(".js").unwrap_or(trimmed).to_string()
}

#[async_trait]
impl ComponentLoader for ModuleRegistry {
    async fn load(&self, path: &str) -> Result<Arc<dyn Component>, ModuleLoadError> {
        let key = normalize(path);
        if let Some(cached) = self.loaded.get(&key) {
            return Ok(cached.value().clone());
        }

        let Some(factory) = self.factories.get(&key) else {
            metrics::record_module_load(false);
            tracing::warn!(path = %key, "Module not registered");
            return Err(ModuleLoadError::NotFound(key));
        };

        let component = self
            .loaded
            .entry(key.clone())
            .or_insert_with(|| factory())
            .value()
            .clone();
        metrics::record_module_load(true);
        tracing::debug!(path = %key, "Module materialized");
        Ok(component)
    }
}
