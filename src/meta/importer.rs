//! Lazy module importer.
//!
//! Maps a module name to its location under the origin and materializes
//! the bundled utility the first time it is asked for.

use std::sync::Arc;

use dashmap::DashMap;
use thiserror::Error;
use url::Url;

use crate::input::{Handler, Validator};
use crate::meta::directories::Directory;
use crate::meta::version::Version;

/// Default origin modules are served from.
pub const DEFAULT_ORIGIN: &str = "http://localhost:8081";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ImportError {
    #[error("no module directory matches '{0}'")]
    UnknownModule(String),

    #[error("module '{name}' ({path}) is not bundled with this build")]
    NotBundled { name: String, path: String },

    #[error("invalid module path for '{name}': {reason}")]
    InvalidPath { name: String, reason: String },
}

/// Helper modules.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Helper {
    Sentinel,
    SubdomainRouter,
}

impl Helper {
    fn from_module_name(name: &str) -> Option<Self> {
        match name {
            "helperSentinel" => Some(Helper::Sentinel),
            "helperSubdomainRouter" => Some(Helper::SubdomainRouter),
            _ => None,
        }
    }
}

/// What an imported module gives the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Utility {
    Handler(Handler),
    Validator(Validator),
    Helper(Helper),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportedModule {
    pub name: String,
    pub directory: Directory,
    /// `{origin}/modules/{directory}/{name}.js`
    pub path: Url,
    pub utility: Utility,
}

/// Resolves module names and caches the result.
#[derive(Debug)]
pub struct Importer {
    origin: Url,
    cache: DashMap<String, Arc<ImportedModule>>,
}

impl Importer {
    pub fn new(origin: Url) -> Self {
        Self {
            origin,
            cache: DashMap::new(),
        }
    }

    pub fn origin(&self) -> &Url {
        &self.origin
    }

    /// Number of modules imported so far.
    pub fn cached(&self) -> usize {
        self.cache.len()
    }

    /// Location a module would be fetched from.
    pub fn module_path(&self, name: &str) -> Result<(Directory, Url), ImportError> {
        let directory =
            Directory::for_module(name).ok_or_else(|| ImportError::UnknownModule(name.to_string()))?;
        let relative = format!("modules/{directory}/{name}.js");
        let path = self.origin.join(&relative).map_err(|e| ImportError::InvalidPath {
            name: name.to_string(),
            reason: e.to_string(),
        })?;
        Ok((directory, path))
    }

    pub fn import(&self, name: &str) -> Result<Arc<ImportedModule>, ImportError> {
        if let Some(hit) = self.cache.get(name) {
            return Ok(hit.value().clone());
        }

        let (directory, path) = self.module_path(name)?;
        let _span = tracing::info_span!("import", module = %name).entered();

        let utility = Handler::from_module_name(name)
            .map(Utility::Handler)
            .or_else(|| Validator::from_module_name(name).map(Utility::Validator))
            .or_else(|| Helper::from_module_name(name).map(Utility::Helper));

        let Some(utility) = utility else {
            let listed = Version::current().includes(name);
            tracing::warn!(path = %path, listed, "Module could not be imported");
            return Err(ImportError::NotBundled {
                name: name.to_string(),
                path: path.to_string(),
            });
        };

        let module = Arc::new(ImportedModule {
            name: name.to_string(),
            directory,
            path,
            utility,
        });
        self.cache.insert(name.to_string(), module.clone());
        tracing::info!(path = %module.path, "Module imported");
        Ok(module)
    }
}

impl Default for Importer {
    fn default() -> Self {
        match Url::parse(DEFAULT_ORIGIN) {
            Ok(origin) => Self::new(origin),
            Err(_) => unreachable!("default origin is a valid URL"),
        }
    }
}
