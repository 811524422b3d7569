//! Configuration schema definitions.
//!
//! `RouterConfig` is the parsed form of every config source: the
//! properties text, a JSON/TOML object, or a value built in code. Serde
//! key names follow the resource format (`baseURL`, `container`,
//! `subdomains`).

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use url::Url;

use crate::config::loader::ConfigError;
use crate::host::document::Surface;
use crate::loader::component::Component;

/// Subdomain key that denotes the base domain itself.
pub const ROOT_SUBDOMAIN: &str = "@";

/// Route key used as the per-subdomain fallback.
pub const FALLBACK_ROUTE: &str = "404";

/// Root routing configuration.
#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
pub struct RouterConfig {
    /// Canonical origin used to compute subdomain offsets.
    #[serde(rename = "baseURL", default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,

    /// Mount point for rendered views.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub container: Option<ContainerRef>,

    /// Ordered subdomain entries.
    #[serde(default)]
    pub subdomains: Vec<SubdomainEntry>,
}

impl RouterConfig {
    /// Parse `baseURL` into a URL.
    pub fn base(&self) -> Result<Url, ConfigError> {
        let raw = self
            .base_url
            .as_deref()
            .ok_or(ConfigError::MissingField("baseURL"))?;
        Url::parse(raw).map_err(|e| ConfigError::InvalidBaseUrl(format!("{}: {}", raw, e)))
    }

    /// First entry whose key equals `subdomain`.
    pub fn find_subdomain(&self, subdomain: &str) -> Option<&SubdomainEntry> {
        self.subdomains.iter().find(|s| s.subdomain == subdomain)
    }
}

/// Per-subdomain shell and routes.
#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
pub struct SubdomainEntry {
    /// Subdomain key ("@" for none).
    pub subdomain: String,

    /// Shell component wrapping every route view.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub component: Option<ComponentRef>,

    #[serde(default)]
    pub routes: Vec<RouteEntry>,
}

impl SubdomainEntry {
    /// Route whose key equals `path` exactly.
    pub fn find_route(&self, path: &str) -> Option<&RouteEntry> {
        self.routes
            .iter()
            .find(|r| r.route.as_deref() == Some(path))
    }

    /// The required "404" route, if declared.
    pub fn fallback_route(&self) -> Option<&RouteEntry> {
        self.find_route(FALLBACK_ROUTE)
    }
}

/// A path key mapped to a view component.
#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
pub struct RouteEntry {
    /// Identifier from a properties key (`<sub>.routes.<id>.<field>`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Path key. A record without one never matches.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub route: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub component: Option<ComponentRef>,

    /// Any other fields declared for the route.
    #[serde(flatten)]
    pub extra: BTreeMap<String, String>,
}

/// Either a module path or an already materialized component.
#[derive(Clone)]
pub enum ComponentRef {
    Path(String),
    Resolved(Arc<dyn Component>),
}

impl ComponentRef {
    pub fn path(path: impl Into<String>) -> Self {
        Self::Path(path.into())
    }

    /// Module path or component name, for logs.
    pub fn label(&self) -> &str {
        match self {
            ComponentRef::Path(p) => p,
            ComponentRef::Resolved(c) => c.name(),
        }
    }
}

impl fmt::Debug for ComponentRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ComponentRef::Path(p) => f.debug_tuple("Path").field(p).finish(),
            ComponentRef::Resolved(c) => f.debug_tuple("Resolved").field(&c.name()).finish(),
        }
    }
}

impl PartialEq for ComponentRef {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (ComponentRef::Path(a), ComponentRef::Path(b)) => a == b,
            (ComponentRef::Resolved(a), ComponentRef::Resolved(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl From<&str> for ComponentRef {
    fn from(path: &str) -> Self {
        Self::Path(path.to_string())
    }
}

impl From<Arc<dyn Component>> for ComponentRef {
    fn from(component: Arc<dyn Component>) -> Self {
        Self::Resolved(component)
    }
}

impl Serialize for ComponentRef {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

impl<'de> Deserialize<'de> for ComponentRef {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        String::deserialize(deserializer).map(ComponentRef::Path)
    }
}

/// Either an element id or an already resolved mount point.
#[derive(Clone)]
pub enum ContainerRef {
    Id(String),
    Element(Arc<dyn Surface>),
}

impl fmt::Debug for ContainerRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContainerRef::Id(id) => f.debug_tuple("Id").field(id).finish(),
            ContainerRef::Element(_) => f.write_str("Element(..)"),
        }
    }
}

impl PartialEq for ContainerRef {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (ContainerRef::Id(a), ContainerRef::Id(b)) => a == b,
            (ContainerRef::Element(a), ContainerRef::Element(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl From<&str> for ContainerRef {
    fn from(id: &str) -> Self {
        Self::Id(id.to_string())
    }
}

impl Serialize for ContainerRef {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            ContainerRef::Id(id) => serializer.serialize_str(id),
            ContainerRef::Element(_) => serializer.serialize_str("<element>"),
        }
    }
}

impl<'de> Deserialize<'de> for ContainerRef {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        String::deserialize(deserializer).map(ContainerRef::Id)
    }
}

/// Options governing how the router loads its config and components.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RouterOptions {
    /// Timeout for fetching a config resource, in seconds.
    pub fetch_timeout_secs: u64,

    /// Timeout for loading or rendering one component, in seconds.
    pub load_timeout_secs: u64,

    /// Treat semantic validation failures as fatal to `init`.
    pub strict_validation: bool,
}

impl Default for RouterOptions {
    fn default() -> Self {
        Self {
            fetch_timeout_secs: 10,
            load_timeout_secs: 10,
            strict_validation: false,
        }
    }
}
