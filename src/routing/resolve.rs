//! Target normalisation and route resolution.
//!
//! # Responsibilities
//! - Turn a path or URL into an absolute URL
//! - Split a URL into (subdomain, path) against the base URL
//! - Pick the subdomain entry and route, falling back to "404"
//!
//! # Design Decisions
//! - Host labels beyond the base host's label count form the subdomain
//! - Route matching is exact string equality on the stripped path
//! - Fallback is iterative: route → "404" of the same subdomain;
//!   unknown subdomain → "404" of the "@" entry; otherwise an error

use url::Url;

use crate::config::schema::{
    RouteEntry, RouterConfig, SubdomainEntry, FALLBACK_ROUTE, ROOT_SUBDOMAIN,
};
use crate::routing::error::{RouterError, RouterResult};

/// A navigation target: a path on the current origin or an absolute URL.
#[derive(Debug, Clone, PartialEq)]
pub enum NavTarget {
    Path(String),
    Url(Url),
}

impl From<&str> for NavTarget {
    fn from(s: &str) -> Self {
        NavTarget::Path(s.to_string())
    }
}

impl From<String> for NavTarget {
    fn from(s: String) -> Self {
        NavTarget::Path(s)
    }
}

impl From<Url> for NavTarget {
    fn from(url: Url) -> Self {
        NavTarget::Url(url)
    }
}

impl From<&Url> for NavTarget {
    fn from(url: &Url) -> Self {
        NavTarget::Url(url.clone())
    }
}

/// Resolve a target to an absolute URL.
///
/// Strings starting with `/` are resolved against `origin`; absolute
/// http(s) URLs are used as-is; anything else is rejected.
pub fn normalize_target(target: NavTarget, origin: &Url) -> RouterResult<Url> {
    match target {
        NavTarget::Url(url) if matches!(url.scheme(), "http" | "https") => Ok(url),
        NavTarget::Url(url) => Err(RouterError::InvalidInput(format!(
            "unsupported scheme in '{}'",
            url
        ))),
        NavTarget::Path(s) if s.starts_with('/') => {
            let relative = format!("/{}", s.trim_start_matches('/'));
            let url = origin
                .join(&relative)
                .map_err(|e| RouterError::InvalidInput(format!("'{}': {}", s, e)))?;
            // `\` and stripped tabs/newlines can still turn the path into an
            // authority; a path target never leaves the current origin.
            if url.origin() != origin.origin() {
                return Err(RouterError::InvalidInput(format!(
                    "'{}' leaves the current origin",
                    s.escape_debug()
                )));
            }
            Ok(url)
        }
        NavTarget::Path(s) => match Url::parse(&s) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => Ok(url),
            _ => Err(RouterError::InvalidInput(format!(
                "'{}' is neither a path starting with '/' nor an absolute URL",
                s
            ))),
        },
    }
}

/// Subdomain and path of a URL relative to the base URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    pub subdomain: String,
    pub path: String,
}

/// Split `input` into its subdomain and path relative to `base`.
pub fn split_location(base: &Url, input: &Url) -> Location {
    let base_labels = base.host_str().map_or(0, |h| h.split('.').count());
    let labels: Vec<&str> = input.host_str().map_or_else(Vec::new, |h| h.split('.').collect());

    let subdomain = if labels.len() > base_labels {
        labels[..labels.len() - base_labels].join(".")
    } else {
        ROOT_SUBDOMAIN.to_string()
    };

    Location {
        subdomain,
        path: input.path().trim_start_matches('/').to_string(),
    }
}

/// How a resolution deviated from an exact match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fallback {
    None,
    /// No route matched; the subdomain's "404" route is used.
    Route,
    /// The subdomain is unknown; the "@" entry's "404" route is used.
    Subdomain,
}

/// Entry and route chosen for a location.
#[derive(Debug, Clone, Copy)]
pub struct Resolution<'a> {
    pub entry: &'a SubdomainEntry,
    pub route: &'a RouteEntry,
    pub fallback: Fallback,
}

impl Resolution<'_> {
    /// Path to record in history for this resolution.
    pub fn history_path(&self, location: &Location) -> String {
        match self.fallback {
            Fallback::Subdomain => format!("/{}", FALLBACK_ROUTE),
            _ => format!("/{}", location.path),
        }
    }
}

/// Pick the entry and route for `location`.
pub fn resolve<'a>(config: &'a RouterConfig, location: &Location) -> RouterResult<Resolution<'a>> {
    if let Some(entry) = config.find_subdomain(&location.subdomain) {
        if let Some(route) = entry.find_route(&location.path) {
            return Ok(Resolution {
                entry,
                route,
                fallback: Fallback::None,
            });
        }
        return entry
            .fallback_route()
            .map(|route| Resolution {
                entry,
                route,
                fallback: Fallback::Route,
            })
            .ok_or_else(|| RouterError::MissingFallback {
                subdomain: location.subdomain.clone(),
                path: location.path.clone(),
            });
    }

    config
        .find_subdomain(ROOT_SUBDOMAIN)
        .and_then(|entry| {
            entry.fallback_route().map(|route| Resolution {
                entry,
                route,
                fallback: Fallback::Subdomain,
            })
        })
        .ok_or_else(|| RouterError::MissingFallback {
            subdomain: location.subdomain.clone(),
            path: location.path.clone(),
        })
}
