//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic checks the parser cannot make (it never fails)
//! - Every subdomain declares a shell component and a "404" route
//! - No duplicate subdomain keys
//!
//! # Design Decisions
//! - Returns all validation errors, not just the first
//! - Pure function: RouterConfig → Result<(), Vec<ValidationError>>
//! - The router logs these as warnings unless strict validation is on

use std::collections::HashSet;
use std::fmt;

use url::Url;

use crate::config::schema::{ContainerRef, RouterConfig};

/// A single semantic problem in a configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    MissingBaseUrl,
    InvalidBaseUrl(String),
    MissingContainer,
    DuplicateSubdomain(String),
    MissingShellComponent(String),
    MissingFallbackRoute(String),
    RouteWithoutComponent { subdomain: String, route: String },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::MissingBaseUrl => write!(f, "baseURL is not set"),
            ValidationError::InvalidBaseUrl(raw) => write!(f, "baseURL '{}' is not a valid URL", raw),
            ValidationError::MissingContainer => write!(f, "container is not set"),
            ValidationError::DuplicateSubdomain(s) => write!(f, "subdomain '{}' is declared more than once", s),
            ValidationError::MissingShellComponent(s) => write!(f, "subdomain '{}' has no component", s),
            ValidationError::MissingFallbackRoute(s) => write!(f, "subdomain '{}' has no \"404\" route", s),
            ValidationError::RouteWithoutComponent { subdomain, route } => {
                write!(f, "route '{}' in subdomain '{}' has no component", route, subdomain)
            }
        }
    }
}

impl std::error::Error for ValidationError {}

/// Validate a parsed configuration.
pub fn validate_config(config: &RouterConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    match config.base_url.as_deref() {
        None => errors.push(ValidationError::MissingBaseUrl),
        Some(raw) if Url::parse(raw).is_err() => {
            errors.push(ValidationError::InvalidBaseUrl(raw.to_string()))
        }
        Some(_) => {}
    }

    match &config.container {
        None => errors.push(ValidationError::MissingContainer),
        Some(ContainerRef::Id(id)) if id.trim().is_empty() => {
            errors.push(ValidationError::MissingContainer)
        }
        Some(_) => {}
    }

    let mut seen = HashSet::new();
    for sub in &config.subdomains {
        if !seen.insert(sub.subdomain.as_str()) {
            errors.push(ValidationError::DuplicateSubdomain(sub.subdomain.clone()));
        }
        if sub.component.is_none() {
            errors.push(ValidationError::MissingShellComponent(sub.subdomain.clone()));
        }
        if sub.fallback_route().is_none() {
            errors.push(ValidationError::MissingFallbackRoute(sub.subdomain.clone()));
        }
        for route in &sub.routes {
            if route.component.is_none() {
                let name = route
                    .route
                    .clone()
                    .or_else(|| route.id.clone())
                    .unwrap_or_default();
                errors.push(ValidationError::RouteWithoutComponent {
                    subdomain: sub.subdomain.clone(),
                    route: name,
                });
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
