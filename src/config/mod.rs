//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! ConfigSource (object | URL | location string | file)
//!     → loader.rs (fetch text, pick format by extension)
//!     → properties.rs (grouped key=value parsing) or serde (JSON/TOML)
//!     → validation.rs (semantic checks)
//!     → RouterConfig (owned by the router, swapped in on init)
//! ```
//!
//! # Design Decisions
//! - The properties parser never fails; bad lines are skipped
//! - Only fetch failures and invalid sources are errors at load time
//! - Validation separates parsing from semantic checks

pub mod loader;
pub mod properties;
pub mod schema;
pub mod validation;

pub use loader::{load_config, ConfigError, ConfigFetcher, ConfigSource, HttpFetcher};
pub use properties::parse_properties;
pub use schema::{
    ComponentRef, ContainerRef, RouteEntry, RouterConfig, RouterOptions, SubdomainEntry,
    FALLBACK_ROUTE, ROOT_SUBDOMAIN,
};
pub use validation::{validate_config, ValidationError};
