//! BienUtils: subdomain-aware client-side routing and input utilities

pub mod config;
pub mod host;
pub mod input;
pub mod lifecycle;
pub mod loader;
pub mod meta;
pub mod observability;
pub mod routing;

mod sync;

pub use config::schema::RouterConfig;
pub use lifecycle::{load_subdomain_router, RouterHandle};
pub use routing::{NavigationOutcome, RouterBootstrapError, RouterError, RouterHost, SubdomainRouter};
