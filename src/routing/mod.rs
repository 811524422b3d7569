//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! navigate(target, state)
//!     → resolve.rs (normalize target, split subdomain/path)
//!     → resolve.rs (entry + route lookup, "404" fallback)
//!     → router.rs (mount shell, mount view, push history)
//!     → NavigationOutcome or RouterError
//! ```
//!
//! # Design Decisions
//! - Routes are exact path keys, no patterns
//! - Fallback resolution is iterative and terminates with an error
//! - Cross-subdomain transitions are full page loads, never in-app

pub mod error;
pub mod resolve;
pub mod router;

pub use error::{RouterBootstrapError, RouterError, RouterResult};
pub use resolve::{split_location, Fallback, Location, NavTarget};
pub use router::{NavigationOutcome, RouterHost, SubdomainRouter};
