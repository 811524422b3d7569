//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (startup.rs):
//!     Load config → Validate → First navigation → Listen for back/forward
//!
//! Shutdown:
//!     RouterHandle::shutdown() or drop → listener task aborted
//! ```

pub mod startup;

pub use startup::{load_subdomain_router, load_subdomain_router_with, RouterHandle};
