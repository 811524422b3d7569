//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! config loader, registry, router
//!     → logging.rs (structured events, one span per navigation)
//!     → metrics.rs (navigation / config / module counters)
//! ```
//!
//! # Design Decisions
//! - Each navigation carries a UUID so interleaved logs stay readable
//! - Metrics are cheap (facade counters, no-op without a recorder)

pub mod logging;
pub mod metrics;
