//! Host collaborator seams.
//!
//! # Data Flow
//! ```text
//! Component::render()
//!     → node.rs (owned Node tree)
//!     → document.rs (Surface: clear / append / append_to_last_child)
//!
//! SubdomainRouter
//!     → history.rs (push_state, assign, current_location)
//!     ← history.rs (PopState broadcast on back/forward)
//! ```
//!
//! # Design Decisions
//! - The router borrows the page through traits, never owns it
//! - memory.rs provides recording doubles for tests and dry runs

pub mod document;
pub mod history;
pub mod memory;
pub mod node;

pub use document::{Document, Surface};
pub use history::{HistoryStore, PopState};
pub use node::Node;
