//! Component loading.
//!
//! # Data Flow
//! ```text
//! ComponentRef::Resolved(component) → used directly
//! ComponentRef::Path("views/Home")  → ComponentLoader::load(path)
//!                                       → registry.rs (factory, cached)
//!                                       → Arc<dyn Component>
//! ```
//!
//! # Design Decisions
//! - The router depends on the `ComponentLoader` trait only
//! - Modules are materialized on first use, then cached

pub mod component;
pub mod registry;

pub use component::{component_fn, Component, ComponentLoader, FnComponent, ModuleLoadError};
pub use registry::ModuleRegistry;
