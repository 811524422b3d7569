//! Mount point seam.
//!
//! The router never owns the page. It looks a container up once through a
//! `Document` and then mutates it in place through the `Surface` trait.

use std::sync::Arc;

use crate::host::node::Node;

/// A mutable mount point (the DOM container a view is rendered into).
pub trait Surface: Send + Sync {
    /// Remove every child.
    fn clear(&self);

    /// Append a node as the last child.
    fn append(&self, node: Node);

    /// Append a node as a child of the current last child.
    ///
    /// Returns false when the surface has no children to attach to.
    fn append_to_last_child(&self, node: Node) -> bool;

    /// Copy of the current children.
    fn snapshot(&self) -> Vec<Node>;
}

/// Lookup of mount points by element id.
pub trait Document: Send + Sync {
    fn element_by_id(&self, id: &str) -> Option<Arc<dyn Surface>>;
}
