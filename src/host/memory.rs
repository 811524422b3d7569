//! In-memory host implementations.
//!
//! Used by the `bien render` dry run and by tests. Every operation is
//! recorded so callers can assert on DOM writes, history pushes and hard
//! navigations.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use serde_json::Value;
use tokio::sync::broadcast;
use url::Url;

use crate::host::document::{Document, Surface};
use crate::host::history::{HistoryStore, PopState};
use crate::host::node::Node;
use crate::sync::lock;

/// A recorded surface mutation.
#[derive(Debug, Clone, PartialEq)]
pub enum SurfaceOp {
    Clear,
    Append(Node),
    AppendToLast(Node),
}

/// In-memory mount point.
#[derive(Debug, Default)]
pub struct MemorySurface {
    children: Mutex<Vec<Node>>,
    ops: Mutex<Vec<SurfaceOp>>,
}

impl MemorySurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every mutation applied so far, in order.
    pub fn ops(&self) -> Vec<SurfaceOp> {
        lock(&self.ops).clone()
    }
}

impl Surface for MemorySurface {
    fn clear(&self) {
        lock(&self.children).clear();
        lock(&self.ops).push(SurfaceOp::Clear);
    }

    fn append(&self, node: Node) {
        lock(&self.ops).push(SurfaceOp::Append(node.clone()));
        lock(&self.children).push(node);
    }

    fn append_to_last_child(&self, node: Node) -> bool {
        let mut children = lock(&self.children);
        match children.last_mut() {
            Some(last) => {
                lock(&self.ops).push(SurfaceOp::AppendToLast(node.clone()));
                last.append_child(node);
                true
            }
            None => false,
        }
    }

    fn snapshot(&self) -> Vec<Node> {
        lock(&self.children).clone()
    }
}

/// In-memory document holding mount points by id.
#[derive(Default)]
pub struct MemoryDocument {
    surfaces: Mutex<HashMap<String, Arc<MemorySurface>>>,
}

impl MemoryDocument {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a mount point and return it for inspection.
    pub fn add_container(&self, id: impl Into<String>) -> Arc<MemorySurface> {
        let surface = Arc::new(MemorySurface::new());
        lock(&self.surfaces).insert(id.into(), surface.clone());
        surface
    }
}

impl Document for MemoryDocument {
    fn element_by_id(&self, id: &str) -> Option<Arc<dyn Surface>> {
        lock(&self.surfaces)
            .get(id)
            .map(|s| s.clone() as Arc<dyn Surface>)
    }
}

/// A pushed history entry.
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryEntry {
    pub path: String,
    pub state: Value,
}

struct HistoryInner {
    location: Url,
    entries: Vec<HistoryEntry>,
    index: usize,
    pushes: Vec<HistoryEntry>,
    assignments: Vec<Url>,
}

/// In-memory history stack with a location.
pub struct MemoryHistory {
    inner: Mutex<HistoryInner>,
    pop_tx: broadcast::Sender<PopState>,
}

impl MemoryHistory {
    /// Create a history whose current location is `location`.
    pub fn new(location: Url) -> Self {
        let (pop_tx, _) = broadcast::channel(16);
        let initial = HistoryEntry {
            path: location.path().to_string(),
            state: Value::Null,
        };
        Self {
            inner: Mutex::new(HistoryInner {
                location,
                entries: vec![initial],
                index: 0,
                pushes: Vec::new(),
                assignments: Vec::new(),
            }),
            pop_tx,
        }
    }

    /// Entries pushed through `push_state`, in order.
    pub fn pushes(&self) -> Vec<HistoryEntry> {
        lock(&self.inner).pushes.clone()
    }

    /// URLs passed to `assign`, in order.
    pub fn assignments(&self) -> Vec<Url> {
        lock(&self.inner).assignments.clone()
    }

    /// Step back one entry and notify subscribers.
    ///
    /// Returns false when already at the oldest entry.
    pub fn back(&self) -> bool {
        self.step(false)
    }

    /// Step forward one entry and notify subscribers.
    ///
    /// Returns false when already at the newest entry.
    pub fn forward(&self) -> bool {
        self.step(true)
    }

    fn step(&self, forward: bool) -> bool {
        let event = {
            let mut inner = lock(&self.inner);
            let index = if forward {
                inner.index + 1
            } else if let Some(prev) = inner.index.checked_sub(1) {
                prev
            } else {
                return false;
            };
            let Some(entry) = inner.entries.get(index).cloned() else {
                return false;
            };
            inner.index = index;
            inner.location.set_path(&entry.path);
            PopState {
                url: inner.location.clone(),
                state: entry.state,
            }
        };
        let _ = self.pop_tx.send(event);
        true
    }
}

impl HistoryStore for MemoryHistory {
    fn current_location(&self) -> Url {
        lock(&self.inner).location.clone()
    }

    fn push_state(&self, state: &Value, path: &str) {
        let mut inner = lock(&self.inner);
        let entry = HistoryEntry {
            path: path.to_string(),
            state: state.clone(),
        };
        let next = inner.index + 1;
        inner.entries.truncate(next);
        inner.entries.push(entry.clone());
        inner.index = next;
        inner.location.set_path(path);
        inner.pushes.push(entry);
    }

    fn assign(&self, url: &Url) {
        let mut inner = lock(&self.inner);
        inner.assignments.push(url.clone());
        inner.location = url.clone();
    }

    fn subscribe(&self) -> broadcast::Receiver<PopState> {
        self.pop_tx.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_surface_records_ops() {
        let surface = MemorySurface::new();
        assert!(!surface.append_to_last_child(Node::text("orphan")));

        surface.append(Node::element("main"));
        assert!(surface.append_to_last_child(Node::text("view")));
        surface.clear();

        assert!(surface.snapshot().is_empty());
        assert_eq!(surface.ops().len(), 3);
        assert_eq!(surface.ops()[2], SurfaceOp::Clear);
    }

    #[test]
    fn test_document_lookup() {
        let doc = MemoryDocument::new();
        doc.add_container("app-root");
        assert!(doc.element_by_id("app-root").is_some());
        assert!(doc.element_by_id("other").is_none());
    }

    #[tokio::test]
    async fn test_history_push_and_back() {
        let history = MemoryHistory::new(Url::parse("https://example.com/").unwrap());
        let mut rx = history.subscribe();

        history.push_state(&json!({"x": 1}), "/a");
        history.push_state(&json!({"x": 2}), "/b");
        assert_eq!(history.current_location().path(), "/b");

        assert!(history.back());
        let pop = rx.recv().await.unwrap();
        assert_eq!(pop.url.path(), "/a");
        assert_eq!(pop.state, json!({"x": 1}));

        assert!(history.back());
        assert!(!history.back());
        assert_eq!(history.pushes().len(), 2);

        assert!(history.forward());
        assert!(history.forward());
        assert!(!history.forward());
        assert_eq!(history.current_location().path(), "/b");
    }

    #[test]
    fn test_assign_records_hard_navigation() {
        let history = MemoryHistory::new(Url::parse("https://example.com/").unwrap());
        let target = Url::parse("https://shop.example.com/cart").unwrap();
        history.assign(&target);
        assert_eq!(history.assignments(), vec![target.clone()]);
        assert_eq!(history.current_location(), target);
    }
}
