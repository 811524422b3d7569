//! Browser history and location seam.

use serde_json::Value;
use tokio::sync::broadcast;
use url::Url;

/// A back/forward navigation observed by the host.
#[derive(Debug, Clone, PartialEq)]
pub struct PopState {
    /// Location after the pop.
    pub url: Url,
    /// State stored with the entry that became current.
    pub state: Value,
}

/// History stack and location access.
///
/// `push_state` records an in-app navigation without reloading the page.
/// `assign` performs a full page load (hard navigation).
pub trait HistoryStore: Send + Sync {
    /// Current document location.
    fn current_location(&self) -> Url;

    /// Push a new entry for `path` carrying `state`.
    fn push_state(&self, state: &Value, path: &str);

    /// Replace the document with a full load of `url`.
    fn assign(&self, url: &Url);

    /// Subscribe to back/forward events.
    fn subscribe(&self) -> broadcast::Receiver<PopState>;
}
