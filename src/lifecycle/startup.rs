//! Router bootstrap.
//!
//! # Responsibilities
//! - Construct and initialize a router
//! - Run the first navigation against the current location
//! - Re-render the current location on every back/forward event
//!
//! # Design Decisions
//! - Fail fast: any startup error is wrapped in one RouterBootstrapError
//! - No retries
//! - The listener task lives as long as the returned handle
//! - Back/forward re-renders without pushing, so the forward stack survives

use std::sync::Arc;

use serde_json::json;
use tokio::sync::broadcast::error::RecvError;
use tokio::task::JoinHandle;

use crate::config::loader::ConfigSource;
use crate::config::schema::RouterOptions;
use crate::routing::error::RouterBootstrapError;
use crate::routing::router::{RouterHost, SubdomainRouter};

/// A bootstrapped router and its back/forward listener.
pub struct RouterHandle {
    router: Arc<SubdomainRouter>,
    listener: JoinHandle<()>,
}

impl RouterHandle {
    pub fn router(&self) -> &Arc<SubdomainRouter> {
        &self.router
    }

    /// Stop listening for back/forward events.
    pub fn shutdown(&self) {
        self.listener.abort();
    }
}

impl Drop for RouterHandle {
    fn drop(&mut self) {
        self.listener.abort();
    }
}

/// Construct, initialize and start a router.
pub async fn load_subdomain_router(
    source: impl Into<ConfigSource>,
    host: RouterHost,
) -> Result<RouterHandle, RouterBootstrapError> {
    load_subdomain_router_with(source, host, RouterOptions::default()).await
}

/// As `load_subdomain_router`, with explicit options.
pub async fn load_subdomain_router_with(
    source: impl Into<ConfigSource>,
    host: RouterHost,
    options: RouterOptions,
) -> Result<RouterHandle, RouterBootstrapError> {
    let history = host.history.clone();
    let router = Arc::new(SubdomainRouter::with_options(host, options));

    router.init(source).await?;
    // Subscribe before the first navigation so no pop is missed.
    let mut pops = history.subscribe();
    router
        .navigate(history.current_location(), json!({ "ready": true }))
        .await?;

    let listener_router = router.clone();
    let listener = tokio::spawn(async move {
        loop {
            match pops.recv().await {
                Ok(_) => {
                    let location = history.current_location();
                    if let Err(e) = listener_router
                        .restore(location, json!({ "ready": true }))
                        .await
                    {
                        tracing::error!(error = %e, "Back/forward navigation failed");
                    }
                }
                Err(RecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "Missed back/forward events");
                }
                Err(RecvError::Closed) => break,
            }
        }
        tracing::debug!("History listener stopped");
    });

    tracing::info!("Subdomain router started");
    Ok(RouterHandle { router, listener })
}
