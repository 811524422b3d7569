//! Subdomain router.
//!
//! # Responsibilities
//! - Load a configuration and move from uninitialized to ready
//! - Resolve a navigation target to a shell and a view component
//! - Mount both into the container and record the entry in history
//! - Hand cross-subdomain transitions to a full page load
//!
//! # Design Decisions
//! - Settings are swapped in whole on `init` (ArcSwap, lock-free reads)
//! - Every navigation takes a generation number; DOM writes, history
//!   pushes and hard navigations only commit while that generation is
//!   still the latest, so a newer navigation supersedes an older one
//! - Locks are never held across `.await`

use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use arc_swap::ArcSwapOption;
use serde_json::Value;
use tokio::time::timeout;
use tracing::Instrument;
use url::Url;
use uuid::Uuid;

use crate::config::loader::{load_config, ConfigError, ConfigFetcher, ConfigSource, HttpFetcher};
use crate::config::schema::{ComponentRef, ContainerRef, RouterConfig, RouterOptions};
use crate::config::validation::validate_config;
use crate::host::document::{Document, Surface};
use crate::host::history::HistoryStore;
use crate::host::node::Node;
use crate::loader::component::{Component, ComponentLoader, ModuleLoadError};
use crate::observability::metrics;
use crate::routing::error::{RouterError, RouterResult};
use crate::routing::resolve::{
    normalize_target, resolve, split_location, Fallback, Location, NavTarget, Resolution,
};
use crate::sync::lock;

/// Collaborators the router is wired to.
#[derive(Clone)]
pub struct RouterHost {
    pub document: Arc<dyn Document>,
    pub loader: Arc<dyn ComponentLoader>,
    pub history: Arc<dyn HistoryStore>,
    /// Config fetcher; defaults to `HttpFetcher` with the router's
    /// fetch timeout.
    pub fetcher: Option<Arc<dyn ConfigFetcher>>,
}

impl RouterHost {
    pub fn new(
        document: Arc<dyn Document>,
        loader: Arc<dyn ComponentLoader>,
        history: Arc<dyn HistoryStore>,
    ) -> Self {
        Self {
            document,
            loader,
            history,
            fetcher: None,
        }
    }

    pub fn with_fetcher(mut self, fetcher: Arc<dyn ConfigFetcher>) -> Self {
        self.fetcher = Some(fetcher);
        self
    }
}

/// Result of a navigation that did not fail.
#[derive(Debug, Clone, PartialEq)]
pub enum NavigationOutcome {
    /// Shell and view were mounted and a history entry was pushed.
    Mounted {
        subdomain: String,
        path: String,
        fallback: Fallback,
    },
    /// The target lives on another subdomain; a full page load was issued.
    HardNavigation(Url),
    /// A newer navigation started before this one could finish.
    Superseded,
}

/// Parsed configuration plus its base URL.
struct Settings {
    config: RouterConfig,
    base: Url,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum HistoryMode {
    Push,
    Keep,
}

#[derive(Default)]
struct NavState {
    active_subdomain: Option<String>,
    container: Option<Arc<dyn Surface>>,
}

/// Client-side router keyed by subdomain.
pub struct SubdomainRouter {
    host: RouterHost,
    options: RouterOptions,
    settings: ArcSwapOption<Settings>,
    nav: Mutex<NavState>,
    generation: AtomicU64,
    commit_lock: Mutex<()>,
}

impl SubdomainRouter {
    /// Create an uninitialized router.
    pub fn new(host: RouterHost) -> Self {
        Self::with_options(host, RouterOptions::default())
    }

    pub fn with_options(host: RouterHost, options: RouterOptions) -> Self {
        Self {
            host,
            options,
            settings: ArcSwapOption::empty(),
            nav: Mutex::new(NavState::default()),
            generation: AtomicU64::new(0),
            commit_lock: Mutex::new(()),
        }
    }

    /// Load the configuration and mark the router ready.
    pub async fn init(&self, source: impl Into<ConfigSource>) -> RouterResult<()> {
        let config = match &self.host.fetcher {
            Some(fetcher) => load_config(source.into(), fetcher.as_ref()).await?,
            None => {
                let fetcher = HttpFetcher::new(self.options.fetch_timeout_secs);
                load_config(source.into(), &fetcher).await?
            }
        };

        if let Err(errors) = validate_config(&config) {
            if self.options.strict_validation {
                return Err(ConfigError::Validation(errors).into());
            }
            for error in &errors {
                tracing::warn!(%error, "Configuration problem");
            }
        }

        let base = config.base()?;
        if config.container.is_none() {
            return Err(ConfigError::MissingField("container").into());
        }

        lock(&self.nav).container = None;
        self.settings.store(Some(Arc::new(Settings { config, base })));
        tracing::info!("Router ready");
        Ok(())
    }

    pub fn is_ready(&self) -> bool {
        self.settings.load().is_some()
    }

    /// Active subdomain ("@" for the base domain), if any navigation ran.
    pub fn subdomain(&self) -> Option<String> {
        lock(&self.nav).active_subdomain.clone()
    }

    /// Copy of the loaded configuration.
    pub fn config(&self) -> Option<RouterConfig> {
        self.settings.load().as_ref().map(|s| s.config.clone())
    }

    /// Navigate with an empty state object.
    pub async fn navigate_to(&self, target: impl Into<NavTarget>) -> RouterResult<NavigationOutcome> {
        self.navigate(target, Value::Object(Default::default())).await
    }

    /// Navigate to `target`, recording `state` with the history entry.
    pub async fn navigate(
        &self,
        target: impl Into<NavTarget>,
        state: Value,
    ) -> RouterResult<NavigationOutcome> {
        self.navigate_inner(target.into(), state, HistoryMode::Push).await
    }

    /// Re-render `target` without pushing a history entry.
    ///
    /// Used for back/forward events, where the browser has already moved
    /// to the entry; pushing again would drop the forward stack.
    pub async fn restore(
        &self,
        target: impl Into<NavTarget>,
        state: Value,
    ) -> RouterResult<NavigationOutcome> {
        self.navigate_inner(target.into(), state, HistoryMode::Keep).await
    }

    async fn navigate_inner(
        &self,
        target: NavTarget,
        state: Value,
        mode: HistoryMode,
    ) -> RouterResult<NavigationOutcome> {
        let settings = self.settings.load_full().ok_or(RouterError::NotReady)?;
        if !(state.is_object() || state.is_null()) {
            return Err(RouterError::InvalidInput("state must be an object".into()));
        }

        let origin = self.host.history.current_location();
        let url = normalize_target(target, &origin)?;
        let location = split_location(&settings.base, &url);

        let span = tracing::info_span!(
            "navigate",
            nav_id = %Uuid::new_v4(),
            subdomain = %location.subdomain,
            path = %location.path,
        );

        let result = self
            .run_navigation(&settings, url, location, state, mode)
            .instrument(span.clone())
            .await;

        let _enter = span.enter();
        match &result {
            Ok(NavigationOutcome::Mounted { .. }) => {
                metrics::record_navigation("mounted");
                tracing::info!("Navigation complete");
            }
            Ok(NavigationOutcome::HardNavigation(url)) => {
                metrics::record_navigation("hard");
                tracing::info!(%url, "Cross-subdomain navigation, full page load");
            }
            Ok(NavigationOutcome::Superseded) => {
                metrics::record_navigation("superseded");
                tracing::debug!("Navigation superseded by a newer one");
            }
            Err(e) => {
                metrics::record_navigation("error");
                tracing::error!(error = %e, "Navigation failed");
            }
        }
        result
    }

    async fn run_navigation(
        &self,
        settings: &Settings,
        url: Url,
        location: Location,
        state: Value,
        mode: HistoryMode,
    ) -> RouterResult<NavigationOutcome> {
        // An in-app navigation takes a generation only once its route and
        // container are known, so a failing one never supersedes another.
        let cross_subdomain = matches!(
            lock(&self.nav).active_subdomain.as_deref(),
            Some(prev) if prev != location.subdomain
        );
        let prepared = if cross_subdomain {
            None
        } else {
            Some(self.prepare(settings, &location)?)
        };
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;

        let switched = self.commit(generation, || {
            let mut nav = lock(&self.nav);
            let previous = nav.active_subdomain.replace(location.subdomain.clone());
            match previous {
                Some(prev) if prev != location.subdomain => {
                    self.host.history.assign(&url);
                    true
                }
                _ => false,
            }
        });
        match switched {
            None => return Ok(NavigationOutcome::Superseded),
            Some(true) => return Ok(NavigationOutcome::HardNavigation(url)),
            Some(false) => {}
        }

        // The active subdomain may have moved back since the check above.
        let (resolution, container) = match prepared {
            Some(prepared) => prepared,
            None => self.prepare(settings, &location)?,
        };
        if !self.mount(generation, container.as_ref(), &resolution).await? {
            return Ok(NavigationOutcome::Superseded);
        }

        if mode == HistoryMode::Push {
            let history_path = resolution.history_path(&location);
            let pushed = self.commit(generation, || {
                self.host.history.push_state(&state, &history_path);
            });
            if pushed.is_none() {
                return Ok(NavigationOutcome::Superseded);
            }
            tracing::debug!(path = %history_path, "History entry pushed");
        }

        Ok(NavigationOutcome::Mounted {
            subdomain: location.subdomain,
            path: location.path,
            fallback: resolution.fallback,
        })
    }

    /// Route lookup and container resolution, before any effect.
    fn prepare<'a>(
        &self,
        settings: &'a Settings,
        location: &Location,
    ) -> RouterResult<(Resolution<'a>, Arc<dyn Surface>)> {
        let resolution = resolve(&settings.config, location)?;
        match resolution.fallback {
            Fallback::None => tracing::debug!(route = ?resolution.route.id, "Route matched"),
            Fallback::Route => tracing::warn!("No matching route, using \"404\""),
            Fallback::Subdomain => {
                tracing::warn!("Unknown subdomain, using the \"404\" route of \"@\"")
            }
        }
        let container = self.container(settings)?;
        Ok((resolution, container))
    }

    /// Mount shell then view. Returns false if superseded midway.
    async fn mount(
        &self,
        generation: u64,
        container: &dyn Surface,
        resolution: &Resolution<'_>,
    ) -> RouterResult<bool> {
        let spinner_shown = self.commit(generation, || {
            container.clear();
            container.append(Node::spinner());
        });
        if spinner_shown.is_none() {
            return Ok(false);
        }

        let shell_owner = format!("subdomain '{}'", resolution.entry.subdomain);
        let shell = self
            .resolve_component(resolution.entry.component.as_ref(), &shell_owner)
            .await?;
        let shell_root = self.render(shell.as_ref()).await?;
        if self
            .commit(generation, || {
                container.clear();
                container.append(shell_root);
            })
            .is_none()
        {
            return Ok(false);
        }
        tracing::debug!(component = shell.name(), "Shell mounted");

        let view_owner = format!(
            "route '{}' in subdomain '{}'",
            resolution.route.route.as_deref().unwrap_or_default(),
            resolution.entry.subdomain
        );
        let view = self
            .resolve_component(resolution.route.component.as_ref(), &view_owner)
            .await?;
        let view_root = self.render(view.as_ref()).await?;
        let attached = self.commit(generation, || container.append_to_last_child(view_root));
        match attached {
            None => return Ok(false),
            Some(false) => tracing::warn!("Shell root vanished before the view was attached"),
            Some(true) => tracing::debug!(component = view.name(), "View mounted"),
        }

        Ok(true)
    }

    async fn resolve_component(
        &self,
        component: Option<&ComponentRef>,
        owner: &str,
    ) -> Result<Arc<dyn Component>, ModuleLoadError> {
        match component {
            None => Err(ModuleLoadError::MissingComponent(owner.to_string())),
            Some(ComponentRef::Resolved(component)) => Ok(component.clone()),
            Some(ComponentRef::Path(path)) => {
                self.with_timeout(path, self.host.loader.load(path)).await
            }
        }
    }

    async fn render(&self, component: &dyn Component) -> Result<Node, ModuleLoadError> {
        self.with_timeout(component.name(), component.render()).await
    }

    async fn with_timeout<T>(
        &self,
        label: &str,
        fut: impl Future<Output = Result<T, ModuleLoadError>>,
    ) -> Result<T, ModuleLoadError> {
        let secs = self.options.load_timeout_secs;
        match timeout(Duration::from_secs(secs), fut).await {
            Ok(result) => result,
            Err(_) => Err(ModuleLoadError::Timeout {
                path: label.to_string(),
                secs,
            }),
        }
    }

    /// Resolve the mount point once and cache it.
    fn container(&self, settings: &Settings) -> RouterResult<Arc<dyn Surface>> {
        let mut nav = lock(&self.nav);
        if let Some(container) = &nav.container {
            return Ok(container.clone());
        }
        let container = match &settings.config.container {
            Some(ContainerRef::Element(surface)) => surface.clone(),
            Some(ContainerRef::Id(id)) => self
                .host
                .document
                .element_by_id(id)
                .ok_or_else(|| RouterError::ContainerNotFound(id.clone()))?,
            None => return Err(RouterError::ContainerNotFound(String::new())),
        };
        nav.container = Some(container.clone());
        Ok(container)
    }

    /// Run `effect` only if `generation` is still the latest navigation.
    fn commit<R>(&self, generation: u64, effect: impl FnOnce() -> R) -> Option<R> {
        let _guard = lock(&self.commit_lock);
        if self.generation.load(Ordering::SeqCst) != generation {
            return None;
        }
        Some(effect())
    }
}
