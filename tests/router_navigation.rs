//! Navigation behavior against in-memory host doubles.

use std::sync::Arc;

use bien_utils::config::{ComponentRef, ContainerRef, RouterConfig, RouterOptions};
use bien_utils::host::memory::{HistoryEntry, SurfaceOp};
use bien_utils::host::{Node, Surface};
use bien_utils::loader::{component_fn, ModuleLoadError};
use bien_utils::routing::{Fallback, NavigationOutcome, RouterError, SubdomainRouter};
use serde_json::json;
use url::Url;

mod common;

use common::{config, shell_node, view_node, Fixture, GatedLoader, StalledComponent, StalledLoader};

async fn ready_router(fixture: &Fixture) -> SubdomainRouter {
    let router = SubdomainRouter::new(fixture.host.clone());
    router.init(config()).await.unwrap();
    router
}

#[tokio::test]
async fn test_navigate_before_init_is_rejected() {
    let fixture = Fixture::new("https://example.com/");
    let router = SubdomainRouter::new(fixture.host.clone());

    let err = router.navigate_to("/home").await.unwrap_err();
    assert!(matches!(err, RouterError::NotReady));
    assert!(fixture.surface.ops().is_empty());
    assert!(fixture.history.pushes().is_empty());
}

#[tokio::test]
async fn test_mount_sequence_and_single_push() {
    let fixture = Fixture::new("https://example.com/");
    let router = ready_router(&fixture).await;

    let outcome = router.navigate("/a/b", json!({ "x": 1 })).await.unwrap();
    assert_eq!(
        outcome,
        NavigationOutcome::Mounted {
            subdomain: "@".into(),
            path: "a/b".into(),
            fallback: Fallback::None,
        }
    );

    assert_eq!(
        fixture.surface.ops(),
        vec![
            SurfaceOp::Clear,
            SurfaceOp::Append(Node::spinner()),
            SurfaceOp::Clear,
            SurfaceOp::Append(shell_node("main-shell")),
            SurfaceOp::AppendToLast(view_node("ab")),
        ]
    );
    assert_eq!(
        fixture.surface.snapshot(),
        vec![shell_node("main-shell").with_child(view_node("ab"))]
    );
    assert_eq!(
        fixture.history.pushes(),
        vec![HistoryEntry {
            path: "/a/b".into(),
            state: json!({ "x": 1 }),
        }]
    );
    assert_eq!(router.subdomain().as_deref(), Some("@"));
}

#[tokio::test]
async fn test_subdomain_detected_from_host() {
    let fixture = Fixture::new("https://shop.example.com/");
    let router = ready_router(&fixture).await;

    let outcome = router.navigate_to("/cart").await.unwrap();
    assert!(matches!(
        outcome,
        NavigationOutcome::Mounted { ref subdomain, .. } if subdomain == "shop"
    ));
    assert_eq!(
        fixture.surface.snapshot(),
        vec![shell_node("shop-shell").with_child(view_node("cart"))]
    );
    assert_eq!(router.subdomain().as_deref(), Some("shop"));
}

#[tokio::test]
async fn test_unknown_route_uses_subdomain_404() {
    let fixture = Fixture::new("https://shop.example.com/");
    let router = ready_router(&fixture).await;

    let outcome = router.navigate_to("/nowhere").await.unwrap();
    assert!(matches!(
        outcome,
        NavigationOutcome::Mounted { fallback: Fallback::Route, .. }
    ));
    assert_eq!(
        fixture.surface.snapshot(),
        vec![shell_node("shop-shell").with_child(view_node("shop-not-found"))]
    );
    // The requested path is kept in history.
    assert_eq!(fixture.history.pushes()[0].path, "/nowhere");
}

#[tokio::test]
async fn test_unknown_subdomain_uses_root_404() {
    let fixture = Fixture::new("https://blog.example.com/");
    let router = ready_router(&fixture).await;

    let outcome = router.navigate_to("/post").await.unwrap();
    assert!(matches!(
        outcome,
        NavigationOutcome::Mounted { fallback: Fallback::Subdomain, .. }
    ));
    assert_eq!(
        fixture.surface.snapshot(),
        vec![shell_node("main-shell").with_child(view_node("not-found"))]
    );
    assert_eq!(fixture.history.pushes()[0].path, "/404");
}

#[tokio::test]
async fn test_missing_fallback_is_an_error() {
    let mut config = config();
    config.subdomains.iter_mut().for_each(|entry| {
        entry.routes.retain(|r| r.route.as_deref() != Some("404"));
    });

    let fixture = Fixture::new("https://example.com/");
    let router = SubdomainRouter::new(fixture.host.clone());
    router.init(config).await.unwrap();

    let err = router.navigate_to("/nowhere").await.unwrap_err();
    assert!(matches!(err, RouterError::MissingFallback { .. }));
    // Lookup happens before the container is touched.
    assert!(fixture.surface.ops().is_empty());
    assert!(fixture.history.pushes().is_empty());
}

#[tokio::test]
async fn test_cross_subdomain_is_hard_navigation() {
    let fixture = Fixture::new("https://example.com/");
    let router = ready_router(&fixture).await;
    router.navigate_to("/home").await.unwrap();
    let ops_before = fixture.surface.ops().len();

    let target = Url::parse("https://shop.example.com/cart").unwrap();
    let outcome = router.navigate_to(target.clone()).await.unwrap();

    assert_eq!(outcome, NavigationOutcome::HardNavigation(target.clone()));
    assert_eq!(fixture.history.assignments(), vec![target]);
    assert_eq!(fixture.surface.ops().len(), ops_before);
    assert_eq!(fixture.history.pushes().len(), 1);
    assert_eq!(router.subdomain().as_deref(), Some("shop"));
}

#[tokio::test]
async fn test_invalid_targets_rejected() {
    let fixture = Fixture::new("https://example.com/");
    let router = ready_router(&fixture).await;

    let err = router.navigate_to("home").await.unwrap_err();
    assert!(matches!(err, RouterError::InvalidInput(_)));

    let err = router
        .navigate_to(Url::parse("ftp://example.com/home").unwrap())
        .await
        .unwrap_err();
    assert!(matches!(err, RouterError::InvalidInput(_)));
    assert!(fixture.surface.ops().is_empty());
}

#[tokio::test]
async fn test_path_targets_stay_on_origin() {
    let fixture = Fixture::new("https://example.com/");
    let router = ready_router(&fixture).await;
    router.navigate_to("/home").await.unwrap();
    let ops_before = fixture.surface.ops().len();

    for target in ["/\\attacker.evil.net/x", "/\t/attacker.evil.net/x"] {
        let err = router.navigate_to(target).await.unwrap_err();
        assert!(matches!(err, RouterError::InvalidInput(_)), "{:?}", target);
    }

    assert!(fixture.history.assignments().is_empty());
    assert_eq!(fixture.surface.ops().len(), ops_before);
    assert_eq!(fixture.history.pushes().len(), 1);
    assert_eq!(router.subdomain().as_deref(), Some("@"));
}

#[tokio::test]
async fn test_missing_container() {
    let mut config = config();
    config.container = Some(ContainerRef::Id("elsewhere".into()));

    let fixture = Fixture::new("https://example.com/");
    let router = SubdomainRouter::new(fixture.host.clone());
    router.init(config).await.unwrap();

    let err = router.navigate_to("/home").await.unwrap_err();
    assert!(matches!(err, RouterError::ContainerNotFound(ref id) if id == "elsewhere"));
}

#[tokio::test]
async fn test_resolved_components_and_element_container() {
    let fixture = Fixture::new("https://example.com/");
    let surface: Arc<dyn Surface> = fixture.document.add_container("other");
    let shell = component_fn("inline-shell", || shell_node("inline"));
    let view = component_fn("inline-view", || view_node("inline-view"));

    let mut config: RouterConfig = config();
    config.container = Some(ContainerRef::Element(surface.clone()));
    config.subdomains[0].component = Some(ComponentRef::Resolved(shell));
    config.subdomains[0].routes[0].component = Some(ComponentRef::Resolved(view));

    let router = SubdomainRouter::new(fixture.host.clone());
    router.init(config).await.unwrap();
    router.navigate_to("/home").await.unwrap();

    assert_eq!(
        surface.snapshot(),
        vec![shell_node("inline").with_child(view_node("inline-view"))]
    );
    assert!(fixture.surface.ops().is_empty());
}

#[tokio::test]
async fn test_unregistered_module_fails() {
    let mut config = config();
    config.subdomains[0].routes[0].component = Some(ComponentRef::path("views/Gone"));

    let fixture = Fixture::new("https://example.com/");
    let router = SubdomainRouter::new(fixture.host.clone());
    router.init(config).await.unwrap();

    let err = router.navigate_to("/home").await.unwrap_err();
    assert!(matches!(err, RouterError::ModuleLoad(_)));
    assert!(fixture.history.pushes().is_empty());
}

#[tokio::test]
async fn test_newer_navigation_supersedes_older() {
    let loader = Arc::new(GatedLoader::new(common::registry(), "views/Slow"));
    let fixture = Fixture::with_loader("https://example.com/", loader.clone());
    let router = Arc::new(ready_router(&fixture).await);

    let slow = {
        let router = router.clone();
        tokio::spawn(async move { router.navigate_to("/slow").await })
    };
    loader.started.notified().await;

    let outcome = router.navigate_to("/home").await.unwrap();
    assert!(matches!(outcome, NavigationOutcome::Mounted { .. }));

    loader.release.notify_one();
    let slow_outcome = slow.await.unwrap().unwrap();
    assert_eq!(slow_outcome, NavigationOutcome::Superseded);

    assert_eq!(
        fixture.surface.snapshot(),
        vec![shell_node("main-shell").with_child(view_node("home"))]
    );
    let paths: Vec<_> = fixture.history.pushes().into_iter().map(|e| e.path).collect();
    assert_eq!(paths, vec!["/home"]);
}

#[tokio::test]
async fn test_failed_lookup_does_not_supersede() {
    let mut config = config();
    config.subdomains.iter_mut().for_each(|entry| {
        entry.routes.retain(|r| r.route.as_deref() != Some("404"));
    });

    let loader = Arc::new(GatedLoader::new(common::registry(), "views/Slow"));
    let fixture = Fixture::with_loader("https://example.com/", loader.clone());
    let router = Arc::new(SubdomainRouter::new(fixture.host.clone()));
    router.init(config).await.unwrap();

    let slow = {
        let router = router.clone();
        tokio::spawn(async move { router.navigate_to("/slow").await })
    };
    loader.started.notified().await;

    let err = router.navigate_to("/nowhere").await.unwrap_err();
    assert!(matches!(err, RouterError::MissingFallback { .. }));

    loader.release.notify_one();
    let slow_outcome = slow.await.unwrap().unwrap();
    assert!(matches!(
        slow_outcome,
        NavigationOutcome::Mounted { ref path, .. } if path == "slow"
    ));

    assert_eq!(
        fixture.surface.snapshot(),
        vec![shell_node("main-shell").with_child(view_node("slow"))]
    );
    let paths: Vec<_> = fixture.history.pushes().into_iter().map(|e| e.path).collect();
    assert_eq!(paths, vec!["/slow"]);
}

#[tokio::test]
async fn test_stalled_load_times_out() {
    let fixture = Fixture::with_loader("https://example.com/", Arc::new(StalledLoader));
    let router = SubdomainRouter::with_options(
        fixture.host.clone(),
        RouterOptions {
            load_timeout_secs: 1,
            ..Default::default()
        },
    );
    router.init(config()).await.unwrap();

    let err = router.navigate_to("/home").await.unwrap_err();
    assert!(matches!(
        err,
        RouterError::ModuleLoad(ModuleLoadError::Timeout { ref path, secs: 1 }) if path == "shell/Main"
    ));
    assert!(fixture.history.pushes().is_empty());
}

#[tokio::test]
async fn test_stalled_render_times_out() {
    let mut config = config();
    config.subdomains[0].component = Some(ComponentRef::Resolved(Arc::new(StalledComponent)));

    let fixture = Fixture::new("https://example.com/");
    let router = SubdomainRouter::with_options(
        fixture.host.clone(),
        RouterOptions {
            load_timeout_secs: 1,
            ..Default::default()
        },
    );
    router.init(config).await.unwrap();

    let err = router.navigate_to("/home").await.unwrap_err();
    assert!(matches!(
        err,
        RouterError::ModuleLoad(ModuleLoadError::Timeout { ref path, secs: 1 }) if path == "stalled"
    ));
    assert!(fixture.history.pushes().is_empty());
}
