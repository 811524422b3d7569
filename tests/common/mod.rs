//! Shared fixtures for integration tests.
#![allow(dead_code)]

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use bien_utils::config::{parse_properties, RouterConfig};
use bien_utils::host::memory::{MemoryDocument, MemoryHistory, MemorySurface};
use bien_utils::host::Node;
use bien_utils::loader::{component_fn, Component, ComponentLoader, ModuleLoadError, ModuleRegistry};
use bien_utils::routing::RouterHost;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::Notify;
use url::Url;

pub const PROPERTIES: &str = "\
baseURL=https://example.com
container=app-root

@.component=shell/Main
@.routes.home.route=home
@.routes.home.component=views/Home
@.routes.ab.route=a/b
@.routes.ab.component=views/AB
@.routes.slow.route=slow
@.routes.slow.component=views/Slow
@.routes.404.route=404
@.routes.404.component=views/NotFound

shop.component=shell/Shop
shop.routes.cart.route=cart
shop.routes.cart.component=views/Cart
shop.routes.404.route=404
shop.routes.404.component=views/ShopNotFound
";

pub fn config() -> RouterConfig {
    parse_properties(PROPERTIES)
}

/// Root node a fixture component renders: `<tag id="{id}">`.
pub fn shell_node(id: &str) -> Node {
    Node::element("main").with_id(id)
}

pub fn view_node(id: &str) -> Node {
    Node::element("section").with_id(id)
}

/// Registry holding every component the fixture config names.
pub fn registry() -> ModuleRegistry {
    let mut registry = ModuleRegistry::new();
    for (path, id) in [("shell/Main", "main-shell"), ("shell/Shop", "shop-shell")] {
        registry.insert(path, component_fn(path, move || shell_node(id)));
    }
    for (path, id) in [
        ("views/Home", "home"),
        ("views/AB", "ab"),
        ("views/Slow", "slow"),
        ("views/NotFound", "not-found"),
        ("views/Cart", "cart"),
        ("views/ShopNotFound", "shop-not-found"),
    ] {
        registry.insert(path, component_fn(path, move || view_node(id)));
    }
    registry
}

/// Loader that blocks one path until released.
pub struct GatedLoader {
    inner: ModuleRegistry,
    gated: String,
    pub started: Notify,
    pub release: Notify,
}

impl GatedLoader {
    pub fn new(inner: ModuleRegistry, gated: impl Into<String>) -> Self {
        Self {
            inner,
            gated: gated.into(),
            started: Notify::new(),
            release: Notify::new(),
        }
    }
}

#[async_trait]
impl ComponentLoader for GatedLoader {
    async fn load(&self, path: &str) -> Result<Arc<dyn Component>, ModuleLoadError> {
        if path == self.gated {
            self.started.notify_one();
            self.release.notified().await;
        }
        self.inner.load(path).await
    }
}

/// Loader whose loads never complete.
pub struct StalledLoader;

#[async_trait]
impl ComponentLoader for StalledLoader {
    async fn load(&self, _path: &str) -> Result<Arc<dyn Component>, ModuleLoadError> {
        std::future::pending().await
    }
}

/// Component whose render never completes.
pub struct StalledComponent;

#[async_trait]
impl Component for StalledComponent {
    fn name(&self) -> &str {
        "stalled"
    }

    async fn render(&self) -> Result<Node, ModuleLoadError> {
        std::future::pending().await
    }
}

/// In-memory host wired to a router.
pub struct Fixture {
    pub document: Arc<MemoryDocument>,
    pub surface: Arc<MemorySurface>,
    pub history: Arc<MemoryHistory>,
    pub host: RouterHost,
}

impl Fixture {
    pub fn new(location: &str) -> Self {
        Self::with_loader(location, Arc::new(registry()))
    }

    pub fn with_loader(location: &str, loader: Arc<dyn ComponentLoader>) -> Self {
        let document = Arc::new(MemoryDocument::new());
        let surface = document.add_container("app-root");
        let history = Arc::new(MemoryHistory::new(Url::parse(location).unwrap()));
        let host = RouterHost::new(document.clone(), loader, history.clone());
        Self {
            document,
            surface,
            history,
            host,
        }
    }
}

/// Poll `check` until it holds or two seconds pass.
pub async fn eventually(mut check: impl FnMut() -> bool) -> bool {
    for _ in 0..200 {
        if check() {
            return true;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    check()
}

/// Start a mock HTTP server on an ephemeral port. Requests for a path in
/// `routes` get its `(status, body)`, anything else a 404.
pub async fn start_mock_http(routes: HashMap<&'static str, (u16, &'static str)>) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let routes = Arc::new(routes);

    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((mut socket, _)) => {
                    let routes = routes.clone();
                    tokio::spawn(async move {
                        let request = read_request(&mut socket).await;
                        let path = request.split_whitespace().nth(1).unwrap_or("/");

                        let (status, body) = routes.get(path).copied().unwrap_or((404, "not found"));
                        let status_text = match status {
                            200 => "200 OK",
                            404 => "404 Not Found",
                            500 => "500 Internal Server Error",
                            _ => "200 OK",
                        };
                        let response = format!(
                            "HTTP/1.1 {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                            status_text,
                            body.len(),
                            body
                        );
                        let _ = socket.write_all(response.as_bytes()).await;
                        let _ = socket.shutdown().await;
                    });
                }
                Err(_) => break,
            }
        }
    });

    addr
}

/// Read one request: headers plus `Content-Length` bytes of body.
async fn read_request(socket: &mut TcpStream) -> String {
    let mut data = Vec::new();
    let mut buf = [0u8; 1024];
    loop {
        let n = match socket.read(&mut buf).await {
            Ok(0) | Err(_) => break,
            Ok(n) => n,
        };
        data.extend_from_slice(&buf[..n]);

        let text = String::from_utf8_lossy(&data);
        if let Some(end) = text.find("\r\n\r\n") {
            let content_length = text[..end]
                .lines()
                .find_map(|line| {
                    let (name, value) = line.split_once(':')?;
                    if name.trim().eq_ignore_ascii_case("content-length") {
                        value.trim().parse::<usize>().ok()
                    } else {
                        None
                    }
                })
                .unwrap_or(0);
            if data.len() >= end + 4 + content_length {
                break;
            }
        }
    }
    String::from_utf8_lossy(&data).into_owned()
}

/// Start a server that accepts connections but never answers.
pub async fn start_stalling_http() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        let mut held = Vec::new();
        while let Ok((socket, _)) = listener.accept().await {
            held.push(socket);
        }
    });

    addr
}
