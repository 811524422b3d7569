//! Properties resource parser.
//!
//! # Format
//! ```text
//! baseURL=https://example.com
//! container=app-root
//! @.component=shell/Main
//! @.routes.404.route=404
//! @.routes.404.component=views/NotFound
//! ```
//!
//! # Rules
//! - Blank lines and lines starting with `#` are ignored
//! - The first `=` splits key from value; both sides are trimmed
//! - Lines with an empty key or value are skipped silently
//! - Duplicate keys: last value wins
//! - Subdomains and route ids keep first-seen order

use std::collections::HashMap;

use crate::config::schema::{ComponentRef, ContainerRef, RouteEntry, RouterConfig, SubdomainEntry};

/// Subdomain being accumulated, with route records keyed by route id.
struct PendingSubdomain {
    entry: SubdomainEntry,
    route_index: HashMap<String, usize>,
}

/// Parse properties text into a `RouterConfig`. Never fails.
pub fn parse_properties(text: &str) -> RouterConfig {
    let mut config = RouterConfig::default();
    let mut pending: Vec<PendingSubdomain> = Vec::new();
    let mut sub_index: HashMap<String, usize> = HashMap::new();

    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let Some((key, value)) = line.split_once('=') else {
            continue;
        };
        let (key, value) = (key.trim(), value.trim());
        if key.is_empty() || value.is_empty() {
            continue;
        }

        match key {
            "baseURL" => config.base_url = Some(value.to_string()),
            "container" => config.container = Some(ContainerRef::Id(value.to_string())),
            _ => {
                let mut segments = key.split('.');
                let subdomain = segments.next().unwrap_or_default();
                let rest: Vec<&str> = segments.collect();

                let idx = *sub_index.entry(subdomain.to_string()).or_insert_with(|| {
                    pending.push(PendingSubdomain {
                        entry: SubdomainEntry {
                            subdomain: subdomain.to_string(),
                            ..Default::default()
                        },
                        route_index: HashMap::new(),
                    });
                    pending.len() - 1
                });
                let sub = &mut pending[idx];

                match rest.as_slice() {
                    ["component"] => sub.entry.component = Some(ComponentRef::path(value)),
                    ["routes", route_id, field] => {
                        let route_idx =
                            *sub.route_index.entry(route_id.to_string()).or_insert_with(|| {
                                sub.entry.routes.push(RouteEntry {
                                    id: Some(route_id.to_string()),
                                    ..Default::default()
                                });
                                sub.entry.routes.len() - 1
                            });
                        set_route_field(&mut sub.entry.routes[route_idx], field, value);
                    }
                    _ => {
                        tracing::trace!(key, "Ignoring unrecognized properties key");
                    }
                }
            }
        }
    }

    config.subdomains = pending.into_iter().map(|p| p.entry).collect();
    config
}

fn set_route_field(route: &mut RouteEntry, field: &str, value: &str) {
    match field {
        "route" => route.route = Some(value.to_string()),
        "component" => route.component = Some(ComponentRef::path(value)),
        other => {
            route.extra.insert(other.to_string(), value.to_string());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
# main site
baseURL=https://example.com
container=app-root

@.component=shell/Main
@.routes.home.route=home
@.routes.home.component=views/Home
@.routes.404.route=404
@.routes.404.component=views/NotFound
shop.component=shell/Shop
shop.routes.cart.route=cart
shop.routes.cart.component=views/Cart
";

    #[test]
    fn test_parse_sample() {
        let config = parse_properties(SAMPLE);
        assert_eq!(config.base_url.as_deref(), Some("https://example.com"));
        assert_eq!(config.container, Some(ContainerRef::Id("app-root".into())));
        assert_eq!(config.subdomains.len(), 2);

        let root = &config.subdomains[0];
        assert_eq!(root.subdomain, "@");
        assert_eq!(root.component, Some(ComponentRef::path("shell/Main")));
        let ids: Vec<_> = root.routes.iter().map(|r| r.id.as_deref().unwrap()).collect();
        assert_eq!(ids, vec!["home", "404"]);
        assert_eq!(root.routes[1].component, Some(ComponentRef::path("views/NotFound")));

        assert_eq!(config.subdomains[1].subdomain, "shop");
    }

    #[test]
    fn test_reparse_is_equal() {
        assert_eq!(parse_properties(SAMPLE), parse_properties(SAMPLE));
    }

    #[test]
    fn test_last_value_wins_and_order_kept() {
        let text = "\
@.routes.b.route=b
@.routes.a.route=a
@.routes.b.route=bee
@.component=one
@.component=two
";
        let config = parse_properties(text);
        let root = &config.subdomains[0];
        assert_eq!(root.component, Some(ComponentRef::path("two")));
        assert_eq!(root.routes[0].id.as_deref(), Some("b"));
        assert_eq!(root.routes[0].route.as_deref(), Some("bee"));
        assert_eq!(root.routes[1].route.as_deref(), Some("a"));
    }

    #[test]
    fn test_malformed_lines_skipped() {
        let text = "\
no equals sign
=orphan value
@.routes.home.route=
   # indented comment
@.routes.home.component=views/Home
";
        let config = parse_properties(text);
        assert_eq!(config.base_url, None);
        let root = &config.subdomains[0];
        assert_eq!(root.routes.len(), 1);
        assert_eq!(root.routes[0].route, None);
    }

    #[test]
    fn test_value_keeps_later_equals() {
        let config = parse_properties("baseURL=https://example.com/?a=b");
        assert_eq!(config.base_url.as_deref(), Some("https://example.com/?a=b"));
    }

    #[test]
    fn test_extra_route_fields() {
        let config = parse_properties("@.routes.404.title=Not here\r\n@.routes.404.route=404");
        let route = &config.subdomains[0].routes[0];
        assert_eq!(route.extra.get("title").map(String::as_str), Some("Not here"));
        assert_eq!(route.route.as_deref(), Some("404"));
    }
}
