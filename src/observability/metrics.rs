//! Metrics collection.
//!
//! # Metrics
//! - `router_navigations_total` (counter): navigations by outcome
//! - `router_config_loads_total` (counter): config loads by source, result
//! - `router_module_loads_total` (counter): module loads by result
//!
//! # Design Decisions
//! - Emitted through the `metrics` facade; the host installs a recorder
//! - Without a recorder every call is a no-op

/// Record the outcome of one navigation
/// ("mounted", "hard", "superseded", "error").
pub fn record_navigation(outcome: &'static str) {
    ::metrics::counter!("router_navigations_total", "outcome" => outcome).increment(1);
}

/// Record a config load attempt.
pub fn record_config_load(source: &'static str, ok: bool) {
    let result = if ok { "ok" } else { "error" };
    ::metrics::counter!("router_config_loads_total", "source" => source, "result" => result)
        .increment(1);
}

/// Record a module materialization attempt.
pub fn record_module_load(ok: bool) {
    let result = if ok { "ok" } else { "error" };
    ::metrics::counter!("router_module_loads_total", "result" => result).increment(1);
}
