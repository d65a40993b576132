//! Prometheus metrics for the action engine.
//!
//! - `roster_actions_total{action}` - actions that reached their side effect
//! - `roster_action_rejections_total{action,error}` - rejections by error code
//! - `roster_notification_deliveries_total{result}` - per-recipient sends
//!
//! Recording before [`init`] is a silent no-op, so library users that do not
//! export metrics pay nothing.

use prometheus::{Encoder, IntCounterVec, Opts, Registry, TextEncoder};
use std::sync::OnceLock;

/// Global Prometheus registry for all metrics.
pub static REGISTRY: OnceLock<Registry> = OnceLock::new();

pub fn registry() -> &'static Registry {
    REGISTRY.get_or_init(Registry::new)
}

/// Actions executed, by action kind.
pub static ACTIONS: OnceLock<IntCounterVec> = OnceLock::new();

/// Rejected submissions, by action kind and error code.
pub static REJECTIONS: OnceLock<IntCounterVec> = OnceLock::new();

/// Notification deliveries, by result.
pub static DELIVERIES: OnceLock<IntCounterVec> = OnceLock::new();

/// Initialize the Prometheus metrics registry.
///
/// Safe to call more than once; later calls are ignored.
pub fn init() {
    let r = registry();

    macro_rules! register {
        ($metric:ident, $init:expr) => {
            if $metric.get().is_none() {
                match $init {
                    Ok(m) => {
                        if let Err(e) = r.register(Box::new(m.clone())) {
                            tracing::warn!(error = %e, concat!("Failed to register metric ", stringify!($metric)));
                        }
                        let _ = $metric.set(m);
                    }
                    Err(e) => {
                        tracing::warn!(error = %e, concat!("Failed to create metric ", stringify!($metric)));
                    }
                }
            }
        };
    }

    register!(ACTIONS, IntCounterVec::new(Opts::new("roster_actions_total", "Roster actions executed by kind"), &["action"]));
    register!(REJECTIONS, IntCounterVec::new(Opts::new("roster_action_rejections_total", "Roster action rejections by kind and error"), &["action", "error"]));
    register!(DELIVERIES, IntCounterVec::new(Opts::new("roster_notification_deliveries_total", "Notification deliveries by result"), &["result"]));
}

/// Gather all metrics and encode them in Prometheus text format.
pub fn gather_metrics() -> String {
    let encoder = TextEncoder::new();
    let metric_families = registry().gather();
    let mut buffer = vec![];
    if let Err(e) = encoder.encode(&metric_families, &mut buffer) {
        tracing::error!(error = %e, "Failed to encode Prometheus metrics");
        return String::new();
    }
    match String::from_utf8(buffer) {
        Ok(s) => s,
        Err(e) => {
            tracing::error!(error = %e, "Prometheus metrics were not valid UTF-8");
            String::new()
        }
    }
}

pub fn record_action(action: &str) {
    if let Some(m) = ACTIONS.get() {
        m.with_label_values(&[action]).inc();
    }
}

pub fn record_rejection(action: &str, error: &str) {
    if let Some(m) = REJECTIONS.get() {
        m.with_label_values(&[action, error]).inc();
    }
}

pub fn record_delivery(delivered: bool) {
    if let Some(m) = DELIVERIES.get() {
        let result = if delivered { "delivered" } else { "failed" };
        m.with_label_values(&[result]).inc();
    }
}
