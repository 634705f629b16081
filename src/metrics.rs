//! Metrics
//!
//! Fire-and-forget analytics events. Sinks must never fail the caller: checkout and order
//! transitions go through regardless of what the analytics backend does.

use mockall::automock;

/// Analytics event sink.
#[automock]
pub trait MetricsSink: Send + Sync {
    /// Record a single event. Implementations swallow their own failures.
    fn record_event(&self, name: &str, value: u64, metadata: serde_json::Value);
}

/// Sink that emits every event as a `tracing` event.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingMetrics;

impl MetricsSink for TracingMetrics {
    fn record_event(&self, name: &str, value: u64, metadata: serde_json::Value) {
        tracing::info!(target: "trellis::metrics", name, value, %metadata, "metric event");
    }
}

/// Sink that drops every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullMetrics;

impl MetricsSink for NullMetrics {
    fn record_event(&self, _name: &str, _value: u64, _metadata: serde_json::Value) {}
}
