//! Observability: process-local counters behind a sink boundary.
//!
//! Engine code never touches the counter state directly; all
//! instrumentation flows through [`sink::record`]. `metrics` owns the
//! state, `sink` is the only bridge to it.

pub(crate) mod metrics;
pub(crate) mod sink;

pub use metrics::EventReport;
pub use sink::{MetricsEvent, MetricsSink, metrics_report, metrics_reset_all, set_sink_override};
