//! Metrics sink boundary.
//!
//! Engine logic MUST NOT depend on `obs::metrics` directly; everything
//! flows through [`MetricsEvent`] and [`record`]. Tests install a scoped
//! sink override to observe events without global state.

use crate::obs::metrics::{self, EventReport};
use std::{cell::RefCell, rc::Rc};

thread_local! {
    static SINK_OVERRIDE: RefCell<Option<Rc<dyn MetricsSink>>> = const { RefCell::new(None) };
}

///
/// MetricsEvent
///

#[derive(Clone, Copy, Debug)]
pub enum MetricsEvent {
    TraceStarted,
    TraceFinished {
        segments: u64,
        missing_links: u64,
        failed: bool,
    },
    MatrixBuilt {
        cells: u64,
    },
    HierarchyRejected,
    SpliceConflict,
    ComplianceChecked,
}

///
/// MetricsSink
///

pub trait MetricsSink {
    fn record(&self, event: MetricsEvent);
}

/// Default sink writing into the process-local counter state.
struct GlobalMetricsSink;

impl MetricsSink for GlobalMetricsSink {
    fn record(&self, event: MetricsEvent) {
        metrics::with_state_mut(|m| match event {
            MetricsEvent::TraceStarted => {
                m.traces_started = m.traces_started.saturating_add(1);
            }
            MetricsEvent::TraceFinished {
                segments,
                missing_links,
                failed,
            } => {
                if failed {
                    m.traces_failed = m.traces_failed.saturating_add(1);
                } else if missing_links > 0 {
                    m.traces_partial = m.traces_partial.saturating_add(1);
                } else {
                    m.traces_complete = m.traces_complete.saturating_add(1);
                }
                m.trace_segments = m.trace_segments.saturating_add(segments);
                m.missing_links = m.missing_links.saturating_add(missing_links);
            }
            MetricsEvent::MatrixBuilt { cells } => {
                m.matrices_built = m.matrices_built.saturating_add(1);
                m.matrix_cells = m.matrix_cells.saturating_add(cells);
            }
            MetricsEvent::HierarchyRejected => {
                m.hierarchy_rejections = m.hierarchy_rejections.saturating_add(1);
            }
            MetricsEvent::SpliceConflict => {
                m.splice_conflicts = m.splice_conflicts.saturating_add(1);
            }
            MetricsEvent::ComplianceChecked => {
                m.compliance_checks = m.compliance_checks.saturating_add(1);
            }
        });
    }
}

/// Route an event to the active sink.
pub(crate) fn record(event: MetricsEvent) {
    let handled = SINK_OVERRIDE.with_borrow(|sink| {
        sink.as_ref().map(|sink| sink.record(event)).is_some()
    });
    if !handled {
        GlobalMetricsSink.record(event);
    }
}

/// Install (or clear, with `None`) a thread-local sink override.
pub fn set_sink_override(sink: Option<Rc<dyn MetricsSink>>) {
    SINK_OVERRIDE.with_borrow_mut(|slot| *slot = sink);
}

/// Snapshot the process-local counters.
#[must_use]
pub fn metrics_report() -> EventReport {
    metrics::snapshot()
}

/// Zero the process-local counters.
pub fn metrics_reset_all() {
    metrics::reset();
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn global_sink_buckets_trace_outcomes() {
        metrics_reset_all();
        record(MetricsEvent::TraceStarted);
        record(MetricsEvent::TraceFinished {
            segments: 4,
            missing_links: 0,
            failed: false,
        });
        record(MetricsEvent::TraceFinished {
            segments: 1,
            missing_links: 2,
            failed: false,
        });
        record(MetricsEvent::TraceFinished {
            segments: 0,
            missing_links: 0,
            failed: true,
        });

        let report = metrics_report();
        assert_eq!(report.traces_started, 1);
        assert_eq!(report.traces_complete, 1);
        assert_eq!(report.traces_partial, 1);
        assert_eq!(report.traces_failed, 1);
        assert_eq!(report.trace_segments, 5);
        assert_eq!(report.missing_links, 2);
        metrics_reset_all();
    }

    #[test]
    fn override_sink_intercepts_events() {
        struct Capture(RefCell<u64>);
        impl MetricsSink for Capture {
            fn record(&self, _event: MetricsEvent) {
                *self.0.borrow_mut() += 1;
            }
        }

        metrics_reset_all();
        let capture = Rc::new(Capture(RefCell::new(0)));
        set_sink_override(Some(capture.clone()));
        record(MetricsEvent::HierarchyRejected);
        set_sink_override(None);

        assert_eq!(*capture.0.borrow(), 1);
        assert_eq!(metrics_report().hierarchy_rejections, 0);
        metrics_reset_all();
    }

    #[test]
    fn report_serializes_for_ui_consumption() {
        let json = serde_json::to_value(EventReport::default()).unwrap();
        assert_eq!(json["traces_started"], 0);
        assert_eq!(json["matrix_cells"], 0);
    }
}
