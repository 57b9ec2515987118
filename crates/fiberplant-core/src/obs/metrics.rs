//! Counter state. Only `sink` writes here.

use serde::Serialize;
use std::cell::RefCell;

///
/// EventReport
///
/// Point-in-time snapshot of everything the engine has counted since
/// the last reset.
///

#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize)]
pub struct EventReport {
    pub traces_started: u64,
    pub traces_complete: u64,
    pub traces_partial: u64,
    pub traces_failed: u64,
    pub trace_segments: u64,
    pub missing_links: u64,
    pub matrices_built: u64,
    pub matrix_cells: u64,
    pub hierarchy_rejections: u64,
    pub splice_conflicts: u64,
    pub compliance_checks: u64,
}

thread_local! {
    static STATE: RefCell<EventReport> = RefCell::new(EventReport::default());
}

pub(crate) fn with_state_mut<R>(f: impl FnOnce(&mut EventReport) -> R) -> R {
    STATE.with_borrow_mut(f)
}

pub(crate) fn snapshot() -> EventReport {
    STATE.with_borrow(Clone::clone)
}

pub(crate) fn reset() {
    STATE.with_borrow_mut(|state| *state = EventReport::default());
}
