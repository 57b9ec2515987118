//! Trace state threaded by value through the two walk phases.

use crate::{round_db, trace::{PathSegment, SegmentDetail, TraceResult, TraceStatus}};
use fiberplant_schema::node::NodeRef;
use std::collections::HashSet;

///
/// TraceContext
///
/// Owns everything a trace accumulates: path segments for each
/// direction, the running loss, the missing-link report, and the
/// visited set. The walks take it by value and hand it back, so every
/// mutation is visible in the signature and the between-phase reset is
/// an explicit, testable step.
///

#[derive(Debug)]
pub(crate) struct TraceContext {
    origin: NodeRef,
    start_fiber: Option<u32>,
    fiber: Option<u32>,
    visited: HashSet<NodeRef>,
    upstream: Vec<PathSegment>,
    downstream: Vec<PathSegment>,
    missing_links: Vec<String>,
    loss_db: f64,
}

impl TraceContext {
    pub fn new(origin: NodeRef, fiber: Option<u32>) -> Self {
        Self {
            origin,
            start_fiber: fiber,
            fiber,
            visited: HashSet::new(),
            upstream: Vec::new(),
            downstream: Vec::new(),
            missing_links: Vec::new(),
            loss_db: 0.0,
        }
    }

    /// Register a node. Returns false if the walk has been here before.
    pub fn visit(&mut self, node: NodeRef) -> bool {
        self.visited.insert(node)
    }

    pub const fn fiber(&self) -> Option<u32> {
        self.fiber
    }

    pub fn set_fiber(&mut self, fiber: u32) {
        self.fiber = Some(fiber);
    }

    pub fn missing_link(&mut self, message: String) {
        self.missing_links.push(message);
    }

    /// Upstream segments are recorded origin-first and reversed during
    /// assembly, which is equivalent to prepending each one.
    pub fn push_upstream(&mut self, node: NodeRef, label: String, detail: SegmentDetail) {
        let segment = self.segment(node, label, detail);
        self.upstream.push(segment);
    }

    pub fn push_downstream(&mut self, node: NodeRef, label: String, detail: SegmentDetail) {
        let segment = self.segment(node, label, detail);
        self.downstream.push(segment);
    }

    fn segment(&mut self, node: NodeRef, label: String, detail: SegmentDetail) -> PathSegment {
        let loss_db = detail.loss_db();
        self.loss_db += loss_db;
        PathSegment {
            index: 0, // renumbered at assembly
            node,
            label,
            detail,
            loss_db,
        }
    }

    /// Phase boundary: the downstream walk explores the opposite
    /// direction from the same origin, so it starts from a fresh
    /// visited set (re-seeded with the origin) and the original fiber.
    pub fn begin_downstream(&mut self) {
        self.visited.clear();
        self.visited.insert(self.origin);
        self.fiber = self.start_fiber;
    }

    /// Concatenate both walks head-end-first and renumber.
    pub fn finish(self) -> TraceResult {
        let mut segments = self.upstream;
        segments.reverse();
        segments.extend(self.downstream);
        for (index, segment) in segments.iter_mut().enumerate() {
            segment.index = index;
        }

        let status = if self.missing_links.is_empty() {
            TraceStatus::Complete
        } else {
            TraceStatus::Partial
        };

        TraceResult {
            success: true,
            error: None,
            status,
            segments,
            missing_links: self.missing_links,
            total_loss_db: round_db(self.loss_db),
        }
    }
}

///
/// TESTS
///
