//! Bidirectional path tracing.
//!
//! A trace reconstructs the physical route from the head-end terminal
//! to the furthest reachable subscriber through the node the operator
//! asked about, accumulating optical loss along the way. The data is
//! field-entered and routinely incomplete: dangling references, absent
//! parents, and even accidental cycles must shorten the answer, never
//! crash it. The upstream phase completes all of its store reads before
//! the downstream phase begins.

mod context;
mod downstream;
mod upstream;

use crate::{
    color,
    error::Error,
    obs::sink::{MetricsEvent, record},
    store::EntityStore,
};
use context::TraceContext;
use downstream::downstream_walk;
use fiberplant_schema::{
    entity::{Enclosure, EnclosureKind, FiberColors, Splice},
    ids::{EnclosureId, SpliceId},
    node::NodeRef,
};
use serde::Serialize;
use std::collections::HashSet;
use upstream::upstream_walk;

///
/// TraceStatus
///

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum TraceStatus {
    /// Head end and subscriber both reached with no gaps.
    Complete,
    /// At least one missing link cut a direction short.
    Partial,
}

///
/// SpliceHop
///
/// The splice a walk passed through inside one enclosure. Colors are
/// re-derived from the owning tray's recorded cable counts where
/// possible, falling back to the names frozen on the splice record.
///

#[derive(Clone, Debug, Serialize)]
pub struct SpliceHop {
    pub splice: SpliceId,
    pub fiber_a: u32,
    pub fiber_b: u32,
    pub colors_a: FiberColors,
    pub colors_b: FiberColors,
    pub loss_db: Option<f64>,
}

///
/// SegmentDetail
///

#[derive(Clone, Debug, Serialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum SegmentDetail {
    HeadEnd,
    FramePort {
        number: u32,
    },
    Enclosure {
        enclosure_kind: EnclosureKind,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        splice: Option<SpliceHop>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        splitter_loss_db: Option<f64>,
    },
    SubscriberDrop {
        number: u32,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        customer: Option<String>,
    },
}

impl SegmentDetail {
    /// Loss this segment contributes to the running total.
    #[must_use]
    pub fn loss_db(&self) -> f64 {
        match self {
            Self::Enclosure {
                splice,
                splitter_loss_db,
                ..
            } => {
                splice.as_ref().and_then(|hop| hop.loss_db).unwrap_or(0.0)
                    + splitter_loss_db.unwrap_or(0.0)
            }
            Self::HeadEnd | Self::FramePort { .. } | Self::SubscriberDrop { .. } => 0.0,
        }
    }
}

///
/// PathSegment
///

#[derive(Clone, Debug, Serialize)]
pub struct PathSegment {
    /// Position in final path order, 0-based from the head end.
    pub index: usize,
    pub node: NodeRef,
    pub label: String,
    pub detail: SegmentDetail,
    pub loss_db: f64,
}

///
/// TraceResult
///

#[derive(Clone, Debug, Serialize)]
pub struct TraceResult {
    pub success: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    pub status: TraceStatus,
    pub segments: Vec<PathSegment>,
    pub missing_links: Vec<String>,
    pub total_loss_db: f64,
}

impl TraceResult {
    fn failure(message: String) -> Self {
        Self {
            success: false,
            error: Some(message),
            status: TraceStatus::Partial,
            segments: Vec::new(),
            missing_links: Vec::new(),
            total_loss_db: 0.0,
        }
    }
}

/// Trace the circuit through `origin`, optionally pinned to a fiber
/// ordinal for splice-level resolution. Never returns an error: any
/// failure is folded into a `{success: false}` result.
pub async fn trace_path(
    store: &dyn EntityStore,
    origin: NodeRef,
    fiber: Option<u32>,
) -> TraceResult {
    record(MetricsEvent::TraceStarted);

    let result = match run(store, origin, fiber).await {
        Ok(result) => result,
        Err(err) => TraceResult::failure(err.to_string()),
    };

    record(MetricsEvent::TraceFinished {
        segments: result.segments.len() as u64,
        missing_links: result.missing_links.len() as u64,
        failed: !result.success,
    });
    result
}

/// Trace outward from one splice record, entering the path on its
/// B-side fiber.
pub async fn trace_splice(store: &dyn EntityStore, splice: SpliceId) -> TraceResult {
    let Some(splice_record) = store.splice(splice).await else {
        return TraceResult::failure(format!("splice {splice} not found"));
    };
    let Some(tray) = store.tray(splice_record.tray).await else {
        return TraceResult::failure(format!(
            "tray {} behind splice {splice} not found",
            splice_record.tray
        ));
    };

    trace_path(
        store,
        NodeRef::Enclosure(tray.enclosure),
        Some(splice_record.fiber_b),
    )
    .await
}

async fn run(
    store: &dyn EntityStore,
    origin: NodeRef,
    fiber: Option<u32>,
) -> Result<TraceResult, Error> {
    let start = resolve_origin(store, origin).await?;

    let mut ctx = TraceContext::new(start, fiber);
    ctx = upstream_walk(store, ctx, start).await;
    ctx.begin_downstream();
    ctx = downstream_walk(store, ctx, start).await;
    Ok(ctx.finish())
}

/// Normalize the requested origin to a walkable node. Trays resolve to
/// their enclosure; container kinds without a position on a circuit are
/// rejected.
async fn resolve_origin(store: &dyn EntityStore, origin: NodeRef) -> Result<NodeRef, Error> {
    match origin {
        NodeRef::Enclosure(_) | NodeRef::FramePort(_) | NodeRef::HeadEnd(_) => Ok(origin),
        NodeRef::Tray(id) => {
            let tray = store
                .tray(id)
                .await
                .ok_or(Error::NotFound { node: origin })?;
            Ok(NodeRef::Enclosure(tray.enclosure))
        }
        NodeRef::Frame(_) | NodeRef::Project(_) => {
            Err(Error::TraceFailure(format!("cannot trace from {origin}")))
        }
    }
}

/// Find the splice a walk passes through inside `enclosure`, given the
/// fiber it arrived on. `matches` decides which side of the splice must
/// equal the current fiber.
async fn splice_hop(
    store: &dyn EntityStore,
    enclosure: EnclosureId,
    fiber: Option<u32>,
    matches: impl Fn(&Splice, u32) -> bool,
) -> Option<SpliceHop> {
    let fiber = fiber?;

    for tray in store.trays_by_enclosure(enclosure).await {
        for splice in store.splices_by_tray(tray.id).await {
            if splice.is_active() && matches(&splice, fiber) {
                return Some(SpliceHop {
                    splice: splice.id,
                    fiber_a: splice.fiber_a,
                    fiber_b: splice.fiber_b,
                    colors_a: live_colors(splice.fiber_a, tray.cable_a_fibers, &splice.colors_a),
                    colors_b: live_colors(splice.fiber_b, tray.cable_b_fibers, &splice.colors_b),
                    loss_db: splice.loss_db,
                });
            }
        }
    }
    None
}

fn live_colors(ordinal: u32, cable_fibers: u32, snapshot: &FiberColors) -> FiberColors {
    color::color_info(ordinal, cable_fibers).map_or_else(
        || snapshot.clone(),
        |info| FiberColors::new(info.tube_color, info.fiber_color),
    )
}

/// Splitter insertion loss applies in distribution points whether or
/// not a splice was found there.
async fn splitter_loss(store: &dyn EntityStore, enclosure: &Enclosure) -> Option<f64> {
    if enclosure.kind != EnclosureKind::DistributionPoint {
        return None;
    }
    store
        .splitters_by_enclosure(enclosure.id)
        .await
        .first()
        .map(|splitter| splitter.ratio.insertion_loss_db())
}

///
/// CanvasEdge
///
/// An edge as the map-rendering collaborator knows it: an opaque id and
/// the two nodes it connects.
///

#[derive(Clone, Debug, Serialize)]
pub struct CanvasEdge {
    pub id: String,
    pub a: NodeRef,
    pub b: NodeRef,
}

/// Pure lookup for visual emphasis: the subset of `edges` whose
/// endpoints are adjacent segments of the traced path, in either
/// orientation.
#[must_use]
pub fn highlight_edges(result: &TraceResult, edges: &[CanvasEdge]) -> Vec<String> {
    let mut adjacent: HashSet<(NodeRef, NodeRef)> = HashSet::new();
    for pair in result.segments.windows(2) {
        if pair[0].node != pair[1].node {
            adjacent.insert((pair[0].node, pair[1].node));
            adjacent.insert((pair[1].node, pair[0].node));
        }
    }

    edges
        .iter()
        .filter(|edge| adjacent.contains(&(edge.a, edge.b)))
        .map(|edge| edge.id.clone())
        .collect()
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;
    use fiberplant_schema::ids::{EnclosureId, FramePortId, HeadEndId};

    fn segment(index: usize, node: NodeRef) -> PathSegment {
        PathSegment {
            index,
            node,
            label: String::new(),
            detail: SegmentDetail::HeadEnd,
            loss_db: 0.0,
        }
    }

    #[test]
    fn highlight_selects_adjacent_edges_only() {
        let head_end = NodeRef::HeadEnd(HeadEndId::new(1));
        let port = NodeRef::FramePort(FramePortId::new(2));
        let enclosure = NodeRef::Enclosure(EnclosureId::new(3));
        let stranger = NodeRef::Enclosure(EnclosureId::new(99));

        let result = TraceResult {
            success: true,
            error: None,
            status: TraceStatus::Complete,
            segments: vec![segment(0, head_end), segment(1, port), segment(2, enclosure)],
            missing_links: Vec::new(),
            total_loss_db: 0.0,
        };

        let edges = vec![
            CanvasEdge {
                id: "e1".into(),
                a: head_end,
                b: port,
            },
            // reversed orientation still matches
            CanvasEdge {
                id: "e2".into(),
                a: enclosure,
                b: port,
            },
            // not adjacent on the path
            CanvasEdge {
                id: "e3".into(),
                a: head_end,
                b: enclosure,
            },
            CanvasEdge {
                id: "e4".into(),
                a: stranger,
                b: port,
            },
        ];

        assert_eq!(highlight_edges(&result, &edges), vec!["e1", "e2"]);
    }

    #[test]
    fn segment_loss_combines_splice_and_splitter() {
        let detail = SegmentDetail::Enclosure {
            enclosure_kind: EnclosureKind::DistributionPoint,
            splice: Some(SpliceHop {
                splice: SpliceId::new(1),
                fiber_a: 1,
                fiber_b: 1,
                colors_a: FiberColors::new("Blue", "Blue"),
                colors_b: FiberColors::new("Blue", "Blue"),
                loss_db: Some(0.12),
            }),
            splitter_loss_db: Some(10.5),
        };
        assert!((detail.loss_db() - 10.62).abs() < 1e-9);
    }
}
