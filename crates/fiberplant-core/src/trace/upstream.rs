//! Upstream phase: from the origin toward the head-end terminal.

use crate::{
    store::EntityStore,
    trace::{SegmentDetail, context::TraceContext, splice_hop, splitter_loss},
};
use fiberplant_schema::node::NodeRef;

/// Follow parent references until the head end, a dead end, or a cycle.
/// Dead ends and cycles become missing-link entries; the walk itself
/// never fails.
pub(crate) async fn upstream_walk(
    store: &dyn EntityStore,
    mut ctx: TraceContext,
    origin: NodeRef,
) -> TraceContext {
    let mut cursor = origin;

    loop {
        if !ctx.visit(cursor) {
            ctx.missing_link(format!(
                "upstream walk revisited {cursor}; the parent chain is cyclic"
            ));
            break;
        }

        match cursor {
            NodeRef::HeadEnd(id) => {
                match store.head_end(id).await {
                    Some(head_end) => {
                        ctx.push_upstream(cursor, head_end.name, SegmentDetail::HeadEnd);
                    }
                    None => ctx.missing_link(format!("head-end {id} is referenced but missing")),
                }
                break;
            }
            NodeRef::FramePort(id) => {
                let Some(port) = store.frame_port(id).await else {
                    ctx.missing_link(format!("frame port {id} is referenced but missing"));
                    break;
                };
                let Some(frame) = store.frame(port.frame).await else {
                    ctx.missing_link(format!(
                        "frame {} behind port {id} is missing",
                        port.frame
                    ));
                    break;
                };

                ctx.push_upstream(
                    cursor,
                    format!("{} port {}", frame.name, port.number),
                    SegmentDetail::FramePort {
                        number: port.number,
                    },
                );
                cursor = NodeRef::HeadEnd(frame.head_end);
            }
            NodeRef::Enclosure(id) => {
                let Some(enclosure) = store.enclosure(id).await else {
                    ctx.missing_link(format!("enclosure {id} is referenced but missing"));
                    break;
                };

                // The splice feeding this enclosure joins our current
                // fiber on its B side; continue toward the head end on
                // the A side.
                let hop = splice_hop(store, enclosure.id, ctx.fiber(), |splice, fiber| {
                    splice.fiber_b == fiber
                })
                .await;
                if let Some(hop) = &hop {
                    ctx.set_fiber(hop.fiber_a);
                }

                let splitter_loss_db = splitter_loss(store, &enclosure).await;
                ctx.push_upstream(
                    cursor,
                    enclosure.name.clone(),
                    SegmentDetail::Enclosure {
                        enclosure_kind: enclosure.kind,
                        splice: hop,
                        splitter_loss_db,
                    },
                );

                match enclosure.parent {
                    Some(parent) => cursor = parent.into(),
                    None => {
                        ctx.missing_link(format!(
                            "enclosure '{}' declares no upstream parent",
                            enclosure.name
                        ));
                        break;
                    }
                }
            }
            other => {
                ctx.missing_link(format!("cannot walk upstream from {other}"));
                break;
            }
        }
    }

    ctx
}
