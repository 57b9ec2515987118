//! Downstream phase: from the origin toward the subscriber drop.
//!
//! Descends the *first* eligible child at each level: a best-effort
//! representative path, not an exhaustive enumeration of every
//! subscriber behind a distribution point.

use crate::{
    store::EntityStore,
    trace::{SegmentDetail, context::TraceContext, splice_hop, splitter_loss},
};
use fiberplant_schema::{
    entity::{Enclosure, EnclosureKind},
    ids::{EnclosureId, HeadEndId},
    node::{NodeRef, ParentRef},
};

/// Descend child links until a connected subscriber drop, a leaf, a
/// dead reference, or a cycle. The origin's own segment was already
/// recorded by the upstream walk; this phase only moves away from it.
pub(crate) async fn downstream_walk(
    store: &dyn EntityStore,
    mut ctx: TraceContext,
    origin: NodeRef,
) -> TraceContext {
    let mut cursor = match origin {
        NodeRef::HeadEnd(id) => first_patched_enclosure(store, &mut ctx, id).await,
        NodeRef::FramePort(id) => match store.frame_port(id).await {
            Some(port) => port.enclosure,
            None => None,
        },
        NodeRef::Enclosure(id) => match store.enclosure(id).await {
            Some(enclosure) if enclosure.kind == EnclosureKind::TerminationPoint => {
                push_drop(store, &mut ctx, &enclosure).await;
                None
            }
            Some(_) => first_child(store, id).await,
            // Already reported by the upstream walk.
            None => None,
        },
        _ => None,
    };

    while let Some(id) = cursor.take() {
        let node = NodeRef::Enclosure(id);
        if !ctx.visit(node) {
            ctx.missing_link(format!(
                "downstream walk revisited {node}; the child chain is cyclic"
            ));
            break;
        }
        let Some(enclosure) = store.enclosure(id).await else {
            ctx.missing_link(format!("enclosure {id} is referenced but missing"));
            break;
        };

        // Moving away from the head end, the current fiber enters on
        // the A side and leaves on the B side.
        let hop = splice_hop(store, enclosure.id, ctx.fiber(), |splice, fiber| {
            splice.fiber_a == fiber
        })
        .await;
        if let Some(hop) = &hop {
            ctx.set_fiber(hop.fiber_b);
        }

        let splitter_loss_db = splitter_loss(store, &enclosure).await;
        ctx.push_downstream(
            node,
            enclosure.name.clone(),
            SegmentDetail::Enclosure {
                enclosure_kind: enclosure.kind,
                splice: hop,
                splitter_loss_db,
            },
        );

        if enclosure.kind == EnclosureKind::TerminationPoint {
            push_drop(store, &mut ctx, &enclosure).await;
            break;
        }

        cursor = first_child(store, id).await;
    }

    ctx
}

/// Head-end origin: enter the plant through the first frame's first
/// connected, patched port. No frame or no such port simply means no
/// downstream children.
async fn first_patched_enclosure(
    store: &dyn EntityStore,
    ctx: &mut TraceContext,
    head_end: HeadEndId,
) -> Option<EnclosureId> {
    let frame = store.frames_by_head_end(head_end).await.into_iter().next()?;
    let port = store
        .ports_by_frame(frame.id)
        .await
        .into_iter()
        .find(|port| port.status.is_connected() && port.enclosure.is_some())?;

    ctx.visit(NodeRef::FramePort(port.id));
    ctx.push_downstream(
        NodeRef::FramePort(port.id),
        format!("{} port {}", frame.name, port.number),
        SegmentDetail::FramePort {
            number: port.number,
        },
    );
    port.enclosure
}

async fn first_child(store: &dyn EntityStore, id: EnclosureId) -> Option<EnclosureId> {
    store
        .enclosures_by_parent(ParentRef::Enclosure(id))
        .await
        .first()
        .map(|child| child.id)
}

/// Terminal state: the termination point's first connected drop.
async fn push_drop(store: &dyn EntityStore, ctx: &mut TraceContext, enclosure: &Enclosure) {
    let Some(port) = store
        .subscriber_ports_by_enclosure(enclosure.id)
        .await
        .into_iter()
        .find(|port| port.status.is_connected())
    else {
        return;
    };

    let customer = port.customer.as_ref().and_then(|c| c.name.clone());
    ctx.push_downstream(
        NodeRef::Enclosure(enclosure.id),
        format!("{} drop {}", enclosure.name, port.number),
        SegmentDetail::SubscriberDrop {
            number: port.number,
            customer,
        },
    );
}
