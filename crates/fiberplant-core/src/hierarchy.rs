//! Hierarchy operations over the store: link validation and the
//! pre-delete impact report.

use crate::{
    error::Error,
    obs::sink::{MetricsEvent, record},
    store::EntityStore,
};
use fiberplant_schema::{
    entity::EnclosureKind,
    node::{EntityTag, NodeRef, ParentRef},
    rules::{ParentSlot, can_attach},
};
use serde::Serialize;
use std::collections::{BTreeMap, HashSet, VecDeque};

/// Gate every parent/child link against the type-rule table before it is
/// persisted. Collaborating stores call this from their write paths.
pub fn validate_attach(child: EnclosureKind, parent: ParentSlot) -> Result<(), Error> {
    if can_attach(child, parent) {
        Ok(())
    } else {
        record(MetricsEvent::HierarchyRejected);
        Err(Error::InvalidHierarchy { child, parent })
    }
}

///
/// DeleteImpact
///
/// What a cascading delete would take with it: descendant counts per
/// entity kind, excluding the node itself. Shown to the operator before
/// the cascade executes.
///

#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize)]
pub struct DeleteImpact {
    pub total: u64,
    pub by_kind: BTreeMap<EntityTag, u64>,
}

impl DeleteImpact {
    fn bump(&mut self, tag: EntityTag, count: u64) {
        if count > 0 {
            *self.by_kind.entry(tag).or_default() += count;
            self.total += count;
        }
    }
}

/// Count every descendant of `node`. Breadth-first over the store's
/// list-by-parent surface; a visited set bounds the walk even if the
/// stored parent chain is cyclic.
pub async fn delete_impact(store: &dyn EntityStore, node: NodeRef) -> DeleteImpact {
    let mut impact = DeleteImpact::default();
    let mut seen: HashSet<NodeRef> = HashSet::new();
    let mut queue: VecDeque<NodeRef> = VecDeque::new();

    seen.insert(node);
    queue.push_back(node);

    while let Some(current) = queue.pop_front() {
        match current {
            NodeRef::Project(id) => {
                for head_end in store.head_ends_by_project(id).await {
                    enqueue(&mut impact, &mut seen, &mut queue, NodeRef::HeadEnd(head_end.id));
                }
                for enclosure in store.enclosures_by_project(id).await {
                    enqueue(&mut impact, &mut seen, &mut queue, NodeRef::Enclosure(enclosure.id));
                }
            }
            NodeRef::HeadEnd(id) => {
                for frame in store.frames_by_head_end(id).await {
                    enqueue(&mut impact, &mut seen, &mut queue, NodeRef::Frame(frame.id));
                }
                for enclosure in store.enclosures_by_parent(ParentRef::HeadEnd(id)).await {
                    enqueue(&mut impact, &mut seen, &mut queue, NodeRef::Enclosure(enclosure.id));
                }
            }
            NodeRef::Frame(id) => {
                for port in store.ports_by_frame(id).await {
                    enqueue(&mut impact, &mut seen, &mut queue, NodeRef::FramePort(port.id));
                }
            }
            NodeRef::FramePort(id) => {
                for enclosure in store.enclosures_by_parent(ParentRef::FramePort(id)).await {
                    enqueue(&mut impact, &mut seen, &mut queue, NodeRef::Enclosure(enclosure.id));
                }
            }
            NodeRef::Enclosure(id) => {
                for tray in store.trays_by_enclosure(id).await {
                    enqueue(&mut impact, &mut seen, &mut queue, NodeRef::Tray(tray.id));
                }
                for enclosure in store.enclosures_by_parent(ParentRef::Enclosure(id)).await {
                    enqueue(&mut impact, &mut seen, &mut queue, NodeRef::Enclosure(enclosure.id));
                }
                impact.bump(
                    EntityTag::Splitter,
                    store.splitters_by_enclosure(id).await.len() as u64,
                );
                impact.bump(
                    EntityTag::SubscriberPort,
                    store.subscriber_ports_by_enclosure(id).await.len() as u64,
                );
            }
            NodeRef::Tray(id) => {
                impact.bump(EntityTag::Splice, store.splices_by_tray(id).await.len() as u64);
            }
        }
    }

    impact
}

fn enqueue(
    impact: &mut DeleteImpact,
    seen: &mut HashSet<NodeRef>,
    queue: &mut VecDeque<NodeRef>,
    node: NodeRef,
) {
    if seen.insert(node) {
        impact.bump(node.tag(), 1);
        queue.push_back(node);
    }
}

///
/// TESTS
///
