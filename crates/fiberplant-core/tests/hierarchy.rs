mod common;

use fiberplant_core::{
    hierarchy::delete_impact,
    store::{EntityStore, MemoryStore, NewSplice},
};
use fiberplant_schema::prelude::*;

#[tokio::test]
async fn impact_counts_children_trays_and_splices() {
    let mut store = MemoryStore::new();
    let project = store.create_project("audit", Timestamp::from_unix_secs(0));
    let parent = store
        .create_enclosure(project, "SC-1", EnclosureKind::Closure, None)
        .unwrap();
    for name in ["SC-2", "SC-3"] {
        store
            .create_enclosure(
                project,
                name,
                EnclosureKind::Closure,
                Some(ParentRef::Enclosure(parent)),
            )
            .unwrap();
    }
    let tray = store.create_tray(parent, 1, 24, 48, 48).unwrap();
    for fiber in 1..=3 {
        store
            .create_splice(NewSplice {
                tray,
                fiber_a: fiber,
                fiber_b: fiber,
                kind: SpliceKind::Fusion,
                loss_db: None,
                technician: None,
                spliced_at: Timestamp::from_unix_secs(0),
                status: SpliceStatus::Pending,
                otdr: None,
            })
            .unwrap();
    }

    let impact = delete_impact(&store, NodeRef::Enclosure(parent)).await;

    assert!(impact.total >= 6);
    assert_eq!(impact.by_kind.get(&EntityTag::Enclosure), Some(&2));
    assert_eq!(impact.by_kind.get(&EntityTag::Tray), Some(&1));
    assert_eq!(impact.by_kind.get(&EntityTag::Splice), Some(&3));
}

#[tokio::test]
async fn impact_agrees_with_the_cascade_it_predicts() {
    let mut net = common::build().await;

    let impact = delete_impact(&net.store, NodeRef::Enclosure(net.closure)).await;
    // SC-1's subtree: LCP-1 (splitter, tray, splice), NAP-3 (tray,
    // splice, two drops), plus SC-1's own tray and splice.
    assert_eq!(impact.by_kind.get(&EntityTag::Enclosure), Some(&2));
    assert_eq!(impact.by_kind.get(&EntityTag::Tray), Some(&3));
    assert_eq!(impact.by_kind.get(&EntityTag::Splice), Some(&3));
    assert_eq!(impact.by_kind.get(&EntityTag::Splitter), Some(&1));
    assert_eq!(impact.by_kind.get(&EntityTag::SubscriberPort), Some(&2));

    let removed = net.store.cascade_delete(NodeRef::Enclosure(net.closure));
    assert_eq!(removed, impact.total + 1, "cascade must remove the impact set plus the node");
    assert!(net.store.enclosure(net.termination_point).await.is_none());
    assert!(net.store.splice(net.nap_splice).await.is_none());
}

#[tokio::test]
async fn head_end_impact_spans_frames_and_ports() {
    let net = common::build().await;

    let impact = delete_impact(&net.store, NodeRef::HeadEnd(net.head_end)).await;

    assert_eq!(impact.by_kind.get(&EntityTag::Frame), Some(&1));
    assert_eq!(impact.by_kind.get(&EntityTag::FramePort), Some(&8));
    // The whole outside plant hangs off port 1.
    assert_eq!(impact.by_kind.get(&EntityTag::Enclosure), Some(&3));
}

#[tokio::test]
async fn project_impact_includes_orphan_enclosures() {
    let mut net = common::build().await;
    net.store
        .create_enclosure(net.project, "undocumented", EnclosureKind::Handhole, None)
        .unwrap();

    let impact = delete_impact(&net.store, NodeRef::Project(net.project)).await;

    assert_eq!(impact.by_kind.get(&EntityTag::HeadEnd), Some(&1));
    assert_eq!(impact.by_kind.get(&EntityTag::Enclosure), Some(&4));
}

#[tokio::test]
async fn frame_reads_are_store_misses_after_cascade() {
    let mut net = common::build().await;

    net.store.cascade_delete(NodeRef::HeadEnd(net.head_end));

    assert!(net.store.head_end(net.head_end).await.is_none());
    assert!(net.store.frame(net.frame).await.is_none());
    assert!(net.store.frame_port(net.port).await.is_none());
    // Project survives; only the head end's subtree is gone.
    assert!(net.store.project(net.project).await.is_some());
}
