#![allow(dead_code)] // each suite uses a different slice of the fixture

//! A small but fully wired plant shared by the integration suites:
//! head end → ODF port 1 → splice closure → distribution point with a
//! 1:8 splitter → termination point with a connected drop.

use fiberplant_core::store::{EntityStore, MemoryStore, NewSplice};
use fiberplant_schema::prelude::*;

pub struct Network {
    pub store: MemoryStore,
    pub project: ProjectId,
    pub head_end: HeadEndId,
    pub frame: FrameId,
    pub port: FramePortId,
    pub closure: EnclosureId,
    pub distribution_point: EnclosureId,
    pub termination_point: EnclosureId,
    pub nap_splice: SpliceId,
}

pub async fn build() -> Network {
    let mut store = MemoryStore::new();
    let project = store.create_project("east loop", Timestamp::from_unix_secs(1_716_000_000));
    let head_end = store.create_head_end(project, "CO-EAST", 128).unwrap();
    let frame = store.create_frame(head_end, "ODF-1", 8).unwrap();
    let port = store.ports_by_frame(frame).await[0].id;

    let closure = store
        .create_enclosure(
            project,
            "SC-1",
            EnclosureKind::Closure,
            Some(ParentRef::FramePort(port)),
        )
        .unwrap();
    store.link_frame_port(port, closure).unwrap();

    let distribution_point = store
        .create_enclosure(
            project,
            "LCP-1",
            EnclosureKind::DistributionPoint,
            Some(ParentRef::Enclosure(closure)),
        )
        .unwrap();
    store
        .create_splitter(distribution_point, SplitRatio::OneByEight)
        .unwrap();

    let termination_point = store
        .create_enclosure(
            project,
            "NAP-3",
            EnclosureKind::TerminationPoint,
            Some(ParentRef::Enclosure(distribution_point)),
        )
        .unwrap();

    // Feeder (144f) joined to the distribution cable (48f).
    let sc_tray = store.create_tray(closure, 1, 24, 144, 48).unwrap();
    store
        .create_splice(NewSplice {
            tray: sc_tray,
            fiber_a: 5,
            fiber_b: 1,
            kind: SpliceKind::Fusion,
            loss_db: Some(0.08),
            technician: Some("r.vance".into()),
            spliced_at: Timestamp::from_unix_secs(1_716_000_100),
            status: SpliceStatus::Completed,
            otdr: None,
        })
        .unwrap();

    // Distribution (48f) joined to the access cable (24f).
    let lcp_tray = store
        .create_tray(distribution_point, 1, 24, 48, 24)
        .unwrap();
    store
        .create_splice(NewSplice {
            tray: lcp_tray,
            fiber_a: 1,
            fiber_b: 3,
            kind: SpliceKind::Fusion,
            loss_db: Some(0.12),
            technician: Some("r.vance".into()),
            spliced_at: Timestamp::from_unix_secs(1_716_000_200),
            status: SpliceStatus::Completed,
            otdr: None,
        })
        .unwrap();

    // Access (24f) joined to the drop cable (12f).
    let nap_tray = store
        .create_tray(termination_point, 1, 12, 24, 12)
        .unwrap();
    let nap_splice = store
        .create_splice(NewSplice {
            tray: nap_tray,
            fiber_a: 3,
            fiber_b: 2,
            kind: SpliceKind::Mechanical,
            loss_db: Some(0.05),
            technician: Some("m.ortiz".into()),
            spliced_at: Timestamp::from_unix_secs(1_716_000_300),
            status: SpliceStatus::Completed,
            otdr: None,
        })
        .unwrap();

    store
        .create_subscriber_port(termination_point, 1, PortStatus::Unconnected, None)
        .unwrap();
    store
        .create_subscriber_port(
            termination_point,
            2,
            PortStatus::Connected,
            Some(Customer {
                name: Some("A. Harms".into()),
                ..Customer::default()
            }),
        )
        .unwrap();

    Network {
        store,
        project,
        head_end,
        frame,
        port,
        closure,
        distribution_point,
        termination_point,
        nap_splice,
    }
}
