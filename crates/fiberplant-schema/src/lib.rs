//! Domain vocabulary for outside-plant fiber network documentation:
//! typed entity ids, the entity structs themselves, tagged node
//! references, and the static hierarchy type-rule table.
//!
//! This crate holds no behaviour beyond the rule table and small
//! accessors; the engine (color coding, tracing, compliance, budgets)
//! lives in `fiberplant-core`.

pub mod entity;
pub mod ids;
pub mod node;
pub mod rules;
pub mod types;

///
/// Prelude
///
/// Prelude contains only domain vocabulary.
/// No stores, tracers, or calculators are re-exported here.
///

pub mod prelude {
    pub use crate::{
        entity::{
            Customer, DistributionFrame, Enclosure, EnclosureKind, FiberColors, FramePort,
            HeadEndTerminal, OtdrEvent, OtdrEventKind, OtdrTrace, Project, ProjectStatus, Splice,
            SpliceKind, SpliceStatus, Splitter, SplitRatio, SubscriberPort, Tray,
        },
        ids::{
            EnclosureId, FrameId, FramePortId, HeadEndId, ProjectId, SpliceId, SplitterId,
            SubscriberPortId, TrayId,
        },
        node::{EntityTag, NodeRef, ParentRef},
        rules::{ParentSlot, allowed_children, can_attach},
        types::{GpsPoint, PortStatus, Timestamp},
    };
}
