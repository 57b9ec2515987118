//! The entity-store boundary.
//!
//! The engine never owns persistence. It reads through [`EntityStore`],
//! an async trait the embedding application implements over whatever
//! key-indexed backend it has; reads suspend the calling task, misses
//! return `None` or an empty list and never an error. [`MemoryStore`] is
//! the bundled single-operator implementation used offline and in tests.

mod memory;

pub use memory::{MemoryStore, NewSplice};

use async_trait::async_trait;
use fiberplant_schema::{
    entity::{
        DistributionFrame, Enclosure, FramePort, HeadEndTerminal, Project, Splice, Splitter,
        SubscriberPort, Tray,
    },
    ids::{
        EnclosureId, FrameId, FramePortId, HeadEndId, ProjectId, SpliceId, SplitterId,
        SubscriberPortId, TrayId,
    },
    node::ParentRef,
};

///
/// EntityStore
///
/// Get-by-id and list-by-parent for every entity kind. List results are
/// deterministically ordered (ports and trays by ordinal, everything
/// else by id) so walks and reports are reproducible.
///

#[async_trait]
pub trait EntityStore: Send + Sync {
    async fn project(&self, id: ProjectId) -> Option<Project>;
    async fn head_end(&self, id: HeadEndId) -> Option<HeadEndTerminal>;
    async fn frame(&self, id: FrameId) -> Option<DistributionFrame>;
    async fn frame_port(&self, id: FramePortId) -> Option<FramePort>;
    async fn enclosure(&self, id: EnclosureId) -> Option<Enclosure>;
    async fn tray(&self, id: TrayId) -> Option<Tray>;
    async fn splice(&self, id: SpliceId) -> Option<Splice>;
    async fn splitter(&self, id: SplitterId) -> Option<Splitter>;
    async fn subscriber_port(&self, id: SubscriberPortId) -> Option<SubscriberPort>;

    async fn head_ends_by_project(&self, project: ProjectId) -> Vec<HeadEndTerminal>;
    async fn frames_by_head_end(&self, head_end: HeadEndId) -> Vec<DistributionFrame>;
    async fn ports_by_frame(&self, frame: FrameId) -> Vec<FramePort>;
    async fn enclosures_by_project(&self, project: ProjectId) -> Vec<Enclosure>;
    async fn enclosures_by_parent(&self, parent: ParentRef) -> Vec<Enclosure>;
    async fn trays_by_enclosure(&self, enclosure: EnclosureId) -> Vec<Tray>;
    async fn splices_by_tray(&self, tray: TrayId) -> Vec<Splice>;
    async fn splitters_by_enclosure(&self, enclosure: EnclosureId) -> Vec<Splitter>;
    async fn subscriber_ports_by_enclosure(&self, enclosure: EnclosureId) -> Vec<SubscriberPort>;
}
