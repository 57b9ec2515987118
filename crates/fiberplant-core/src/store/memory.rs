//! In-memory single-operator store.
//!
//! Writers go through the `create_*` methods, which are the enforcement
//! point for the hierarchy type rules and the splice invariants: a
//! record that violates them never reaches the tables. Reads implement
//! [`EntityStore`] like any external backend would.

use crate::{
    color,
    error::Error,
    hierarchy::validate_attach,
    obs::sink::{MetricsEvent, record},
    store::EntityStore,
};
use async_trait::async_trait;
use fiberplant_schema::{
    entity::{
        Customer, DistributionFrame, Enclosure, EnclosureKind, FiberColors, FramePort,
        HeadEndTerminal, OtdrTrace, Project, ProjectStatus, Splice, SpliceKind, SpliceStatus,
        Splitter, SplitRatio, SubscriberPort, Tray,
    },
    ids::{
        EnclosureId, FrameId, FramePortId, HeadEndId, ProjectId, SpliceId, SplitterId,
        SubscriberPortId, TrayId,
    },
    node::{NodeRef, ParentRef},
    rules::ParentSlot,
    types::{PortStatus, Timestamp},
};
use std::collections::{BTreeMap, HashSet};

///
/// NewSplice
///
/// Operator input for a splice record. The frozen color snapshots are
/// not part of the input; the store derives them once at creation.
///

#[derive(Clone, Debug)]
pub struct NewSplice {
    pub tray: TrayId,
    pub fiber_a: u32,
    pub fiber_b: u32,
    pub kind: SpliceKind,
    pub loss_db: Option<f64>,
    pub technician: Option<String>,
    pub spliced_at: Timestamp,
    pub status: SpliceStatus,
    pub otdr: Option<OtdrTrace>,
}

///
/// MemoryStore
///

#[derive(Debug, Default)]
pub struct MemoryStore {
    next_id: u64,
    projects: BTreeMap<u64, Project>,
    head_ends: BTreeMap<u64, HeadEndTerminal>,
    frames: BTreeMap<u64, DistributionFrame>,
    frame_ports: BTreeMap<u64, FramePort>,
    enclosures: BTreeMap<u64, Enclosure>,
    trays: BTreeMap<u64, Tray>,
    splices: BTreeMap<u64, Splice>,
    splitters: BTreeMap<u64, Splitter>,
    subscriber_ports: BTreeMap<u64, SubscriberPort>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn assign_id(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }

    pub fn create_project(&mut self, name: impl Into<String>, created_at: Timestamp) -> ProjectId {
        let id = ProjectId::new(self.assign_id());
        self.projects.insert(
            id.get(),
            Project {
                id,
                name: name.into(),
                location: None,
                description: None,
                created_at,
                status: ProjectStatus::Active,
            },
        );
        id
    }

    pub fn create_head_end(
        &mut self,
        project: ProjectId,
        name: impl Into<String>,
        total_ports: u32,
    ) -> Result<HeadEndId, Error> {
        if !self.projects.contains_key(&project.get()) {
            return Err(Error::NotFound {
                node: NodeRef::Project(project),
            });
        }

        let id = HeadEndId::new(self.assign_id());
        self.head_ends.insert(
            id.get(),
            HeadEndTerminal {
                id,
                project,
                name: name.into(),
                total_ports,
                gps: None,
            },
        );
        Ok(id)
    }

    /// Create a frame together with its fixed port set (1..=`port_count`,
    /// all unconnected).
    pub fn create_frame(
        &mut self,
        head_end: HeadEndId,
        name: impl Into<String>,
        port_count: u32,
    ) -> Result<FrameId, Error> {
        if !self.head_ends.contains_key(&head_end.get()) {
            return Err(Error::NotFound {
                node: NodeRef::HeadEnd(head_end),
            });
        }

        let id = FrameId::new(self.assign_id());
        self.frames.insert(
            id.get(),
            DistributionFrame {
                id,
                head_end,
                name: name.into(),
                port_count,
            },
        );

        for number in 1..=port_count {
            let port_id = FramePortId::new(self.assign_id());
            self.frame_ports.insert(
                port_id.get(),
                FramePort {
                    id: port_id,
                    frame: id,
                    number,
                    status: PortStatus::Unconnected,
                    enclosure: None,
                },
            );
        }

        Ok(id)
    }

    /// Patch a frame port to the enclosure it feeds.
    pub fn link_frame_port(
        &mut self,
        port: FramePortId,
        enclosure: EnclosureId,
    ) -> Result<(), Error> {
        if !self.enclosures.contains_key(&enclosure.get()) {
            return Err(Error::NotFound {
                node: NodeRef::Enclosure(enclosure),
            });
        }
        let Some(record) = self.frame_ports.get_mut(&port.get()) else {
            return Err(Error::NotFound {
                node: NodeRef::FramePort(port),
            });
        };

        record.status = PortStatus::Connected;
        record.enclosure = Some(enclosure);
        Ok(())
    }

    pub fn create_enclosure(
        &mut self,
        project: ProjectId,
        name: impl Into<String>,
        kind: EnclosureKind,
        parent: Option<ParentRef>,
    ) -> Result<EnclosureId, Error> {
        if let Some(parent) = parent {
            let slot = self.resolve_parent_slot(parent)?;
            validate_attach(kind, slot)?;
        }

        let id = EnclosureId::new(self.assign_id());
        self.enclosures.insert(
            id.get(),
            Enclosure {
                id,
                project,
                name: name.into(),
                kind,
                parent,
                gps: None,
                address: None,
            },
        );
        Ok(id)
    }

    /// Rewire an enclosure's parent without rule validation. Bulk-import
    /// paths use this to load legacy data verbatim; anything written this
    /// way is only as consistent as its source.
    pub fn set_parent_unchecked(&mut self, enclosure: EnclosureId, parent: Option<ParentRef>) {
        if let Some(record) = self.enclosures.get_mut(&enclosure.get()) {
            record.parent = parent;
        }
    }

    pub fn create_tray(
        &mut self,
        enclosure: EnclosureId,
        number: u32,
        capacity: u32,
        cable_a_fibers: u32,
        cable_b_fibers: u32,
    ) -> Result<TrayId, Error> {
        if !self.enclosures.contains_key(&enclosure.get()) {
            return Err(Error::NotFound {
                node: NodeRef::Enclosure(enclosure),
            });
        }

        let id = TrayId::new(self.assign_id());
        self.trays.insert(
            id.get(),
            Tray {
                id,
                enclosure,
                number,
                capacity,
                cable_a_fibers,
                cable_b_fibers,
                notes: None,
            },
        );
        Ok(id)
    }

    pub fn create_splice(&mut self, new: NewSplice) -> Result<SpliceId, Error> {
        let Some(tray) = self.trays.get(&new.tray.get()).cloned() else {
            return Err(Error::NotFound {
                node: NodeRef::Tray(new.tray),
            });
        };

        for existing in self.splices.values().filter(|s| s.tray == new.tray) {
            if !existing.is_active() {
                continue;
            }
            let detail = if existing.fiber_a == new.fiber_a && existing.fiber_b == new.fiber_b {
                Some(format!(
                    "fibers {}-{} are already spliced",
                    new.fiber_a, new.fiber_b
                ))
            } else if existing.fiber_a == new.fiber_a {
                Some(format!("fiber {} is already spliced on the A side", new.fiber_a))
            } else if existing.fiber_b == new.fiber_b {
                Some(format!("fiber {} is already spliced on the B side", new.fiber_b))
            } else {
                None
            };

            if let Some(detail) = detail {
                record(MetricsEvent::SpliceConflict);
                return Err(Error::SpliceConflict {
                    tray: new.tray,
                    detail,
                });
            }
        }

        let id = SpliceId::new(self.assign_id());
        self.splices.insert(
            id.get(),
            Splice {
                id,
                tray: new.tray,
                fiber_a: new.fiber_a,
                fiber_b: new.fiber_b,
                colors_a: snapshot_colors(new.fiber_a, tray.cable_a_fibers),
                colors_b: snapshot_colors(new.fiber_b, tray.cable_b_fibers),
                kind: new.kind,
                loss_db: new.loss_db,
                technician: new.technician,
                spliced_at: new.spliced_at,
                status: new.status,
                otdr: new.otdr,
            },
        );
        Ok(id)
    }

    pub fn create_splitter(
        &mut self,
        enclosure: EnclosureId,
        ratio: SplitRatio,
    ) -> Result<SplitterId, Error> {
        if !self.enclosures.contains_key(&enclosure.get()) {
            return Err(Error::NotFound {
                node: NodeRef::Enclosure(enclosure),
            });
        }

        let id = SplitterId::new(self.assign_id());
        self.splitters.insert(id.get(), Splitter { id, enclosure, ratio });
        Ok(id)
    }

    pub fn create_subscriber_port(
        &mut self,
        enclosure: EnclosureId,
        number: u32,
        status: PortStatus,
        customer: Option<Customer>,
    ) -> Result<SubscriberPortId, Error> {
        if !self.enclosures.contains_key(&enclosure.get()) {
            return Err(Error::NotFound {
                node: NodeRef::Enclosure(enclosure),
            });
        }

        let id = SubscriberPortId::new(self.assign_id());
        self.subscriber_ports.insert(
            id.get(),
            SubscriberPort {
                id,
                enclosure,
                number,
                status,
                customer,
            },
        );
        Ok(id)
    }

    /// Delete `node` and everything below it. Returns the number of
    /// records removed. The operator is expected to have been shown a
    /// [`crate::hierarchy::delete_impact`] report first.
    pub fn cascade_delete(&mut self, node: NodeRef) -> u64 {
        let mut removed = 0;
        let mut seen: HashSet<NodeRef> = HashSet::new();
        let mut queue = vec![node];

        while let Some(current) = queue.pop() {
            if !seen.insert(current) {
                continue;
            }

            match current {
                NodeRef::Project(id) => {
                    queue.extend(
                        self.head_ends
                            .values()
                            .filter(|h| h.project == id)
                            .map(|h| NodeRef::HeadEnd(h.id)),
                    );
                    // Orphan enclosures scoped to the project but not
                    // reachable through a head end.
                    queue.extend(
                        self.enclosures
                            .values()
                            .filter(|e| e.project == id)
                            .map(|e| NodeRef::Enclosure(e.id)),
                    );
                    removed += u64::from(self.projects.remove(&id.get()).is_some());
                }
                NodeRef::HeadEnd(id) => {
                    queue.extend(
                        self.frames
                            .values()
                            .filter(|f| f.head_end == id)
                            .map(|f| NodeRef::Frame(f.id)),
                    );
                    queue.extend(self.child_enclosures(ParentRef::HeadEnd(id)));
                    removed += u64::from(self.head_ends.remove(&id.get()).is_some());
                }
                NodeRef::Frame(id) => {
                    queue.extend(
                        self.frame_ports
                            .values()
                            .filter(|p| p.frame == id)
                            .map(|p| NodeRef::FramePort(p.id)),
                    );
                    removed += u64::from(self.frames.remove(&id.get()).is_some());
                }
                NodeRef::FramePort(id) => {
                    queue.extend(self.child_enclosures(ParentRef::FramePort(id)));
                    removed += u64::from(self.frame_ports.remove(&id.get()).is_some());
                }
                NodeRef::Enclosure(id) => {
                    queue.extend(
                        self.trays
                            .values()
                            .filter(|t| t.enclosure == id)
                            .map(|t| NodeRef::Tray(t.id)),
                    );
                    queue.extend(self.child_enclosures(ParentRef::Enclosure(id)));

                    let splitters: Vec<u64> = self
                        .splitters
                        .values()
                        .filter(|s| s.enclosure == id)
                        .map(|s| s.id.get())
                        .collect();
                    for raw in splitters {
                        self.splitters.remove(&raw);
                        removed += 1;
                    }

                    let ports: Vec<u64> = self
                        .subscriber_ports
                        .values()
                        .filter(|p| p.enclosure == id)
                        .map(|p| p.id.get())
                        .collect();
                    for raw in ports {
                        self.subscriber_ports.remove(&raw);
                        removed += 1;
                    }

                    removed += u64::from(self.enclosures.remove(&id.get()).is_some());
                }
                NodeRef::Tray(id) => {
                    let splices: Vec<u64> = self
                        .splices
                        .values()
                        .filter(|s| s.tray == id)
                        .map(|s| s.id.get())
                        .collect();
                    for raw in splices {
                        self.splices.remove(&raw);
                        removed += 1;
                    }
                    removed += u64::from(self.trays.remove(&id.get()).is_some());
                }
            }
        }

        removed
    }

    fn child_enclosures(&self, parent: ParentRef) -> Vec<NodeRef> {
        self.enclosures
            .values()
            .filter(|e| e.parent == Some(parent))
            .map(|e| NodeRef::Enclosure(e.id))
            .collect()
    }

    fn resolve_parent_slot(&self, parent: ParentRef) -> Result<ParentSlot, Error> {
        match parent {
            ParentRef::HeadEnd(id) => {
                if self.head_ends.contains_key(&id.get()) {
                    Ok(ParentSlot::HeadEnd)
                } else {
                    Err(Error::NotFound {
                        node: NodeRef::HeadEnd(id),
                    })
                }
            }
            ParentRef::FramePort(id) => {
                if self.frame_ports.contains_key(&id.get()) {
                    Ok(ParentSlot::FramePort)
                } else {
                    Err(Error::NotFound {
                        node: NodeRef::FramePort(id),
                    })
                }
            }
            ParentRef::Enclosure(id) => self
                .enclosures
                .get(&id.get())
                .map(|e| ParentSlot::Enclosure(e.kind))
                .ok_or(Error::NotFound {
                    node: NodeRef::Enclosure(id),
                }),
        }
    }
}

/// Freeze a fiber's color names at splice-creation time. Ordinals that
/// fall outside the recorded cable count snapshot as `Unknown`: the
/// record is kept readable rather than rejected, and the matrix view
/// will skip the cell.
fn snapshot_colors(ordinal: u32, cable_fibers: u32) -> FiberColors {
    color::color_info(ordinal, cable_fibers).map_or_else(
        || FiberColors::new("Unknown", "Unknown"),
        |info| FiberColors::new(info.tube_color, info.fiber_color),
    )
}

#[async_trait]
impl EntityStore for MemoryStore {
    async fn project(&self, id: ProjectId) -> Option<Project> {
        self.projects.get(&id.get()).cloned()
    }

    async fn head_end(&self, id: HeadEndId) -> Option<HeadEndTerminal> {
        self.head_ends.get(&id.get()).cloned()
    }

    async fn frame(&self, id: FrameId) -> Option<DistributionFrame> {
        self.frames.get(&id.get()).cloned()
    }

    async fn frame_port(&self, id: FramePortId) -> Option<FramePort> {
        self.frame_ports.get(&id.get()).cloned()
    }

    async fn enclosure(&self, id: EnclosureId) -> Option<Enclosure> {
        self.enclosures.get(&id.get()).cloned()
    }

    async fn tray(&self, id: TrayId) -> Option<Tray> {
        self.trays.get(&id.get()).cloned()
    }

    async fn splice(&self, id: SpliceId) -> Option<Splice> {
        self.splices.get(&id.get()).cloned()
    }

    async fn splitter(&self, id: SplitterId) -> Option<Splitter> {
        self.splitters.get(&id.get()).cloned()
    }

    async fn subscriber_port(&self, id: SubscriberPortId) -> Option<SubscriberPort> {
        self.subscriber_ports.get(&id.get()).cloned()
    }

    async fn head_ends_by_project(&self, project: ProjectId) -> Vec<HeadEndTerminal> {
        self.head_ends
            .values()
            .filter(|h| h.project == project)
            .cloned()
            .collect()
    }

    async fn frames_by_head_end(&self, head_end: HeadEndId) -> Vec<DistributionFrame> {
        self.frames
            .values()
            .filter(|f| f.head_end == head_end)
            .cloned()
            .collect()
    }

    async fn ports_by_frame(&self, frame: FrameId) -> Vec<FramePort> {
        let mut ports: Vec<FramePort> = self
            .frame_ports
            .values()
            .filter(|p| p.frame == frame)
            .cloned()
            .collect();
        ports.sort_by_key(|p| p.number);
        ports
    }

    async fn enclosures_by_project(&self, project: ProjectId) -> Vec<Enclosure> {
        self.enclosures
            .values()
            .filter(|e| e.project == project)
            .cloned()
            .collect()
    }

    async fn enclosures_by_parent(&self, parent: ParentRef) -> Vec<Enclosure> {
        self.enclosures
            .values()
            .filter(|e| e.parent == Some(parent))
            .cloned()
            .collect()
    }

    async fn trays_by_enclosure(&self, enclosure: EnclosureId) -> Vec<Tray> {
        let mut trays: Vec<Tray> = self
            .trays
            .values()
            .filter(|t| t.enclosure == enclosure)
            .cloned()
            .collect();
        trays.sort_by_key(|t| t.number);
        trays
    }

    async fn splices_by_tray(&self, tray: TrayId) -> Vec<Splice> {
        self.splices
            .values()
            .filter(|s| s.tray == tray)
            .cloned()
            .collect()
    }

    async fn splitters_by_enclosure(&self, enclosure: EnclosureId) -> Vec<Splitter> {
        self.splitters
            .values()
            .filter(|s| s.enclosure == enclosure)
            .cloned()
            .collect()
    }

    async fn subscriber_ports_by_enclosure(&self, enclosure: EnclosureId) -> Vec<SubscriberPort> {
        let mut ports: Vec<SubscriberPort> = self
            .subscriber_ports
            .values()
            .filter(|p| p.enclosure == enclosure)
            .cloned()
            .collect();
        ports.sort_by_key(|p| p.number);
        ports
    }
}

///
/// TESTS
///
