use crate::{
    ids::{EnclosureId, ProjectId},
    node::ParentRef,
    types::GpsPoint,
};
use derive_more::Display;
use serde::{Deserialize, Serialize};

///
/// Enclosure
///
/// Any physical splice or termination point in the outside plant. The
/// `kind` decides which parents are legal (see [`crate::rules`]); a
/// record with `parent: None` is an undocumented feed and shows up as a
/// missing link in traces rather than an error.
///

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct Enclosure {
    pub id: EnclosureId,
    pub project: ProjectId,
    pub name: String,
    pub kind: EnclosureKind,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<ParentRef>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gps: Option<GpsPoint>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
}

///
/// EnclosureKind
///

#[derive(
    Clone, Copy, Debug, Deserialize, Display, Eq, Hash, PartialEq, Serialize,
)]
#[remain::sorted]
#[serde(rename_all = "kebab-case")]
pub enum EnclosureKind {
    #[display("building-entry")]
    BuildingEntry,
    #[display("cabinet")]
    Cabinet,
    #[display("closure")]
    Closure,
    /// Mid-span fan-out point (LCP/FDT), usually hosting a splitter.
    #[display("distribution-point")]
    DistributionPoint,
    #[display("handhole")]
    Handhole,
    #[display("pole-mount")]
    PoleMount,
    /// Last point before the subscriber drop (NAP/FAT). Always a leaf.
    #[display("termination-point")]
    TerminationPoint,
}

impl EnclosureKind {
    /// Kinds that merely pass fiber through and may be chained freely.
    #[must_use]
    pub const fn is_pass_through(self) -> bool {
        matches!(
            self,
            Self::BuildingEntry | Self::Cabinet | Self::Closure | Self::Handhole | Self::PoleMount
        )
    }
}
