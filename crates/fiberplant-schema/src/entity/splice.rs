use crate::{ids::{SpliceId, TrayId}, types::Timestamp};
use derive_more::Display;
use serde::{Deserialize, Serialize};

///
/// Splice
///
/// Physical joint between fiber ordinal `fiber_a` of the tray's A cable
/// and `fiber_b` of its B cable. The color names are snapshot fields,
/// frozen when the splice is recorded: the record stays human-readable
/// even if a cable's fiber count is edited later, so they must never be
/// recomputed from the ordinals.
///

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct Splice {
    pub id: SpliceId,
    pub tray: TrayId,

    pub fiber_a: u32,
    pub fiber_b: u32,

    pub colors_a: FiberColors,
    pub colors_b: FiberColors,

    pub kind: SpliceKind,

    /// Measured insertion loss in dB, if the technician recorded one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub loss_db: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub technician: Option<String>,

    pub spliced_at: Timestamp,
    pub status: SpliceStatus,

    /// Already-parsed OTDR events attached by the ingestion collaborator.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub otdr: Option<OtdrTrace>,
}

impl Splice {
    /// Active splices occupy their fiber positions; failed ones do not.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        !matches!(self.status, SpliceStatus::Failed)
    }
}

///
/// FiberColors
///
/// Snapshot of one fiber's TIA-598 identity at splice-creation time.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct FiberColors {
    pub tube: String,
    pub fiber: String,
}

impl FiberColors {
    #[must_use]
    pub fn new(tube: impl Into<String>, fiber: impl Into<String>) -> Self {
        Self {
            tube: tube.into(),
            fiber: fiber.into(),
        }
    }
}

///
/// SpliceKind
///

#[derive(
    Clone, Copy, Debug, Deserialize, Display, Eq, Hash, PartialEq, Serialize,
)]
#[serde(rename_all = "kebab-case")]
pub enum SpliceKind {
    #[display("fusion")]
    Fusion,
    #[display("mechanical")]
    Mechanical,
}

///
/// SpliceStatus
///

#[derive(
    Clone, Copy, Debug, Default, Deserialize, Display, Eq, Hash, PartialEq, Serialize,
)]
#[remain::sorted]
#[serde(rename_all = "kebab-case")]
pub enum SpliceStatus {
    Completed,
    Failed,
    NeedsReview,
    #[default]
    Pending,
}

///
/// OtdrTrace
///
/// Event list delivered by the external OTDR file reader. Binary trace
/// decoding happens outside the engine; by the time a trace reaches a
/// splice record it is already structured.
///

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct OtdrTrace {
    pub wavelength_nm: u32,
    pub events: Vec<OtdrEvent>,
}

///
/// OtdrEvent
///

#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Serialize)]
pub struct OtdrEvent {
    pub distance_km: f64,
    pub loss_db: f64,
    pub kind: OtdrEventKind,
}

///
/// OtdrEventKind
///

#[derive(
    Clone, Copy, Debug, Deserialize, Display, Eq, Hash, PartialEq, Serialize,
)]
#[remain::sorted]
#[serde(rename_all = "kebab-case")]
pub enum OtdrEventKind {
    End,
    Reflective,
    Splice,
}
