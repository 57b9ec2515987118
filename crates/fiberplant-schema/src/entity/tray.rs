use crate::ids::{EnclosureId, TrayId};
use serde::{Deserialize, Serialize};

///
/// Tray
///
/// Splice organizer inside an enclosure. A tray joins two cables; their
/// fiber counts are recorded here so splice fibers can be color-annotated
/// without consulting the cables themselves.
///

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct Tray {
    pub id: TrayId,
    pub enclosure: EnclosureId,

    /// Ordinal printed on the tray, unique within the enclosure.
    pub number: u32,

    /// Maximum number of splices the tray can hold.
    pub capacity: u32,

    pub cable_a_fibers: u32,
    pub cable_b_fibers: u32,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}
