use crate::{
    ids::{EnclosureId, FrameId, FramePortId, HeadEndId},
    types::PortStatus,
};
use serde::{Deserialize, Serialize};

///
/// DistributionFrame
///
/// Fixed-port patch panel directly below a head-end terminal
/// (ODF-equivalent). Its ports are separate entities so each can link to
/// an enclosure independently.
///

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct DistributionFrame {
    pub id: FrameId,
    pub head_end: HeadEndId,
    pub name: String,
    pub port_count: u32,
}

///
/// FramePort
///
/// One position on a distribution frame. `number` is the ordinal printed
/// on the frame face, 1-based and unique within the frame.
///

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct FramePort {
    pub id: FramePortId,
    pub frame: FrameId,
    pub number: u32,
    pub status: PortStatus,

    /// Outside-plant enclosure this port feeds, if patched.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enclosure: Option<EnclosureId>,
}
