use crate::{
    ids::{HeadEndId, ProjectId},
    types::GpsPoint,
};
use serde::{Deserialize, Serialize};

///
/// HeadEndTerminal
///
/// Root of a project's hierarchy (OLT-equivalent). Has no parent; all
/// downstream fiber ultimately originates here.
///

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct HeadEndTerminal {
    pub id: HeadEndId,
    pub project: ProjectId,
    pub name: String,
    pub total_ports: u32,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gps: Option<GpsPoint>,
}
