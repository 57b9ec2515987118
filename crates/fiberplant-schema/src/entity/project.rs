use crate::{ids::ProjectId, types::Timestamp};
use derive_more::Display;
use serde::{Deserialize, Serialize};

///
/// Project
///
/// Top-level grouping; every other entity is scoped to a project
/// transitively. Archiving or deleting a project cascades to everything
/// it owns.
///

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct Project {
    pub id: ProjectId,
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    pub created_at: Timestamp,
    pub status: ProjectStatus,
}

///
/// ProjectStatus
///

#[derive(
    Clone, Copy, Debug, Default, Deserialize, Display, Eq, Hash, PartialEq, Serialize,
)]
#[remain::sorted]
#[serde(rename_all = "kebab-case")]
pub enum ProjectStatus {
    #[default]
    Active,
    Archived,
    Completed,
}
