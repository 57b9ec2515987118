//! Tagged references between hierarchy nodes.
//!
//! A child never holds an in-memory pointer to its parent; it holds a
//! closed tagged id so the rule table in [`crate::rules`] can be checked
//! exhaustively and the store can resolve the reference lazily.

use crate::ids::{EnclosureId, FrameId, FramePortId, HeadEndId, ProjectId, TrayId};
use derive_more::Display;
use serde::{Deserialize, Serialize};
use std::fmt;

///
/// ParentRef
///
/// The only three node kinds an enclosure may hang from. Closed on
/// purpose: adding a variant forces every rule-table match to be
/// revisited.
///

#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(tag = "kind", content = "id", rename_all = "kebab-case")]
pub enum ParentRef {
    Enclosure(EnclosureId),
    FramePort(FramePortId),
    HeadEnd(HeadEndId),
}

impl ParentRef {
    /// Kind label used in operator-facing diagnostics.
    #[must_use]
    pub const fn kind_label(self) -> &'static str {
        match self {
            Self::Enclosure(_) => "enclosure",
            Self::FramePort(_) => "frame-port",
            Self::HeadEnd(_) => "head-end",
        }
    }
}

impl fmt::Display for ParentRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Enclosure(id) => write!(f, "enclosure/{id}"),
            Self::FramePort(id) => write!(f, "frame-port/{id}"),
            Self::HeadEnd(id) => write!(f, "head-end/{id}"),
        }
    }
}

impl From<ParentRef> for NodeRef {
    fn from(parent: ParentRef) -> Self {
        match parent {
            ParentRef::Enclosure(id) => Self::Enclosure(id),
            ParentRef::FramePort(id) => Self::FramePort(id),
            ParentRef::HeadEnd(id) => Self::HeadEnd(id),
        }
    }
}

///
/// NodeRef
///
/// A reference to any node of the hierarchy. Used as a trace origin, as
/// the subject of a delete-impact report, and as the visited-set key
/// inside the tracer.
///

#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(tag = "kind", content = "id", rename_all = "kebab-case")]
pub enum NodeRef {
    Enclosure(EnclosureId),
    Frame(FrameId),
    FramePort(FramePortId),
    HeadEnd(HeadEndId),
    Project(ProjectId),
    Tray(TrayId),
}

impl NodeRef {
    #[must_use]
    pub const fn tag(self) -> EntityTag {
        match self {
            Self::Enclosure(_) => EntityTag::Enclosure,
            Self::Frame(_) => EntityTag::Frame,
            Self::FramePort(_) => EntityTag::FramePort,
            Self::HeadEnd(_) => EntityTag::HeadEnd,
            Self::Project(_) => EntityTag::Project,
            Self::Tray(_) => EntityTag::Tray,
        }
    }
}

impl fmt::Display for NodeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Enclosure(id) => write!(f, "enclosure/{id}"),
            Self::Frame(id) => write!(f, "frame/{id}"),
            Self::FramePort(id) => write!(f, "frame-port/{id}"),
            Self::HeadEnd(id) => write!(f, "head-end/{id}"),
            Self::Project(id) => write!(f, "project/{id}"),
            Self::Tray(id) => write!(f, "tray/{id}"),
        }
    }
}

///
/// EntityTag
///
/// Bare entity-kind discriminant, used to bucket delete-impact counts.
///

#[derive(
    Clone, Copy, Debug, Deserialize, Display, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize,
)]
#[remain::sorted]
#[serde(rename_all = "kebab-case")]
pub enum EntityTag {
    Enclosure,
    Frame,
    FramePort,
    HeadEnd,
    Project,
    Splice,
    Splitter,
    SubscriberPort,
    Tray,
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parent_ref_displays_kind_and_id() {
        let parent = ParentRef::FramePort(FramePortId::new(9));
        assert_eq!(parent.to_string(), "frame-port/9");
        assert_eq!(parent.kind_label(), "frame-port");
    }

    #[test]
    fn parent_ref_widens_to_node_ref() {
        let parent = ParentRef::Enclosure(EnclosureId::new(3));
        let node: NodeRef = parent.into();
        assert_eq!(node, NodeRef::Enclosure(EnclosureId::new(3)));
        assert_eq!(node.tag(), EntityTag::Enclosure);
    }

    #[test]
    fn node_ref_serializes_tagged() {
        let json = serde_json::to_string(&NodeRef::HeadEnd(HeadEndId::new(1))).unwrap();
        assert_eq!(json, r#"{"kind":"head-end","id":1}"#);
    }
}
