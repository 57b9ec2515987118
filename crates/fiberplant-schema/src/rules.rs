//! Static hierarchy type rules.
//!
//! The table answers one question: may an enclosure of kind X hang from
//! parent slot Y? Collaborators must consult [`can_attach`] before
//! persisting any parent/child link.
//!
//! Structural summary:
//! - pass-through kinds (closure, handhole, building entry, pole mount,
//!   cabinet) chain freely below the head end, a frame port, or each
//!   other; cascaded closures are how long routes are documented;
//! - distribution points fan out below the head end or a pass-through
//!   enclosure and are the only legal parents of termination points;
//! - termination points are leaves, never parents.

use crate::entity::EnclosureKind;
use serde::{Deserialize, Serialize};
use std::fmt;

///
/// ParentSlot
///
/// The parent side of an attachment check. Mirrors
/// [`crate::node::ParentRef`] but carries the enclosure *kind* instead
/// of an id, since the rules are purely kind-to-kind.
///

#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(tag = "kind", content = "enclosure-kind", rename_all = "kebab-case")]
pub enum ParentSlot {
    Enclosure(EnclosureKind),
    FramePort,
    HeadEnd,
}

impl fmt::Display for ParentSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Enclosure(kind) => write!(f, "a {kind} enclosure"),
            Self::FramePort => f.write_str("a distribution-frame port"),
            Self::HeadEnd => f.write_str("a head-end terminal"),
        }
    }
}

/// May a `child` enclosure attach below `parent`?
#[must_use]
pub const fn can_attach(child: EnclosureKind, parent: ParentSlot) -> bool {
    use EnclosureKind as K;

    match child {
        K::Closure | K::Handhole | K::BuildingEntry | K::PoleMount | K::Cabinet => match parent {
            ParentSlot::HeadEnd | ParentSlot::FramePort => true,
            ParentSlot::Enclosure(kind) => kind.is_pass_through(),
        },
        K::DistributionPoint => match parent {
            ParentSlot::HeadEnd => true,
            ParentSlot::FramePort => false,
            ParentSlot::Enclosure(kind) => kind.is_pass_through(),
        },
        K::TerminationPoint => {
            matches!(parent, ParentSlot::Enclosure(K::DistributionPoint))
        }
    }
}

/// Enclosure kinds that may legally appear below an enclosure of `kind`.
#[must_use]
pub const fn allowed_children(kind: EnclosureKind) -> &'static [EnclosureKind] {
    use EnclosureKind as K;

    const PASS_THROUGH_CHILDREN: &[EnclosureKind] = &[
        K::Closure,
        K::Handhole,
        K::BuildingEntry,
        K::PoleMount,
        K::Cabinet,
        K::DistributionPoint,
    ];

    match kind {
        K::Closure | K::Handhole | K::BuildingEntry | K::PoleMount | K::Cabinet => {
            PASS_THROUGH_CHILDREN
        }
        K::DistributionPoint => &[K::TerminationPoint],
        K::TerminationPoint => &[],
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::EnclosureKind as K;

    const ALL_KINDS: [K; 7] = [
        K::Closure,
        K::DistributionPoint,
        K::TerminationPoint,
        K::Handhole,
        K::BuildingEntry,
        K::PoleMount,
        K::Cabinet,
    ];

    #[test]
    fn closure_chains_below_closure() {
        assert!(can_attach(K::Closure, ParentSlot::Enclosure(K::Closure)));
        assert!(can_attach(K::Closure, ParentSlot::HeadEnd));
        assert!(can_attach(K::Closure, ParentSlot::FramePort));
    }

    #[test]
    fn distribution_point_never_hangs_from_frame_port() {
        assert!(!can_attach(K::DistributionPoint, ParentSlot::FramePort));
        assert!(can_attach(K::DistributionPoint, ParentSlot::HeadEnd));
        assert!(can_attach(
            K::DistributionPoint,
            ParentSlot::Enclosure(K::Closure)
        ));
    }

    #[test]
    fn termination_point_only_below_distribution_point() {
        assert!(can_attach(
            K::TerminationPoint,
            ParentSlot::Enclosure(K::DistributionPoint)
        ));
        assert!(!can_attach(K::TerminationPoint, ParentSlot::HeadEnd));
        assert!(!can_attach(K::TerminationPoint, ParentSlot::FramePort));
        assert!(!can_attach(
            K::TerminationPoint,
            ParentSlot::Enclosure(K::Closure)
        ));
    }

    #[test]
    fn termination_point_is_never_a_parent() {
        for child in ALL_KINDS {
            assert!(
                !can_attach(child, ParentSlot::Enclosure(K::TerminationPoint)),
                "{child:?} must not attach below a termination point"
            );
        }
        assert!(allowed_children(K::TerminationPoint).is_empty());
    }

    #[test]
    fn allowed_children_agrees_with_can_attach() {
        for parent in ALL_KINDS {
            for child in ALL_KINDS {
                let listed = allowed_children(parent).contains(&child);
                let attaches = can_attach(child, ParentSlot::Enclosure(parent));
                assert_eq!(listed, attaches, "table mismatch for {child:?} under {parent:?}");
            }
        }
    }
}
