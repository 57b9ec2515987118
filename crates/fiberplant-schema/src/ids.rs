//! Opaque store-assigned entity ids.
//!
//! Ids are plain integers handed out by the backing store; the newtypes
//! exist so a `TrayId` can never be passed where an `EnclosureId` is
//! expected.

use derive_more::{Display, From};
use serde::{Deserialize, Serialize};

macro_rules! entity_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            Clone, Copy, Debug, Deserialize, Display, Eq, From, Hash, Ord, PartialEq, PartialOrd,
            Serialize,
        )]
        #[serde(transparent)]
        pub struct $name(pub u64);

        impl $name {
            #[must_use]
            pub const fn new(raw: u64) -> Self {
                Self(raw)
            }

            #[must_use]
            pub const fn get(self) -> u64 {
                self.0
            }
        }
    };
}

entity_id!(
    /// Top-level project grouping.
    ProjectId
);
entity_id!(
    /// Head-end terminal (OLT-equivalent) root node.
    HeadEndId
);
entity_id!(
    /// Distribution frame (ODF-equivalent).
    FrameId
);
entity_id!(
    /// Single port on a distribution frame.
    FramePortId
);
entity_id!(
    /// Enclosure: closure, distribution point, termination point, …
    EnclosureId
);
entity_id!(
    /// Splice tray inside an enclosure.
    TrayId
);
entity_id!(
    /// Fusion or mechanical splice on a tray.
    SpliceId
);
entity_id!(
    /// Passive optical splitter.
    SplitterId
);
entity_id!(
    /// Subscriber drop port on a termination point.
    SubscriberPortId
);

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_round_trip_through_raw() {
        let id = TrayId::new(42);
        assert_eq!(id.get(), 42);
        assert_eq!(TrayId::from(42), id);
    }

    #[test]
    fn ids_serialize_transparently() {
        let json = serde_json::to_string(&EnclosureId::new(7)).unwrap();
        assert_eq!(json, "7");
    }
}
