use fiberplant_schema::{
    entity::EnclosureKind,
    ids::TrayId,
    node::NodeRef,
    rules::ParentSlot,
};
use thiserror::Error as ThisError;

///
/// Error
///
/// The engine's structured failure taxonomy. Pure calculators never
/// produce one of these; they return sentinels on out-of-range input so
/// rendering code can call them on every keystroke. Errors arise only at
/// the persistence boundary and at trace-origin resolution.
///

#[derive(Debug, ThisError)]
pub enum Error {
    /// Attempted parent/child link violates the hierarchy type rules.
    /// Rejected before persistence; the operator picks a valid parent.
    #[error("a {child} enclosure cannot attach below {parent}")]
    InvalidHierarchy {
        child: EnclosureKind,
        parent: ParentSlot,
    },

    /// A referenced id is absent from the store. Inside a running trace
    /// this surfaces as a missing-link entry instead.
    #[error("{node} not found")]
    NotFound { node: NodeRef },

    /// A splice would occupy a fiber position already taken on the tray.
    #[error("splice conflict on tray {tray}: {detail}")]
    SpliceConflict { tray: TrayId, detail: String },

    /// Unexpected condition during traversal; converted by the tracer
    /// into a `{success: false}` result, never propagated to callers.
    #[error("trace failed: {0}")]
    TraceFailure(String),
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;
    use fiberplant_schema::ids::EnclosureId;

    #[test]
    fn errors_render_operator_messages() {
        let err = Error::InvalidHierarchy {
            child: EnclosureKind::TerminationPoint,
            parent: ParentSlot::Enclosure(EnclosureKind::TerminationPoint),
        };
        let text = err.to_string();
        assert!(text.contains("cannot attach"), "got {text}");

        let err = Error::NotFound {
            node: NodeRef::Enclosure(EnclosureId::new(12)),
        };
        assert_eq!(err.to_string(), "enclosure/12 not found");
    }
}
