//! Fiberplant: outside-plant fiber network documentation engine.
//!
//! ## Crate layout
//! - `schema`: entity vocabulary, typed ids, and the hierarchy rule table.
//! - `core`: color coding, splice matrices, compliance, tracing, budgets,
//!   the store boundary, and observability.
//!
//! The `prelude` mirrors the surface a rendering or persistence
//! collaborator consumes.

pub use fiberplant_core as core;
pub use fiberplant_schema as schema;

pub use fiberplant_core::Error;

//
// Consts
//

/// Workspace version re-export for downstream tooling/tests.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

///
/// Prelude
///

pub mod prelude {
    pub use fiberplant_core::prelude::*;
    pub use fiberplant_schema::prelude::*;
}

///
/// TESTS
///
