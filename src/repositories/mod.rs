//! # Repository Layer
//!
//! SeaORM access to the upstream feeds, the reference tables and the two
//! materialized views.

pub mod reference;
pub mod sources;
pub mod views;

pub use reference::ReferenceRepository;
pub use sources::{RunScope, SourceRepository};
pub use views::ViewRepository;

/// Rows per multi-row insert; keeps statements under the bind-parameter
/// limits of both Postgres and SQLite.
pub const INSERT_BATCH_SIZE: usize = 200;
