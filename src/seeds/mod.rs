//! Database seeding functionality
//!
//! Populates the static reference tables that raw ads criteria resolve through.

pub mod reference;

pub use reference::{ReferenceSeedSummary, seed_reference_tables};
