//! # Materialization Pipeline
//!
//! Pure, in-memory transformation stages. Storage-facing code loads upstream
//! partitions into the records in [`types`], runs the stages below in order
//! and writes the two view relations back.
//!
//! 1. [`reference`] resolves raw geo and language criteria.
//! 2. [`performance`] computes the trailing window aggregates.
//! 3. [`status`] fans products out to targeted countries.
//! 4. [`enrich`] attaches pricing, insight and performance data.
//! 5. [`inventory`] and [`best_sellers`] assemble the output rows.

pub mod best_sellers;
pub mod enrich;
pub mod inventory;
pub mod performance;
pub mod reference;
pub mod status;
pub mod types;

pub use best_sellers::{BestSellerStats, BestSellerViewRow, MatchedProduct, materialize_best_sellers};
pub use enrich::{AGGREGATION_LAG_DAYS, CatalogEnricher, EnrichedProduct, EnrichmentStats};
pub use inventory::{InventoryViewRow, WindowMetrics, materialize_inventory};
pub use performance::{
    AggregationStats, LONG_WINDOW_PRECEDING_DAYS, SHORT_WINDOW_PRECEDING_DAYS, aggregate,
};
pub use reference::{GeoTarget, GeoTargetLookup, LanguageCode, LanguageLookup};
pub use status::resolve_product_status;
