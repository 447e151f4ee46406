//! # Merchant Views Library
//!
//! Materializes the merchant-center inventory and weekly best-sellers views
//! from date-partitioned product, pricing, ads and ranking feeds.

pub mod config;
pub mod db;
pub mod error;
pub mod materializer;
pub mod models;
pub mod pipeline;
pub mod repositories;
pub mod seeds;
pub mod telemetry;
pub use migration;
