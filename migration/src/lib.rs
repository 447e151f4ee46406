//! Database migrations for the merchant views store.
//!
//! Creates the upstream partition tables, the reference tables and the two
//! materialized output relations.

pub use sea_orm_migration::prelude::*;

mod m2025_01_06_000001_create_catalog_tables;
mod m2025_01_06_000002_create_ads_tables;
mod m2025_01_06_000003_create_reference_tables;
mod m2025_01_06_000004_create_best_seller_tables;
mod m2025_01_06_000005_create_view_tables;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m2025_01_06_000001_create_catalog_tables::Migration),
            Box::new(m2025_01_06_000002_create_ads_tables::Migration),
            Box::new(m2025_01_06_000003_create_reference_tables::Migration),
            Box::new(m2025_01_06_000004_create_best_seller_tables::Migration),
            Box::new(m2025_01_06_000005_create_view_tables::Migration),
        ]
    }
}
