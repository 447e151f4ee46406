//! # Data Models
//!
//! SeaORM entities for the upstream partitions, the reference tables and the
//! two materialized views.

pub mod best_seller;
pub mod best_sellers_view;
pub mod entity_product_mapping;
pub mod geo_target;
pub mod inventory_view;
pub mod language_code;
pub mod price_competitiveness;
pub mod price_insight;
pub mod product;
pub mod shopping_product_stat;

pub use best_seller::Entity as BestSeller;
pub use best_sellers_view::Entity as BestSellersView;
pub use entity_product_mapping::Entity as EntityProductMapping;
pub use geo_target::Entity as GeoTarget;
pub use inventory_view::Entity as InventoryView;
pub use language_code::Entity as LanguageCode;
pub use price_competitiveness::Entity as PriceCompetitiveness;
pub use price_insight::Entity as PriceInsight;
pub use product::Entity as Product;
pub use shopping_product_stat::Entity as ShoppingProductStat;
