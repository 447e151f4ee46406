//! Best-sellers weekly product view entity model
//!
//! Output relation, one row per ranked entity, country, rank date and mapped
//! product. Product columns are null when the entity is unmapped or the mapped
//! product is not in the catalog for that country and date.

use sea_orm::ActiveModelBehavior;
use sea_orm::entity::prelude::*;
use serde_json::Value as JsonValue;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "best_sellers_weekly_product_view")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub row_index: i64,
    pub rank_date: Date,
    pub country_code: String,
    pub category_id: i64,
    pub entity_id: String,
    pub title: Option<String>,
    pub brand: Option<String>,
    pub category_l1: Option<String>,
    pub category_l2: Option<String>,
    pub category_l3: Option<String>,
    pub category_l4: Option<String>,
    pub category_l5: Option<String>,

    /// Non-empty levels joined with `" > "`
    pub full_category: String,

    #[sea_orm(column_type = "JsonBinary")]
    pub variant_gtins: JsonValue,
    pub product_inventory_status: Option<String>,
    pub brand_inventory_status: Option<String>,
    pub rank: i64,
    pub previous_rank: Option<i64>,
    pub relative_demand: Option<String>,
    pub previous_relative_demand: Option<String>,
    pub relative_demand_change: Option<String>,
    pub merchant_id: Option<i64>,
    pub product_id: Option<String>,
    pub offer_id: Option<String>,
    pub product_title: Option<String>,
    pub availability: Option<String>,
    pub is_disapproved: Option<bool>,
    pub current_price_value: Option<f64>,
    pub current_price_currency: Option<String>,
    pub benchmark_price_value: Option<f64>,
    pub benchmark_price_currency: Option<String>,
    pub impressions_7d: Option<i64>,
    pub clicks_7d: Option<i64>,
    pub cost_7d: Option<f64>,
    pub conversions_7d: Option<f64>,
    pub conversions_value_7d: Option<f64>,
    pub impressions_30d: Option<i64>,
    pub clicks_30d: Option<i64>,
    pub cost_30d: Option<f64>,
    pub conversions_30d: Option<f64>,
    pub conversions_value_30d: Option<f64>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
