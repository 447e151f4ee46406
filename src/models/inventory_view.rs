//! Inventory view entity model
//!
//! Output relation, one row per product, targeted country and snapshot date.
//! Replaced wholesale on every run; `row_index` is the position of the row in
//! the deterministic output order.

use sea_orm::ActiveModelBehavior;
use sea_orm::entity::prelude::*;
use serde_json::Value as JsonValue;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "inventory_view")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub row_index: i64,
    pub snapshot_date: Date,
    pub merchant_id: i64,
    pub product_id: String,
    pub offer_id: String,
    pub title: Option<String>,
    pub brand: Option<String>,
    pub gtin: Option<String>,
    pub channel: String,
    pub content_language: String,
    pub availability: Option<String>,
    pub targeted_country: String,
    pub is_disapproved: bool,
    pub price_value: Option<f64>,
    pub price_currency: Option<String>,
    pub sale_price_value: Option<f64>,
    pub sale_price_currency: Option<String>,

    /// Sale price when present, list price otherwise
    pub current_price_value: Option<f64>,
    pub current_price_currency: Option<String>,

    pub category_l1: Option<String>,
    pub category_l2: Option<String>,
    pub category_l3: Option<String>,
    pub category_l4: Option<String>,
    pub category_l5: Option<String>,

    /// Last non-empty category level
    pub final_category: Option<String>,

    pub image_link: Option<String>,
    #[sea_orm(column_type = "JsonBinary")]
    pub custom_attributes: JsonValue,
    pub benchmark_price_value: Option<f64>,
    pub benchmark_price_currency: Option<String>,
    pub suggested_price_value: Option<f64>,
    pub suggested_price_currency: Option<String>,
    pub predicted_impressions_change_fraction: Option<f64>,
    pub predicted_clicks_change_fraction: Option<f64>,
    pub predicted_conversions_change_fraction: Option<f64>,
    pub impressions_7d: Option<i64>,
    pub clicks_7d: Option<i64>,
    pub cost_7d: Option<f64>,
    pub conversions_7d: Option<f64>,
    pub conversions_value_7d: Option<f64>,
    pub ctr_7d: Option<f64>,
    pub impressions_30d: Option<i64>,
    pub clicks_30d: Option<i64>,
    pub cost_30d: Option<f64>,
    pub conversions_30d: Option<f64>,
    pub conversions_value_30d: Option<f64>,
    pub ctr_30d: Option<f64>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
