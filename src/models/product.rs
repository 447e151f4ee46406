//! Product snapshot entity model
//!
//! One merchant-center product as of one snapshot date. Destination statuses
//! and custom attributes keep their nested shape as JSON.

use sea_orm::ActiveModelBehavior;
use sea_orm::entity::prelude::*;
use serde_json::Value as JsonValue;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "products")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,

    /// Merchant-center account the feed was exported for
    pub account_id: i64,

    pub merchant_id: i64,
    pub product_id: String,
    pub snapshot_date: Date,
    pub offer_id: String,
    pub title: Option<String>,
    pub brand: Option<String>,
    pub gtin: Option<String>,
    pub channel: String,
    pub content_language: String,
    pub availability: Option<String>,
    pub price_value: Option<f64>,
    pub price_currency: Option<String>,
    pub sale_price_value: Option<f64>,
    pub sale_price_currency: Option<String>,

    /// Category path such as `Apparel > Shoes > Sneakers`
    pub category_path: Option<String>,

    pub image_link: Option<String>,

    #[sea_orm(column_type = "JsonBinary")]
    pub custom_attributes: JsonValue,

    /// Array of `{destination, approved_countries, pending_countries, disapproved_countries}`
    #[sea_orm(column_type = "JsonBinary")]
    pub destinations: JsonValue,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
