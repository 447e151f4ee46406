//! Best-seller ranking entity model
//!
//! One ranked entity per country and category on a rank date. An entity is
//! an abstract product that may map to several catalog products.

use sea_orm::ActiveModelBehavior;
use sea_orm::entity::prelude::*;
use serde_json::Value as JsonValue;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "best_sellers")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub account_id: i64,
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

    /// JSON array of GTIN strings
    #[sea_orm(column_type = "JsonBinary")]
    pub variant_gtins: JsonValue,

    pub product_inventory_status: Option<String>,
    pub brand_inventory_status: Option<String>,
    pub rank: i64,
    pub previous_rank: Option<i64>,
    pub relative_demand: Option<String>,
    pub previous_relative_demand: Option<String>,
    pub relative_demand_change: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
