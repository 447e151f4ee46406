//! Price competitiveness entity model

use sea_orm::ActiveModelBehavior;
use sea_orm::entity::prelude::*;

/// Benchmark price for a product in one country on one snapshot date
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "price_competitiveness")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub account_id: i64,
    pub merchant_id: i64,
    pub product_id: String,
    pub country_code: String,
    pub snapshot_date: Date,
    pub price_value: Option<f64>,
    pub price_currency: Option<String>,
    pub benchmark_price_value: Option<f64>,
    pub benchmark_price_currency: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
