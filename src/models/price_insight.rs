//! Price insight entity model

use sea_orm::ActiveModelBehavior;
use sea_orm::entity::prelude::*;

/// Suggested price for a product and the predicted effect of adopting it
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "price_insights")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub account_id: i64,
    pub merchant_id: i64,
    pub product_id: String,
    pub snapshot_date: Date,
    pub price_value: Option<f64>,
    pub price_currency: Option<String>,
    pub suggested_price_value: Option<f64>,
    pub suggested_price_currency: Option<String>,

    /// Fractional change, e.g. `0.12` for +12%
    pub predicted_impressions_change_fraction: Option<f64>,
    pub predicted_clicks_change_fraction: Option<f64>,
    pub predicted_conversions_change_fraction: Option<f64>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
