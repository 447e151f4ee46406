//! Shopping product stats entity model
//!
//! Raw daily ads performance per offer. Country and language are the raw
//! criterion strings of the ads export (e.g. `geoTargetConstants/2840`).

use sea_orm::ActiveModelBehavior;
use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "shopping_product_stats")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,

    /// Ads customer id, digits only
    pub customer_id: i64,

    pub merchant_id: i64,
    pub channel: String,
    pub offer_id: String,
    pub country_criterion: String,
    pub language_criterion: String,
    pub segment_date: Date,
    pub impressions: i64,
    pub clicks: i64,
    pub cost_micros: i64,
    pub conversions: f64,
    pub conversions_value: f64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
