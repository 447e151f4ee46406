//! Geo target reference entity model

use sea_orm::ActiveModelBehavior;
use sea_orm::entity::prelude::*;

/// One row of the public ads geo-target export
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "geo_targets")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub criterion_id: i64,
    pub name: String,
    pub canonical_name: String,

    /// Criterion id of the enclosing target; for country-level rows this is the country id
    pub parent_id: Option<i64>,

    pub country_code: Option<String>,
    pub target_type: Option<String>,
    pub status: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
