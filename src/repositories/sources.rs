//! # Source Repository
//!
//! Read-only access to the upstream date-partitioned feeds, scoped by the
//! source namespace and the run scope, converted into pipeline records.

use std::sync::Arc;

use chrono::{Duration, NaiveDate};
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder};
use serde::de::DeserializeOwned;
use serde_json::Value as JsonValue;
use tracing::debug;

use crate::config::SourceNamespace;
use crate::error::PipelineError;
use crate::models::{
    best_seller, entity_product_mapping, price_competitiveness, price_insight, product,
    shopping_product_stat,
};
use crate::pipeline::enrich::AGGREGATION_LAG_DAYS;
use crate::pipeline::performance::LONG_WINDOW_PRECEDING_DAYS;
use crate::pipeline::types::{
    BestSellerRankRecord, DestinationStatus, EntityProductMapping, MetricTotals, Price,
    PriceCompetitivenessRecord, PriceInsightRecord, ProductSnapshot, RawPerformanceRecord,
};

/// Which snapshot partitions a run materializes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RunScope {
    /// Every snapshot date present upstream.
    #[default]
    AllPartitions,
    /// A single snapshot date.
    Date(NaiveDate),
}

impl RunScope {
    pub fn snapshot_date(&self) -> Option<NaiveDate> {
        match self {
            Self::AllPartitions => None,
            Self::Date(date) => Some(*date),
        }
    }

    /// Inclusive range of performance segment dates feeding the lagged long
    /// window of a single-date run.
    pub fn performance_history(&self) -> Option<(NaiveDate, NaiveDate)> {
        self.snapshot_date().map(|date| {
            let end = date - Duration::days(AGGREGATION_LAG_DAYS);
            (end - Duration::days(LONG_WINDOW_PRECEDING_DAYS), end)
        })
    }
}

/// Repository over the upstream feeds
#[derive(Debug, Clone)]
pub struct SourceRepository {
    db: Arc<DatabaseConnection>,
    namespace: SourceNamespace,
    scope: RunScope,
}

impl SourceRepository {
    pub fn new(db: Arc<DatabaseConnection>, namespace: SourceNamespace, scope: RunScope) -> Self {
        Self {
            db,
            namespace,
            scope,
        }
    }

    pub fn scope(&self) -> RunScope {
        self.scope
    }

    /// Product snapshots of the merchant account, ordered by row id.
    pub async fn load_products(&self) -> Result<Vec<ProductSnapshot>, PipelineError> {
        let mut query = product::Entity::find()
            .filter(product::Column::AccountId.eq(self.namespace.merchant_id))
            .order_by_asc(product::Column::Id);
        if let Some(date) = self.scope.snapshot_date() {
            query = query.filter(product::Column::SnapshotDate.eq(date));
        }

        let rows = query.all(&*self.db).await?;
        debug!(rows = rows.len(), "loaded product snapshots");
        rows.into_iter().map(product_snapshot).collect()
    }

    pub async fn load_price_competitiveness(
        &self,
    ) -> Result<Vec<PriceCompetitivenessRecord>, PipelineError> {
        let mut query = price_competitiveness::Entity::find()
            .filter(price_competitiveness::Column::AccountId.eq(self.namespace.merchant_id))
            .order_by_asc(price_competitiveness::Column::Id);
        if let Some(date) = self.scope.snapshot_date() {
            query = query.filter(price_competitiveness::Column::SnapshotDate.eq(date));
        }

        let rows = query.all(&*self.db).await?;
        Ok(rows
            .into_iter()
            .map(|row| PriceCompetitivenessRecord {
                merchant_id: row.merchant_id,
                product_id: row.product_id,
                country_code: row.country_code,
                snapshot_date: row.snapshot_date,
                price: Price::from_parts(row.price_value, row.price_currency),
                benchmark_price: Price::from_parts(
                    row.benchmark_price_value,
                    row.benchmark_price_currency,
                ),
            })
            .collect())
    }

    pub async fn load_price_insights(&self) -> Result<Vec<PriceInsightRecord>, PipelineError> {
        let mut query = price_insight::Entity::find()
            .filter(price_insight::Column::AccountId.eq(self.namespace.merchant_id))
            .order_by_asc(price_insight::Column::Id);
        if let Some(date) = self.scope.snapshot_date() {
            query = query.filter(price_insight::Column::SnapshotDate.eq(date));
        }

        let rows = query.all(&*self.db).await?;
        Ok(rows
            .into_iter()
            .map(|row| PriceInsightRecord {
                merchant_id: row.merchant_id,
                product_id: row.product_id,
                snapshot_date: row.snapshot_date,
                price: Price::from_parts(row.price_value, row.price_currency),
                suggested_price: Price::from_parts(
                    row.suggested_price_value,
                    row.suggested_price_currency,
                ),
                predicted_impressions_change_fraction: row.predicted_impressions_change_fraction,
                predicted_clicks_change_fraction: row.predicted_clicks_change_fraction,
                predicted_conversions_change_fraction: row.predicted_conversions_change_fraction,
            })
            .collect())
    }

    /// Raw ads rows of the customer, restricted to the window history for single-date runs.
    pub async fn load_performance_records(
        &self,
    ) -> Result<Vec<RawPerformanceRecord>, PipelineError> {
        let mut query = shopping_product_stat::Entity::find()
            .filter(
                shopping_product_stat::Column::CustomerId.eq(self.namespace.external_customer_id),
            )
            .order_by_asc(shopping_product_stat::Column::Id);
        if let Some((start, end)) = self.scope.performance_history() {
            query = query.filter(shopping_product_stat::Column::SegmentDate.between(start, end));
        }

        let rows = query.all(&*self.db).await?;
        debug!(rows = rows.len(), "loaded raw performance records");
        Ok(rows
            .into_iter()
            .map(|row| RawPerformanceRecord {
                merchant_id: row.merchant_id,
                channel: row.channel,
                offer_id: row.offer_id,
                country_criterion: row.country_criterion,
                language_criterion: row.language_criterion,
                segment_date: row.segment_date,
                metrics: MetricTotals {
                    impressions: row.impressions,
                    clicks: row.clicks,
                    cost_micros: row.cost_micros,
                    conversions: row.conversions,
                    conversions_value: row.conversions_value,
                },
            })
            .collect())
    }

    pub async fn load_best_sellers(&self) -> Result<Vec<BestSellerRankRecord>, PipelineError> {
        let mut query = best_seller::Entity::find()
            .filter(best_seller::Column::AccountId.eq(self.namespace.merchant_id))
            .order_by_asc(best_seller::Column::Id);
        if let Some(date) = self.scope.snapshot_date() {
            query = query.filter(best_seller::Column::RankDate.eq(date));
        }

        let rows = query.all(&*self.db).await?;
        rows.into_iter().map(best_seller_rank).collect()
    }

    pub async fn load_entity_mappings(&self) -> Result<Vec<EntityProductMapping>, PipelineError> {
        let mut query = entity_product_mapping::Entity::find()
            .filter(entity_product_mapping::Column::AccountId.eq(self.namespace.merchant_id))
            .order_by_asc(entity_product_mapping::Column::Id);
        if let Some(date) = self.scope.snapshot_date() {
            query = query.filter(entity_product_mapping::Column::MappingDate.eq(date));
        }

        let rows = query.all(&*self.db).await?;
        Ok(rows
            .into_iter()
            .map(|row| EntityProductMapping {
                entity_id: row.entity_id,
                product_id: row.product_id,
                mapping_date: row.mapping_date,
            })
            .collect())
    }
}

/// Decodes a nested JSON column; SQL `NULL` or JSON `null` decode as `T::default()`.
fn decode_nested<T>(
    value: JsonValue,
    table: &'static str,
    column: &'static str,
    id: i64,
) -> Result<T, PipelineError>
where
    T: DeserializeOwned + Default,
{
    if value.is_null() {
        return Ok(T::default());
    }
    serde_json::from_value(value).map_err(|source| PipelineError::malformed(table, column, id, source))
}

fn product_snapshot(row: product::Model) -> Result<ProductSnapshot, PipelineError> {
    let destinations: Vec<DestinationStatus> =
        decode_nested(row.destinations, "products", "destinations", row.id)?;

    Ok(ProductSnapshot {
        merchant_id: row.merchant_id,
        product_id: row.product_id,
        snapshot_date: row.snapshot_date,
        offer_id: row.offer_id,
        title: row.title,
        brand: row.brand,
        gtin: row.gtin,
        channel: row.channel,
        content_language: row.content_language,
        availability: row.availability,
        price: Price::from_parts(row.price_value, row.price_currency),
        sale_price: Price::from_parts(row.sale_price_value, row.sale_price_currency),
        category_path: row.category_path,
        image_link: row.image_link,
        custom_attributes: row.custom_attributes,
        destinations,
    })
}

fn best_seller_rank(row: best_seller::Model) -> Result<BestSellerRankRecord, PipelineError> {
    let variant_gtins: Vec<String> =
        decode_nested(row.variant_gtins, "best_sellers", "variant_gtins", row.id)?;

    Ok(BestSellerRankRecord {
        rank_date: row.rank_date,
        country_code: row.country_code,
        category_id: row.category_id,
        entity_id: row.entity_id,
        title: row.title,
        brand: row.brand,
        category_levels: [
            row.category_l1,
            row.category_l2,
            row.category_l3,
            row.category_l4,
            row.category_l5,
        ],
        variant_gtins,
        product_inventory_status: row.product_inventory_status,
        brand_inventory_status: row.brand_inventory_status,
        rank: row.rank,
        previous_rank: row.previous_rank,
        relative_demand: row.relative_demand,
        previous_relative_demand: row.previous_relative_demand,
        relative_demand_change: row.relative_demand_change,
    })
}
