//! # View Repository
//!
//! Single writer of the two materialized relations. Each write replaces the
//! whole relation inside one transaction; a failed write leaves the previous
//! content in place.

use std::sync::Arc;

use sea_orm::{
    ActiveModelTrait, DatabaseConnection, DbErr, EntityTrait, QueryOrder, TransactionTrait,
};
use serde_json::Value as JsonValue;

use crate::models::{best_sellers_view, inventory_view};
use crate::pipeline::best_sellers::BestSellerViewRow;
use crate::pipeline::inventory::InventoryViewRow;
use crate::pipeline::types::Price;

use super::INSERT_BATCH_SIZE;

#[derive(Debug, Clone)]
pub struct ViewRepository {
    pub db: Arc<DatabaseConnection>,
}

impl ViewRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Replaces the inventory view with `rows`, numbered in the given order.
    pub async fn replace_inventory(&self, rows: &[InventoryViewRow]) -> Result<usize, DbErr> {
        let models: Vec<inventory_view::Model> = rows
            .iter()
            .enumerate()
            .map(|(index, row)| inventory_model(index as i64, row))
            .collect();

        let txn = self.db.begin().await?;
        inventory_view::Entity::delete_many().exec(&txn).await?;
        for chunk in models.chunks(INSERT_BATCH_SIZE) {
            let batch = chunk
                .iter()
                .cloned()
                .map(|model| inventory_view::ActiveModel::from(model).reset_all());
            inventory_view::Entity::insert_many(batch).exec(&txn).await?;
        }
        txn.commit().await?;

        Ok(models.len())
    }

    /// Replaces the best-sellers view with `rows`, numbered in the given order.
    pub async fn replace_best_sellers(&self, rows: &[BestSellerViewRow]) -> Result<usize, DbErr> {
        let models: Vec<best_sellers_view::Model> = rows
            .iter()
            .enumerate()
            .map(|(index, row)| best_sellers_model(index as i64, row))
            .collect();

        let txn = self.db.begin().await?;
        best_sellers_view::Entity::delete_many().exec(&txn).await?;
        for chunk in models.chunks(INSERT_BATCH_SIZE) {
            let batch = chunk
                .iter()
                .cloned()
                .map(|model| best_sellers_view::ActiveModel::from(model).reset_all());
            best_sellers_view::Entity::insert_many(batch).exec(&txn).await?;
        }
        txn.commit().await?;

        Ok(models.len())
    }

    pub async fn list_inventory(&self) -> Result<Vec<inventory_view::Model>, DbErr> {
        inventory_view::Entity::find()
            .order_by_asc(inventory_view::Column::RowIndex)
            .all(&*self.db)
            .await
    }

    pub async fn list_best_sellers(&self) -> Result<Vec<best_sellers_view::Model>, DbErr> {
        best_sellers_view::Entity::find()
            .order_by_asc(best_sellers_view::Column::RowIndex)
            .all(&*self.db)
            .await
    }
}

fn inventory_model(row_index: i64, row: &InventoryViewRow) -> inventory_view::Model {
    let [l1, l2, l3, l4, l5] = row.category_levels.clone();
    let (price_value, price_currency) = price_columns(row.price.as_ref());
    let (sale_price_value, sale_price_currency) = price_columns(row.sale_price.as_ref());
    let (current_price_value, current_price_currency) = price_columns(row.current_price.as_ref());
    let (benchmark_price_value, benchmark_price_currency) =
        price_columns(row.benchmark_price.as_ref());
    let (suggested_price_value, suggested_price_currency) =
        price_columns(row.suggested_price.as_ref());
    let short = &row.last_7_days;
    let long = &row.last_30_days;

    inventory_view::Model {
        row_index,
        snapshot_date: row.snapshot_date,
        merchant_id: row.merchant_id,
        product_id: row.product_id.clone(),
        offer_id: row.offer_id.clone(),
        title: row.title.clone(),
        brand: row.brand.clone(),
        gtin: row.gtin.clone(),
        channel: row.channel.clone(),
        content_language: row.content_language.clone(),
        availability: row.availability.clone(),
        targeted_country: row.targeted_country.clone(),
        is_disapproved: row.is_disapproved,
        price_value,
        price_currency,
        sale_price_value,
        sale_price_currency,
        current_price_value,
        current_price_currency,
        category_l1: l1,
        category_l2: l2,
        category_l3: l3,
        category_l4: l4,
        category_l5: l5,
        final_category: row.final_category.clone(),
        image_link: row.image_link.clone(),
        custom_attributes: row.custom_attributes.clone(),
        benchmark_price_value,
        benchmark_price_currency,
        suggested_price_value,
        suggested_price_currency,
        predicted_impressions_change_fraction: row.predicted_impressions_change_fraction,
        predicted_clicks_change_fraction: row.predicted_clicks_change_fraction,
        predicted_conversions_change_fraction: row.predicted_conversions_change_fraction,
        impressions_7d: short.impressions,
        clicks_7d: short.clicks,
        cost_7d: short.cost,
        conversions_7d: short.conversions,
        conversions_value_7d: short.conversions_value,
        ctr_7d: short.ctr,
        impressions_30d: long.impressions,
        clicks_30d: long.clicks,
        cost_30d: long.cost,
        conversions_30d: long.conversions,
        conversions_value_30d: long.conversions_value,
        ctr_30d: long.ctr,
    }
}

fn best_sellers_model(row_index: i64, row: &BestSellerViewRow) -> best_sellers_view::Model {
    let [l1, l2, l3, l4, l5] = row.category_levels.clone();
    let product = row.product.as_ref();
    let (current_price_value, current_price_currency) =
        price_columns(product.and_then(|p| p.current_price.as_ref()));
    let (benchmark_price_value, benchmark_price_currency) =
        price_columns(product.and_then(|p| p.benchmark_price.as_ref()));
    let short = product.map(|p| p.last_7_days).unwrap_or_default();
    let long = product.map(|p| p.last_30_days).unwrap_or_default();

    best_sellers_view::Model {
        row_index,
        rank_date: row.rank_date,
        country_code: row.country_code.clone(),
        category_id: row.category_id,
        entity_id: row.entity_id.clone(),
        title: row.title.clone(),
        brand: row.brand.clone(),
        category_l1: l1,
        category_l2: l2,
        category_l3: l3,
        category_l4: l4,
        category_l5: l5,
        full_category: row.full_category.clone(),
        variant_gtins: JsonValue::from(row.variant_gtins.clone()),
        product_inventory_status: row.product_inventory_status.clone(),
        brand_inventory_status: row.brand_inventory_status.clone(),
        rank: row.rank,
        previous_rank: row.previous_rank,
        relative_demand: row.relative_demand.clone(),
        previous_relative_demand: row.previous_relative_demand.clone(),
        relative_demand_change: row.relative_demand_change.clone(),
        merchant_id: product.map(|p| p.merchant_id),
        product_id: row.product_id.clone(),
        offer_id: product.map(|p| p.offer_id.clone()),
        product_title: product.and_then(|p| p.title.clone()),
        availability: product.and_then(|p| p.availability.clone()),
        is_disapproved: product.map(|p| p.is_disapproved),
        current_price_value,
        current_price_currency,
        benchmark_price_value,
        benchmark_price_currency,
        impressions_7d: short.impressions,
        clicks_7d: short.clicks,
        cost_7d: short.cost,
        conversions_7d: short.conversions,
        conversions_value_7d: short.conversions_value,
        impressions_30d: long.impressions,
        clicks_30d: long.clicks,
        cost_30d: long.cost,
        conversions_30d: long.conversions,
        conversions_value_30d: long.conversions_value,
    }
}

fn price_columns(price: Option<&Price>) -> (Option<f64>, Option<String>) {
    match price {
        Some(price) => (Some(price.value), price.currency.clone()),
        None => (None, None),
    }
}
