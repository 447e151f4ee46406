//! Assembly of the Inventory view: one row per online product and targeted country.

use chrono::NaiveDate;
use serde_json::Value as JsonValue;

use super::enrich::EnrichedProduct;
use super::types::{CATEGORY_LEVELS, MetricTotals, ONLINE_CHANNEL, Price, final_category, safe_divide};

/// Cost is reported in micros upstream.
pub const MICROS_PER_UNIT: f64 = 1_000_000.0;

/// Window metrics as they appear in the views. Every field is `None` when no
/// aggregate matched; cost and ctr may also be `None` through safe division.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct WindowMetrics {
    pub impressions: Option<i64>,
    pub clicks: Option<i64>,
    pub cost: Option<f64>,
    pub conversions: Option<f64>,
    pub conversions_value: Option<f64>,
    pub ctr: Option<f64>,
}

impl WindowMetrics {
    pub fn from_totals(totals: Option<&MetricTotals>) -> Self {
        let Some(totals) = totals else {
            return Self::default();
        };
        Self {
            impressions: Some(totals.impressions),
            clicks: Some(totals.clicks),
            cost: safe_divide(Some(totals.cost_micros as f64), Some(MICROS_PER_UNIT)),
            conversions: Some(totals.conversions),
            conversions_value: Some(totals.conversions_value),
            ctr: safe_divide(Some(totals.clicks as f64), Some(totals.impressions as f64)),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct InventoryViewRow {
    pub snapshot_date: NaiveDate,
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
    pub price: Option<Price>,
    pub sale_price: Option<Price>,
    pub current_price: Option<Price>,
    pub category_levels: [Option<String>; CATEGORY_LEVELS],
    pub final_category: Option<String>,
    pub image_link: Option<String>,
    pub custom_attributes: JsonValue,
    pub benchmark_price: Option<Price>,
    pub suggested_price: Option<Price>,
    pub predicted_impressions_change_fraction: Option<f64>,
    pub predicted_clicks_change_fraction: Option<f64>,
    pub predicted_conversions_change_fraction: Option<f64>,
    pub last_7_days: WindowMetrics,
    pub last_30_days: WindowMetrics,
}

impl InventoryViewRow {
    fn from_enriched(row: &EnrichedProduct<'_>) -> Self {
        let product = row.product;
        let category_levels = product.category_levels();
        let performance = row.performance;

        Self {
            snapshot_date: product.snapshot_date,
            merchant_id: product.merchant_id,
            product_id: product.product_id.clone(),
            offer_id: product.offer_id.clone(),
            title: product.title.clone(),
            brand: product.brand.clone(),
            gtin: product.gtin.clone(),
            channel: product.channel.clone(),
            content_language: product.content_language.clone(),
            availability: product.availability.clone(),
            targeted_country: row.status.targeted_country.clone(),
            is_disapproved: row.status.is_disapproved,
            price: product.price.clone(),
            sale_price: product.sale_price.clone(),
            current_price: row.current_price.cloned(),
            final_category: final_category(&category_levels),
            category_levels,
            image_link: product.image_link.clone(),
            custom_attributes: product.custom_attributes.clone(),
            benchmark_price: row
                .competitiveness
                .and_then(|record| record.benchmark_price.clone()),
            suggested_price: row.insight.and_then(|record| record.suggested_price.clone()),
            predicted_impressions_change_fraction: row
                .insight
                .and_then(|record| record.predicted_impressions_change_fraction),
            predicted_clicks_change_fraction: row
                .insight
                .and_then(|record| record.predicted_clicks_change_fraction),
            predicted_conversions_change_fraction: row
                .insight
                .and_then(|record| record.predicted_conversions_change_fraction),
            last_7_days: WindowMetrics::from_totals(performance.map(|p| &p.last_7_days)),
            last_30_days: WindowMetrics::from_totals(performance.map(|p| &p.last_30_days)),
        }
    }
}

/// Builds the Inventory view from enriched rows.
///
/// Only the online channel is kept. Rows come back sorted by
/// `(snapshot_date, merchant_id, product_id, targeted_country)`.
pub fn materialize_inventory(enriched: &[EnrichedProduct<'_>]) -> Vec<InventoryViewRow> {
    let mut rows: Vec<InventoryViewRow> = enriched
        .iter()
        .filter(|row| row.product.channel.eq_ignore_ascii_case(ONLINE_CHANNEL))
        .map(InventoryViewRow::from_enriched)
        .collect();

    rows.sort_by(|a, b| {
        (a.snapshot_date, a.merchant_id, &a.product_id, &a.targeted_country).cmp(&(
            b.snapshot_date,
            b.merchant_id,
            &b.product_id,
            &b.targeted_country,
        ))
    });
    rows
}
