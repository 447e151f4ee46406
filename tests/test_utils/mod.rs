//! Test utilities for database testing.
//!
//! Sets up in-memory SQLite databases with migrations applied and inserts
//! upstream feed fixtures for the configured namespace.

use anyhow::Result;
use chrono::NaiveDate;
use merchant_views::config::SourceNamespace;
use merchant_views::models::{
    best_seller, entity_product_mapping, geo_target, language_code, price_competitiveness,
    price_insight, product, shopping_product_stat,
};
use migration::{Migrator, MigratorTrait};
use sea_orm::{ActiveModelTrait, ActiveValue::NotSet, Database, DatabaseConnection, Set};
use serde_json::{Value as JsonValue, json};
use std::sync::Arc;

#[allow(dead_code)]
pub const MERCHANT_ID: i64 = 5_551_234;
#[allow(dead_code)]
pub const CUSTOMER_ID: i64 = 1_234_567_890;

#[allow(dead_code)]
pub const US_CRITERION: &str = "geoTargetConstants/2840";
#[allow(dead_code)]
pub const DE_CRITERION: &str = "geoTargetConstants/2276";
#[allow(dead_code)]
pub const EN_CRITERION: &str = "languageConstants/1000";

/// Sets up an in-memory SQLite database with all migrations applied.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = Database::connect("sqlite::memory:").await?;
    Migrator::up(&db, None).await?;
    Ok(db)
}

/// Same as [`setup_test_db`] with the reference tables seeded.
#[allow(dead_code)]
pub async fn setup_test_db_arc() -> Result<Arc<DatabaseConnection>> {
    let db = setup_test_db().await?;
    seed_reference(&db).await?;
    Ok(Arc::new(db))
}

#[allow(dead_code)]
pub fn namespace() -> SourceNamespace {
    SourceNamespace {
        project_id: "acme-data".to_string(),
        dataset: "merchant_center".to_string(),
        merchant_id: MERCHANT_ID,
        external_customer_id: CUSTOMER_ID,
    }
}

#[allow(dead_code)]
pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid fixture date")
}

/// US and DE states under their country parents, plus English and German.
#[allow(dead_code)]
pub async fn seed_reference(db: &DatabaseConnection) -> Result<()> {
    for (criterion_id, name, parent_id, country_code) in [
        (21137, "California", 2840, "US"),
        (21167, "New York", 2840, "US"),
        (20228, "Bavaria", 2276, "DE"),
    ] {
        geo_target::ActiveModel {
            criterion_id: Set(criterion_id),
            name: Set(name.to_string()),
            canonical_name: Set(name.to_string()),
            parent_id: Set(Some(parent_id)),
            country_code: Set(Some(country_code.to_string())),
            target_type: Set(Some("State".to_string())),
            status: Set(Some("Active".to_string())),
        }
        .insert(db)
        .await?;
    }

    for (criterion_id, name, code) in [(1000, "English", "en"), (1001, "German", "de")] {
        language_code::ActiveModel {
            criterion_id: Set(criterion_id),
            language_name: Set(name.to_string()),
            language_code: Set(code.to_string()),
        }
        .insert(db)
        .await?;
    }
    Ok(())
}

/// Destinations payload with a single Shopping entry.
#[allow(dead_code)]
pub fn shopping(approved: &[&str], disapproved: &[&str]) -> JsonValue {
    json!([{
        "destination": "Shopping",
        "approved_countries": approved,
        "pending_countries": [],
        "disapproved_countries": disapproved,
    }])
}

/// A product snapshot row of the configured merchant.
#[allow(dead_code)]
#[derive(Debug, Clone)]
pub struct ProductFixture {
    pub product_id: String,
    pub offer_id: String,
    pub snapshot_date: NaiveDate,
    pub channel: String,
    pub content_language: String,
    pub title: Option<String>,
    pub price: Option<f64>,
    pub sale_price: Option<f64>,
    pub category_path: Option<String>,
    pub destinations: JsonValue,
}

#[allow(dead_code)]
impl ProductFixture {
    pub fn new(offer_id: &str, snapshot_date: NaiveDate, destinations: JsonValue) -> Self {
        Self {
            product_id: format!("online:en:US:{offer_id}"),
            offer_id: offer_id.to_string(),
            snapshot_date,
            channel: "online".to_string(),
            content_language: "en".to_string(),
            title: Some(format!("Product {offer_id}")),
            price: Some(10.0),
            sale_price: None,
            category_path: None,
            destinations,
        }
    }

    pub fn channel(mut self, channel: &str) -> Self {
        self.channel = channel.to_string();
        self
    }

    pub fn sale_price(mut self, value: f64) -> Self {
        self.sale_price = Some(value);
        self
    }

    pub fn category_path(mut self, path: &str) -> Self {
        self.category_path = Some(path.to_string());
        self
    }

    pub async fn insert(self, db: &DatabaseConnection) -> Result<()> {
        let currency = self.price.map(|_| "USD".to_string());
        let sale_currency = self.sale_price.map(|_| "USD".to_string());
        product::ActiveModel {
            id: NotSet,
            account_id: Set(MERCHANT_ID),
            merchant_id: Set(MERCHANT_ID),
            product_id: Set(self.product_id),
            snapshot_date: Set(self.snapshot_date),
            offer_id: Set(self.offer_id),
            title: Set(self.title),
            brand: Set(Some("Acme".to_string())),
            gtin: Set(None),
            channel: Set(self.channel),
            content_language: Set(self.content_language),
            availability: Set(Some("in stock".to_string())),
            price_value: Set(self.price),
            price_currency: Set(currency),
            sale_price_value: Set(self.sale_price),
            sale_price_currency: Set(sale_currency),
            category_path: Set(self.category_path),
            image_link: Set(None),
            custom_attributes: Set(json!({})),
            destinations: Set(self.destinations),
        }
        .insert(db)
        .await?;
        Ok(())
    }
}

/// Inserts one raw ads performance row for the configured customer.
#[allow(dead_code)]
pub async fn insert_stat(
    db: &DatabaseConnection,
    offer_id: &str,
    country_criterion: &str,
    segment_date: NaiveDate,
    impressions: i64,
    clicks: i64,
    cost_micros: i64,
) -> Result<()> {
    shopping_product_stat::ActiveModel {
        id: NotSet,
        customer_id: Set(CUSTOMER_ID),
        merchant_id: Set(MERCHANT_ID),
        channel: Set("ONLINE".to_string()),
        offer_id: Set(offer_id.to_string()),
        country_criterion: Set(country_criterion.to_string()),
        language_criterion: Set(EN_CRITERION.to_string()),
        segment_date: Set(segment_date),
        impressions: Set(impressions),
        clicks: Set(clicks),
        cost_micros: Set(cost_micros),
        conversions: Set(0.0),
        conversions_value: Set(0.0),
    }
    .insert(db)
    .await?;
    Ok(())
}

#[allow(dead_code)]
pub async fn insert_benchmark(
    db: &DatabaseConnection,
    product_id: &str,
    country_code: &str,
    snapshot_date: NaiveDate,
    benchmark: f64,
) -> Result<()> {
    price_competitiveness::ActiveModel {
        id: NotSet,
        account_id: Set(MERCHANT_ID),
        merchant_id: Set(MERCHANT_ID),
        product_id: Set(product_id.to_string()),
        country_code: Set(country_code.to_string()),
        snapshot_date: Set(snapshot_date),
        price_value: Set(Some(10.0)),
        price_currency: Set(Some("USD".to_string())),
        benchmark_price_value: Set(Some(benchmark)),
        benchmark_price_currency: Set(Some("USD".to_string())),
    }
    .insert(db)
    .await?;
    Ok(())
}

#[allow(dead_code)]
pub async fn insert_insight(
    db: &DatabaseConnection,
    product_id: &str,
    snapshot_date: NaiveDate,
    suggested: f64,
    predicted_clicks_change: f64,
) -> Result<()> {
    price_insight::ActiveModel {
        id: NotSet,
        account_id: Set(MERCHANT_ID),
        merchant_id: Set(MERCHANT_ID),
        product_id: Set(product_id.to_string()),
        snapshot_date: Set(snapshot_date),
        price_value: Set(Some(10.0)),
        price_currency: Set(Some("USD".to_string())),
        suggested_price_value: Set(Some(suggested)),
        suggested_price_currency: Set(Some("USD".to_string())),
        predicted_impressions_change_fraction: Set(None),
        predicted_clicks_change_fraction: Set(Some(predicted_clicks_change)),
        predicted_conversions_change_fraction: Set(None),
    }
    .insert(db)
    .await?;
    Ok(())
}

/// Inserts one weekly best-seller rank row.
#[allow(dead_code)]
pub async fn insert_rank(
    db: &DatabaseConnection,
    entity_id: &str,
    rank_date: NaiveDate,
    country_code: &str,
    rank: i64,
    levels: [Option<&str>; 5],
) -> Result<()> {
    let [l1, l2, l3, l4, l5] = levels.map(|level| level.map(str::to_string));
    best_seller::ActiveModel {
        id: NotSet,
        account_id: Set(MERCHANT_ID),
        rank_date: Set(rank_date),
        country_code: Set(country_code.to_string()),
        category_id: Set(166),
        entity_id: Set(entity_id.to_string()),
        title: Set(Some(format!("Entity {entity_id}"))),
        brand: Set(Some("Acme".to_string())),
        category_l1: Set(l1),
        category_l2: Set(l2),
        category_l3: Set(l3),
        category_l4: Set(l4),
        category_l5: Set(l5),
        variant_gtins: Set(json!(["00012345678905"])),
        product_inventory_status: Set(Some("IN_STOCK".to_string())),
        brand_inventory_status: Set(Some("IN_STOCK".to_string())),
        rank: Set(rank),
        previous_rank: Set(Some(rank + 1)),
        relative_demand: Set(Some("HIGH".to_string())),
        previous_relative_demand: Set(Some("MEDIUM".to_string())),
        relative_demand_change: Set(Some("RISER".to_string())),
    }
    .insert(db)
    .await?;
    Ok(())
}

#[allow(dead_code)]
pub async fn insert_mapping(
    db: &DatabaseConnection,
    entity_id: &str,
    product_id: &str,
    mapping_date: NaiveDate,
) -> Result<()> {
    entity_product_mapping::ActiveModel {
        id: NotSet,
        account_id: Set(MERCHANT_ID),
        entity_id: Set(entity_id.to_string()),
        product_id: Set(product_id.to_string()),
        mapping_date: Set(mapping_date),
    }
    .insert(db)
    .await?;
    Ok(())
}
