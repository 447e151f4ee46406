//! End-to-end materialization of the weekly best-sellers view over SQLite.

use anyhow::Result;

use merchant_views::materializer::{Materializer, ViewKind};
use merchant_views::models::best_sellers_view;
use merchant_views::repositories::{RunScope, ViewRepository};

#[path = "test_utils/mod.rs"]
mod test_utils;
use test_utils::{
    MERCHANT_ID, ProductFixture, US_CRITERION, date, insert_benchmark, insert_mapping,
    insert_rank, insert_stat, namespace, setup_test_db_arc, shopping,
};

const LEVELS: [Option<&str>; 5] = [Some("Apparel"), Some("Shoes"), None, None, None];

async fn materialize_best_sellers(
    db: &std::sync::Arc<sea_orm::DatabaseConnection>,
) -> Result<Vec<best_sellers_view::Model>> {
    Materializer::new(db.clone(), namespace(), RunScope::AllPartitions)
        .run(&[ViewKind::BestSellers])
        .await?;
    Ok(ViewRepository::new(db.clone()).list_best_sellers().await?)
}

#[tokio::test]
async fn unmapped_entity_keeps_rank_with_null_product() -> Result<()> {
    let db = setup_test_db_arc().await?;
    insert_rank(&db, "E1", date(2025, 3, 10), "US", 1, LEVELS).await?;

    let rows = materialize_best_sellers(&db).await?;

    assert_eq!(rows.len(), 1);
    let row = &rows[0];
    assert_eq!(row.entity_id, "E1");
    assert_eq!(row.rank, 1);
    assert_eq!(row.full_category, "Apparel > Shoes");
    assert_eq!(row.variant_gtins, serde_json::json!(["00012345678905"]));
    assert_eq!(row.product_id, None);
    assert_eq!(row.merchant_id, None);
    assert_eq!(row.offer_id, None);
    assert_eq!(row.current_price_value, None);
    assert_eq!(row.impressions_7d, None);
    assert_eq!(row.impressions_30d, None);
    Ok(())
}

#[tokio::test]
async fn mapped_entity_carries_catalog_and_performance() -> Result<()> {
    let db = setup_test_db_arc().await?;
    let day = date(2025, 3, 10);
    let fixture = ProductFixture::new("SKU1", day, shopping(&["US"], &["DE"]));
    let product_id = fixture.product_id.clone();
    fixture.insert(&db).await?;
    insert_benchmark(&db, &product_id, "US", day, 11.0).await?;
    insert_stat(&db, "SKU1", US_CRITERION, date(2025, 3, 9), 300, 30, 4_000_000).await?;
    insert_rank(&db, "E1", day, "US", 3, LEVELS).await?;
    insert_mapping(&db, "E1", &product_id, day).await?;

    let rows = materialize_best_sellers(&db).await?;

    assert_eq!(rows.len(), 1);
    let row = &rows[0];
    assert_eq!(row.product_id.as_deref(), Some(product_id.as_str()));
    assert_eq!(row.merchant_id, Some(MERCHANT_ID));
    assert_eq!(row.offer_id.as_deref(), Some("SKU1"));
    assert_eq!(row.is_disapproved, Some(false));
    assert_eq!(row.current_price_value, Some(10.0));
    assert_eq!(row.benchmark_price_value, Some(11.0));
    assert_eq!(row.benchmark_price_currency.as_deref(), Some("USD"));
    assert_eq!(row.impressions_7d, Some(300));
    assert_eq!(row.clicks_7d, Some(30));
    assert_eq!(row.cost_7d, Some(4.0));
    assert_eq!(row.impressions_30d, Some(300));
    assert_eq!(row.cost_30d, Some(4.0));
    Ok(())
}

#[tokio::test]
async fn mapping_from_another_week_does_not_match() -> Result<()> {
    let db = setup_test_db_arc().await?;
    let day = date(2025, 3, 10);
    let fixture = ProductFixture::new("SKU1", day, shopping(&["US"], &[]));
    let product_id = fixture.product_id.clone();
    fixture.insert(&db).await?;
    insert_rank(&db, "E1", day, "US", 1, LEVELS).await?;
    insert_mapping(&db, "E1", &product_id, date(2025, 3, 3)).await?;

    let rows = materialize_best_sellers(&db).await?;

    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].product_id, None);
    Ok(())
}

#[tokio::test]
async fn product_not_targeting_rank_country_keeps_only_product_id() -> Result<()> {
    let db = setup_test_db_arc().await?;
    let day = date(2025, 3, 10);
    let fixture = ProductFixture::new("SKU1", day, shopping(&["DE"], &[]));
    let product_id = fixture.product_id.clone();
    fixture.insert(&db).await?;
    insert_rank(&db, "E1", day, "US", 1, LEVELS).await?;
    insert_mapping(&db, "E1", &product_id, day).await?;

    let rows = materialize_best_sellers(&db).await?;

    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].product_id.as_deref(), Some(product_id.as_str()));
    assert_eq!(rows[0].offer_id, None);
    assert_eq!(rows[0].is_disapproved, None);
    Ok(())
}

#[tokio::test]
async fn duplicate_upstream_rows_collapse_and_order_by_rank() -> Result<()> {
    let db = setup_test_db_arc().await?;
    let day = date(2025, 3, 10);
    insert_rank(&db, "E2", day, "US", 2, LEVELS).await?;
    insert_rank(&db, "E1", day, "US", 1, LEVELS).await?;
    insert_rank(&db, "E1", day, "US", 1, LEVELS).await?;
    insert_mapping(&db, "E1", "online:en:US:SKU1", day).await?;
    insert_mapping(&db, "E1", "online:en:US:SKU1", day).await?;

    let rows = materialize_best_sellers(&db).await?;

    let ranked: Vec<(i64, i64, &str)> = rows
        .iter()
        .map(|row| (row.row_index, row.rank, row.entity_id.as_str()))
        .collect();
    assert_eq!(ranked, vec![(0, 1, "E1"), (1, 2, "E2")]);
    Ok(())
}

#[tokio::test]
async fn local_channel_products_still_match_ranks() -> Result<()> {
    let db = setup_test_db_arc().await?;
    let day = date(2025, 3, 10);
    let fixture = ProductFixture::new("SKU1", day, shopping(&["US"], &[])).channel("local");
    let product_id = fixture.product_id.clone();
    fixture.insert(&db).await?;
    insert_rank(&db, "E1", day, "US", 1, LEVELS).await?;
    insert_mapping(&db, "E1", &product_id, day).await?;

    let rows = materialize_best_sellers(&db).await?;
    assert_eq!(rows[0].offer_id.as_deref(), Some("SKU1"));
    Ok(())
}

#[tokio::test]
async fn rerun_over_unchanged_inputs_is_identical() -> Result<()> {
    let db = setup_test_db_arc().await?;
    let day = date(2025, 3, 10);
    let fixture = ProductFixture::new("SKU1", day, shopping(&["US"], &[]));
    let product_id = fixture.product_id.clone();
    fixture.insert(&db).await?;
    insert_rank(&db, "E1", day, "US", 1, LEVELS).await?;
    insert_rank(&db, "E2", day, "US", 2, LEVELS).await?;
    insert_mapping(&db, "E1", &product_id, day).await?;

    let first = materialize_best_sellers(&db).await?;
    let second = materialize_best_sellers(&db).await?;

    assert_eq!(first.len(), 2);
    assert_eq!(first, second);
    Ok(())
}

#[tokio::test]
async fn full_run_reports_both_views() -> Result<()> {
    let db = setup_test_db_arc().await?;
    let day = date(2025, 3, 10);
    ProductFixture::new("SKU1", day, shopping(&["US"], &["DE"]))
        .insert(&db)
        .await?;
    insert_rank(&db, "E1", day, "US", 1, LEVELS).await?;

    let reports = Materializer::new(db.clone(), namespace(), RunScope::AllPartitions)
        .run(&ViewKind::ALL)
        .await?;

    let written: Vec<(ViewKind, usize)> = reports
        .iter()
        .map(|report| (report.view, report.rows_written))
        .collect();
    assert_eq!(
        written,
        vec![(ViewKind::Inventory, 2), (ViewKind::BestSellers, 1)]
    );
    Ok(())
}
