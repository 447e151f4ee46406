//! Tests for loading the geo-target and language reference exports.

use anyhow::Result;
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use tempfile::TempDir;

use merchant_views::error::PipelineError;
use merchant_views::repositories::ReferenceRepository;
use merchant_views::seeds::seed_reference_tables;

#[path = "test_utils/mod.rs"]
mod test_utils;
use test_utils::setup_test_db;

fn data_file(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data").join(name)
}

#[tokio::test]
async fn bundled_exports_populate_lookups() -> Result<()> {
    let db = setup_test_db().await?;
    let summary = seed_reference_tables(
        &db,
        &data_file("geo_targets.csv"),
        &data_file("language_codes.csv"),
    )
    .await?;
    assert_eq!(summary.language_codes, 7);
    assert!(summary.geo_targets > 0);

    let repo = ReferenceRepository::new(Arc::new(db));
    let geo = repo.geo_lookup().await?;
    let languages = repo.language_lookup().await?;

    assert_eq!(geo.resolve("geoTargetConstants/2276"), Some("DE"));
    assert_eq!(geo.resolve("2840"), Some("US"));
    assert_eq!(languages.resolve("languageConstants/1001"), Some("de"));
    assert_eq!(languages.resolve("languageConstants/9999"), None);
    Ok(())
}

#[tokio::test]
async fn reloading_replaces_previous_content() -> Result<()> {
    let db = setup_test_db().await?;
    seed_reference_tables(
        &db,
        &data_file("geo_targets.csv"),
        &data_file("language_codes.csv"),
    )
    .await?;

    let dir = TempDir::new()?;
    let geo = dir.path().join("geo.csv");
    let lang = dir.path().join("lang.csv");
    fs::write(
        &geo,
        "Criteria ID,Name,Canonical Name,Parent ID,Country Code,Target Type,Status\n\
         1006886,Lyon,\"Lyon,France\",2250,FR,City,Active\n",
    )?;
    fs::write(&lang, "Language name,Language code,Criterion ID\nFrench,fr,1002\n")?;

    let summary = seed_reference_tables(&db, &geo, &lang).await?;
    assert_eq!(summary.geo_targets, 1);
    assert_eq!(summary.language_codes, 1);

    let repo = ReferenceRepository::new(Arc::new(db));
    let geo_lookup = repo.geo_lookup().await?;
    assert_eq!(geo_lookup.len(), 1);
    assert_eq!(geo_lookup.resolve("2250"), Some("FR"));
    assert_eq!(geo_lookup.resolve("2840"), None);
    assert_eq!(repo.language_lookup().await?.len(), 1);
    Ok(())
}

#[tokio::test]
async fn malformed_export_leaves_tables_untouched() -> Result<()> {
    let db = setup_test_db().await?;
    seed_reference_tables(
        &db,
        &data_file("geo_targets.csv"),
        &data_file("language_codes.csv"),
    )
    .await?;

    let dir = TempDir::new()?;
    let lang = dir.path().join("lang.csv");
    fs::write(&lang, "Language name,Language code,Criterion ID\nFrench,fr,abc\n")?;

    let err = seed_reference_tables(&db, &data_file("geo_targets.csv"), &lang)
        .await
        .unwrap_err();
    assert!(matches!(err, PipelineError::ReferenceRecord { line: 2, .. }));

    let repo = ReferenceRepository::new(Arc::new(db));
    assert_eq!(repo.language_lookup().await?.len(), 7);
    Ok(())
}
