//! Reference repository for the geo-target and language tables
//!
//! These tables are global (not scoped by merchant or customer) and are
//! replaced wholesale when new reference exports are loaded.

use std::sync::Arc;

use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, QueryOrder, TransactionTrait};

use crate::error::PipelineError;
use crate::models::{geo_target, language_code};
use crate::pipeline::reference::{GeoTarget, GeoTargetLookup, LanguageCode, LanguageLookup};

use super::INSERT_BATCH_SIZE;

#[derive(Debug, Clone)]
pub struct ReferenceRepository {
    pub db: Arc<DatabaseConnection>,
}

impl ReferenceRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Builds the parent-id to country-code lookup from the stored table.
    pub async fn geo_lookup(&self) -> Result<GeoTargetLookup, PipelineError> {
        let rows = geo_target::Entity::find()
            .order_by_asc(geo_target::Column::CriterionId)
            .all(&*self.db)
            .await?;
        let targets: Vec<GeoTarget> = rows
            .into_iter()
            .map(|row| GeoTarget {
                criterion_id: row.criterion_id,
                parent_id: row.parent_id,
                country_code: row.country_code,
            })
            .collect();
        Ok(GeoTargetLookup::new(&targets))
    }

    pub async fn language_lookup(&self) -> Result<LanguageLookup, PipelineError> {
        let rows = language_code::Entity::find()
            .order_by_asc(language_code::Column::CriterionId)
            .all(&*self.db)
            .await?;
        let languages: Vec<LanguageCode> = rows
            .into_iter()
            .map(|row| LanguageCode {
                criterion_id: row.criterion_id,
                language_code: row.language_code,
            })
            .collect();
        Ok(LanguageLookup::new(&languages))
    }

    /// Replaces both reference tables in one transaction.
    pub async fn replace_all(
        &self,
        geo_targets: Vec<geo_target::Model>,
        languages: Vec<language_code::Model>,
    ) -> Result<(), PipelineError> {
        let txn = self.db.begin().await?;

        geo_target::Entity::delete_many().exec(&txn).await?;
        for chunk in geo_targets.chunks(INSERT_BATCH_SIZE) {
            let batch = chunk
                .iter()
                .cloned()
                .map(|model| geo_target::ActiveModel::from(model).reset_all());
            geo_target::Entity::insert_many(batch).exec(&txn).await?;
        }

        language_code::Entity::delete_many().exec(&txn).await?;
        for chunk in languages.chunks(INSERT_BATCH_SIZE) {
            let batch = chunk
                .iter()
                .cloned()
                .map(|model| language_code::ActiveModel::from(model).reset_all());
            language_code::Entity::insert_many(batch).exec(&txn).await?;
        }

        txn.commit().await?;
        Ok(())
    }
}
