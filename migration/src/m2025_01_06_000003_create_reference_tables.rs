//! Migration to create the static reference tables.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(GeoTargets::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(GeoTargets::CriterionId)
                            .big_integer()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(GeoTargets::Name).text().not_null())
                    .col(ColumnDef::new(GeoTargets::CanonicalName).text().not_null())
                    .col(ColumnDef::new(GeoTargets::ParentId).big_integer().null())
                    .col(ColumnDef::new(GeoTargets::CountryCode).text().null())
                    .col(ColumnDef::new(GeoTargets::TargetType).text().null())
                    .col(ColumnDef::new(GeoTargets::Status).text().null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_geo_targets_parent_id")
                    .table(GeoTargets::Table)
                    .col(GeoTargets::ParentId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(LanguageCodes::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(LanguageCodes::CriterionId)
                            .big_integer()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(LanguageCodes::LanguageName).text().not_null())
                    .col(ColumnDef::new(LanguageCodes::LanguageCode).text().not_null())
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(LanguageCodes::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(GeoTargets::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum GeoTargets {
    Table,
    CriterionId,
    Name,
    CanonicalName,
    ParentId,
    CountryCode,
    TargetType,
    Status,
}

#[derive(DeriveIden)]
enum LanguageCodes {
    Table,
    CriterionId,
    LanguageName,
    LanguageCode,
}
