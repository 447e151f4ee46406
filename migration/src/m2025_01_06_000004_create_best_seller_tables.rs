//! Migration to create the best-seller ranking and entity mapping partitions.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(BestSellers::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(BestSellers::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(BestSellers::AccountId).big_integer().not_null())
                    .col(ColumnDef::new(BestSellers::RankDate).date().not_null())
                    .col(ColumnDef::new(BestSellers::CountryCode).text().not_null())
                    .col(ColumnDef::new(BestSellers::CategoryId).big_integer().not_null())
                    .col(ColumnDef::new(BestSellers::EntityId).text().not_null())
                    .col(ColumnDef::new(BestSellers::Title).text().null())
                    .col(ColumnDef::new(BestSellers::Brand).text().null())
                    .col(ColumnDef::new(BestSellers::CategoryL1).text().null())
                    .col(ColumnDef::new(BestSellers::CategoryL2).text().null())
                    .col(ColumnDef::new(BestSellers::CategoryL3).text().null())
                    .col(ColumnDef::new(BestSellers::CategoryL4).text().null())
                    .col(ColumnDef::new(BestSellers::CategoryL5).text().null())
                    .col(ColumnDef::new(BestSellers::VariantGtins).json_binary().not_null())
                    .col(ColumnDef::new(BestSellers::ProductInventoryStatus).text().null())
                    .col(ColumnDef::new(BestSellers::BrandInventoryStatus).text().null())
                    .col(ColumnDef::new(BestSellers::Rank).big_integer().not_null())
                    .col(ColumnDef::new(BestSellers::PreviousRank).big_integer().null())
                    .col(ColumnDef::new(BestSellers::RelativeDemand).text().null())
                    .col(ColumnDef::new(BestSellers::PreviousRelativeDemand).text().null())
                    .col(ColumnDef::new(BestSellers::RelativeDemandChange).text().null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_best_sellers_account_date")
                    .table(BestSellers::Table)
                    .col(BestSellers::AccountId)
                    .col(BestSellers::RankDate)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(EntityProductMappings::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(EntityProductMappings::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(EntityProductMappings::AccountId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(EntityProductMappings::EntityId).text().not_null())
                    .col(ColumnDef::new(EntityProductMappings::ProductId).text().not_null())
                    .col(ColumnDef::new(EntityProductMappings::MappingDate).date().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_entity_product_mappings_entity")
                    .table(EntityProductMappings::Table)
                    .col(EntityProductMappings::AccountId)
                    .col(EntityProductMappings::EntityId)
                    .col(EntityProductMappings::MappingDate)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(EntityProductMappings::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(BestSellers::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum BestSellers {
    Table,
    Id,
    AccountId,
    RankDate,
    CountryCode,
    CategoryId,
    EntityId,
    Title,
    Brand,
    CategoryL1,
    CategoryL2,
    CategoryL3,
    CategoryL4,
    CategoryL5,
    VariantGtins,
    ProductInventoryStatus,
    BrandInventoryStatus,
    Rank,
    PreviousRank,
    RelativeDemand,
    PreviousRelativeDemand,
    RelativeDemandChange,
}

#[derive(DeriveIden)]
enum EntityProductMappings {
    Table,
    Id,
    AccountId,
    EntityId,
    ProductId,
    MappingDate,
}
