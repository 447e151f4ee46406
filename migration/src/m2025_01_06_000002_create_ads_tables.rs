//! Migration to create the advertising performance partition.
//!
//! `shopping_product_stats` keeps the raw criterion strings exactly as the
//! ads export writes them; resolution to country and language codes happens
//! at materialization time.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ShoppingProductStats::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ShoppingProductStats::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(ShoppingProductStats::CustomerId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ShoppingProductStats::MerchantId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(ShoppingProductStats::Channel).text().not_null())
                    .col(ColumnDef::new(ShoppingProductStats::OfferId).text().not_null())
                    .col(
                        ColumnDef::new(ShoppingProductStats::CountryCriterion)
                            .text()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ShoppingProductStats::LanguageCriterion)
                            .text()
                            .not_null(),
                    )
                    .col(ColumnDef::new(ShoppingProductStats::SegmentDate).date().not_null())
                    .col(
                        ColumnDef::new(ShoppingProductStats::Impressions)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(ShoppingProductStats::Clicks)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(ShoppingProductStats::CostMicros)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(ShoppingProductStats::Conversions)
                            .double()
                            .not_null()
                            .default(0.0),
                    )
                    .col(
                        ColumnDef::new(ShoppingProductStats::ConversionsValue)
                            .double()
                            .not_null()
                            .default(0.0),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_shopping_product_stats_customer_date")
                    .table(ShoppingProductStats::Table)
                    .col(ShoppingProductStats::CustomerId)
                    .col(ShoppingProductStats::SegmentDate)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ShoppingProductStats::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum ShoppingProductStats {
    Table,
    Id,
    CustomerId,
    MerchantId,
    Channel,
    OfferId,
    CountryCriterion,
    LanguageCriterion,
    SegmentDate,
    Impressions,
    Clicks,
    CostMicros,
    Conversions,
    ConversionsValue,
}
