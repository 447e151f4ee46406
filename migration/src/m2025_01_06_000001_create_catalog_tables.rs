//! Migration to create the merchant-center catalog partitions.
//!
//! Creates `products` (one snapshot per product per date, with nested
//! destination statuses stored as JSON), `price_competitiveness` and
//! `price_insights`.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Products::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Products::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Products::AccountId).big_integer().not_null())
                    .col(ColumnDef::new(Products::MerchantId).big_integer().not_null())
                    .col(ColumnDef::new(Products::ProductId).text().not_null())
                    .col(ColumnDef::new(Products::SnapshotDate).date().not_null())
                    .col(ColumnDef::new(Products::OfferId).text().not_null())
                    .col(ColumnDef::new(Products::Title).text().null())
                    .col(ColumnDef::new(Products::Brand).text().null())
                    .col(ColumnDef::new(Products::Gtin).text().null())
                    .col(ColumnDef::new(Products::Channel).text().not_null())
                    .col(ColumnDef::new(Products::ContentLanguage).text().not_null())
                    .col(ColumnDef::new(Products::Availability).text().null())
                    .col(ColumnDef::new(Products::PriceValue).double().null())
                    .col(ColumnDef::new(Products::PriceCurrency).text().null())
                    .col(ColumnDef::new(Products::SalePriceValue).double().null())
                    .col(ColumnDef::new(Products::SalePriceCurrency).text().null())
                    .col(ColumnDef::new(Products::CategoryPath).text().null())
                    .col(ColumnDef::new(Products::ImageLink).text().null())
                    .col(
                        ColumnDef::new(Products::CustomAttributes)
                            .json_binary()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Products::Destinations).json_binary().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_products_snapshot_identity")
                    .table(Products::Table)
                    .col(Products::MerchantId)
                    .col(Products::ProductId)
                    .col(Products::SnapshotDate)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_products_account_date")
                    .table(Products::Table)
                    .col(Products::AccountId)
                    .col(Products::SnapshotDate)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(PriceCompetitiveness::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(PriceCompetitiveness::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(PriceCompetitiveness::AccountId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(PriceCompetitiveness::MerchantId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(PriceCompetitiveness::ProductId).text().not_null())
                    .col(ColumnDef::new(PriceCompetitiveness::CountryCode).text().not_null())
                    .col(ColumnDef::new(PriceCompetitiveness::SnapshotDate).date().not_null())
                    .col(ColumnDef::new(PriceCompetitiveness::PriceValue).double().null())
                    .col(ColumnDef::new(PriceCompetitiveness::PriceCurrency).text().null())
                    .col(
                        ColumnDef::new(PriceCompetitiveness::BenchmarkPriceValue)
                            .double()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(PriceCompetitiveness::BenchmarkPriceCurrency)
                            .text()
                            .null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_price_competitiveness_lookup")
                    .table(PriceCompetitiveness::Table)
                    .col(PriceCompetitiveness::AccountId)
                    .col(PriceCompetitiveness::SnapshotDate)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(PriceInsights::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(PriceInsights::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(PriceInsights::AccountId).big_integer().not_null())
                    .col(ColumnDef::new(PriceInsights::MerchantId).big_integer().not_null())
                    .col(ColumnDef::new(PriceInsights::ProductId).text().not_null())
                    .col(ColumnDef::new(PriceInsights::SnapshotDate).date().not_null())
                    .col(ColumnDef::new(PriceInsights::PriceValue).double().null())
                    .col(ColumnDef::new(PriceInsights::PriceCurrency).text().null())
                    .col(ColumnDef::new(PriceInsights::SuggestedPriceValue).double().null())
                    .col(ColumnDef::new(PriceInsights::SuggestedPriceCurrency).text().null())
                    .col(
                        ColumnDef::new(PriceInsights::PredictedImpressionsChangeFraction)
                            .double()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(PriceInsights::PredictedClicksChangeFraction)
                            .double()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(PriceInsights::PredictedConversionsChangeFraction)
                            .double()
                            .null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_price_insights_lookup")
                    .table(PriceInsights::Table)
                    .col(PriceInsights::AccountId)
                    .col(PriceInsights::SnapshotDate)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(PriceInsights::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(PriceCompetitiveness::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Products::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Products {
    Table,
    Id,
    AccountId,
    MerchantId,
    ProductId,
    SnapshotDate,
    OfferId,
    Title,
    Brand,
    Gtin,
    Channel,
    ContentLanguage,
    Availability,
    PriceValue,
    PriceCurrency,
    SalePriceValue,
    SalePriceCurrency,
    CategoryPath,
    ImageLink,
    CustomAttributes,
    Destinations,
}

#[derive(DeriveIden)]
enum PriceCompetitiveness {
    Table,
    Id,
    AccountId,
    MerchantId,
    ProductId,
    CountryCode,
    SnapshotDate,
    PriceValue,
    PriceCurrency,
    BenchmarkPriceValue,
    BenchmarkPriceCurrency,
}

#[derive(DeriveIden)]
enum PriceInsights {
    Table,
    Id,
    AccountId,
    MerchantId,
    ProductId,
    SnapshotDate,
    PriceValue,
    PriceCurrency,
    SuggestedPriceValue,
    SuggestedPriceCurrency,
    PredictedImpressionsChangeFraction,
    PredictedClicksChangeFraction,
    PredictedConversionsChangeFraction,
}
