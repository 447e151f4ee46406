//! Migration to create the materialized output relations.
//!
//! Both tables are fully replaced on every run. `row_index` is assigned by the
//! materializer after a deterministic sort, so it doubles as a stable key.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(InventoryView::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(InventoryView::RowIndex)
                            .big_integer()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(InventoryView::SnapshotDate).date().not_null())
                    .col(ColumnDef::new(InventoryView::MerchantId).big_integer().not_null())
                    .col(ColumnDef::new(InventoryView::ProductId).text().not_null())
                    .col(ColumnDef::new(InventoryView::OfferId).text().not_null())
                    .col(ColumnDef::new(InventoryView::Title).text().null())
                    .col(ColumnDef::new(InventoryView::Brand).text().null())
                    .col(ColumnDef::new(InventoryView::Gtin).text().null())
                    .col(ColumnDef::new(InventoryView::Channel).text().not_null())
                    .col(ColumnDef::new(InventoryView::ContentLanguage).text().not_null())
                    .col(ColumnDef::new(InventoryView::Availability).text().null())
                    .col(ColumnDef::new(InventoryView::TargetedCountry).text().not_null())
                    .col(ColumnDef::new(InventoryView::IsDisapproved).boolean().not_null())
                    .col(ColumnDef::new(InventoryView::PriceValue).double().null())
                    .col(ColumnDef::new(InventoryView::PriceCurrency).text().null())
                    .col(ColumnDef::new(InventoryView::SalePriceValue).double().null())
                    .col(ColumnDef::new(InventoryView::SalePriceCurrency).text().null())
                    .col(ColumnDef::new(InventoryView::CurrentPriceValue).double().null())
                    .col(ColumnDef::new(InventoryView::CurrentPriceCurrency).text().null())
                    .col(ColumnDef::new(InventoryView::CategoryL1).text().null())
                    .col(ColumnDef::new(InventoryView::CategoryL2).text().null())
                    .col(ColumnDef::new(InventoryView::CategoryL3).text().null())
                    .col(ColumnDef::new(InventoryView::CategoryL4).text().null())
                    .col(ColumnDef::new(InventoryView::CategoryL5).text().null())
                    .col(ColumnDef::new(InventoryView::FinalCategory).text().null())
                    .col(ColumnDef::new(InventoryView::ImageLink).text().null())
                    .col(
                        ColumnDef::new(InventoryView::CustomAttributes)
                            .json_binary()
                            .not_null(),
                    )
                    .col(ColumnDef::new(InventoryView::BenchmarkPriceValue).double().null())
                    .col(ColumnDef::new(InventoryView::BenchmarkPriceCurrency).text().null())
                    .col(ColumnDef::new(InventoryView::SuggestedPriceValue).double().null())
                    .col(ColumnDef::new(InventoryView::SuggestedPriceCurrency).text().null())
                    .col(
                        ColumnDef::new(InventoryView::PredictedImpressionsChangeFraction)
                            .double()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(InventoryView::PredictedClicksChangeFraction)
                            .double()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(InventoryView::PredictedConversionsChangeFraction)
                            .double()
                            .null(),
                    )
                    .col(ColumnDef::new(InventoryView::Impressions7d).big_integer().null())
                    .col(ColumnDef::new(InventoryView::Clicks7d).big_integer().null())
                    .col(ColumnDef::new(InventoryView::Cost7d).double().null())
                    .col(ColumnDef::new(InventoryView::Conversions7d).double().null())
                    .col(ColumnDef::new(InventoryView::ConversionsValue7d).double().null())
                    .col(ColumnDef::new(InventoryView::Ctr7d).double().null())
                    .col(ColumnDef::new(InventoryView::Impressions30d).big_integer().null())
                    .col(ColumnDef::new(InventoryView::Clicks30d).big_integer().null())
                    .col(ColumnDef::new(InventoryView::Cost30d).double().null())
                    .col(ColumnDef::new(InventoryView::Conversions30d).double().null())
                    .col(ColumnDef::new(InventoryView::ConversionsValue30d).double().null())
                    .col(ColumnDef::new(InventoryView::Ctr30d).double().null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(BestSellersWeeklyProductView::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(BestSellersWeeklyProductView::RowIndex)
                            .big_integer()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(BestSellersWeeklyProductView::RankDate)
                            .date()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(BestSellersWeeklyProductView::CountryCode)
                            .text()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(BestSellersWeeklyProductView::CategoryId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(BestSellersWeeklyProductView::EntityId)
                            .text()
                            .not_null(),
                    )
                    .col(ColumnDef::new(BestSellersWeeklyProductView::Title).text().null())
                    .col(ColumnDef::new(BestSellersWeeklyProductView::Brand).text().null())
                    .col(ColumnDef::new(BestSellersWeeklyProductView::CategoryL1).text().null())
                    .col(ColumnDef::new(BestSellersWeeklyProductView::CategoryL2).text().null())
                    .col(ColumnDef::new(BestSellersWeeklyProductView::CategoryL3).text().null())
                    .col(ColumnDef::new(BestSellersWeeklyProductView::CategoryL4).text().null())
                    .col(ColumnDef::new(BestSellersWeeklyProductView::CategoryL5).text().null())
                    .col(
                        ColumnDef::new(BestSellersWeeklyProductView::FullCategory)
                            .text()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(BestSellersWeeklyProductView::VariantGtins)
                            .json_binary()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(BestSellersWeeklyProductView::ProductInventoryStatus)
                            .text()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(BestSellersWeeklyProductView::BrandInventoryStatus)
                            .text()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(BestSellersWeeklyProductView::Rank)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(BestSellersWeeklyProductView::PreviousRank)
                            .big_integer()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(BestSellersWeeklyProductView::RelativeDemand)
                            .text()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(BestSellersWeeklyProductView::PreviousRelativeDemand)
                            .text()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(BestSellersWeeklyProductView::RelativeDemandChange)
                            .text()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(BestSellersWeeklyProductView::MerchantId)
                            .big_integer()
                            .null(),
                    )
                    .col(ColumnDef::new(BestSellersWeeklyProductView::ProductId).text().null())
                    .col(ColumnDef::new(BestSellersWeeklyProductView::OfferId).text().null())
                    .col(
                        ColumnDef::new(BestSellersWeeklyProductView::ProductTitle)
                            .text()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(BestSellersWeeklyProductView::Availability)
                            .text()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(BestSellersWeeklyProductView::IsDisapproved)
                            .boolean()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(BestSellersWeeklyProductView::CurrentPriceValue)
                            .double()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(BestSellersWeeklyProductView::CurrentPriceCurrency)
                            .text()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(BestSellersWeeklyProductView::BenchmarkPriceValue)
                            .double()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(BestSellersWeeklyProductView::BenchmarkPriceCurrency)
                            .text()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(BestSellersWeeklyProductView::Impressions7d)
                            .big_integer()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(BestSellersWeeklyProductView::Clicks7d)
                            .big_integer()
                            .null(),
                    )
                    .col(ColumnDef::new(BestSellersWeeklyProductView::Cost7d).double().null())
                    .col(
                        ColumnDef::new(BestSellersWeeklyProductView::Conversions7d)
                            .double()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(BestSellersWeeklyProductView::ConversionsValue7d)
                            .double()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(BestSellersWeeklyProductView::Impressions30d)
                            .big_integer()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(BestSellersWeeklyProductView::Clicks30d)
                            .big_integer()
                            .null(),
                    )
                    .col(ColumnDef::new(BestSellersWeeklyProductView::Cost30d).double().null())
                    .col(
                        ColumnDef::new(BestSellersWeeklyProductView::Conversions30d)
                            .double()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(BestSellersWeeklyProductView::ConversionsValue30d)
                            .double()
                            .null(),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(
                Table::drop()
                    .table(BestSellersWeeklyProductView::Table)
                    .to_owned(),
            )
            .await?;
        manager
            .drop_table(Table::drop().table(InventoryView::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum InventoryView {
    Table,
    RowIndex,
    SnapshotDate,
    MerchantId,
    ProductId,
    OfferId,
    Title,
    Brand,
    Gtin,
    Channel,
    ContentLanguage,
    Availability,
    TargetedCountry,
    IsDisapproved,
    PriceValue,
    PriceCurrency,
    SalePriceValue,
    SalePriceCurrency,
    CurrentPriceValue,
    CurrentPriceCurrency,
    CategoryL1,
    CategoryL2,
    CategoryL3,
    CategoryL4,
    CategoryL5,
    FinalCategory,
    ImageLink,
    CustomAttributes,
    BenchmarkPriceValue,
    BenchmarkPriceCurrency,
    SuggestedPriceValue,
    SuggestedPriceCurrency,
    PredictedImpressionsChangeFraction,
    PredictedClicksChangeFraction,
    PredictedConversionsChangeFraction,
    #[sea_orm(iden = "impressions_7d")]
    Impressions7d,
    #[sea_orm(iden = "clicks_7d")]
    Clicks7d,
    #[sea_orm(iden = "cost_7d")]
    Cost7d,
    #[sea_orm(iden = "conversions_7d")]
    Conversions7d,
    #[sea_orm(iden = "conversions_value_7d")]
    ConversionsValue7d,
    #[sea_orm(iden = "ctr_7d")]
    Ctr7d,
    #[sea_orm(iden = "impressions_30d")]
    Impressions30d,
    #[sea_orm(iden = "clicks_30d")]
    Clicks30d,
    #[sea_orm(iden = "cost_30d")]
    Cost30d,
    #[sea_orm(iden = "conversions_30d")]
    Conversions30d,
    #[sea_orm(iden = "conversions_value_30d")]
    ConversionsValue30d,
    #[sea_orm(iden = "ctr_30d")]
    Ctr30d,
}

#[derive(DeriveIden)]
enum BestSellersWeeklyProductView {
    Table,
    RowIndex,
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
    FullCategory,
    VariantGtins,
    ProductInventoryStatus,
    BrandInventoryStatus,
    Rank,
    PreviousRank,
    RelativeDemand,
    PreviousRelativeDemand,
    RelativeDemandChange,
    MerchantId,
    ProductId,
    OfferId,
    ProductTitle,
    Availability,
    IsDisapproved,
    CurrentPriceValue,
    CurrentPriceCurrency,
    BenchmarkPriceValue,
    BenchmarkPriceCurrency,
    #[sea_orm(iden = "impressions_7d")]
    Impressions7d,
    #[sea_orm(iden = "clicks_7d")]
    Clicks7d,
    #[sea_orm(iden = "cost_7d")]
    Cost7d,
    #[sea_orm(iden = "conversions_7d")]
    Conversions7d,
    #[sea_orm(iden = "conversions_value_7d")]
    ConversionsValue7d,
    #[sea_orm(iden = "impressions_30d")]
    Impressions30d,
    #[sea_orm(iden = "clicks_30d")]
    Clicks30d,
    #[sea_orm(iden = "cost_30d")]
    Cost30d,
    #[sea_orm(iden = "conversions_30d")]
    Conversions30d,
    #[sea_orm(iden = "conversions_value_30d")]
    ConversionsValue30d,
}
