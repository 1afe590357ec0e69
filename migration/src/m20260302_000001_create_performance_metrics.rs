use sea_orm_migration::{prelude::*, schema::*};

use crate::m20260301_000001_create_offers::Offers;
use crate::m20260301_000002_create_landing_pages::LandingPages;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(PerformanceMetrics::Table)
                    .if_not_exists()
                    .col(pk_auto(PerformanceMetrics::Id))
                    .col(integer(PerformanceMetrics::UserId))
                    .col(integer(PerformanceMetrics::OfferId))
                    .col(integer_null(PerformanceMetrics::LandingPageId))
                    .col(timestamp(PerformanceMetrics::Date))
                    .col(big_integer(PerformanceMetrics::Impressions).default(0))
                    .col(big_integer(PerformanceMetrics::Clicks).default(0))
                    .col(big_integer(PerformanceMetrics::UniqueVisitors).default(0))
                    .col(big_integer(PerformanceMetrics::Conversions).default(0))
                    .col(big_integer(PerformanceMetrics::Revenue).default(0))
                    .col(big_integer(PerformanceMetrics::AdSpend).default(0))
                    // Derived at write time
                    .col(big_integer(PerformanceMetrics::Ctr).default(0))
                    .col(big_integer(PerformanceMetrics::ConversionRate).default(0))
                    .col(big_integer(PerformanceMetrics::Epc).default(0))
                    .col(big_integer(PerformanceMetrics::Cpc).default(0))
                    .col(big_integer(PerformanceMetrics::Roi).default(0))
                    .col(timestamp(PerformanceMetrics::CreatedAt).default(Expr::current_timestamp()))
                    .col(timestamp(PerformanceMetrics::UpdatedAt).default(Expr::current_timestamp()))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_performance_metrics_offer")
                            .from(PerformanceMetrics::Table, PerformanceMetrics::OfferId)
                            .to(Offers::Table, Offers::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_performance_metrics_landing_page")
                            .from(PerformanceMetrics::Table, PerformanceMetrics::LandingPageId)
                            .to(LandingPages::Table, LandingPages::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_performance_metrics_user_offer_date")
                    .table(PerformanceMetrics::Table)
                    .col(PerformanceMetrics::UserId)
                    .col(PerformanceMetrics::OfferId)
                    .col(PerformanceMetrics::Date)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(PerformanceMetrics::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum PerformanceMetrics {
    Table,
    Id,
    UserId,
    OfferId,
    LandingPageId,
    Date,
    Impressions,
    Clicks,
    UniqueVisitors,
    Conversions,
    Revenue,
    AdSpend,
    Ctr,
    ConversionRate,
    Epc,
    Cpc,
    Roi,
    CreatedAt,
    UpdatedAt,
}
