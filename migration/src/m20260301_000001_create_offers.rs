use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Offers::Table)
                    .if_not_exists()
                    .col(pk_auto(Offers::Id))
                    .col(integer(Offers::UserId))
                    .col(string(Offers::ProductName))
                    .col(string(Offers::Vendor))
                    .col(string_null(Offers::ClickbankId))
                    .col(string_len(Offers::Niche, 32))
                    .col(string_len(Offers::Source, 32).default("clickbank"))
                    .col(text_null(Offers::SourceUrl))
                    .col(integer_null(Offers::Gravity))
                    // Money in cents, rates in basis points
                    .col(integer_null(Offers::AvgEarningsPerSale))
                    .col(integer_null(Offers::AvgConversionValue))
                    .col(integer_null(Offers::CommissionRate))
                    .col(integer_null(Offers::RebillRate))
                    .col(text_null(Offers::SalesPageUrl))
                    .col(text_null(Offers::AffiliatePageUrl))
                    .col(text_null(Offers::Description))
                    .col(text_null(Offers::TargetAudience))
                    .col(integer_null(Offers::EvaluationScore))
                    .col(string_len(Offers::RecommendationStatus, 32).default("pending"))
                    .col(json_null(Offers::Evaluation))
                    .col(text_null(Offers::Notes))
                    .col(string_len(Offers::Status, 32).default("active"))
                    .col(timestamp(Offers::CreatedAt).default(Expr::current_timestamp()))
                    .col(timestamp(Offers::UpdatedAt).default(Expr::current_timestamp()))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_offers_user_id")
                    .table(Offers::Table)
                    .col(Offers::UserId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Offers::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub(crate) enum Offers {
    Table,
    Id,
    UserId,
    ProductName,
    Vendor,
    ClickbankId,
    Niche,
    Source,
    SourceUrl,
    Gravity,
    AvgEarningsPerSale,
    AvgConversionValue,
    CommissionRate,
    RebillRate,
    SalesPageUrl,
    AffiliatePageUrl,
    Description,
    TargetAudience,
    EvaluationScore,
    RecommendationStatus,
    Evaluation,
    Notes,
    Status,
    CreatedAt,
    UpdatedAt,
}
