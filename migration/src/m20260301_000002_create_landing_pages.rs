use sea_orm_migration::{prelude::*, schema::*};

use crate::m20260301_000001_create_offers::Offers;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(LandingPages::Table)
                    .if_not_exists()
                    .col(pk_auto(LandingPages::Id))
                    .col(integer(LandingPages::UserId))
                    .col(integer(LandingPages::OfferId))
                    .col(string(LandingPages::Title))
                    .col(text(LandingPages::Headline))
                    .col(text_null(LandingPages::Subheadline))
                    .col(text(LandingPages::BodyCopy))
                    .col(string(LandingPages::CallToAction))
                    .col(text_null(LandingPages::ThumbnailUrl))
                    .col(text_null(LandingPages::HeroImageUrl))
                    .col(string(LandingPages::Template))
                    .col(string_len(LandingPages::Niche, 32))
                    .col(integer(LandingPages::Views).default(0))
                    .col(integer(LandingPages::Clicks).default(0))
                    .col(integer(LandingPages::Conversions).default(0))
                    .col(string_len(LandingPages::Status, 32).default("draft"))
                    .col(timestamp_null(LandingPages::PublishedAt))
                    .col(timestamp(LandingPages::CreatedAt).default(Expr::current_timestamp()))
                    .col(timestamp(LandingPages::UpdatedAt).default(Expr::current_timestamp()))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_landing_pages_offer")
                            .from(LandingPages::Table, LandingPages::OfferId)
                            .to(Offers::Table, Offers::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(AdCopyVariations::Table)
                    .if_not_exists()
                    .col(pk_auto(AdCopyVariations::Id))
                    .col(integer(AdCopyVariations::UserId))
                    .col(integer(AdCopyVariations::LandingPageId))
                    .col(text(AdCopyVariations::Headline))
                    .col(text(AdCopyVariations::BodyCopy))
                    .col(string(AdCopyVariations::CallToAction))
                    .col(integer(AdCopyVariations::Impressions).default(0))
                    .col(integer(AdCopyVariations::Clicks).default(0))
                    .col(integer(AdCopyVariations::Conversions).default(0))
                    .col(boolean(AdCopyVariations::IsControl).default(false))
                    .col(string_len(AdCopyVariations::Status, 32).default("active"))
                    .col(timestamp(AdCopyVariations::CreatedAt).default(Expr::current_timestamp()))
                    .col(timestamp(AdCopyVariations::UpdatedAt).default(Expr::current_timestamp()))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_ad_copy_variations_landing_page")
                            .from(AdCopyVariations::Table, AdCopyVariations::LandingPageId)
                            .to(LandingPages::Table, LandingPages::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_landing_pages_user_offer")
                    .table(LandingPages::Table)
                    .col(LandingPages::UserId)
                    .col(LandingPages::OfferId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(AdCopyVariations::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(LandingPages::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub(crate) enum LandingPages {
    Table,
    Id,
    UserId,
    OfferId,
    Title,
    Headline,
    Subheadline,
    BodyCopy,
    CallToAction,
    ThumbnailUrl,
    HeroImageUrl,
    Template,
    Niche,
    Views,
    Clicks,
    Conversions,
    Status,
    PublishedAt,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum AdCopyVariations {
    Table,
    Id,
    UserId,
    LandingPageId,
    Headline,
    BodyCopy,
    CallToAction,
    Impressions,
    Clicks,
    Conversions,
    IsControl,
    Status,
    CreatedAt,
    UpdatedAt,
}
