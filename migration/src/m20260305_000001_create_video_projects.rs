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
                    .table(VideoProjects::Table)
                    .if_not_exists()
                    .col(pk_auto(VideoProjects::Id))
                    .col(integer(VideoProjects::UserId))
                    .col(integer(VideoProjects::OfferId))
                    .col(string(VideoProjects::Title))
                    .col(string_len(VideoProjects::Niche, 32))
                    .col(text(VideoProjects::Script))
                    .col(integer_null(VideoProjects::ScriptWordCount))
                    .col(string_len_null(VideoProjects::PromptTemplate, 32))
                    .col(text_null(VideoProjects::VoiceoverUrl))
                    .col(string_null(VideoProjects::VoiceId))
                    .col(string_null(VideoProjects::VoiceName))
                    .col(text_null(VideoProjects::VideoUrl))
                    .col(text_null(VideoProjects::ThumbnailUrl))
                    .col(integer_null(VideoProjects::Duration))
                    .col(string_len_null(VideoProjects::VideoModel, 32))
                    .col(string_null(VideoProjects::VideoTaskId))
                    .col(text_null(VideoProjects::TrackingUrl))
                    .col(string_null(VideoProjects::UtmSource))
                    .col(string_null(VideoProjects::UtmMedium))
                    .col(string_null(VideoProjects::UtmCampaign))
                    .col(string_null(VideoProjects::UtmTerm))
                    .col(string_null(VideoProjects::UtmContent))
                    .col(integer(VideoProjects::Views).default(0))
                    .col(integer(VideoProjects::Clicks).default(0))
                    .col(integer(VideoProjects::Conversions).default(0))
                    .col(big_integer(VideoProjects::AdSpend).default(0))
                    .col(big_integer(VideoProjects::Revenue).default(0))
                    .col(string_len(VideoProjects::Status, 32).default("draft"))
                    .col(timestamp_null(VideoProjects::PublishedAt))
                    .col(timestamp(VideoProjects::CreatedAt).default(Expr::current_timestamp()))
                    .col(timestamp(VideoProjects::UpdatedAt).default(Expr::current_timestamp()))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_video_projects_offer")
                            .from(VideoProjects::Table, VideoProjects::OfferId)
                            .to(Offers::Table, Offers::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_video_projects_user_id")
                    .table(VideoProjects::Table)
                    .col(VideoProjects::UserId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(VideoProjects::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum VideoProjects {
    Table,
    Id,
    UserId,
    OfferId,
    Title,
    Niche,
    Script,
    ScriptWordCount,
    PromptTemplate,
    VoiceoverUrl,
    VoiceId,
    VoiceName,
    VideoUrl,
    ThumbnailUrl,
    Duration,
    VideoModel,
    VideoTaskId,
    TrackingUrl,
    UtmSource,
    UtmMedium,
    UtmCampaign,
    UtmTerm,
    UtmContent,
    Views,
    Clicks,
    Conversions,
    AdSpend,
    Revenue,
    Status,
    PublishedAt,
    CreatedAt,
    UpdatedAt,
}
