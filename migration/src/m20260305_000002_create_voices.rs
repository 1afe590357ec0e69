use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Voices::Table)
                    .if_not_exists()
                    .col(pk_auto(Voices::Id))
                    .col(integer(Voices::UserId))
                    .col(string(Voices::ProviderVoiceId))
                    .col(string(Voices::Name))
                    .col(text_null(Voices::Description))
                    .col(text_null(Voices::PreviewUrl))
                    .col(string_len_null(Voices::Gender, 16))
                    .col(string_len_null(Voices::Age, 16))
                    .col(string_null(Voices::Accent))
                    .col(text_null(Voices::UseCase))
                    .col(integer(Voices::UsageCount).default(0))
                    .col(boolean(Voices::IsFavorite).default(false))
                    .col(timestamp(Voices::CreatedAt).default(Expr::current_timestamp()))
                    .col(timestamp(Voices::UpdatedAt).default(Expr::current_timestamp()))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_voices_user_provider_voice")
                    .table(Voices::Table)
                    .col(Voices::UserId)
                    .col(Voices::ProviderVoiceId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Voices::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Voices {
    Table,
    Id,
    UserId,
    ProviderVoiceId,
    Name,
    Description,
    PreviewUrl,
    Gender,
    Age,
    Accent,
    UseCase,
    UsageCount,
    IsFavorite,
    CreatedAt,
    UpdatedAt,
}
