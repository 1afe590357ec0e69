use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(NicheStrategies::Table)
                    .if_not_exists()
                    .col(pk_auto(NicheStrategies::Id))
                    .col(string_len(NicheStrategies::Niche, 32))
                    .col(string(NicheStrategies::Title))
                    .col(string_len(NicheStrategies::Category, 32))
                    .col(text(NicheStrategies::Description))
                    .col(text_null(NicheStrategies::Examples))
                    .col(text_null(NicheStrategies::Tips))
                    .col(integer_null(NicheStrategies::Effectiveness))
                    .col(timestamp(NicheStrategies::CreatedAt).default(Expr::current_timestamp()))
                    .col(timestamp(NicheStrategies::UpdatedAt).default(Expr::current_timestamp()))
                    .to_owned(),
            )
            .await?;

        // Seeder relies on this for idempotent inserts
        manager
            .create_index(
                Index::create()
                    .name("idx_niche_strategies_niche_title")
                    .table(NicheStrategies::Table)
                    .col(NicheStrategies::Niche)
                    .col(NicheStrategies::Title)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(NicheStrategies::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum NicheStrategies {
    Table,
    Id,
    Niche,
    Title,
    Category,
    Description,
    Examples,
    Tips,
    Effectiveness,
    CreatedAt,
    UpdatedAt,
}
