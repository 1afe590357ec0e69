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
                    .table(EmailSequences::Table)
                    .if_not_exists()
                    .col(pk_auto(EmailSequences::Id))
                    .col(integer(EmailSequences::UserId))
                    .col(integer_null(EmailSequences::OfferId))
                    .col(string(EmailSequences::Name))
                    .col(string_len(EmailSequences::Niche, 32))
                    .col(text_null(EmailSequences::Description))
                    .col(integer(EmailSequences::EmailCount))
                    .col(integer(EmailSequences::DaysBetweenEmails).default(1))
                    .col(string_len(EmailSequences::Status, 32).default("draft"))
                    .col(timestamp(EmailSequences::CreatedAt).default(Expr::current_timestamp()))
                    .col(timestamp(EmailSequences::UpdatedAt).default(Expr::current_timestamp()))
                    // Sequences outlive their offer
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_email_sequences_offer")
                            .from(EmailSequences::Table, EmailSequences::OfferId)
                            .to(Offers::Table, Offers::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Emails::Table)
                    .if_not_exists()
                    .col(pk_auto(Emails::Id))
                    .col(integer(Emails::SequenceId))
                    .col(integer(Emails::DayNumber))
                    .col(string(Emails::Subject))
                    .col(string_null(Emails::Preheader))
                    .col(text(Emails::Body))
                    .col(integer(Emails::Sent).default(0))
                    .col(integer(Emails::Opened).default(0))
                    .col(integer(Emails::Clicked).default(0))
                    .col(timestamp(Emails::CreatedAt).default(Expr::current_timestamp()))
                    .col(timestamp(Emails::UpdatedAt).default(Expr::current_timestamp()))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_emails_sequence")
                            .from(Emails::Table, Emails::SequenceId)
                            .to(EmailSequences::Table, EmailSequences::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_emails_sequence_day")
                    .table(Emails::Table)
                    .col(Emails::SequenceId)
                    .col(Emails::DayNumber)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Emails::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(EmailSequences::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum EmailSequences {
    Table,
    Id,
    UserId,
    OfferId,
    Name,
    Niche,
    Description,
    EmailCount,
    DaysBetweenEmails,
    Status,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Emails {
    Table,
    Id,
    SequenceId,
    DayNumber,
    Subject,
    Preheader,
    Body,
    Sent,
    Opened,
    Clicked,
    CreatedAt,
    UpdatedAt,
}
