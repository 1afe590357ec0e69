use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set};

use super::now;
use crate::entities::prelude::{EmailSequences, Emails};
use crate::entities::sea_orm_active_enums::{Niche, SequenceStatus};
use crate::entities::{email_sequences, emails};
use crate::error::{AppError, AppResult};
use crate::models::email::{CreateSequenceRequest, SequenceWithEmails};
use crate::services::content_generator::EmailDraft;

pub async fn list(db: Option<&DatabaseConnection>, user_id: i32) -> AppResult<Vec<email_sequences::Model>> {
    let Some(db) = db else { return Ok(Vec::new()) };

    Ok(EmailSequences::find()
        .filter(email_sequences::Column::UserId.eq(user_id))
        .order_by_desc(email_sequences::Column::CreatedAt)
        .all(db)
        .await?)
}

pub async fn find_with_emails(
    db: Option<&DatabaseConnection>,
    user_id: i32,
    id: i32,
) -> AppResult<Option<SequenceWithEmails>> {
    let Some(db) = db else { return Ok(None) };

    let Some(sequence) = EmailSequences::find_by_id(id)
        .filter(email_sequences::Column::UserId.eq(user_id))
        .one(db)
        .await?
    else {
        return Ok(None);
    };

    let emails = Emails::find()
        .filter(emails::Column::SequenceId.eq(sequence.id))
        .order_by_asc(emails::Column::DayNumber)
        .all(db)
        .await?;

    Ok(Some(SequenceWithEmails { sequence, emails }))
}

pub async fn create(
    db: &DatabaseConnection,
    user_id: i32,
    req: CreateSequenceRequest,
) -> AppResult<email_sequences::Model> {
    if req.email_count < 1 {
        return Err(AppError::Validation("emailCount must be at least 1".to_string()));
    }
    if let Some(offer_id) = req.offer_id {
        super::offers::find(Some(db), user_id, offer_id)
            .await?
            .ok_or(AppError::NotFound("Offer"))?;
    }

    insert_sequence(
        db,
        user_id,
        req.offer_id,
        req.name,
        req.niche,
        req.description,
        req.email_count,
        req.days_between_emails.unwrap_or(1),
    )
    .await
}

#[allow(clippy::too_many_arguments)]
async fn insert_sequence(
    db: &DatabaseConnection,
    user_id: i32,
    offer_id: Option<i32>,
    name: String,
    niche: Niche,
    description: Option<String>,
    email_count: i32,
    days_between_emails: i32,
) -> AppResult<email_sequences::Model> {
    let ts = now();
    let sequence = email_sequences::ActiveModel {
        user_id: Set(user_id),
        offer_id: Set(offer_id),
        name: Set(name),
        niche: Set(niche),
        description: Set(description),
        email_count: Set(email_count),
        days_between_emails: Set(days_between_emails),
        status: Set(SequenceStatus::Draft),
        created_at: Set(ts),
        updated_at: Set(ts),
        ..Default::default()
    };

    Ok(sequence.insert(db).await?)
}

/// Writes the sequence, then each email. No transaction: a failure part way
/// leaves a sequence with fewer emails than `email_count`.
pub async fn create_generated(
    db: &DatabaseConnection,
    user_id: i32,
    offer_id: i32,
    name: String,
    niche: Niche,
    drafts: Vec<EmailDraft>,
) -> AppResult<email_sequences::Model> {
    let sequence = insert_sequence(db, user_id, Some(offer_id), name, niche, None, drafts.len() as i32, 1).await?;

    let ts = now();
    for draft in drafts {
        emails::ActiveModel {
            sequence_id: Set(sequence.id),
            day_number: Set(draft.day),
            subject: Set(draft.subject),
            preheader: Set(Some(draft.preheader).filter(|p| !p.is_empty())),
            body: Set(draft.body),
            sent: Set(0),
            opened: Set(0),
            clicked: Set(0),
            created_at: Set(ts),
            updated_at: Set(ts),
            ..Default::default()
        }
        .insert(db)
        .await?;
    }

    tracing::info!(sequence_id = sequence.id, emails = sequence.email_count, "Email sequence stored");
    Ok(sequence)
}
