use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use crate::AppState;
use crate::entities::email_sequences;
use crate::error::{AppError, AppResult};
use crate::handlers::auth::CurrentUser;
use crate::models::email::{
    ComplianceCheckRequest, CreateSequenceRequest, GenerateSequenceRequest, GenerateSequenceResponse,
    SequenceWithEmails,
};
use crate::services::content_generator::{self, ComplianceReport, EmailSequenceInput};
use crate::store;

const MAX_SEQUENCE_EMAILS: u32 = 30;

pub async fn list_sequences(
    State(state): State<AppState>,
    user: CurrentUser,
) -> AppResult<Json<Vec<email_sequences::Model>>> {
    Ok(Json(store::email_sequences::list(state.db(), user.id()).await?))
}

pub async fn get_sequence(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<i32>,
) -> AppResult<Json<SequenceWithEmails>> {
    store::email_sequences::find_with_emails(state.db(), user.id(), id)
        .await?
        .map(Json)
        .ok_or(AppError::NotFound("Email sequence"))
}

pub async fn create_sequence(
    State(state): State<AppState>,
    user: CurrentUser,
    Json(payload): Json<CreateSequenceRequest>,
) -> AppResult<(StatusCode, Json<email_sequences::Model>)> {
    let db = store::require(state.db())?;
    let sequence = store::email_sequences::create(db, user.id(), payload).await?;
    Ok((StatusCode::CREATED, Json(sequence)))
}

/// Generate the emails for an offer, then store the sequence and each email
pub async fn generate_sequence(
    State(state): State<AppState>,
    user: CurrentUser,
    Json(payload): Json<GenerateSequenceRequest>,
) -> AppResult<Json<GenerateSequenceResponse>> {
    if payload.email_count == 0 || payload.email_count > MAX_SEQUENCE_EMAILS {
        return Err(AppError::Validation(format!(
            "emailCount must be between 1 and {}",
            MAX_SEQUENCE_EMAILS
        )));
    }

    let db = store::require(state.db())?;
    let offer = store::offers::find(Some(db), user.id(), payload.offer_id)
        .await?
        .ok_or(AppError::NotFound("Offer"))?;

    let input = EmailSequenceInput {
        product_name: offer.product_name.clone(),
        product_description: offer.description.clone().unwrap_or_default(),
        niche: offer.niche,
        email_count: payload.email_count,
    };
    let draft = content_generator::generate_email_sequence(state.llm.as_ref(), &input).await?;

    let name = format!("{} - {} Day Sequence", offer.product_name, payload.email_count);
    let sequence =
        store::email_sequences::create_generated(db, user.id(), offer.id, name, offer.niche, draft.emails).await?;

    Ok(Json(GenerateSequenceResponse {
        success: true,
        sequence_id: sequence.id,
    }))
}

pub async fn check_compliance(
    State(state): State<AppState>,
    _user: CurrentUser,
    Json(payload): Json<ComplianceCheckRequest>,
) -> AppResult<Json<ComplianceReport>> {
    if payload.text.trim().is_empty() {
        return Err(AppError::Validation("Text is required".to_string()));
    }
    Ok(Json(
        content_generator::check_compliance(state.llm.as_ref(), &payload.text, payload.niche).await?,
    ))
}
