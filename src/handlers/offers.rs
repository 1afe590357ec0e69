use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use crate::AppState;
use crate::entities::offers;
use crate::error::{AppError, AppResult};
use crate::handlers::auth::CurrentUser;
use crate::models::common::SuccessResponse;
use crate::models::offer::{CreateOfferRequest, ImportOfferRequest, ImportOfferResponse, UpdateOfferRequest};
use crate::services::offer_evaluator::{self, OfferEvaluation};
use crate::services::product_import;
use crate::store;

pub async fn list_offers(State(state): State<AppState>, user: CurrentUser) -> AppResult<Json<Vec<offers::Model>>> {
    Ok(Json(store::offers::list(state.db(), user.id()).await?))
}

pub async fn get_offer(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<i32>,
) -> AppResult<Json<offers::Model>> {
    store::offers::find(state.db(), user.id(), id)
        .await?
        .map(Json)
        .ok_or(AppError::NotFound("Offer"))
}

pub async fn create_offer(
    State(state): State<AppState>,
    user: CurrentUser,
    Json(payload): Json<CreateOfferRequest>,
) -> AppResult<(StatusCode, Json<offers::Model>)> {
    let db = store::require(state.db())?;
    let offer = store::offers::create(db, user.id(), payload).await?;
    Ok((StatusCode::CREATED, Json(offer)))
}

/// Fetch a sales page, extract the product and store it as a custom offer
pub async fn import_offer(
    State(state): State<AppState>,
    user: CurrentUser,
    Json(payload): Json<ImportOfferRequest>,
) -> AppResult<(StatusCode, Json<ImportOfferResponse>)> {
    let db = store::require(state.db())?;
    let url = payload.url.trim();

    let product = product_import::import_product(&state.http, state.llm.as_ref(), url).await?;
    let offer = store::offers::create(db, user.id(), CreateOfferRequest::from_import(url, &product)).await?;

    Ok((StatusCode::CREATED, Json(ImportOfferResponse { offer, product })))
}

pub async fn update_offer(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateOfferRequest>,
) -> AppResult<Json<offers::Model>> {
    let db = store::require(state.db())?;
    Ok(Json(store::offers::update(db, user.id(), id, payload).await?))
}

pub async fn delete_offer(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<i32>,
) -> AppResult<Json<SuccessResponse>> {
    let db = store::require(state.db())?;
    store::offers::delete(db, user.id(), id).await?;
    Ok(Json(SuccessResponse::ok()))
}

pub async fn evaluate_offer(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<i32>,
) -> AppResult<Json<OfferEvaluation>> {
    let db = store::require(state.db())?;
    let evaluation = offer_evaluator::evaluate_offer(db, state.llm.as_ref(), user.id(), id).await?;
    Ok(Json(evaluation))
}
