use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use crate::AppState;
use crate::entities::{ad_copy_variations, landing_pages};
use crate::error::{AppError, AppResult};
use crate::handlers::auth::CurrentUser;
use crate::models::landing_page::{
    CreateLandingPageRequest, CreateVariationRequest, GenerateContentRequest, GenerateVariationsRequest,
    OfferThumbnailRequest, UpdateLandingPageRequest, UpdateVariationRequest,
};
use crate::services::content_generator::{
    self, AdCopyInput, AdCopyVariations, DEFAULT_VARIATION_COUNT, HeadlineCopyInput, LandingPageCopy,
};
use crate::services::image_generation::{self, Thumbnail, ThumbnailInput};
use crate::store;

const MAX_VARIATIONS: u32 = 20;

pub async fn list_landing_pages(
    State(state): State<AppState>,
    user: CurrentUser,
) -> AppResult<Json<Vec<landing_pages::Model>>> {
    Ok(Json(store::landing_pages::list(state.db(), user.id()).await?))
}

pub async fn list_by_offer(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(offer_id): Path<i32>,
) -> AppResult<Json<Vec<landing_pages::Model>>> {
    Ok(Json(store::landing_pages::list_by_offer(state.db(), user.id(), offer_id).await?))
}

pub async fn get_landing_page(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<i32>,
) -> AppResult<Json<landing_pages::Model>> {
    store::landing_pages::find(state.db(), user.id(), id)
        .await?
        .map(Json)
        .ok_or(AppError::NotFound("Landing page"))
}

pub async fn create_landing_page(
    State(state): State<AppState>,
    user: CurrentUser,
    Json(payload): Json<CreateLandingPageRequest>,
) -> AppResult<(StatusCode, Json<landing_pages::Model>)> {
    let db = store::require(state.db())?;
    let page = store::landing_pages::create(db, user.id(), payload).await?;
    Ok((StatusCode::CREATED, Json(page)))
}

pub async fn update_landing_page(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateLandingPageRequest>,
) -> AppResult<Json<landing_pages::Model>> {
    let db = store::require(state.db())?;
    Ok(Json(store::landing_pages::update(db, user.id(), id, payload).await?))
}

/// Headline and three paragraphs for one of the caller's offers. Nothing is stored.
pub async fn generate_content(
    State(state): State<AppState>,
    user: CurrentUser,
    Json(payload): Json<GenerateContentRequest>,
) -> AppResult<Json<LandingPageCopy>> {
    let offer = store::offers::find(state.db(), user.id(), payload.offer_id)
        .await?
        .ok_or(AppError::NotFound("Offer"))?;

    let input = HeadlineCopyInput {
        product_name: offer.product_name,
        product_description: offer.description.unwrap_or_default(),
        niche: offer.niche,
        mechanism: payload.mechanism.filter(|m| !m.trim().is_empty()),
        target_audience: offer.target_audience,
    };

    Ok(Json(content_generator::generate_headline_and_copy(state.llm.as_ref(), &input).await?))
}

pub async fn generate_thumbnail(
    State(state): State<AppState>,
    user: CurrentUser,
    Json(payload): Json<OfferThumbnailRequest>,
) -> AppResult<Json<Thumbnail>> {
    let offer = store::offers::find(state.db(), user.id(), payload.offer_id)
        .await?
        .ok_or(AppError::NotFound("Offer"))?;

    let product_info = match offer.description.as_deref().filter(|d| !d.trim().is_empty()) {
        Some(description) => format!("{}: {}", offer.product_name, description),
        None => offer.product_name,
    };
    let input = ThumbnailInput {
        niche: offer.niche,
        product_info,
        style: payload.style,
        mechanism: payload.mechanism,
        benefit: payload.benefit,
    };

    Ok(Json(
        image_generation::generate_thumbnail(state.images.as_ref(), state.blobs.as_ref(), &input).await?,
    ))
}

pub async fn list_variations(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<i32>,
) -> AppResult<Json<Vec<ad_copy_variations::Model>>> {
    Ok(Json(store::landing_pages::list_variations(state.db(), user.id(), id).await?))
}

pub async fn create_variation(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<i32>,
    Json(payload): Json<CreateVariationRequest>,
) -> AppResult<(StatusCode, Json<ad_copy_variations::Model>)> {
    let db = store::require(state.db())?;
    let variation = store::landing_pages::create_variation(db, user.id(), id, payload).await?;
    Ok((StatusCode::CREATED, Json(variation)))
}

pub async fn generate_variations(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<i32>,
    Json(payload): Json<GenerateVariationsRequest>,
) -> AppResult<Json<AdCopyVariations>> {
    let count = payload.count.unwrap_or(DEFAULT_VARIATION_COUNT);
    if count == 0 || count > MAX_VARIATIONS {
        return Err(AppError::Validation(format!(
            "count must be between 1 and {}",
            MAX_VARIATIONS
        )));
    }

    let page = store::landing_pages::find(state.db(), user.id(), id)
        .await?
        .ok_or(AppError::NotFound("Landing page"))?;
    let offer = store::offers::find(state.db(), user.id(), page.offer_id)
        .await?
        .ok_or(AppError::NotFound("Offer"))?;

    let input = AdCopyInput {
        product_name: offer.product_name,
        niche: page.niche,
        base_headline: page.headline,
        count,
    };

    Ok(Json(content_generator::generate_ad_copy_variations(state.llm.as_ref(), &input).await?))
}

pub async fn update_variation(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateVariationRequest>,
) -> AppResult<Json<ad_copy_variations::Model>> {
    let db = store::require(state.db())?;
    Ok(Json(store::landing_pages::update_variation(db, user.id(), id, payload).await?))
}
