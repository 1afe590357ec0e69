use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, IntoActiveModel, QueryFilter,
    QueryOrder, Set,
};

use super::now;
use crate::entities::offers;
use crate::entities::prelude::Offers;
use crate::entities::sea_orm_active_enums::{OfferSource, OfferStatus, RecommendationStatus};
use crate::error::{AppError, AppResult};
use crate::models::offer::{CreateOfferRequest, UpdateOfferRequest};

pub async fn list(db: Option<&DatabaseConnection>, user_id: i32) -> AppResult<Vec<offers::Model>> {
    let Some(db) = db else { return Ok(Vec::new()) };

    Ok(Offers::find()
        .filter(offers::Column::UserId.eq(user_id))
        .order_by_desc(offers::Column::CreatedAt)
        .all(db)
        .await?)
}

pub async fn find(db: Option<&DatabaseConnection>, user_id: i32, id: i32) -> AppResult<Option<offers::Model>> {
    let Some(db) = db else { return Ok(None) };

    Ok(Offers::find_by_id(id)
        .filter(offers::Column::UserId.eq(user_id))
        .one(db)
        .await?)
}

pub async fn create(db: &DatabaseConnection, user_id: i32, req: CreateOfferRequest) -> AppResult<offers::Model> {
    if req.product_name.trim().is_empty() {
        return Err(AppError::Validation("Product name is required".to_string()));
    }

    let ts = now();
    let offer = offers::ActiveModel {
        user_id: Set(user_id),
        product_name: Set(req.product_name),
        vendor: Set(req.vendor),
        clickbank_id: Set(req.clickbank_id),
        niche: Set(req.niche),
        source: Set(req.source.unwrap_or(OfferSource::Clickbank)),
        source_url: Set(req.source_url),
        gravity: Set(req.gravity),
        avg_earnings_per_sale: Set(req.avg_earnings_per_sale),
        avg_conversion_value: Set(req.avg_conversion_value),
        commission_rate: Set(req.commission_rate),
        rebill_rate: Set(req.rebill_rate),
        sales_page_url: Set(req.sales_page_url),
        affiliate_page_url: Set(req.affiliate_page_url),
        description: Set(req.description),
        target_audience: Set(req.target_audience),
        evaluation_score: Set(None),
        recommendation_status: Set(RecommendationStatus::Pending),
        evaluation: Set(None),
        notes: Set(req.notes),
        status: Set(OfferStatus::Active),
        created_at: Set(ts),
        updated_at: Set(ts),
        ..Default::default()
    };

    let offer = offer.insert(db).await?;
    tracing::info!(offer_id = offer.id, user_id, "Offer created");
    Ok(offer)
}

pub async fn update(
    db: &DatabaseConnection,
    user_id: i32,
    id: i32,
    req: UpdateOfferRequest,
) -> AppResult<offers::Model> {
    let existing = find(Some(db), user_id, id)
        .await?
        .ok_or(AppError::NotFound("Offer"))?;

    let mut offer = existing.into_active_model();
    if let Some(v) = req.product_name {
        offer.product_name = Set(v);
    }
    if let Some(v) = req.vendor {
        offer.vendor = Set(v);
    }
    if let Some(v) = req.niche {
        offer.niche = Set(v);
    }
    if req.gravity.is_some() {
        offer.gravity = Set(req.gravity);
    }
    if req.avg_earnings_per_sale.is_some() {
        offer.avg_earnings_per_sale = Set(req.avg_earnings_per_sale);
    }
    if req.avg_conversion_value.is_some() {
        offer.avg_conversion_value = Set(req.avg_conversion_value);
    }
    if req.commission_rate.is_some() {
        offer.commission_rate = Set(req.commission_rate);
    }
    if req.rebill_rate.is_some() {
        offer.rebill_rate = Set(req.rebill_rate);
    }
    if req.sales_page_url.is_some() {
        offer.sales_page_url = Set(req.sales_page_url);
    }
    if req.affiliate_page_url.is_some() {
        offer.affiliate_page_url = Set(req.affiliate_page_url);
    }
    if req.description.is_some() {
        offer.description = Set(req.description);
    }
    if req.target_audience.is_some() {
        offer.target_audience = Set(req.target_audience);
    }
    if req.notes.is_some() {
        offer.notes = Set(req.notes);
    }
    if let Some(v) = req.status {
        offer.status = Set(v);
    }
    offer.updated_at = Set(now());

    Ok(offer.update(db).await?)
}

/// Dependents go with it through the foreign-key cascades
pub async fn delete(db: &DatabaseConnection, user_id: i32, id: i32) -> AppResult<()> {
    let result = Offers::delete_many()
        .filter(offers::Column::Id.eq(id))
        .filter(offers::Column::UserId.eq(user_id))
        .exec(db)
        .await?;

    if result.rows_affected == 0 {
        return Err(AppError::NotFound("Offer"));
    }
    tracing::info!(offer_id = id, user_id, "Offer deleted");
    Ok(())
}
