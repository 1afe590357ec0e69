use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, IntoActiveModel, QueryFilter,
    QueryOrder, Set,
};
use sea_orm::sea_query::Expr;

use super::now;
use crate::entities::prelude::Voices;
use crate::entities::voices;
use crate::error::{AppError, AppResult};
use crate::models::video::{CreateVoiceRequest, UpdateVoiceRequest};

/// Favorites first, then most used
pub async fn list(db: Option<&DatabaseConnection>, user_id: i32) -> AppResult<Vec<voices::Model>> {
    let Some(db) = db else { return Ok(Vec::new()) };

    Ok(Voices::find()
        .filter(voices::Column::UserId.eq(user_id))
        .order_by_desc(voices::Column::IsFavorite)
        .order_by_desc(voices::Column::UsageCount)
        .all(db)
        .await?)
}

pub async fn create(db: &DatabaseConnection, user_id: i32, req: CreateVoiceRequest) -> AppResult<voices::Model> {
    if req.provider_voice_id.trim().is_empty() {
        return Err(AppError::Validation("providerVoiceId is required".to_string()));
    }

    let ts = now();
    let voice = voices::ActiveModel {
        user_id: Set(user_id),
        provider_voice_id: Set(req.provider_voice_id),
        name: Set(req.name),
        description: Set(req.description),
        preview_url: Set(req.preview_url),
        gender: Set(req.gender),
        age: Set(req.age),
        accent: Set(req.accent),
        use_case: Set(req.use_case),
        usage_count: Set(0),
        is_favorite: Set(false),
        created_at: Set(ts),
        updated_at: Set(ts),
        ..Default::default()
    };

    Ok(voice.insert(db).await?)
}

pub async fn update(
    db: &DatabaseConnection,
    user_id: i32,
    id: i32,
    req: UpdateVoiceRequest,
) -> AppResult<voices::Model> {
    let existing = Voices::find_by_id(id)
        .filter(voices::Column::UserId.eq(user_id))
        .one(db)
        .await?
        .ok_or(AppError::NotFound("Voice"))?;

    let mut voice = existing.into_active_model();
    if let Some(v) = req.name {
        voice.name = Set(v);
    }
    if req.description.is_some() {
        voice.description = Set(req.description);
    }
    if let Some(v) = req.is_favorite {
        voice.is_favorite = Set(v);
    }
    voice.updated_at = Set(now());

    Ok(voice.update(db).await?)
}

/// Bump the usage count of the caller's cached copy of a provider voice, if any
pub async fn record_usage(db: &DatabaseConnection, user_id: i32, provider_voice_id: &str) -> AppResult<u64> {
    let result = Voices::update_many()
        .col_expr(voices::Column::UsageCount, Expr::col(voices::Column::UsageCount).add(1))
        .col_expr(voices::Column::UpdatedAt, Expr::value(now()))
        .filter(voices::Column::UserId.eq(user_id))
        .filter(voices::Column::ProviderVoiceId.eq(provider_voice_id))
        .exec(db)
        .await?;

    Ok(result.rows_affected)
}
