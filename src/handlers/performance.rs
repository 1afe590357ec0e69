use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};

use crate::AppState;
use crate::entities::{niche_strategies, performance_metrics};
use crate::error::AppResult;
use crate::handlers::auth::CurrentUser;
use crate::models::common::LimitQuery;
use crate::models::performance::{CreateSnapshotRequest, NicheQuery};
use crate::services::metrics::MetricsSummary;
use crate::store;

pub async fn overview(
    State(state): State<AppState>,
    user: CurrentUser,
    Query(query): Query<LimitQuery>,
) -> AppResult<Json<Vec<performance_metrics::Model>>> {
    Ok(Json(store::performance::list_recent(state.db(), user.id(), query.value()).await?))
}

pub async fn list_by_offer(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(offer_id): Path<i32>,
    Query(query): Query<LimitQuery>,
) -> AppResult<Json<Vec<performance_metrics::Model>>> {
    Ok(Json(
        store::performance::list_by_offer(state.db(), user.id(), offer_id, query.value()).await?,
    ))
}

/// `null` when no database is configured
pub async fn summary_by_offer(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(offer_id): Path<i32>,
) -> AppResult<Json<Option<MetricsSummary>>> {
    Ok(Json(store::performance::summary_by_offer(state.db(), user.id(), offer_id).await?))
}

pub async fn create_snapshot(
    State(state): State<AppState>,
    user: CurrentUser,
    Json(payload): Json<CreateSnapshotRequest>,
) -> AppResult<(StatusCode, Json<performance_metrics::Model>)> {
    let db = store::require(state.db())?;
    let snapshot = store::performance::create(db, user.id(), payload).await?;
    Ok((StatusCode::CREATED, Json(snapshot)))
}

pub async fn niche_strategies(
    State(state): State<AppState>,
    _user: CurrentUser,
    Query(query): Query<NicheQuery>,
) -> AppResult<Json<Vec<niche_strategies::Model>>> {
    Ok(Json(store::niche_strategies::list(state.db(), query.niche).await?))
}
