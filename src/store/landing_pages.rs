use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, IntoActiveModel, QueryFilter,
    QueryOrder, Set,
};

use super::now;
use crate::entities::prelude::{AdCopyVariations, LandingPages};
use crate::entities::sea_orm_active_enums::{LandingPageStatus, VariationStatus};
use crate::entities::{ad_copy_variations, landing_pages};
use crate::error::{AppError, AppResult};
use crate::models::landing_page::{
    CreateLandingPageRequest, CreateVariationRequest, UpdateLandingPageRequest, UpdateVariationRequest,
};

pub async fn list(db: Option<&DatabaseConnection>, user_id: i32) -> AppResult<Vec<landing_pages::Model>> {
    let Some(db) = db else { return Ok(Vec::new()) };

    Ok(LandingPages::find()
        .filter(landing_pages::Column::UserId.eq(user_id))
        .order_by_desc(landing_pages::Column::CreatedAt)
        .all(db)
        .await?)
}

pub async fn list_by_offer(
    db: Option<&DatabaseConnection>,
    user_id: i32,
    offer_id: i32,
) -> AppResult<Vec<landing_pages::Model>> {
    let Some(db) = db else { return Ok(Vec::new()) };

    Ok(LandingPages::find()
        .filter(landing_pages::Column::UserId.eq(user_id))
        .filter(landing_pages::Column::OfferId.eq(offer_id))
        .order_by_desc(landing_pages::Column::CreatedAt)
        .all(db)
        .await?)
}

pub async fn find(
    db: Option<&DatabaseConnection>,
    user_id: i32,
    id: i32,
) -> AppResult<Option<landing_pages::Model>> {
    let Some(db) = db else { return Ok(None) };

    Ok(LandingPages::find_by_id(id)
        .filter(landing_pages::Column::UserId.eq(user_id))
        .one(db)
        .await?)
}

pub async fn create(
    db: &DatabaseConnection,
    user_id: i32,
    req: CreateLandingPageRequest,
) -> AppResult<landing_pages::Model> {
    super::offers::find(Some(db), user_id, req.offer_id)
        .await?
        .ok_or(AppError::NotFound("Offer"))?;

    let ts = now();
    let page = landing_pages::ActiveModel {
        user_id: Set(user_id),
        offer_id: Set(req.offer_id),
        title: Set(req.title),
        headline: Set(req.headline),
        subheadline: Set(req.subheadline),
        body_copy: Set(req.body_copy),
        call_to_action: Set(req.call_to_action),
        thumbnail_url: Set(req.thumbnail_url),
        hero_image_url: Set(req.hero_image_url),
        template: Set(req.template),
        niche: Set(req.niche),
        views: Set(0),
        clicks: Set(0),
        conversions: Set(0),
        status: Set(LandingPageStatus::Draft),
        published_at: Set(None),
        created_at: Set(ts),
        updated_at: Set(ts),
        ..Default::default()
    };

    Ok(page.insert(db).await?)
}

/// Moving to `published` stamps `published_at`
pub async fn update(
    db: &DatabaseConnection,
    user_id: i32,
    id: i32,
    req: UpdateLandingPageRequest,
) -> AppResult<landing_pages::Model> {
    let existing = find(Some(db), user_id, id)
        .await?
        .ok_or(AppError::NotFound("Landing page"))?;

    let ts = now();
    let mut page = existing.into_active_model();
    if let Some(v) = req.title {
        page.title = Set(v);
    }
    if let Some(v) = req.headline {
        page.headline = Set(v);
    }
    if req.subheadline.is_some() {
        page.subheadline = Set(req.subheadline);
    }
    if let Some(v) = req.body_copy {
        page.body_copy = Set(v);
    }
    if let Some(v) = req.call_to_action {
        page.call_to_action = Set(v);
    }
    if req.thumbnail_url.is_some() {
        page.thumbnail_url = Set(req.thumbnail_url);
    }
    if req.hero_image_url.is_some() {
        page.hero_image_url = Set(req.hero_image_url);
    }
    if let Some(status) = req.status {
        page.status = Set(status);
        if status == LandingPageStatus::Published {
            page.published_at = Set(Some(ts));
        }
    }
    page.updated_at = Set(ts);

    Ok(page.update(db).await?)
}

pub async fn list_variations(
    db: Option<&DatabaseConnection>,
    user_id: i32,
    landing_page_id: i32,
) -> AppResult<Vec<ad_copy_variations::Model>> {
    let Some(db) = db else { return Ok(Vec::new()) };

    Ok(AdCopyVariations::find()
        .filter(ad_copy_variations::Column::UserId.eq(user_id))
        .filter(ad_copy_variations::Column::LandingPageId.eq(landing_page_id))
        .order_by_asc(ad_copy_variations::Column::CreatedAt)
        .all(db)
        .await?)
}

pub async fn create_variation(
    db: &DatabaseConnection,
    user_id: i32,
    landing_page_id: i32,
    req: CreateVariationRequest,
) -> AppResult<ad_copy_variations::Model> {
    find(Some(db), user_id, landing_page_id)
        .await?
        .ok_or(AppError::NotFound("Landing page"))?;

    let ts = now();
    let variation = ad_copy_variations::ActiveModel {
        user_id: Set(user_id),
        landing_page_id: Set(landing_page_id),
        headline: Set(req.headline),
        body_copy: Set(req.body_copy),
        call_to_action: Set(req.call_to_action),
        impressions: Set(0),
        clicks: Set(0),
        conversions: Set(0),
        is_control: Set(req.is_control),
        status: Set(VariationStatus::Active),
        created_at: Set(ts),
        updated_at: Set(ts),
        ..Default::default()
    };

    Ok(variation.insert(db).await?)
}

pub async fn update_variation(
    db: &DatabaseConnection,
    user_id: i32,
    id: i32,
    req: UpdateVariationRequest,
) -> AppResult<ad_copy_variations::Model> {
    let existing = AdCopyVariations::find_by_id(id)
        .filter(ad_copy_variations::Column::UserId.eq(user_id))
        .one(db)
        .await?
        .ok_or(AppError::NotFound("Variation"))?;

    for (name, value) in [
        ("impressions", req.impressions),
        ("clicks", req.clicks),
        ("conversions", req.conversions),
    ] {
        if value.is_some_and(|v| v < 0) {
            return Err(AppError::Validation(format!("{} must not be negative", name)));
        }
    }

    let mut variation = existing.into_active_model();
    if let Some(v) = req.impressions {
        variation.impressions = Set(v);
    }
    if let Some(v) = req.clicks {
        variation.clicks = Set(v);
    }
    if let Some(v) = req.conversions {
        variation.conversions = Set(v);
    }
    if let Some(v) = req.status {
        variation.status = Set(v);
    }
    variation.updated_at = Set(now());

    Ok(variation.update(db).await?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::sea_orm_active_enums::Niche;
    use chrono::NaiveDate;
    use sea_orm::{DatabaseBackend, MockDatabase};

    fn page(status: LandingPageStatus) -> landing_pages::Model {
        let day = NaiveDate::from_ymd_opt(2026, 3, 1).unwrap().and_hms_opt(9, 0, 0).unwrap();
        landing_pages::Model {
            id: 4,
            user_id: 1,
            offer_id: 3,
            title: "Shed plans".to_string(),
            headline: "Your backyard shed in two weekends".to_string(),
            subheadline: None,
            body_copy: "Body".to_string(),
            call_to_action: "See the plans".to_string(),
            thumbnail_url: None,
            hero_image_url: None,
            template: "classic".to_string(),
            niche: Niche::Woodworking,
            views: 0,
            clicks: 0,
            conversions: 0,
            status,
            published_at: None,
            created_at: day,
            updated_at: day,
        }
    }

    /// The `UPDATE .. SET ..` part of the issued statement, without the
    /// `WHERE` and `RETURNING` clauses
    async fn update_sql(req: UpdateLandingPageRequest) -> String {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![page(LandingPageStatus::Draft)]])
            .append_query_results([vec![page(LandingPageStatus::Published)]])
            .into_connection();

        update(&db, 1, 4, req).await.unwrap();

        let log = db.into_transaction_log();
        assert_eq!(log.len(), 2);
        let sql = &log[1].statements()[0].sql;
        sql.split(" WHERE ").next().unwrap_or_default().to_string()
    }

    #[tokio::test]
    async fn test_publishing_stamps_published_at() {
        let sql = update_sql(UpdateLandingPageRequest {
            status: Some(LandingPageStatus::Published),
            ..Default::default()
        })
        .await;

        assert!(sql.starts_with(r#"UPDATE "landing_pages""#));
        assert!(sql.contains(r#""published_at" = "#));
    }

    #[tokio::test]
    async fn test_other_edits_leave_published_at_alone() {
        let sql = update_sql(UpdateLandingPageRequest {
            title: Some("New title".to_string()),
            status: Some(LandingPageStatus::Archived),
            ..Default::default()
        })
        .await;

        assert!(sql.contains(r#""title" = "#));
        assert!(!sql.contains("published_at"));
    }

    #[tokio::test]
    async fn test_update_of_unknown_page_is_not_found() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<landing_pages::Model>::new()])
            .into_connection();

        let err = update(&db, 1, 4, UpdateLandingPageRequest::default()).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound("Landing page")));
    }
}
