use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, QuerySelect, Set,
};

use super::now;
use crate::entities::performance_metrics;
use crate::entities::prelude::PerformanceMetrics;
use crate::error::{AppError, AppResult};
use crate::models::performance::CreateSnapshotRequest;
use crate::services::metrics::{self, MetricsSummary, RawCounters};

pub async fn list_recent(
    db: Option<&DatabaseConnection>,
    user_id: i32,
    limit: u64,
) -> AppResult<Vec<performance_metrics::Model>> {
    let Some(db) = db else { return Ok(Vec::new()) };

    Ok(PerformanceMetrics::find()
        .filter(performance_metrics::Column::UserId.eq(user_id))
        .order_by_desc(performance_metrics::Column::Date)
        .limit(limit)
        .all(db)
        .await?)
}

pub async fn list_by_offer(
    db: Option<&DatabaseConnection>,
    user_id: i32,
    offer_id: i32,
    limit: u64,
) -> AppResult<Vec<performance_metrics::Model>> {
    let Some(db) = db else { return Ok(Vec::new()) };

    Ok(PerformanceMetrics::find()
        .filter(performance_metrics::Column::UserId.eq(user_id))
        .filter(performance_metrics::Column::OfferId.eq(offer_id))
        .order_by_desc(performance_metrics::Column::Date)
        .limit(limit)
        .all(db)
        .await?)
}

/// Totals over every snapshot of the offer; `None` without a database
pub async fn summary_by_offer(
    db: Option<&DatabaseConnection>,
    user_id: i32,
    offer_id: i32,
) -> AppResult<Option<MetricsSummary>> {
    let Some(db) = db else { return Ok(None) };

    let rows = PerformanceMetrics::find()
        .filter(performance_metrics::Column::UserId.eq(user_id))
        .filter(performance_metrics::Column::OfferId.eq(offer_id))
        .all(db)
        .await?;

    let counters: Vec<RawCounters> = rows.iter().map(counters_of).collect();
    Ok(Some(metrics::summarize(&counters)))
}

fn counters_of(row: &performance_metrics::Model) -> RawCounters {
    RawCounters {
        impressions: row.impressions,
        clicks: row.clicks,
        conversions: row.conversions,
        revenue: row.revenue,
        ad_spend: row.ad_spend,
    }
}

/// Derived rates are computed here and stored alongside the raw counters
pub async fn create(
    db: &DatabaseConnection,
    user_id: i32,
    req: CreateSnapshotRequest,
) -> AppResult<performance_metrics::Model> {
    req.counters.ensure_non_negative()?;
    if req.unique_visitors < 0 {
        return Err(AppError::Validation("uniqueVisitors must not be negative".to_string()));
    }

    super::offers::find(Some(db), user_id, req.offer_id)
        .await?
        .ok_or(AppError::NotFound("Offer"))?;

    if let Some(page_id) = req.landing_page_id {
        let page = super::landing_pages::find(Some(db), user_id, page_id)
            .await?
            .ok_or(AppError::NotFound("Landing page"))?;
        if page.offer_id != req.offer_id {
            return Err(AppError::Validation(
                "Landing page does not belong to this offer".to_string(),
            ));
        }
    }

    let c = req.counters;
    let derived = metrics::compute(&c);
    let ts = now();

    let snapshot = performance_metrics::ActiveModel {
        user_id: Set(user_id),
        offer_id: Set(req.offer_id),
        landing_page_id: Set(req.landing_page_id),
        date: Set(req.date),
        impressions: Set(c.impressions),
        clicks: Set(c.clicks),
        unique_visitors: Set(req.unique_visitors),
        conversions: Set(c.conversions),
        revenue: Set(c.revenue),
        ad_spend: Set(c.ad_spend),
        ctr: Set(derived.ctr),
        conversion_rate: Set(derived.conversion_rate),
        epc: Set(derived.epc),
        cpc: Set(derived.cpc),
        roi: Set(derived.roi),
        created_at: Set(ts),
        updated_at: Set(ts),
        ..Default::default()
    };

    Ok(snapshot.insert(db).await?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::sea_orm_active_enums::{
        LandingPageStatus, Niche, OfferSource, OfferStatus, RecommendationStatus,
    };
    use crate::entities::{landing_pages, offers};
    use chrono::NaiveDate;
    use sea_orm::{DatabaseBackend, MockDatabase, Value};

    fn day() -> chrono::NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 3, 2).unwrap().and_hms_opt(0, 0, 0).unwrap()
    }

    fn offer(id: i32) -> offers::Model {
        offers::Model {
            id,
            user_id: 1,
            product_name: "Ted's Woodworking".to_string(),
            vendor: "tedsplans".to_string(),
            clickbank_id: None,
            niche: Niche::Woodworking,
            source: OfferSource::Clickbank,
            source_url: None,
            gravity: Some(80),
            avg_earnings_per_sale: None,
            avg_conversion_value: None,
            commission_rate: None,
            rebill_rate: None,
            sales_page_url: None,
            affiliate_page_url: None,
            description: None,
            target_audience: None,
            evaluation_score: None,
            recommendation_status: RecommendationStatus::Pending,
            evaluation: None,
            notes: None,
            status: OfferStatus::Active,
            created_at: day(),
            updated_at: day(),
        }
    }

    fn page(id: i32, offer_id: i32) -> landing_pages::Model {
        landing_pages::Model {
            id,
            user_id: 1,
            offer_id,
            title: "Bench plans".to_string(),
            headline: "Build it this weekend".to_string(),
            subheadline: None,
            body_copy: "Body".to_string(),
            call_to_action: "Get the plans".to_string(),
            thumbnail_url: None,
            hero_image_url: None,
            template: "classic".to_string(),
            niche: Niche::Woodworking,
            views: 0,
            clicks: 0,
            conversions: 0,
            status: LandingPageStatus::Draft,
            published_at: None,
            created_at: day(),
            updated_at: day(),
        }
    }

    fn stored_snapshot() -> performance_metrics::Model {
        performance_metrics::Model {
            id: 11,
            user_id: 1,
            offer_id: 3,
            landing_page_id: Some(4),
            date: day(),
            impressions: 40,
            clicks: 3,
            unique_visitors: 0,
            conversions: 1,
            revenue: 6000,
            ad_spend: 1500,
            ctr: 750,
            conversion_rate: 3333,
            epc: 2000,
            cpc: 500,
            roi: 300,
            created_at: day(),
            updated_at: day(),
        }
    }

    fn request(landing_page_id: Option<i32>) -> CreateSnapshotRequest {
        CreateSnapshotRequest {
            offer_id: 3,
            landing_page_id,
            date: day(),
            unique_visitors: 0,
            counters: RawCounters { impressions: 40, clicks: 3, conversions: 1, revenue: 6000, ad_spend: 1500 },
        }
    }

    #[tokio::test]
    async fn test_create_writes_derived_metrics() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![offer(3)]])
            .append_query_results([vec![page(4, 3)]])
            .append_query_results([vec![stored_snapshot()]])
            .into_connection();

        let snapshot = create(&db, 1, request(Some(4))).await.unwrap();
        assert_eq!(snapshot.id, 11);

        let log = db.into_transaction_log();
        assert_eq!(log.len(), 3);
        let insert = &log[2].statements()[0];
        assert!(insert.sql.starts_with(r#"INSERT INTO "performance_metrics""#));
        let values = &insert.values.as_ref().unwrap().0;
        for derived in [750i64, 3333, 2000, 500, 300] {
            assert!(values.contains(&Value::BigInt(Some(derived))), "missing {}", derived);
        }
    }

    #[tokio::test]
    async fn test_foreign_landing_page_is_not_found() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![offer(3)]])
            .append_query_results([Vec::<landing_pages::Model>::new()])
            .into_connection();

        let err = create(&db, 1, request(Some(4))).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound("Landing page")));
        // No insert after the two lookups
        assert_eq!(db.into_transaction_log().len(), 2);
    }

    #[tokio::test]
    async fn test_landing_page_of_other_offer_is_rejected() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![offer(3)]])
            .append_query_results([vec![page(4, 99)]])
            .into_connection();

        let err = create(&db, 1, request(Some(4))).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        assert_eq!(db.into_transaction_log().len(), 2);
    }

    #[tokio::test]
    async fn test_negative_counter_is_rejected_before_queries() {
        let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
        let mut req = request(None);
        req.counters.clicks = -1;

        let err = create(&db, 1, req).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(ref m) if m == "clicks must not be negative"));
        assert!(db.into_transaction_log().is_empty());
    }
}
