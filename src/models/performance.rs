use chrono::NaiveDateTime;
use serde::Deserialize;

use crate::entities::sea_orm_active_enums::Niche;
use crate::services::metrics::RawCounters;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSnapshotRequest {
    pub offer_id: i32,
    pub landing_page_id: Option<i32>,
    pub date: NaiveDateTime,
    #[serde(default)]
    pub unique_visitors: i64,
    #[serde(flatten)]
    pub counters: RawCounters,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct NicheQuery {
    pub niche: Option<Niche>,
}
