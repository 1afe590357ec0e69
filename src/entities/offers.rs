//! `SeaORM` Entity for offers table

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::sea_orm_active_enums::{Niche, OfferSource, OfferStatus, RecommendationStatus};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "offers")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub user_id: i32,
    pub product_name: String,
    pub vendor: String,
    pub clickbank_id: Option<String>,
    pub niche: Niche,
    pub source: OfferSource,
    #[sea_orm(column_type = "Text", nullable)]
    pub source_url: Option<String>,
    pub gravity: Option<i32>,
    /// Cents
    pub avg_earnings_per_sale: Option<i32>,
    /// Cents
    pub avg_conversion_value: Option<i32>,
    /// Basis points (7500 = 75%)
    pub commission_rate: Option<i32>,
    /// Basis points
    pub rebill_rate: Option<i32>,
    #[sea_orm(column_type = "Text", nullable)]
    pub sales_page_url: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub affiliate_page_url: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub target_audience: Option<String>,
    pub evaluation_score: Option<i32>,
    pub recommendation_status: RecommendationStatus,
    /// Full structured evaluation payload, kept apart from the typed fields
    pub evaluation: Option<Json>,
    #[sea_orm(column_type = "Text", nullable)]
    pub notes: Option<String>,
    pub status: OfferStatus,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
