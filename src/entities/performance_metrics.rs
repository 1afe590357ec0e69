//! `SeaORM` Entity for performance_metrics table
//!
//! Derived columns (ctr .. roi) are written once at insert time.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "performance_metrics")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub user_id: i32,
    pub offer_id: i32,
    pub landing_page_id: Option<i32>,
    pub date: DateTime,
    pub impressions: i64,
    pub clicks: i64,
    pub unique_visitors: i64,
    pub conversions: i64,
    /// Cents
    pub revenue: i64,
    /// Cents
    pub ad_spend: i64,
    /// Basis points
    pub ctr: i64,
    /// Basis points
    pub conversion_rate: i64,
    /// Cents
    pub epc: i64,
    /// Cents
    pub cpc: i64,
    /// Whole percent
    pub roi: i64,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::offers::Entity",
        from = "Column::OfferId",
        to = "super::offers::Column::Id",
        on_delete = "Cascade"
    )]
    Offer,
}

impl ActiveModelBehavior for ActiveModel {}
