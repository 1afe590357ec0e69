//! `SeaORM` Entity for ad_copy_variations table

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::sea_orm_active_enums::VariationStatus;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "ad_copy_variations")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub user_id: i32,
    pub landing_page_id: i32,
    #[sea_orm(column_type = "Text")]
    pub headline: String,
    #[sea_orm(column_type = "Text")]
    pub body_copy: String,
    pub call_to_action: String,
    pub impressions: i32,
    pub clicks: i32,
    pub conversions: i32,
    pub is_control: bool,
    pub status: VariationStatus,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::landing_pages::Entity",
        from = "Column::LandingPageId",
        to = "super::landing_pages::Column::Id",
        on_delete = "Cascade"
    )]
    LandingPage,
}

impl ActiveModelBehavior for ActiveModel {}
