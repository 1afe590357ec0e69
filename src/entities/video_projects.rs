//! `SeaORM` Entity for video_projects table

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::sea_orm_active_enums::{Niche, ProjectStatus};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "video_projects")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub user_id: i32,
    pub offer_id: i32,
    pub title: String,
    pub niche: Niche,
    #[sea_orm(column_type = "Text")]
    pub script: String,
    pub script_word_count: Option<i32>,
    pub prompt_template: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub voiceover_url: Option<String>,
    pub voice_id: Option<String>,
    pub voice_name: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub video_url: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub thumbnail_url: Option<String>,
    pub duration: Option<i32>,
    pub video_model: Option<String>,
    pub video_task_id: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub tracking_url: Option<String>,
    pub utm_source: Option<String>,
    pub utm_medium: Option<String>,
    pub utm_campaign: Option<String>,
    pub utm_term: Option<String>,
    pub utm_content: Option<String>,
    pub views: i32,
    pub clicks: i32,
    pub conversions: i32,
    /// Cents
    pub ad_spend: i64,
    /// Cents
    pub revenue: i64,
    pub status: ProjectStatus,
    pub published_at: Option<DateTime>,
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
