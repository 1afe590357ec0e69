//! `SeaORM` Entity for voices table
//!
//! Cached reference to a voice on the speech provider.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::sea_orm_active_enums::{VoiceAge, VoiceGender};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "voices")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub user_id: i32,
    pub provider_voice_id: String,
    pub name: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub preview_url: Option<String>,
    pub gender: Option<VoiceGender>,
    pub age: Option<VoiceAge>,
    pub accent: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub use_case: Option<String>,
    pub usage_count: i32,
    pub is_favorite: bool,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
