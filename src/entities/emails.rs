//! `SeaORM` Entity for emails table

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "emails")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub sequence_id: i32,
    pub day_number: i32,
    pub subject: String,
    pub preheader: Option<String>,
    #[sea_orm(column_type = "Text")]
    pub body: String,
    pub sent: i32,
    pub opened: i32,
    pub clicked: i32,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::email_sequences::Entity",
        from = "Column::SequenceId",
        to = "super::email_sequences::Column::Id",
        on_delete = "Cascade"
    )]
    Sequence,
}

impl Related<super::email_sequences::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Sequence.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
