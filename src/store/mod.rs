//! Persistence accessors
//!
//! Every user-owned query is filtered by the caller's user id, so a record
//! owned by someone else reads as absent. Reads take an optional connection
//! and degrade to empty results without one; writes require a connection.

pub mod email_sequences;
pub mod landing_pages;
pub mod niche_strategies;
pub mod offers;
pub mod performance;
pub mod video_projects;
pub mod voices;

use chrono::{NaiveDateTime, Utc};
use sea_orm::DatabaseConnection;

use crate::error::{AppError, AppResult};

pub fn require(db: Option<&DatabaseConnection>) -> AppResult<&DatabaseConnection> {
    db.ok_or(AppError::DatabaseUnavailable)
}

pub(crate) fn now() -> NaiveDateTime {
    Utc::now().naive_utc()
}
