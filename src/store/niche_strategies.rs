use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set};

use super::now;
use crate::entities::niche_strategies;
use crate::entities::prelude::NicheStrategies;
use crate::entities::sea_orm_active_enums::{Niche, StrategyCategory};
use crate::error::AppResult;

/// Reference library, shared by all users; strongest strategies first
pub async fn list(db: Option<&DatabaseConnection>, niche: Option<Niche>) -> AppResult<Vec<niche_strategies::Model>> {
    let Some(db) = db else { return Ok(Vec::new()) };

    let mut query = NicheStrategies::find();
    query = match niche {
        Some(niche) => query.filter(niche_strategies::Column::Niche.eq(niche)),
        None => query.order_by_asc(niche_strategies::Column::Niche),
    };

    Ok(query
        .order_by_desc(niche_strategies::Column::Effectiveness)
        .all(db)
        .await?)
}

#[derive(Debug, Clone)]
pub struct NewStrategy {
    pub niche: Niche,
    pub title: &'static str,
    pub category: StrategyCategory,
    pub description: &'static str,
    pub examples: Option<&'static str>,
    pub tips: Option<&'static str>,
    pub effectiveness: i32,
}

/// Insert unless a strategy with the same niche and title exists.
/// Returns whether a row was written.
pub async fn insert_if_missing(db: &DatabaseConnection, strategy: &NewStrategy) -> AppResult<bool> {
    let existing = NicheStrategies::find()
        .filter(niche_strategies::Column::Niche.eq(strategy.niche))
        .filter(niche_strategies::Column::Title.eq(strategy.title))
        .one(db)
        .await?;

    if existing.is_some() {
        return Ok(false);
    }

    let ts = now();
    niche_strategies::ActiveModel {
        niche: Set(strategy.niche),
        title: Set(strategy.title.to_string()),
        category: Set(strategy.category),
        description: Set(strategy.description.to_string()),
        examples: Set(strategy.examples.map(str::to_string)),
        tips: Set(strategy.tips.map(str::to_string)),
        effectiveness: Set(Some(strategy.effectiveness)),
        created_at: Set(ts),
        updated_at: Set(ts),
        ..Default::default()
    }
    .insert(db)
    .await?;

    Ok(true)
}
