pub use sea_orm_migration::prelude::*;

mod m20260301_000001_create_offers;
mod m20260301_000002_create_landing_pages;
mod m20260301_000003_create_email_sequences;
mod m20260302_000001_create_performance_metrics;
mod m20260302_000002_create_niche_strategies;
mod m20260305_000001_create_video_projects;
mod m20260305_000002_create_voices;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260301_000001_create_offers::Migration),
            Box::new(m20260301_000002_create_landing_pages::Migration),
            Box::new(m20260301_000003_create_email_sequences::Migration),
            Box::new(m20260302_000001_create_performance_metrics::Migration),
            Box::new(m20260302_000002_create_niche_strategies::Migration),
            Box::new(m20260305_000001_create_video_projects::Migration),
            Box::new(m20260305_000002_create_voices::Migration),
        ]
    }
}
