pub use super::ad_copy_variations::Entity as AdCopyVariations;
pub use super::email_sequences::Entity as EmailSequences;
pub use super::emails::Entity as Emails;
pub use super::landing_pages::Entity as LandingPages;
pub use super::niche_strategies::Entity as NicheStrategies;
pub use super::offers::Entity as Offers;
pub use super::performance_metrics::Entity as PerformanceMetrics;
pub use super::video_projects::Entity as VideoProjects;
pub use super::voices::Entity as Voices;
