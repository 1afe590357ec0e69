// src/lib.rs

use std::sync::Arc;

use axum::Router;
use sea_orm::DatabaseConnection;

use config::AppConfig;
use services::blob_storage::{BlobStore, HttpBlobStore};
use services::image_generation::{ImageGenerator, OpenAiImageGenerator};
use services::llm::{OpenAiTextGenerator, TextGenerator};
use services::video_synthesis::{RunwayClient, VideoProvider};
use services::voice_synthesis::{ElevenLabsClient, SpeechSynthesizer};

#[derive(Clone)]
pub struct AppState {
    /// `None` when no DATABASE_URL is configured. Shared behind an `Arc`
    /// since the mock connection used in tests is not `Clone`.
    pub db: Option<Arc<DatabaseConnection>>,
    pub llm: Arc<dyn TextGenerator>,
    pub speech: Arc<dyn SpeechSynthesizer>,
    pub video: Arc<dyn VideoProvider>,
    pub blobs: Arc<dyn BlobStore>,
    pub images: Arc<dyn ImageGenerator>,
    /// Plain client for fetching third-party pages
    pub http: reqwest::Client,
}

impl AppState {
    pub fn from_config(config: &AppConfig, db: Option<DatabaseConnection>) -> Self {
        Self {
            db: db.map(Arc::new),
            llm: Arc::new(OpenAiTextGenerator::new(&config.llm)),
            speech: Arc::new(ElevenLabsClient::new(&config.elevenlabs)),
            video: Arc::new(RunwayClient::new(&config.runway)),
            blobs: Arc::new(HttpBlobStore::new(&config.storage)),
            images: Arc::new(OpenAiImageGenerator::new(&config.images)),
            http: reqwest::Client::new(),
        }
    }

    pub fn db(&self) -> Option<&DatabaseConnection> {
        self.db.as_deref()
    }
}

/// Full application router: `/health` plus everything under `/api`
pub fn app_router(state: AppState) -> Router {
    Router::new()
        .route("/health", axum::routing::get(handlers::health::health))
        .nest("/api", handlers::api_routes())
        .with_state(state)
}

pub mod config;
pub mod error;

pub mod entities {
    pub mod prelude;
    pub mod sea_orm_active_enums;
    pub mod ad_copy_variations;
    pub mod email_sequences;
    pub mod emails;
    pub mod landing_pages;
    pub mod niche_strategies;
    pub mod offers;
    pub mod performance_metrics;
    pub mod video_projects;
    pub mod voices;
}

pub mod services {
    pub mod blob_storage;
    pub mod content_generator;
    pub mod copy_library;
    pub mod image_generation;
    pub mod llm;
    pub mod metrics;
    pub mod offer_evaluator;
    pub mod product_import;
    pub mod script_generator;
    pub mod tracking_url;
    pub mod video_synthesis;
    pub mod voice_synthesis;

    #[cfg(test)]
    pub mod fakes;
}

pub mod models {
    pub mod common;
    pub mod email;
    pub mod landing_page;
    pub mod offer;
    pub mod performance;
    pub mod video;
}

pub mod store;
pub mod handlers;
