pub mod auth;
pub mod email_sequences;
pub mod health;
pub mod landing_pages;
pub mod offers;
pub mod performance;
pub mod video;

use axum::{
    Router,
    routing::{get, patch, post},
};

use crate::AppState;

pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Offers
        .route("/offers", get(offers::list_offers).post(offers::create_offer))
        .route("/offers/import", post(offers::import_offer))
        .route(
            "/offers/{id}",
            get(offers::get_offer).patch(offers::update_offer).delete(offers::delete_offer),
        )
        .route("/offers/{id}/evaluate", post(offers::evaluate_offer))
        .route("/offers/{id}/landing-pages", get(landing_pages::list_by_offer))
        .route("/offers/{id}/performance", get(performance::list_by_offer))
        .route("/offers/{id}/performance/summary", get(performance::summary_by_offer))
        // Landing pages and ad copy
        .route(
            "/landing-pages",
            get(landing_pages::list_landing_pages).post(landing_pages::create_landing_page),
        )
        .route("/landing-pages/generate", post(landing_pages::generate_content))
        .route("/landing-pages/thumbnail", post(landing_pages::generate_thumbnail))
        .route(
            "/landing-pages/{id}",
            get(landing_pages::get_landing_page).patch(landing_pages::update_landing_page),
        )
        .route(
            "/landing-pages/{id}/variations",
            get(landing_pages::list_variations).post(landing_pages::create_variation),
        )
        .route(
            "/landing-pages/{id}/variations/generate",
            post(landing_pages::generate_variations),
        )
        .route("/variations/{id}", patch(landing_pages::update_variation))
        // Email
        .route(
            "/email-sequences",
            get(email_sequences::list_sequences).post(email_sequences::create_sequence),
        )
        .route("/email-sequences/generate", post(email_sequences::generate_sequence))
        .route("/email-sequences/{id}", get(email_sequences::get_sequence))
        .route("/compliance/check", post(email_sequences::check_compliance))
        // Performance
        .route("/performance", get(performance::overview).post(performance::create_snapshot))
        .route("/niche-strategies", get(performance::niche_strategies))
        // Video pipeline
        .route("/video-projects", get(video::list_projects).post(video::create_project))
        .route(
            "/video-projects/{id}",
            get(video::get_project).patch(video::update_project).delete(video::delete_project),
        )
        .route("/video/script", post(video::generate_script))
        .route("/video/voiceover", post(video::generate_voiceover))
        .route("/video/voices", get(video::list_provider_voices))
        .route("/video/generate", post(video::generate_video))
        .route("/video/models", get(video::list_models))
        .route("/video/thumbnail", post(video::generate_thumbnail))
        .route("/video/tracking-url", post(video::build_tracking_url))
        .route("/voices", get(video::list_cached_voices).post(video::create_cached_voice))
        .route("/voices/{id}", patch(video::update_cached_voice))
}
