use serde::{Deserialize, Serialize};

use crate::entities::sea_orm_active_enums::{Niche, ProjectStatus, VoiceAge, VoiceGender};
use crate::services::image_generation::ThumbnailStyle;
use crate::services::script_generator::PromptTemplate;
use crate::services::tracking_url::TrackingParams;
use crate::services::video_synthesis::VideoModel;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProjectRequest {
    pub offer_id: i32,
    pub title: String,
    pub niche: Niche,
    pub script: String,
    pub prompt_template: Option<PromptTemplate>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProjectRequest {
    pub title: Option<String>,
    pub script: Option<String>,
    pub thumbnail_url: Option<String>,
    pub status: Option<ProjectStatus>,
    pub views: Option<i32>,
    pub clicks: Option<i32>,
    pub conversions: Option<i32>,
    /// Cents
    pub ad_spend: Option<i64>,
    /// Cents
    pub revenue: Option<i64>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScriptRequest {
    pub niche: Niche,
    pub product_info: String,
    pub prompt_template: Option<PromptTemplate>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoiceoverRequest {
    pub text: String,
    pub voice_id: String,
    pub voice_name: Option<String>,
    pub stability: Option<f32>,
    pub similarity_boost: Option<f32>,
    pub style: Option<f32>,
    pub project_id: Option<i32>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateVideoRequest {
    pub script: String,
    pub niche: Niche,
    pub model: VideoModel,
    pub thumbnail_url: Option<String>,
    pub project_id: Option<i32>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoThumbnailRequest {
    pub niche: Niche,
    pub product_info: String,
    #[serde(default)]
    pub style: ThumbnailStyle,
    pub project_id: Option<i32>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackingUrlRequest {
    #[serde(flatten)]
    pub params: TrackingParams,
    pub project_id: Option<i32>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackingUrlResponse {
    pub tracking_url: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateVoiceRequest {
    pub provider_voice_id: String,
    pub name: String,
    pub description: Option<String>,
    pub preview_url: Option<String>,
    pub gender: Option<VoiceGender>,
    pub age: Option<VoiceAge>,
    pub accent: Option<String>,
    pub use_case: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateVoiceRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub is_favorite: Option<bool>,
}
