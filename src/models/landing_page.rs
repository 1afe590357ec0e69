use serde::Deserialize;

use crate::entities::sea_orm_active_enums::{LandingPageStatus, Niche, VariationStatus};
use crate::services::image_generation::ThumbnailStyle;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateLandingPageRequest {
    pub offer_id: i32,
    pub title: String,
    pub headline: String,
    pub subheadline: Option<String>,
    pub body_copy: String,
    pub call_to_action: String,
    pub template: String,
    pub niche: Niche,
    pub thumbnail_url: Option<String>,
    pub hero_image_url: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateLandingPageRequest {
    pub title: Option<String>,
    pub headline: Option<String>,
    pub subheadline: Option<String>,
    pub body_copy: Option<String>,
    pub call_to_action: Option<String>,
    pub status: Option<LandingPageStatus>,
    pub thumbnail_url: Option<String>,
    pub hero_image_url: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest {
    pub offer_id: i32,
    pub mechanism: Option<String>,
}

/// Split-screen thumbnail for one of the caller's offers
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OfferThumbnailRequest {
    pub offer_id: i32,
    pub mechanism: Option<String>,
    pub benefit: Option<String>,
    #[serde(default)]
    pub style: ThumbnailStyle,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateVariationRequest {
    pub headline: String,
    pub body_copy: String,
    pub call_to_action: String,
    #[serde(default)]
    pub is_control: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct GenerateVariationsRequest {
    pub count: Option<u32>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateVariationRequest {
    pub impressions: Option<i32>,
    pub clicks: Option<i32>,
    pub conversions: Option<i32>,
    pub status: Option<VariationStatus>,
}
