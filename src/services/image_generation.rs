//! Thumbnail images for videos and landing pages
//!
//! The image provider returns a temporary URL. The bytes are downloaded and
//! re-stored under `thumbnails/<niche>/<uuid>.png` so the link stays valid.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::config::ImageConfig;
use crate::entities::sea_orm_active_enums::Niche;
use crate::error::{AppError, AppResult, ProviderError};
use crate::services::blob_storage::{BlobStore, random_key};

const IMAGE_CONTENT_TYPE: &str = "image/png";
const IMAGE_SIZE: &str = "1792x1024";
const PRODUCT_INFO_PROMPT_CHARS: usize = 100;

#[async_trait]
pub trait ImageGenerator: Send + Sync {
    /// Returns a URL the generated image can be fetched from
    async fn generate(&self, prompt: &str) -> Result<String, ProviderError>;

    async fn download(&self, url: &str) -> Result<Vec<u8>, ProviderError>;
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThumbnailStyle {
    #[default]
    Photorealistic,
    Illustrated,
    Minimal,
}

impl ThumbnailStyle {
    pub fn as_str(&self) -> &'static str {
        match self {
            ThumbnailStyle::Photorealistic => "photorealistic",
            ThumbnailStyle::Illustrated => "illustrated",
            ThumbnailStyle::Minimal => "minimal",
        }
    }

    fn direction(&self) -> &'static str {
        match self {
            ThumbnailStyle::Photorealistic => "realistic photography, natural lighting, shallow depth of field",
            ThumbnailStyle::Illustrated => "bold digital illustration, saturated colors, clean outlines",
            ThumbnailStyle::Minimal => "minimal composition, one focal subject, lots of negative space",
        }
    }
}

#[derive(Debug, Clone)]
pub struct ThumbnailInput {
    pub niche: Niche,
    pub product_info: String,
    pub style: ThumbnailStyle,
    pub mechanism: Option<String>,
    pub benefit: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Thumbnail {
    /// Provider URL, short-lived
    pub image_url: String,
    pub storage_url: String,
    pub storage_key: String,
    pub prompt: String,
}

pub fn thumbnail_prompt(input: &ThumbnailInput) -> String {
    let product: String = input.product_info.trim().chars().take(PRODUCT_INFO_PROMPT_CHARS).collect();

    let mut prompt = format!(
        "Eye-catching YouTube thumbnail, 16:9 aspect ratio (1280x720).\n\
         Niche: {}\n\
         Product: {}\n\
         Style: {} ({}).\n",
        input.niche.as_str(),
        product,
        input.style.as_str(),
        input.style.direction(),
    );

    if let Some(mechanism) = input.mechanism.as_deref().filter(|m| !m.trim().is_empty()) {
        prompt.push_str(&format!("Mechanism: {}\n", mechanism.trim()));
    }
    if let Some(benefit) = input.benefit.as_deref().filter(|b| !b.trim().is_empty()) {
        prompt.push_str(&format!(
            "Benefit: {}\nSplit-screen before/after layout showing the benefit.\n",
            benefit.trim()
        ));
    }

    prompt.push_str("High contrast, a subtle play button overlay, no text or lettering in the image.");
    prompt
}

pub async fn generate_thumbnail(
    images: &dyn ImageGenerator,
    store: &dyn BlobStore,
    input: &ThumbnailInput,
) -> AppResult<Thumbnail> {
    if input.product_info.trim().is_empty() {
        return Err(AppError::Validation("Product info is required".to_string()));
    }

    let prompt = thumbnail_prompt(input);
    tracing::info!(niche = %input.niche.as_str(), style = %input.style.as_str(), "Generating thumbnail");

    let image_url = images
        .generate(&prompt)
        .await
        .map_err(|e| e.into_app_error("Thumbnail generation failed"))?;

    let bytes = images
        .download(&image_url)
        .await
        .map_err(|e| e.into_app_error("Thumbnail generation failed"))?;

    let key = random_key(&format!("thumbnails/{}", input.niche.as_str()), "png");
    let stored = store
        .put(&key, bytes, IMAGE_CONTENT_TYPE)
        .await
        .map_err(|e| e.into_app_error("Thumbnail generation failed"))?;

    Ok(Thumbnail {
        image_url,
        storage_url: stored.url,
        storage_key: stored.key,
        prompt,
    })
}

/// OpenAI-compatible `/v1/images/generations` client
#[derive(Clone)]
pub struct OpenAiImageGenerator {
    client: Client,
    api_url: String,
    api_key: Option<String>,
    model: String,
}

#[derive(Debug, Deserialize)]
struct ImagesResponse {
    #[serde(default)]
    data: Vec<ImageData>,
}

#[derive(Debug, Deserialize)]
struct ImageData {
    url: Option<String>,
}

impl OpenAiImageGenerator {
    pub fn new(config: &ImageConfig) -> Self {
        Self {
            client: Client::new(),
            api_url: config.api_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            model: config.model.clone(),
        }
    }
}

#[async_trait]
impl ImageGenerator for OpenAiImageGenerator {
    async fn generate(&self, prompt: &str) -> Result<String, ProviderError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or(ProviderError::NotConfigured("IMAGE_API_KEY"))?;

        let url = format!("{}/v1/images/generations", self.api_url);
        tracing::debug!(model = %self.model, "Invoking image generation");

        let response = self
            .client
            .post(&url)
            .bearer_auth(api_key)
            .json(&serde_json::json!({
                "model": self.model,
                "prompt": prompt,
                "n": 1,
                "size": IMAGE_SIZE,
                "response_format": "url",
            }))
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(ProviderError::Api {
                provider: "Image",
                status: status.as_u16(),
                detail: error_text,
            });
        }

        let data: ImagesResponse = response.json().await?;

        data.data
            .into_iter()
            .find_map(|d| d.url)
            .ok_or_else(|| ProviderError::InvalidResponse("No image URL returned".to_string()))
    }

    async fn download(&self, url: &str) -> Result<Vec<u8>, ProviderError> {
        let response = self.client.get(url).send().await?;

        if !response.status().is_success() {
            return Err(ProviderError::Api {
                provider: "Image",
                status: response.status().as_u16(),
                detail: format!("Download of {} failed", url),
            });
        }

        Ok(response.bytes().await?.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::fakes::{FakeImageGenerator, MemoryBlobStore};

    fn input(product_info: &str) -> ThumbnailInput {
        ThumbnailInput {
            niche: Niche::Woodworking,
            product_info: product_info.to_string(),
            style: ThumbnailStyle::Illustrated,
            mechanism: None,
            benefit: None,
        }
    }

    #[test]
    fn test_prompt_mentions_niche_style_and_format() {
        let prompt = thumbnail_prompt(&input("Plans for 16,000 woodworking projects"));

        assert!(prompt.contains("YouTube thumbnail"));
        assert!(prompt.contains("16:9"));
        assert!(prompt.contains("woodworking"));
        assert!(prompt.contains("illustrated"));
        assert!(prompt.contains("Plans for 16,000 woodworking projects"));
        assert!(!prompt.contains("Benefit:"));
    }

    #[test]
    fn test_prompt_truncates_product_info() {
        let long = format!("{}{}", "a".repeat(PRODUCT_INFO_PROMPT_CHARS), "TAIL");
        let prompt = thumbnail_prompt(&input(&long));

        assert!(prompt.contains(&"a".repeat(PRODUCT_INFO_PROMPT_CHARS)));
        assert!(!prompt.contains("TAIL"));
    }

    #[test]
    fn test_prompt_adds_benefit_split_screen() {
        let mut with_benefit = input("Shed plans");
        with_benefit.benefit = Some("Build a shed in a weekend".to_string());
        with_benefit.mechanism = Some("  ".to_string());

        let prompt = thumbnail_prompt(&with_benefit);
        assert!(prompt.contains("Benefit: Build a shed in a weekend"));
        assert!(prompt.contains("Split-screen"));
        assert!(!prompt.contains("Mechanism:"));
    }

    #[test]
    fn test_style_deserializes_lowercase() {
        let style: ThumbnailStyle = serde_json::from_str(r#""minimal""#).unwrap();
        assert_eq!(style, ThumbnailStyle::Minimal);
        assert_eq!(ThumbnailStyle::default(), ThumbnailStyle::Photorealistic);
    }

    #[tokio::test]
    async fn test_generate_thumbnail_stores_under_niche() {
        let images = FakeImageGenerator::returning("https://images.test/tmp.png");
        let store = MemoryBlobStore::default();

        let thumbnail = generate_thumbnail(&images, &store, &input("Shed plans")).await.unwrap();

        assert_eq!(thumbnail.image_url, "https://images.test/tmp.png");
        assert!(thumbnail.storage_key.starts_with("thumbnails/woodworking/"));
        assert!(thumbnail.storage_key.ends_with(".png"));
        assert_eq!(thumbnail.storage_url, format!("https://storage.test/{}", thumbnail.storage_key));
        assert_eq!(images.prompts(), vec![thumbnail.prompt.clone()]);

        let objects = store.objects.lock().unwrap();
        assert_eq!(objects.len(), 1);
        assert_eq!(objects[0].2, "image/png");
    }

    #[tokio::test]
    async fn test_blank_product_info_makes_no_calls() {
        let images = FakeImageGenerator::returning("https://images.test/tmp.png");
        let store = MemoryBlobStore::default();

        let err = generate_thumbnail(&images, &store, &input("  ")).await.unwrap_err();

        assert!(matches!(err, AppError::Validation(_)));
        assert!(images.prompts().is_empty());
    }

    #[tokio::test]
    async fn test_provider_failure_is_prefixed() {
        let images = FakeImageGenerator::failing(500, "upstream down");
        let store = MemoryBlobStore::default();

        let err = generate_thumbnail(&images, &store, &input("Shed plans")).await.unwrap_err();

        assert!(matches!(err, AppError::Generation(_)));
        assert!(err.to_string().contains("Thumbnail generation failed"));
        assert!(store.objects.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_unconfigured_generator_is_config_error() {
        let generator = OpenAiImageGenerator::new(&ImageConfig {
            api_url: "http://127.0.0.1:9".to_string(),
            api_key: None,
            model: "dall-e-3".to_string(),
        });

        let err = generator.generate("x").await.unwrap_err();
        assert!(matches!(err, ProviderError::NotConfigured("IMAGE_API_KEY")));
    }
}
