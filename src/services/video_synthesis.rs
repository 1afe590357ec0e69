//! Video synthesis through Runway's task API
//!
//! Both call shapes (text-to-video and image-to-video) go through one
//! [`VideoProvider`] seam as a [`GenerationRequest`].

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::config::RunwayConfig;
use crate::entities::sea_orm_active_enums::Niche;
use crate::error::{AppError, AppResult, ProviderError};
use crate::services::blob_storage::{BlobStore, random_key};

const RUNWAY_API_VERSION: &str = "2024-11-06";
const POLL_INTERVAL: Duration = Duration::from_secs(5);
const DEFAULT_RATIO: &str = "1280:720";
const TEXT_TO_VIDEO_SECONDS: u32 = 8;
const IMAGE_TO_VIDEO_SECONDS: u32 = 5;
const SCRIPT_CONTEXT_CHARS: usize = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VideoModel {
    #[serde(rename = "veo3")]
    Veo3,
    #[serde(rename = "veo3.1_fast")]
    Veo31Fast,
    #[serde(rename = "gen4_turbo")]
    Gen4Turbo,
}

impl VideoModel {
    pub const ALL: [VideoModel; 3] = [VideoModel::Veo3, VideoModel::Veo31Fast, VideoModel::Gen4Turbo];

    pub fn as_str(&self) -> &'static str {
        match self {
            VideoModel::Veo3 => "veo3",
            VideoModel::Veo31Fast => "veo3.1_fast",
            VideoModel::Gen4Turbo => "gen4_turbo",
        }
    }

    /// gen4_turbo only animates a seed image
    pub fn requires_seed_image(&self) -> bool {
        matches!(self, VideoModel::Gen4Turbo)
    }
}

impl std::fmt::Display for VideoModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum GenerationRequest {
    TextToVideo {
        model: VideoModel,
        prompt_text: String,
        duration: u32,
        ratio: String,
    },
    ImageToVideo {
        prompt_image: String,
        prompt_text: String,
        duration: u32,
        ratio: String,
    },
}

impl GenerationRequest {
    /// Pick the call shape for `model`. Fails before any network call when
    /// an image-only model has no seed image.
    pub fn for_model(model: VideoModel, prompt_text: String, seed_image: Option<&str>) -> AppResult<Self> {
        if model.requires_seed_image() {
            let prompt_image = seed_image
                .filter(|s| !s.trim().is_empty())
                .ok_or_else(|| {
                    AppError::Precondition(format!(
                        "{} requires a thumbnail image for image-to-video generation",
                        model
                    ))
                })?;
            return Ok(GenerationRequest::ImageToVideo {
                prompt_image: prompt_image.to_string(),
                prompt_text,
                duration: IMAGE_TO_VIDEO_SECONDS,
                ratio: DEFAULT_RATIO.to_string(),
            });
        }

        Ok(GenerationRequest::TextToVideo {
            model,
            prompt_text,
            duration: TEXT_TO_VIDEO_SECONDS,
            ratio: DEFAULT_RATIO.to_string(),
        })
    }

    pub fn model(&self) -> VideoModel {
        match self {
            GenerationRequest::TextToVideo { model, .. } => *model,
            GenerationRequest::ImageToVideo { .. } => VideoModel::Gen4Turbo,
        }
    }

    pub fn duration(&self) -> u32 {
        match self {
            GenerationRequest::TextToVideo { duration, .. }
            | GenerationRequest::ImageToVideo { duration, .. } => *duration,
        }
    }

    fn endpoint(&self) -> &'static str {
        match self {
            GenerationRequest::TextToVideo { .. } => "/v1/text_to_video",
            GenerationRequest::ImageToVideo { .. } => "/v1/image_to_video",
        }
    }

    fn body(&self) -> serde_json::Value {
        match self {
            GenerationRequest::TextToVideo { model, prompt_text, duration, ratio } => serde_json::json!({
                "model": model.as_str(),
                "promptText": prompt_text,
                "duration": duration,
                "ratio": ratio,
            }),
            GenerationRequest::ImageToVideo { prompt_image, prompt_text, duration, ratio } => serde_json::json!({
                "model": VideoModel::Gen4Turbo.as_str(),
                "promptImage": prompt_image,
                "promptText": prompt_text,
                "duration": duration,
                "ratio": ratio,
            }),
        }
    }
}

/// A finished provider task
#[derive(Debug, Clone)]
pub struct VideoTask {
    pub id: String,
    pub output: Vec<String>,
}

#[async_trait]
pub trait VideoProvider: Send + Sync {
    /// Submit and return the provider's task id
    async fn submit(&self, request: &GenerationRequest) -> Result<String, ProviderError>;

    /// Block until the task succeeds, fails, or the wait ceiling passes
    async fn wait_for_output(&self, task_id: &str) -> Result<VideoTask, ProviderError>;

    async fn download(&self, url: &str) -> Result<Vec<u8>, ProviderError>;
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedVideo {
    /// Provider-hosted source URL
    pub video_url: String,
    pub storage_key: String,
    pub storage_url: String,
    pub duration: u32,
    pub task_id: String,
    pub model: VideoModel,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelInfo {
    pub model: VideoModel,
    pub name: &'static str,
    pub description: &'static str,
    pub cost_per_second: Decimal,
    pub max_duration: u32,
    pub features: Vec<&'static str>,
}

pub fn model_info(model: VideoModel) -> ModelInfo {
    let (name, description, cost_per_second, max_duration, features) = match model {
        VideoModel::Veo3 => (
            "Veo 3 (via Gemini - FREE)",
            "Google's Veo 3 model via your Gemini API. Free to use, good quality.",
            dec!(0),
            8,
            vec!["Text-to-video", "Free", "720p", "Good quality"],
        ),
        VideoModel::Veo31Fast => (
            "Veo 3.1 Fast (via Runway)",
            "Fast text-to-video generation with good quality.",
            dec!(0.15),
            8,
            vec!["Text-to-video", "Fast generation", "720p", "Good quality"],
        ),
        VideoModel::Gen4Turbo => (
            "Gen-4 Turbo (Runway)",
            "Highest quality image-to-video. Best motion and realism.",
            dec!(0.05),
            10,
            vec!["Image-to-video", "Highest quality", "720p", "Best motion"],
        ),
    };

    ModelInfo {
        model,
        name,
        description,
        cost_per_second,
        max_duration,
        features,
    }
}

fn niche_visual(niche: Niche) -> &'static str {
    match niche {
        Niche::Manifestation => {
            "Cinematic meditation scene, peaceful person in serene environment, golden light, soft focus, inspirational atmosphere, close-up of peaceful face, gentle camera movement"
        }
        Niche::Woodworking => {
            "Professional woodworking workshop, craftsman working with wood, detailed close-ups of hands and tools, warm lighting, sawdust particles in air, smooth camera pan"
        }
        Niche::Prepping => {
            "Survival preparedness scene, organized emergency supplies, outdoor survival setting, confident person with gear, practical demonstration, steady camera, natural lighting"
        }
        _ => {
            "Professional lifestyle scene, modern setting, confident person, clean composition, smooth camera movement, cinematic lighting"
        }
    }
}

pub fn visual_prompt(script: &str, niche: Niche) -> String {
    let context: String = script
        .chars()
        .take(SCRIPT_CONTEXT_CHARS)
        .map(|c| if c == '\n' { ' ' } else { c })
        .collect();

    format!(
        "{}. Context: {}. Professional YouTube ad style, high production value, engaging visuals.",
        niche_visual(niche),
        context
    )
}

/// Validate the inputs and build the provider request. No I/O happens here,
/// so callers can reject a request before touching any stored state.
pub fn prepare_request(
    script: &str,
    niche: Niche,
    model: VideoModel,
    seed_image: Option<&str>,
) -> AppResult<GenerationRequest> {
    if script.trim().is_empty() {
        return Err(AppError::Validation("Script is required".to_string()));
    }
    GenerationRequest::for_model(model, visual_prompt(script, niche), seed_image)
}

/// Submit a prepared request, wait for it and store the first output.
/// There is no fallback to a different model on failure.
pub async fn run_generation(
    provider: &dyn VideoProvider,
    store: &dyn BlobStore,
    request: &GenerationRequest,
) -> AppResult<GeneratedVideo> {
    let model = request.model();
    let duration = request.duration();
    let context = format!("Video generation failed with {}", model);

    tracing::info!(model = %model, "Starting video generation");

    let task_id = provider
        .submit(request)
        .await
        .map_err(|e| e.into_app_error(&context))?;
    tracing::info!(model = %model, task_id = %task_id, "Video task created");

    let task = provider
        .wait_for_output(&task_id)
        .await
        .map_err(|e| e.into_app_error(&context))?;

    let video_url = task
        .output
        .into_iter()
        .next()
        .ok_or_else(|| AppError::Generation(format!("{}: No video output generated", context)))?;

    let bytes = provider
        .download(&video_url)
        .await
        .map_err(|e| e.into_app_error(&context))?;

    let key = random_key(&format!("videos/runway/{}", model), "mp4");
    let stored = store
        .put(&key, bytes, "video/mp4")
        .await
        .map_err(|e| e.into_app_error(&context))?;

    tracing::info!(model = %model, key = %stored.key, "Video stored");

    Ok(GeneratedVideo {
        video_url,
        storage_key: stored.key,
        storage_url: stored.url,
        duration,
        task_id: task.id,
        model,
    })
}

/// Generate a video for `script` and store it
pub async fn generate_video(
    provider: &dyn VideoProvider,
    store: &dyn BlobStore,
    script: &str,
    niche: Niche,
    model: VideoModel,
    seed_image: Option<&str>,
) -> AppResult<GeneratedVideo> {
    let request = prepare_request(script, niche, model, seed_image)?;
    run_generation(provider, store, &request).await
}

#[derive(Debug, Deserialize)]
struct CreatedTask {
    id: String,
}

#[derive(Debug, Deserialize)]
struct TaskStatus {
    id: String,
    status: String,
    #[serde(default)]
    output: Option<Vec<String>>,
    #[serde(default)]
    failure: Option<String>,
}

#[derive(Clone)]
pub struct RunwayClient {
    client: Client,
    base_url: String,
    api_key: Option<String>,
    max_wait: Duration,
}

impl RunwayClient {
    pub fn new(config: &RunwayConfig) -> Self {
        Self {
            client: Client::new(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            max_wait: Duration::from_secs(config.max_wait_secs),
        }
    }

    fn authorized(&self, builder: reqwest::RequestBuilder) -> Result<reqwest::RequestBuilder, ProviderError> {
        let key = self
            .api_key
            .as_deref()
            .ok_or(ProviderError::NotConfigured("RUNWAY_API_KEY"))?;
        Ok(builder.bearer_auth(key).header("X-Runway-Version", RUNWAY_API_VERSION))
    }

    async fn check(response: reqwest::Response) -> Result<reqwest::Response, ProviderError> {
        if response.status().is_success() {
            return Ok(response);
        }
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        tracing::error!(status = %status, body = %body, "Runway request failed");
        let detail = serde_json::from_str::<serde_json::Value>(&body)
            .ok()
            .and_then(|v| v.get("error").and_then(|e| e.as_str()).map(str::to_string))
            .unwrap_or(body);
        Err(ProviderError::Api {
            provider: "Runway",
            status: status.as_u16(),
            detail,
        })
    }

    async fn task_status(&self, task_id: &str) -> Result<TaskStatus, ProviderError> {
        let url = format!("{}/v1/tasks/{}", self.base_url, task_id);
        let response = self.authorized(self.client.get(&url))?.send().await?;
        Ok(Self::check(response).await?.json().await?)
    }
}

#[async_trait]
impl VideoProvider for RunwayClient {
    async fn submit(&self, request: &GenerationRequest) -> Result<String, ProviderError> {
        let url = format!("{}{}", self.base_url, request.endpoint());
        let response = self
            .authorized(self.client.post(&url))?
            .json(&request.body())
            .send()
            .await?;

        let created: CreatedTask = Self::check(response).await?.json().await?;
        Ok(created.id)
    }

    async fn wait_for_output(&self, task_id: &str) -> Result<VideoTask, ProviderError> {
        let started = tokio::time::Instant::now();

        loop {
            let task = self.task_status(task_id).await?;
            match task.status.as_str() {
                "SUCCEEDED" => {
                    return Ok(VideoTask {
                        id: task.id,
                        output: task.output.unwrap_or_default(),
                    });
                }
                "FAILED" | "CANCELLED" => {
                    return Err(ProviderError::InvalidResponse(format!(
                        "Task {} {}: {}",
                        task_id,
                        task.status.to_lowercase(),
                        task.failure.unwrap_or_else(|| "no reason given".to_string())
                    )));
                }
                status => {
                    tracing::debug!(task_id = %task_id, status = %status, "Waiting for video task");
                }
            }

            if started.elapsed() + POLL_INTERVAL > self.max_wait {
                return Err(ProviderError::InvalidResponse(format!(
                    "Task {} did not finish within {}s",
                    task_id,
                    self.max_wait.as_secs()
                )));
            }
            tokio::time::sleep(POLL_INTERVAL).await;
        }
    }

    async fn download(&self, url: &str) -> Result<Vec<u8>, ProviderError> {
        let response = self.client.get(url).send().await?;
        if !response.status().is_success() {
            return Err(ProviderError::InvalidResponse(format!(
                "Failed to download video: {}",
                response.status()
            )));
        }
        Ok(response.bytes().await?.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::fakes::{FakeVideoProvider, MemoryBlobStore};

    #[tokio::test]
    async fn test_gen4_without_seed_makes_no_provider_call() {
        let provider = FakeVideoProvider::with_output(&["https://cdn.runway.test/out.mp4"]);
        let store = MemoryBlobStore::default();

        let err = generate_video(&provider, &store, "A script", Niche::Health, VideoModel::Gen4Turbo, None)
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Precondition(_)));
        assert_eq!(provider.submission_count(), 0);
    }

    #[tokio::test]
    async fn test_veo_models_need_no_seed() {
        for model in [VideoModel::Veo3, VideoModel::Veo31Fast] {
            let provider = FakeVideoProvider::with_output(&["https://cdn.runway.test/out.mp4"]);
            let store = MemoryBlobStore::default();

            let video = generate_video(&provider, &store, "Script line", Niche::Woodworking, model, None)
                .await
                .unwrap();

            assert_eq!(video.duration, 8);
            assert_eq!(video.task_id, "task-123");
            assert_eq!(video.video_url, "https://cdn.runway.test/out.mp4");
            assert!(video.storage_key.starts_with(&format!("videos/runway/{}/", model)));
            assert!(video.storage_key.ends_with(".mp4"));

            let submissions = provider.submissions.lock().unwrap();
            assert!(matches!(&submissions[0], GenerationRequest::TextToVideo { model: m, ratio, .. } if *m == model && ratio == "1280:720"));
        }
    }

    #[tokio::test]
    async fn test_gen4_with_seed_is_image_to_video() {
        let provider = FakeVideoProvider::with_output(&["https://cdn.runway.test/a.mp4"]);
        let store = MemoryBlobStore::default();

        let video = generate_video(
            &provider,
            &store,
            "Script",
            Niche::Health,
            VideoModel::Gen4Turbo,
            Some("https://img.test/seed.png"),
        )
        .await
        .unwrap();

        assert_eq!(video.duration, 5);
        let submissions = provider.submissions.lock().unwrap();
        assert!(matches!(
            &submissions[0],
            GenerationRequest::ImageToVideo { prompt_image, .. } if prompt_image == "https://img.test/seed.png"
        ));
        assert_eq!(store.objects.lock().unwrap()[0].2, "video/mp4");
    }

    #[tokio::test]
    async fn test_empty_output_is_generation_error() {
        let provider = FakeVideoProvider::with_output(&[]);
        let store = MemoryBlobStore::default();

        let err = generate_video(&provider, &store, "Script", Niche::Health, VideoModel::Veo3, None)
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Generation(ref m) if m.starts_with("Video generation failed with veo3")));
        assert!(store.objects.lock().unwrap().is_empty());
    }

    #[test]
    fn test_visual_prompt_truncates_and_flattens_script() {
        let script = format!("Line one\nLine two {}", "x".repeat(200));
        let prompt = visual_prompt(&script, Niche::Prepping);

        assert!(prompt.starts_with("Survival preparedness scene"));
        let context = prompt
            .split(". Context: ")
            .nth(1)
            .and_then(|rest| rest.strip_suffix(". Professional YouTube ad style, high production value, engaging visuals."))
            .unwrap();
        assert_eq!(context.chars().count(), 100);
        assert!(context.starts_with("Line one Line two"));
    }

    #[test]
    fn test_unknown_niche_uses_universal_visual() {
        let prompt = visual_prompt("Hi", Niche::Finance);
        assert!(prompt.starts_with("Professional lifestyle scene"));
    }

    #[test]
    fn test_model_info() {
        let info = model_info(VideoModel::Veo31Fast);
        assert_eq!(info.cost_per_second, dec!(0.15));
        assert_eq!(info.max_duration, 8);

        let info = model_info(VideoModel::Gen4Turbo);
        assert_eq!(info.max_duration, 10);
        assert!(info.features.contains(&"Image-to-video"));

        assert_eq!(model_info(VideoModel::Veo3).cost_per_second, Decimal::ZERO);
    }

    #[test]
    fn test_prepare_request_validates_without_io() {
        let err = prepare_request("Script", Niche::Health, VideoModel::Gen4Turbo, Some("  ")).unwrap_err();
        assert!(matches!(err, AppError::Precondition(_)));

        let err = prepare_request(" ", Niche::Health, VideoModel::Veo3, None).unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));

        let request = prepare_request("Script", Niche::Health, VideoModel::Gen4Turbo, Some("https://img.test/a.png")).unwrap();
        assert_eq!(request.model(), VideoModel::Gen4Turbo);
        assert_eq!(request.duration(), 5);
    }

    #[test]
    fn test_model_serde_names() {
        assert_eq!(serde_json::to_string(&VideoModel::Veo31Fast).unwrap(), "\"veo3.1_fast\"");
        let model: VideoModel = serde_json::from_str("\"gen4_turbo\"").unwrap();
        assert_eq!(model, VideoModel::Gen4Turbo);
    }
}
