#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use sea_orm::{DatabaseConnection, Transaction};
use serde_json::Value;
use tower::ServiceExt;

use affiliate_studio::error::ProviderError;
use affiliate_studio::services::blob_storage::{BlobStore, StoredObject};
use affiliate_studio::services::image_generation::ImageGenerator;
use affiliate_studio::services::llm::{CompletionRequest, TextGenerator};
use affiliate_studio::services::video_synthesis::{GenerationRequest, VideoProvider, VideoTask};
use affiliate_studio::services::voice_synthesis::{ProviderVoice, SpeechSynthesizer, VoiceSettings};
use affiliate_studio::{AppState, app_router};

pub const USER_ID: &str = "7";

/// Answers every completion with the same text and counts calls
pub struct ScriptedLlm {
    reply: Option<String>,
    pub calls: Mutex<usize>,
}

impl ScriptedLlm {
    pub fn replying(reply: &str) -> Self {
        Self { reply: Some(reply.to_string()), calls: Mutex::new(0) }
    }
}

#[async_trait]
impl TextGenerator for ScriptedLlm {
    async fn complete(&self, _request: CompletionRequest) -> Result<Option<String>, ProviderError> {
        *self.calls.lock().unwrap() += 1;
        Ok(self.reply.clone())
    }
}

pub struct StubSpeech;

#[async_trait]
impl SpeechSynthesizer for StubSpeech {
    async fn synthesize(&self, _text: &str, _voice_id: &str, _settings: VoiceSettings) -> Result<Vec<u8>, ProviderError> {
        Ok(vec![0x49, 0x44, 0x33])
    }

    async fn list_voices(&self) -> Result<Vec<ProviderVoice>, ProviderError> {
        Ok(vec![ProviderVoice {
            voice_id: "voice-1".to_string(),
            name: "Rachel".to_string(),
            category: Some("premade".to_string()),
            description: None,
            preview_url: None,
            labels: Default::default(),
        }])
    }
}

/// Succeeds immediately with one output URL and records submissions.
/// A failing stub reports a provider error once the task is submitted.
#[derive(Default)]
pub struct StubVideo {
    pub submissions: Mutex<Vec<GenerationRequest>>,
    fail: bool,
}

impl StubVideo {
    pub fn failing() -> Self {
        Self { fail: true, ..Default::default() }
    }
}

#[async_trait]
impl VideoProvider for StubVideo {
    async fn submit(&self, request: &GenerationRequest) -> Result<String, ProviderError> {
        self.submissions.lock().unwrap().push(request.clone());
        Ok("task-123".to_string())
    }

    async fn wait_for_output(&self, task_id: &str) -> Result<VideoTask, ProviderError> {
        if self.fail {
            return Err(ProviderError::Api {
                provider: "Runway",
                status: 500,
                detail: "task failed".to_string(),
            });
        }
        Ok(VideoTask {
            id: task_id.to_string(),
            output: vec!["https://provider.example/out.mp4".to_string()],
        })
    }

    async fn download(&self, _url: &str) -> Result<Vec<u8>, ProviderError> {
        Ok(vec![0, 0, 0, 24])
    }
}

pub struct StubBlobs;

#[async_trait]
impl BlobStore for StubBlobs {
    async fn put(&self, key: &str, _bytes: Vec<u8>, _content_type: &str) -> Result<StoredObject, ProviderError> {
        Ok(StoredObject {
            key: key.to_string(),
            url: format!("https://cdn.example/{}", key),
        })
    }
}

/// Hands out a fixed provider URL and records prompts
#[derive(Default)]
pub struct StubImages {
    pub prompts: Mutex<Vec<String>>,
}

#[async_trait]
impl ImageGenerator for StubImages {
    async fn generate(&self, prompt: &str) -> Result<String, ProviderError> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        Ok("https://images.example/tmp.png".to_string())
    }

    async fn download(&self, _url: &str) -> Result<Vec<u8>, ProviderError> {
        Ok(vec![0x89, 0x50, 0x4e, 0x47])
    }
}

pub struct TestApp {
    pub router: Router,
    pub llm: Arc<ScriptedLlm>,
    pub video: Arc<StubVideo>,
    pub images: Arc<StubImages>,
    pub db: Option<Arc<DatabaseConnection>>,
}

impl TestApp {
    /// Statements the mock database saw, in order. Drops the router so the
    /// connection is no longer shared.
    pub fn into_transaction_log(self) -> Vec<Transaction> {
        let TestApp { router, db, .. } = self;
        drop(router);
        let db = db.expect("app has no database");
        Arc::try_unwrap(db)
            .ok()
            .expect("database still shared")
            .into_transaction_log()
    }
}

/// Router backed by stub providers and no database
pub fn test_app(llm_reply: &str) -> TestApp {
    test_app_with(llm_reply, StubVideo::default(), None)
}

/// Router backed by stub providers and, optionally, a mock database
pub fn test_app_with(llm_reply: &str, video: StubVideo, db: Option<DatabaseConnection>) -> TestApp {
    let llm = Arc::new(ScriptedLlm::replying(llm_reply));
    let video = Arc::new(video);
    let images = Arc::new(StubImages::default());
    let db = db.map(Arc::new);
    let state = AppState {
        db: db.clone(),
        llm: llm.clone(),
        speech: Arc::new(StubSpeech),
        video: video.clone(),
        blobs: Arc::new(StubBlobs),
        images: images.clone(),
        http: reqwest::Client::new(),
    };

    TestApp { router: app_router(state), llm, video, images, db }
}

pub async fn send(router: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = if body.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body).unwrap()
    };
    (status, json)
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .header("x-user-id", USER_ID)
        .body(Body::empty())
        .unwrap()
}

pub fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("x-user-id", USER_ID)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}
