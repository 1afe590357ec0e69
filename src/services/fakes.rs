//! In-memory collaborators for unit tests

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::error::ProviderError;
use crate::services::blob_storage::{BlobStore, StoredObject};
use crate::services::image_generation::ImageGenerator;
use crate::services::llm::{CompletionRequest, Role, TextGenerator};
use crate::services::video_synthesis::{GenerationRequest, VideoProvider, VideoTask};
use crate::services::voice_synthesis::{ProviderVoice, SpeechSynthesizer, VoiceSettings};

/// Replies with the same content to every request
pub struct FakeTextGenerator {
    reply: Result<Option<String>, String>,
    requests: Mutex<Vec<CompletionRequest>>,
}

impl FakeTextGenerator {
    pub fn replying(content: &str) -> Self {
        Self { reply: Ok(Some(content.to_string())), requests: Mutex::new(Vec::new()) }
    }

    pub fn empty() -> Self {
        Self { reply: Ok(None), requests: Mutex::new(Vec::new()) }
    }

    pub fn failing(detail: &str) -> Self {
        Self { reply: Err(detail.to_string()), requests: Mutex::new(Vec::new()) }
    }

    pub fn calls(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn last_request(&self) -> Option<CompletionRequest> {
        self.requests.lock().unwrap().last().cloned()
    }

    pub fn last_user_prompt(&self) -> String {
        self.last_request()
            .and_then(|r| r.messages.into_iter().find(|m| m.role == Role::User))
            .map(|m| m.content)
            .unwrap_or_default()
    }

    pub fn last_system_prompt(&self) -> String {
        self.last_request()
            .and_then(|r| r.messages.into_iter().find(|m| m.role == Role::System))
            .map(|m| m.content)
            .unwrap_or_default()
    }
}

#[async_trait]
impl TextGenerator for FakeTextGenerator {
    async fn complete(&self, request: CompletionRequest) -> Result<Option<String>, ProviderError> {
        self.requests.lock().unwrap().push(request);
        match &self.reply {
            Ok(content) => Ok(content.clone()),
            Err(detail) => Err(ProviderError::InvalidResponse(detail.clone())),
        }
    }
}

/// Keeps uploads in memory and hands out predictable URLs
#[derive(Default)]
pub struct MemoryBlobStore {
    pub objects: Mutex<Vec<(String, Vec<u8>, String)>>,
}

#[async_trait]
impl BlobStore for MemoryBlobStore {
    async fn put(&self, key: &str, bytes: Vec<u8>, content_type: &str) -> Result<StoredObject, ProviderError> {
        self.objects
            .lock()
            .unwrap()
            .push((key.to_string(), bytes, content_type.to_string()));
        Ok(StoredObject {
            key: key.to_string(),
            url: format!("https://storage.test/{}", key),
        })
    }
}

pub struct FakeSpeech {
    pub audio: Result<Vec<u8>, (u16, String)>,
    pub calls: Mutex<Vec<(String, String, VoiceSettings)>>,
}

impl FakeSpeech {
    pub fn returning(audio: &[u8]) -> Self {
        Self { audio: Ok(audio.to_vec()), calls: Mutex::new(Vec::new()) }
    }

    pub fn failing(status: u16, detail: &str) -> Self {
        Self {
            audio: Err((status, detail.to_string())),
            calls: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl SpeechSynthesizer for FakeSpeech {
    async fn synthesize(&self, text: &str, voice_id: &str, settings: VoiceSettings) -> Result<Vec<u8>, ProviderError> {
        self.calls
            .lock()
            .unwrap()
            .push((text.to_string(), voice_id.to_string(), settings));
        match &self.audio {
            Ok(bytes) => Ok(bytes.clone()),
            Err((status, detail)) => Err(ProviderError::Api {
                provider: "ElevenLabs",
                status: *status,
                detail: detail.clone(),
            }),
        }
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

/// Video provider returning a fixed task; records every submission
pub struct FakeVideoProvider {
    pub output: Vec<String>,
    pub submissions: Mutex<Vec<GenerationRequest>>,
    pub downloads: Mutex<VecDeque<String>>,
}

impl FakeVideoProvider {
    pub fn with_output(urls: &[&str]) -> Self {
        Self {
            output: urls.iter().map(|u| u.to_string()).collect(),
            submissions: Mutex::new(Vec::new()),
            downloads: Mutex::new(VecDeque::new()),
        }
    }

    pub fn submission_count(&self) -> usize {
        self.submissions.lock().unwrap().len()
    }
}

#[async_trait]
impl VideoProvider for FakeVideoProvider {
    async fn submit(&self, request: &GenerationRequest) -> Result<String, ProviderError> {
        self.submissions.lock().unwrap().push(request.clone());
        Ok("task-123".to_string())
    }

    async fn wait_for_output(&self, task_id: &str) -> Result<VideoTask, ProviderError> {
        Ok(VideoTask {
            id: task_id.to_string(),
            output: self.output.clone(),
        })
    }

    async fn download(&self, url: &str) -> Result<Vec<u8>, ProviderError> {
        self.downloads.lock().unwrap().push_back(url.to_string());
        Ok(b"mp4-bytes".to_vec())
    }
}

/// Image generator answering with a fixed URL; records prompts
pub struct FakeImageGenerator {
    reply: Result<String, (u16, String)>,
    prompts: Mutex<Vec<String>>,
}

impl FakeImageGenerator {
    pub fn returning(url: &str) -> Self {
        Self { reply: Ok(url.to_string()), prompts: Mutex::new(Vec::new()) }
    }

    pub fn failing(status: u16, detail: &str) -> Self {
        Self { reply: Err((status, detail.to_string())), prompts: Mutex::new(Vec::new()) }
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl ImageGenerator for FakeImageGenerator {
    async fn generate(&self, prompt: &str) -> Result<String, ProviderError> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        match &self.reply {
            Ok(url) => Ok(url.clone()),
            Err((status, detail)) => Err(ProviderError::Api {
                provider: "Image",
                status: *status,
                detail: detail.clone(),
            }),
        }
    }

    async fn download(&self, _url: &str) -> Result<Vec<u8>, ProviderError> {
        Ok(vec![0x89, 0x50, 0x4e, 0x47])
    }
}
