//! Voice-over synthesis through an ElevenLabs-compatible speech API

use std::collections::BTreeMap;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::config::ElevenLabsConfig;
use crate::error::{AppError, AppResult, ProviderError};
use crate::services::blob_storage::{BlobStore, random_key};

const TTS_MODEL_ID: &str = "eleven_multilingual_v2";
const AUDIO_CONTENT_TYPE: &str = "audio/mpeg";

/// Tuning values, each within [0, 1]
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct VoiceSettings {
    pub stability: f32,
    pub similarity_boost: f32,
    pub style: f32,
}

impl Default for VoiceSettings {
    fn default() -> Self {
        Self {
            stability: 0.5,
            similarity_boost: 0.75,
            style: 0.0,
        }
    }
}

impl VoiceSettings {
    pub fn new(stability: Option<f32>, similarity_boost: Option<f32>, style: Option<f32>) -> AppResult<Self> {
        let defaults = Self::default();
        let settings = Self {
            stability: stability.unwrap_or(defaults.stability),
            similarity_boost: similarity_boost.unwrap_or(defaults.similarity_boost),
            style: style.unwrap_or(defaults.style),
        };

        for (name, value) in [
            ("stability", settings.stability),
            ("similarityBoost", settings.similarity_boost),
            ("style", settings.style),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(AppError::Validation(format!("{} must be between 0 and 1", name)));
            }
        }

        Ok(settings)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProviderVoice {
    pub voice_id: String,
    pub name: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub preview_url: Option<String>,
    #[serde(default)]
    pub labels: BTreeMap<String, String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VoiceOver {
    pub audio_url: String,
    pub audio_key: String,
}

#[async_trait]
pub trait SpeechSynthesizer: Send + Sync {
    async fn synthesize(&self, text: &str, voice_id: &str, settings: VoiceSettings) -> Result<Vec<u8>, ProviderError>;

    async fn list_voices(&self) -> Result<Vec<ProviderVoice>, ProviderError>;
}

/// Synthesize `text` and store the audio. Nothing is written to the database
/// here; callers record the URL themselves.
pub async fn generate_voiceover(
    speech: &dyn SpeechSynthesizer,
    store: &dyn BlobStore,
    text: &str,
    voice_id: &str,
    settings: VoiceSettings,
) -> AppResult<VoiceOver> {
    if text.trim().is_empty() {
        return Err(AppError::Validation("Script text is required".to_string()));
    }
    if voice_id.trim().is_empty() {
        return Err(AppError::Validation("Please select a voice".to_string()));
    }

    tracing::info!(voice_id = %voice_id, chars = text.len(), "Generating voice-over");

    let audio = speech
        .synthesize(text, voice_id, settings)
        .await
        .map_err(|e| e.into_app_error("Voice generation failed"))?;

    let key = random_key("voiceovers", "mp3");
    let stored = store
        .put(&key, audio, AUDIO_CONTENT_TYPE)
        .await
        .map_err(|e| e.into_app_error("Voice generation failed"))?;

    Ok(VoiceOver {
        audio_url: stored.url,
        audio_key: stored.key,
    })
}

/// Always asks the provider; there is no local cache
pub async fn list_voices(speech: &dyn SpeechSynthesizer) -> AppResult<Vec<ProviderVoice>> {
    speech
        .list_voices()
        .await
        .map_err(|e| e.into_app_error("Failed to fetch voices"))
}

#[derive(Clone)]
pub struct ElevenLabsClient {
    client: Client,
    base_url: String,
    api_key: Option<String>,
}

#[derive(Debug, Deserialize)]
struct VoicesResponse {
    #[serde(default)]
    voices: Vec<ProviderVoice>,
}

/// ElevenLabs reports `{"detail": {"message": ...}}` or `{"detail": "..."}`
fn provider_detail(body: &str) -> String {
    let parsed: Option<serde_json::Value> = serde_json::from_str(body).ok();
    parsed
        .as_ref()
        .and_then(|v| v.get("detail"))
        .and_then(|d| {
            d.get("message")
                .and_then(|m| m.as_str())
                .or_else(|| d.as_str())
                .map(str::to_string)
        })
        .unwrap_or_else(|| body.to_string())
}

impl ElevenLabsClient {
    pub fn new(config: &ElevenLabsConfig) -> Self {
        Self {
            client: Client::new(),
            base_url: config.base_url.clone(),
            api_key: config.api_key.clone(),
        }
    }

    fn api_key(&self) -> Result<&str, ProviderError> {
        self.api_key
            .as_deref()
            .ok_or(ProviderError::NotConfigured("ELEVENLABS_API_KEY"))
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url, ProviderError> {
        let mut url = Url::parse(&self.base_url)
            .map_err(|e| ProviderError::InvalidResponse(format!("Invalid ElevenLabs base URL: {}", e)))?;
        url.path_segments_mut()
            .map_err(|_| ProviderError::InvalidResponse("ElevenLabs base URL cannot be a base".to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn check(response: reqwest::Response) -> Result<reqwest::Response, ProviderError> {
        if response.status().is_success() {
            return Ok(response);
        }
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        tracing::error!(status = %status, body = %body, "ElevenLabs request failed");
        Err(ProviderError::Api {
            provider: "ElevenLabs",
            status: status.as_u16(),
            detail: provider_detail(&body),
        })
    }
}

#[async_trait]
impl SpeechSynthesizer for ElevenLabsClient {
    async fn synthesize(&self, text: &str, voice_id: &str, settings: VoiceSettings) -> Result<Vec<u8>, ProviderError> {
        let api_key = self.api_key()?;
        let url = self.endpoint(&["v1", "text-to-speech", voice_id])?;

        let body = serde_json::json!({
            "text": text,
            "model_id": TTS_MODEL_ID,
            "voice_settings": {
                "stability": settings.stability,
                "similarity_boost": settings.similarity_boost,
                "style": settings.style,
                "use_speaker_boost": true,
            },
        });

        let response = self
            .client
            .post(url)
            .header("xi-api-key", api_key)
            .header(reqwest::header::ACCEPT, AUDIO_CONTENT_TYPE)
            .json(&body)
            .send()
            .await?;

        let response = Self::check(response).await?;
        let audio = response.bytes().await?;

        tracing::debug!(voice_id = %voice_id, bytes = audio.len(), "Received audio");
        Ok(audio.to_vec())
    }

    async fn list_voices(&self) -> Result<Vec<ProviderVoice>, ProviderError> {
        let api_key = self.api_key()?;
        let url = self.endpoint(&["v1", "voices"])?;

        let response = self
            .client
            .get(url)
            .header("xi-api-key", api_key)
            .send()
            .await?;

        let data: VoicesResponse = Self::check(response).await?.json().await?;
        tracing::info!("Fetched {} voices from ElevenLabs", data.voices.len());

        Ok(data.voices)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::fakes::{FakeSpeech, MemoryBlobStore};

    #[test]
    fn test_settings_defaults_and_bounds() {
        let s = VoiceSettings::new(None, None, None).unwrap();
        assert_eq!(s, VoiceSettings { stability: 0.5, similarity_boost: 0.75, style: 0.0 });

        assert!(VoiceSettings::new(Some(1.0), Some(0.0), Some(0.3)).is_ok());
        assert!(matches!(
            VoiceSettings::new(Some(1.2), None, None),
            Err(AppError::Validation(_))
        ));
        assert!(VoiceSettings::new(None, None, Some(-0.1)).is_err());
    }

    #[test]
    fn test_provider_detail_extraction() {
        assert_eq!(
            provider_detail(r#"{"detail":{"status":"quota_exceeded","message":"Quota exceeded"}}"#),
            "Quota exceeded"
        );
        assert_eq!(provider_detail(r#"{"detail":"Not found"}"#), "Not found");
        assert_eq!(provider_detail("gateway timeout"), "gateway timeout");
    }

    #[test]
    fn test_endpoint_escapes_voice_id() {
        let client = ElevenLabsClient::new(&ElevenLabsConfig {
            base_url: "https://api.elevenlabs.io/".to_string(),
            api_key: None,
        });
        let url = client.endpoint(&["v1", "text-to-speech", "abc/def"]).unwrap();
        assert_eq!(url.as_str(), "https://api.elevenlabs.io/v1/text-to-speech/abc%2Fdef");
    }

    #[tokio::test]
    async fn test_voiceover_stored_as_mpeg() {
        let speech = FakeSpeech::returning(b"ID3audio");
        let store = MemoryBlobStore::default();

        let result = generate_voiceover(&speech, &store, "Hello there", "voice-1", VoiceSettings::default())
            .await
            .unwrap();

        assert!(result.audio_key.starts_with("voiceovers/"));
        assert_eq!(result.audio_url, format!("https://storage.test/{}", result.audio_key));

        let objects = store.objects.lock().unwrap();
        assert_eq!(objects.len(), 1);
        assert_eq!(objects[0].1, b"ID3audio".to_vec());
        assert_eq!(objects[0].2, "audio/mpeg");
    }

    #[tokio::test]
    async fn test_provider_error_wrapped_and_nothing_stored() {
        let speech = FakeSpeech::failing(401, "Invalid API key");
        let store = MemoryBlobStore::default();

        let err = generate_voiceover(&speech, &store, "Hello", "voice-1", VoiceSettings::default())
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Generation(ref m) if m.starts_with("Voice generation failed") && m.contains("Invalid API key")));
        assert!(store.objects.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_missing_voice_is_validation_error() {
        let speech = FakeSpeech::returning(b"x");
        let store = MemoryBlobStore::default();

        let err = generate_voiceover(&speech, &store, "Hello", " ", VoiceSettings::default())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        assert!(speech.calls.lock().unwrap().is_empty());
    }
}
