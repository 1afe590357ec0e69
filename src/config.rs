//! Environment-driven configuration
//!
//! Provider credentials are optional at startup. An operation that needs a
//! missing provider fails with a configuration error when it is invoked.

use std::env;

const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:3000";
const DEFAULT_LLM_API_URL: &str = "https://api.openai.com";
const DEFAULT_LLM_MODEL: &str = "gpt-4o-mini";
const DEFAULT_IMAGE_MODEL: &str = "dall-e-3";
const DEFAULT_ELEVENLABS_BASE_URL: &str = "https://api.elevenlabs.io";
const DEFAULT_RUNWAY_BASE_URL: &str = "https://api.dev.runwayml.com";
const DEFAULT_RUNWAY_MAX_WAIT_SECS: u64 = 600;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bind_address: String,
    pub database_url: Option<String>,
    pub llm: LlmConfig,
    pub images: ImageConfig,
    pub elevenlabs: ElevenLabsConfig,
    pub runway: RunwayConfig,
    pub storage: StorageConfig,
}

#[derive(Debug, Clone)]
pub struct LlmConfig {
    pub api_url: String,
    pub api_key: Option<String>,
    pub model: String,
}

/// Falls back to the LLM endpoint and key when unset
#[derive(Debug, Clone)]
pub struct ImageConfig {
    pub api_url: String,
    pub api_key: Option<String>,
    pub model: String,
}

#[derive(Debug, Clone)]
pub struct ElevenLabsConfig {
    pub base_url: String,
    pub api_key: Option<String>,
}

#[derive(Debug, Clone)]
pub struct RunwayConfig {
    pub base_url: String,
    pub api_key: Option<String>,
    pub max_wait_secs: u64,
}

#[derive(Debug, Clone)]
pub struct StorageConfig {
    pub api_url: Option<String>,
    pub api_key: Option<String>,
}

/// Read an env var, treating empty values as unset
fn optional_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.trim().is_empty())
}

impl AppConfig {
    pub fn from_env() -> Self {
        let max_wait_secs = optional_var("RUNWAY_MAX_WAIT_SECS")
            .and_then(|v| match v.parse::<u64>() {
                Ok(secs) => Some(secs),
                Err(_) => {
                    tracing::warn!(value = %v, "Ignoring invalid RUNWAY_MAX_WAIT_SECS");
                    None
                }
            })
            .unwrap_or(DEFAULT_RUNWAY_MAX_WAIT_SECS);

        let llm = LlmConfig {
            api_url: optional_var("LLM_API_URL").unwrap_or_else(|| DEFAULT_LLM_API_URL.to_string()),
            api_key: optional_var("LLM_API_KEY"),
            model: optional_var("LLM_MODEL").unwrap_or_else(|| DEFAULT_LLM_MODEL.to_string()),
        };
        let images = ImageConfig {
            api_url: optional_var("IMAGE_API_URL").unwrap_or_else(|| llm.api_url.clone()),
            api_key: optional_var("IMAGE_API_KEY").or_else(|| llm.api_key.clone()),
            model: optional_var("IMAGE_MODEL").unwrap_or_else(|| DEFAULT_IMAGE_MODEL.to_string()),
        };

        Self {
            bind_address: optional_var("BIND_ADDRESS")
                .unwrap_or_else(|| DEFAULT_BIND_ADDRESS.to_string()),
            database_url: optional_var("DATABASE_URL"),
            llm,
            images,
            elevenlabs: ElevenLabsConfig {
                base_url: optional_var("ELEVENLABS_BASE_URL")
                    .unwrap_or_else(|| DEFAULT_ELEVENLABS_BASE_URL.to_string()),
                api_key: optional_var("ELEVENLABS_API_KEY"),
            },
            runway: RunwayConfig {
                base_url: optional_var("RUNWAY_BASE_URL")
                    .unwrap_or_else(|| DEFAULT_RUNWAY_BASE_URL.to_string()),
                api_key: optional_var("RUNWAY_API_KEY"),
                max_wait_secs,
            },
            storage: StorageConfig {
                api_url: optional_var("STORAGE_API_URL"),
                api_key: optional_var("STORAGE_API_KEY"),
            },
        }
    }
}
