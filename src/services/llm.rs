//! Text-generation collaborator
//!
//! Speaks the OpenAI-compatible chat completions protocol. Callers either ask
//! for free-form text or pass a strict JSON schema via `response_format`.

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::config::LlmConfig;
use crate::error::{AppError, AppResult, ProviderError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self { role: Role::System, content: content.into() }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self { role: Role::User, content: content.into() }
    }
}

/// Strict JSON schema the output must match
#[derive(Debug, Clone, PartialEq)]
pub struct JsonSchema {
    pub name: &'static str,
    pub schema: Value,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    pub messages: Vec<ChatMessage>,
    pub schema: Option<JsonSchema>,
}

impl CompletionRequest {
    pub fn text(system: impl Into<String>, user: impl Into<String>) -> Self {
        Self {
            messages: vec![ChatMessage::system(system), ChatMessage::user(user)],
            schema: None,
        }
    }

    pub fn structured(system: impl Into<String>, user: impl Into<String>, schema: JsonSchema) -> Self {
        Self {
            messages: vec![ChatMessage::system(system), ChatMessage::user(user)],
            schema: Some(schema),
        }
    }
}

#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Content of the first choice. `None` when the provider returned no
    /// string content.
    async fn complete(&self, request: CompletionRequest) -> Result<Option<String>, ProviderError>;
}

/// Run a structured request and decode the JSON answer.
///
/// Missing content is "No content generated"; anything that does not
/// deserialize into `T` is a generation error as well.
pub async fn generate_structured<T: DeserializeOwned>(
    llm: &dyn TextGenerator,
    request: CompletionRequest,
) -> AppResult<T> {
    let content = llm
        .complete(request)
        .await
        .map_err(|e| e.into_app_error("Text generation failed"))?;

    parse_structured(content)
}

pub fn parse_structured<T: DeserializeOwned>(content: Option<String>) -> AppResult<T> {
    let content = match content {
        Some(c) if !c.trim().is_empty() => c,
        _ => return Err(AppError::Generation("No content generated".to_string())),
    };

    serde_json::from_str(&content).map_err(|e| {
        tracing::warn!(error = %e, "Unparsable structured response");
        AppError::Generation(format!("Invalid structured response: {}", e))
    })
}

/// Schema "number" fields come back as `3` or `3.0` depending on the model
pub fn de_whole_number<'de, D>(deserializer: D) -> Result<i32, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = f64::deserialize(deserializer)?;
    if !value.is_finite() {
        return Err(serde::de::Error::custom("expected a finite number"));
    }
    Ok(value.round() as i32)
}

#[derive(Clone)]
pub struct OpenAiTextGenerator {
    client: Client,
    api_url: String,
    api_key: Option<String>,
    model: String,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: Option<ChoiceMessage>,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Value,
}

impl OpenAiTextGenerator {
    pub fn new(config: &LlmConfig) -> Self {
        Self {
            client: Client::new(),
            api_url: config.api_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            model: config.model.clone(),
        }
    }

    fn request_body(&self, request: &CompletionRequest) -> Value {
        let mut body = serde_json::json!({
            "model": self.model,
            "messages": request.messages,
        });

        if let Some(schema) = &request.schema {
            body["response_format"] = serde_json::json!({
                "type": "json_schema",
                "json_schema": {
                    "name": schema.name,
                    "strict": true,
                    "schema": schema.schema,
                },
            });
        }

        body
    }
}

#[async_trait]
impl TextGenerator for OpenAiTextGenerator {
    async fn complete(&self, request: CompletionRequest) -> Result<Option<String>, ProviderError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or(ProviderError::NotConfigured("LLM_API_KEY"))?;

        let url = format!("{}/v1/chat/completions", self.api_url);
        tracing::debug!(
            model = %self.model,
            structured = request.schema.is_some(),
            "Invoking text generation"
        );

        let response = self
            .client
            .post(&url)
            .bearer_auth(api_key)
            .json(&self.request_body(&request))
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(ProviderError::Api {
                provider: "LLM",
                status: status.as_u16(),
                detail: error_text,
            });
        }

        let data: ChatCompletionResponse = response.json().await?;

        Ok(data
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message)
            .and_then(|m| m.content.as_str().map(str::to_string)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Deserialize)]
    struct Sample {
        headline: String,
    }

    #[test]
    fn test_parse_structured_missing_content() {
        let err = parse_structured::<Sample>(None).unwrap_err();
        assert_eq!(err.to_string(), "No content generated");

        let err = parse_structured::<Sample>(Some("   ".to_string())).unwrap_err();
        assert_eq!(err.to_string(), "No content generated");
    }

    #[test]
    fn test_parse_structured_rejects_wrong_shape() {
        let err = parse_structured::<Sample>(Some(r#"{"title": "x"}"#.to_string())).unwrap_err();
        assert!(matches!(err, AppError::Generation(_)));
    }

    #[derive(Debug, Deserialize)]
    struct Scored {
        #[serde(deserialize_with = "de_whole_number")]
        score: i32,
    }

    #[test]
    fn test_whole_number_accepts_floats() {
        let s: Scored = serde_json::from_str(r#"{"score": 72.0}"#).unwrap();
        assert_eq!(s.score, 72);
        let s: Scored = serde_json::from_str(r#"{"score": 8}"#).unwrap();
        assert_eq!(s.score, 8);
    }

    #[test]
    fn test_parse_structured_ok() {
        let s: Sample = parse_structured(Some(r#"{"headline": "Hi"}"#.to_string())).unwrap();
        assert_eq!(s.headline, "Hi");
    }

    #[test]
    fn test_request_body_includes_schema() {
        let generator = OpenAiTextGenerator::new(&LlmConfig {
            api_url: "http://localhost/".to_string(),
            api_key: None,
            model: "test-model".to_string(),
        });
        let request = CompletionRequest::structured(
            "sys",
            "user",
            JsonSchema { name: "demo", schema: serde_json::json!({"type": "object"}) },
        );

        let body = generator.request_body(&request);
        assert_eq!(body["model"], "test-model");
        assert_eq!(body["messages"][0]["role"], "system");
        assert_eq!(body["response_format"]["json_schema"]["name"], "demo");
        assert_eq!(body["response_format"]["json_schema"]["strict"], true);
        assert_eq!(generator.api_url, "http://localhost");
    }

    #[tokio::test]
    async fn test_missing_key_is_configuration_error() {
        let generator = OpenAiTextGenerator::new(&LlmConfig {
            api_url: "http://localhost".to_string(),
            api_key: None,
            model: "m".to_string(),
        });

        let err = generate_structured::<Sample>(&generator, CompletionRequest::text("a", "b"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Configuration(_)));
    }
}
