//! Durable blob storage collaborator
//!
//! Objects go to a storage proxy (`POST {base}/v1/storage/upload?path=<key>`)
//! which answers with the public URL of the stored object.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::config::StorageConfig;
use crate::error::ProviderError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredObject {
    pub key: String,
    pub url: String,
}

#[async_trait]
pub trait BlobStore: Send + Sync {
    async fn put(&self, key: &str, bytes: Vec<u8>, content_type: &str) -> Result<StoredObject, ProviderError>;
}

/// `<prefix>/<uuid>.<ext>`
pub fn random_key(prefix: &str, extension: &str) -> String {
    format!(
        "{}/{}.{}",
        prefix.trim_end_matches('/'),
        uuid::Uuid::new_v4().simple(),
        extension
    )
}

#[derive(Clone)]
pub struct HttpBlobStore {
    client: Client,
    api_url: Option<String>,
    api_key: Option<String>,
}

#[derive(Debug, Deserialize)]
struct UploadResponse {
    url: String,
}

impl HttpBlobStore {
    pub fn new(config: &StorageConfig) -> Self {
        Self {
            client: Client::new(),
            api_url: config.api_url.as_ref().map(|u| u.trim_end_matches('/').to_string()),
            api_key: config.api_key.clone(),
        }
    }
}

#[async_trait]
impl BlobStore for HttpBlobStore {
    async fn put(&self, key: &str, bytes: Vec<u8>, content_type: &str) -> Result<StoredObject, ProviderError> {
        let api_url = self
            .api_url
            .as_deref()
            .ok_or(ProviderError::NotConfigured("STORAGE_API_URL"))?;
        let api_key = self
            .api_key
            .as_deref()
            .ok_or(ProviderError::NotConfigured("STORAGE_API_KEY"))?;

        let size = bytes.len();
        let url = format!("{}/v1/storage/upload", api_url);

        let response = self
            .client
            .post(&url)
            .bearer_auth(api_key)
            .query(&[("path", key)])
            .header(reqwest::header::CONTENT_TYPE, content_type)
            .body(bytes)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(ProviderError::Api {
                provider: "Storage",
                status: status.as_u16(),
                detail: error_text,
            });
        }

        let data: UploadResponse = response.json().await?;
        tracing::info!(key = %key, bytes = size, content_type = %content_type, "Stored object");

        Ok(StoredObject {
            key: key.to_string(),
            url: data.url,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_key_shape() {
        let a = random_key("voiceovers/", "mp3");
        let b = random_key("voiceovers", "mp3");

        assert!(a.starts_with("voiceovers/"));
        assert!(a.ends_with(".mp3"));
        assert!(!a.contains("//"));
        assert_ne!(a, b);
    }

    #[tokio::test]
    async fn test_unconfigured_store_fails_fast() {
        let store = HttpBlobStore::new(&StorageConfig { api_url: None, api_key: None });
        let err = store.put("k", vec![1, 2, 3], "audio/mpeg").await.unwrap_err();
        assert!(matches!(err, ProviderError::NotConfigured("STORAGE_API_URL")));
    }
}
