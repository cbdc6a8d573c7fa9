use async_trait::async_trait;
use bytes::Bytes;
use reqwest::{header, Client};
use serde::Deserialize;
use serde_json::json;

use crate::{
    application::{
        error::ApplicationError,
        services::{ObjectStorage, ProgressFn, StorageEntry},
    },
    domain::config::{remote::SupabaseConfig, storage::StorageConfig},
    services::error::StorageError,
};

/// Bytes per progress tick while streaming an upload body.
const PROGRESS_CHUNK: usize = 64 * 1024;

pub struct SupabaseStorageService {
    client: Client,
    storage_url: String,
    api_key: String,
    bucket_name: String,
}

impl SupabaseStorageService {
    pub fn new(config: SupabaseConfig, storage: &StorageConfig) -> Self {
        Self {
            client: Client::new(),
            storage_url: format!("{}/storage/v1", config.url.trim_end_matches('/')),
            api_key: config.service_role_key,
            bucket_name: storage.bucket_name.clone(),
        }
    }

    fn object_url(&self, key: &str) -> String {
        format!("{}/object/{}/{}", self.storage_url, self.bucket_name, key)
    }

    /// Streams the payload in fixed chunks so the transfer can report loaded
    /// byte counts as the client pulls them.
    fn progress_body(content: Vec<u8>, progress: Option<ProgressFn>) -> reqwest::Body {
        let Some(on_progress) = progress else {
            return reqwest::Body::from(content);
        };

        let buf = Bytes::from(content);
        let len = buf.len();
        let total = len as u64;
        on_progress(0, total);

        let chunks = (0..len).step_by(PROGRESS_CHUNK).map(move |start| {
            let end = (start + PROGRESS_CHUNK).min(len);
            let chunk = buf.slice(start..end);
            on_progress(end as u64, total);
            Ok::<_, std::io::Error>(chunk)
        });

        reqwest::Body::wrap_stream(futures::stream::iter(chunks))
    }
}

#[derive(Debug, Deserialize)]
struct ListedObject {
    name: String,
    #[serde(default)]
    metadata: Option<ListedObjectMetadata>,
}

#[derive(Debug, Deserialize)]
struct ListedObjectMetadata {
    #[serde(default)]
    size: Option<u64>,
}

#[async_trait]
impl ObjectStorage for SupabaseStorageService {
    async fn put(
        &self,
        key: &str,
        content: Vec<u8>,
        mime_type: &str,
        progress: Option<ProgressFn>,
    ) -> Result<String, ApplicationError> {
        let total = content.len() as u64;
        let body = Self::progress_body(content, progress);

        let response = self
            .client
            .post(self.object_url(key))
            .header(header::AUTHORIZATION, format!("Bearer {}", self.api_key))
            .header("apikey", &self.api_key)
            .header(header::CONTENT_TYPE, mime_type)
            .header(header::CONTENT_LENGTH, total)
            .header(header::CACHE_CONTROL, "3600")
            .header("x-upsert", "false")
            .body(body)
            .send()
            .await
            .map_err(StorageError::from)?;

        if !response.status().is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(
                StorageError::ProviderError(format!("Upload failed: {}", error_text)).into(),
            );
        }

        Ok(key.to_string())
    }

    fn public_url(&self, key: &str) -> String {
        format!(
            "{}/object/public/{}/{}",
            self.storage_url, self.bucket_name, key
        )
    }

    async fn remove(&self, keys: &[String]) -> Result<(), ApplicationError> {
        let url = format!("{}/object/{}", self.storage_url, self.bucket_name);

        let response = self
            .client
            .delete(&url)
            .header(header::AUTHORIZATION, format!("Bearer {}", self.api_key))
            .header("apikey", &self.api_key)
            .json(&json!({ "prefixes": keys }))
            .send()
            .await
            .map_err(StorageError::from)?;

        if !response.status().is_success() {
            return Err(StorageError::ProviderError(format!(
                "Delete failed with status: {}",
                response.status()
            ))
            .into());
        }

        Ok(())
    }

    async fn list(&self, prefix: &str) -> Result<Vec<StorageEntry>, ApplicationError> {
        let url = format!("{}/object/list/{}", self.storage_url, self.bucket_name);

        let response = self
            .client
            .post(&url)
            .header(header::AUTHORIZATION, format!("Bearer {}", self.api_key))
            .header("apikey", &self.api_key)
            .json(&json!({
                "prefix": prefix,
                "limit": 100,
                "offset": 0,
                "sortBy": { "column": "created_at", "order": "desc" },
            }))
            .send()
            .await
            .map_err(StorageError::from)?;

        if !response.status().is_success() {
            return Err(StorageError::ProviderError(format!(
                "List failed with status: {}",
                response.status()
            ))
            .into());
        }

        let objects: Vec<ListedObject> = response
            .json()
            .await
            .map_err(|e| StorageError::InternalError(e.to_string()))?;

        Ok(objects
            .into_iter()
            .map(|o| StorageEntry {
                name: o.name,
                byte_size: o.metadata.and_then(|m| m.size),
            })
            .collect())
    }
}
