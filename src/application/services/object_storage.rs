use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;

use crate::application::error::ApplicationError;

/// Transfer progress callback: (loaded bytes, total bytes), forwarded verbatim
/// from the storage client to whoever started the upload.
pub type ProgressFn = Arc<dyn Fn(u64, u64) + Send + Sync>;

#[derive(Debug, Clone, Serialize)]
pub struct StorageEntry {
    pub name: String,
    #[serde(rename = "byteSize")]
    pub byte_size: Option<u64>,
}

/// The object-store boundary this core touches: put with progress, public URL
/// resolution, bulk remove, prefix listing.
#[async_trait]
pub trait ObjectStorage: Send + Sync {
    /// Stores `content` under `key` and returns the stored path. Progress
    /// ticks arrive in non-decreasing loaded order up to completion.
    async fn put(
        &self,
        key: &str,
        content: Vec<u8>,
        mime_type: &str,
        progress: Option<ProgressFn>,
    ) -> Result<String, ApplicationError>;

    fn public_url(&self, key: &str) -> String;

    async fn remove(&self, keys: &[String]) -> Result<(), ApplicationError>;

    async fn list(&self, prefix: &str) -> Result<Vec<StorageEntry>, ApplicationError>;
}

/// Recovers the `{owner}/{timestamp}-{name}` storage key from a public URL by
/// taking its last two path segments. Returns None for URLs that do not have
/// that shape.
pub fn storage_key_from_url(url: &str) -> Option<String> {
    let path = url.split(['?', '#']).next().unwrap_or(url);
    let mut segments = path.split('/').rev().filter(|s| !s.is_empty());
    let object = segments.next()?;
    let owner = segments.next()?;
    Some(format!("{}/{}", owner, object))
}
