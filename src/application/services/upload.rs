use std::sync::Arc;

use uuid::Uuid;

use crate::{
    application::{
        error::ApplicationError,
        services::{ObjectStorage, ProgressFn},
        validation::validate_file,
    },
    domain::{config::storage::StorageConfig, models::upload::AudioFile},
};

/// What a successful upload hands back: the resolved public URL plus the
/// original (pre-keying) file name and size.
#[derive(Debug, Clone)]
pub struct StoredObject {
    pub storage_url: String,
    pub file_name: String,
    pub byte_size: u64,
}

/// Sequences one upload: re-validate, build the storage key, put with progress
/// forwarding, resolve the public URL. No retries, no internal concurrency;
/// concurrent invocations are fully independent of each other.
pub struct UploadOrchestrator {
    storage: Arc<dyn ObjectStorage>,
    config: StorageConfig,
}

impl UploadOrchestrator {
    pub fn new(storage: Arc<dyn ObjectStorage>, config: StorageConfig) -> Self {
        Self { storage, config }
    }

    pub async fn upload(
        &self,
        file: AudioFile,
        owner_id: Uuid,
        on_progress: Option<ProgressFn>,
    ) -> Result<StoredObject, ApplicationError> {
        // Callers validate before submitting, but nothing reaches the store
        // unless it passes here too.
        validate_file(
            &file.file_name,
            file.byte_size(),
            &file.mime_type,
            &self.config,
        )
        .map_err(ApplicationError::Validation)?;

        let key = object_key(owner_id, &file.file_name);
        let byte_size = file.byte_size();
        let file_name = file.file_name;

        self.storage
            .put(&key, file.content, &file.mime_type, on_progress)
            .await?;

        Ok(StoredObject {
            storage_url: self.storage.public_url(&key),
            file_name,
            byte_size,
        })
    }
}

/// `{owner}/{millis}-{name}`: the timestamp prefix only avoids name collisions
/// within one owner's namespace, it is not an ordering key. Two same-named
/// uploads in the same millisecond can still collide.
pub fn object_key(owner_id: Uuid, file_name: &str) -> String {
    use std::time::{SystemTime, UNIX_EPOCH};
    let millis = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis();
    object_key_at(owner_id, millis, file_name)
}

fn object_key_at(owner_id: Uuid, millis: u128, file_name: &str) -> String {
    format!("{}/{}-{}", owner_id, millis, file_name)
}
