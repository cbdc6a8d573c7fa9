use async_trait::async_trait;
use aws_sdk_s3::{
    config::{BehaviorVersion, Credentials, Region},
    primitives::ByteStream,
    types::{Delete, ObjectIdentifier},
    Client,
};

use crate::{
    application::{
        error::ApplicationError,
        services::{ObjectStorage, ProgressFn, StorageEntry},
    },
    domain::config::{remote::S3Config, storage::StorageConfig},
    services::error::StorageError,
};

/// Object storage over any S3-compatible endpoint (Supabase's S3 protocol,
/// minio, plain S3). The SDK owns the transfer, so progress is only reported
/// at the start and completion boundaries.
pub struct S3StorageService {
    client: Client,
    endpoint: String,
    bucket_name: String,
}

impl S3StorageService {
    pub fn new(config: S3Config, storage: &StorageConfig) -> Self {
        let credentials = Credentials::new(
            config.access_key_id,
            config.secret_access_key,
            None,
            None,
            "podcaster-service",
        );

        let sdk_config = aws_sdk_s3::Config::builder()
            .behavior_version(BehaviorVersion::latest())
            .region(Region::new(config.region))
            .endpoint_url(&config.endpoint)
            .credentials_provider(credentials)
            .force_path_style(true)
            .build();

        Self {
            client: Client::from_conf(sdk_config),
            endpoint: config.endpoint,
            bucket_name: storage.bucket_name.clone(),
        }
    }
}

#[async_trait]
impl ObjectStorage for S3StorageService {
    async fn put(
        &self,
        key: &str,
        content: Vec<u8>,
        mime_type: &str,
        progress: Option<ProgressFn>,
    ) -> Result<String, ApplicationError> {
        let total = content.len() as u64;
        if let Some(ref on_progress) = progress {
            on_progress(0, total);
        }

        self.client
            .put_object()
            .bucket(&self.bucket_name)
            .key(key)
            .content_type(mime_type)
            .body(ByteStream::from(content))
            .send()
            .await
            .map_err(|e| StorageError::ProviderError(format!("Upload failed: {}", e)))?;

        if let Some(on_progress) = progress {
            on_progress(total, total);
        }

        Ok(key.to_string())
    }

    fn public_url(&self, key: &str) -> String {
        format!("{}/{}/{}", self.endpoint, self.bucket_name, key)
    }

    async fn remove(&self, keys: &[String]) -> Result<(), ApplicationError> {
        let mut objects = Vec::with_capacity(keys.len());
        for key in keys {
            let object = ObjectIdentifier::builder()
                .key(key)
                .build()
                .map_err(|e| StorageError::InternalError(e.to_string()))?;
            objects.push(object);
        }

        let delete = Delete::builder()
            .set_objects(Some(objects))
            .build()
            .map_err(|e| StorageError::InternalError(e.to_string()))?;

        self.client
            .delete_objects()
            .bucket(&self.bucket_name)
            .delete(delete)
            .send()
            .await
            .map_err(|e| StorageError::ProviderError(format!("Delete failed: {}", e)))?;

        Ok(())
    }

    async fn list(&self, prefix: &str) -> Result<Vec<StorageEntry>, ApplicationError> {
        let output = self
            .client
            .list_objects_v2()
            .bucket(&self.bucket_name)
            .prefix(prefix)
            .send()
            .await
            .map_err(|e| StorageError::ProviderError(format!("List failed: {}", e)))?;

        Ok(output
            .contents()
            .iter()
            .filter_map(|object| {
                object.key().map(|key| StorageEntry {
                    name: key.to_string(),
                    byte_size: object.size().map(|s| s.max(0) as u64),
                })
            })
            .collect())
    }
}
