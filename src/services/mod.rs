mod error;
mod s3_storage;
mod supabase_auth;
mod supabase_storage;

pub use error::{AuthError, StorageError};
pub use s3_storage::S3StorageService;
pub use supabase_auth::SupabaseAuthGateway;
pub use supabase_storage::SupabaseStorageService;

use std::sync::Arc;

use crate::{
    application::services::ObjectStorage,
    domain::config::{
        remote::{RemoteConfig, StorageProvider},
        storage::StorageConfig,
    },
};

pub fn create_object_storage(
    remote: &RemoteConfig,
    storage: &StorageConfig,
) -> Result<Arc<dyn ObjectStorage>, StorageError> {
    match remote.provider {
        StorageProvider::Supabase => Ok(Arc::new(SupabaseStorageService::new(
            remote.supabase.clone(),
            storage,
        ))),
        StorageProvider::S3 => {
            let s3 = remote.s3.clone().ok_or_else(|| {
                StorageError::InternalError("S3 credentials not configured".to_string())
            })?;
            Ok(Arc::new(S3StorageService::new(s3, storage)))
        }
    }
}
