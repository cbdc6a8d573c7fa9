use async_trait::async_trait;
use uuid::Uuid;

use crate::{
    application::error::ApplicationError,
    domain::models::file_record::{FileRecord, NewFileRecord},
};

/// Row-level access to the remote `podcasts` table. Every operation is scoped
/// to one owner; `storage_usage` is the remote aggregation summing that
/// owner's stored bytes.
#[async_trait]
pub trait FileRepository: Send + Sync {
    async fn insert(&self, record: NewFileRecord) -> Result<FileRecord, ApplicationError>;
    async fn list_by_owner(&self, owner_id: Uuid) -> Result<Vec<FileRecord>, ApplicationError>;
    async fn get(&self, owner_id: Uuid, id: Uuid) -> Result<FileRecord, ApplicationError>;
    async fn rename(
        &self,
        owner_id: Uuid,
        id: Uuid,
        title: &str,
    ) -> Result<FileRecord, ApplicationError>;
    async fn delete(&self, owner_id: Uuid, id: Uuid) -> Result<FileRecord, ApplicationError>;
    /// One remote delete covering the whole id set; returns the removed rows.
    async fn delete_many(
        &self,
        owner_id: Uuid,
        ids: &[Uuid],
    ) -> Result<Vec<FileRecord>, ApplicationError>;
    async fn storage_usage(&self, owner_id: Uuid) -> Result<u64, ApplicationError>;
}
