use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::models::file_record::{FileRecord, ProcessingStatus};

#[derive(Debug, Serialize)]
pub struct FileResponse {
    pub id: Uuid,
    #[serde(rename = "ownerId")]
    pub owner_id: Uuid,
    pub title: String,
    #[serde(rename = "fileName")]
    pub file_name: String,
    #[serde(rename = "byteSize")]
    pub byte_size: i64,
    #[serde(rename = "storageUrl")]
    pub storage_url: String,
    pub status: ProcessingStatus,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}

impl From<FileRecord> for FileResponse {
    fn from(record: FileRecord) -> Self {
        let title = record.display_title().to_string();
        Self {
            id: record.id,
            owner_id: record.owner_id,
            title,
            file_name: record.file_name,
            byte_size: record.byte_size,
            storage_url: record.storage_url,
            status: record.status,
            created_at: record.created_at,
            updated_at: record.updated_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct UploadFileResponse {
    #[serde(rename = "taskId")]
    pub task_id: String,
    pub file: FileResponse,
}

#[derive(Debug, Deserialize)]
pub struct RenameFileRequest {
    pub title: String,
}

#[derive(Debug, Deserialize)]
pub struct BulkDeleteRequest {
    pub ids: Vec<Uuid>,
}

#[derive(Debug, Serialize)]
pub struct BulkDeleteResponse {
    #[serde(rename = "deletedCount")]
    pub deleted_count: usize,
}
