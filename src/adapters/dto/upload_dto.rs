use serde::Serialize;

use crate::domain::models::upload::{UploadState, UploadTask};

#[derive(Debug, Serialize)]
pub struct UploadTaskResponse {
    #[serde(rename = "taskId")]
    pub task_id: String,
    #[serde(rename = "fileName")]
    pub file_name: String,
    #[serde(rename = "byteSize")]
    pub byte_size: u64,
    pub progress: f32,
    pub state: UploadState,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(rename = "storageUrl", skip_serializing_if = "Option::is_none")]
    pub storage_url: Option<String>,
}

impl From<UploadTask> for UploadTaskResponse {
    fn from(task: UploadTask) -> Self {
        Self {
            task_id: task.id,
            file_name: task.file_name,
            byte_size: task.byte_size,
            progress: task.progress,
            state: task.state,
            error: task.error,
            storage_url: task.storage_url,
        }
    }
}
