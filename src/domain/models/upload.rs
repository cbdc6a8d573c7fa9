use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An audio file as received from the client, before it reaches the store.
#[derive(Debug, Clone)]
pub struct AudioFile {
    pub content: Vec<u8>,
    pub file_name: String,
    pub mime_type: String,
}

impl AudioFile {
    pub fn new(content: Vec<u8>, file_name: String, mime_type: String) -> Self {
        Self {
            content,
            file_name,
            mime_type,
        }
    }

    pub fn byte_size(&self) -> u64 {
        self.content.len() as u64
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UploadState {
    Pending,
    Uploading,
    Completed,
    Error,
}

impl UploadState {
    pub fn is_terminal(self) -> bool {
        matches!(self, UploadState::Completed | UploadState::Error)
    }
}

/// Session-scoped tracking entry for one upload attempt.
///
/// `pending → uploading → {completed | error}`; a file that fails validation
/// enters `error` directly and is never submitted. Terminal states are final,
/// there is no retry transition. The id is a random session key with no
/// uniqueness guarantee beyond that.
#[derive(Debug, Clone, Serialize)]
pub struct UploadTask {
    pub id: String,
    pub owner_id: Uuid,
    pub file_name: String,
    pub byte_size: u64,
    pub progress: f32,
    pub state: UploadState,
    pub error: Option<String>,
    pub storage_url: Option<String>,
}

impl UploadTask {
    pub fn new(owner_id: Uuid, file_name: String, byte_size: u64) -> Self {
        Self {
            id: Uuid::new_v4().simple().to_string(),
            owner_id,
            file_name,
            byte_size,
            progress: 0.0,
            state: UploadState::Pending,
            error: None,
            storage_url: None,
        }
    }

    pub fn start(&mut self) {
        if self.state == UploadState::Pending {
            self.state = UploadState::Uploading;
        }
    }

    /// Progress ticks are ignored outside the uploading state and clamped to
    /// [0, 100]; the transfer delivers them in non-decreasing loaded order.
    pub fn record_progress(&mut self, loaded: u64, total: u64) {
        if self.state != UploadState::Uploading || total == 0 {
            return;
        }
        self.progress = (loaded as f32 / total as f32 * 100.0).clamp(0.0, 100.0);
    }

    pub fn complete(&mut self, storage_url: String) {
        if self.state.is_terminal() {
            return;
        }
        self.state = UploadState::Completed;
        self.progress = 100.0;
        self.storage_url = Some(storage_url);
    }

    pub fn fail(&mut self, reason: String) {
        if self.state.is_terminal() {
            return;
        }
        self.state = UploadState::Error;
        self.error = Some(reason);
    }
}
