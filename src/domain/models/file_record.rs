use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Pipeline state of an uploaded file. Written as `uploaded` exactly once at
/// record creation; every later transition comes from the processing pipeline
/// and is only mirrored here, never advanced locally.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProcessingStatus {
    Uploaded,
    Processing,
    Completed,
    Error,
}

impl ProcessingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProcessingStatus::Uploaded => "uploaded",
            ProcessingStatus::Processing => "processing",
            ProcessingStatus::Completed => "completed",
            ProcessingStatus::Error => "error",
        }
    }

    /// Unknown values from the store fall back to `uploaded`; this side only
    /// mirrors upstream and must not fail a row decode over a new status.
    pub fn from_db(value: &str) -> Self {
        match value {
            "processing" => ProcessingStatus::Processing,
            "completed" => ProcessingStatus::Completed,
            "error" => ProcessingStatus::Error,
            _ => ProcessingStatus::Uploaded,
        }
    }
}

/// One row of the `podcasts` table, mirrored locally after a fetch.
///
/// `byte_size` and `storage_url` are write-once: set by a successful upload and
/// never altered by any list, sort, filter or selection operation afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileRecord {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub title: Option<String>,
    pub file_name: String,
    pub byte_size: i64,
    pub storage_url: String,
    pub status: ProcessingStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl FileRecord {
    /// Human label shown in listings; falls back to the original file name.
    pub fn display_title(&self) -> &str {
        self.title
            .as_deref()
            .filter(|t| !t.is_empty())
            .unwrap_or(&self.file_name)
    }
}

/// Insert payload for a freshly uploaded file. The store assigns id and
/// timestamps; status always starts at `uploaded`.
#[derive(Debug, Clone)]
pub struct NewFileRecord {
    pub owner_id: Uuid,
    pub title: Option<String>,
    pub file_name: String,
    pub byte_size: i64,
    pub storage_url: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_round_trips_through_db_strings() {
        for status in [
            ProcessingStatus::Uploaded,
            ProcessingStatus::Processing,
            ProcessingStatus::Completed,
            ProcessingStatus::Error,
        ] {
            assert_eq!(ProcessingStatus::from_db(status.as_str()), status);
        }
    }

    #[test]
    fn unknown_status_maps_to_uploaded() {
        assert_eq!(
            ProcessingStatus::from_db("transcribing"),
            ProcessingStatus::Uploaded
        );
    }

    #[test]
    fn display_title_falls_back_to_file_name() {
        let mut record = FileRecord {
            id: Uuid::new_v4(),
            owner_id: Uuid::new_v4(),
            title: None,
            file_name: "episode-01.mp3".to_string(),
            byte_size: 1024,
            storage_url: "https://example.com/x".to_string(),
            status: ProcessingStatus::Uploaded,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        assert_eq!(record.display_title(), "episode-01.mp3");

        record.title = Some(String::new());
        assert_eq!(record.display_title(), "episode-01.mp3");

        record.title = Some("Pilot".to_string());
        assert_eq!(record.display_title(), "Pilot");
    }
}
