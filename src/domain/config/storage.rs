use serde::{Deserialize, Serialize};

pub const DEFAULT_MAX_FILE_SIZE: u64 = 100 * 1024 * 1024;
pub const DEFAULT_MAX_USER_STORAGE: u64 = 1024 * 1024 * 1024;
pub const DEFAULT_BUCKET_NAME: &str = "podcast-files";

/// Upload limits and the audio allow-lists. Loaded once at startup; every
/// component that validates or accounts reads from the same instance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    #[serde(rename = "bucketName")]
    pub bucket_name: String,
    #[serde(rename = "maxFileSize")]
    pub max_file_size: u64,
    #[serde(rename = "maxUserStorage")]
    pub max_user_storage: u64,
    #[serde(rename = "allowedMimeTypes")]
    pub allowed_mime_types: Vec<String>,
    #[serde(rename = "allowedExtensions")]
    pub allowed_extensions: Vec<String>,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            bucket_name: DEFAULT_BUCKET_NAME.to_string(),
            max_file_size: DEFAULT_MAX_FILE_SIZE,
            max_user_storage: DEFAULT_MAX_USER_STORAGE,
            allowed_mime_types: [
                "audio/mpeg",
                "audio/wav",
                "audio/mp4",
                "audio/m4a",
                "audio/ogg",
                "audio/webm",
                "audio/aac",
                "audio/flac",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
            allowed_extensions: [
                ".mp3", ".wav", ".mp4", ".m4a", ".ogg", ".webm", ".aac", ".flac",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
        }
    }
}

impl StorageConfig {
    /// Defaults overridden by MAX_FILE_SIZE, MAX_USER_STORAGE, STORAGE_BUCKET,
    /// ALLOWED_MIME_TYPES and ALLOWED_EXTENSIONS (comma-separated lists).
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(bucket) = std::env::var("STORAGE_BUCKET") {
            config.bucket_name = bucket;
        }
        if let Some(max) = env_u64("MAX_FILE_SIZE") {
            config.max_file_size = max;
        }
        if let Some(max) = env_u64("MAX_USER_STORAGE") {
            config.max_user_storage = max;
        }
        if let Some(list) = env_list("ALLOWED_MIME_TYPES") {
            config.allowed_mime_types = list;
        }
        if let Some(list) = env_list("ALLOWED_EXTENSIONS") {
            config.allowed_extensions = list;
        }

        config
    }
}

fn env_u64(name: &str) -> Option<u64> {
    let raw = std::env::var(name).ok()?;
    Some(
        raw.parse::<u64>()
            .unwrap_or_else(|_| panic!("{} must be a positive integer, got '{}'", name, raw)),
    )
}

fn env_list(name: &str) -> Option<Vec<String>> {
    let raw = std::env::var(name).ok()?;
    Some(
        raw.split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect(),
    )
}
