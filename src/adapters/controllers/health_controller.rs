use axum::{extract::State, Json};
use serde::Serialize;
use sysinfo::System;

use crate::adapters::state::AppState;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub config: HealthConfigInfo,
    pub metrics: SystemMetrics,
}

#[derive(Debug, Serialize)]
pub struct HealthConfigInfo {
    #[serde(rename = "maxFileSize")]
    pub max_file_size: u64,
    #[serde(rename = "maxUserStorage")]
    pub max_user_storage: u64,
    #[serde(rename = "bucketName")]
    pub bucket_name: String,
    #[serde(rename = "allowedMimeTypes")]
    pub allowed_mime_types: Vec<String>,
    #[serde(rename = "allowedExtensions")]
    pub allowed_extensions: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct SystemMetrics {
    #[serde(rename = "cpuUsagePercent")]
    pub cpu_usage_percent: f32,
    #[serde(rename = "memoryUsedBytes")]
    pub memory_used_bytes: u64,
    #[serde(rename = "memoryTotalBytes")]
    pub memory_total_bytes: u64,
    #[serde(rename = "memoryUsagePercent")]
    pub memory_usage_percent: f32,
}

pub struct HealthController;

impl HealthController {
    /// GET /api/health
    pub async fn health_check(State(app_state): State<AppState>) -> Json<HealthResponse> {
        let config = &app_state.storage_config;
        let config_info = HealthConfigInfo {
            max_file_size: config.max_file_size,
            max_user_storage: config.max_user_storage,
            bucket_name: config.bucket_name.clone(),
            allowed_mime_types: config.allowed_mime_types.clone(),
            allowed_extensions: config.allowed_extensions.clone(),
        };

        // Only refresh what the response reports.
        let mut sys = System::new();
        sys.refresh_cpu_usage();
        sys.refresh_memory();

        let memory_used = sys.used_memory();
        let memory_total = sys.total_memory();
        let memory_usage_percent = if memory_total > 0 {
            (memory_used as f32 / memory_total as f32) * 100.0
        } else {
            0.0
        };

        Json(HealthResponse {
            status: "healthy".to_string(),
            config: config_info,
            metrics: SystemMetrics {
                cpu_usage_percent: sys.global_cpu_usage(),
                memory_used_bytes: memory_used,
                memory_total_bytes: memory_total,
                memory_usage_percent,
            },
        })
    }
}
