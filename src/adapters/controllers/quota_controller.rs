use axum::{
    extract::{Query, State},
    Extension, Json,
};
use serde::Serialize;

use crate::{
    adapters::{dto::quota_dto::CanUploadQuery, state::AppState},
    application::{error::ApplicationError, services::StorageEntry},
    domain::models::{quota::QuotaSnapshot, session::AuthUser},
};

#[derive(Debug, Serialize)]
pub struct CanUploadResponse {
    pub allowed: bool,
}

pub struct QuotaController;

impl QuotaController {
    /// GET /api/storage/usage — fresh snapshot; nothing is cached, staleness
    /// resolves on the next call.
    pub async fn usage(
        State(app_state): State<AppState>,
        Extension(user): Extension<AuthUser>,
    ) -> Json<QuotaSnapshot> {
        Json(app_state.quota.snapshot(user.id).await)
    }

    /// GET /api/storage/can-upload?size= — precheck only; the upload path
    /// itself never consults it.
    pub async fn can_upload(
        State(app_state): State<AppState>,
        Extension(user): Extension<AuthUser>,
        Query(query): Query<CanUploadQuery>,
    ) -> Json<CanUploadResponse> {
        let allowed = app_state.quota.can_upload(user.id, query.size).await;
        Json(CanUploadResponse { allowed })
    }

    /// GET /api/storage/objects — raw listing of the owner's stored objects.
    pub async fn stored_objects(
        State(app_state): State<AppState>,
        Extension(user): Extension<AuthUser>,
    ) -> Result<Json<Vec<StorageEntry>>, ApplicationError> {
        let entries = app_state
            .object_storage
            .list(&user.id.to_string())
            .await?;
        Ok(Json(entries))
    }
}
