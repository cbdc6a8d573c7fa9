use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};

use crate::{
    adapters::{dto::upload_dto::UploadTaskResponse, state::AppState},
    application::error::ApplicationError,
    domain::models::session::AuthUser,
};

pub struct UploadController;

impl UploadController {
    /// GET /api/uploads — the caller's upload attempts, terminal ones
    /// included.
    pub async fn list_tasks(
        State(app_state): State<AppState>,
        Extension(user): Extension<AuthUser>,
    ) -> Json<Vec<UploadTaskResponse>> {
        let tasks = app_state.upload_tracker.tasks_for(user.id);
        Json(tasks.into_iter().map(UploadTaskResponse::from).collect())
    }

    /// GET /api/uploads/{task_id}
    pub async fn get_task(
        State(app_state): State<AppState>,
        Extension(user): Extension<AuthUser>,
        Path(task_id): Path<String>,
    ) -> Result<Json<UploadTaskResponse>, ApplicationError> {
        app_state
            .upload_tracker
            .get(user.id, &task_id)
            .map(|task| Json(UploadTaskResponse::from(task)))
            .ok_or(ApplicationError::NotFound)
    }

    /// DELETE /api/uploads/{task_id} — hides the entry from listings only; an
    /// in-flight transfer keeps going.
    pub async fn dismiss_task(
        State(app_state): State<AppState>,
        Extension(user): Extension<AuthUser>,
        Path(task_id): Path<String>,
    ) -> Result<StatusCode, ApplicationError> {
        if app_state.upload_tracker.dismiss(user.id, &task_id) {
            Ok(StatusCode::NO_CONTENT)
        } else {
            Err(ApplicationError::NotFound)
        }
    }
}
