use std::sync::Arc;

use axum::{
    extract::{Multipart, Path, Query, State},
    http::StatusCode,
    Extension, Json,
};
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::{
    adapters::{
        dto::file_dto::{
            BulkDeleteRequest, BulkDeleteResponse, FileResponse, RenameFileRequest,
            UploadFileResponse,
        },
        state::AppState,
    },
    application::{
        error::ApplicationError,
        listing::FileQuery,
        services::{storage_key_from_url, ProgressFn},
        validation::validate_file,
    },
    domain::models::{
        file_record::{FileRecord, NewFileRecord},
        session::AuthUser,
        upload::AudioFile,
    },
};

pub struct FileController;

impl FileController {
    /// POST /api/files — multipart upload: a `file` part plus an optional
    /// `title`. The attempt is tracked from the moment the payload is parsed;
    /// a validation rejection lands the task in `error` without touching the
    /// store.
    pub async fn upload_file(
        State(app_state): State<AppState>,
        Extension(user): Extension<AuthUser>,
        mut multipart: Multipart,
    ) -> Result<(StatusCode, Json<UploadFileResponse>), ApplicationError> {
        let mut audio: Option<AudioFile> = None;
        let mut title: Option<String> = None;

        while let Some(field) = multipart.next_field().await.map_err(|e| {
            warn!("Invalid multipart data: {}", e);
            ApplicationError::BadRequest("Invalid request format".to_string())
        })? {
            let name = field.name().unwrap_or("").to_string();

            match name.as_str() {
                "file" => {
                    let file_name = field
                        .file_name()
                        .map(|s| s.to_string())
                        .filter(|s| !s.is_empty())
                        .ok_or_else(|| {
                            ApplicationError::BadRequest("Missing file name".to_string())
                        })?;
                    let mime_type = field
                        .content_type()
                        .unwrap_or("application/octet-stream")
                        .to_string();
                    let content = field
                        .bytes()
                        .await
                        .map_err(|e| {
                            warn!("Cannot read file bytes: {}", e);
                            ApplicationError::BadRequest("Invalid file data".to_string())
                        })?
                        .to_vec();

                    audio = Some(AudioFile::new(content, file_name, mime_type));
                }
                "title" => {
                    title = Some(field.text().await.map_err(|e| {
                        warn!("Invalid title field: {}", e);
                        ApplicationError::BadRequest("Invalid request data".to_string())
                    })?);
                }
                _ => {}
            }
        }

        let audio = audio.ok_or_else(|| {
            warn!("Missing required 'file' field in upload");
            ApplicationError::BadRequest("Missing required field".to_string())
        })?;

        if audio.content.is_empty() {
            return Err(ApplicationError::BadRequest("Empty file upload".to_string()));
        }

        let task_id =
            app_state
                .upload_tracker
                .register(user.id, &audio.file_name, audio.byte_size());

        // Screen before submitting; an inadmissible file goes straight to the
        // error state and is never sent anywhere.
        if let Err(reason) = validate_file(
            &audio.file_name,
            audio.byte_size(),
            &audio.mime_type,
            &app_state.storage_config,
        ) {
            app_state.upload_tracker.fail(&task_id, &reason);
            return Err(ApplicationError::Validation(reason));
        }

        app_state.upload_tracker.start(&task_id);

        let on_progress: ProgressFn = {
            let tracker = app_state.upload_tracker.clone();
            let task_id = task_id.clone();
            Arc::new(move |loaded, total| tracker.record_progress(&task_id, loaded, total))
        };

        let stored = match app_state
            .uploader
            .upload(audio, user.id, Some(on_progress))
            .await
        {
            Ok(stored) => stored,
            Err(err) => {
                app_state.upload_tracker.fail(&task_id, &err.message());
                return Err(err);
            }
        };

        app_state
            .upload_tracker
            .complete(&task_id, &stored.storage_url);

        let record = app_state
            .files
            .insert(NewFileRecord {
                owner_id: user.id,
                title: title.filter(|t| !t.is_empty()),
                file_name: stored.file_name,
                byte_size: stored.byte_size as i64,
                storage_url: stored.storage_url,
            })
            .await
            .map_err(|err| {
                // The object is already stored; without a record it is
                // orphaned until a cleanup pass.
                error!("Record insert failed after upload: {}", err.message());
                err
            })?;

        info!("File uploaded for {}: {}", user.id, record.id);

        Ok((
            StatusCode::CREATED,
            Json(UploadFileResponse {
                task_id,
                file: FileResponse::from(record),
            }),
        ))
    }

    /// GET /api/files?search=&sort=&order= — fetches the owner's snapshot and
    /// derives the requested view from it.
    pub async fn list_files(
        State(app_state): State<AppState>,
        Extension(user): Extension<AuthUser>,
        Query(query): Query<FileQuery>,
    ) -> Result<Json<Vec<FileResponse>>, ApplicationError> {
        let snapshot = app_state.files.list_by_owner(user.id).await?;
        let view = query.apply(&snapshot);
        Ok(Json(view.into_iter().map(FileResponse::from).collect()))
    }

    pub async fn get_file(
        State(app_state): State<AppState>,
        Extension(user): Extension<AuthUser>,
        Path(file_id): Path<Uuid>,
    ) -> Result<Json<FileResponse>, ApplicationError> {
        let record = app_state.files.get(user.id, file_id).await?;
        Ok(Json(FileResponse::from(record)))
    }

    /// PATCH /api/files/{file_id} — rename the display title.
    pub async fn rename_file(
        State(app_state): State<AppState>,
        Extension(user): Extension<AuthUser>,
        Path(file_id): Path<Uuid>,
        Json(body): Json<RenameFileRequest>,
    ) -> Result<Json<FileResponse>, ApplicationError> {
        if body.title.trim().is_empty() {
            return Err(ApplicationError::BadRequest(
                "Title must not be empty".to_string(),
            ));
        }

        let record = app_state
            .files
            .rename(user.id, file_id, body.title.trim())
            .await?;
        Ok(Json(FileResponse::from(record)))
    }

    /// DELETE /api/files/{file_id} — removes the record, then clears the
    /// stored object best-effort.
    pub async fn delete_file(
        State(app_state): State<AppState>,
        Extension(user): Extension<AuthUser>,
        Path(file_id): Path<Uuid>,
    ) -> Result<StatusCode, ApplicationError> {
        let record = app_state.files.delete(user.id, file_id).await?;
        remove_stored_objects(&app_state, &[record]).await;

        info!("File deleted for {}: {}", user.id, file_id);
        Ok(StatusCode::NO_CONTENT)
    }

    /// DELETE /api/files — one remote delete covering the whole id set. On
    /// failure nothing is pruned and the error surfaces as-is.
    pub async fn bulk_delete(
        State(app_state): State<AppState>,
        Extension(user): Extension<AuthUser>,
        Json(body): Json<BulkDeleteRequest>,
    ) -> Result<Json<BulkDeleteResponse>, ApplicationError> {
        if body.ids.is_empty() {
            return Ok(Json(BulkDeleteResponse { deleted_count: 0 }));
        }

        let removed = app_state.files.delete_many(user.id, &body.ids).await?;
        remove_stored_objects(&app_state, &removed).await;

        info!("Bulk delete for {}: {} records", user.id, removed.len());
        Ok(Json(BulkDeleteResponse {
            deleted_count: removed.len(),
        }))
    }
}

/// Record rows are authoritative; once they are gone the stored bytes are
/// cleared in one remove call. A storage failure here is logged, not
/// surfaced, so the listing stays consistent with the table.
async fn remove_stored_objects(app_state: &AppState, removed: &[FileRecord]) {
    let keys: Vec<String> = removed
        .iter()
        .filter_map(|record| storage_key_from_url(&record.storage_url))
        .collect();

    if keys.is_empty() {
        return;
    }

    if let Err(err) = app_state.object_storage.remove(&keys).await {
        error!(
            "Failed to remove {} stored object(s): {}",
            keys.len(),
            err.message()
        );
    }
}
