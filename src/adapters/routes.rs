use axum::{
    extract::DefaultBodyLimit,
    middleware,
    routing::{get, post},
    Router,
};

use crate::adapters::{
    controllers::{
        auth_controller::AuthController, file_controller::FileController,
        health_controller::HealthController, quota_controller::QuotaController,
        upload_controller::UploadController,
    },
    middleware::require_auth,
    state::AppState,
};

async fn service_banner() -> &'static str {
    "podcaster-service"
}

pub fn build_router(state: AppState) -> Router {
    // Multipart bodies carry the whole file; leave headroom over the payload
    // limit for the boundary framing.
    let body_limit =
        DefaultBodyLimit::max(state.storage_config.max_file_size as usize + 64 * 1024);

    // Everything file-, quota- or task-shaped requires a verified bearer
    // token.
    let protected_routes = Router::new()
        .route(
            "/api/files",
            post(FileController::upload_file)
                .get(FileController::list_files)
                .delete(FileController::bulk_delete),
        )
        .route(
            "/api/files/{file_id}",
            get(FileController::get_file)
                .patch(FileController::rename_file)
                .delete(FileController::delete_file),
        )
        .route("/api/uploads", get(UploadController::list_tasks))
        .route(
            "/api/uploads/{task_id}",
            get(UploadController::get_task).delete(UploadController::dismiss_task),
        )
        .route("/api/storage/usage", get(QuotaController::usage))
        .route("/api/storage/can-upload", get(QuotaController::can_upload))
        .route("/api/storage/objects", get(QuotaController::stored_objects))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_auth))
        .layer(body_limit);

    let public_routes = Router::new()
        .route("/", get(service_banner))
        .route("/api/health", get(HealthController::health_check))
        .route("/api/auth/signup", post(AuthController::sign_up))
        .route("/api/auth/signin", post(AuthController::sign_in))
        .route("/api/auth/signout", post(AuthController::sign_out))
        .route("/api/auth/session", get(AuthController::session))
        .route(
            "/api/auth/reset-password",
            post(AuthController::reset_password),
        )
        .route("/api/auth/callback", get(AuthController::oauth_callback));

    Router::new()
        .merge(protected_routes)
        .merge(public_routes)
        .with_state(state)
}
