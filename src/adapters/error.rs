use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use tracing::{error, warn};

use crate::application::error::ApplicationError;

impl IntoResponse for ApplicationError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            ApplicationError::Validation(ref msg) => {
                warn!("File rejected: {}", msg);
                (StatusCode::BAD_REQUEST, msg.clone())
            }
            ApplicationError::RemoteAuth(ref msg) => {
                warn!("Auth provider rejection: {}", msg);
                (StatusCode::BAD_REQUEST, msg.clone())
            }
            ApplicationError::BadRequest(ref msg) => {
                warn!("Bad request: {}", msg);
                (StatusCode::BAD_REQUEST, "Bad request".to_string())
            }
            ApplicationError::Unauthorized => {
                warn!("Unauthorized access attempt");
                (StatusCode::UNAUTHORIZED, "Unauthorized".to_string())
            }
            ApplicationError::NotFound => {
                warn!("Resource not found");
                (StatusCode::NOT_FOUND, "Resource not found".to_string())
            }
            ApplicationError::RemoteStorage(ref msg) => {
                error!("Object store error: {}", msg);
                (StatusCode::BAD_GATEWAY, msg.clone())
            }
            ApplicationError::RemoteQuery(ref msg) => {
                error!("Database error: {}", msg);
                (StatusCode::BAD_GATEWAY, msg.clone())
            }
            ApplicationError::Internal(ref msg) => {
                error!("Internal server error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": error_message,
        }));

        (status, body).into_response()
    }
}
