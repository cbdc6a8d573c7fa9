use axum::{
    extract::{Query, State},
    http::{header, HeaderMap, StatusCode},
    response::Redirect,
    Json,
};
use serde_json::Value;
use tracing::{error, info, warn};

use crate::{
    adapters::{
        dto::auth_dto::{
            AuthEnvelope, CredentialsRequest, OAuthCallbackQuery, ResetPasswordRequest,
        },
        session::SessionChange,
        state::AppState,
    },
    application::error::ApplicationError,
    domain::models::session::{AuthSession, AuthUser},
};

pub struct AuthController;

/// Every endpoint here answers with a `{data, error}` envelope: 400 for
/// missing fields and provider rejections, 500 for anything unexpected. The
/// provider's own rejection message is passed through verbatim.
impl AuthController {
    fn credentials(body: CredentialsRequest) -> Option<(String, String)> {
        let email = body.email.filter(|e| !e.is_empty())?;
        let password = body.password.filter(|p| !p.is_empty())?;
        Some((email, password))
    }

    fn session_failure(error: ApplicationError) -> (StatusCode, Json<AuthEnvelope<AuthSession>>) {
        match error {
            ApplicationError::RemoteAuth(message) => {
                warn!("Auth provider rejection: {}", message);
                (StatusCode::BAD_REQUEST, Json(AuthEnvelope::err(message)))
            }
            other => {
                error!("Auth request failed: {:?}", other);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(AuthEnvelope::err("Internal server error")),
                )
            }
        }
    }

    /// POST /api/auth/signin
    pub async fn sign_in(
        State(app_state): State<AppState>,
        Json(body): Json<CredentialsRequest>,
    ) -> (StatusCode, Json<AuthEnvelope<AuthSession>>) {
        let Some((email, password)) = Self::credentials(body) else {
            return (
                StatusCode::BAD_REQUEST,
                Json(AuthEnvelope::err("Email and password are required")),
            );
        };

        match app_state.auth.sign_in(&email, &password).await {
            Ok(session) => {
                info!("User signed in: {}", session.user.id);
                app_state.session_events.publish(SessionChange::SignedIn {
                    user_id: session.user.id,
                    email: session.user.email.clone(),
                });
                (StatusCode::OK, Json(AuthEnvelope::ok(session)))
            }
            Err(error) => Self::session_failure(error),
        }
    }

    /// POST /api/auth/signup
    pub async fn sign_up(
        State(app_state): State<AppState>,
        Json(body): Json<CredentialsRequest>,
    ) -> (StatusCode, Json<AuthEnvelope<AuthSession>>) {
        let Some((email, password)) = Self::credentials(body) else {
            return (
                StatusCode::BAD_REQUEST,
                Json(AuthEnvelope::err("Email and password are required")),
            );
        };

        match app_state.auth.sign_up(&email, &password).await {
            Ok(session) => {
                info!("User signed up: {}", session.user.id);
                app_state.session_events.publish(SessionChange::SignedUp {
                    user_id: session.user.id,
                });
                (StatusCode::OK, Json(AuthEnvelope::ok(session)))
            }
            Err(error) => Self::session_failure(error),
        }
    }

    /// POST /api/auth/signout
    pub async fn sign_out(
        State(app_state): State<AppState>,
        headers: HeaderMap,
    ) -> (StatusCode, Json<AuthEnvelope<Value>>) {
        let Some(token) = bearer_token(&headers) else {
            return (
                StatusCode::BAD_REQUEST,
                Json(AuthEnvelope::err("Missing access token")),
            );
        };

        match app_state.auth.sign_out(token).await {
            Ok(()) => {
                app_state.session_events.publish(SessionChange::SignedOut);
                (StatusCode::OK, Json(AuthEnvelope::ok(Value::Null)))
            }
            Err(ApplicationError::RemoteAuth(message)) => {
                warn!("Sign-out rejected: {}", message);
                (StatusCode::BAD_REQUEST, Json(AuthEnvelope::err(message)))
            }
            Err(other) => {
                error!("Sign-out failed: {:?}", other);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(AuthEnvelope::err("Internal server error")),
                )
            }
        }
    }

    /// GET /api/auth/session — resolves the caller's token back into its user.
    pub async fn session(
        State(app_state): State<AppState>,
        headers: HeaderMap,
    ) -> (StatusCode, Json<AuthEnvelope<AuthUser>>) {
        let Some(token) = bearer_token(&headers) else {
            return (
                StatusCode::UNAUTHORIZED,
                Json(AuthEnvelope::err("Missing access token")),
            );
        };

        match app_state.auth.get_user(token).await {
            Ok(user) => (StatusCode::OK, Json(AuthEnvelope::ok(user))),
            Err(ApplicationError::RemoteAuth(message)) => {
                (StatusCode::BAD_REQUEST, Json(AuthEnvelope::err(message)))
            }
            Err(other) => {
                error!("Session lookup failed: {:?}", other);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(AuthEnvelope::err("Internal server error")),
                )
            }
        }
    }

    /// POST /api/auth/reset-password
    pub async fn reset_password(
        State(app_state): State<AppState>,
        Json(body): Json<ResetPasswordRequest>,
    ) -> (StatusCode, Json<AuthEnvelope<Value>>) {
        let Some(email) = body.email.filter(|e| !e.is_empty()) else {
            return (
                StatusCode::BAD_REQUEST,
                Json(AuthEnvelope::err("Email is required")),
            );
        };

        match app_state.auth.reset_password(&email).await {
            Ok(()) => (StatusCode::OK, Json(AuthEnvelope::ok(Value::Null))),
            Err(ApplicationError::RemoteAuth(message)) => {
                (StatusCode::BAD_REQUEST, Json(AuthEnvelope::err(message)))
            }
            Err(other) => {
                error!("Password reset failed: {:?}", other);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(AuthEnvelope::err("Internal server error")),
                )
            }
        }
    }

    /// GET /api/auth/callback?code=… — OAuth leg. The code (when present) is
    /// exchanged for a session; the redirect happens either way, a failed
    /// exchange is only logged.
    pub async fn oauth_callback(
        State(app_state): State<AppState>,
        Query(query): Query<OAuthCallbackQuery>,
    ) -> Redirect {
        if let Some(code) = query.code.filter(|c| !c.is_empty()) {
            match app_state.auth.exchange_code(&code).await {
                Ok(session) => {
                    info!("OAuth code exchanged for user {}", session.user.id);
                    app_state.session_events.publish(SessionChange::SignedIn {
                        user_id: session.user.id,
                        email: session.user.email.clone(),
                    });
                }
                Err(error) => {
                    warn!("OAuth code exchange failed: {:?}", error);
                }
            }
        }

        Redirect::to(&app_state.auth_redirect_url)
    }
}

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .filter(|token| !token.is_empty())
}
