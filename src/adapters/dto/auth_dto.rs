use serde::{Deserialize, Serialize};

/// Sign-in/sign-up body. Fields stay optional so a missing one maps to the
/// documented 400 instead of a deserialization rejection.
#[derive(Debug, Deserialize)]
pub struct CredentialsRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ResetPasswordRequest {
    pub email: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct OAuthCallbackQuery {
    pub code: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ErrorMessage {
    pub message: String,
}

/// The `{data, error}` pair every auth endpoint answers with; exactly one
/// side is populated.
#[derive(Debug, Serialize)]
pub struct AuthEnvelope<T: Serialize> {
    pub data: Option<T>,
    pub error: Option<ErrorMessage>,
}

impl<T: Serialize> AuthEnvelope<T> {
    pub fn ok(data: T) -> Self {
        Self {
            data: Some(data),
            error: None,
        }
    }

    pub fn err(message: impl Into<String>) -> Self {
        Self {
            data: None,
            error: Some(ErrorMessage {
                message: message.into(),
            }),
        }
    }
}
