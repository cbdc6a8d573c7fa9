use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The authenticated principal for one request, extracted from a verified
/// access token. Passed explicitly wherever it is needed; there is no
/// process-wide current user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthUser {
    pub id: Uuid,
    pub email: Option<String>,
}

/// A session as issued by the auth provider. Tokens may be empty when the
/// provider requires email confirmation before issuing one (sign-up flow).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthSession {
    #[serde(default)]
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: String,
    #[serde(default)]
    pub expires_in: u64,
    #[serde(default)]
    pub token_type: String,
    pub user: AuthUser,
}
