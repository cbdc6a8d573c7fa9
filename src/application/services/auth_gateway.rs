use async_trait::async_trait;

use crate::{
    application::error::ApplicationError,
    domain::models::session::{AuthSession, AuthUser},
};

/// The auth-provider boundary. Rejections surface as
/// `ApplicationError::RemoteAuth` with the provider's own message; transport
/// failures become `ApplicationError::Internal`.
#[async_trait]
pub trait AuthGateway: Send + Sync {
    async fn sign_up(&self, email: &str, password: &str)
        -> Result<AuthSession, ApplicationError>;
    async fn sign_in(&self, email: &str, password: &str)
        -> Result<AuthSession, ApplicationError>;
    async fn sign_out(&self, access_token: &str) -> Result<(), ApplicationError>;
    async fn get_user(&self, access_token: &str) -> Result<AuthUser, ApplicationError>;
    async fn reset_password(&self, email: &str) -> Result<(), ApplicationError>;
    /// OAuth callback leg: exchanges an authorization code for a session.
    async fn exchange_code(&self, code: &str) -> Result<AuthSession, ApplicationError>;
}
