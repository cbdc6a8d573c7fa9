use async_trait::async_trait;
use reqwest::{header, Client, Response};
use serde_json::{json, Value};

use crate::{
    application::{error::ApplicationError, services::AuthGateway},
    domain::{
        config::remote::SupabaseConfig,
        models::session::{AuthSession, AuthUser},
    },
    services::error::AuthError,
};

/// GoTrue REST client. Every call lands in a `{data, error}`-shaped outcome
/// at the HTTP layer: a rejection keeps the provider's own message, transport
/// problems become internal errors.
pub struct SupabaseAuthGateway {
    client: Client,
    auth_url: String,
    api_key: String,
}

impl SupabaseAuthGateway {
    pub fn new(config: SupabaseConfig) -> Self {
        Self {
            client: Client::new(),
            auth_url: format!("{}/auth/v1", config.url.trim_end_matches('/')),
            api_key: config.service_role_key,
        }
    }

    fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.client
            .post(format!("{}{}", self.auth_url, path))
            .header("apikey", &self.api_key)
            .header(header::AUTHORIZATION, format!("Bearer {}", self.api_key))
    }

    async fn session_request(&self, path: &str, body: Value) -> Result<AuthSession, AuthError> {
        let response = self
            .post(path)
            .json(&body)
            .send()
            .await
            .map_err(AuthError::from)?;

        if !response.status().is_success() {
            return Err(AuthError::Rejected(Self::rejection_message(response).await));
        }

        let payload: Value = response
            .json()
            .await
            .map_err(|e| AuthError::Internal(e.to_string()))?;
        Self::session_from_payload(payload)
    }

    /// Sign-up without auto-confirm answers with a bare user object instead of
    /// a session; both shapes are accepted.
    fn session_from_payload(payload: Value) -> Result<AuthSession, AuthError> {
        if payload.get("access_token").is_some() {
            return serde_json::from_value(payload)
                .map_err(|e| AuthError::Internal(e.to_string()));
        }

        let user: AuthUser = serde_json::from_value(payload)
            .map_err(|e| AuthError::Internal(e.to_string()))?;
        Ok(AuthSession {
            access_token: String::new(),
            refresh_token: String::new(),
            expires_in: 0,
            token_type: String::new(),
            user,
        })
    }

    async fn rejection_message(response: Response) -> String {
        let status = response.status();
        let body: Value = response.json().await.unwrap_or(Value::Null);

        for field in ["error_description", "msg", "message", "error"] {
            if let Some(message) = body.get(field).and_then(Value::as_str) {
                return message.to_string();
            }
        }

        format!("Authentication failed ({})", status)
    }
}

#[async_trait]
impl AuthGateway for SupabaseAuthGateway {
    async fn sign_up(
        &self,
        email: &str,
        password: &str,
    ) -> Result<AuthSession, ApplicationError> {
        let session = self
            .session_request("/signup", json!({ "email": email, "password": password }))
            .await?;
        Ok(session)
    }

    async fn sign_in(
        &self,
        email: &str,
        password: &str,
    ) -> Result<AuthSession, ApplicationError> {
        let session = self
            .session_request(
                "/token?grant_type=password",
                json!({ "email": email, "password": password }),
            )
            .await?;
        Ok(session)
    }

    async fn sign_out(&self, access_token: &str) -> Result<(), ApplicationError> {
        let response = self
            .client
            .post(format!("{}/logout", self.auth_url))
            .header("apikey", &self.api_key)
            .header(header::AUTHORIZATION, format!("Bearer {}", access_token))
            .send()
            .await
            .map_err(AuthError::from)?;

        if !response.status().is_success() {
            return Err(AuthError::Rejected(Self::rejection_message(response).await).into());
        }

        Ok(())
    }

    async fn get_user(&self, access_token: &str) -> Result<AuthUser, ApplicationError> {
        let response = self
            .client
            .get(format!("{}/user", self.auth_url))
            .header("apikey", &self.api_key)
            .header(header::AUTHORIZATION, format!("Bearer {}", access_token))
            .send()
            .await
            .map_err(AuthError::from)?;

        if !response.status().is_success() {
            return Err(AuthError::Rejected(Self::rejection_message(response).await).into());
        }

        let user = response
            .json::<AuthUser>()
            .await
            .map_err(|e| AuthError::Internal(e.to_string()))?;
        Ok(user)
    }

    async fn reset_password(&self, email: &str) -> Result<(), ApplicationError> {
        let response = self
            .post("/recover")
            .json(&json!({ "email": email }))
            .send()
            .await
            .map_err(AuthError::from)?;

        if !response.status().is_success() {
            return Err(AuthError::Rejected(Self::rejection_message(response).await).into());
        }

        Ok(())
    }

    async fn exchange_code(&self, code: &str) -> Result<AuthSession, ApplicationError> {
        let session = self
            .session_request("/token?grant_type=pkce", json!({ "auth_code": code }))
            .await?;
        Ok(session)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn session_payload_parses_tokens_and_user() {
        let id = Uuid::new_v4();
        let payload = json!({
            "access_token": "at",
            "refresh_token": "rt",
            "expires_in": 3600,
            "token_type": "bearer",
            "user": { "id": id, "email": "a@b.co", "role": "authenticated" },
        });

        let session = SupabaseAuthGateway::session_from_payload(payload).unwrap();
        assert_eq!(session.access_token, "at");
        assert_eq!(session.user.id, id);
        assert_eq!(session.user.email.as_deref(), Some("a@b.co"));
    }

    #[test]
    fn bare_user_payload_becomes_a_tokenless_session() {
        let id = Uuid::new_v4();
        let payload = json!({ "id": id, "email": "new@b.co" });

        let session = SupabaseAuthGateway::session_from_payload(payload).unwrap();
        assert!(session.access_token.is_empty());
        assert_eq!(session.user.id, id);
    }
}
