use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::{header, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::Deserialize;
use tracing::warn;
use uuid::Uuid;

use crate::{application::error::ApplicationError, domain::models::session::AuthUser};

#[derive(Debug, Deserialize)]
struct AccessClaims {
    sub: String,
    #[serde(default)]
    email: Option<String>,
}

/// Verifies provider-issued access tokens locally: HS256 against the project
/// JWT secret, audience `authenticated`, expiry enforced by the library.
pub struct TokenVerifier {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl TokenVerifier {
    pub fn new(jwt_secret: &str) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_audience(&["authenticated"]);
        Self {
            decoding_key: DecodingKey::from_secret(jwt_secret.as_bytes()),
            validation,
        }
    }

    pub fn verify(&self, token: &str) -> Result<AuthUser, ApplicationError> {
        let data = decode::<AccessClaims>(token, &self.decoding_key, &self.validation)
            .map_err(|_| ApplicationError::Unauthorized)?;

        let id = Uuid::parse_str(&data.claims.sub).map_err(|_| ApplicationError::Unauthorized)?;

        Ok(AuthUser {
            id,
            email: data.claims.email,
        })
    }
}

/// Middleware guarding the file/quota/upload surface. A verified token turns
/// into an `AuthUser` request extension; anything else stops here with a
/// generic body.
pub async fn require_auth(
    State(verifier): State<Arc<TokenVerifier>>,
    mut request: Request,
    next: Next,
) -> Response {
    let bearer = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "));

    match bearer {
        Some(token) => match verifier.verify(token) {
            Ok(user) => {
                request.extensions_mut().insert(user);
                next.run(request).await
            }
            Err(_) => {
                warn!("Rejected request with invalid access token");
                (StatusCode::UNAUTHORIZED, "Unauthorized").into_response()
            }
        },
        None => {
            warn!("Rejected request without bearer token");
            (StatusCode::UNAUTHORIZED, "Unauthorized").into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::{encode, EncodingKey, Header};
    use serde::Serialize;

    #[derive(Serialize)]
    struct TestClaims {
        sub: String,
        email: Option<String>,
        aud: String,
        exp: u64,
    }

    fn mint(secret: &str, sub: String, aud: &str, exp: u64) -> String {
        encode(
            &Header::default(),
            &TestClaims {
                sub,
                email: Some("user@example.com".to_string()),
                aud: aud.to_string(),
                exp,
            },
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap()
    }

    const FAR_FUTURE: u64 = 4_102_444_800; // 2100-01-01

    #[test]
    fn valid_token_yields_the_user() {
        let verifier = TokenVerifier::new("top-secret");
        let id = Uuid::new_v4();
        let token = mint("top-secret", id.to_string(), "authenticated", FAR_FUTURE);

        let user = verifier.verify(&token).unwrap();
        assert_eq!(user.id, id);
        assert_eq!(user.email.as_deref(), Some("user@example.com"));
    }

    #[test]
    fn wrong_secret_is_rejected() {
        let verifier = TokenVerifier::new("top-secret");
        let token = mint(
            "other-secret",
            Uuid::new_v4().to_string(),
            "authenticated",
            FAR_FUTURE,
        );
        assert!(verifier.verify(&token).is_err());
    }

    #[test]
    fn wrong_audience_is_rejected() {
        let verifier = TokenVerifier::new("top-secret");
        let token = mint("top-secret", Uuid::new_v4().to_string(), "anon", FAR_FUTURE);
        assert!(verifier.verify(&token).is_err());
    }

    #[test]
    fn expired_token_is_rejected() {
        let verifier = TokenVerifier::new("top-secret");
        let token = mint("top-secret", Uuid::new_v4().to_string(), "authenticated", 1);
        assert!(verifier.verify(&token).is_err());
    }

    #[test]
    fn non_uuid_subject_is_rejected() {
        let verifier = TokenVerifier::new("top-secret");
        let token = mint(
            "top-secret",
            "service-account".to_string(),
            "authenticated",
            FAR_FUTURE,
        );
        assert!(verifier.verify(&token).is_err());
    }
}
