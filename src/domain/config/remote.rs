use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub enum StorageProvider {
    #[serde(rename = "supabase")]
    Supabase,
    #[serde(rename = "s3")]
    S3,
}

/// Supabase project endpoint plus the keys this service needs: the service-role
/// key for storage and auth calls made on behalf of users, and the JWT secret
/// for verifying the access tokens users send back.
#[derive(Debug, Clone)]
pub struct SupabaseConfig {
    pub url: String,
    pub service_role_key: String,
    pub jwt_secret: String,
}

/// Credentials for an S3-compatible endpoint (Supabase exposes one, and any
/// plain S3/minio deployment works too).
#[derive(Debug, Clone)]
pub struct S3Config {
    pub endpoint: String,
    pub region: String,
    pub access_key_id: String,
    pub secret_access_key: String,
}

#[derive(Debug, Clone)]
pub struct RemoteConfig {
    pub provider: StorageProvider,
    pub supabase: SupabaseConfig,
    pub s3: Option<S3Config>,
    pub auth_redirect_url: String,
}

impl RemoteConfig {
    pub fn from_env() -> Self {
        let supabase = SupabaseConfig {
            url: require_env("SUPABASE_URL").trim_end_matches('/').to_string(),
            service_role_key: require_env("SUPABASE_SERVICE_ROLE_KEY"),
            jwt_secret: require_env("SUPABASE_JWT_SECRET"),
        };

        let provider = match std::env::var("STORAGE_PROVIDER").as_deref() {
            Ok("s3") => StorageProvider::S3,
            _ => StorageProvider::Supabase,
        };

        let s3 = (provider == StorageProvider::S3).then(|| S3Config {
            endpoint: require_env("S3_ENDPOINT").trim_end_matches('/').to_string(),
            region: require_env("S3_REGION"),
            access_key_id: require_env("S3_ACCESS_KEY_ID"),
            secret_access_key: require_env("S3_SECRET_ACCESS_KEY"),
        });

        let auth_redirect_url =
            std::env::var("AUTH_REDIRECT_URL").unwrap_or_else(|_| "/dashboard".to_string());

        Self {
            provider,
            supabase,
            s3,
            auth_redirect_url,
        }
    }
}

fn require_env(name: &str) -> String {
    std::env::var(name)
        .unwrap_or_else(|_| panic!("ERROR: {} environment variable must be set", name))
}
