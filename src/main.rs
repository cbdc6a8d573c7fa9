use std::sync::Arc;

use podcaster_service::{
    adapters::{
        middleware::TokenVerifier, repositories::PgFileRepository, routes::build_router,
        session::SessionEvents, state::AppState, upload_tracker::UploadTracker,
    },
    application::{
        repositories::file_repository::FileRepository,
        services::{AuthGateway, QuotaAccountant, UploadOrchestrator},
    },
    domain::config::{remote::RemoteConfig, storage::StorageConfig},
    services::{self, SupabaseAuthGateway},
};
use tower_http::cors::{Any, CorsLayer};

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    // Crypto provider for the AWS SDK and rustls-backed clients; must happen
    // before any TLS connection is opened.
    let _ = rustls::crypto::aws_lc_rs::default_provider().install_default();

    let database_url = std::env::var("DATABASE_URL")
        .expect("ERROR: DATABASE_URL environment variable must be set");

    let port = std::env::var("PORT")
        .unwrap_or_else(|_| "8080".to_string())
        .parse::<u16>()
        .expect("PORT must be a valid u16");

    // Configure CORS
    let cors = if let Ok(allowed_origins) = std::env::var("CORS_ALLOWED_ORIGINS") {
        // Parse comma-separated origins
        let origins: Vec<_> = allowed_origins
            .split(',')
            .map(|s| s.trim().parse().expect("Invalid CORS origin"))
            .collect();
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        // Allow all origins if not specified (only for development)
        CorsLayer::permissive()
    };

    let storage_config = Arc::new(StorageConfig::from_env());
    let remote_config = RemoteConfig::from_env();

    tracing::info!(
        "Starting podcaster-service (bucket: {}, provider: {:?})",
        storage_config.bucket_name,
        remote_config.provider
    );

    tracing::info!("Connecting to database...");
    let pool = sqlx::postgres::PgPoolOptions::new()
        .max_connections(5)
        .acquire_timeout(std::time::Duration::from_secs(30))
        .connect(&database_url)
        .await
        .expect("ERROR: Failed to connect to PostgreSQL database. Check DATABASE_URL and network connectivity.");
    tracing::info!("Database connection established");

    let files: Arc<dyn FileRepository> = Arc::new(PgFileRepository::new(pool));
    let object_storage = services::create_object_storage(&remote_config, &storage_config)
        .expect("Failed to create object storage client");
    let auth: Arc<dyn AuthGateway> =
        Arc::new(SupabaseAuthGateway::new(remote_config.supabase.clone()));
    let token_verifier = Arc::new(TokenVerifier::new(&remote_config.supabase.jwt_secret));

    let uploader = Arc::new(UploadOrchestrator::new(
        object_storage.clone(),
        storage_config.as_ref().clone(),
    ));
    let quota = Arc::new(QuotaAccountant::new(
        files.clone(),
        storage_config.max_user_storage,
    ));

    let session_events = SessionEvents::new();
    {
        let mut session_changes = session_events.subscribe();
        tokio::spawn(async move {
            while let Ok(change) = session_changes.recv().await {
                tracing::info!("Session change: {:?}", change);
            }
        });
    }

    let app_state = AppState {
        storage_config,
        files,
        object_storage,
        auth,
        token_verifier,
        uploader,
        quota,
        upload_tracker: UploadTracker::new(),
        session_events,
        auth_redirect_url: remote_config.auth_redirect_url,
    };

    let router = build_router(app_state).layer(cors);

    // Start the server
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", port))
        .await
        .expect("Failed to bind to port");

    tracing::info!("Server listening on 0.0.0.0:{}", port);

    axum::serve(listener, router)
        .await
        .expect("Failed to start server");
}
