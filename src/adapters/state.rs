use axum::extract::FromRef;
use std::sync::Arc;

use crate::{
    adapters::{middleware::TokenVerifier, session::SessionEvents, upload_tracker::UploadTracker},
    application::{
        repositories::file_repository::FileRepository,
        services::{AuthGateway, ObjectStorage, QuotaAccountant, UploadOrchestrator},
    },
    domain::config::storage::StorageConfig,
};

#[derive(Clone, FromRef)]
pub struct AppState {
    pub storage_config: Arc<StorageConfig>,
    pub files: Arc<dyn FileRepository>,
    pub object_storage: Arc<dyn ObjectStorage>,
    pub auth: Arc<dyn AuthGateway>,
    pub token_verifier: Arc<TokenVerifier>,
    pub uploader: Arc<UploadOrchestrator>,
    pub quota: Arc<QuotaAccountant>,
    pub upload_tracker: UploadTracker,
    pub session_events: SessionEvents,
    pub auth_redirect_url: String,
}
