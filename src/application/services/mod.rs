mod auth_gateway;
mod object_storage;
mod quota;
mod upload;

pub use auth_gateway::AuthGateway;
pub use object_storage::{storage_key_from_url, ObjectStorage, ProgressFn, StorageEntry};
pub use quota::QuotaAccountant;
pub use upload::{object_key, StoredObject, UploadOrchestrator};
