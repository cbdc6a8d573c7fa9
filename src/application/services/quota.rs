use std::sync::Arc;

use uuid::Uuid;

use crate::{
    application::repositories::file_repository::FileRepository,
    domain::models::quota::QuotaSnapshot,
};

/// Per-owner storage accounting over the remote aggregation.
///
/// `usage` deliberately fails open to zero when the remote call errors, so an
/// owner near their ceiling is never blocked by an accounting outage; the
/// precheck `can_upload` fails closed instead. Both behaviors are inherited
/// from the system this replaces and are covered by tests so a change is a
/// conscious one.
pub struct QuotaAccountant {
    files: Arc<dyn FileRepository>,
    max_user_storage: u64,
}

impl QuotaAccountant {
    pub fn new(files: Arc<dyn FileRepository>, max_user_storage: u64) -> Self {
        Self {
            files,
            max_user_storage,
        }
    }

    pub async fn usage(&self, owner_id: Uuid) -> u64 {
        match self.files.storage_usage(owner_id).await {
            Ok(bytes) => bytes,
            Err(err) => {
                tracing::error!(%owner_id, "storage usage lookup failed: {}", err.message());
                0
            }
        }
    }

    pub async fn snapshot(&self, owner_id: Uuid) -> QuotaSnapshot {
        QuotaSnapshot::derive(self.usage(owner_id).await, self.max_user_storage)
    }

    pub async fn percentage(&self, owner_id: Uuid) -> u8 {
        self.snapshot(owner_id).await.percentage
    }

    pub async fn remaining(&self, owner_id: Uuid) -> u64 {
        self.snapshot(owner_id).await.remaining
    }

    pub async fn can_upload(&self, owner_id: Uuid, byte_size: u64) -> bool {
        match self.files.storage_usage(owner_id).await {
            Ok(usage) => usage.saturating_add(byte_size) <= self.max_user_storage,
            Err(err) => {
                tracing::error!(%owner_id, "upload precheck failed: {}", err.message());
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        application::error::ApplicationError,
        domain::models::file_record::{FileRecord, NewFileRecord},
    };
    use async_trait::async_trait;

    const GIB: u64 = 1024 * 1024 * 1024;

    /// Aggregation-only stub: `Some(bytes)` answers, `None` simulates a
    /// remote failure. The row-level methods are never reached by the
    /// accountant.
    struct UsageOnly(Option<u64>);

    #[async_trait]
    impl FileRepository for UsageOnly {
        async fn insert(&self, _: NewFileRecord) -> Result<FileRecord, ApplicationError> {
            unreachable!()
        }

        async fn list_by_owner(&self, _: Uuid) -> Result<Vec<FileRecord>, ApplicationError> {
            unreachable!()
        }

        async fn get(&self, _: Uuid, _: Uuid) -> Result<FileRecord, ApplicationError> {
            unreachable!()
        }

        async fn rename(
            &self,
            _: Uuid,
            _: Uuid,
            _: &str,
        ) -> Result<FileRecord, ApplicationError> {
            unreachable!()
        }

        async fn delete(&self, _: Uuid, _: Uuid) -> Result<FileRecord, ApplicationError> {
            unreachable!()
        }

        async fn delete_many(
            &self,
            _: Uuid,
            _: &[Uuid],
        ) -> Result<Vec<FileRecord>, ApplicationError> {
            unreachable!()
        }

        async fn storage_usage(&self, _: Uuid) -> Result<u64, ApplicationError> {
            self.0
                .ok_or_else(|| ApplicationError::RemoteQuery("connection reset".to_string()))
        }
    }

    #[tokio::test]
    async fn usage_fails_open_to_zero() {
        let accountant = QuotaAccountant::new(Arc::new(UsageOnly(None)), GIB);
        assert_eq!(accountant.usage(Uuid::new_v4()).await, 0);

        let snapshot = accountant.snapshot(Uuid::new_v4()).await;
        assert_eq!(snapshot.percentage, 0);
        assert_eq!(snapshot.remaining, GIB);
    }

    #[tokio::test]
    async fn precheck_fails_closed() {
        let accountant = QuotaAccountant::new(Arc::new(UsageOnly(None)), GIB);
        assert!(!accountant.can_upload(Uuid::new_v4(), 1).await);
    }

    #[tokio::test]
    async fn derived_figures_follow_usage() {
        let accountant = QuotaAccountant::new(Arc::new(UsageOnly(Some(GIB / 2))), GIB);
        let owner = Uuid::new_v4();

        assert_eq!(accountant.usage(owner).await, GIB / 2);
        assert_eq!(accountant.percentage(owner).await, 50);
        assert_eq!(accountant.remaining(owner).await, GIB / 2);
    }

    #[tokio::test]
    async fn precheck_respects_the_ceiling() {
        let accountant = QuotaAccountant::new(Arc::new(UsageOnly(Some(GIB - 10))), GIB);
        let owner = Uuid::new_v4();

        assert!(accountant.can_upload(owner, 10).await);
        assert!(!accountant.can_upload(owner, 11).await);
    }
}
