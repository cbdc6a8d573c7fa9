use async_trait::async_trait;
use sqlx::{postgres::PgRow, query_as, query_scalar, FromRow, Row};
use uuid::Uuid;

use crate::{
    application::{error::ApplicationError, repositories::file_repository::FileRepository},
    domain::models::file_record::{FileRecord, NewFileRecord, ProcessingStatus},
};

/// `podcasts` table over the remote Postgres. Every statement filters on the
/// owner column, so a record id from another owner behaves like a missing
/// row.
pub struct PgFileRepository {
    pool: sqlx::PgPool,
}

impl PgFileRepository {
    pub fn new(pool: sqlx::PgPool) -> Self {
        Self { pool }
    }
}

/// Row mirror with the store's column names; status decodes through
/// `ProcessingStatus::from_db` so unknown pipeline states never fail a fetch.
struct FileRecordRow(FileRecord);

impl FromRow<'_, PgRow> for FileRecordRow {
    fn from_row(row: &PgRow) -> Result<Self, sqlx::Error> {
        let status: String = row.try_get("status")?;
        Ok(FileRecordRow(FileRecord {
            id: row.try_get("id")?,
            owner_id: row.try_get("user_id")?,
            title: row.try_get("title")?,
            file_name: row.try_get("file_name")?,
            byte_size: row.try_get("file_size")?,
            storage_url: row.try_get("file_url")?,
            status: ProcessingStatus::from_db(&status),
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
        }))
    }
}

fn query_error(error: sqlx::Error) -> ApplicationError {
    match error {
        sqlx::Error::RowNotFound => ApplicationError::NotFound,
        other => ApplicationError::RemoteQuery(other.to_string()),
    }
}

#[async_trait]
impl FileRepository for PgFileRepository {
    async fn insert(&self, record: NewFileRecord) -> Result<FileRecord, ApplicationError> {
        let query = r#"
            INSERT INTO podcasts (user_id, title, file_name, file_size, file_url, status)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
        "#;

        let created: FileRecordRow = query_as(query)
            .bind(record.owner_id)
            .bind(&record.title)
            .bind(&record.file_name)
            .bind(record.byte_size)
            .bind(&record.storage_url)
            .bind(ProcessingStatus::Uploaded.as_str())
            .fetch_one(&self.pool)
            .await
            .map_err(query_error)?;

        Ok(created.0)
    }

    async fn list_by_owner(&self, owner_id: Uuid) -> Result<Vec<FileRecord>, ApplicationError> {
        let query = "SELECT * FROM podcasts WHERE user_id = $1 ORDER BY created_at DESC";

        let rows: Vec<FileRecordRow> = query_as(query)
            .bind(owner_id)
            .fetch_all(&self.pool)
            .await
            .map_err(query_error)?;

        Ok(rows.into_iter().map(|row| row.0).collect())
    }

    async fn get(&self, owner_id: Uuid, id: Uuid) -> Result<FileRecord, ApplicationError> {
        let query = "SELECT * FROM podcasts WHERE user_id = $1 AND id = $2";

        let row: FileRecordRow = query_as(query)
            .bind(owner_id)
            .bind(id)
            .fetch_one(&self.pool)
            .await
            .map_err(query_error)?;

        Ok(row.0)
    }

    async fn rename(
        &self,
        owner_id: Uuid,
        id: Uuid,
        title: &str,
    ) -> Result<FileRecord, ApplicationError> {
        let query = r#"
            UPDATE podcasts
            SET title = $3, updated_at = NOW()
            WHERE user_id = $1 AND id = $2
            RETURNING *
        "#;

        let row: FileRecordRow = query_as(query)
            .bind(owner_id)
            .bind(id)
            .bind(title)
            .fetch_one(&self.pool)
            .await
            .map_err(query_error)?;

        Ok(row.0)
    }

    async fn delete(&self, owner_id: Uuid, id: Uuid) -> Result<FileRecord, ApplicationError> {
        let query = "DELETE FROM podcasts WHERE user_id = $1 AND id = $2 RETURNING *";

        let row: FileRecordRow = query_as(query)
            .bind(owner_id)
            .bind(id)
            .fetch_one(&self.pool)
            .await
            .map_err(query_error)?;

        Ok(row.0)
    }

    async fn delete_many(
        &self,
        owner_id: Uuid,
        ids: &[Uuid],
    ) -> Result<Vec<FileRecord>, ApplicationError> {
        let query = "DELETE FROM podcasts WHERE user_id = $1 AND id = ANY($2) RETURNING *";

        let rows: Vec<FileRecordRow> = query_as(query)
            .bind(owner_id)
            .bind(ids)
            .fetch_all(&self.pool)
            .await
            .map_err(query_error)?;

        Ok(rows.into_iter().map(|row| row.0).collect())
    }

    async fn storage_usage(&self, owner_id: Uuid) -> Result<u64, ApplicationError> {
        let query = "SELECT COALESCE(SUM(file_size), 0)::BIGINT FROM podcasts WHERE user_id = $1";

        let total: i64 = query_scalar(query)
            .bind(owner_id)
            .fetch_one(&self.pool)
            .await
            .map_err(query_error)?;

        Ok(total.max(0) as u64)
    }
}
