/// Stored documents
///
/// Uploaded files are kept inline in the `stored_files` table as `BYTEA`.
/// The owner is a plain username string; there is no foreign key to `users`,
/// no deduplication and no versioning. Two uploads with the same name are two
/// distinct rows.
///
/// [`UploadPolicy`] holds the checks an upload must pass before it is stored.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

/// Largest accepted upload: 10 MiB
pub const MAX_FILE_SIZE: usize = 10 * 1024 * 1024;

/// Content types accepted by the file store
pub const ALLOWED_CONTENT_TYPES: &[&str] = &[
    "application/pdf",
    "application/msword",
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
    "application/vnd.ms-excel",
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
    "application/vnd.ms-powerpoint",
    "application/vnd.openxmlformats-officedocument.presentationml.presentation",
    "text/plain",
];

/// A row of the `stored_files` table, payload included
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct StoredFile {
    pub id: i64,
    pub username: String,
    pub file_name: String,
    pub file_type: String,
    pub data: Vec<u8>,
    pub created_at: DateTime<Utc>,
}

impl StoredFile {
    pub fn size(&self) -> usize {
        self.data.len()
    }
}

/// Metadata of a stored file without its payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct FileSummary {
    pub id: i64,
    pub file_name: String,
    pub file_type: String,
    pub file_size: i64,
}

/// Input for storing a file
#[derive(Debug, Clone)]
pub struct NewStoredFile {
    pub username: String,
    pub file_name: String,
    pub file_type: String,
    pub data: Vec<u8>,
}

/// Why an upload was refused
///
/// The display strings are returned verbatim to HTTP clients.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UploadRejection {
    #[error("File is empty")]
    Empty,

    #[error("File size exceeds maximum limit of {}MB", .max_bytes / 1024 / 1024)]
    TooLarge { size: usize, max_bytes: usize },

    #[error("File type not supported. Allowed types: PDF, DOC, DOCX, XLS, XLSX, PPT, PPTX, TXT")]
    UnsupportedType(Option<String>),

    #[error("Invalid filename")]
    InvalidFileName,
}

/// Size and type limits for uploads
#[derive(Debug, Clone)]
pub struct UploadPolicy {
    pub max_bytes: usize,
    pub allowed_types: Vec<String>,
}

impl Default for UploadPolicy {
    fn default() -> Self {
        Self {
            max_bytes: MAX_FILE_SIZE,
            allowed_types: ALLOWED_CONTENT_TYPES.iter().map(|t| t.to_string()).collect(),
        }
    }
}

impl UploadPolicy {
    /// Validates an upload
    ///
    /// Checks run in a fixed order (emptiness, size, content type, file name)
    /// and the first failure wins.
    pub fn check(
        &self,
        data: &[u8],
        content_type: Option<&str>,
        file_name: Option<&str>,
    ) -> Result<(), UploadRejection> {
        if data.is_empty() {
            return Err(UploadRejection::Empty);
        }

        if data.len() > self.max_bytes {
            return Err(UploadRejection::TooLarge {
                size: data.len(),
                max_bytes: self.max_bytes,
            });
        }

        match content_type {
            Some(ct) if self.allowed_types.iter().any(|allowed| allowed == ct) => {}
            other => return Err(UploadRejection::UnsupportedType(other.map(str::to_string))),
        }

        match file_name {
            Some(name) if !name.trim().is_empty() => Ok(()),
            _ => Err(UploadRejection::InvalidFileName),
        }
    }
}

impl StoredFile {
    /// Inserts a file and returns the stored row
    pub async fn create(pool: &PgPool, data: NewStoredFile) -> Result<Self, sqlx::Error> {
        sqlx::query_as::<_, StoredFile>(
            r#"
            INSERT INTO stored_files (username, file_name, file_type, data)
            VALUES ($1, $2, $3, $4)
            RETURNING id, username, file_name, file_type, data, created_at
            "#,
        )
        .bind(data.username)
        .bind(data.file_name)
        .bind(data.file_type)
        .bind(data.data)
        .fetch_one(pool)
        .await
    }

    pub async fn find_by_id(pool: &PgPool, id: i64) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, StoredFile>(
            r#"
            SELECT id, username, file_name, file_type, data, created_at
            FROM stored_files
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await
    }

    /// Lists the files owned by `username`, oldest first, without payloads
    pub async fn list_by_username(
        pool: &PgPool,
        username: &str,
    ) -> Result<Vec<FileSummary>, sqlx::Error> {
        sqlx::query_as::<_, FileSummary>(
            r#"
            SELECT id, file_name, file_type, OCTET_LENGTH(data)::BIGINT AS file_size
            FROM stored_files
            WHERE username = $1
            ORDER BY id ASC
            "#,
        )
        .bind(username)
        .fetch_all(pool)
        .await
    }

    /// Deletes a file, returning whether a row was removed
    pub async fn delete(pool: &PgPool, id: i64) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM stored_files WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
