//! PostgreSQL-backed stores

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::debug;

use super::{FileStore, StoreError, UserStore};
use crate::db::pool;
use crate::models::stored_file::{FileSummary, NewStoredFile, StoredFile};
use crate::models::user::{CreateUser, UpdateUser, User};

const UNIQUE_VIOLATION: &str = "23505";

fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db) if db.code().as_deref() == Some(UNIQUE_VIOLATION))
}

#[derive(Debug, Clone)]
pub struct PgUserStore {
    pool: PgPool,
}

impl PgUserStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn create(&self, user: CreateUser) -> Result<User, StoreError> {
        let email = user.email.clone();
        debug!(email = %email, "Inserting user");

        User::create(&self.pool, user).await.map_err(|e| {
            if is_unique_violation(&e) {
                StoreError::Duplicate(email)
            } else {
                StoreError::Database(e)
            }
        })
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        Ok(User::find_by_email(&self.pool, email).await?)
    }

    async fn update(&self, user: UpdateUser) -> Result<Option<User>, StoreError> {
        debug!(email = %user.email, "Updating user");
        Ok(User::update(&self.pool, user).await?)
    }

    async fn list_all(&self) -> Result<Vec<User>, StoreError> {
        Ok(User::list_all(&self.pool).await?)
    }

    async fn find_full_name(&self, email: &str) -> Result<Option<String>, StoreError> {
        Ok(User::find_full_name(&self.pool, email).await?.flatten())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(pool::ping(&self.pool).await?)
    }
}

#[derive(Debug, Clone)]
pub struct PgFileStore {
    pool: PgPool,
}

impl PgFileStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl FileStore for PgFileStore {
    async fn save(&self, file: NewStoredFile) -> Result<StoredFile, StoreError> {
        debug!(
            username = %file.username,
            file_name = %file.file_name,
            size = file.data.len(),
            "Storing file"
        );
        Ok(StoredFile::create(&self.pool, file).await?)
    }

    async fn find(&self, id: i64) -> Result<Option<StoredFile>, StoreError> {
        Ok(StoredFile::find_by_id(&self.pool, id).await?)
    }

    async fn list_by_username(&self, username: &str) -> Result<Vec<FileSummary>, StoreError> {
        Ok(StoredFile::list_by_username(&self.pool, username).await?)
    }

    async fn delete(&self, id: i64) -> Result<bool, StoreError> {
        debug!(file_id = id, "Deleting file");
        Ok(StoredFile::delete(&self.pool, id).await?)
    }
}
