/// Storage traits consumed by the HTTP layer
///
/// Handlers never touch a `PgPool` directly. They hold `Arc<dyn UserStore>`
/// and `Arc<dyn FileStore>`, which lets the server run against PostgreSQL
/// ([`postgres`]) while tests substitute in-memory implementations.
///
/// # Example
///
/// ```no_run
/// use std::sync::Arc;
/// use clarityvault_shared::store::{FileStore, UserStore};
/// use clarityvault_shared::store::postgres::{PgFileStore, PgUserStore};
/// use sqlx::PgPool;
///
/// fn stores(pool: PgPool) -> (Arc<dyn UserStore>, Arc<dyn FileStore>) {
///     (
///         Arc::new(PgUserStore::new(pool.clone())),
///         Arc::new(PgFileStore::new(pool)),
///     )
/// }
/// ```

pub mod postgres;

use async_trait::async_trait;

use crate::models::stored_file::{FileSummary, NewStoredFile, StoredFile};
use crate::models::user::{CreateUser, UpdateUser, User};

/// Errors raised by store implementations
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// A row with the same primary key already exists
    #[error("duplicate key: {0}")]
    Duplicate(String),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Registered accounts, keyed by email
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Inserts a new account
    ///
    /// Returns `StoreError::Duplicate` if the email is already registered;
    /// the existing row is left untouched.
    async fn create(&self, user: CreateUser) -> Result<User, StoreError>;

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError>;

    /// Overwrites an existing account; `Ok(None)` when the email is unknown
    async fn update(&self, user: UpdateUser) -> Result<Option<User>, StoreError>;

    async fn list_all(&self) -> Result<Vec<User>, StoreError>;

    /// Display name of an account, `None` if the account or the name is missing
    async fn find_full_name(&self, email: &str) -> Result<Option<String>, StoreError>;

    /// Connectivity probe for `/health`
    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}

/// Uploaded documents
#[async_trait]
pub trait FileStore: Send + Sync {
    async fn save(&self, file: NewStoredFile) -> Result<StoredFile, StoreError>;

    async fn find(&self, id: i64) -> Result<Option<StoredFile>, StoreError>;

    async fn list_by_username(&self, username: &str) -> Result<Vec<FileSummary>, StoreError>;

    /// Removes a file; `Ok(false)` when no such id exists
    async fn delete(&self, id: i64) -> Result<bool, StoreError>;
}
