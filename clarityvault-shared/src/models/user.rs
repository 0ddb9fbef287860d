/// User accounts
///
/// The email address is the primary key and doubles as the login name and the
/// JWT subject. Password hashes are stored as Argon2id PHC strings and never
/// leave this module in serialized form: HTTP responses use [`UserProfile`].
///
/// # Schema
///
/// ```sql
/// CREATE TABLE users (
///     email VARCHAR(320) PRIMARY KEY,
///     password_hash VARCHAR(255) NOT NULL,
///     full_name VARCHAR(255),
///     avatar_url VARCHAR(512),
///     role user_role NOT NULL DEFAULT 'ROLE_USER',
///     verified BOOLEAN NOT NULL DEFAULT FALSE,
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use std::fmt;

/// Account role, stored as the `user_role` Postgres enum
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "user_role")]
pub enum Role {
    #[default]
    #[serde(rename = "ROLE_USER")]
    #[sqlx(rename = "ROLE_USER")]
    User,

    #[serde(rename = "ROLE_ADMIN")]
    #[sqlx(rename = "ROLE_ADMIN")]
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "ROLE_USER",
            Role::Admin => "ROLE_ADMIN",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A row of the `users` table
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct User {
    pub email: String,
    pub password_hash: String,
    pub full_name: Option<String>,
    pub avatar_url: Option<String>,
    pub role: Role,
    pub verified: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Public view of a user, as returned by `/data/{username}` and `/getAllUsers`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub email: String,
    pub full_name: Option<String>,
    pub avatar_url: Option<String>,
    pub role: Role,
    pub verified: bool,
}

impl From<User> for UserProfile {
    fn from(user: User) -> Self {
        Self {
            email: user.email,
            full_name: user.full_name,
            avatar_url: user.avatar_url,
            role: user.role,
            verified: user.verified,
        }
    }
}

/// Input for inserting a user
///
/// `password_hash` must already be hashed; see [`crate::auth::password`].
#[derive(Debug, Clone)]
pub struct CreateUser {
    pub email: String,
    pub password_hash: String,
    pub full_name: Option<String>,
    pub avatar_url: Option<String>,
    pub role: Role,
    pub verified: bool,
}

/// Input for overwriting a user's profile
///
/// The row is keyed by `email`. A `None` password hash keeps the stored one.
#[derive(Debug, Clone)]
pub struct UpdateUser {
    pub email: String,
    pub password_hash: Option<String>,
    pub full_name: Option<String>,
    pub avatar_url: Option<String>,
    pub role: Role,
    pub verified: bool,
}

const USER_COLUMNS: &str =
    "email, password_hash, full_name, avatar_url, role, verified, created_at, updated_at";

impl User {
    /// Inserts a new user
    ///
    /// # Errors
    ///
    /// Fails with a unique violation (SQLSTATE 23505) if the email is taken.
    pub async fn create(pool: &PgPool, data: CreateUser) -> Result<Self, sqlx::Error> {
        let query = format!(
            "INSERT INTO users (email, password_hash, full_name, avatar_url, role, verified) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             RETURNING {USER_COLUMNS}"
        );

        sqlx::query_as::<_, User>(&query)
            .bind(data.email)
            .bind(data.password_hash)
            .bind(data.full_name)
            .bind(data.avatar_url)
            .bind(data.role)
            .bind(data.verified)
            .fetch_one(pool)
            .await
    }

    /// Finds a user by email
    pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<Self>, sqlx::Error> {
        let query = format!("SELECT {USER_COLUMNS} FROM users WHERE email = $1");

        sqlx::query_as::<_, User>(&query)
            .bind(email)
            .fetch_optional(pool)
            .await
    }

    /// Overwrites the profile of an existing user
    ///
    /// Returns `None` when no row has that email; nothing is inserted.
    pub async fn update(pool: &PgPool, data: UpdateUser) -> Result<Option<Self>, sqlx::Error> {
        let query = format!(
            "UPDATE users SET \
                 password_hash = COALESCE($2, password_hash), \
                 full_name = $3, \
                 avatar_url = $4, \
                 role = $5, \
                 verified = $6, \
                 updated_at = NOW() \
             WHERE email = $1 \
             RETURNING {USER_COLUMNS}"
        );

        sqlx::query_as::<_, User>(&query)
            .bind(data.email)
            .bind(data.password_hash)
            .bind(data.full_name)
            .bind(data.avatar_url)
            .bind(data.role)
            .bind(data.verified)
            .fetch_optional(pool)
            .await
    }

    /// Lists every user, oldest first
    pub async fn list_all(pool: &PgPool) -> Result<Vec<Self>, sqlx::Error> {
        let query = format!("SELECT {USER_COLUMNS} FROM users ORDER BY created_at ASC");

        sqlx::query_as::<_, User>(&query).fetch_all(pool).await
    }

    /// Looks up only the display name
    ///
    /// The outer `Option` is the row, the inner one the nullable column.
    pub async fn find_full_name(
        pool: &PgPool,
        email: &str,
    ) -> Result<Option<Option<String>>, sqlx::Error> {
        let row: Option<(Option<String>,)> =
            sqlx::query_as("SELECT full_name FROM users WHERE email = $1")
                .bind(email)
                .fetch_optional(pool)
                .await?;

        Ok(row.map(|(name,)| name))
    }
}
