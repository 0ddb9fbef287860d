/// Credential verification for `/login`
///
/// Looks the account up by email, checks the password against the stored
/// Argon2id hash, and issues a JWT carrying the account's role.

use std::sync::Arc;

use chrono::Duration;
use tracing::{debug, info};

use super::jwt::{create_token, Claims, JwtError};
use super::password::{verify_password, PasswordError};
use crate::store::{StoreError, UserStore};

#[derive(Debug, thiserror::Error)]
pub enum LoginError {
    /// Unknown email or wrong password; the two are not distinguished
    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Password(#[from] PasswordError),

    #[error(transparent)]
    Token(#[from] JwtError),
}

#[derive(Clone)]
pub struct Authenticator {
    users: Arc<dyn UserStore>,
    jwt_secret: String,
    token_lifetime: Duration,
}

impl Authenticator {
    pub fn new(users: Arc<dyn UserStore>, jwt_secret: impl Into<String>, token_lifetime: Duration) -> Self {
        Self {
            users,
            jwt_secret: jwt_secret.into(),
            token_lifetime,
        }
    }

    /// Returns a signed token for valid credentials
    pub async fn authenticate(&self, email: &str, password: &str) -> Result<String, LoginError> {
        let user = self
            .users
            .find_by_email(email)
            .await?
            .ok_or(LoginError::InvalidCredentials)?;

        if !verify_password(password, &user.password_hash)? {
            debug!(email = %email, "Password mismatch");
            return Err(LoginError::InvalidCredentials);
        }

        let claims = Claims::new(user.email, user.role, self.token_lifetime);
        let token = create_token(&claims, &self.jwt_secret)?;

        info!(email = %email, "User logged in");
        Ok(token)
    }
}
