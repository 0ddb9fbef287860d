/// Authentication
///
/// - [`password`]: Argon2id hashing and verification
/// - [`jwt`]: HS256 token issuing and validation
/// - [`authenticator`]: email/password login against a [`crate::store::UserStore`]
/// - [`middleware`]: bearer-token middleware for Axum
///
/// # Example
///
/// ```no_run
/// use chrono::Duration;
/// use clarityvault_shared::auth::jwt::{create_token, Claims};
/// use clarityvault_shared::auth::password::{hash_password, verify_password};
/// use clarityvault_shared::models::user::Role;
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let hash = hash_password("correct horse battery staple")?;
/// assert!(verify_password("correct horse battery staple", &hash)?);
///
/// let claims = Claims::new("asha@example.com", Role::User, Duration::hours(24));
/// let token = create_token(&claims, "a-secret-that-is-at-least-32-bytes")?;
/// # Ok(())
/// # }
/// ```

pub mod authenticator;
pub mod jwt;
pub mod middleware;
pub mod password;
