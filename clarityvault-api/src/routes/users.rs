/// Account endpoints
///
/// # Endpoints
///
/// - `POST /register`: create an account (public)
/// - `GET /login?email=&password=`: exchange credentials for a JWT (public)
/// - `GET /data/:username`: profile of an account
/// - `PUT /updateRegistration`: overwrite a profile
/// - `GET /getAllUsers`: every profile
/// - `GET /getName?username=`: display name as text, empty when unknown
///
/// Profiles never include the password hash.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Extension, Json,
};
use clarityvault_shared::{
    auth::{middleware::AuthContext, password::hash_password},
    models::user::{CreateUser, Role, UpdateUser, UserProfile},
    store::StoreError,
};
use serde::{Deserialize, Serialize};
use tracing::info;
use validator::Validate;

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
};

const DUPLICATE_EMAIL: &str = "Username is already in use";
const UPDATE_FAILED: &str = "Could not update user try again later";

#[derive(Debug, Deserialize, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 1, message = "Password must not be empty"))]
    pub password: String,

    pub full_name: Option<String>,

    pub avatar_url: Option<String>,

    #[serde(default)]
    pub role: Role,

    #[serde(default)]
    pub verified: bool,
}

/// Body of `PUT /updateRegistration`
///
/// A missing or empty `password` keeps the stored hash.
#[derive(Debug, Deserialize, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRegistrationRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    pub password: Option<String>,

    pub full_name: Option<String>,

    pub avatar_url: Option<String>,

    #[serde(default)]
    pub role: Role,

    #[serde(default)]
    pub verified: bool,
}

#[derive(Debug, Deserialize)]
pub struct LoginQuery {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct NameQuery {
    pub username: String,
}

/// Registers an account
///
/// An already registered email is rejected with 400 and the stored account
/// is left untouched.
pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> ApiResult<StatusCode> {
    req.validate()?;

    if state.users.find_by_email(&req.email).await?.is_some() {
        return Err(ApiError::BadRequest(DUPLICATE_EMAIL.to_string()));
    }

    let password_hash = hash_password(&req.password)?;

    let created = state
        .users
        .create(CreateUser {
            email: req.email,
            password_hash,
            full_name: req.full_name,
            avatar_url: req.avatar_url,
            role: req.role,
            verified: req.verified,
        })
        .await;

    match created {
        Ok(user) => {
            info!(email = %user.email, role = %user.role, "User registered");
            Ok(StatusCode::OK)
        }
        // lost a race with a concurrent registration
        Err(StoreError::Duplicate(_)) => Err(ApiError::BadRequest(DUPLICATE_EMAIL.to_string())),
        Err(err) => Err(err.into()),
    }
}

/// Returns a signed JWT as a plain string
pub async fn login(
    State(state): State<AppState>,
    Query(query): Query<LoginQuery>,
) -> ApiResult<String> {
    Ok(state
        .authenticator
        .authenticate(&query.email, &query.password)
        .await?)
}

/// Profile of `username`; an unknown account answers 500
pub async fn get_data(
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> ApiResult<Json<UserProfile>> {
    state
        .users
        .find_by_email(&username)
        .await?
        .map(|user| Json(user.into()))
        .ok_or_else(|| ApiError::InternalError(format!("No account for {username}")))
}

/// Overwrites the profile keyed by `email`
///
/// Any authenticated caller may update any account. An unknown email is
/// registered when the body carries a password; without one there is no
/// hash to store and the update answers 500.
pub async fn update_registration(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Json(req): Json<UpdateRegistrationRequest>,
) -> ApiResult<StatusCode> {
    req.validate()?;

    let password_hash = match req.password.as_deref() {
        Some(password) if !password.is_empty() => Some(hash_password(password)?),
        _ => None,
    };

    let updated = state
        .users
        .update(UpdateUser {
            email: req.email.clone(),
            password_hash: password_hash.clone(),
            full_name: req.full_name.clone(),
            avatar_url: req.avatar_url.clone(),
            role: req.role,
            verified: req.verified,
        })
        .await?;

    if let Some(user) = updated {
        info!(email = %user.email, requested_by = %auth.email, "User updated");
        return Ok(StatusCode::OK);
    }

    let Some(password_hash) = password_hash else {
        return Err(ApiError::Processing(UPDATE_FAILED.to_string()));
    };

    let created = state
        .users
        .create(CreateUser {
            email: req.email,
            password_hash,
            full_name: req.full_name,
            avatar_url: req.avatar_url,
            role: req.role,
            verified: req.verified,
        })
        .await;

    match created {
        Ok(user) => {
            info!(email = %user.email, requested_by = %auth.email, "User created by update");
            Ok(StatusCode::OK)
        }
        Err(StoreError::Duplicate(_)) => Err(ApiError::Processing(UPDATE_FAILED.to_string())),
        Err(err) => Err(err.into()),
    }
}

pub async fn get_all_users(State(state): State<AppState>) -> ApiResult<Json<Vec<UserProfile>>> {
    let users = state.users.list_all().await?;
    Ok(Json(users.into_iter().map(UserProfile::from).collect()))
}

/// Display name as plain text; empty body when the account has none
pub async fn get_name(
    State(state): State<AppState>,
    Query(query): Query<NameQuery>,
) -> ApiResult<String> {
    Ok(state
        .users
        .find_full_name(&query.username)
        .await?
        .unwrap_or_default())
}
