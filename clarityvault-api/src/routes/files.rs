/// Stored document endpoints, nested under `/api/files`
///
/// Files are stored whole in the database. There is no ownership check:
/// any authenticated caller may read or delete any file.

use axum::{
    body::Body,
    extract::{Multipart, Path, State},
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Extension, Json,
};
use clarityvault_shared::{
    auth::middleware::AuthContext,
    models::stored_file::{FileSummary, NewStoredFile, StoredFile},
};
use serde::{Deserialize, Serialize};
use tracing::info;

use super::form::UploadForm;
use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
};

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveFileResponse {
    pub message: String,
    pub file_id: i64,
    pub file_name: String,
    pub file_type: String,
    pub username: String,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileDetails {
    pub id: i64,
    pub username: String,
    pub file_name: String,
    pub file_type: String,
    pub file_size: usize,
}

impl From<StoredFile> for FileDetails {
    fn from(file: StoredFile) -> Self {
        Self {
            file_size: file.size(),
            id: file.id,
            username: file.username,
            file_name: file.file_name,
            file_type: file.file_type,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserFilesResponse {
    pub files: Vec<FileSummary>,
    pub total_files: usize,
    pub username: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

fn file_not_found(id: i64) -> ApiError {
    ApiError::NotFound(format!("File {id} not found"))
}

/// `POST /api/files/save` (username, file)
///
/// The upload policy runs before anything is written.
pub async fn save_file(
    State(state): State<AppState>,
    multipart: Multipart,
) -> ApiResult<Json<SaveFileResponse>> {
    let mut form = UploadForm::read(multipart).await?;
    let username = form.text("username")?.to_string();
    let file = form.take_file()?;

    state.upload_policy.check(
        &file.data,
        file.content_type.as_deref(),
        file.file_name.as_deref(),
    )?;

    let saved = state
        .files
        .save(NewStoredFile {
            username,
            file_name: file.file_name.unwrap_or_default(),
            file_type: file.content_type.unwrap_or_default(),
            data: file.data.to_vec(),
        })
        .await?;

    info!(file_id = saved.id, username = %saved.username, size = saved.size(), "File saved");

    Ok(Json(SaveFileResponse {
        message: "File saved successfully".to_string(),
        file_id: saved.id,
        file_name: saved.file_name,
        file_type: saved.file_type,
        username: saved.username,
    }))
}

/// `DELETE /api/files/delete/:id`
pub async fn delete_file(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(id): Path<i64>,
) -> ApiResult<Json<MessageResponse>> {
    if !state.files.delete(id).await? {
        return Err(file_not_found(id));
    }

    info!(file_id = id, requested_by = %auth.email, "File deleted");

    Ok(Json(MessageResponse {
        message: "File deleted successfully".to_string(),
    }))
}

/// `GET /api/files/find/:id`
pub async fn find_file(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Json<FileDetails>> {
    let file = state.files.find(id).await?.ok_or_else(|| file_not_found(id))?;
    Ok(Json(file.into()))
}

/// `GET /api/files/download/:id`
///
/// Sends the stored bytes with the stored content type and an attachment
/// disposition carrying the original file name.
pub async fn download_file(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Response> {
    let file = state.files.find(id).await?.ok_or_else(|| file_not_found(id))?;

    let content_type = HeaderValue::from_str(&file.file_type)
        .unwrap_or_else(|_| HeaderValue::from_static("application/octet-stream"));

    let disposition = format!(
        "attachment; filename=\"{}\"",
        file.file_name.replace('"', "\\\"")
    );
    let disposition = HeaderValue::from_bytes(disposition.as_bytes()).map_err(|err| {
        ApiError::InternalError(format!("Unrepresentable file name for file {id}: {err}"))
    })?;

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, content_type),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        Body::from(file.data),
    )
        .into_response())
}

/// `GET /api/files/findByUsername/:username`
pub async fn find_by_username(
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> ApiResult<Json<UserFilesResponse>> {
    let files = state.files.list_by_username(&username).await?;

    Ok(Json(UserFilesResponse {
        total_files: files.len(),
        files,
        username,
    }))
}
