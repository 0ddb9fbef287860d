/// Error handling for the API server
///
/// Handlers return `ApiResult<T>`; every failure renders as
/// `{"error": <code>, "message": <text>}` with the matching status.
///
/// # Example
///
/// ```
/// use clarityvault_api::error::{ApiError, ApiResult};
///
/// fn require_pdf(content_type: Option<&str>) -> ApiResult<()> {
///     match content_type {
///         Some("application/pdf") => Ok(()),
///         _ => Err(ApiError::BadRequest("Only PDF files are supported".to_string())),
///     }
/// }
///
/// assert!(require_pdf(Some("text/plain")).is_err());
/// ```

use axum::{
    extract::multipart::MultipartError,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use clarityvault_genai::{prompts::PromptError, GenAiError};
use clarityvault_shared::{
    auth::{authenticator::LoginError, password::PasswordError},
    models::stored_file::UploadRejection,
    store::StoreError,
};
use serde::{Deserialize, Serialize};
use std::fmt;

/// API result type alias
pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Debug)]
pub enum ApiError {
    /// 400
    BadRequest(String),

    /// 401
    Unauthorized(String),

    /// 404
    NotFound(String),

    /// 400 with per-field details
    ValidationError(Vec<ValidationErrorDetail>),

    /// 500 whose message is shown to the client, e.g. an upstream failure
    /// behind a route-specific prefix
    Processing(String),

    /// 500 whose message is logged but not exposed
    InternalError(String),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationErrorDetail {
    pub field: String,
    pub message: String,
}

/// Error response format
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Machine-readable code, e.g. `bad_request`
    pub error: String,

    pub message: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<ValidationErrorDetail>>,
}

impl ApiError {
    /// An upstream failure reported as `<prefix><error>`
    pub fn upstream(prefix: &str, err: impl fmt::Display) -> Self {
        ApiError::Processing(format!("{prefix}{err}"))
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::BadRequest(msg) => write!(f, "Bad request: {}", msg),
            ApiError::Unauthorized(msg) => write!(f, "Unauthorized: {}", msg),
            ApiError::NotFound(msg) => write!(f, "Not found: {}", msg),
            ApiError::ValidationError(errors) => {
                write!(f, "Validation failed: {} errors", errors.len())
            }
            ApiError::Processing(msg) => write!(f, "Processing failed: {}", msg),
            ApiError::InternalError(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_code, message, details) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "bad_request", msg, None),
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, "unauthorized", msg, None),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, "not_found", msg, None),
            ApiError::ValidationError(errors) => (
                StatusCode::BAD_REQUEST,
                "validation_error",
                "Request validation failed".to_string(),
                Some(errors),
            ),
            ApiError::Processing(msg) => {
                tracing::warn!("Processing failed: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, "processing_error", msg, None)
            }
            ApiError::InternalError(msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    "An internal error occurred".to_string(),
                    None,
                )
            }
        };

        let body = Json(ErrorResponse {
            error: error_code.to_string(),
            message,
            details,
        });

        (status, body).into_response()
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        ApiError::InternalError(err.to_string())
    }
}

impl From<PasswordError> for ApiError {
    fn from(err: PasswordError) -> Self {
        ApiError::InternalError(format!("Password operation failed: {}", err))
    }
}

impl From<LoginError> for ApiError {
    fn from(err: LoginError) -> Self {
        match err {
            LoginError::InvalidCredentials => ApiError::Unauthorized(err.to_string()),
            other => ApiError::InternalError(format!("Login failed: {}", other)),
        }
    }
}

impl From<UploadRejection> for ApiError {
    fn from(err: UploadRejection) -> Self {
        ApiError::BadRequest(err.to_string())
    }
}

impl From<PromptError> for ApiError {
    fn from(err: PromptError) -> Self {
        ApiError::BadRequest(err.to_string())
    }
}

impl From<MultipartError> for ApiError {
    fn from(err: MultipartError) -> Self {
        ApiError::BadRequest(format!("Invalid multipart body: {}", err.body_text()))
    }
}

impl From<GenAiError> for ApiError {
    fn from(err: GenAiError) -> Self {
        ApiError::Processing(err.to_string())
    }
}

impl From<validator::ValidationErrors> for ApiError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let details = errors
            .field_errors()
            .iter()
            .flat_map(|(field, errors)| {
                errors.iter().map(move |error| ValidationErrorDetail {
                    field: field.to_string(),
                    message: error
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| "Validation failed".to_string()),
                })
            })
            .collect();

        ApiError::ValidationError(details)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ApiError::BadRequest("Only PDF files are supported".to_string());
        assert_eq!(err.to_string(), "Bad request: Only PDF files are supported");

        let err = ApiError::NotFound("File not found".to_string());
        assert_eq!(err.to_string(), "Not found: File not found");
    }

    #[test]
    fn test_upstream_prefix() {
        let err = ApiError::upstream("Error processing PDF: ", GenAiError::UploadSession);
        match err {
            ApiError::Processing(msg) => {
                assert_eq!(msg, "Error processing PDF: Failed to obtain upload session URI.")
            }
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn test_status_codes() {
        let cases = [
            (ApiError::BadRequest("x".into()), StatusCode::BAD_REQUEST),
            (ApiError::Unauthorized("x".into()), StatusCode::UNAUTHORIZED),
            (ApiError::NotFound("x".into()), StatusCode::NOT_FOUND),
            (ApiError::ValidationError(vec![]), StatusCode::BAD_REQUEST),
            (ApiError::Processing("x".into()), StatusCode::INTERNAL_SERVER_ERROR),
            (ApiError::InternalError("x".into()), StatusCode::INTERNAL_SERVER_ERROR),
        ];

        for (err, status) in cases {
            assert_eq!(err.into_response().status(), status);
        }
    }

    #[tokio::test]
    async fn test_error_body_envelope() {
        let response = ApiError::upstream("Error translating text: ", "quota exceeded").into_response();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();

        assert_eq!(
            body,
            serde_json::json!({
                "error": "processing_error",
                "message": "Error translating text: quota exceeded"
            })
        );
    }

    #[test]
    fn test_upload_rejection_is_bad_request() {
        let err: ApiError = UploadRejection::InvalidFileName.into();
        assert!(matches!(err, ApiError::BadRequest(ref m) if m == "Invalid filename"));
    }

    #[test]
    fn test_invalid_credentials_is_unauthorized() {
        let err: ApiError = LoginError::InvalidCredentials.into();
        assert!(matches!(err, ApiError::Unauthorized(_)));
    }
}
