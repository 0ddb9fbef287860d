/// Errors from the generative-AI and video-search clients
///
/// Nothing here is retried. Callers surface the display string to the HTTP
/// client behind a route-specific prefix.
#[derive(Debug, thiserror::Error)]
pub enum GenAiError {
    /// The upload start call did not return an `X-Goog-Upload-URL` header
    #[error("Failed to obtain upload session URI.")]
    UploadSession,

    /// A 2xx response that lacks a field the protocol requires
    #[error("Malformed provider response: {0}")]
    MalformedResponse(String),

    /// Non-2xx status from the provider
    #[error("Provider returned {status}: {body}")]
    Api { status: u16, body: String },

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Invalid JSON from provider: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result alias for this crate
pub type GenAiResult<T> = Result<T, GenAiError>;

impl GenAiError {
    /// Builds `Api` from a failed response, consuming its body
    pub(crate) async fn from_response(response: reqwest::Response) -> Self {
        let status = response.status().as_u16();
        let body = response.text().await.unwrap_or_default();
        GenAiError::Api { status, body }
    }
}
