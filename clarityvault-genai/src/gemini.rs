/// Gemini client
///
/// Implements [`GenerativeModel`] over the Gemini REST API.
///
/// # Upload protocol
///
/// Files go through the two-step resumable upload:
///
/// ```text
/// POST {base}/upload/v1beta/files?key=..   X-Goog-Upload-Command: start
///   <- X-Goog-Upload-URL: <session url>
/// POST <session url>                        X-Goog-Upload-Command: upload, finalize
///   <- {"file": {"uri": "...", "mimeType": "..."}}
/// ```
///
/// The whole payload is sent in the finalize call (offset 0). If the start
/// call does not return a session URL, the upload fails without a second
/// request. Nothing is cached, so each call re-uploads.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use tracing::{debug, info, warn};

use crate::error::{GenAiError, GenAiResult};
use crate::model::{FileHandle, GenerativeModel, UploadedDocument};

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_MODEL: &str = "gemini-2.0-flash";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(120);

const UPLOAD_URL_HEADER: &str = "x-goog-upload-url";

/// Connection settings for [`GeminiClient`]
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    pub api_key: String,
    pub base_url: String,
    pub model: String,
    /// Per-request timeout covering connect, upload and response
    pub timeout: Duration,
}

impl GeminiConfig {
    /// Settings for the public endpoint and the default model
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

#[derive(Serialize)]
struct StartUploadRequest<'a> {
    file: DisplayName<'a>,
}

#[derive(Serialize)]
struct DisplayName<'a> {
    display_name: &'a str,
}

#[derive(Deserialize)]
struct UploadResponse {
    file: Option<UploadedFileInfo>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct UploadedFileInfo {
    uri: Option<String>,
    mime_type: Option<String>,
}

#[derive(Serialize)]
struct GenerateRequest<'a> {
    contents: Vec<RequestContent<'a>>,
}

#[derive(Serialize)]
struct RequestContent<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<&'a str>,
    parts: Vec<RequestPart<'a>>,
}

#[derive(Serialize)]
#[serde(untagged)]
enum RequestPart<'a> {
    File {
        #[serde(rename = "fileData")]
        file_data: FileData<'a>,
    },
    Text {
        text: &'a str,
    },
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct FileData<'a> {
    mime_type: &'a str,
    file_uri: &'a str,
}

/// HTTP client for the Gemini API
#[derive(Debug, Clone)]
pub struct GeminiClient {
    http: reqwest::Client,
    config: GeminiConfig,
}

impl GeminiClient {
    /// Builds the client and its connection pool
    pub fn new(config: GeminiConfig) -> GenAiResult<Self> {
        let http = reqwest::Client::builder().timeout(config.timeout).build()?;
        Ok(Self { http, config })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url.trim_end_matches('/'), path)
    }

    fn generate_url(&self) -> String {
        self.endpoint(&format!("/v1beta/models/{}:generateContent", self.config.model))
    }

    async fn start_upload(&self, document: &UploadedDocument) -> GenAiResult<String> {
        let response = self
            .http
            .post(self.endpoint("/upload/v1beta/files"))
            .query(&[("key", self.config.api_key.as_str())])
            .header("X-Goog-Upload-Protocol", "resumable")
            .header("X-Goog-Upload-Command", "start")
            .header("X-Goog-Upload-Header-Content-Length", document.len().to_string())
            .header("X-Goog-Upload-Header-Content-Type", document.content_type.as_str())
            .json(&StartUploadRequest {
                file: DisplayName {
                    display_name: &document.name,
                },
            })
            .send()
            .await?;

        if !response.status().is_success() {
            let err = GenAiError::from_response(response).await;
            warn!(error = %err, "Upload start rejected");
            return Err(err);
        }

        response
            .headers()
            .get(UPLOAD_URL_HEADER)
            .and_then(|value| value.to_str().ok())
            .filter(|url| !url.is_empty())
            .map(str::to_string)
            .ok_or_else(|| {
                warn!("Upload start response carried no session URL");
                GenAiError::UploadSession
            })
    }

    async fn finalize_upload(
        &self,
        session_url: &str,
        document: &UploadedDocument,
    ) -> GenAiResult<FileHandle> {
        let response = self
            .http
            .post(session_url)
            .header("X-Goog-Upload-Protocol", "resumable")
            .header("X-Goog-Upload-Command", "upload, finalize")
            .header("X-Goog-Upload-Offset", "0")
            .header(CONTENT_TYPE, "application/octet-stream")
            .body(document.data.clone())
            .send()
            .await?;

        if !response.status().is_success() {
            let err = GenAiError::from_response(response).await;
            warn!(error = %err, "Upload finalize rejected");
            return Err(err);
        }

        let body = response.text().await?;
        let parsed: UploadResponse = serde_json::from_str(&body)?;

        let info = parsed
            .file
            .ok_or_else(|| GenAiError::MalformedResponse("missing `file` object".to_string()))?;
        let uri = info
            .uri
            .filter(|uri| !uri.is_empty())
            .ok_or_else(|| GenAiError::MalformedResponse("missing `file.uri`".to_string()))?;

        Ok(FileHandle {
            uri,
            mime_type: info
                .mime_type
                .unwrap_or_else(|| document.content_type.clone()),
        })
    }

    async fn post_generate(&self, request: &GenerateRequest<'_>) -> GenAiResult<String> {
        let response = self
            .http
            .post(self.generate_url())
            .query(&[("key", self.config.api_key.as_str())])
            .json(request)
            .send()
            .await?;

        if !response.status().is_success() {
            let err = GenAiError::from_response(response).await;
            warn!(error = %err, model = %self.config.model, "Generation rejected");
            return Err(err);
        }

        Ok(response.text().await?)
    }
}

#[async_trait]
impl GenerativeModel for GeminiClient {
    fn name(&self) -> &str {
        "gemini"
    }

    async fn upload_file(&self, document: &UploadedDocument) -> GenAiResult<FileHandle> {
        debug!(
            name = %document.name,
            content_type = %document.content_type,
            size = document.len(),
            "Starting resumable upload"
        );

        let session_url = self.start_upload(document).await?;
        debug!("Upload session opened");

        let handle = self.finalize_upload(&session_url, document).await?;
        info!(uri = %handle.uri, "File uploaded to Gemini");

        Ok(handle)
    }

    async fn generate_content(&self, file: &FileHandle, prompt: &str) -> GenAiResult<JsonValue> {
        let request = GenerateRequest {
            contents: vec![RequestContent {
                role: Some("user"),
                parts: vec![
                    RequestPart::File {
                        file_data: FileData {
                            mime_type: &file.mime_type,
                            file_uri: &file.uri,
                        },
                    },
                    RequestPart::Text { text: prompt },
                ],
            }],
        };

        debug!(model = %self.config.model, uri = %file.uri, "Generating content for file");
        let body = self.post_generate(&request).await?;

        Ok(serde_json::from_str(&body)?)
    }

    async fn generate_text(&self, prompt: &str) -> GenAiResult<String> {
        let request = GenerateRequest {
            contents: vec![RequestContent {
                role: None,
                parts: vec![RequestPart::Text { text: prompt }],
            }],
        };

        debug!(model = %self.config.model, prompt_len = prompt.len(), "Generating text");
        self.post_generate(&request).await
    }
}
