/// Generative model abstraction
///
/// [`GenerativeModel`] is the seam between the HTTP layer and the provider.
/// Production wires in [`crate::gemini::GeminiClient`]; tests can substitute
/// any implementation.
///
/// # Example
///
/// ```no_run
/// use bytes::Bytes;
/// use clarityvault_genai::gemini::{GeminiClient, GeminiConfig};
/// use clarityvault_genai::model::{GenerativeModel, UploadedDocument};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let client = GeminiClient::new(GeminiConfig::new("api-key"))?;
///
/// let document = UploadedDocument::new(
///     "lease.pdf",
///     "application/pdf",
///     Bytes::from_static(b"%PDF-1.7"),
/// );
/// let handle = client.upload_file(&document).await?;
/// let body = client.generate_content(&handle, "Summarize this lease").await?;
/// println!("{body}");
/// # Ok(())
/// # }
/// ```

use async_trait::async_trait;
use bytes::Bytes;
use serde_json::Value as JsonValue;

use crate::error::GenAiResult;

/// A document held in memory, ready to upload
#[derive(Debug, Clone)]
pub struct UploadedDocument {
    /// Display name sent to the provider
    pub name: String,
    pub content_type: String,
    pub data: Bytes,
}

impl UploadedDocument {
    pub fn new(name: impl Into<String>, content_type: impl Into<String>, data: Bytes) -> Self {
        Self {
            name: name.into(),
            content_type: content_type.into(),
            data,
        }
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// Provider reference to an uploaded file
///
/// Opaque to callers. Only valid for the provider that issued it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileHandle {
    pub uri: String,
    pub mime_type: String,
}

/// Operations offered by a generative-language provider
#[async_trait]
pub trait GenerativeModel: Send + Sync {
    /// Provider name for logs
    fn name(&self) -> &str;

    /// Uploads a document and returns the provider's reference to it
    async fn upload_file(&self, document: &UploadedDocument) -> GenAiResult<FileHandle>;

    /// Runs a prompt against an uploaded file and returns the raw JSON body
    async fn generate_content(&self, file: &FileHandle, prompt: &str) -> GenAiResult<JsonValue>;

    /// Runs a text-only prompt and returns the raw response body
    async fn generate_text(&self, prompt: &str) -> GenAiResult<String>;
}
