/// Document intelligence operations
///
/// Composes the [`GenerativeModel`] primitives with the prompt templates.
/// Each operation awaits its provider calls in sequence: upload first, then
/// generate.

use std::sync::Arc;

use serde_json::Value as JsonValue;
use tracing::{debug, info};

use crate::error::GenAiResult;
use crate::model::{GenerativeModel, UploadedDocument};
use crate::prompts::{translation_prompt, AnalysisTemplate, DocumentType, Language, PdfTask};
use crate::response::GenerationOutcome;

#[derive(Clone)]
pub struct DocumentIntelligence {
    model: Arc<dyn GenerativeModel>,
}

impl DocumentIntelligence {
    pub fn new(model: Arc<dyn GenerativeModel>) -> Self {
        Self { model }
    }

    /// Uploads a document and runs the task's prompt against it
    ///
    /// Returns the provider's JSON body as-is.
    pub async fn process_document(
        &self,
        document: &UploadedDocument,
        task: &PdfTask,
    ) -> GenAiResult<JsonValue> {
        info!(
            task = task.name(),
            provider = self.model.name(),
            document = %document.name,
            "Processing document"
        );

        let handle = self.model.upload_file(document).await?;
        self.model.generate_content(&handle, &task.prompt()).await
    }

    pub async fn translate_text(
        &self,
        text: &str,
        language: &Language,
    ) -> GenAiResult<GenerationOutcome> {
        debug!(language = %language, chars = text.chars().count(), "Translating text");

        let body = self.model.generate_text(&translation_prompt(text, language)).await?;
        GenerationOutcome::from_body(body)
    }

    pub async fn analyze_text(
        &self,
        text: &str,
        language: &Language,
        document_type: &DocumentType,
    ) -> GenAiResult<GenerationOutcome> {
        let template = AnalysisTemplate::select(text, document_type);
        debug!(?template, document_type = %document_type, "Analyzing text");

        let prompt = template.render(text, language, document_type);
        let body = self.model.generate_text(&prompt).await?;
        GenerationOutcome::from_body(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GenAiError;
    use crate::model::FileHandle;
    use async_trait::async_trait;
    use bytes::Bytes;
    use serde_json::json;
    use std::sync::Mutex;

    /// Records prompts and replays a fixed body
    struct ScriptedModel {
        body: String,
        fail_upload: bool,
        prompts: Mutex<Vec<String>>,
    }

    impl ScriptedModel {
        fn replying(body: &str) -> Arc<Self> {
            Arc::new(Self {
                body: body.to_string(),
                fail_upload: false,
                prompts: Mutex::new(Vec::new()),
            })
        }

        fn last_prompt(&self) -> String {
            self.prompts.lock().unwrap().last().cloned().unwrap_or_default()
        }
    }

    #[async_trait]
    impl GenerativeModel for ScriptedModel {
        fn name(&self) -> &str {
            "scripted"
        }

        async fn upload_file(&self, document: &UploadedDocument) -> GenAiResult<FileHandle> {
            if self.fail_upload {
                return Err(GenAiError::UploadSession);
            }
            Ok(FileHandle {
                uri: format!("files/{}", document.name),
                mime_type: document.content_type.clone(),
            })
        }

        async fn generate_content(&self, file: &FileHandle, prompt: &str) -> GenAiResult<JsonValue> {
            self.prompts.lock().unwrap().push(prompt.to_string());
            Ok(json!({ "file": file.uri, "body": self.body }))
        }

        async fn generate_text(&self, prompt: &str) -> GenAiResult<String> {
            self.prompts.lock().unwrap().push(prompt.to_string());
            Ok(self.body.clone())
        }
    }

    fn pdf() -> UploadedDocument {
        UploadedDocument::new("loan.pdf", "application/pdf", Bytes::from_static(b"%PDF"))
    }

    #[tokio::test]
    async fn test_process_document_uploads_then_generates() {
        let model = ScriptedModel::replying("ok");
        let service = DocumentIntelligence::new(model.clone());

        let body = service.process_document(&pdf(), &PdfTask::LoanAnalysis).await.unwrap();

        assert_eq!(body["file"], "files/loan.pdf");
        assert!(model.last_prompt().starts_with("Perform a comprehensive financial analysis"));
    }

    #[tokio::test]
    async fn test_process_document_stops_on_upload_failure() {
        let model = Arc::new(ScriptedModel {
            body: String::new(),
            fail_upload: true,
            prompts: Mutex::new(Vec::new()),
        });
        let service = DocumentIntelligence::new(model.clone());

        let err = service
            .process_document(&pdf(), &PdfTask::HarmfulTerms)
            .await
            .unwrap_err();

        assert!(matches!(err, GenAiError::UploadSession));
        assert!(model.prompts.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_translate_text_extracts_text() {
        let model = ScriptedModel::replying(
            r#"{"candidates":[{"content":{"parts":[{"text":"Bonjour"}]}}]}"#,
        );
        let service = DocumentIntelligence::new(model.clone());
        let french = Language::parse("French").unwrap();

        let outcome = service.translate_text("Hello", &french).await.unwrap();

        assert_eq!(outcome, GenerationOutcome::Extracted("Bonjour".to_string()));
        assert!(model.last_prompt().starts_with(" Hello\n"));
    }

    #[tokio::test]
    async fn test_analyze_text_picks_template() {
        let model = ScriptedModel::replying(r#"{"candidates":[]}"#);
        let service = DocumentIntelligence::new(model.clone());
        let english = Language::parse("English").unwrap();
        let contract = DocumentType::parse("Contract").unwrap();

        let outcome = service.analyze_text("Short clause", &english, &contract).await.unwrap();
        assert_eq!(outcome, GenerationOutcome::Unparsed(r#"{"candidates":[]}"#.to_string()));
        assert!(model.last_prompt().starts_with("Explain the meaning"));

        let long_text = "word ".repeat(200);
        service.analyze_text(&long_text, &english, &contract).await.unwrap();
        assert!(model.last_prompt().starts_with("Analyze the following Contract document"));
    }
}
