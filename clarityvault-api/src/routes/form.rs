/// Multipart form reader
///
/// Buffers a `multipart/form-data` body into its text fields and a single
/// `file` part. Bodies are already capped by `DefaultBodyLimit`.

use std::collections::HashMap;

use axum::extract::Multipart;
use bytes::Bytes;
use clarityvault_genai::model::UploadedDocument;

use crate::error::{ApiError, ApiResult};

pub const PDF_CONTENT_TYPE: &str = "application/pdf";

const FILE_FIELD: &str = "file";

/// The `file` part of a form
#[derive(Debug, Clone)]
pub struct FormFile {
    pub file_name: Option<String>,
    pub content_type: Option<String>,
    pub data: Bytes,
}

impl FormFile {
    /// Rejects anything not declared as `application/pdf`
    pub fn require_pdf(&self) -> ApiResult<()> {
        match self.content_type.as_deref() {
            Some(PDF_CONTENT_TYPE) => Ok(()),
            _ => Err(ApiError::BadRequest("Only PDF files are supported".to_string())),
        }
    }

    pub fn into_document(self) -> UploadedDocument {
        let name = self.file_name.unwrap_or_else(|| "document.pdf".to_string());
        let content_type = self
            .content_type
            .unwrap_or_else(|| PDF_CONTENT_TYPE.to_string());
        UploadedDocument::new(name, content_type, self.data)
    }
}

#[derive(Debug, Default)]
pub struct UploadForm {
    fields: HashMap<String, String>,
    file: Option<FormFile>,
}

impl UploadForm {
    pub async fn read(mut multipart: Multipart) -> ApiResult<Self> {
        let mut form = Self::default();

        while let Some(field) = multipart.next_field().await? {
            let name = field.name().unwrap_or_default().to_string();

            if name == FILE_FIELD {
                let file_name = field.file_name().map(str::to_string);
                let content_type = field.content_type().map(str::to_string);
                let data = field.bytes().await?;

                form.file = Some(FormFile {
                    file_name,
                    content_type,
                    data,
                });
            } else {
                let value = field.text().await?;
                form.fields.insert(name, value);
            }
        }

        Ok(form)
    }

    /// A required text field
    pub fn text(&self, name: &str) -> ApiResult<&str> {
        self.fields
            .get(name)
            .map(String::as_str)
            .ok_or_else(|| missing(name))
    }

    pub fn take_file(&mut self) -> ApiResult<FormFile> {
        self.file.take().ok_or_else(|| missing(FILE_FIELD))
    }
}

fn missing(name: &str) -> ApiError {
    ApiError::BadRequest(format!("Required parameter '{name}' is not present"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file(content_type: Option<&str>) -> FormFile {
        FormFile {
            file_name: Some("lease.pdf".to_string()),
            content_type: content_type.map(str::to_string),
            data: Bytes::from_static(b"%PDF-1.7"),
        }
    }

    #[test]
    fn test_require_pdf() {
        assert!(file(Some("application/pdf")).require_pdf().is_ok());
        assert!(file(Some("text/plain")).require_pdf().is_err());
        assert!(file(Some("application/pdf; charset=binary")).require_pdf().is_err());
        assert!(file(None).require_pdf().is_err());
    }

    #[test]
    fn test_into_document_defaults_name() {
        let mut upload = file(Some("application/pdf"));
        upload.file_name = None;

        let document = upload.into_document();
        assert_eq!(document.name, "document.pdf");
        assert_eq!(document.content_type, "application/pdf");
        assert_eq!(document.len(), 8);
    }

    #[test]
    fn test_missing_field_is_bad_request() {
        let form = UploadForm::default();
        let err = form.text("language").unwrap_err();
        assert!(matches!(err, ApiError::BadRequest(ref m) if m.contains("'language'")));
    }
}
