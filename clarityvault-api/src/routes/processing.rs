/// Document processing endpoints
///
/// PDF routes upload the file to the generative model and return the
/// provider's JSON unchanged. Text routes return the extracted text, or the
/// raw provider body when no text could be extracted. Upstream failures are
/// reported as 500 with a route-specific prefix.

use axum::{
    extract::{Multipart, Query, State},
    Json,
};
use clarityvault_genai::prompts::{DocumentType, Language, PdfTask};
use serde::Deserialize;
use serde_json::Value as JsonValue;

use super::form::UploadForm;
use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
};

const TRANSLATE_TEXT_ERROR: &str = "Error translating text: ";
const ANALYZE_TEXT_ERROR: &str = "Error analyzing text: ";
const SEARCH_VIDEOS_ERROR: &str = "Error searching YouTube videos: ";

/// Validates the PDF part and runs `task` against it
async fn run_pdf_task(
    state: &AppState,
    form: &mut UploadForm,
    task: impl FnOnce(&UploadForm) -> ApiResult<PdfTask>,
) -> ApiResult<Json<JsonValue>> {
    let file = form.take_file()?;
    file.require_pdf()?;
    let task = task(form)?;

    let document = file.into_document();
    state
        .intelligence
        .process_document(&document, &task)
        .await
        .map(Json)
        .map_err(|err| ApiError::upstream(task.error_prefix(), err))
}

fn language(form: &UploadForm) -> ApiResult<Language> {
    Ok(Language::parse(form.text("language")?)?)
}

/// `POST /pdf_translation` (file, language)
pub async fn pdf_translation(
    State(state): State<AppState>,
    multipart: Multipart,
) -> ApiResult<Json<JsonValue>> {
    let mut form = UploadForm::read(multipart).await?;
    run_pdf_task(&state, &mut form, |form| Ok(PdfTask::Translate(language(form)?))).await
}

/// `POST /pdf_jargon_extraction` (file, language)
pub async fn pdf_jargon_extraction(
    State(state): State<AppState>,
    multipart: Multipart,
) -> ApiResult<Json<JsonValue>> {
    let mut form = UploadForm::read(multipart).await?;
    run_pdf_task(&state, &mut form, |form| Ok(PdfTask::ExtractJargon(language(form)?))).await
}

/// `POST /find_Document_type` (file)
pub async fn find_document_type(
    State(state): State<AppState>,
    multipart: Multipart,
) -> ApiResult<Json<JsonValue>> {
    let mut form = UploadForm::read(multipart).await?;
    run_pdf_task(&state, &mut form, |_| Ok(PdfTask::IdentifyDocumentType)).await
}

pub async fn analyze_harmful_terms(
    State(state): State<AppState>,
    multipart: Multipart,
) -> ApiResult<Json<JsonValue>> {
    let mut form = UploadForm::read(multipart).await?;
    run_pdf_task(&state, &mut form, |_| Ok(PdfTask::HarmfulTerms)).await
}

pub async fn analyze_contract_alternatives(
    State(state): State<AppState>,
    multipart: Multipart,
) -> ApiResult<Json<JsonValue>> {
    let mut form = UploadForm::read(multipart).await?;
    run_pdf_task(&state, &mut form, |_| Ok(PdfTask::ContractAlternatives)).await
}

pub async fn analyze_loan_document(
    State(state): State<AppState>,
    multipart: Multipart,
) -> ApiResult<Json<JsonValue>> {
    let mut form = UploadForm::read(multipart).await?;
    run_pdf_task(&state, &mut form, |_| Ok(PdfTask::LoanAnalysis)).await
}

/// `POST /text_translation` (text, language), answers `text/plain`
pub async fn text_translation(
    State(state): State<AppState>,
    multipart: Multipart,
) -> ApiResult<String> {
    let form = UploadForm::read(multipart).await?;
    let text = form.text("text")?;
    let language = language(&form)?;

    let outcome = state
        .intelligence
        .translate_text(text, &language)
        .await
        .map_err(|err| ApiError::upstream(TRANSLATE_TEXT_ERROR, err))?;

    Ok(outcome.into_text())
}

/// `POST /analyze_text` (text, language, documentType)
pub async fn analyze_text(
    State(state): State<AppState>,
    multipart: Multipart,
) -> ApiResult<String> {
    let form = UploadForm::read(multipart).await?;
    let text = form.text("text")?;
    let language = language(&form)?;
    let document_type = DocumentType::parse(form.text("documentType")?)?;

    let outcome = state
        .intelligence
        .analyze_text(text, &language, &document_type)
        .await
        .map_err(|err| ApiError::upstream(ANALYZE_TEXT_ERROR, err))?;

    Ok(outcome.into_text())
}

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    pub title: String,
    pub language: String,
}

/// `GET /search?title=&language=`
pub async fn search_videos(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> ApiResult<Json<Vec<String>>> {
    let links = state
        .videos
        .search(&query.title, &query.language)
        .await
        .map_err(|err| ApiError::upstream(SEARCH_VIDEOS_ERROR, err))?;

    tracing::debug!(title = %query.title, results = links.len(), "Video search complete");
    Ok(Json(links))
}
