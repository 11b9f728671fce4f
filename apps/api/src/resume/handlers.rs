//! Axum route handlers for resume ingestion.

use axum::{
    extract::{Multipart, State},
    Json,
};
use serde::Serialize;
use tracing::info;

use crate::errors::AppError;
use crate::resume::ExtractionError;
use crate::state::AppState;

const FILE_FIELD: &str = "file";

#[derive(Debug, Serialize)]
pub struct ExtractResponse {
    pub resume_text: String,
}

/// POST /api/v1/resumes/extract
///
/// Accepts a multipart upload with a `file` field holding a PDF and returns
/// its text, ready to be passed as `resume_text` when starting an interview.
pub async fn handle_extract(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<ExtractResponse>, AppError> {
    let mut pdf = None;
    while let Some(field) = multipart
        .next_field()
        .await?
    {
        if field.name() == Some(FILE_FIELD) {
            pdf = Some(field.bytes().await?);
            break;
        }
    }
    let pdf = pdf.ok_or_else(|| AppError::Validation(format!("missing '{FILE_FIELD}' field")))?;

    // PDF parsing is CPU-bound and may panic on malformed input.
    let extractor = state.extractor.clone();
    let resume_text = tokio::task::spawn_blocking(move || extractor.extract_text(&pdf))
        .await
        .map_err(|e| ExtractionError::Unreadable(e.to_string()))??;

    info!("Extracted {} characters of resume text", resume_text.len());
    Ok(Json(ExtractResponse { resume_text }))
}
