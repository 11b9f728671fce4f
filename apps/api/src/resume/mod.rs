//! Resume ingestion. Pasted text needs no work; PDF uploads go through a
//! `TextExtractor`.

pub mod handlers;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("Error reading PDF: {0}")]
    Unreadable(String),

    #[error("The PDF contains no extractable text")]
    NoText,
}

pub trait TextExtractor: Send + Sync {
    /// Returns the document text, one page after another separated by newlines.
    fn extract_text(&self, bytes: &[u8]) -> Result<String, ExtractionError>;
}

/// Extracts text from an in-memory PDF with `pdf-extract`.
pub struct PdfTextExtractor;

impl TextExtractor for PdfTextExtractor {
    fn extract_text(&self, bytes: &[u8]) -> Result<String, ExtractionError> {
        let raw = pdf_extract::extract_text_from_mem(bytes)
            .map_err(|e| ExtractionError::Unreadable(e.to_string()))?;
        normalize_pages(&raw)
    }
}

/// Page breaks become newlines. Whitespace-only output is an error.
fn normalize_pages(raw: &str) -> Result<String, ExtractionError> {
    let text = raw.replace('\u{c}', "\n");
    if text.trim().is_empty() {
        return Err(ExtractionError::NoText);
    }
    Ok(text)
}
