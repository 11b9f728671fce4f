use axum::{
    extract::multipart::MultipartError,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::interview::generators::GenerationError;
use crate::interview::session::InvalidTarget;
use crate::interview::transcript::TranscriptError;
use crate::resume::ExtractionError;
use crate::speech::AudioError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Payload too large: {0}")]
    PayloadTooLarge(String),

    #[error(transparent)]
    Generation(#[from] GenerationError),

    #[error(transparent)]
    Extraction(#[from] ExtractionError),

    #[error(transparent)]
    Audio(#[from] AudioError),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl From<InvalidTarget> for AppError {
    fn from(e: InvalidTarget) -> Self {
        AppError::Validation(e.to_string())
    }
}

/// Oversized uploads keep their 413; every other multipart fault is a bad request.
impl From<MultipartError> for AppError {
    fn from(e: MultipartError) -> Self {
        if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
            AppError::PayloadTooLarge(e.body_text())
        } else {
            AppError::Validation(e.body_text())
        }
    }
}

impl From<TranscriptError> for AppError {
    fn from(e: TranscriptError) -> Self {
        AppError::Internal(anyhow::Error::new(e))
    }
}

impl AppError {
    fn parts(&self) -> (StatusCode, &'static str, String) {
        match self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone()),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::Conflict(msg) => (StatusCode::CONFLICT, "CONFLICT", msg.clone()),
            AppError::PayloadTooLarge(msg) => (
                StatusCode::PAYLOAD_TOO_LARGE,
                "PAYLOAD_TOO_LARGE",
                msg.clone(),
            ),
            AppError::Generation(e) => {
                tracing::error!("Generation error: {e}");
                (StatusCode::BAD_GATEWAY, "GENERATION_ERROR", e.to_string())
            }
            AppError::Extraction(e) => {
                tracing::warn!("Resume extraction error: {e}");
                (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    "EXTRACTION_ERROR",
                    e.to_string(),
                )
            }
            AppError::Audio(e @ AudioError::UnrecognizedAudio) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "UNRECOGNIZED_AUDIO",
                e.to_string(),
            ),
            AppError::Audio(e @ AudioError::Service(_)) => {
                tracing::error!("Speech service error: {e}");
                (StatusCode::BAD_GATEWAY, "SPEECH_SERVICE_ERROR", e.to_string())
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
                )
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = self.parts();

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm_client::LlmError;

    #[test]
    fn test_audio_errors_split_by_cause() {
        let (status, code, _) = AppError::from(AudioError::UnrecognizedAudio).parts();
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(code, "UNRECOGNIZED_AUDIO");

        let (status, code, _) =
            AppError::from(AudioError::Service("backend down".to_string())).parts();
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(code, "SPEECH_SERVICE_ERROR");
    }

    #[test]
    fn test_generation_error_message_is_surfaced() {
        let err = AppError::from(GenerationError::from(LlmError::EmptyContent));
        let (status, code, message) = err.parts();
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(code, "GENERATION_ERROR");
        assert!(message.contains("empty content"), "got: {message}");
    }

    #[test]
    fn test_invariant_violation_is_internal_and_opaque() {
        let err = AppError::from(TranscriptError::InvariantViolation {
            questions: 1,
            answers: 1,
        });
        let (status, code, message) = err.parts();
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(code, "INTERNAL_ERROR");
        assert!(!message.contains("Invariant"));
    }

    #[test]
    fn test_invalid_target_maps_to_validation() {
        let (status, _, message) = AppError::from(InvalidTarget::MissingJobTitle).parts();
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(message.contains("job title"));
    }
}
