pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::interview::handlers;
use crate::resume::handlers as resume_handlers;
use crate::state::AppState;

/// Upload cap for resume PDFs and recorded answers. Matches the speech
/// service's limit on inline audio.
pub const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Resume ingestion
        .route(
            "/api/v1/resumes/extract",
            post(resume_handlers::handle_extract)
                .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES)),
        )
        // Interview API
        .route("/api/v1/interviews", post(handlers::handle_start))
        .route("/api/v1/interviews/:id", get(handlers::handle_get))
        .route(
            "/api/v1/interviews/:id/answers",
            post(handlers::handle_answer),
        )
        .route(
            "/api/v1/interviews/:id/transcriptions",
            post(handlers::handle_transcribe)
                .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES)),
        )
        .route("/api/v1/interviews/:id/end", post(handlers::handle_end))
        .route(
            "/api/v1/interviews/:id/report",
            get(handlers::handle_report),
        )
        .with_state(state)
}
