use std::sync::Arc;

use crate::config::Config;
use crate::interview::controller::InterviewController;
use crate::interview::store::SessionStore;
use crate::resume::TextExtractor;
use crate::speech::Transcriber;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub controller: Arc<InterviewController>,
    pub sessions: SessionStore,
    /// Pluggable PDF text extraction. Default: PdfTextExtractor.
    pub extractor: Arc<dyn TextExtractor>,
    /// GoogleSpeechTranscriber when a speech key is configured, DisabledTranscriber otherwise.
    pub transcriber: Arc<dyn Transcriber>,
    pub config: Config,
}
