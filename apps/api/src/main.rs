mod config;
mod errors;
mod interview;
mod llm_client;
mod resume;
mod routes;
mod speech;
mod state;
#[cfg(test)]
mod test_support;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::interview::controller::InterviewController;
use crate::interview::generators::{LlmFeedbackGenerator, LlmQuestionGenerator};
use crate::interview::store::SessionStore;
use crate::llm_client::LlmClient;
use crate::resume::PdfTextExtractor;
use crate::routes::build_router;
use crate::speech::{DisabledTranscriber, GoogleSpeechTranscriber, Transcriber};
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first; a missing credential stops the process here
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Interview API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize LLM client
    let llm = LlmClient::new(config.anthropic_api_key.clone())?;
    info!("LLM client initialized (model: {})", llm_client::MODEL);

    let controller = InterviewController::new(
        Arc::new(LlmQuestionGenerator(llm.clone())),
        Arc::new(LlmFeedbackGenerator(llm)),
    );

    // Initialize speech transcription (optional)
    let transcriber: Arc<dyn Transcriber> = match &config.google_speech_api_key {
        Some(key) => {
            info!("Speech transcription enabled");
            Arc::new(GoogleSpeechTranscriber::new(key.clone())?)
        }
        None => {
            warn!("GOOGLE_SPEECH_API_KEY not set; voice answers are disabled");
            Arc::new(DisabledTranscriber)
        }
    };

    // Build app state
    let state = AppState {
        controller: Arc::new(controller),
        sessions: SessionStore::new(),
        extractor: Arc::new(PdfTextExtractor),
        transcriber,
        config: config.clone(),
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
