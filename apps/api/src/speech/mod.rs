//! Speech-to-text for voice answers.
//!
//! The client records one utterance and uploads it; a `Transcriber` turns it
//! into text the candidate can edit before submitting. Failures never touch
//! session state.

use async_trait::async_trait;
use base64::Engine;
use bytes::Bytes;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

const GOOGLE_SPEECH_URL: &str = "https://speech.googleapis.com/v1/speech:recognize";
const LANGUAGE_CODE: &str = "en-US";

#[derive(Debug, Error)]
pub enum AudioError {
    /// Speech was captured but could not be understood.
    #[error("Could not understand audio.")]
    UnrecognizedAudio,

    #[error("Speech recognition service error: {0}")]
    Service(String),
}

#[async_trait]
pub trait Transcriber: Send + Sync {
    async fn transcribe(&self, audio: Bytes) -> Result<String, AudioError>;
}

/// Used when no speech credential is configured.
pub struct DisabledTranscriber;

#[async_trait]
impl Transcriber for DisabledTranscriber {
    async fn transcribe(&self, _audio: Bytes) -> Result<String, AudioError> {
        Err(AudioError::Service(
            "speech transcription is not configured".to_string(),
        ))
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct RecognizeRequest<'a> {
    config: RecognitionConfig<'a>,
    audio: RecognitionAudio,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct RecognitionConfig<'a> {
    language_code: &'a str,
    enable_automatic_punctuation: bool,
}

#[derive(Debug, Serialize)]
struct RecognitionAudio {
    content: String,
}

#[derive(Debug, Deserialize)]
struct RecognizeResponse {
    #[serde(default)]
    results: Vec<RecognitionResult>,
}

#[derive(Debug, Deserialize)]
struct RecognitionResult {
    #[serde(default)]
    alternatives: Vec<Alternative>,
}

#[derive(Debug, Deserialize)]
struct Alternative {
    #[serde(default)]
    transcript: String,
}

/// Google Cloud Speech-to-Text over its REST API. The audio container
/// (WAV/FLAC) is detected by the service from the file header.
pub struct GoogleSpeechTranscriber {
    client: Client,
    api_key: String,
}

impl GoogleSpeechTranscriber {
    pub fn new(api_key: String) -> Result<Self, reqwest::Error> {
        Ok(Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(60))
                .build()?,
            api_key,
        })
    }
}

#[async_trait]
impl Transcriber for GoogleSpeechTranscriber {
    async fn transcribe(&self, audio: Bytes) -> Result<String, AudioError> {
        let request = RecognizeRequest {
            config: RecognitionConfig {
                language_code: LANGUAGE_CODE,
                enable_automatic_punctuation: true,
            },
            audio: RecognitionAudio {
                content: base64::engine::general_purpose::STANDARD.encode(&audio),
            },
        };

        let response = self
            .client
            .post(GOOGLE_SPEECH_URL)
            .query(&[("key", &self.api_key)])
            .json(&request)
            .send()
            .await
            .map_err(|e| AudioError::Service(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AudioError::Service(format!("status {status}: {body}")));
        }

        let body: RecognizeResponse = response
            .json()
            .await
            .map_err(|e| AudioError::Service(e.to_string()))?;

        debug!("Speech service returned {} result(s)", body.results.len());
        best_transcript(&body)
    }
}

/// Joins the top alternative of each result. No speech means unrecognized audio.
fn best_transcript(response: &RecognizeResponse) -> Result<String, AudioError> {
    let text = response
        .results
        .iter()
        .filter_map(|r| r.alternatives.first())
        .map(|a| a.transcript.trim())
        .filter(|t| !t.is_empty())
        .collect::<Vec<_>>()
        .join(" ");

    if text.is_empty() {
        return Err(AudioError::UnrecognizedAudio);
    }
    Ok(text)
}
