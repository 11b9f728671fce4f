//! Fakes and request helpers for router-level tests.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::{to_bytes, Body, Bytes};
use axum::http::{header, HeaderMap, Request, StatusCode};
use axum::Router;
use tokio::sync::Notify;
use tower::ServiceExt;

use crate::config::Config;
use crate::interview::controller::InterviewController;
use crate::interview::generators::{FeedbackGenerator, GenerationError, QuestionGenerator};
use crate::interview::session::JobTarget;
use crate::interview::store::SessionStore;
use crate::llm_client::LlmError;
use crate::resume::{ExtractionError, TextExtractor};
use crate::routes::build_router;
use crate::speech::{AudioError, Transcriber};
use crate::state::AppState;

pub fn service_fault() -> GenerationError {
    GenerationError(LlmError::Api {
        status: 503,
        message: "overloaded".to_string(),
    })
}

/// Replays queued results, then keeps asking "Question {n}?".
#[derive(Default)]
pub struct QueuedQuestions {
    script: Mutex<VecDeque<Result<String, GenerationError>>>,
    calls: AtomicUsize,
}

impl QueuedQuestions {
    pub fn push(&self, result: Result<String, GenerationError>) {
        self.script.lock().unwrap().push_back(result);
    }
}

#[async_trait]
impl QuestionGenerator for QueuedQuestions {
    async fn generate_question(
        &self,
        _target: &JobTarget,
        _past_responses: &str,
    ) -> Result<String, GenerationError> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
        self.script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(format!("Question {call}?")))
    }
}

/// Echoes the answer back as feedback. When gated, each call signals
/// `entered` and then waits for `release`.
#[derive(Default)]
pub struct EchoFeedback {
    gated: bool,
    pub entered: Notify,
    pub release: Notify,
}

impl EchoFeedback {
    pub fn gated() -> Self {
        Self {
            gated: true,
            ..Self::default()
        }
    }
}

#[async_trait]
impl FeedbackGenerator for EchoFeedback {
    async fn generate_feedback(
        &self,
        _question: &str,
        answer: &str,
    ) -> Result<String, GenerationError> {
        if self.gated {
            self.entered.notify_one();
            self.release.notified().await;
        }
        Ok(format!("Feedback on: {answer}"))
    }
}

#[derive(Default)]
pub struct CountingTranscriber {
    pub calls: AtomicUsize,
}

#[async_trait]
impl Transcriber for CountingTranscriber {
    async fn transcribe(&self, audio: Bytes) -> Result<String, AudioError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(format!("received {} bytes", audio.len()))
    }
}

pub struct LengthExtractor;

impl TextExtractor for LengthExtractor {
    fn extract_text(&self, bytes: &[u8]) -> Result<String, ExtractionError> {
        Ok(format!("resume of {} bytes", bytes.len()))
    }
}

pub struct TestApp {
    pub router: Router,
    pub state: AppState,
    pub questions: Arc<QueuedQuestions>,
    pub feedback: Arc<EchoFeedback>,
    pub transcriber: Arc<CountingTranscriber>,
}

impl TestApp {
    pub fn new(feedback: EchoFeedback) -> Self {
        let questions = Arc::new(QueuedQuestions::default());
        let feedback = Arc::new(feedback);
        let transcriber = Arc::new(CountingTranscriber::default());
        let state = AppState {
            controller: Arc::new(InterviewController::new(
                questions.clone(),
                feedback.clone(),
            )),
            sessions: SessionStore::new(),
            extractor: Arc::new(LengthExtractor),
            transcriber: transcriber.clone(),
            config: Config {
                anthropic_api_key: "sk-test".to_string(),
                google_speech_api_key: None,
                port: 0,
                rust_log: "debug".to_string(),
            },
        };
        Self {
            router: build_router(state.clone()),
            state,
            questions,
            feedback,
            transcriber,
        }
    }

    pub async fn send(&self, request: Request<Body>) -> (StatusCode, HeaderMap, Bytes) {
        send(self.router.clone(), request).await
    }

    /// Starts an interview and returns its id.
    pub async fn start(&self, job_title: &str) -> String {
        let (status, _, body) = self
            .send(json_request(
                "POST",
                "/api/v1/interviews",
                serde_json::json!({
                    "job_title": job_title,
                    "resume_text": "Rust and Postgres for six years."
                }),
            ))
            .await;
        assert_eq!(status, StatusCode::CREATED);
        json(&body)["session_id"].as_str().unwrap().to_string()
    }
}

pub async fn send(router: Router, request: Request<Body>) -> (StatusCode, HeaderMap, Bytes) {
    let response = router.oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, headers, body)
}

pub fn json(body: &[u8]) -> serde_json::Value {
    serde_json::from_slice(body).unwrap()
}

pub fn get_request(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

pub fn json_request(method: &str, uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn multipart_request(uri: &str, field: &str, content: Vec<u8>) -> Request<Body> {
    let boundary = "interview-test-boundary";
    let mut body = format!(
        "--{boundary}\r\n\
         Content-Disposition: form-data; name=\"{field}\"; filename=\"upload.bin\"\r\n\
         Content-Type: application/octet-stream\r\n\r\n"
    )
    .into_bytes();
    body.extend_from_slice(&content);
    body.extend_from_slice(format!("\r\n--{boundary}--\r\n").as_bytes());

    Request::builder()
        .method("POST")
        .uri(uri)
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={boundary}"),
        )
        .body(Body::from(body))
        .unwrap()
}
