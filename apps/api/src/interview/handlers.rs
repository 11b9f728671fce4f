//! Axum route handlers for the Interview API.
//!
//! Each handler locks one session, runs exactly one controller operation on a
//! copy of it, stores the returned session, and renders the view from that.

use axum::{
    extract::{Multipart, Path, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use crate::errors::AppError;
use crate::interview::session::{CloseReason, JobTarget, Session, SessionState};
use crate::interview::store::SessionHandle;
use crate::interview::transcript::Turn;
use crate::state::AppState;

/// File name of the downloadable report.
pub const REPORT_FILE_NAME: &str = "interview_behavioral_log.txt";

const AUDIO_FIELD: &str = "audio";

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct StartRequest {
    /// Restart this session in place, discarding its state.
    pub session_id: Option<Uuid>,
    pub job_title: String,
    pub resume_text: String,
    pub job_description: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct AnswerRequest {
    pub answer: String,
}

#[derive(Debug, Serialize)]
pub struct TranscriptionResponse {
    pub transcription: String,
}

#[derive(Debug, Serialize)]
pub struct SessionView<'a> {
    pub session_id: Uuid,
    pub state: SessionState,
    pub close_reason: Option<CloseReason>,
    pub job_title: &'a str,
    pub started_at: DateTime<Utc>,
    pub current_index: usize,
    /// 1-based number of the question on screen.
    pub question_number: Option<usize>,
    pub current_question: Option<&'a str>,
    pub turns: Vec<Turn<'a>>,
    /// Every question asked so far has been answered.
    pub transcript_complete: bool,
    pub notices: Vec<String>,
}

impl<'a> SessionView<'a> {
    pub fn new(session: &'a Session, notices: Vec<String>) -> Self {
        let current_question = session.current_question();
        Self {
            session_id: session.id,
            state: session.state,
            close_reason: session.close_reason,
            job_title: &session.target.job_title,
            started_at: session.started_at,
            current_index: session.current_index,
            question_number: current_question.map(|_| session.current_index + 1),
            current_question,
            turns: session.transcript.turns(),
            transcript_complete: session.transcript.is_complete(),
            notices,
        }
    }
}

async fn find(state: &AppState, id: Uuid) -> Result<SessionHandle, AppError> {
    state
        .sessions
        .get(id)
        .await
        .ok_or_else(|| AppError::NotFound(format!("Interview {id} not found")))
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/interviews
///
/// Starts an interview and asks the opening question. With `session_id`, the
/// existing interview is restarted in place: its state is discarded, even if
/// the new opening question fails, and any event already running on it is
/// allowed to finish first.
pub async fn handle_start(
    State(state): State<AppState>,
    Json(request): Json<StartRequest>,
) -> Result<(StatusCode, Json<serde_json::Value>), AppError> {
    let target = JobTarget::new(
        &request.job_title,
        &request.resume_text,
        request.job_description.as_deref(),
    )?;

    let Some(id) = request.session_id else {
        let session = state
            .controller
            .start_interview(Uuid::new_v4(), target)
            .await?;
        let view = render(&session, Vec::new())?;
        state.sessions.insert(session).await;
        return Ok((StatusCode::CREATED, view));
    };

    let handle = find(&state, id).await?;
    let mut session = handle.lock().await;

    // Left NotStarted if the opening question fails.
    *session = Session::new(id, target.clone());
    *session = state.controller.start_interview(id, target).await?;

    Ok((StatusCode::CREATED, render(&session, Vec::new())?))
}

/// GET /api/v1/interviews/:id
pub async fn handle_get(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    let handle = find(&state, id).await?;
    let session = handle.lock().await;
    render(&session, Vec::new())
}

/// POST /api/v1/interviews/:id/answers
///
/// Submits the candidate's answer. "quit" or "exit" ends the interview.
pub async fn handle_answer(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<AnswerRequest>,
) -> Result<Json<serde_json::Value>, AppError> {
    let handle = find(&state, id).await?;
    let mut session = handle.lock().await;

    let transition = state
        .controller
        .submit_answer(session.clone(), &request.answer)
        .await?;
    debug!("Interview {id} answer outcome: {:?}", transition.outcome);
    *session = transition.session;

    render(&session, transition.notices)
}

/// POST /api/v1/interviews/:id/end
pub async fn handle_end(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    let handle = find(&state, id).await?;
    let mut session = handle.lock().await;

    let transition = state.controller.end_interview(session.clone());
    *session = transition.session;

    render(&session, transition.notices)
}

/// POST /api/v1/interviews/:id/transcriptions
///
/// Transcribes one recorded answer (multipart field `audio`). The text is
/// returned for editing; the session itself is not modified.
pub async fn handle_transcribe(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    mut multipart: Multipart,
) -> Result<Json<TranscriptionResponse>, AppError> {
    let handle = find(&state, id).await?;
    if !handle.lock().await.is_awaiting_answer() {
        return Err(AppError::Conflict(format!(
            "Interview {id} is not awaiting an answer"
        )));
    }

    let mut audio = None;
    while let Some(field) = multipart
        .next_field()
        .await?
    {
        if field.name() == Some(AUDIO_FIELD) {
            audio = Some(field.bytes().await?);
            break;
        }
    }
    let audio = audio
        .filter(|a| !a.is_empty())
        .ok_or_else(|| AppError::Validation(format!("missing '{AUDIO_FIELD}' field")))?;

    let transcription = state.transcriber.transcribe(audio).await?;
    Ok(Json(TranscriptionResponse { transcription }))
}

/// GET /api/v1/interviews/:id/report
///
/// Downloads the transcript as plain text. Only available once the interview is closed.
pub async fn handle_report(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let handle = find(&state, id).await?;
    let session = handle.lock().await;
    if !session.is_closed() {
        return Err(AppError::Conflict(format!(
            "Interview {id} is still in progress"
        )));
    }

    Ok((
        [
            (header::CONTENT_TYPE, "text/plain; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{REPORT_FILE_NAME}\""),
            ),
        ],
        session.transcript.render_log(),
    ))
}

fn render(session: &Session, notices: Vec<String>) -> Result<Json<serde_json::Value>, AppError> {
    serde_json::to_value(SessionView::new(session, notices))
        .map(Json)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Failed to serialize session: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interview::transcript::Transcript;

    fn session() -> Session {
        let target = JobTarget::new("Backend Engineer", "resume", None).unwrap();
        let mut session = Session::new(Uuid::new_v4(), target);
        let mut transcript = Transcript::new();
        transcript.append_question("Intro?");
        transcript.append_answer_and_feedback("Hi.", "Say more.").unwrap();
        transcript.append_question("Conflict?");
        session.transcript = transcript;
        session.current_index = 1;
        session.state = SessionState::AwaitingAnswer;
        session
    }

    #[test]
    fn test_view_shows_open_question_and_completed_turns() {
        let session = session();
        let json = serde_json::to_value(SessionView::new(&session, vec![])).unwrap();

        assert_eq!(json["state"], "awaiting_answer");
        assert_eq!(json["question_number"], 2);
        assert_eq!(json["current_question"], "Conflict?");
        assert_eq!(json["turns"].as_array().unwrap().len(), 1);
        assert_eq!(json["turns"][0]["feedback"], "Say more.");
        assert!(json["close_reason"].is_null());
        assert_eq!(json["transcript_complete"], false);
    }

    #[test]
    fn test_closed_view_has_no_current_question() {
        let mut session = session();
        session.close(CloseReason::Quit);
        let json =
            serde_json::to_value(SessionView::new(&session, vec!["bye".to_string()])).unwrap();

        assert_eq!(json["state"], "closed");
        assert_eq!(json["close_reason"], "quit");
        assert!(json["current_question"].is_null());
        assert!(json["question_number"].is_null());
        assert_eq!(json["notices"][0], "bye");
    }
}
