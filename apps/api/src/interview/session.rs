//! The live interview value. Controller operations take a `Session` and hand
//! back the next one; nothing about an interview lives outside this struct.

use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;
use uuid::Uuid;

use crate::interview::transcript::Transcript;

/// Stands in for a job description the candidate chose not to supply.
pub const JOB_DESCRIPTION_NOT_PROVIDED: &str = "Not provided";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum InvalidTarget {
    #[error("Please provide the job title")]
    MissingJobTitle,
    #[error("Please provide your resume")]
    MissingResume,
}

/// What the candidate is interviewing for. Fixed for the life of a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JobTarget {
    pub job_title: String,
    pub resume_text: String,
    pub job_description: String,
}

impl JobTarget {
    pub fn new(
        job_title: &str,
        resume_text: &str,
        job_description: Option<&str>,
    ) -> Result<Self, InvalidTarget> {
        let job_title = job_title.trim();
        if job_title.is_empty() {
            return Err(InvalidTarget::MissingJobTitle);
        }
        if resume_text.trim().is_empty() {
            return Err(InvalidTarget::MissingResume);
        }
        let job_description = job_description
            .map(str::trim)
            .filter(|d| !d.is_empty())
            .unwrap_or(JOB_DESCRIPTION_NOT_PROVIDED);

        Ok(Self {
            job_title: job_title.to_string(),
            resume_text: resume_text.to_string(),
            job_description: job_description.to_string(),
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionState {
    NotStarted,
    AwaitingAnswer,
    Closed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CloseReason {
    /// The candidate answered with a quit sentinel.
    Quit,
    /// The candidate pressed "end interview".
    EndedEarly,
    /// No next question could be generated.
    GenerationFailed,
}

#[derive(Debug, Clone)]
pub struct Session {
    pub id: Uuid,
    pub target: JobTarget,
    pub transcript: Transcript,
    /// Index into the transcript's questions of the turn awaiting an answer.
    pub current_index: usize,
    pub state: SessionState,
    pub close_reason: Option<CloseReason>,
    pub started_at: DateTime<Utc>,
}

impl Session {
    /// A fresh session with an empty transcript, before its first question.
    pub fn new(id: Uuid, target: JobTarget) -> Self {
        Self {
            id,
            target,
            transcript: Transcript::new(),
            current_index: 0,
            state: SessionState::NotStarted,
            close_reason: None,
            started_at: Utc::now(),
        }
    }

    pub fn is_awaiting_answer(&self) -> bool {
        self.state == SessionState::AwaitingAnswer
    }

    pub fn is_closed(&self) -> bool {
        self.state == SessionState::Closed
    }

    /// The question the candidate is expected to answer next.
    pub fn current_question(&self) -> Option<&str> {
        if !self.is_awaiting_answer() {
            return None;
        }
        self.transcript
            .questions()
            .get(self.current_index)
            .map(String::as_str)
    }

    pub(crate) fn close(&mut self, reason: CloseReason) {
        self.state = SessionState::Closed;
        self.close_reason = Some(reason);
    }
}
