//! Interview controller — the session state machine.
//!
//! States: `NotStarted → AwaitingAnswer → Closed`. Every operation takes the
//! current `Session` by value and returns the next one; callers render from
//! the returned value.
//!
//! Failure policy:
//! - feedback failure is absorbed: the turn records `FEEDBACK_PLACEHOLDER`
//! - next-question failure closes the session; it is never retried

use std::sync::Arc;

use tracing::{error, info, warn};
use uuid::Uuid;

use crate::interview::generators::{FeedbackGenerator, GenerationError, QuestionGenerator};
use crate::interview::session::{CloseReason, JobTarget, Session, SessionState};
use crate::interview::transcript::TranscriptError;

/// Recorded as the feedback of a turn whose feedback call failed.
pub const FEEDBACK_PLACEHOLDER: &str = "Feedback generation failed.";

const QUIT_SENTINELS: [&str; 2] = ["quit", "exit"];

/// True when the trimmed answer is "quit" or "exit" in any case.
pub fn is_quit_sentinel(answer: &str) -> bool {
    let answer = answer.trim();
    QUIT_SENTINELS
        .iter()
        .any(|s| answer.eq_ignore_ascii_case(s))
}

/// What a single event did to the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnOutcome {
    /// Blank answer; nothing changed.
    Ignored,
    /// Answer recorded and the next question asked.
    Advanced,
    /// Answer recorded but no next question could be generated; session closed.
    QuestionFailed,
    /// Session closed at the candidate's request.
    Ended,
    /// Session was already closed; nothing changed.
    AlreadyClosed,
}

#[derive(Debug)]
pub struct Transition {
    pub session: Session,
    pub outcome: TurnOutcome,
    /// Inline, non-blocking messages for the candidate.
    pub notices: Vec<String>,
}

impl Transition {
    fn quiet(session: Session, outcome: TurnOutcome) -> Self {
        Self {
            session,
            outcome,
            notices: Vec::new(),
        }
    }
}

pub struct InterviewController {
    questions: Arc<dyn QuestionGenerator>,
    feedback: Arc<dyn FeedbackGenerator>,
}

impl InterviewController {
    pub fn new(questions: Arc<dyn QuestionGenerator>, feedback: Arc<dyn FeedbackGenerator>) -> Self {
        Self {
            questions,
            feedback,
        }
    }

    /// Starts a fresh interview and asks the opening question.
    ///
    /// On failure no session exists; the caller keeps nothing from any earlier one.
    pub async fn start_interview(
        &self,
        id: Uuid,
        target: JobTarget,
    ) -> Result<Session, GenerationError> {
        let mut session = Session::new(id, target);

        let question = self
            .questions
            .generate_question(&session.target, "")
            .await
            .inspect_err(|e| error!("Opening question for session {id} failed: {e}"))?;

        session.transcript.append_question(question);
        session.current_index = 0;
        session.state = SessionState::AwaitingAnswer;

        info!(
            "Session {id} started for role {:?}",
            session.target.job_title
        );
        Ok(session)
    }

    /// Handles "submit response".
    ///
    /// A quit sentinel closes the session without any generator call. Any other
    /// non-blank answer is reviewed, recorded, and followed by a new question.
    pub async fn submit_answer(
        &self,
        mut session: Session,
        answer: &str,
    ) -> Result<Transition, TranscriptError> {
        if session.is_closed() {
            return Ok(Transition::quiet(session, TurnOutcome::AlreadyClosed));
        }

        let answer = answer.trim();
        if answer.is_empty() || !session.is_awaiting_answer() {
            return Ok(Transition::quiet(session, TurnOutcome::Ignored));
        }

        if is_quit_sentinel(answer) {
            session.close(CloseReason::Quit);
            info!(
                "Session {} closed by quit sentinel after {} answers",
                session.id,
                session.transcript.answers().len()
            );
            return Ok(Transition::quiet(session, TurnOutcome::Ended));
        }

        let question = session
            .transcript
            .open_question()
            .ok_or(TranscriptError::InvariantViolation {
                questions: session.transcript.questions().len(),
                answers: session.transcript.answers().len(),
            })?
            .to_string();

        let mut notices = Vec::new();

        let feedback = match self.feedback.generate_feedback(&question, answer).await {
            Ok(feedback) => feedback,
            Err(e) => {
                warn!("Feedback for session {} failed, using placeholder: {e}", session.id);
                notices.push(format!("Error generating feedback: {e}"));
                FEEDBACK_PLACEHOLDER.to_string()
            }
        };

        session
            .transcript
            .append_answer_and_feedback(answer, feedback)?;
        session.current_index += 1;

        let past_responses = session.transcript.past_responses();
        let outcome = match self
            .questions
            .generate_question(&session.target, &past_responses)
            .await
        {
            Ok(next) => {
                session.transcript.append_question(next);
                info!(
                    "Session {} advanced to question {}",
                    session.id,
                    session.current_index + 1
                );
                TurnOutcome::Advanced
            }
            Err(e) => {
                error!("Next question for session {} failed, closing: {e}", session.id);
                notices.push(format!("Error generating next question: {e}"));
                session.close(CloseReason::GenerationFailed);
                TurnOutcome::QuestionFailed
            }
        };

        Ok(Transition {
            session,
            outcome,
            notices,
        })
    }

    /// Handles "end interview early". Legal at any time; makes no generator calls.
    pub fn end_interview(&self, mut session: Session) -> Transition {
        if session.is_closed() {
            return Transition::quiet(session, TurnOutcome::AlreadyClosed);
        }
        session.close(CloseReason::EndedEarly);
        info!(
            "Session {} ended early after {} answers",
            session.id,
            session.transcript.answers().len()
        );
        Transition::quiet(session, TurnOutcome::Ended)
    }
}
