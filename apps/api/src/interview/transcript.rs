//! Transcript store — the ordered, index-aligned record of every turn.
//!
//! Entry `i` of `questions`, `answers` and `feedback` always belongs to the
//! same turn. `answers` and `feedback` grow together and trail `questions` by
//! at most one (the question currently awaiting an answer).

use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TranscriptError {
    #[error(
        "Invariant violation: no open question to answer ({questions} questions, {answers} answers)"
    )]
    InvariantViolation { questions: usize, answers: usize },
}

/// One completed question/answer/feedback triple, numbered from 1.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Turn<'a> {
    pub number: usize,
    pub question: &'a str,
    pub answer: &'a str,
    pub feedback: &'a str,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Transcript {
    questions: Vec<String>,
    answers: Vec<String>,
    feedback: Vec<String>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append_question(&mut self, question: impl Into<String>) {
        self.questions.push(question.into());
    }

    /// Records the answer and its feedback for the open question.
    pub fn append_answer_and_feedback(
        &mut self,
        answer: impl Into<String>,
        feedback: impl Into<String>,
    ) -> Result<(), TranscriptError> {
        if self.answers.len() == self.questions.len() {
            return Err(TranscriptError::InvariantViolation {
                questions: self.questions.len(),
                answers: self.answers.len(),
            });
        }
        self.answers.push(answer.into());
        self.feedback.push(feedback.into());
        Ok(())
    }

    /// True once every question asked has been answered and reviewed.
    pub fn is_complete(&self) -> bool {
        !self.questions.is_empty() && self.feedback.len() == self.questions.len()
    }

    pub fn questions(&self) -> &[String] {
        &self.questions
    }

    pub fn answers(&self) -> &[String] {
        &self.answers
    }

    pub fn feedback(&self) -> &[String] {
        &self.feedback
    }

    /// The question still waiting for an answer, if any.
    pub fn open_question(&self) -> Option<&str> {
        self.questions.get(self.answers.len()).map(String::as_str)
    }

    /// Completed turns in order. An unanswered trailing question is not a turn.
    pub fn turns(&self) -> Vec<Turn<'_>> {
        self.questions
            .iter()
            .zip(&self.answers)
            .zip(&self.feedback)
            .enumerate()
            .map(|(i, ((question, answer), feedback))| Turn {
                number: i + 1,
                question,
                answer,
                feedback,
            })
            .collect()
    }

    /// Prior turns as model context: `Q{i}: ...\nA{i}: ...` blocks separated by a blank line.
    /// Empty before the first answer.
    pub fn past_responses(&self) -> String {
        self.turns()
            .iter()
            .map(|t| format!("Q{n}: {q}\nA{n}: {a}", n = t.number, q = t.question, a = t.answer))
            .collect::<Vec<_>>()
            .join("\n\n")
    }

    /// The exportable report: `Q{i}/A{i}/Feedback` blocks separated by a blank line.
    /// Pure function of the stored turns.
    pub fn render_log(&self) -> String {
        self.turns()
            .iter()
            .map(|t| {
                format!(
                    "Q{n}: {q}\nA{n}: {a}\nFeedback: {f}",
                    n = t.number,
                    q = t.question,
                    a = t.answer,
                    f = t.feedback
                )
            })
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_turns() -> Transcript {
        let mut t = Transcript::new();
        t.append_question("Tell me about yourself.");
        t.append_answer_and_feedback("I build APIs.", "Add a concrete example.")
            .unwrap();
        t.append_question("Describe a conflict you resolved.");
        t.append_answer_and_feedback("We disagreed on a schema.", "Explain the outcome.")
            .unwrap();
        t
    }

    #[test]
    fn test_answer_without_open_question_is_rejected() {
        let mut t = Transcript::new();
        let err = t.append_answer_and_feedback("a", "f").unwrap_err();
        assert_eq!(
            err,
            TranscriptError::InvariantViolation {
                questions: 0,
                answers: 0
            }
        );

        t.append_question("q");
        t.append_answer_and_feedback("a", "f").unwrap();
        assert!(t.append_answer_and_feedback("again", "f").is_err());
        assert_eq!(t.answers().len(), 1);
        assert_eq!(t.feedback().len(), 1);
    }

    #[test]
    fn test_is_complete_tracks_open_question() {
        let mut t = Transcript::new();
        assert!(!t.is_complete(), "empty transcript is never complete");

        t.append_question("q1");
        assert!(!t.is_complete());
        assert_eq!(t.open_question(), Some("q1"));

        t.append_answer_and_feedback("a1", "f1").unwrap();
        assert!(t.is_complete());
        assert_eq!(t.open_question(), None);
    }

    #[test]
    fn test_render_log_golden() {
        let expected = "Q1: Tell me about yourself.\n\
                        A1: I build APIs.\n\
                        Feedback: Add a concrete example.\n\
                        \n\
                        Q2: Describe a conflict you resolved.\n\
                        A2: We disagreed on a schema.\n\
                        Feedback: Explain the outcome.";
        let t = two_turns();
        assert_eq!(t.render_log(), expected);
        assert_eq!(t.render_log(), t.render_log());
    }

    #[test]
    fn test_render_log_omits_unanswered_question() {
        let mut t = two_turns();
        t.append_question("Where do you see yourself in five years?");
        assert!(!t.render_log().contains("five years"));
        assert_eq!(t.turns().len(), 2);
    }

    #[test]
    fn test_past_responses_format() {
        let t = two_turns();
        assert_eq!(
            t.past_responses(),
            "Q1: Tell me about yourself.\nA1: I build APIs.\n\n\
             Q2: Describe a conflict you resolved.\nA2: We disagreed on a schema."
        );
        assert_eq!(Transcript::new().past_responses(), "");
    }
}
