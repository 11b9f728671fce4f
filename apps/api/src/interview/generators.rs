//! Question and feedback generation — trait seams over the generation service.
//!
//! The controller only sees `QuestionGenerator` and `FeedbackGenerator`, so
//! the state machine can be driven by scripted fakes in tests.
//! `LlmQuestionGenerator` / `LlmFeedbackGenerator` are the production backends.

use async_trait::async_trait;
use thiserror::Error;

use crate::interview::prompts::{
    FEEDBACK_PROMPT_TEMPLATE, FEEDBACK_SYSTEM, QUESTION_PROMPT_TEMPLATE, QUESTION_SYSTEM,
};
use crate::interview::session::JobTarget;
use crate::llm_client::prompts::PLAIN_TEXT_INSTRUCTION;
use crate::llm_client::{LlmClient, LlmError};

/// Any fault from the generation service: network, auth, quota, malformed response.
#[derive(Debug, Error)]
#[error("Generation service error: {0}")]
pub struct GenerationError(#[from] pub LlmError);

#[async_trait]
pub trait QuestionGenerator: Send + Sync {
    /// Produces the next interview question.
    /// `past_responses` is the `Q{i}/A{i}` history, empty on the first call.
    async fn generate_question(
        &self,
        target: &JobTarget,
        past_responses: &str,
    ) -> Result<String, GenerationError>;
}

#[async_trait]
pub trait FeedbackGenerator: Send + Sync {
    async fn generate_feedback(&self, question: &str, answer: &str)
        -> Result<String, GenerationError>;
}

pub struct LlmQuestionGenerator(pub LlmClient);

#[async_trait]
impl QuestionGenerator for LlmQuestionGenerator {
    async fn generate_question(
        &self,
        target: &JobTarget,
        past_responses: &str,
    ) -> Result<String, GenerationError> {
        let prompt = build_question_prompt(target, past_responses);
        let system = format!("{QUESTION_SYSTEM} {PLAIN_TEXT_INSTRUCTION}");
        Ok(self.0.complete(&prompt, &system).await?)
    }
}

pub struct LlmFeedbackGenerator(pub LlmClient);

#[async_trait]
impl FeedbackGenerator for LlmFeedbackGenerator {
    async fn generate_feedback(
        &self,
        question: &str,
        answer: &str,
    ) -> Result<String, GenerationError> {
        let prompt = build_feedback_prompt(question, answer);
        let system = format!("{FEEDBACK_SYSTEM} {PLAIN_TEXT_INSTRUCTION}");
        Ok(self.0.complete(&prompt, &system).await?)
    }
}

fn build_question_prompt(target: &JobTarget, past_responses: &str) -> String {
    QUESTION_PROMPT_TEMPLATE
        .replace("{job_title}", &target.job_title)
        .replace("{job_description}", &target.job_description)
        .replace("{past_responses}", past_responses)
        .replace("{resume}", &target.resume_text)
}

fn build_feedback_prompt(question: &str, answer: &str) -> String {
    FEEDBACK_PROMPT_TEMPLATE
        .replace("{question}", question)
        .replace("{answer}", answer)
}
