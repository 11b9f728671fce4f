// All LLM prompt constants for the interview module.
// Reuses cross-cutting fragments from llm_client::prompts.

/// System prompt for the interviewer. Append `PLAIN_TEXT_INSTRUCTION` before sending.
pub const QUESTION_SYSTEM: &str = "You are an experienced hiring manager running a \
    behavioral mock interview. You ask exactly one question per reply and nothing else.";

/// Next-question prompt template.
/// Replace: {job_title}, {resume}, {job_description}, {past_responses}
pub const QUESTION_PROMPT_TEMPLATE: &str = r#"You are conducting a behavioral mock interview for the position of {job_title}.

CANDIDATE RESUME:
{resume}

JOB DESCRIPTION:
{job_description}

PREVIOUS QUESTIONS AND ANSWERS:
{past_responses}

Ask the next behavioral interview question. Ask exactly ONE question.
If there are no previous answers, open with an introduction question.
Build on the candidate's earlier answers where it helps; do not repeat a question already asked."#;

/// System prompt for the interview coach. Append `PLAIN_TEXT_INSTRUCTION` before sending.
pub const FEEDBACK_SYSTEM: &str = "You are an expert interview coach giving candid, \
    constructive feedback on a single interview answer.";

/// Feedback prompt template.
/// Replace: {question}, {answer}
pub const FEEDBACK_PROMPT_TEMPLATE: &str = r#"Review the candidate's answer to the interview question below.

Question: {question}
Answer: {answer}

Give constructive feedback on clarity, relevance, depth, and communication.
Point out what worked and what to improve, and suggest how the answer could be framed more strongly (for example with the STAR structure)."#;
