// Shared prompt fragments. Each module that calls the LLM keeps its own
// prompts.rs alongside it; only cross-cutting fragments live here.

/// System prompt fragment that keeps replies as plain conversational text.
pub const PLAIN_TEXT_INSTRUCTION: &str = "Respond in plain text only. \
    Do NOT use markdown code fences. \
    Do NOT include explanations of what you are doing or apologies.";
