// Mock interview engine: transcript, session state machine, and the
// generation seams it drives. All LLM calls go through llm_client.

pub mod controller;
pub mod generators;
pub mod handlers;
pub mod prompts;
pub mod session;
pub mod store;
pub mod transcript;
