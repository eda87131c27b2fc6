// Cover letter generation: candidate form model, prompt building,
// the per-attempt workflow state machine and its HTTP handlers.
// All provider calls go through llm_client.

pub mod handlers;
pub mod models;
pub mod prompts;
pub mod workflow;
