//! Request builders.
//!
//! Each submodule turns domain inputs into a
//! [`GenerateRequest`](crate::gateway::GenerateRequest) or
//! [`ChatRequest`](crate::gateway::ChatRequest) and normalizes the backend
//! result. Prompt text is fixed here; callers only supply the material.

mod audit;
mod chat;
mod notes;
mod replace;

pub use audit::{build_audit_request, run_agent_step, RunInput};
pub use chat::chat_with_note;
pub use notes::note_action;
pub use replace::smart_replace;

/// Rough token estimate used for dashboard metrics: one token per four
/// characters of output, rounded up.
pub fn estimate_tokens(text: &str) -> u32 {
    text.chars().count().div_ceil(4) as u32
}

/// Unix epoch milliseconds, the timestamp format stored in run history.
pub(crate) fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}
