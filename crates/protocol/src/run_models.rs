//! Runtime run-state models.
//!
//! This module defines the structures that track the outcome of one agent
//! execution inside the pipeline session.

use serde::{Deserialize, Serialize};

/// Lifecycle status of one agent's latest run.
///
/// Normal progression: Idle -> Running -> Completed (or Error). Running is
/// transient and only ever visible while a backend call is in flight.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum RunStatus {
    /// The agent has never been run, or its state was reset.
    #[default]
    Idle,

    /// A generation request for the agent is in flight.
    Running,

    /// The latest run finished with generated text.
    Completed,

    /// The latest run failed; `error` carries the message.
    Error,
}

/// The recorded result of one agent execution.
///
/// Invariants: Completed implies `output` is populated and `error` is absent;
/// Error implies `output` is empty and `error` is populated.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct AgentRunState {
    pub status: RunStatus,

    /// Generated text. The edit surface may overwrite this after the fact
    /// without touching any other field.
    pub output: String,

    /// Estimated tokens in the output, one per four characters rounded up.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tokens_used: Option<u32>,

    /// Wall-clock duration of the backend call in milliseconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub execution_time_ms: Option<u64>,

    /// Failure message when `status` is Error.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    /// Unix epoch milliseconds at which the run reached a terminal state.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<i64>,
}

impl AgentRunState {
    /// State recorded synchronously when a run is dispatched.
    pub fn running() -> Self {
        Self {
            status: RunStatus::Running,
            ..Self::default()
        }
    }

    /// Terminal success state.
    pub fn completed(output: String, tokens_used: u32, execution_time_ms: u64, timestamp: i64) -> Self {
        Self {
            status: RunStatus::Completed,
            output,
            tokens_used: Some(tokens_used),
            execution_time_ms: Some(execution_time_ms),
            error: None,
            timestamp: Some(timestamp),
        }
    }

    /// Terminal failure state. The output is always empty.
    pub fn failed(error: String, timestamp: i64) -> Self {
        Self {
            status: RunStatus::Error,
            output: String::new(),
            tokens_used: None,
            execution_time_ms: None,
            error: Some(error),
            timestamp: Some(timestamp),
        }
    }
}
