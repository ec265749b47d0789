//! Inter-task communication protocol.
//!
//! This module defines the message types for asynchronous communication
//! between the TUI (user interface) and the Core (business logic).
//!
//! The protocol follows an Operation/Event pattern:
//! - `Op`: Commands sent from TUI to Core
//! - `Event`: Status updates sent from Core to TUI
//!
//! Communication is channel-based so the UI stays responsive while the core
//! awaits generation requests.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::agent_models::AgentConfig;
use crate::log_models::LogEntry;
use crate::note_models::{ChatTurn, NoteAction, ToolResult};
use crate::pipeline_models::PipelineState;
use crate::run_models::AgentRunState;

/// Operations sent from the UI (TUI) to the Core logic.
///
/// These represent user commands and requests for information.
/// The core processes these operations and responds with Events.
///
/// Uses tagged enum serialization:
/// ```json
/// {
///   "type": "runAgent",
///   "payload": { "agent_id": "agent_layout" }
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "camelCase")]
pub enum Op {
    /// Run one pipeline agent against the generation API.
    RunAgent { agent_id: String },

    /// Overwrite the stored output of an agent's latest run.
    ///
    /// Only the output text changes; status, metrics, and timestamps are
    /// untouched.
    EditResult { agent_id: String, new_output: String },

    /// Replace one agent's configuration in place.
    UpdateAgent { agent: AgentConfig },

    /// Replace the whole agent list from a `pipeline_config.json` file.
    LoadAgents { path: PathBuf },

    /// Write the current agent list to `pipeline_config.json` under `dir`.
    SaveAgents { dir: PathBuf },

    /// Write one agent's output to `<agent name>_output.md` under `dir`.
    ExportReport { agent_id: String, dir: PathBuf },

    /// Store the generation API credential for this session.
    SetCredential { api_key: String },

    /// Replace the report template text.
    SetTemplate { template: String },

    /// Replace the observation notes text.
    SetObservations { observations: String },

    /// Merge list B into template A with marked insertions.
    SmartReplace { template_a: String, list_b: String },

    /// Apply a one-shot transformation to a free-form note.
    NoteAction { text: String, action: NoteAction },

    /// Send a chat message grounded in the given note text.
    ///
    /// `history` carries all prior turns; the final turn must be the new
    /// user message.
    ChatSend { note: String, history: Vec<ChatTurn> },

    /// Request a fresh state snapshot.
    GetState,

    /// Shut down the core task gracefully.
    Shutdown,
}

/// Events sent from the Core logic to the UI (TUI).
///
/// These represent state changes and status updates that the UI should
/// reflect to the user. Every state-changing operation is followed by a
/// `StateSnapshot` so the UI always renders from authoritative state.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "camelCase")]
pub enum Event {
    /// Authoritative copy of the full pipeline state.
    StateSnapshot { state: PipelineState },

    /// An agent's generation request was dispatched.
    AgentStarted { agent_id: String },

    /// An agent's run reached a terminal state.
    AgentFinished {
        agent_id: String,
        run: AgentRunState,
    },

    /// The smart-replace tool finished.
    ReplaceFinished { result: ToolResult },

    /// A note-assistant action finished.
    NoteFinished { result: ToolResult },

    /// The note chat produced a reply.
    ChatReply { result: ToolResult },

    /// A new session log row was recorded.
    Log { entry: LogEntry },
}
