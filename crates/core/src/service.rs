//! Core service task.
//!
//! The service is the single owner of the [`Session`]: it consumes `Op`s
//! from the UI over an mpsc channel, performs the work (including awaited
//! backend calls), and emits `Event`s back. Every state-changing operation
//! is followed by a `StateSnapshot` so the UI always renders from
//! authoritative state.

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::debug;

use af_protocol::config_models::GlobalConfig;
use af_protocol::ipc::{Event, Op};
use af_protocol::log_models::LogLevel;
use af_protocol::note_models::ToolResult;
use af_protocol::run_models::RunStatus;

use crate::config::io::{export_agents, export_report, import_agents};
use crate::gateway::{GatewayError, GenerationBackend};
use crate::generate::{chat_with_note, note_action, smart_replace};
use crate::session::Session;

/// Owns the session, the credential, and the backend; drives the op loop.
pub struct CoreService {
    session: Session,
    backend: Arc<dyn GenerationBackend>,
    credential: String,
    global: GlobalConfig,
    events_tx: mpsc::Sender<Event>,
}

impl CoreService {
    pub fn new(
        session: Session,
        backend: Arc<dyn GenerationBackend>,
        global: GlobalConfig,
        events_tx: mpsc::Sender<Event>,
    ) -> Self {
        Self {
            session,
            backend,
            credential: String::new(),
            global,
            events_tx,
        }
    }

    /// Preload a credential, e.g. from an environment variable.
    pub fn with_credential(mut self, credential: String) -> Self {
        self.credential = credential;
        self
    }

    /// Spawns the op loop as a background task. The task ends on `Shutdown`
    /// or when the op channel closes.
    pub fn spawn(self, op_rx: mpsc::Receiver<Op>) -> JoinHandle<()> {
        tokio::spawn(self.run(op_rx))
    }

    async fn run(mut self, mut op_rx: mpsc::Receiver<Op>) {
        // Initial snapshot so the UI has state before the first op.
        self.emit_snapshot().await;

        while let Some(op) = op_rx.recv().await {
            if matches!(op, Op::Shutdown) {
                debug!("core service shutting down");
                break;
            }
            self.handle_op(op).await;
        }
    }

    async fn handle_op(&mut self, op: Op) {
        match op {
            Op::RunAgent { agent_id } => self.run_agent(&agent_id).await,

            Op::EditResult {
                agent_id,
                new_output,
            } => {
                self.session.edit_result(&agent_id, new_output);
                self.emit_snapshot().await;
            }

            Op::UpdateAgent { agent } => {
                let agent_id = agent.id.clone();
                if self.session.replace_agent(agent) {
                    self.emit_snapshot().await;
                } else {
                    self.log(LogLevel::Warning, format!("Unknown agent: {agent_id}"))
                        .await;
                }
            }

            Op::LoadAgents { path } => {
                match import_agents(&path) {
                    Ok(agents) => {
                        let count = agents.len();
                        self.session.load_agents(agents);
                        self.log(LogLevel::Success, format!("Loaded {count} agents"))
                            .await;
                        self.emit_snapshot().await;
                    }
                    Err(err) => {
                        // The current list stays untouched on any failure.
                        self.log(LogLevel::Error, err.to_string()).await;
                    }
                }
            }

            Op::SaveAgents { dir } => match export_agents(&dir, &self.session.state().agents) {
                Ok(path) => {
                    self.log(LogLevel::Success, format!("Saved pipeline to {}", path.display()))
                        .await;
                }
                Err(err) => self.log(LogLevel::Error, err.to_string()).await,
            },

            Op::ExportReport { agent_id, dir } => self.export_report(&agent_id, &dir).await,

            Op::SetCredential { api_key } => {
                self.credential = api_key;
                self.log(LogLevel::Success, "API key updated").await;
            }

            Op::SetTemplate { template } => {
                self.session.set_template(template);
                self.emit_snapshot().await;
            }

            Op::SetObservations { observations } => {
                self.session.set_observations(observations);
                self.emit_snapshot().await;
            }

            Op::SmartReplace {
                template_a,
                list_b,
            } => {
                let result = smart_replace(
                    self.backend.as_ref(),
                    &self.credential,
                    &self.global.default_model,
                    &template_a,
                    &list_b,
                )
                .await;
                let result = self.tool_result("Smart replace", result).await;
                self.emit(Event::ReplaceFinished { result }).await;
            }

            Op::NoteAction { text, action } => {
                let result = note_action(
                    self.backend.as_ref(),
                    &self.credential,
                    &self.global.default_model,
                    &text,
                    &action,
                )
                .await;
                let result = self.tool_result("Note action", result).await;
                self.emit(Event::NoteFinished { result }).await;
            }

            Op::ChatSend { note, history } => {
                let result = chat_with_note(
                    self.backend.as_ref(),
                    &self.credential,
                    &self.global.default_model,
                    &note,
                    &history,
                )
                .await;
                let result = self.tool_result("Chat", result).await;
                self.emit(Event::ChatReply { result }).await;
            }

            Op::GetState => self.emit_snapshot().await,

            // Handled by the run loop before dispatch.
            Op::Shutdown => {}
        }
    }

    /// Runs one pipeline agent end to end.
    ///
    /// An empty credential short-circuits before any state change or backend
    /// call; a stale completion (the agent was re-dispatched meanwhile) is
    /// discarded by the session and only logged.
    async fn run_agent(&mut self, agent_id: &str) {
        if self.credential.is_empty() {
            self.log(LogLevel::Error, "Cannot run agent: API key missing")
                .await;
            return;
        }

        let Some((ticket, input)) = self.session.begin_run(agent_id) else {
            self.log(LogLevel::Warning, format!("Unknown agent: {agent_id}"))
                .await;
            return;
        };

        let agent_name = input.agent.name.clone();
        self.log(LogLevel::Info, format!("Agent {agent_name} started"))
            .await;
        self.emit(Event::AgentStarted {
            agent_id: agent_id.to_string(),
        })
        .await;
        self.emit_snapshot().await;

        let run =
            crate::generate::run_agent_step(self.backend.as_ref(), &self.credential, &input).await;

        if !self.session.finish_run(&ticket, run.clone()) {
            self.log(
                LogLevel::Warning,
                format!("Discarded stale result for agent {agent_name}"),
            )
            .await;
            return;
        }

        match run.status {
            RunStatus::Completed => {
                let ms = run.execution_time_ms.unwrap_or(0);
                self.log(LogLevel::Success, format!("Agent {agent_name} finished in {ms}ms"))
                    .await;
            }
            _ => {
                let reason = run.error.clone().unwrap_or_default();
                self.log(LogLevel::Error, format!("Agent {agent_name} failed: {reason}"))
                    .await;
            }
        }

        self.emit(Event::AgentFinished {
            agent_id: agent_id.to_string(),
            run,
        })
        .await;
        self.emit_snapshot().await;
    }

    async fn export_report(&mut self, agent_id: &str, dir: &std::path::Path) {
        let Some(agent) = self
            .session
            .state()
            .agents
            .iter()
            .find(|a| a.id == agent_id)
            .cloned()
        else {
            self.log(LogLevel::Warning, format!("Unknown agent: {agent_id}"))
                .await;
            return;
        };

        let output = self
            .session
            .state()
            .history
            .get(agent_id)
            .map(|run| run.output.clone())
            .unwrap_or_default();

        if output.is_empty() {
            self.log(
                LogLevel::Warning,
                format!("Agent {} has no output to export", agent.name),
            )
            .await;
            return;
        }

        match export_report(dir, &agent.name, &output) {
            Ok(path) => {
                self.log(LogLevel::Success, format!("Exported report to {}", path.display()))
                    .await;
            }
            Err(err) => self.log(LogLevel::Error, err.to_string()).await,
        }
    }

    /// Folds a gateway outcome into a [`ToolResult`], logging either way.
    async fn tool_result(
        &mut self,
        label: &str,
        result: Result<String, GatewayError>,
    ) -> ToolResult {
        match result {
            Ok(text) => {
                self.log(LogLevel::Success, format!("{label} completed")).await;
                ToolResult::Ok { text }
            }
            Err(err) => {
                let error = err.to_string();
                self.log(LogLevel::Error, format!("{label} failed: {error}"))
                    .await;
                ToolResult::Err { error }
            }
        }
    }

    async fn log(&mut self, level: LogLevel, message: impl Into<String>) {
        let entry = self.session.push_log(level, message);
        self.emit(Event::Log { entry }).await;
    }

    async fn emit_snapshot(&self) {
        self.emit(Event::StateSnapshot {
            state: self.session.state().clone(),
        })
        .await;
    }

    async fn emit(&self, event: Event) {
        // A closed channel means the UI is gone; nothing useful to do.
        let _ = self.events_tx.send(event).await;
    }
}
