//! Pipeline session state machine.
//!
//! The [`Session`] is the single owner of the mutable workspace state. Agent
//! runs follow a begin/finish protocol: `begin_run` records the transient
//! Running state and hands out a sequence-numbered ticket, `finish_run`
//! applies the terminal result only if the ticket is still current. A stale
//! ticket (the agent was re-dispatched in the meantime) is discarded, so an
//! old in-flight response can never overwrite a newer run.

use std::collections::HashMap;

use tracing::{error, info, warn};

use af_protocol::agent_models::AgentConfig;
use af_protocol::log_models::{LogEntry, LogLevel};
use af_protocol::pipeline_models::PipelineState;
use af_protocol::run_models::{AgentRunState, RunStatus};

use crate::defaults::{default_agents, DEFAULT_OBSERVATIONS, DEFAULT_TEMPLATE};
use crate::generate::RunInput;

/// Proof that a particular dispatch of an agent is still the latest one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunTicket {
    pub agent_id: String,
    seq: u64,
}

/// Aggregate numbers for the dashboard pane.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SessionMetrics {
    pub completed: usize,
    pub total_agents: usize,
    pub total_tokens: u64,
    pub total_runtime_ms: u64,
    /// Completed agents over total, as a whole percentage.
    pub progress_pct: u8,
    /// Total tokens per completed agent, zero when nothing has completed.
    pub tokens_per_step: u64,
}

/// Owns the pipeline state, the per-agent run sequence counters, and the
/// session log.
pub struct Session {
    state: PipelineState,
    run_seqs: HashMap<String, u64>,
    logs: Vec<LogEntry>,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    /// Fresh session with the built-in agent chain and sample material.
    pub fn new() -> Self {
        Self::with_agents(default_agents())
    }

    pub fn with_agents(agents: Vec<AgentConfig>) -> Self {
        Self {
            state: PipelineState {
                template: DEFAULT_TEMPLATE.to_string(),
                observations: DEFAULT_OBSERVATIONS.to_string(),
                current_step_index: 0,
                agents,
                history: HashMap::new(),
            },
            run_seqs: HashMap::new(),
            logs: Vec::new(),
        }
    }

    pub fn state(&self) -> &PipelineState {
        &self.state
    }

    pub fn logs(&self) -> &[LogEntry] {
        &self.logs
    }

    /// Records a session log row and mirrors it to the tracing subscriber.
    pub fn push_log(&mut self, level: LogLevel, message: impl Into<String>) -> LogEntry {
        let entry = LogEntry::new(level, message);
        match level {
            LogLevel::Error => error!("{}", entry.message),
            LogLevel::Warning => warn!("{}", entry.message),
            LogLevel::Info | LogLevel::Success => info!("{}", entry.message),
        }
        self.logs.push(entry.clone());
        entry
    }

    /// Marks an agent as Running and assembles its request input.
    ///
    /// Returns None for an unknown agent id. The Running entry replaces any
    /// previous history for the agent synchronously, before the backend call
    /// is dispatched.
    pub fn begin_run(&mut self, agent_id: &str) -> Option<(RunTicket, RunInput)> {
        let position = self.state.position_of(agent_id)?;
        let agent = self.state.agents[position].clone();

        // Latest output of the predecessor, empty when it has never run.
        let previous_output = if position > 0 {
            let prev_id = &self.state.agents[position - 1].id;
            Some(
                self.state
                    .history
                    .get(prev_id)
                    .map(|run| run.output.clone())
                    .unwrap_or_default(),
            )
        } else {
            None
        };

        self.state
            .history
            .insert(agent_id.to_string(), AgentRunState::running());

        let seq = self.run_seqs.entry(agent_id.to_string()).or_insert(0);
        *seq += 1;

        let ticket = RunTicket {
            agent_id: agent_id.to_string(),
            seq: *seq,
        };
        let input = RunInput {
            agent,
            template: self.state.template.clone(),
            observations: self.state.observations.clone(),
            previous_output,
        };
        Some((ticket, input))
    }

    /// Applies a terminal run result, unless the ticket went stale.
    ///
    /// Returns whether the result was applied. On success the advisory step
    /// pointer advances past the finished agent.
    pub fn finish_run(&mut self, ticket: &RunTicket, run: AgentRunState) -> bool {
        let current = self.run_seqs.get(&ticket.agent_id).copied().unwrap_or(0);
        if current != ticket.seq {
            warn!(agent_id = %ticket.agent_id, "discarding stale run result");
            return false;
        }

        let advanced = run.status == RunStatus::Completed;
        self.state.history.insert(ticket.agent_id.clone(), run);

        if advanced {
            if let Some(position) = self.state.position_of(&ticket.agent_id) {
                self.state.current_step_index = position + 1;
            }
        }
        true
    }

    /// Overwrites only the stored output of an agent's latest run. Status,
    /// metrics, and timestamps stay as recorded. No-op without history.
    pub fn edit_result(&mut self, agent_id: &str, new_output: String) {
        if let Some(run) = self.state.history.get_mut(agent_id) {
            run.output = new_output;
        }
    }

    /// In-place mutation of one agent's configuration.
    pub fn update_agent<F>(&mut self, agent_id: &str, mutate: F) -> bool
    where
        F: FnOnce(&mut AgentConfig),
    {
        match self.state.agents.iter_mut().find(|a| a.id == agent_id) {
            Some(agent) => {
                mutate(agent);
                true
            }
            None => false,
        }
    }

    /// Replaces one agent wholesale, matching on id.
    pub fn replace_agent(&mut self, agent: AgentConfig) -> bool {
        self.update_agent(&agent.id.clone(), |slot| *slot = agent)
    }

    /// Replaces the whole agent list. Run history is kept as-is: entries for
    /// removed agents persist as orphans, and a reused id surfaces its old
    /// result until re-run.
    pub fn load_agents(&mut self, agents: Vec<AgentConfig>) {
        self.state.agents = agents;
        self.state.current_step_index = 0;
    }

    pub fn set_template(&mut self, template: String) {
        self.state.template = template;
    }

    pub fn set_observations(&mut self, observations: String) {
        self.state.observations = observations;
    }

    /// Dashboard aggregates over the current agent list. Orphaned history
    /// entries do not count.
    pub fn metrics(&self) -> SessionMetrics {
        let total_agents = self.state.agents.len();
        let mut completed = 0usize;
        let mut total_tokens = 0u64;
        let mut total_runtime_ms = 0u64;

        for agent in &self.state.agents {
            if let Some(run) = self.state.history.get(&agent.id) {
                if run.status == RunStatus::Completed {
                    completed += 1;
                    total_tokens += u64::from(run.tokens_used.unwrap_or(0));
                    total_runtime_ms += run.execution_time_ms.unwrap_or(0);
                }
            }
        }

        let progress_pct = if total_agents == 0 {
            0
        } else {
            ((completed * 100) / total_agents) as u8
        };
        let tokens_per_step = if completed == 0 {
            0
        } else {
            total_tokens / completed as u64
        };

        SessionMetrics {
            completed,
            total_agents,
            total_tokens,
            total_runtime_ms,
            progress_pct,
            tokens_per_step,
        }
    }
}
