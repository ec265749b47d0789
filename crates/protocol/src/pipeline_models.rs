//! Pipeline state models.
//!
//! The whole interactive workspace is one `PipelineState`: the source
//! material (template and observations), the ordered agent list, and the
//! per-agent run history.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::agent_models::AgentConfig;
use crate::run_models::AgentRunState;

/// Full pipeline workspace state.
///
/// Agents run in list order; `history` keys on agent id and keeps at most one
/// entry per agent. Replacing the agent list does not clear the history, so
/// entries for removed agents persist as orphans and a reused id surfaces its
/// old result until re-run.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PipelineState {
    /// The report template fed to every agent.
    pub template: String,

    /// Raw audit observation notes fed to every agent.
    pub observations: String,

    /// Advisory pointer to the next step to run. Does not gate execution;
    /// any agent may be run at any position.
    pub current_step_index: usize,

    /// Ordered agent chain.
    pub agents: Vec<AgentConfig>,

    /// Latest run result per agent id.
    pub history: HashMap<String, AgentRunState>,
}

impl PipelineState {
    /// Zero-based position of an agent in the chain, if present.
    pub fn position_of(&self, agent_id: &str) -> Option<usize> {
        self.agents.iter().position(|a| a.id == agent_id)
    }

    /// The agent at a position, if any.
    pub fn agent_at(&self, index: usize) -> Option<&AgentConfig> {
        self.agents.get(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::run_models::RunStatus;

    fn agent(id: &str) -> AgentConfig {
        serde_json::from_str(&format!(r#"{{"id":"{id}"}}"#)).expect("agent fixture")
    }

    #[test]
    fn position_follows_list_order() {
        let state = PipelineState {
            agents: vec![agent("b"), agent("a")],
            ..PipelineState::default()
        };
        assert_eq!(state.position_of("a"), Some(1));
        assert_eq!(state.position_of("b"), Some(0));
        assert_eq!(state.position_of("missing"), None);
    }

    #[test]
    fn history_survives_serialization() {
        let mut state = PipelineState::default();
        state
            .history
            .insert("a".to_string(), AgentRunState::completed("out".to_string(), 1, 5, 0));
        let json = serde_json::to_string(&state).expect("serialize");
        let back: PipelineState = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back.history["a"].status, RunStatus::Completed);
        assert_eq!(back.history["a"].output, "out");
    }
}
