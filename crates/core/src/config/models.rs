//! Aggregated configuration loaded from a `.auditflow/` directory.

use af_protocol::agent_models::AgentConfig;
use af_protocol::config_models::GlobalConfig;

/// Everything the loader found under `.auditflow/`.
///
/// When the directory is absent this is all defaults and the caller falls
/// back to the built-in agent chain.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AppConfig {
    pub global: GlobalConfig,
    pub agents: Vec<AgentConfig>,
}
