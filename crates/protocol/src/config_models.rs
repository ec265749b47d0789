//! Global configuration from `.auditflow/config.toml`.

use serde::{Deserialize, Serialize};

/// Settings that apply to the whole session rather than to one agent.
///
/// All fields carry defaults so an empty or missing `config.toml` yields a
/// usable configuration.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct GlobalConfig {
    /// Model used by the auxiliary tools (smart replace, note assistant,
    /// chat). Pipeline agents carry their own model field.
    pub default_model: String,

    /// Override for the generation API base URL. None means the provider's
    /// public endpoint.
    pub base_url: Option<String>,

    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            default_model: "gemini-2.5-flash".to_string(),
            base_url: None,
            timeout_secs: 120,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_yields_defaults() {
        let config: GlobalConfig = serde_json::from_str("{}").expect("empty config");
        assert_eq!(config, GlobalConfig::default());
        assert_eq!(config.default_model, "gemini-2.5-flash");
        assert_eq!(config.timeout_secs, 120);
    }
}
