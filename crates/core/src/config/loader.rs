//! Configuration file loader for the `.auditflow/` directory structure.
//!
//! This module loads and parses all configuration files from `.auditflow/`:
//! - `config.toml`: Global settings
//! - `agents/*.md`: Agent definitions with YAML front matter

use gray_matter::engine::YAML;
use gray_matter::Matter;
use std::path::Path;
use walkdir::WalkDir;

use af_protocol::agent_models::AgentConfig;
use af_protocol::config_models::GlobalConfig;

use crate::config::error::{ConfigError, ConfigResult};
use crate::config::models::AppConfig;

/// Loads all configuration from the `.auditflow/` directory.
///
/// Missing directories or files (while the root itself exists) yield an
/// empty/default configuration rather than an error; the caller decides
/// whether to fall back to the built-in agent chain.
///
/// # Errors
///
/// Returns `ConfigError` if files exist but cannot be read, or have invalid
/// TOML or front-matter syntax.
pub async fn load_config(root: &Path) -> ConfigResult<AppConfig> {
    let af_dir = root.join(".auditflow");

    if !af_dir.exists() {
        return Ok(AppConfig::default());
    }

    let global = load_global_config(&af_dir)?;
    let agents = load_agents(&af_dir)?;

    Ok(AppConfig { global, agents })
}

/// Loads global configuration from `config.toml`.
fn load_global_config(af_dir: &Path) -> ConfigResult<GlobalConfig> {
    let config_path = af_dir.join("config.toml");

    if !config_path.exists() {
        return Ok(GlobalConfig::default());
    }

    let content =
        std::fs::read_to_string(&config_path).map_err(|source| ConfigError::FileRead {
            path: config_path.clone(),
            source,
        })?;

    let config: GlobalConfig =
        toml::from_str(&content).map_err(|source| ConfigError::TomlParse {
            path: config_path,
            source,
        })?;

    Ok(config)
}

/// Loads all agent definitions from `agents/*.md`.
///
/// The YAML front matter carries the configuration fields (camelCase keys,
/// same shape as the JSON export); the Markdown body becomes the agent's
/// user prompt. Files sort by name so the chain order is deterministic.
fn load_agents(af_dir: &Path) -> ConfigResult<Vec<AgentConfig>> {
    let agents_dir = af_dir.join("agents");

    if !agents_dir.exists() {
        return Ok(Vec::new());
    }

    let mut agents = Vec::new();

    for entry in WalkDir::new(&agents_dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
        .into_iter()
    {
        let entry = entry.map_err(|source| ConfigError::DirectoryWalk {
            path: agents_dir.clone(),
            source,
        })?;

        let path = entry.path();

        if path.extension().and_then(|s| s.to_str()) != Some("md") {
            continue;
        }

        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::FileRead {
            path: path.to_path_buf(),
            source,
        })?;

        let matter = Matter::<YAML>::new();
        let result = matter.parse(&content);

        let mut agent: AgentConfig = result
            .data
            .ok_or_else(|| ConfigError::MarkdownParse {
                path: path.to_path_buf(),
                reason: "Missing YAML front matter".to_string(),
            })?
            .deserialize()
            .map_err(|e| ConfigError::MarkdownParse {
                path: path.to_path_buf(),
                reason: format!("Failed to deserialize front matter: {e}"),
            })?;

        // The markdown body is the agent's user prompt.
        agent.user_prompt = result.content.trim().to_string();

        agents.push(agent);
    }

    Ok(agents)
}
