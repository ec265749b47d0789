//! Explicit import/export paths: agent lists and report files.

use std::path::{Path, PathBuf};

use af_protocol::agent_models::AgentConfig;

use crate::config::error::{ConfigError, ConfigResult};

/// File name used for saved agent lists.
pub const PIPELINE_CONFIG_FILE: &str = "pipeline_config.json";

/// Serializes the agent list with 2-space indentation to
/// `pipeline_config.json` under `dir`. Returns the written path.
pub fn export_agents(dir: &Path, agents: &[AgentConfig]) -> ConfigResult<PathBuf> {
    let path = dir.join(PIPELINE_CONFIG_FILE);
    let json = serde_json::to_string_pretty(agents).map_err(|source| ConfigError::JsonParse {
        path: path.clone(),
        source,
    })?;
    std::fs::write(&path, json).map_err(|source| ConfigError::FileWrite {
        path: path.clone(),
        source,
    })?;
    Ok(path)
}

/// Reads an agent list from a JSON file.
///
/// The document must be a top-level array; any other well-formed JSON is
/// rejected with `InvalidImportFormat` so the caller's current list stays
/// untouched.
pub fn import_agents(path: &Path) -> ConfigResult<Vec<AgentConfig>> {
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;

    let value: serde_json::Value =
        serde_json::from_str(&content).map_err(|source| ConfigError::JsonParse {
            path: path.to_path_buf(),
            source,
        })?;

    if !value.is_array() {
        return Err(ConfigError::InvalidImportFormat);
    }

    serde_json::from_value(value).map_err(|source| ConfigError::JsonParse {
        path: path.to_path_buf(),
        source,
    })
}

/// File name for one agent's exported output.
pub fn report_file_name(agent_name: &str) -> String {
    format!("{agent_name}_output.md")
}

/// Writes one agent's output to `<agent name>_output.md` under `dir`.
/// Returns the written path.
pub fn export_report(dir: &Path, agent_name: &str, output: &str) -> ConfigResult<PathBuf> {
    let path = dir.join(report_file_name(agent_name));
    std::fs::write(&path, output).map_err(|source| ConfigError::FileWrite {
        path: path.clone(),
        source,
    })?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::defaults::default_agents;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn export_then_import_round_trips() {
        let dir = tempdir().expect("temp dir");
        let agents = default_agents();

        let path = export_agents(dir.path(), &agents).expect("export");
        assert!(path.ends_with(PIPELINE_CONFIG_FILE));

        let loaded = import_agents(&path).expect("import");
        assert_eq!(loaded, agents);
    }

    #[test]
    fn export_uses_two_space_indentation() {
        let dir = tempdir().expect("temp dir");
        let path = export_agents(dir.path(), &default_agents()).expect("export");
        let content = fs::read_to_string(path).expect("read back");
        assert!(content.starts_with("[\n  {"));
        assert!(content.contains("\"maxTokens\": 4000"));
    }

    #[test]
    fn import_minimal_record_succeeds() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("minimal.json");
        fs::write(&path, r#"[{"id":"a"}]"#).expect("write fixture");

        let agents = import_agents(&path).expect("import");
        assert_eq!(agents.len(), 1);
        assert_eq!(agents[0].id, "a");
        assert_eq!(agents[0].model, "gemini-2.5-flash");
    }

    #[test]
    fn import_rejects_non_array_document() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("object.json");
        fs::write(&path, r#"{"id":"a"}"#).expect("write fixture");

        let err = import_agents(&path).expect_err("non-array should fail");
        assert!(matches!(err, ConfigError::InvalidImportFormat));
        assert_eq!(err.to_string(), "Invalid JSON file");
    }

    #[test]
    fn import_rejects_malformed_json() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("broken.json");
        fs::write(&path, "[{").expect("write fixture");

        let err = import_agents(&path).expect_err("malformed should fail");
        assert!(matches!(err, ConfigError::JsonParse { .. }));
    }

    #[test]
    fn report_file_name_uses_agent_name() {
        assert_eq!(report_file_name("Layout Mapper"), "Layout Mapper_output.md");
    }

    #[test]
    fn export_report_writes_output() {
        let dir = tempdir().expect("temp dir");
        let path = export_report(dir.path(), "Polisher", "# Final Report").expect("export");
        assert!(path.ends_with("Polisher_output.md"));
        assert_eq!(fs::read_to_string(path).expect("read back"), "# Final Report");
    }
}
