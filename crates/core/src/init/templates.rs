//! Embedded template files for .auditflow initialization.
//!
//! This module uses `rust-embed` to embed template files from the project root
//! `templates/` directory into the binary at compile time. This allows the CLI
//! to generate `.auditflow/` structures without external file dependencies.

use rust_embed::RustEmbed;

/// Embedded template files from the `templates/` directory.
///
/// At compile time, all files in the project root `templates/` directory are
/// embedded into the binary. The path is calculated relative to the crate root:
/// - `CARGO_MANIFEST_DIR` = `crates/core`
/// - `../../templates` = project root `templates/`
///
/// During development with the `debug-embed` feature, files are read from the
/// filesystem at runtime, allowing for quick iteration without recompilation.
#[derive(RustEmbed)]
#[folder = "$CARGO_MANIFEST_DIR/../../templates"]
pub struct TemplateAssets;

/// Get template file content by path.
///
/// # Arguments
/// * `path` - Relative path from templates root (e.g., "config.toml", "agents/01-layout-mapper.md")
///
/// # Returns
/// The file content as a String, or None if the file doesn't exist.
pub fn get_template(path: &str) -> Option<String> {
    TemplateAssets::get(path).map(|file| String::from_utf8_lossy(file.data.as_ref()).to_string())
}

/// List all template files in a directory.
///
/// # Arguments
/// * `prefix` - Directory prefix (e.g., "agents/")
///
/// # Returns
/// A vector of file paths that match the prefix.
pub fn list_templates(prefix: &str) -> Vec<String> {
    TemplateAssets::iter()
        .filter(|path| path.starts_with(prefix))
        .map(|path| path.to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_config_template() {
        let config = get_template("config.toml");
        assert!(config.is_some(), "config.toml should be embedded");
        let content = config.unwrap();
        assert!(
            content.contains("default_model"),
            "config.toml should carry the default model"
        );
    }

    #[test]
    fn test_get_layout_mapper_template() {
        let agent = get_template("agents/01-layout-mapper.md");
        assert!(agent.is_some(), "layout mapper template should be embedded");
        let content = agent.unwrap();
        assert!(
            content.contains("id: agent_layout"),
            "layout mapper should have correct frontmatter"
        );
    }

    #[test]
    fn test_get_seed_material_templates() {
        let template = get_template("template.md").expect("template.md should be embedded");
        assert!(template.contains("# Medical Device Audit Report"));

        let observations =
            get_template("observations.md").expect("observations.md should be embedded");
        assert!(observations.contains("cleanroom"));
    }

    #[test]
    fn test_get_nonexistent_template() {
        let result = get_template("nonexistent.txt");
        assert!(result.is_none(), "Nonexistent files should return None");
    }

    #[test]
    fn test_list_agent_templates() {
        let agents = list_templates("agents/");
        assert_eq!(agents.len(), 3, "Should find three agent templates");
        assert!(agents.contains(&"agents/01-layout-mapper.md".to_string()));
        assert!(agents.contains(&"agents/02-car-extractor.md".to_string()));
        assert!(agents.contains(&"agents/03-polisher.md".to_string()));
    }

    #[test]
    fn test_list_empty_prefix() {
        let all = list_templates("");
        // config.toml, 3 agents, template.md, observations.md
        assert!(all.len() >= 6, "Should have at least 6 template files");
    }
}
