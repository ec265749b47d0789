//! Directory structure and file generation for .auditflow initialization.

use super::error::{InitError, InitResult};
use super::templates::{get_template, list_templates};
use std::fs;
use std::path::{Path, PathBuf};

/// Options for initializing a .auditflow directory.
#[derive(Debug, Clone)]
pub struct InitOptions {
    /// Target directory where .auditflow will be created.
    pub target_dir: PathBuf,

    /// Overwrite existing .auditflow directory if it exists.
    pub force: bool,

    /// Create minimal structure (only the first agent of the chain).
    pub minimal: bool,
}

impl Default for InitOptions {
    fn default() -> Self {
        Self {
            target_dir: std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
            force: false,
            minimal: false,
        }
    }
}

/// Generate a complete .auditflow directory structure with templates.
///
/// This function creates the following structure:
/// ```text
/// .auditflow/
/// ├── config.toml
/// ├── template.md
/// ├── observations.md
/// └── agents/
///     ├── 01-layout-mapper.md
///     ├── 02-car-extractor.md (unless minimal)
///     └── 03-polisher.md (unless minimal)
/// ```
///
/// # Errors
///
/// Returns an `InitError` if:
/// - The .auditflow directory already exists (without force flag)
/// - A template file cannot be found
/// - File system operations fail
pub async fn generate_auditflow_structure(options: InitOptions) -> InitResult<()> {
    let af_dir = options.target_dir.join(".auditflow");

    if af_dir.exists() && !options.force {
        return Err(InitError::DirectoryExists(af_dir));
    }

    fs::create_dir_all(af_dir.join("agents")).map_err(|source| InitError::DirectoryCreate {
        path: af_dir.join("agents"),
        source,
    })?;

    write_template_file(&af_dir, "config.toml")?;
    write_template_file(&af_dir, "template.md")?;
    write_template_file(&af_dir, "observations.md")?;

    if options.minimal {
        write_template_file(&af_dir, "agents/01-layout-mapper.md")?;
    } else {
        let mut agent_paths = list_templates("agents/");
        agent_paths.sort();
        for agent_path in agent_paths {
            write_template_file(&af_dir, &agent_path)?;
        }
    }

    Ok(())
}

/// Writes one embedded template into the target directory, creating parent
/// directories as needed.
fn write_template_file(af_dir: &Path, template_path: &str) -> InitResult<()> {
    let content = get_template(template_path)
        .ok_or_else(|| InitError::TemplateNotFound(template_path.to_string()))?;

    let target_path = af_dir.join(template_path);

    if let Some(parent) = target_path.parent() {
        fs::create_dir_all(parent).map_err(|source| InitError::DirectoryCreate {
            path: parent.to_path_buf(),
            source,
        })?;
    }

    fs::write(&target_path, content).map_err(|source| InitError::FileWrite {
        path: target_path,
        source,
    })?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_generate_structure_success() {
        let dir = tempdir().unwrap();
        let options = InitOptions {
            target_dir: dir.path().to_path_buf(),
            force: false,
            minimal: false,
        };

        let result = generate_auditflow_structure(options).await;
        assert!(result.is_ok(), "Failed: {:?}", result.err());

        let af_dir = dir.path().join(".auditflow");
        assert!(af_dir.exists(), ".auditflow directory should exist");
        assert!(af_dir.join("agents").exists(), "agents directory should exist");

        assert!(af_dir.join("config.toml").exists(), "config.toml should exist");
        let config = fs::read_to_string(af_dir.join("config.toml")).unwrap();
        assert!(
            config.contains("default_model"),
            "config should carry the default model"
        );

        assert!(af_dir.join("agents/01-layout-mapper.md").exists());
        assert!(af_dir.join("agents/02-car-extractor.md").exists());
        assert!(af_dir.join("agents/03-polisher.md").exists());

        let mapper = fs::read_to_string(af_dir.join("agents/01-layout-mapper.md")).unwrap();
        assert!(
            mapper.contains("id: agent_layout"),
            "layout mapper should have correct frontmatter"
        );

        assert!(af_dir.join("template.md").exists(), "template seed should exist");
        assert!(
            af_dir.join("observations.md").exists(),
            "observations seed should exist"
        );
    }

    #[tokio::test]
    async fn test_generate_structure_minimal() {
        let dir = tempdir().unwrap();
        let options = InitOptions {
            target_dir: dir.path().to_path_buf(),
            force: false,
            minimal: true,
        };

        generate_auditflow_structure(options).await.unwrap();

        let af_dir = dir.path().join(".auditflow");

        assert!(
            af_dir.join("agents/01-layout-mapper.md").exists(),
            "first agent should exist in minimal mode"
        );
        assert!(
            !af_dir.join("agents/02-car-extractor.md").exists(),
            "other agents should not exist in minimal mode"
        );
        assert!(
            af_dir.join("config.toml").exists(),
            "config.toml should exist in minimal mode"
        );
    }

    #[tokio::test]
    async fn test_generate_structure_exists_without_force() {
        let dir = tempdir().unwrap();
        fs::create_dir_all(dir.path().join(".auditflow")).unwrap();

        let options = InitOptions {
            target_dir: dir.path().to_path_buf(),
            force: false,
            minimal: false,
        };

        let result = generate_auditflow_structure(options).await;
        assert!(result.is_err(), "Should fail when directory exists");
        assert!(
            matches!(result.unwrap_err(), InitError::DirectoryExists(_)),
            "Should return DirectoryExists error"
        );
    }

    #[tokio::test]
    async fn test_generate_structure_exists_with_force() {
        let dir = tempdir().unwrap();
        let af_dir = dir.path().join(".auditflow");
        fs::create_dir_all(&af_dir).unwrap();
        fs::write(af_dir.join("old-file.txt"), "old content").unwrap();

        let options = InitOptions {
            target_dir: dir.path().to_path_buf(),
            force: true,
            minimal: false,
        };

        let result = generate_auditflow_structure(options).await;
        assert!(result.is_ok(), "Should succeed with force flag");
        assert!(af_dir.join("config.toml").exists(), "config.toml should be created");
    }

    #[test]
    fn test_default_init_options() {
        let options = InitOptions::default();
        assert!(!options.force, "Default force should be false");
        assert!(!options.minimal, "Default minimal should be false");
        assert!(
            options.target_dir.is_absolute() || options.target_dir == PathBuf::from("."),
            "Default target_dir should be current directory"
        );
    }
}
