//! Initialization module for creating .auditflow directory structures.
//!
//! This module provides functionality to initialize a new AuditFlow project
//! by generating a `.auditflow/` directory with pre-configured templates for:
//! - Global configuration (`config.toml`)
//! - Agent definitions (`agents/*.md`)
//! - Seed material (`template.md`, `observations.md`)
//!
//! # Example
//!
//! ```no_run
//! use af_core::init::{InitOptions, generate_auditflow_structure};
//! use std::path::PathBuf;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let options = InitOptions {
//!     target_dir: PathBuf::from("."),
//!     force: false,
//!     minimal: false,
//! };
//!
//! generate_auditflow_structure(options).await?;
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod generator;
pub mod templates;

// Re-export commonly used types for convenience
pub use error::{InitError, InitResult};
pub use generator::{generate_auditflow_structure, InitOptions};
pub use templates::{get_template, list_templates};
