//! Configuration loading and pipeline I/O.
//!
//! Two concerns live here: the optional `.auditflow/` directory read at
//! startup (global settings plus agent definitions) and the explicit
//! import/export paths the user triggers (agent lists and report files).

pub mod error;
pub mod io;
pub mod loader;
pub mod models;

pub use error::{ConfigError, ConfigResult};
pub use models::AppConfig;
