//! # af-protocol
//!
//! Core protocol definitions and data models for auditflow.
//!
//! This crate defines all shared data structures used for:
//! - Configuration file parsing (TOML config, Markdown agents, JSON exports)
//! - Runtime pipeline and run state
//! - Communication between TUI and Core
//!
//! ## Modules
//!
//! - [`agent_models`]: Agent configuration structures
//! - [`config_models`]: Global configuration from config.toml
//! - [`pipeline_models`]: Pipeline workspace state
//! - [`run_models`]: Per-agent run status and results
//! - [`log_models`]: Session log rows
//! - [`note_models`]: Note-assistant actions and chat turns
//! - [`ipc`]: Operations and Events for Core-TUI communication
//!
//! ## Design Principles
//!
//! - Minimal dependencies: only serde, uuid, and chrono
//! - Independent compilation: no dependencies on other auditflow crates

pub mod agent_models;
pub mod config_models;
pub mod ipc;
pub mod log_models;
pub mod note_models;
pub mod pipeline_models;
pub mod run_models;

// Re-export all public types for convenience
pub use agent_models::*;
pub use config_models::*;
pub use ipc::*;
pub use log_models::*;
pub use note_models::*;
pub use pipeline_models::*;
pub use run_models::*;
