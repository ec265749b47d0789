//! # af-core
//!
//! Core pipeline session and generation gateway for auditflow.
//!
//! This crate provides:
//! - Configuration loading from the `.auditflow/` directory
//! - The generation-API boundary (live Gemini backend plus a mock)
//! - Prompt/request builders for pipeline steps and auxiliary tools
//! - The pipeline session state machine and the core service task
//!
//! ## Modules
//!
//! - [`config`]: Configuration loading and pipeline import/export
//! - [`defaults`]: Built-in agents, prompts, and sample material
//! - [`gateway`]: Generation backends
//! - [`generate`]: Request builders
//! - [`init`]: `.auditflow/` scaffolding
//! - [`service`]: The op-consuming core task
//! - [`session`]: Pipeline session state machine

pub mod config;
pub mod defaults;
pub mod gateway;
pub mod generate;
pub mod init;
pub mod service;
pub mod session;
