//! # af-tui
//!
//! Terminal User Interface for auditflow.
//!
//! This crate provides the interactive TUI for driving the report pipeline
//! and its auxiliary tools. It communicates with `af-core` via channels
//! using the `Op` and `Event` protocol defined in `af-protocol`.

pub mod app;
pub mod event_handler;
pub mod tui;
pub mod widgets;

pub use app::App;
pub use tui::Tui;

use std::path::Path;
use std::sync::Arc;

use anyhow::Result;
use tokio::sync::mpsc;

use af_core::config::loader::load_config;
use af_core::gateway::GeminiBackend;
use af_core::service::CoreService;
use af_core::session::Session;

/// Launches the full application: loads `.auditflow/` configuration if
/// present, spawns the core service over the live backend, and runs the UI
/// until the user quits.
pub async fn run_app(root: &Path, api_key: Option<String>) -> Result<()> {
    let config = load_config(root).await?;
    let session = if config.agents.is_empty() {
        Session::new()
    } else {
        Session::with_agents(config.agents.clone())
    };

    let backend = match &config.global.base_url {
        Some(base_url) => {
            GeminiBackend::with_base_url(base_url.clone(), config.global.timeout_secs)?
        }
        None => GeminiBackend::new(config.global.timeout_secs)?,
    };

    let (op_tx, op_rx) = mpsc::channel(64);
    let (events_tx, events_rx) = mpsc::channel(256);

    let mut service = CoreService::new(session, Arc::new(backend), config.global, events_tx);
    if let Some(key) = api_key {
        service = service.with_credential(key);
    }
    let core_handle = service.spawn(op_rx);

    let mut tui = Tui::init()?;
    let mut app = App::new(op_tx, events_rx);
    let result = app.run(&mut tui).await;

    // The service ends once the op channel closes.
    drop(app);
    let _ = core_handle.await;

    tui.restore()?;
    result
}
