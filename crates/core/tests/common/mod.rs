//! Shared helpers for core integration tests.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use af_core::gateway::MockBackend;
use af_core::service::CoreService;
use af_core::session::Session;
use af_protocol::config_models::GlobalConfig;
use af_protocol::ipc::{Event, Op};

/// A running core service plus the handles the tests need.
pub struct TestHarness {
    pub op_tx: mpsc::Sender<Op>,
    pub events_rx: mpsc::Receiver<Event>,
    pub backend: Arc<MockBackend>,
    pub handle: JoinHandle<()>,
}

/// Spawns a core service over the given mock backend, with a credential
/// already set unless `api_key` is empty.
pub fn spawn_service(backend: MockBackend, api_key: &str) -> TestHarness {
    let backend = Arc::new(backend);
    let (op_tx, op_rx) = mpsc::channel(32);
    let (events_tx, events_rx) = mpsc::channel(256);

    let service = CoreService::new(
        Session::new(),
        backend.clone(),
        GlobalConfig::default(),
        events_tx,
    )
    .with_credential(api_key.to_string());

    let handle = service.spawn(op_rx);

    TestHarness {
        op_tx,
        events_rx,
        backend,
        handle,
    }
}

/// Collects events until `stop` matches one of them or the channel goes
/// quiet. The matching event is included in the returned list.
pub async fn collect_until(
    events_rx: &mut mpsc::Receiver<Event>,
    stop: impl Fn(&Event) -> bool,
) -> Vec<Event> {
    let mut received = Vec::new();
    let timeout = Duration::from_secs(2);

    while let Ok(Some(event)) = tokio::time::timeout(timeout, events_rx.recv()).await {
        let done = stop(&event);
        received.push(event);
        if done {
            break;
        }
    }

    received
}
