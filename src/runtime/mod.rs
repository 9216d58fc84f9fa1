//! The imperative shell.
//!
//! An [`Interpreter`] owns one machine instance and one service actor,
//! with an explicit lifecycle: whoever constructs it controls it, and
//! there is no ambient singleton. A pump task applies UI events and
//! actor results strictly one at a time, forwards the requests each
//! transition queued, and publishes the resulting snapshot through a
//! watch channel.

use crate::core::Event;
use crate::machine::{ItemMachine, Snapshot};
use crate::service::{ItemBackend, ItemService, ServiceRequest};
use thiserror::Error;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tracing::warn;

/// Failure sending an event into a stopped interpreter.
#[derive(Debug, Error)]
pub enum SendError {
    #[error("interpreter is stopped")]
    Stopped,
}

/// Running machine + actor pair.
///
/// # Example
///
/// ```rust,no_run
/// use itemflow::runtime::Interpreter;
/// use itemflow::service::SimulatedBackend;
/// use itemflow::core::{Event, OpFrom};
///
/// # async fn demo() {
/// let interpreter = Interpreter::start(SimulatedBackend::new());
/// interpreter.send(Event::ItemNew { from: OpFrom::Master }).await.unwrap();
/// let snapshot = interpreter.snapshot();
/// # let _ = snapshot;
/// interpreter.stop().await;
/// # }
/// ```
pub struct Interpreter {
    events: mpsc::Sender<Event>,
    snapshots: watch::Receiver<Snapshot>,
    pump: Option<JoinHandle<()>>,
}

impl Interpreter {
    /// Start a fresh machine against `backend`. The initial entry into
    /// `main.loading` dispatches the first `List` request immediately.
    pub fn start<B: ItemBackend>(backend: B) -> Self {
        let (events_tx, events_rx) = mpsc::channel::<Event>(32);
        let (results_tx, results_rx) = mpsc::channel::<Event>(32);
        let service = ItemService::spawn(backend, results_tx);

        let mut machine = ItemMachine::new();
        machine.start();
        let (snapshots_tx, snapshots_rx) = watch::channel(machine.snapshot());

        let pump = tokio::spawn(pump(
            machine,
            events_rx,
            results_rx,
            service,
            snapshots_tx,
        ));

        Interpreter {
            events: events_tx,
            snapshots: snapshots_rx,
            pump: Some(pump),
        }
    }

    /// Enqueue a UI event. Events are applied in order, one at a time.
    pub async fn send(&self, event: Event) -> Result<(), SendError> {
        self.events.send(event).await.map_err(|_| SendError::Stopped)
    }

    /// The latest published snapshot.
    pub fn snapshot(&self) -> Snapshot {
        self.snapshots.borrow().clone()
    }

    /// A receiver the UI layer can await snapshot changes on.
    pub fn watch(&self) -> watch::Receiver<Snapshot> {
        self.snapshots.clone()
    }

    /// Tear down the pump and the actor. Queued events are processed
    /// before the pump exits.
    pub async fn stop(mut self) {
        let pump = self.pump.take();
        drop(self);
        if let Some(pump) = pump {
            let _ = pump.await;
        }
    }
}

async fn pump(
    mut machine: ItemMachine,
    mut events: mpsc::Receiver<Event>,
    mut results: mpsc::Receiver<Event>,
    service: ItemService,
    snapshots: watch::Sender<Snapshot>,
) {
    let requests = service.requests();

    // Requests queued by the initial loading entry.
    forward(&mut machine, &requests).await;

    loop {
        tokio::select! {
            maybe = events.recv() => match maybe {
                Some(event) => step(&mut machine, event, &requests, &snapshots).await,
                // Owner dropped the interpreter: tear down.
                None => break,
            },
            Some(event) = results.recv() => {
                step(&mut machine, event, &requests, &snapshots).await;
            }
        }
    }

    service.stop();
}

/// Apply one event to completion, then forward queued requests and
/// publish the snapshot.
async fn step(
    machine: &mut ItemMachine,
    event: Event,
    requests: &mpsc::Sender<ServiceRequest>,
    snapshots: &watch::Sender<Snapshot>,
) {
    let outcome = machine.send(event);
    forward(machine, requests).await;
    if outcome.is_handled() {
        let _ = snapshots.send(machine.snapshot());
    }
}

async fn forward(machine: &mut ItemMachine, requests: &mpsc::Sender<ServiceRequest>) {
    for request in machine.take_requests() {
        if requests.send(request).await.is_err() {
            warn!("item service is gone, dropping request");
        }
    }
}
