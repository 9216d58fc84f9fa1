//! The item service actor.
//!
//! An independently scheduled unit of work: it accepts typed requests
//! through an mpsc inbox, performs the asynchronous backend call, and
//! emits exactly one result [`Event`] per request back to its owner.
//! It never touches the machine context.
//!
//! Each request is handled on its own task, so multiple requests may be
//! in flight at once and responses carry no ordering guarantee beyond
//! corresponding uniquely to their own request. An internal counter
//! correlates concurrent calls in the logs.

mod backend;
mod error;

pub use backend::{FailureFlags, ItemBackend, SimulatedBackend};
pub use error::ServiceError;

use crate::core::{CreateResult, DeleteResult, EditResult, Event, Item};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

/// Outbound request surface, core to actor.
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub enum ServiceRequest {
    /// Fetch the full collection.
    List,
    /// Persist an optimistically inserted item (temporary id).
    Create { item: Item },
    /// Persist an optimistic edit; `old_item` is the pre-edit snapshot.
    Edit { item: Item, old_item: Item },
    /// Remove an optimistically deleted item.
    Delete { item: Item },
}

impl ServiceRequest {
    /// Stable name for logging.
    pub fn name(&self) -> &'static str {
        match self {
            ServiceRequest::List => "List",
            ServiceRequest::Create { .. } => "Create",
            ServiceRequest::Edit { .. } => "Edit",
            ServiceRequest::Delete { .. } => "Delete",
        }
    }
}

/// Handle to a running item service actor.
///
/// Started once per machine instance and torn down with it. Stateless
/// across requests apart from the correlation counter.
pub struct ItemService {
    requests: mpsc::Sender<ServiceRequest>,
    task: JoinHandle<()>,
}

impl ItemService {
    /// Spawn the actor. Result events are delivered through
    /// `results`; requests are posted via [`ItemService::requests`].
    pub fn spawn<B: ItemBackend>(backend: B, results: mpsc::Sender<Event>) -> Self {
        let (tx, mut rx) = mpsc::channel::<ServiceRequest>(32);
        let backend = Arc::new(backend);

        let task = tokio::spawn(async move {
            let mut counter: u64 = 0;
            while let Some(request) = rx.recv().await {
                counter += 1;
                tokio::spawn(handle_request(
                    Arc::clone(&backend),
                    request,
                    results.clone(),
                    counter,
                ));
            }
            debug!("item service inbox closed");
        });

        ItemService { requests: tx, task }
    }

    /// A cloneable sender for posting requests to the actor.
    pub fn requests(&self) -> mpsc::Sender<ServiceRequest> {
        self.requests.clone()
    }

    /// Tear the actor down. In-flight requests are abandoned.
    pub fn stop(self) {
        self.task.abort();
    }
}

async fn handle_request<B: ItemBackend>(
    backend: Arc<B>,
    request: ServiceRequest,
    results: mpsc::Sender<Event>,
    request_id: u64,
) {
    debug!(request_id, request = request.name(), "item service request");

    let event = match request {
        ServiceRequest::List => match backend.list().await {
            Ok(items) => Event::LoadItemSuccess { items },
            Err(error) => Event::LoadItemFail { error },
        },

        ServiceRequest::Create { item } => match backend.create(&item).await {
            Ok(server_item) => Event::OptimisticCreateItemSuccess {
                result: CreateResult {
                    info: format!("item {} - {} created", item.id, item.label),
                    local_item: item,
                    server_item,
                },
            },
            Err(error) => Event::OptimisticCreateItemFail {
                error,
                local_item: item,
            },
        },

        ServiceRequest::Edit { item, old_item } => match backend.edit(&item).await {
            Ok(edited) => Event::OptimisticEditItemSuccess {
                result: EditResult {
                    info: format!("item {} edited (was '{}')", edited.id, old_item.label),
                    item: edited,
                },
            },
            Err(error) => Event::OptimisticEditItemFail { error },
        },

        ServiceRequest::Delete { item } => match backend.delete(&item.id).await {
            Ok(()) => Event::OptimisticDeleteItemSuccess {
                result: DeleteResult {
                    info: format!("item {} deleted", item.id),
                },
            },
            Err(error) => Event::OptimisticDeleteItemFail { error },
        },
    };

    debug!(request_id, result = event.name(), "item service result");
    if results.send(event).await.is_err() {
        warn!(request_id, "item service result dropped, owner is gone");
    }
}
