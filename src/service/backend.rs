//! The backing-service seam.
//!
//! The actor performs its work through an [`ItemBackend`]; production
//! code would implement it over a real API, tests and demos use the
//! [`SimulatedBackend`].

use crate::core::{Item, ItemId};
use crate::service::error::ServiceError;
use async_trait::async_trait;
use chrono::Utc;
use std::time::Duration;
use uuid::Uuid;

/// Asynchronous item operations the actor delegates to.
#[async_trait]
pub trait ItemBackend: Send + Sync + 'static {
    /// Fetch the full collection.
    async fn list(&self) -> Result<Vec<Item>, ServiceError>;

    /// Persist a new item. The returned item must carry the server id
    /// deterministically derived from the request's temporary id
    /// (`tmp_X` becomes `server_X`), label preserved.
    async fn create(&self, item: &Item) -> Result<Item, ServiceError>;

    /// Persist an edit. The returned item carries the server-stamped
    /// modification time.
    async fn edit(&self, item: &Item) -> Result<Item, ServiceError>;

    /// Remove an item.
    async fn delete(&self, id: &ItemId) -> Result<(), ServiceError>;
}

/// Which simulated operations should fail. All off by default.
#[derive(Clone, Copy, Debug, Default)]
pub struct FailureFlags {
    pub list: bool,
    pub create: bool,
    pub edit: bool,
    pub delete: bool,
}

/// In-memory backend with configurable latency and failure injection.
///
/// # Example
///
/// ```rust
/// use itemflow::service::SimulatedBackend;
///
/// let backend = SimulatedBackend::new(); // three generated items
/// let empty = SimulatedBackend::with_items(Vec::new());
/// # let _ = (backend, empty);
/// ```
#[derive(Clone, Debug)]
pub struct SimulatedBackend {
    items: Vec<Item>,
    latency: Duration,
    fail: FailureFlags,
}

impl SimulatedBackend {
    /// Backend seeded with three generated items, zero latency, no
    /// failures.
    pub fn new() -> Self {
        let items = (0..3).map(|_| fake_item()).collect();
        SimulatedBackend::with_items(items)
    }

    /// Backend seeded with the given items.
    pub fn with_items(items: Vec<Item>) -> Self {
        SimulatedBackend {
            items,
            latency: Duration::ZERO,
            fail: FailureFlags::default(),
        }
    }

    /// Delay every operation by `latency`.
    pub fn latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    /// Configure which operations fail.
    pub fn failures(mut self, fail: FailureFlags) -> Self {
        self.fail = fail;
        self
    }

    async fn simulate(&self) {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
    }
}

impl Default for SimulatedBackend {
    fn default() -> Self {
        SimulatedBackend::new()
    }
}

#[async_trait]
impl ItemBackend for SimulatedBackend {
    async fn list(&self) -> Result<Vec<Item>, ServiceError> {
        self.simulate().await;
        if self.fail.list {
            return Err(ServiceError::Network("network error".to_string()));
        }
        Ok(self.items.clone())
    }

    async fn create(&self, item: &Item) -> Result<Item, ServiceError> {
        self.simulate().await;
        if self.fail.create {
            return Err(ServiceError::Rejected {
                operation: "create".to_string(),
                id: item.id.to_string(),
                reason: "simulated failure".to_string(),
            });
        }
        let mut created = item.clone();
        created.id = item.id.to_server_id();
        Ok(created)
    }

    async fn edit(&self, item: &Item) -> Result<Item, ServiceError> {
        self.simulate().await;
        if self.fail.edit {
            return Err(ServiceError::Rejected {
                operation: "edit".to_string(),
                id: item.id.to_string(),
                reason: "simulated failure".to_string(),
            });
        }
        let mut edited = item.clone();
        edited.modified_date = Some(Utc::now());
        Ok(edited)
    }

    async fn delete(&self, id: &ItemId) -> Result<(), ServiceError> {
        self.simulate().await;
        if self.fail.delete {
            return Err(ServiceError::Rejected {
                operation: "delete".to_string(),
                id: id.to_string(),
                reason: "simulated failure".to_string(),
            });
        }
        Ok(())
    }
}

fn fake_item() -> Item {
    let suffix = Uuid::new_v4().simple().to_string();
    let short = &suffix[..8];
    Item::new(format!("server_{short}"), format!("Label_{short}"))
}
