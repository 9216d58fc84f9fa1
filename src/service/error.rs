//! Service error descriptors.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error reported by the item service for a failed operation.
///
/// Carried inside `*_FAIL` result events; the machine turns it into a
/// rollback (create/edit/delete) or the load-failed state (list).
#[derive(Clone, PartialEq, Eq, Debug, Error, Serialize, Deserialize)]
pub enum ServiceError {
    /// The backing call could not be completed.
    #[error("network error: {0}")]
    Network(String),

    /// The service refused the operation for a specific item.
    #[error("{operation} rejected for item {id}: {reason}")]
    Rejected {
        operation: String,
        id: String,
        reason: String,
    },
}
