//! Item records and the temp/server id scheme.
//!
//! Newly created items carry a locally generated temporary id until the
//! service confirms the creation and hands back a server-assigned id.
//! The two namespaces are kept apart by recognizable prefixes so the
//! machine can match a confirmation back to the optimistic placeholder
//! it belongs to.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Prefix for locally generated ids of not-yet-confirmed items.
pub const TEMP_ID_PREFIX: &str = "tmp_";

/// Prefix for server-assigned ids of confirmed items.
pub const SERVER_ID_PREFIX: &str = "server_";

/// Identifier of an [`Item`], unique within a collection.
///
/// # Example
///
/// ```rust
/// use itemflow::core::ItemId;
///
/// let id = ItemId::temp();
/// assert!(id.is_temp());
///
/// let confirmed = id.to_server_id();
/// assert!(confirmed.is_server());
/// ```
#[derive(Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(String);

impl ItemId {
    /// Create an id from an existing string.
    pub fn new(id: impl Into<String>) -> Self {
        ItemId(id.into())
    }

    /// Generate a fresh temporary id (`tmp_<uuid>`).
    pub fn temp() -> Self {
        ItemId(format!("{TEMP_ID_PREFIX}{}", Uuid::new_v4().simple()))
    }

    /// Check whether this id is a local temporary id.
    pub fn is_temp(&self) -> bool {
        self.0.starts_with(TEMP_ID_PREFIX)
    }

    /// Check whether this id is server-assigned.
    pub fn is_server(&self) -> bool {
        self.0.starts_with(SERVER_ID_PREFIX)
    }

    /// Map a temporary id to its deterministic server counterpart:
    /// `tmp_X` becomes `server_X`. Ids that are not temporary are
    /// returned unchanged.
    pub fn to_server_id(&self) -> Self {
        match self.0.strip_prefix(TEMP_ID_PREFIX) {
            Some(suffix) => ItemId(format!("{SERVER_ID_PREFIX}{suffix}")),
            None => self.clone(),
        }
    }

    /// View the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ItemId {
    fn from(s: &str) -> Self {
        ItemId(s.to_string())
    }
}

impl From<String> for ItemId {
    fn from(s: String) -> Self {
        ItemId(s)
    }
}

/// A single item in the managed collection.
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct Item {
    /// Unique id; temporary until the creation is confirmed.
    pub id: ItemId,
    /// User-visible label.
    pub label: String,
    /// Server-stamped modification time, set on confirmed edits.
    pub modified_date: Option<DateTime<Utc>>,
}

impl Item {
    /// Create an item with no modification stamp.
    pub fn new(id: impl Into<ItemId>, label: impl Into<String>) -> Self {
        Item {
            id: id.into(),
            label: label.into(),
            modified_date: None,
        }
    }

    /// Create an item with a fresh temporary id.
    pub fn draft(label: impl Into<String>) -> Self {
        Item::new(ItemId::temp(), label)
    }

    /// Check whether this item is an unconfirmed optimistic placeholder.
    pub fn is_temp(&self) -> bool {
        self.id.is_temp()
    }
}
