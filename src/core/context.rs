//! The shared machine context.
//!
//! A single mutable record owned exclusively by the machine core. Items
//! are created, mutated and removed only through transition actions;
//! the actor and the UI layer read snapshots and send events, never
//! touch the context directly.

use crate::core::item::{Item, ItemId};
use serde::{Deserialize, Serialize};

/// Which screen initiated the current operation. Cancel and modal
/// transitions route back to it.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
pub enum OpFrom {
    #[default]
    Master,
    Details,
}

/// Which dialog a [`ModalData`] describes.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub enum ModalKind {
    /// Delete confirmation dialog.
    Delete,
    /// Load-failure dialog offering retry/close.
    Error,
}

/// Transient dialog payload. Created by a transition action, cleared by
/// the modal-reset action; only alive while a modal-bearing state is
/// active.
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct ModalData {
    pub kind: ModalKind,
    pub title: String,
    pub content: String,
    /// Item the dialog is about, when there is one (delete confirm).
    pub item: Option<Item>,
}

impl ModalData {
    /// Delete-confirmation dialog for `item`.
    pub fn delete_confirm(item: Item) -> Self {
        ModalData {
            kind: ModalKind::Delete,
            title: "Delete item".to_string(),
            content: format!("Delete '{}' ({})?", item.label, item.id),
            item: Some(item),
        }
    }

    /// Load-failure dialog carrying the error text.
    pub fn load_error(content: impl Into<String>) -> Self {
        ModalData {
            kind: ModalKind::Error,
            title: "Load failed".to_string(),
            content: content.into(),
            item: None,
        }
    }
}

/// Pre-operation stash for an in-flight optimistic mutation.
///
/// `index` is the item's original position in the collection so a
/// delete rollback restores ordering exactly.
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct PendingItem {
    pub item: Item,
    pub index: usize,
}

/// The machine's single shared context record.
///
/// Invariant: `selected_item_id`, when present, references an id in
/// `items` — except while a delete is in flight, during which the id is
/// retained for potential rollback.
#[derive(Clone, PartialEq, Debug, Default, Serialize, Deserialize)]
pub struct Context {
    /// The managed collection, in display order.
    pub items: Vec<Item>,
    /// Currently selected item, if any.
    pub selected_item_id: Option<ItemId>,
    /// Screen that initiated the operation in progress.
    pub op_from: OpFrom,
    /// Active dialog payload, if any.
    pub modal_data: Option<ModalData>,
    /// Stash for the in-flight optimistic operation, if any.
    pub pending_item: Option<PendingItem>,
}

impl Context {
    /// Empty context: no items, no selection, no modal, no pending op.
    pub fn new() -> Self {
        Context::default()
    }

    /// Find an item by id.
    pub fn item_by_id(&self, id: &ItemId) -> Option<&Item> {
        self.items.iter().find(|i| &i.id == id)
    }

    /// Position of an item by id.
    pub fn position_of(&self, id: &ItemId) -> Option<usize> {
        self.items.iter().position(|i| &i.id == id)
    }

    /// The currently selected item, if the selection resolves.
    pub fn selected_item(&self) -> Option<&Item> {
        self.selected_item_id
            .as_ref()
            .and_then(|id| self.item_by_id(id))
    }
}
