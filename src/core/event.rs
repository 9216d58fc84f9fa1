//! The closed event union.
//!
//! Every message entering the machine is one of these variants: the UI
//! surface (user intent) and the service result surface (asynchronous
//! confirmations and failures). Events are immutable and carry only the
//! payload that guards and actions need.

use crate::core::context::OpFrom;
use crate::core::item::Item;
use crate::service::ServiceError;
use serde::{Deserialize, Serialize};

/// Payload of a confirmed creation: the optimistic placeholder that was
/// submitted and the server item that replaces it.
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct CreateResult {
    pub info: String,
    pub local_item: Item,
    pub server_item: Item,
}

/// Payload of a confirmed edit: the item with server-stamped fields.
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct EditResult {
    pub info: String,
    pub item: Item,
}

/// Payload of a confirmed deletion.
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct DeleteResult {
    pub info: String,
}

/// Every event the machine accepts.
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub enum Event {
    // UI surface.
    /// Open the new-item screen; `from` records where to return on cancel.
    ItemNew { from: OpFrom },
    /// Open the edit screen for the selected item.
    ItemEdit { from: OpFrom },
    /// Ask for deletion of the selected item (opens the confirm dialog).
    ItemDelete { from: OpFrom },
    /// Select an item in the listing.
    ItemSelect { item: Item },
    /// Open the details screen for an item.
    ItemDetails { item: Item },
    /// Leave the details screen.
    ItemBack,
    /// Reload the collection from the service.
    ItemReload,
    /// Submit the new-item form; `payload` carries a temporary id.
    NewItemSubmit { payload: Item },
    /// Abandon the new-item form.
    NewItemCancel,
    /// Submit the edit form; `old_item` is the pre-edit snapshot.
    ItemEditSubmit { payload: Item, old_item: Item },
    /// Abandon the edit form.
    ItemEditCancel,
    /// Confirm the pending delete dialog.
    ModalItemDeleteConfirm { item: Item },
    /// Dismiss the pending delete dialog.
    ModalItemDeleteCancel,
    /// Retry after a failed load.
    ModalErrorRetry,
    /// Dismiss the load-failure dialog.
    ModalErrorClose,

    // Service result surface.
    LoadItemSuccess { items: Vec<Item> },
    LoadItemFail { error: ServiceError },
    OptimisticCreateItemSuccess { result: CreateResult },
    OptimisticCreateItemFail { error: ServiceError, local_item: Item },
    OptimisticEditItemSuccess { result: EditResult },
    OptimisticEditItemFail { error: ServiceError },
    OptimisticDeleteItemSuccess { result: DeleteResult },
    OptimisticDeleteItemFail { error: ServiceError },
}

impl Event {
    /// Stable wire-style name for logging and diagnostics.
    pub fn name(&self) -> &'static str {
        match self {
            Event::ItemNew { .. } => "ITEM_NEW",
            Event::ItemEdit { .. } => "ITEM_EDIT",
            Event::ItemDelete { .. } => "ITEM_DELETE",
            Event::ItemSelect { .. } => "ITEM_SELECT",
            Event::ItemDetails { .. } => "ITEM_DETAILS",
            Event::ItemBack => "ITEM_BACK",
            Event::ItemReload => "ITEM_RELOAD",
            Event::NewItemSubmit { .. } => "NEW_ITEM_SUBMIT",
            Event::NewItemCancel => "NEW_ITEM_CANCEL",
            Event::ItemEditSubmit { .. } => "ITEM_EDIT_SUBMIT",
            Event::ItemEditCancel => "ITEM_EDIT_CANCEL",
            Event::ModalItemDeleteConfirm { .. } => "MODAL_ITEM_DELETE_CONFIRM",
            Event::ModalItemDeleteCancel => "MODAL_ITEM_DELETE_CANCEL",
            Event::ModalErrorRetry => "MODAL_ERROR_RETRY",
            Event::ModalErrorClose => "MODAL_ERROR_CLOSE",
            Event::LoadItemSuccess { .. } => "LOAD_ITEM_SUCCESS",
            Event::LoadItemFail { .. } => "LOAD_ITEM_FAIL",
            Event::OptimisticCreateItemSuccess { .. } => "OPTIMISTIC_CREATE_ITEM_SUCCESS",
            Event::OptimisticCreateItemFail { .. } => "OPTIMISTIC_CREATE_ITEM_FAIL",
            Event::OptimisticEditItemSuccess { .. } => "OPTIMISTIC_EDIT_ITEM_SUCCESS",
            Event::OptimisticEditItemFail { .. } => "OPTIMISTIC_EDIT_ITEM_FAIL",
            Event::OptimisticDeleteItemSuccess { .. } => "OPTIMISTIC_DELETE_ITEM_SUCCESS",
            Event::OptimisticDeleteItemFail { .. } => "OPTIMISTIC_DELETE_ITEM_FAIL",
        }
    }
}
