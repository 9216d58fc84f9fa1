//! Transition table rows and their actions.
//!
//! The topology is fixed, so rows are plain data: an event matcher, an
//! optional guard, target leaves and a list of actions. Actions are a
//! closed enum executed by [`run_action`]; context mutation goes
//! through the optimistic engine, remote dispatch goes into the
//! machine's request outbox and is forwarded after the transition
//! completes.

use crate::core::optimistic;
use crate::core::{Context, Event, Guard, MainState, ModalData, SelectionState};
use crate::service::ServiceRequest;

/// Target leaves of a `main`-region row. A row may additionally retarget
/// the selection region (the delete result transitions do).
#[derive(Clone, Copy, Debug)]
pub struct Target {
    pub main: MainState,
    pub selection: Option<SelectionState>,
}

impl Target {
    pub fn main(main: MainState) -> Self {
        Target {
            main,
            selection: None,
        }
    }

    pub fn both(main: MainState, selection: SelectionState) -> Self {
        Target {
            main,
            selection: Some(selection),
        }
    }
}

/// Everything a transition action may do to the machine.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Action {
    /// Store which screen initiated a create (`ITEM_NEW`).
    CreateItem,
    /// Store which screen initiated an edit (`ITEM_EDIT`).
    EditItem,
    /// Store the initiating screen and open the delete-confirm dialog
    /// for the selected item (`ITEM_DELETE`).
    DeleteItem,
    /// Store the selected item id (`ITEM_SELECT`).
    SelectItem,
    /// Clear the active dialog.
    ModalReset,
    /// Store the fetched collection (`LOAD_ITEM_SUCCESS`).
    ListDataSuccess,
    /// Store the load failure as an error dialog (`LOAD_ITEM_FAIL`).
    ListDataError,
    /// Optimistically insert the submitted item.
    LocalCreateNewItem,
    /// Dispatch the create request to the actor.
    RemoteCreateNewItem,
    /// Optimistically overwrite with the edited payload.
    LocalEditItem,
    /// Dispatch the edit request to the actor.
    RemoteEditItem,
    /// Optimistically remove the confirmed item.
    LocalDeleteItem,
    /// Dispatch the delete request to the actor.
    RemoteDeleteItem,
    /// Replace the placeholder with the server item.
    CommitCreate,
    /// Remove the placeholder after a failed create.
    RollbackCreate,
    /// Finalize server-stamped edit fields.
    CommitEdit,
    /// Restore the pre-edit snapshot.
    RollbackEdit,
    /// Drop the delete stash and the retained selection.
    CommitDelete,
    /// Reinsert the stashed item and re-select it.
    RollbackDelete,
}

/// Execute one action against the context, collecting remote dispatches
/// into `outbox`. Atomic relative to other transitions: the machine
/// holds `&mut self` for the whole send.
pub fn run_action(action: Action, ctx: &mut Context, event: &Event, outbox: &mut Vec<ServiceRequest>) {
    match (action, event) {
        (Action::CreateItem, Event::ItemNew { from }) => ctx.op_from = *from,
        (Action::EditItem, Event::ItemEdit { from }) => ctx.op_from = *from,

        (Action::DeleteItem, Event::ItemDelete { from }) => {
            ctx.op_from = *from;
            if let Some(item) = ctx.selected_item().cloned() {
                ctx.modal_data = Some(ModalData::delete_confirm(item));
            }
        }

        (Action::SelectItem, Event::ItemSelect { item }) => {
            ctx.selected_item_id = Some(item.id.clone());
        }

        (Action::ModalReset, _) => ctx.modal_data = None,

        (Action::ListDataSuccess, Event::LoadItemSuccess { items }) => {
            ctx.items = items.clone();
        }
        (Action::ListDataError, Event::LoadItemFail { error }) => {
            ctx.modal_data = Some(ModalData::load_error(error.to_string()));
        }

        (Action::LocalCreateNewItem, Event::NewItemSubmit { payload }) => {
            optimistic::apply_create(ctx, payload.clone());
        }
        (Action::RemoteCreateNewItem, Event::NewItemSubmit { payload }) => {
            outbox.push(ServiceRequest::Create {
                item: payload.clone(),
            });
        }

        (Action::LocalEditItem, Event::ItemEditSubmit { payload, old_item }) => {
            optimistic::apply_edit(ctx, payload.clone(), old_item.clone());
        }
        (Action::RemoteEditItem, Event::ItemEditSubmit { payload, old_item }) => {
            outbox.push(ServiceRequest::Edit {
                item: payload.clone(),
                old_item: old_item.clone(),
            });
        }

        (Action::LocalDeleteItem, Event::ModalItemDeleteConfirm { item }) => {
            optimistic::apply_delete(ctx, item);
        }
        (Action::RemoteDeleteItem, Event::ModalItemDeleteConfirm { item }) => {
            outbox.push(ServiceRequest::Delete { item: item.clone() });
        }

        (Action::CommitCreate, Event::OptimisticCreateItemSuccess { result }) => {
            optimistic::commit_create(ctx, result);
        }
        (Action::RollbackCreate, Event::OptimisticCreateItemFail { local_item, .. }) => {
            optimistic::rollback_create(ctx, local_item);
        }
        (Action::CommitEdit, Event::OptimisticEditItemSuccess { result }) => {
            optimistic::commit_edit(ctx, result);
        }
        (Action::RollbackEdit, Event::OptimisticEditItemFail { .. }) => {
            optimistic::rollback_edit(ctx);
        }
        (Action::CommitDelete, Event::OptimisticDeleteItemSuccess { .. }) => {
            optimistic::commit_delete(ctx);
        }
        (Action::RollbackDelete, Event::OptimisticDeleteItemFail { .. }) => {
            optimistic::rollback_delete(ctx);
        }

        // An action paired with an event it has no payload contract
        // with does nothing; the table never produces this pairing.
        _ => {}
    }
}

/// One row of the `main` region's transition table.
pub struct MainTransition {
    /// Leaf the handler is attached to; `None` for region-level rows.
    pub leaf: Option<MainState>,
    /// Event kind this row handles.
    pub event: fn(&Event) -> bool,
    /// Optional eligibility predicate, evaluated after the kind match.
    pub guard: Option<Guard>,
    pub target: Target,
    pub actions: &'static [Action],
}

impl MainTransition {
    /// Check whether this row fires for `event` in `leaf` given `ctx`.
    pub fn can_fire(&self, leaf: MainState, ctx: &Context, event: &Event) -> bool {
        if let Some(attached) = self.leaf {
            if attached != leaf {
                return false;
            }
        }
        (self.event)(event) && self.guard.as_ref().map_or(true, |g| g.check(ctx, event))
    }
}

/// One row of the `global.selection` region's transition table.
pub struct SelectionTransition {
    pub event: fn(&Event) -> bool,
    pub guard: Option<Guard>,
    pub target: SelectionState,
    pub actions: &'static [Action],
}

impl SelectionTransition {
    pub fn can_fire(&self, ctx: &Context, event: &Event) -> bool {
        (self.event)(event) && self.guard.as_ref().map_or(true, |g| g.check(ctx, event))
    }
}
