//! The transition table.
//!
//! A direct transcription of the statechart: leaf-attached rows first,
//! region-level rows after. Resolution walks a region's rows innermost
//! scope first and fires the first row whose event kind matches and
//! whose guard passes.
//!
//! The delete-confirmation handlers live once at region level; cancel
//! and confirm are reachable from whichever leaf opened the dialog.

use crate::core::{Event, Guard, MainState, OpFrom, SelectionState};
use crate::machine::transition::{Action, MainTransition, SelectionTransition, Target};

fn back_to_master() -> Guard {
    Guard::new(|ctx, _| ctx.op_from == OpFrom::Master)
}

fn back_to_details() -> Guard {
    Guard::new(|ctx, _| ctx.op_from == OpFrom::Details)
}

/// Rows of the `main` region.
pub fn main_transitions() -> Vec<MainTransition> {
    use MainState::*;

    vec![
        // loading
        MainTransition {
            leaf: Some(Loading),
            event: |e| matches!(e, Event::LoadItemSuccess { .. }),
            guard: None,
            target: Target::main(Master),
            actions: &[Action::ListDataSuccess],
        },
        MainTransition {
            leaf: Some(Loading),
            event: |e| matches!(e, Event::LoadItemFail { .. }),
            guard: None,
            target: Target::main(LoadFailed),
            actions: &[Action::ListDataError],
        },
        // loadFailed
        MainTransition {
            leaf: Some(LoadFailed),
            event: |e| matches!(e, Event::ModalErrorRetry),
            guard: None,
            target: Target::main(Loading),
            actions: &[Action::ModalReset],
        },
        MainTransition {
            leaf: Some(LoadFailed),
            event: |e| matches!(e, Event::ModalErrorClose),
            guard: None,
            target: Target::main(Master),
            actions: &[Action::ModalReset],
        },
        // master
        MainTransition {
            leaf: Some(Master),
            event: |e| matches!(e, Event::ItemReload),
            guard: None,
            target: Target::main(Loading),
            actions: &[],
        },
        MainTransition {
            leaf: Some(Master),
            event: |e| matches!(e, Event::ItemDetails { .. }),
            guard: None,
            target: Target::main(Details),
            actions: &[],
        },
        // details
        MainTransition {
            leaf: Some(Details),
            event: |e| matches!(e, Event::ItemBack),
            guard: None,
            target: Target::main(Master),
            actions: &[],
        },
        // newItem
        MainTransition {
            leaf: Some(NewItem),
            event: |e| matches!(e, Event::NewItemSubmit { .. }),
            guard: None,
            target: Target::main(Master),
            actions: &[Action::LocalCreateNewItem, Action::RemoteCreateNewItem],
        },
        MainTransition {
            leaf: Some(NewItem),
            event: |e| matches!(e, Event::NewItemCancel),
            guard: Some(back_to_master()),
            target: Target::main(Master),
            actions: &[],
        },
        MainTransition {
            leaf: Some(NewItem),
            event: |e| matches!(e, Event::NewItemCancel),
            guard: Some(back_to_details()),
            target: Target::main(Details),
            actions: &[],
        },
        // editItem
        MainTransition {
            leaf: Some(EditItem),
            event: |e| matches!(e, Event::ItemEditSubmit { .. }),
            guard: None,
            target: Target::main(Master),
            actions: &[Action::LocalEditItem, Action::RemoteEditItem],
        },
        MainTransition {
            leaf: Some(EditItem),
            event: |e| matches!(e, Event::ItemEditCancel),
            guard: Some(back_to_master()),
            target: Target::main(Master),
            actions: &[],
        },
        MainTransition {
            leaf: Some(EditItem),
            event: |e| matches!(e, Event::ItemEditCancel),
            guard: Some(back_to_details()),
            target: Target::main(Details),
            actions: &[],
        },
        // region level: screen intents
        MainTransition {
            leaf: None,
            event: |e| matches!(e, Event::ItemNew { .. }),
            guard: None,
            target: Target::main(NewItem),
            actions: &[Action::CreateItem],
        },
        MainTransition {
            leaf: None,
            event: |e| matches!(e, Event::ItemEdit { .. }),
            guard: None,
            target: Target::main(EditItem),
            actions: &[Action::EditItem],
        },
        MainTransition {
            leaf: None,
            event: |e| matches!(e, Event::ItemDelete { .. }),
            guard: Some(Guard::new(|_, e| {
                matches!(e, Event::ItemDelete { from: OpFrom::Master })
            })),
            target: Target::main(Master),
            actions: &[Action::DeleteItem],
        },
        MainTransition {
            leaf: None,
            event: |e| matches!(e, Event::ItemDelete { .. }),
            guard: Some(Guard::new(|_, e| {
                matches!(e, Event::ItemDelete { from: OpFrom::Details })
            })),
            target: Target::main(Details),
            actions: &[Action::DeleteItem],
        },
        // region level: optimistic results
        MainTransition {
            leaf: None,
            event: |e| matches!(e, Event::OptimisticDeleteItemSuccess { .. }),
            guard: None,
            target: Target::both(Master, SelectionState::UnSelected),
            actions: &[Action::CommitDelete],
        },
        MainTransition {
            leaf: None,
            event: |e| matches!(e, Event::OptimisticDeleteItemFail { .. }),
            guard: None,
            target: Target::both(Master, SelectionState::Selected),
            actions: &[Action::RollbackDelete],
        },
        MainTransition {
            leaf: None,
            event: |e| matches!(e, Event::OptimisticCreateItemSuccess { .. }),
            guard: None,
            target: Target::main(Master),
            actions: &[Action::CommitCreate],
        },
        MainTransition {
            leaf: None,
            event: |e| matches!(e, Event::OptimisticCreateItemFail { .. }),
            guard: None,
            target: Target::main(Master),
            actions: &[Action::RollbackCreate],
        },
        MainTransition {
            leaf: None,
            event: |e| matches!(e, Event::OptimisticEditItemSuccess { .. }),
            guard: None,
            target: Target::main(Master),
            actions: &[Action::CommitEdit],
        },
        MainTransition {
            leaf: None,
            event: |e| matches!(e, Event::OptimisticEditItemFail { .. }),
            guard: None,
            target: Target::main(Master),
            actions: &[Action::RollbackEdit],
        },
        // region level: delete-confirmation dialog
        MainTransition {
            leaf: None,
            event: |e| matches!(e, Event::ModalItemDeleteConfirm { .. }),
            guard: None,
            target: Target::main(Master),
            actions: &[
                Action::ModalReset,
                Action::LocalDeleteItem,
                Action::RemoteDeleteItem,
            ],
        },
        MainTransition {
            leaf: None,
            event: |e| matches!(e, Event::ModalItemDeleteCancel),
            guard: Some(back_to_master()),
            target: Target::main(Master),
            actions: &[Action::ModalReset],
        },
        MainTransition {
            leaf: None,
            event: |e| matches!(e, Event::ModalItemDeleteCancel),
            guard: Some(back_to_details()),
            target: Target::main(Details),
            actions: &[Action::ModalReset],
        },
    ]
}

/// Rows of the `global.selection` region.
pub fn selection_transitions() -> Vec<SelectionTransition> {
    vec![SelectionTransition {
        event: |e| matches!(e, Event::ItemSelect { .. }),
        guard: None,
        target: SelectionState::Selected,
        actions: &[Action::SelectItem],
    }]
}
