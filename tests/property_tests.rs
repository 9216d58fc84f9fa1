//! Property-based tests for the machine core.
//!
//! Random-but-coherent event sequences are applied to a live machine;
//! payloads are derived from the current context the way a UI layer
//! and the service actor would produce them. After every event the
//! structural invariants must hold.

use itemflow::core::{
    CreateResult, DeleteResult, EditResult, Event, Item, ItemId, OpFrom,
};
use itemflow::machine::ItemMachine;
use itemflow::service::ServiceError;
use proptest::prelude::*;

#[derive(Clone, Copy, Debug)]
enum Op {
    New,
    SubmitNew,
    CancelNew,
    Edit,
    SubmitEdit,
    CancelEdit,
    SelectFirst,
    Details,
    Back,
    Reload,
    LoadOk,
    LoadFail,
    Delete,
    ConfirmDelete,
    CancelDelete,
    RetryLoad,
    CloseError,
    CreateOk,
    CreateFail,
    EditOk,
    EditFail,
    DeleteOk,
    DeleteFail,
}

fn arbitrary_op() -> impl Strategy<Value = Op> {
    prop_oneof![
        Just(Op::New),
        Just(Op::SubmitNew),
        Just(Op::CancelNew),
        Just(Op::Edit),
        Just(Op::SubmitEdit),
        Just(Op::CancelEdit),
        Just(Op::SelectFirst),
        Just(Op::Details),
        Just(Op::Back),
        Just(Op::Reload),
        Just(Op::LoadOk),
        Just(Op::LoadFail),
        Just(Op::Delete),
        Just(Op::ConfirmDelete),
        Just(Op::CancelDelete),
        Just(Op::RetryLoad),
        Just(Op::CloseError),
        Just(Op::CreateOk),
        Just(Op::CreateFail),
        Just(Op::EditOk),
        Just(Op::EditFail),
        Just(Op::DeleteOk),
        Just(Op::DeleteFail),
    ]
}

fn network_error() -> ServiceError {
    ServiceError::Network("network error".to_string())
}

/// Turn an abstract op into a concrete event against the machine's
/// current context, the way the UI and actor would. Ops that have no
/// coherent payload in the current context fall back to stale or
/// canned payloads — those exercise the idempotent no-op paths.
fn drive(machine: &mut ItemMachine, op: Op) {
    let ctx = machine.context().clone();
    let event = match op {
        Op::New => Event::ItemNew { from: OpFrom::Master },
        Op::SubmitNew => Event::NewItemSubmit {
            payload: Item::draft("Label_new"),
        },
        Op::CancelNew => Event::NewItemCancel,
        Op::Edit => Event::ItemEdit { from: OpFrom::Master },
        Op::SubmitEdit => match ctx.selected_item() {
            Some(old) => Event::ItemEditSubmit {
                payload: Item::new(old.id.clone(), "Label_edited"),
                old_item: old.clone(),
            },
            None => return,
        },
        Op::CancelEdit => Event::ItemEditCancel,
        Op::SelectFirst => match ctx.items.iter().find(|i| i.id.is_server()) {
            Some(item) => Event::ItemSelect { item: item.clone() },
            None => return,
        },
        Op::Details => match ctx.items.first() {
            Some(item) => Event::ItemDetails { item: item.clone() },
            None => return,
        },
        Op::Back => Event::ItemBack,
        Op::Reload => Event::ItemReload,
        // A stable server: reloading returns the collection as-is.
        Op::LoadOk => Event::LoadItemSuccess {
            items: ctx.items.clone(),
        },
        Op::LoadFail => Event::LoadItemFail {
            error: network_error(),
        },
        Op::Delete => Event::ItemDelete { from: OpFrom::Master },
        Op::ConfirmDelete => match ctx.modal_data.as_ref().and_then(|m| m.item.clone()) {
            Some(item) => Event::ModalItemDeleteConfirm { item },
            // Confirm with nothing pending: the optimistic removal
            // must no-op.
            None => Event::ModalItemDeleteConfirm {
                item: Item::new("server_gone", "Label_gone"),
            },
        },
        Op::CancelDelete => Event::ModalItemDeleteCancel,
        Op::RetryLoad => Event::ModalErrorRetry,
        Op::CloseError => Event::ModalErrorClose,
        Op::CreateOk => match ctx.pending_item.as_ref().filter(|p| p.item.is_temp()) {
            Some(pending) => {
                let mut server_item = pending.item.clone();
                server_item.id = pending.item.id.to_server_id();
                Event::OptimisticCreateItemSuccess {
                    result: CreateResult {
                        info: "created".to_string(),
                        local_item: pending.item.clone(),
                        server_item,
                    },
                }
            }
            // Stale confirmation for an operation long resolved.
            None => Event::OptimisticCreateItemSuccess {
                result: CreateResult {
                    info: "created".to_string(),
                    local_item: Item::new("tmp_stale", "Label_stale"),
                    server_item: Item::new("server_stale", "Label_stale"),
                },
            },
        },
        Op::CreateFail => match ctx.pending_item.as_ref().filter(|p| p.item.is_temp()) {
            Some(pending) => Event::OptimisticCreateItemFail {
                error: network_error(),
                local_item: pending.item.clone(),
            },
            None => Event::OptimisticCreateItemFail {
                error: network_error(),
                local_item: Item::new("tmp_stale", "Label_stale"),
            },
        },
        // Edit results only make sense for an edit stash: the stashed
        // pre-edit item carries a server id and is still present (with
        // new fields) in the collection. A stash of another kind means
        // the response would belong to a different request; skip it.
        Op::EditOk => match ctx.pending_item.as_ref() {
            Some(p) if p.item.id.is_server() && ctx.item_by_id(&p.item.id).is_some() => {
                let mut item = ctx
                    .item_by_id(&p.item.id)
                    .cloned()
                    .unwrap_or_else(|| p.item.clone());
                item.modified_date = Some(chrono::Utc::now());
                Event::OptimisticEditItemSuccess {
                    result: EditResult {
                        info: "edited".to_string(),
                        item,
                    },
                }
            }
            Some(_) => return,
            None => Event::OptimisticEditItemSuccess {
                result: EditResult {
                    info: "edited".to_string(),
                    item: Item::new("server_stale", "Label_stale"),
                },
            },
        },
        Op::EditFail => match ctx.pending_item.as_ref() {
            Some(p) if p.item.id.is_server() && ctx.item_by_id(&p.item.id).is_some() => {
                Event::OptimisticEditItemFail {
                    error: network_error(),
                }
            }
            Some(_) => return,
            None => Event::OptimisticEditItemFail {
                error: network_error(),
            },
        },
        // Delete results pair with a delete stash: the stashed item has
        // been optimistically removed from the collection.
        Op::DeleteOk => match ctx.pending_item.as_ref() {
            Some(p) if ctx.item_by_id(&p.item.id).is_none() => {
                Event::OptimisticDeleteItemSuccess {
                    result: DeleteResult {
                        info: "deleted".to_string(),
                    },
                }
            }
            Some(_) => return,
            None => Event::OptimisticDeleteItemSuccess {
                result: DeleteResult {
                    info: "deleted".to_string(),
                },
            },
        },
        Op::DeleteFail => match ctx.pending_item.as_ref() {
            Some(p) if ctx.item_by_id(&p.item.id).is_none() => {
                Event::OptimisticDeleteItemFail {
                    error: network_error(),
                }
            }
            Some(_) => return,
            None => Event::OptimisticDeleteItemFail {
                error: network_error(),
            },
        },
    };

    machine.send(event);
}

fn started_machine() -> ItemMachine {
    let mut machine = ItemMachine::new();
    machine.start();
    machine.take_requests();
    machine.send(Event::LoadItemSuccess {
        items: vec![
            Item::new("server_1", "Label_1"),
            Item::new("server_2", "Label_2"),
            Item::new("server_3", "Label_3"),
        ],
    });
    machine
}

fn assert_invariants(machine: &ItemMachine) {
    let snapshot = machine.snapshot();

    // Each region has exactly one active leaf.
    assert!(snapshot.state.matches("main"));
    assert!(snapshot.state.matches("global.selection"));
    assert!(
        snapshot.state.matches("global.selection.selected")
            ^ snapshot.state.matches("global.selection.unSelected")
    );

    // A selection always resolves: either through the collection or
    // through the stash of an in-flight delete.
    if let Some(selected) = &snapshot.context.selected_item_id {
        let in_items = snapshot.context.item_by_id(selected).is_some();
        let in_stash = snapshot
            .context
            .pending_item
            .as_ref()
            .is_some_and(|p| &p.item.id == selected);
        assert!(in_items || in_stash, "dangling selection {selected}");
    }

    // Ids stay unique.
    let mut ids: Vec<&ItemId> = snapshot.context.items.iter().map(|i| &i.id).collect();
    ids.sort_by(|a, b| a.as_str().cmp(b.as_str()));
    ids.dedup();
    assert_eq!(ids.len(), snapshot.context.items.len(), "duplicate ids");
}

proptest! {
    #[test]
    fn random_sequences_preserve_invariants(ops in proptest::collection::vec(arbitrary_op(), 0..60)) {
        let mut machine = started_machine();
        for op in ops {
            drive(&mut machine, op);
            assert_invariants(&machine);
        }
    }

    #[test]
    fn duplicate_failures_never_corrupt_items(ops in proptest::collection::vec(arbitrary_op(), 0..30)) {
        let mut machine = started_machine();
        for op in ops {
            drive(&mut machine, op);
        }

        // Hammer the rollback paths with stale failures; the
        // collection must not change once the stash is empty.
        drive(&mut machine, Op::DeleteFail);
        drive(&mut machine, Op::EditFail);
        let settled = machine.context().items.clone();

        drive(&mut machine, Op::DeleteFail);
        drive(&mut machine, Op::EditFail);
        drive(&mut machine, Op::DeleteFail);

        prop_assert_eq!(machine.context().items.clone(), settled);
    }

    #[test]
    fn matches_is_consistent_with_leaf_paths(ops in proptest::collection::vec(arbitrary_op(), 0..40)) {
        let mut machine = started_machine();
        for op in ops {
            drive(&mut machine, op);
        }

        let state = machine.state();
        prop_assert!(state.matches(state.main.path()));
        prop_assert!(state.matches(state.selection.path()));
    }
}
