//! The optimistic update engine.
//!
//! Pure context transformations, invoked only as transition actions.
//! Each `apply_*` mutates the collection immediately, before the remote
//! result is known, stashing enough pre-operation data for an
//! exact-inverse rollback. `commit_*` finalizes server-assigned fields
//! and drops the stash; `rollback_*` restores the stashed snapshot
//! verbatim.
//!
//! Every commit/rollback is idempotent against an already-cleared
//! stash: a duplicate or stale result event must not corrupt `items`.

use crate::core::context::{Context, PendingItem};
use crate::core::event::{CreateResult, EditResult};
use crate::core::item::Item;

/// Optimistically insert a freshly submitted item (temporary id) and
/// stash it as the pending operation.
pub fn apply_create(ctx: &mut Context, item: Item) {
    let index = ctx.items.len();
    ctx.items.push(item.clone());
    ctx.pending_item = Some(PendingItem { item, index });
}

/// Replace the optimistic placeholder with the server-confirmed item.
pub fn commit_create(ctx: &mut Context, result: &CreateResult) {
    if let Some(index) = ctx.position_of(&result.local_item.id) {
        ctx.items[index] = result.server_item.clone();
    }
    clear_pending_for(ctx, &result.local_item);
}

/// Remove the optimistic placeholder after a failed creation.
pub fn rollback_create(ctx: &mut Context, local_item: &Item) {
    if let Some(index) = ctx.position_of(&local_item.id) {
        ctx.items.remove(index);
    }
    clear_pending_for(ctx, local_item);
}

/// Optimistically overwrite an item with the edited payload, stashing
/// the pre-edit snapshot.
pub fn apply_edit(ctx: &mut Context, payload: Item, old_item: Item) {
    if let Some(index) = ctx.position_of(&old_item.id) {
        ctx.items[index] = payload;
        ctx.pending_item = Some(PendingItem {
            item: old_item,
            index,
        });
    }
}

/// Commit the edited fields, taking server-stamped values.
pub fn commit_edit(ctx: &mut Context, result: &EditResult) {
    if let Some(index) = ctx.position_of(&result.item.id) {
        ctx.items[index] = result.item.clone();
    }
    clear_pending_for(ctx, &result.item);
}

/// Restore the pre-edit snapshot verbatim. No-op when nothing is
/// stashed.
pub fn rollback_edit(ctx: &mut Context) {
    if let Some(pending) = ctx.pending_item.take() {
        if let Some(index) = ctx.position_of(&pending.item.id) {
            ctx.items[index] = pending.item;
        }
    }
}

/// Optimistically remove an item, stashing it with its position.
/// The selection is retained while the delete is in flight so a
/// rollback can re-select it.
pub fn apply_delete(ctx: &mut Context, item: &Item) {
    if let Some(index) = ctx.position_of(&item.id) {
        let removed = ctx.items.remove(index);
        ctx.pending_item = Some(PendingItem {
            item: removed,
            index,
        });
    }
}

/// Finalize a confirmed delete: drop the stash and the retained
/// selection.
pub fn commit_delete(ctx: &mut Context) {
    ctx.pending_item = None;
    ctx.selected_item_id = None;
}

/// Reinsert the stashed item at its original position and re-select
/// it. No-op when nothing is stashed. A reload completing while the
/// delete was in flight may already have brought the item back; in
/// that case only the selection is restored, never a second copy.
pub fn rollback_delete(ctx: &mut Context) {
    if let Some(pending) = ctx.pending_item.take() {
        ctx.selected_item_id = Some(pending.item.id.clone());
        if ctx.position_of(&pending.item.id).is_none() {
            let index = pending.index.min(ctx.items.len());
            ctx.items.insert(index, pending.item);
        }
    }
}

/// Drop the stash, but only if it belongs to `item` — a stale result
/// for a different operation must not clobber a newer stash.
fn clear_pending_for(ctx: &mut Context, item: &Item) {
    if ctx
        .pending_item
        .as_ref()
        .is_some_and(|p| p.item.id == item.id)
    {
        ctx.pending_item = None;
    }
}
