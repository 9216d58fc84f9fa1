//! The pure core of the machine.
//!
//! Everything in this module is side-effect free: data types, guard
//! predicates, history tracking, and the optimistic update engine.
//! Side effects (service dispatch, async scheduling) live in
//! [`machine`](crate::machine), [`service`](crate::service) and
//! [`runtime`](crate::runtime).

mod context;
mod event;
mod guard;
mod history;
mod item;
mod macros;
pub mod optimistic;
mod state;

pub use context::{Context, ModalData, ModalKind, OpFrom, PendingItem};
pub use event::{CreateResult, DeleteResult, EditResult, Event};
pub use guard::Guard;
pub use history::{StateHistory, StateTransition};
pub use item::{Item, ItemId, SERVER_ID_PREFIX, TEMP_ID_PREFIX};
pub use state::{MainState, SelectionState, State, StateValue};
