//! Itemflow: a hierarchical, parallel state machine for optimistic CRUD.
//!
//! The machine orchestrates create/read/update/delete over a collection
//! of items, coordinating optimistic local mutation with asynchronous
//! confirmation or rollback from a backing service, and mediating the
//! transient UI-facing states (loading, load-failure dialog,
//! delete-confirmation dialog) without rendering anything itself. The
//! UI layer sends typed events in and reads snapshots out.
//!
//! # Core Concepts
//!
//! - **Parallel regions**: `main` (screen flow) and `global.selection`
//!   evolve independently against one shared [`core::Context`]; the
//!   active combination is a [`core::StateValue`].
//! - **Run-to-completion**: [`machine::ItemMachine::send`] processes
//!   one event fully — guards, actions, targets — before the next.
//! - **Optimistic updates**: submit actions mutate the collection
//!   immediately and stash a snapshot; the service's result event
//!   commits server-assigned fields or rolls the mutation back.
//! - **Service actor**: [`service::ItemService`] handles requests on
//!   its own tasks and answers each with exactly one result event.
//!
//! # Example
//!
//! ```rust
//! use itemflow::core::{Event, Item, OpFrom};
//! use itemflow::machine::ItemMachine;
//!
//! let mut machine = ItemMachine::new();
//! machine.start();
//!
//! // The loading entry queued a List request for the service actor.
//! assert_eq!(machine.take_requests().len(), 1);
//!
//! machine.send(Event::LoadItemSuccess { items: Vec::new() });
//! assert!(machine.state().matches("main.master"));
//!
//! machine.send(Event::ItemNew { from: OpFrom::Master });
//! machine.send(Event::NewItemSubmit {
//!     payload: Item::new("tmp_1", "Label_x"),
//! });
//! assert_eq!(machine.context().items.len(), 1);
//! ```
//!
//! For a running machine wired to an actor, see
//! [`runtime::Interpreter`].

pub mod core;
pub mod machine;
pub mod runtime;
pub mod service;

// Re-export commonly used types
pub use crate::core::{Context, Event, Item, ItemId, StateValue};
pub use crate::machine::{ItemMachine, SendOutcome, Snapshot};
pub use crate::runtime::Interpreter;
pub use crate::service::{ItemBackend, ItemService, ServiceRequest, SimulatedBackend};
