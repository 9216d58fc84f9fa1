//! The state machine core.
//!
//! [`ItemMachine`] interprets the transition table against the shared
//! context under run-to-completion semantics: `send` takes the machine
//! by `&mut self` and processes one event fully — guard evaluation,
//! actions, target computation — before anything else can touch it.
//! Remote dispatches are collected in an outbox and forwarded to the
//! actor by the owner after each transition completes.

mod table;
mod transition;

pub use transition::{Action, MainTransition, SelectionTransition, Target};

use crate::core::{
    Context, Event, MainState, StateHistory, StateTransition, StateValue,
};
use crate::service::ServiceRequest;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// What `send` did with an event.
///
/// `Unhandled` is an observability signal, not an error: the event had
/// no matching handler (or no guard passed) in either region, and the
/// state is unchanged. Test suites assert which events are expected to
/// be unhandled in which states.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum SendOutcome {
    /// A handler fired in at least one region.
    Handled { state: StateValue },
    /// No handler matched anywhere; nothing changed.
    Unhandled,
}

impl SendOutcome {
    pub fn is_handled(&self) -> bool {
        matches!(self, SendOutcome::Handled { .. })
    }
}

/// Point-in-time view of the machine: active leaves plus a copy of the
/// context. The UI layer reads snapshots, never the live context.
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct Snapshot {
    pub state: StateValue,
    pub context: Context,
}

/// The hierarchical, parallel machine instance.
///
/// # Example
///
/// ```rust
/// use itemflow::core::{Event, Item, OpFrom};
/// use itemflow::machine::ItemMachine;
///
/// let mut machine = ItemMachine::new();
/// machine.start();
/// assert!(machine.state().matches("main.loading"));
///
/// machine.send(Event::LoadItemSuccess { items: Vec::new() });
/// assert!(machine.state().matches("main.master"));
/// ```
pub struct ItemMachine {
    state: StateValue,
    context: Context,
    history: StateHistory,
    main_rows: Vec<MainTransition>,
    selection_rows: Vec<SelectionTransition>,
    outbox: Vec<ServiceRequest>,
    started: bool,
}

impl ItemMachine {
    /// Create a machine in the initial combination with an empty
    /// context. Call [`start`](ItemMachine::start) before sending.
    pub fn new() -> Self {
        ItemMachine {
            state: StateValue::initial(),
            context: Context::new(),
            history: StateHistory::new(),
            main_rows: table::main_transitions(),
            selection_rows: table::selection_transitions(),
            outbox: Vec::new(),
            started: false,
        }
    }

    /// Perform the initial entry into `main.loading`, dispatching the
    /// first `List` request. Idempotent; later entries into loading
    /// fire their own entry action.
    pub fn start(&mut self) {
        if self.started {
            return;
        }
        self.started = true;
        self.enter_loading();
    }

    /// Process one event to completion. Exactly one matching handler
    /// fires per region; orthogonal regions may both fire for the same
    /// event.
    pub fn send(&mut self, event: Event) -> SendOutcome {
        let from = self.state;

        let main_row = self.resolve_main(&event);
        let selection_row = self
            .selection_rows
            .iter()
            .position(|row| row.can_fire(&self.context, &event));

        if main_row.is_none() && selection_row.is_none() {
            warn!(
                event = event.name(),
                main = from.main.path(),
                selection = from.selection.path(),
                "unhandled event, state unchanged"
            );
            return SendOutcome::Unhandled;
        }

        let mut next = from;

        if let Some(index) = main_row {
            let target = self.main_rows[index].target;
            let actions = self.main_rows[index].actions;
            for action in actions {
                transition::run_action(*action, &mut self.context, &event, &mut self.outbox);
            }
            next.main = target.main;
            if let Some(selection) = target.selection {
                next.selection = selection;
            }
        }

        if let Some(index) = selection_row {
            let target = self.selection_rows[index].target;
            let actions = self.selection_rows[index].actions;
            for action in actions {
                transition::run_action(*action, &mut self.context, &event, &mut self.outbox);
            }
            next.selection = target;
        }

        if next.main == MainState::Loading && from.main != MainState::Loading {
            self.enter_loading();
        }

        debug!(
            event = event.name(),
            from = from.main.path(),
            to = next.main.path(),
            selection = next.selection.path(),
            "transition applied"
        );

        self.history = self.history.record(StateTransition {
            from,
            to: next,
            event: event.name().to_string(),
            timestamp: Utc::now(),
        });
        self.state = next;

        SendOutcome::Handled { state: next }
    }

    /// The active combination of leaves.
    pub fn state(&self) -> StateValue {
        self.state
    }

    /// Read-only view of the shared context.
    pub fn context(&self) -> &Context {
        &self.context
    }

    /// Current snapshot: state value plus a context copy.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            state: self.state,
            context: self.context.clone(),
        }
    }

    /// Transitions applied so far.
    pub fn history(&self) -> &StateHistory {
        &self.history
    }

    /// Drain the requests queued by remote-dispatch actions. The owner
    /// forwards them to the actor after the transition completes.
    pub fn take_requests(&mut self) -> Vec<ServiceRequest> {
        std::mem::take(&mut self.outbox)
    }

    /// Leaf handlers first, then region-level handlers; first row
    /// whose event matches and whose guard passes wins.
    fn resolve_main(&self, event: &Event) -> Option<usize> {
        let leaf = self.state.main;
        let leaf_match = self
            .main_rows
            .iter()
            .position(|row| row.leaf == Some(leaf) && row.can_fire(leaf, &self.context, event));
        leaf_match.or_else(|| {
            self.main_rows
                .iter()
                .position(|row| row.leaf.is_none() && row.can_fire(leaf, &self.context, event))
        })
    }

    /// Entry action of `main.loading`: exactly one `List` dispatch per
    /// entry.
    fn enter_loading(&mut self) {
        debug!("entering main.loading, dispatching List");
        self.outbox.push(ServiceRequest::List);
    }
}

impl Default for ItemMachine {
    fn default() -> Self {
        ItemMachine::new()
    }
}
