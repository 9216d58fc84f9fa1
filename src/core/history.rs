//! State transition history tracking.
//!
//! Immutable record of the transitions a machine instance has applied,
//! kept for diagnostics and tests. The `record` method returns a new
//! history rather than mutating in place.

use crate::core::state::StateValue;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Record of a single applied transition.
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct StateTransition {
    /// The active combination before the event.
    pub from: StateValue,
    /// The active combination after the event.
    pub to: StateValue,
    /// Wire-style name of the event that fired the transition.
    pub event: String,
    /// When the transition was applied.
    pub timestamp: DateTime<Utc>,
}

/// Ordered history of applied transitions.
///
/// # Example
///
/// ```rust
/// use itemflow::core::{StateHistory, StateTransition, StateValue, MainState};
/// use chrono::Utc;
///
/// let mut to = StateValue::initial();
/// to.main = MainState::Master;
///
/// let history = StateHistory::new().record(StateTransition {
///     from: StateValue::initial(),
///     to,
///     event: "LOAD_ITEM_SUCCESS".to_string(),
///     timestamp: Utc::now(),
/// });
///
/// assert_eq!(history.transitions().len(), 1);
/// assert_eq!(history.path().len(), 2);
/// ```
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct StateHistory {
    transitions: Vec<StateTransition>,
}

impl StateHistory {
    /// Create a new empty history.
    pub fn new() -> Self {
        StateHistory {
            transitions: Vec::new(),
        }
    }

    /// Record a transition, returning a new history.
    pub fn record(&self, transition: StateTransition) -> Self {
        let mut transitions = self.transitions.clone();
        transitions.push(transition);
        StateHistory { transitions }
    }

    /// All recorded transitions in order.
    pub fn transitions(&self) -> &[StateTransition] {
        &self.transitions
    }

    /// The sequence of combined states traversed: the starting value,
    /// then the `to` value of each transition.
    pub fn path(&self) -> Vec<&StateValue> {
        let mut path = Vec::new();
        if let Some(first) = self.transitions.first() {
            path.push(&first.from);
        }
        for transition in &self.transitions {
            path.push(&transition.to);
        }
        path
    }
}
