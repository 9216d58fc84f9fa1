//! Region states and the combined state value.
//!
//! The machine root is parallel: two orthogonal regions evolve
//! independently against the one shared context. `main` tracks the
//! screen flow, `global.selection` tracks whether an item is selected.
//! The combination of active leaves is a [`StateValue`]; it is
//! recomputed on every transition and never persisted.

use serde::{Deserialize, Serialize};
use std::fmt::Debug;

/// Trait for region leaf states.
///
/// All methods are pure. Leaves are immutable values describing the
/// current position within one region.
pub trait State:
    Clone + PartialEq + Debug + Serialize + for<'de> Deserialize<'de> + Send + Sync
{
    /// The leaf's name for display/logging.
    fn name(&self) -> &str;

    /// Check if this is a final (terminal) leaf. No region in this
    /// machine terminates, so the default stands.
    fn is_final(&self) -> bool {
        false
    }

    /// Check if this leaf represents a failure condition.
    fn is_error(&self) -> bool {
        false
    }
}

crate::state_enum! {
    /// Active leaf of the `main` region (screen flow).
    pub enum MainState {
        /// Fetching the collection; entry dispatches one `List` request.
        Loading,
        /// The fetch failed; offers retry/close.
        LoadFailed,
        /// The listing screen.
        Master,
        /// The details screen for the selected item.
        Details,
        /// The new-item form.
        NewItem,
        /// The edit form.
        EditItem,
    }
    error: [LoadFailed]
}

crate::state_enum! {
    /// Active leaf of the `global.selection` region.
    pub enum SelectionState {
        UnSelected,
        Selected,
    }
}

impl MainState {
    /// Full statechart path of this leaf.
    pub fn path(&self) -> &'static str {
        match self {
            MainState::Loading => "main.loading",
            MainState::LoadFailed => "main.loadFailed",
            MainState::Master => "main.master",
            MainState::Details => "main.details",
            MainState::NewItem => "main.newItem",
            MainState::EditItem => "main.editItem",
        }
    }
}

impl SelectionState {
    /// Full statechart path of this leaf.
    pub fn path(&self) -> &'static str {
        match self {
            SelectionState::UnSelected => "global.selection.unSelected",
            SelectionState::Selected => "global.selection.selected",
        }
    }
}

/// The combination of active leaves across both regions.
///
/// # Example
///
/// ```rust
/// use itemflow::core::StateValue;
///
/// let state = StateValue::initial();
/// assert!(state.matches("main.loading"));
/// assert!(state.matches("main"));
/// assert!(state.matches("global.selection.unSelected"));
/// assert!(!state.matches("main.master"));
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct StateValue {
    pub main: MainState,
    pub selection: SelectionState,
}

impl StateValue {
    /// The machine's starting combination: `main.loading` +
    /// `global.selection.unSelected`.
    pub fn initial() -> Self {
        StateValue {
            main: MainState::Loading,
            selection: SelectionState::UnSelected,
        }
    }

    /// XState-style path predicate. Accepts full leaf paths
    /// (`"main.master"`, `"global.selection.selected"`) as well as
    /// ancestor prefixes (`"main"`, `"global.selection"`).
    pub fn matches(&self, path: &str) -> bool {
        path_matches(self.main.path(), path) || path_matches(self.selection.path(), path)
    }
}

impl Default for StateValue {
    fn default() -> Self {
        StateValue::initial()
    }
}

/// True when `pattern` names `leaf_path` or one of its ancestors.
fn path_matches(leaf_path: &str, pattern: &str) -> bool {
    match leaf_path.strip_prefix(pattern) {
        Some(rest) => rest.is_empty() || rest.starts_with('.'),
        None => false,
    }
}
