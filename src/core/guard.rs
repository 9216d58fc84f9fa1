//! Guard predicates for controlling state transitions.
//!
//! Guards are pure boolean functions over the current context and the
//! incoming event. They decide whether a candidate transition is
//! eligible; evaluation must be synchronous and side-effect free.

use crate::core::context::Context;
use crate::core::event::Event;

/// Pure predicate that determines if a transition may fire.
///
/// Guards are evaluated during handler resolution, before any action
/// runs. A handler without a guard always matches.
///
/// # Example
///
/// ```rust
/// use itemflow::core::{Context, Event, Guard, OpFrom};
///
/// let from_master = Guard::new(|_ctx: &Context, event: &Event| {
///     matches!(event, Event::ItemDelete { from: OpFrom::Master })
/// });
///
/// let ctx = Context::new();
/// assert!(from_master.check(&ctx, &Event::ItemDelete { from: OpFrom::Master }));
/// assert!(!from_master.check(&ctx, &Event::ItemDelete { from: OpFrom::Details }));
/// ```
pub struct Guard {
    predicate: Box<dyn Fn(&Context, &Event) -> bool + Send + Sync>,
}

impl Guard {
    /// Create a guard from a pure predicate function.
    ///
    /// The predicate must be deterministic, must not suspend, and must
    /// not mutate anything.
    pub fn new<F>(predicate: F) -> Self
    where
        F: Fn(&Context, &Event) -> bool + Send + Sync + 'static,
    {
        Guard {
            predicate: Box::new(predicate),
        }
    }

    /// Evaluate the guard against the current context and event.
    pub fn check(&self, ctx: &Context, event: &Event) -> bool {
        (self.predicate)(ctx, event)
    }
}
