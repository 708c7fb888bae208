//! Recognition run tracking.
//!
//! A [`Run`] is the record of one walk through an automaton: where it
//! started, every transition taken, and how it ended.

use super::state::StateId;
use super::symbol::Symbol;
use serde::{Deserialize, Serialize};

/// One transition taken during a run.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Step<T> {
    /// The state being left
    pub from: StateId,
    /// The symbol consumed
    pub symbol: Symbol<T>,
    /// The state reached
    pub to: StateId,
}

/// Ordered record of a recognition walk.
///
/// # Example
///
/// ```rust
/// use seedling::build_from_positive_examples;
///
/// let mut automaton = build_from_positive_examples(&["ab"]);
/// let run = automaton.trace("ab");
///
/// assert!(run.is_accepted());
/// assert_eq!(run.path().len(), 3);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Run<T> {
    start: StateId,
    steps: Vec<Step<T>>,
    consumed: bool,
    accepted: bool,
}

impl<T> Run<T> {
    /// Start an empty run at `start`.
    pub fn new(start: StateId) -> Self {
        Self {
            start,
            steps: Vec::new(),
            consumed: false,
            accepted: false,
        }
    }

    /// Record a step, returning the extended run.
    pub fn record(mut self, step: Step<T>) -> Self {
        self.steps.push(step);
        self
    }

    /// Close the run with its outcome.
    pub(crate) fn finish(mut self, consumed: bool, accepted: bool) -> Self {
        self.consumed = consumed;
        self.accepted = accepted && consumed;
        self
    }

    /// States visited in order: the start state, then the target of each step.
    pub fn path(&self) -> Vec<StateId> {
        std::iter::once(self.start)
            .chain(self.steps.iter().map(|step| step.to))
            .collect()
    }

    pub fn steps(&self) -> &[Step<T>] {
        &self.steps
    }

    /// State the run ended in.
    pub fn last_state(&self) -> StateId {
        self.steps.last().map_or(self.start, |step| step.to)
    }

    /// Whether every symbol of the pattern was consumed.
    pub fn consumed_all(&self) -> bool {
        self.consumed
    }

    /// Whether the whole pattern was consumed and the run ended in a final state.
    pub fn is_accepted(&self) -> bool {
        self.accepted
    }
}
