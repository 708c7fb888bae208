//! Transition rules.

use super::state::State;
use super::symbol::Symbol;
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};

/// Index of a rule inside an automaton's rule storage.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RuleId(usize);

impl RuleId {
    pub(crate) fn new(index: usize) -> Self {
        Self(index)
    }

    pub(crate) fn index(self) -> usize {
        self.0
    }
}

/// Ordered transition `(source, symbol, destination)`.
///
/// Rules are immutable values: two rules with the same source, symbol and
/// destination are equal, so an automaton holds at most one of them.
///
/// # Example
///
/// ```rust
/// use seedling::core::{Rule, StateRegistry, Symbol};
///
/// let mut registry = StateRegistry::new();
/// let q0 = registry.create(None);
/// let q1 = registry.create(Some(&q0));
///
/// let rule = Rule::new(q0, Symbol::new('a'), q1);
/// assert_eq!(rule.to_string(), "q0 --a--> q1");
/// assert_eq!(rule, Rule::new(q0, Symbol::new('a'), q1));
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rule<T> {
    /// State the automaton must be in to use the rule
    pub source: State,
    /// Symbol that must be read
    pub symbol: Symbol<T>,
    /// State reached after reading the symbol
    pub destination: State,
}

impl<T> Rule<T> {
    pub fn new(source: State, symbol: Symbol<T>, destination: State) -> Self {
        Self {
            source,
            symbol,
            destination,
        }
    }
}

impl<T: Display> Display for Rule<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} --{}--> {}",
            self.source, self.symbol, self.destination
        )
    }
}
