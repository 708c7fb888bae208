//! Rule insertion errors.

use crate::core::{StateId, SymbolError};
use thiserror::Error;

/// Reasons an automaton refuses a rule. A refused rule never changes the
/// automaton.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RuleError {
    #[error("Rule {rule} is already present")]
    Duplicate { rule: String },

    #[error("Rule {rule} makes the automaton nondeterministic (existing: {existing})")]
    Nondeterministic { rule: String, existing: String },

    #[error("State {id} is already known with ancestor {existing:?}, got {incoming:?}")]
    StateConflict {
        id: StateId,
        existing: Option<StateId>,
        incoming: Option<StateId>,
    },

    #[error("Invalid rule symbol: {0}")]
    InvalidSymbol(#[from] SymbolError),
}
