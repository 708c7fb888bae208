//! Structural invariant violations.

use crate::core::StateId;
use thiserror::Error;

/// A broken structural invariant of an automaton.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum InvariantViolation {
    #[error("Initial state {state} is not in the state set")]
    InitialOutsideStates { state: StateId },

    #[error("Cursor state {state} is not in the state set")]
    CursorOutsideStates { state: StateId },

    #[error("State {state} is listed more than once")]
    DuplicateState { state: StateId },

    #[error("Final state {state} is not in the state set")]
    FinalOutsideStates { state: StateId },

    #[error("Rule {rule} references unknown state {state}")]
    RuleStateUnknown { rule: String, state: StateId },

    #[error("Rule {rule} uses symbol {symbol} outside the alphabet")]
    RuleSymbolUnknown { rule: String, symbol: String },

    #[error("Rule {rule} is present more than once")]
    DuplicateRule { rule: String },

    #[error("State {state} has {count} transitions on symbol {symbol}")]
    Nondeterministic {
        state: StateId,
        symbol: String,
        count: usize,
    },

    #[error("State {state} is unreachable from the initial state")]
    Unreachable { state: StateId },

    #[error("Custom check failed: {message}")]
    CustomCheckFailed { message: String },
}
