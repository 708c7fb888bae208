//! Primitive building blocks shared by every automaton.
//!
//! - States and the registry that issues their identities
//! - Alphabet symbols and transition rules
//! - Recognition runs and symbol trees

mod rule;
mod run;
mod state;
mod symbol;
mod term;

pub use rule::{Rule, RuleId};
pub use run::{Run, Step};
pub use state::{State, StateId, StateRegistry};
pub use symbol::{Letter, Symbol, SymbolError};
pub use term::Term;
