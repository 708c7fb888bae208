//! Finite automata and recognition.
//!
//! # Key Concepts
//!
//! - **FiniteAutomaton**: the 5-tuple `(Q, q0, Qf, E, R)` over any ordered alphabet,
//!   with a cursor that `step` moves and `recognize` always returns to `q0`
//! - **WordAutomaton**: the same engine restricted to `char` symbols
//! - **AutomatonConfig**: policies fixed at construction, such as whether
//!   nondeterministic rule sets are accepted

mod config;
mod engine;
mod error;
mod word;

pub use config::{AutomatonConfig, NondeterminismPolicy};
pub use engine::FiniteAutomaton;
pub use error::RuleError;
pub use word::WordAutomaton;
