//! Seedling: finite automata and prefix-tree acceptors
//!
//! Seedling formalizes finite automata as the 5-tuple `(Q, q0, Qf, E, R)`
//! and builds, from a set of positive example strings, the deterministic
//! prefix-tree acceptor whose language is exactly that set. The prefix
//! tree is the usual starting point of grammatical inference.
//!
//! # Core Concepts
//!
//! - **States**: numeric identities issued by a `StateRegistry`, with
//!   optional ancestor links for lineage tracking
//! - **Automata**: a generic `FiniteAutomaton` over any ordered alphabet,
//!   and a `WordAutomaton` over characters
//! - **Prefix trees**: `PrefixTreeBuilder` walks shared prefixes and only
//!   grows the tree where no transition exists yet
//! - **Validation and snapshots**: structural invariant checks and
//!   versioned JSON/binary snapshots
//!
//! # Example
//!
//! ```rust
//! use seedling::build_from_positive_examples;
//!
//! let mut automaton = build_from_positive_examples(&["hello", "help", "world"]);
//!
//! assert!(automaton.recognize("hello"));
//! assert!(automaton.recognize("help"));
//! assert!(!automaton.recognize("hel"));
//! assert!(!automaton.recognize("worlds"));
//! ```

pub mod automaton;
pub mod builder;
pub mod core;
pub mod snapshot;
pub mod validation;

// Re-export commonly used types
pub use automaton::{AutomatonConfig, FiniteAutomaton, RuleError, WordAutomaton};
pub use builder::{build_from_positive_examples, BuildError, PrefixTreeBuilder};
pub use crate::core::{Rule, State, StateId, StateRegistry, Symbol};
pub use snapshot::{Snapshot, SnapshotError};
