//! Structural invariant checking for automata.
//!
//! Automata built through their public API keep their invariants by
//! construction. Checking matters for automata assembled from outside
//! data, such as restored snapshots, and for callers who want stricter
//! guarantees (determinism, reachability) than the defaults.
//!
//! Uses Stillwater's `Validation` type so a single pass reports every
//! broken invariant instead of stopping at the first.
//!
//! # Example
//!
//! ```rust
//! use seedling::build_from_positive_examples;
//! use seedling::validation::InvariantChecker;
//!
//! let automaton = build_from_positive_examples(&["ab", "ac"]);
//! let report = InvariantChecker::new()
//!     .deterministic()
//!     .reachable()
//!     .check(automaton.as_automaton());
//!
//! assert!(report.is_success());
//! ```

pub mod checker;
pub mod violations;

pub(crate) use checker::check_unique_states;
pub use checker::{InvariantCheck, InvariantChecker, InvariantReport};
pub use violations::InvariantViolation;
