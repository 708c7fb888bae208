//! Construction of automata from positive examples.
//!
//! The prefix-tree acceptor is the canonical seed of grammatical
//! inference: one state per distinct sample prefix, and a language equal
//! to exactly the sample set. Later state-merging passes generalize from
//! it.

pub mod error;
pub mod prefix_tree;

pub use error::BuildError;
pub use prefix_tree::{build_from_positive_examples, PrefixTreeBuilder};
