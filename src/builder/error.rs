//! Build errors for prefix-tree construction.

use crate::automaton::RuleError;
use thiserror::Error;

/// Errors that can occur while building an automaton from samples.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("Sample {sample:?} could not be inserted: {source}")]
    Rule {
        sample: String,
        #[source]
        source: RuleError,
    },
}
