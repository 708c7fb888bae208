//! Automaton configuration.

use serde::{Deserialize, Serialize};

/// How rule insertion treats a second destination for the same
/// `(source, symbol)` pair.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum NondeterminismPolicy {
    /// Refuse the rule, keeping the automaton deterministic
    #[default]
    Reject,

    /// Accept the rule; lookups pick the canonically first candidate
    Allow,
}

/// Settings fixed when an automaton is created.
///
/// # Example
///
/// ```rust
/// use seedling::automaton::{AutomatonConfig, NondeterminismPolicy};
///
/// let config: AutomatonConfig = serde_json::from_str("{}").unwrap();
/// assert_eq!(config.nondeterminism, NondeterminismPolicy::Reject);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AutomatonConfig {
    pub nondeterminism: NondeterminismPolicy,
}

impl AutomatonConfig {
    /// Configuration that accepts nondeterministic rule sets.
    pub fn permissive() -> Self {
        Self {
            nondeterminism: NondeterminismPolicy::Allow,
        }
    }

    pub(crate) fn rejects_nondeterminism(&self) -> bool {
        self.nondeterminism == NondeterminismPolicy::Reject
    }
}
