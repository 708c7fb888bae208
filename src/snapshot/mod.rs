//! Snapshot and restore for automata.
//!
//! A snapshot is a versioned, self-describing copy of an automaton's
//! collections. It can be written as JSON for readability or with bincode
//! for compactness, and restored into a working automaton whose cursor
//! sits at `q0`.

use crate::automaton::{AutomatonConfig, FiniteAutomaton, WordAutomaton};
use crate::core::{Letter, Rule, State, StateId, StateRegistry, Symbol};
use crate::validation::check_unique_states;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use stillwater::validation::Validation;
use uuid::Uuid;

pub mod error;

pub use error::SnapshotError;

/// Version identifier for snapshot format
pub const SNAPSHOT_VERSION: u32 = 1;

/// Serializable copy of an automaton.
/// Does NOT include the cursor position, which always restores to `q0`.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct Snapshot<T: Letter> {
    /// Snapshot format version
    pub version: u32,

    /// Unique snapshot identifier
    pub id: Uuid,

    /// When the snapshot was taken
    pub taken_at: DateTime<Utc>,

    pub config: AutomatonConfig,

    /// Every state with its ancestor link
    pub states: Vec<State>,

    pub initial: StateId,

    pub finals: Vec<StateId>,

    pub alphabet: Vec<Symbol<T>>,

    /// Rules in insertion order
    pub rules: Vec<Rule<T>>,
}

impl<T: Letter> FiniteAutomaton<T> {
    /// Capture the automaton's collections.
    pub fn snapshot(&self) -> Snapshot<T> {
        Snapshot {
            version: SNAPSHOT_VERSION,
            id: Uuid::new_v4(),
            taken_at: Utc::now(),
            config: self.config,
            states: self.states.values().copied().collect(),
            initial: self.initial.id(),
            finals: self.finals.iter().copied().collect(),
            alphabet: self.alphabet.iter().cloned().collect(),
            rules: self.rules.clone(),
        }
    }
}

impl<T: Letter> Snapshot<T> {
    pub fn to_json(&self) -> Result<String, SnapshotError> {
        serde_json::to_string_pretty(self)
            .map_err(|e| SnapshotError::SerializationFailed(e.to_string()))
    }

    pub fn from_json(json: &str) -> Result<Self, SnapshotError> {
        serde_json::from_str(json).map_err(|e| SnapshotError::DeserializationFailed(e.to_string()))
    }

    pub fn to_binary(&self) -> Result<Vec<u8>, SnapshotError> {
        bincode::serialize(self).map_err(|e| SnapshotError::SerializationFailed(e.to_string()))
    }

    pub fn from_binary(bytes: &[u8]) -> Result<Self, SnapshotError> {
        bincode::deserialize(bytes).map_err(|e| SnapshotError::DeserializationFailed(e.to_string()))
    }

    /// Rebuild the automaton, checking the version and every structural
    /// invariant.
    pub fn restore(self) -> Result<FiniteAutomaton<T>, SnapshotError> {
        if self.version != SNAPSHOT_VERSION {
            tracing::warn!(snapshot = %self.id, version = self.version, "unsupported snapshot version");
            return Err(SnapshotError::UnsupportedVersion {
                found: self.version,
                supported: SNAPSHOT_VERSION,
            });
        }

        let unique = check_unique_states(&self.states);
        let initial = self
            .states
            .iter()
            .find(|state| state.id() == self.initial)
            .copied()
            .unwrap_or_else(|| StateRegistry::revive(self.initial, None));

        let automaton = FiniteAutomaton::from_parts(
            self.config,
            self.states.into_iter().map(|s| (s.id(), s)).collect(),
            initial,
            self.finals.into_iter().collect(),
            self.alphabet.into_iter().collect(),
            self.rules,
        );

        let report = Validation::all_vec(vec![unique, automaton.check_invariants()]).map(|_| ());
        match report {
            Validation::Success(_) => {
                tracing::debug!(snapshot = %self.id, "snapshot restored");
                Ok(automaton)
            }
            Validation::Failure(errors) => {
                let violations: Vec<_> = errors.iter().cloned().collect();
                tracing::warn!(
                    snapshot = %self.id,
                    violations = violations.len(),
                    "snapshot failed validation"
                );
                Err(SnapshotError::Invalid { violations })
            }
        }
    }
}

impl Snapshot<char> {
    /// Restore as a [`WordAutomaton`].
    pub fn restore_word(self) -> Result<WordAutomaton, SnapshotError> {
        self.restore().map(WordAutomaton::from)
    }
}
