//! Automaton states and the registry that issues them.
//!
//! A state is nothing more than a numeric identity plus an optional
//! ancestor link. Identities are handed out by a [`StateRegistry`] owned
//! by whoever is constructing automata, so two builders never share a
//! counter.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

/// Numeric identity of a state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StateId(u64);

impl StateId {
    /// Wrap a raw identity.
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// The raw numeric identity.
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for StateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "q{}", self.0)
    }
}

/// A state an automaton can be in.
///
/// States compare, hash and order by identity only. The ancestor is a
/// weak back-reference (an id, not ownership) recording which state this
/// one was derived from.
///
/// # Example
///
/// ```rust
/// use seedling::core::StateRegistry;
///
/// let mut registry = StateRegistry::new();
/// let root = registry.create(None);
/// let child = registry.create(Some(&root));
///
/// assert_eq!(child.ancestor(), Some(root.id()));
/// assert_ne!(root, child);
/// ```
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct State {
    id: StateId,
    ancestor: Option<StateId>,
}

impl State {
    /// Identity of this state.
    pub fn id(&self) -> StateId {
        self.id
    }

    /// The state this one was derived from, if any.
    pub fn ancestor(&self) -> Option<StateId> {
        self.ancestor
    }

    /// Root of the lineage this state belongs to.
    ///
    /// States without an ancestor are their own lineage root.
    pub fn lineage_root(&self) -> StateId {
        self.ancestor.unwrap_or(self.id)
    }
}

impl PartialEq for State {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for State {}

impl Hash for State {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl PartialOrd for State {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for State {
    fn cmp(&self, other: &Self) -> Ordering {
        self.id.cmp(&other.id)
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.id, f)
    }
}

/// Issues unique, monotonically increasing state identities.
///
/// Each registry owns its counter. [`StateRegistry::reset`] starts a new
/// construction epoch; states issued before the reset stay valid but may
/// alias ids issued after it, so they should not be mixed into the same
/// automaton. Automata refuse such aliases when the ancestors differ.
#[derive(Clone, Debug, Default)]
pub struct StateRegistry {
    next: u64,
}

impl StateRegistry {
    /// Create a registry whose first state will be `q0`.
    pub fn new() -> Self {
        Self { next: 0 }
    }

    /// Registry continuing after `last`, for extending automata built
    /// by another registry without reusing their ids.
    pub fn resume_after(last: StateId) -> Self {
        Self { next: last.0 + 1 }
    }

    /// Allocate the next unused identity, recording `ancestor`.
    pub fn create(&mut self, ancestor: Option<&State>) -> State {
        self.allocate(ancestor.map(State::id))
    }

    /// Allocate a state in `parent`'s lineage: its ancestor is the
    /// lineage root of `parent`, not `parent` itself.
    pub fn derive(&mut self, parent: &State) -> State {
        self.allocate(Some(parent.lineage_root()))
    }

    fn allocate(&mut self, ancestor: Option<StateId>) -> State {
        let state = State {
            id: StateId(self.next),
            ancestor,
        };
        self.next += 1;
        tracing::debug!(state = %state.id, ancestor = ?state.ancestor, "allocated state");
        state
    }

    /// Restart numbering at zero for a new construction epoch.
    pub fn reset(&mut self) {
        self.next = 0;
    }

    /// Number of states issued since the last reset.
    pub fn issued(&self) -> u64 {
        self.next
    }

    /// Rebuild a state from its stored parts.
    ///
    /// Used when restoring snapshots; the registry counter is not touched.
    pub(crate) fn revive(id: StateId, ancestor: Option<StateId>) -> State {
        State { id, ancestor }
    }
}
