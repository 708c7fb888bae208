//! Invariant checks for automata using Validation.

use crate::automaton::FiniteAutomaton;
use crate::core::{Letter, State, StateId};
use crate::validation::violations::InvariantViolation;
use std::collections::{BTreeSet, VecDeque};
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;

/// Result of checking an automaton: success, or every violation found.
pub type InvariantReport = Validation<(), NonEmptyVec<InvariantViolation>>;

/// Type alias for custom check functions
pub type InvariantCheck<T> = Box<dyn Fn(&FiniteAutomaton<T>) -> InvariantReport + Send + Sync>;

/// Checks the structural invariants of an automaton, plus optional
/// stricter requirements.
///
/// The structural checks always run: `q0 ∈ Q`, cursor `∈ Q`, `Qf ⊆ Q`,
/// every rule's states in `Q` and symbol in `E`, no duplicate rules, and
/// no nondeterministic pairs when the automaton's config rejects them.
pub struct InvariantChecker<T: Letter> {
    deterministic: bool,
    reachable: bool,
    custom: Vec<InvariantCheck<T>>,
}

impl<T: Letter> InvariantChecker<T> {
    pub fn new() -> Self {
        Self {
            deterministic: false,
            reachable: false,
            custom: Vec::new(),
        }
    }

    /// Require determinism regardless of the automaton's config
    pub fn deterministic(mut self) -> Self {
        self.deterministic = true;
        self
    }

    /// Require every state to be reachable from `q0`
    pub fn reachable(mut self) -> Self {
        self.reachable = true;
        self
    }

    /// Add a custom check
    pub fn require<F>(mut self, check: F) -> Self
    where
        F: Fn(&FiniteAutomaton<T>) -> InvariantReport + Send + Sync + 'static,
    {
        self.custom.push(Box::new(check));
        self
    }

    /// Add a simple predicate check with error message
    pub fn require_pred<F>(mut self, predicate: F, message: String) -> Self
    where
        F: Fn(&FiniteAutomaton<T>) -> bool + Send + Sync + 'static,
    {
        let check = move |automaton: &FiniteAutomaton<T>| {
            if predicate(automaton) {
                Validation::success(())
            } else {
                Validation::fail(InvariantViolation::CustomCheckFailed {
                    message: message.clone(),
                })
            }
        };
        self.custom.push(Box::new(check));
        self
    }

    /// Run every check, accumulating ALL violations.
    pub fn check(&self, automaton: &FiniteAutomaton<T>) -> InvariantReport {
        let mut checks: Vec<InvariantReport> = Vec::new();

        checks.push(require(
            automaton.contains_state(automaton.initial.id()),
            || InvariantViolation::InitialOutsideStates {
                state: automaton.initial.id(),
            },
        ));
        checks.push(require(automaton.contains_state(automaton.current), || {
            InvariantViolation::CursorOutsideStates {
                state: automaton.current,
            }
        }));

        for &state in &automaton.finals {
            checks.push(require(automaton.contains_state(state), || {
                InvariantViolation::FinalOutsideStates { state }
            }));
        }

        let mut seen = BTreeSet::new();
        for rule in &automaton.rules {
            for state in [rule.source.id(), rule.destination.id()] {
                checks.push(require(automaton.contains_state(state), || {
                    InvariantViolation::RuleStateUnknown {
                        rule: rule.to_string(),
                        state,
                    }
                }));
            }
            checks.push(require(automaton.contains_symbol(&rule.symbol), || {
                InvariantViolation::RuleSymbolUnknown {
                    rule: rule.to_string(),
                    symbol: rule.symbol.to_string(),
                }
            }));
            let rendered = rule.to_string();
            checks.push(require(!seen.contains(&rendered), || {
                InvariantViolation::DuplicateRule {
                    rule: rendered.clone(),
                }
            }));
            seen.insert(rendered);
        }

        if self.deterministic || automaton.config.rejects_nondeterminism() {
            for (state, symbol, count) in automaton.transition_groups() {
                checks.push(require(count <= 1, || InvariantViolation::Nondeterministic {
                    state,
                    symbol: symbol.to_string(),
                    count,
                }));
            }
        }

        if self.reachable {
            let reached = reachable_states(automaton);
            for state in automaton.states() {
                checks.push(require(reached.contains(&state.id()), || {
                    InvariantViolation::Unreachable { state: state.id() }
                }));
            }
        }

        for check in &self.custom {
            checks.push(check(automaton));
        }

        Validation::all_vec(checks).map(|_| ())
    }
}

impl<T: Letter> Default for InvariantChecker<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Letter> FiniteAutomaton<T> {
    /// Check the structural invariants, collecting every violation.
    pub fn check_invariants(&self) -> InvariantReport {
        InvariantChecker::new().check(self)
    }
}

/// Check that a raw state listing names every id once.
///
/// An automaton keys its states by id, so this only matters for state
/// lists read from outside, before they are collapsed into `Q`.
pub(crate) fn check_unique_states(states: &[State]) -> InvariantReport {
    let mut seen = BTreeSet::new();
    let checks: Vec<InvariantReport> = states
        .iter()
        .map(|state| {
            let state = state.id();
            require(seen.insert(state), || InvariantViolation::DuplicateState { state })
        })
        .collect();
    Validation::all_vec(checks).map(|_| ())
}

fn require<F>(holds: bool, violation: F) -> InvariantReport
where
    F: FnOnce() -> InvariantViolation,
{
    if holds {
        Validation::success(())
    } else {
        Validation::fail(violation())
    }
}

fn reachable_states<T: Letter>(automaton: &FiniteAutomaton<T>) -> BTreeSet<StateId> {
    let start = automaton.initial_state().id();
    let mut reached = BTreeSet::from([start]);
    let mut queue = VecDeque::from([start]);
    while let Some(state) = queue.pop_front() {
        for rule in automaton.transitions_from(state) {
            if reached.insert(rule.destination.id()) {
                queue.push_back(rule.destination.id());
            }
        }
    }
    reached
}
