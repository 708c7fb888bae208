//! Finite automata over single characters.

use super::config::AutomatonConfig;
use super::engine::FiniteAutomaton;
use super::error::RuleError;
use crate::core::{Rule, RuleId, Run, State, StateId, StateRegistry, Symbol};
use std::collections::BTreeSet;
use std::ops::Deref;

/// Finite automaton recognizing words.
///
/// Every symbol is exactly one `char`, so the single-character constraint
/// holds by construction for typed rules. String payloads go through
/// [`WordAutomaton::add_rule_str`], which validates them first.
///
/// Read-only accessors of the underlying [`FiniteAutomaton`] are available
/// through `Deref`.
///
/// # Example
///
/// ```rust
/// use seedling::automaton::WordAutomaton;
/// use seedling::core::StateRegistry;
///
/// let mut registry = StateRegistry::new();
/// let mut automaton = WordAutomaton::new(&mut registry);
/// let q0 = *automaton.initial_state();
/// let q1 = registry.create(Some(&q0));
///
/// assert!(automaton.add_rule_str(q0, "a", q1));
/// assert!(!automaton.add_rule_str(q0, "bc", q1));
/// automaton.add_final_state(q1);
///
/// assert!(automaton.recognize("a"));
/// assert!(!automaton.recognize("bc"));
/// ```
#[derive(Clone, Debug)]
pub struct WordAutomaton {
    inner: FiniteAutomaton<char>,
}

impl WordAutomaton {
    /// Create a word automaton around a freshly allocated initial state.
    pub fn new(registry: &mut StateRegistry) -> Self {
        Self {
            inner: FiniteAutomaton::new(registry),
        }
    }

    /// Create a word automaton starting at `initial`.
    pub fn with_initial_state(initial: State) -> Self {
        Self {
            inner: FiniteAutomaton::with_initial_state(initial),
        }
    }

    /// Use `config` for subsequent rule insertions.
    pub fn with_config(self, config: AutomatonConfig) -> Self {
        Self {
            inner: self.inner.with_config(config),
        }
    }

    /// Clear every collection, keeping only `initial` and the config.
    pub fn reset(&mut self, initial: State) {
        self.inner.reset(initial);
    }

    /// Borrow the underlying generic automaton.
    pub fn as_automaton(&self) -> &FiniteAutomaton<char> {
        &self.inner
    }

    /// Unwrap into the underlying generic automaton.
    pub fn into_automaton(self) -> FiniteAutomaton<char> {
        self.inner
    }

    /// Mark `state` as final; `false` if already final or refused.
    pub fn add_final_state(&mut self, state: State) -> bool {
        self.inner.add_final_state(state)
    }

    /// Mark `state` as final, reporting an id conflict.
    pub fn try_add_final_state(&mut self, state: State) -> Result<bool, RuleError> {
        self.inner.try_add_final_state(state)
    }

    /// Insert `rule`, reporting why it was refused.
    pub fn try_add_rule(&mut self, rule: Rule<char>) -> Result<RuleId, RuleError> {
        self.inner.try_add_rule(rule)
    }

    /// Insert `rule`; `false` if it is already present or would conflict.
    pub fn add_rule(&mut self, rule: Rule<char>) -> bool {
        self.inner.add_rule(rule)
    }

    /// Insert a rule whose symbol is given as a string.
    ///
    /// The payload must be exactly one character.
    pub fn try_add_rule_str(
        &mut self,
        source: State,
        payload: &str,
        destination: State,
    ) -> Result<RuleId, RuleError> {
        let symbol: Symbol<char> = payload.parse()?;
        self.inner
            .try_add_rule(Rule::new(source, symbol, destination))
    }

    /// Boolean form of [`WordAutomaton::try_add_rule_str`].
    pub fn add_rule_str(&mut self, source: State, payload: &str, destination: State) -> bool {
        self.try_add_rule_str(source, payload, destination).is_ok()
    }

    /// Rule leaving `source` on `symbol`, if any.
    pub fn get_rule(&self, source: StateId, symbol: char) -> Option<&Rule<char>> {
        self.inner.get_rule(source, &Symbol::new(symbol))
    }

    /// Move the cursor back to the initial state.
    pub fn restart(&mut self) {
        self.inner.restart();
    }

    /// Follow the rule for `symbol` from the current state.
    pub fn step(&mut self, symbol: char) -> bool {
        self.inner.step(&Symbol::new(symbol))
    }

    /// Whether `word` is accepted. The cursor ends at `q0`.
    pub fn recognize(&mut self, word: &str) -> bool {
        self.inner.recognize(word.chars())
    }

    /// Recognize `word`, recording every step taken.
    pub fn trace(&mut self, word: &str) -> Run<char> {
        self.inner.trace(word.chars())
    }

    /// Every word accepted, or `None` when a reachable cycle makes the
    /// language infinite.
    pub fn language(&self) -> Option<BTreeSet<String>> {
        let mut words = BTreeSet::new();
        let mut on_path = BTreeSet::new();
        let mut prefix = String::new();
        self.collect_words(
            self.inner.initial_state().id(),
            &mut prefix,
            &mut on_path,
            &mut words,
        )
        .then_some(words)
    }

    fn collect_words(
        &self,
        state: StateId,
        prefix: &mut String,
        on_path: &mut BTreeSet<StateId>,
        words: &mut BTreeSet<String>,
    ) -> bool {
        if !on_path.insert(state) {
            return false;
        }
        if self.inner.is_final(state) {
            words.insert(prefix.clone());
        }
        for rule in self.inner.transitions_from(state) {
            prefix.push(*rule.symbol.value());
            let finite = self.collect_words(rule.destination.id(), prefix, on_path, words);
            prefix.pop();
            if !finite {
                return false;
            }
        }
        on_path.remove(&state);
        true
    }
}

impl Deref for WordAutomaton {
    type Target = FiniteAutomaton<char>;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl From<FiniteAutomaton<char>> for WordAutomaton {
    fn from(inner: FiniteAutomaton<char>) -> Self {
        Self { inner }
    }
}
