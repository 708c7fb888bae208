//! Generic finite automaton over an arbitrary alphabet.

use super::config::AutomatonConfig;
use super::error::RuleError;
use crate::core::{Letter, Rule, RuleId, Run, State, StateId, StateRegistry, Step, Symbol};
use std::collections::{BTreeMap, BTreeSet};
use tracing::{debug, trace, warn};

/// Rules indexed by `(source, symbol)`. Each candidate list is kept sorted
/// by the rules' textual rendering.
type TransitionIndex<T> = BTreeMap<StateId, BTreeMap<Symbol<T>, Vec<RuleId>>>;

/// Finite automaton `(Q, q0, Qf, E, R)` with a recognition cursor.
///
/// The automaton owns all of its collections. States are referenced by
/// identity, rules live in indexed storage and are looked up through a
/// `(state, symbol)` index.
///
/// # Example
///
/// ```rust
/// use seedling::automaton::FiniteAutomaton;
/// use seedling::core::{Rule, StateRegistry, Symbol};
///
/// let mut registry = StateRegistry::new();
/// let mut automaton = FiniteAutomaton::new(&mut registry);
/// let q0 = *automaton.initial_state();
/// let q1 = registry.create(Some(&q0));
///
/// automaton.add_rule(Rule::new(q0, Symbol::new("GET".to_string()), q1));
/// automaton.add_rule(Rule::new(q1, Symbol::new("/users".to_string()), q1));
/// automaton.add_final_state(q1);
///
/// assert!(automaton.recognize(["GET".to_string(), "/users".to_string()]));
/// assert!(!automaton.recognize(["/users".to_string()]));
/// ```
#[derive(Clone, Debug)]
pub struct FiniteAutomaton<T: Letter> {
    pub(crate) config: AutomatonConfig,
    pub(crate) states: BTreeMap<StateId, State>,
    pub(crate) initial: State,
    pub(crate) finals: BTreeSet<StateId>,
    pub(crate) alphabet: BTreeSet<Symbol<T>>,
    pub(crate) rules: Vec<Rule<T>>,
    transitions: TransitionIndex<T>,
    pub(crate) current: StateId,
}

impl<T: Letter> FiniteAutomaton<T> {
    /// Create an automaton around a freshly allocated initial state.
    pub fn new(registry: &mut StateRegistry) -> Self {
        Self::with_initial_state(registry.create(None))
    }

    /// Create an automaton with `Q = {initial}` and empty `Qf`, `E` and `R`.
    pub fn with_initial_state(initial: State) -> Self {
        Self {
            config: AutomatonConfig::default(),
            states: BTreeMap::from([(initial.id(), initial)]),
            initial,
            finals: BTreeSet::new(),
            alphabet: BTreeSet::new(),
            rules: Vec::new(),
            transitions: BTreeMap::new(),
            current: initial.id(),
        }
    }

    /// Use `config` for subsequent rule insertions.
    pub fn with_config(mut self, config: AutomatonConfig) -> Self {
        self.config = config;
        self
    }

    /// Rebuild from raw parts without validating them.
    pub(crate) fn from_parts(
        config: AutomatonConfig,
        states: BTreeMap<StateId, State>,
        initial: State,
        finals: BTreeSet<StateId>,
        alphabet: BTreeSet<Symbol<T>>,
        rules: Vec<Rule<T>>,
    ) -> Self {
        let mut automaton = Self {
            config,
            states,
            initial,
            finals,
            alphabet,
            rules: Vec::with_capacity(rules.len()),
            transitions: BTreeMap::new(),
            current: initial.id(),
        };
        for rule in rules {
            automaton.insert(rule);
        }
        automaton
    }

    /// Make this automaton brand-new-like around `initial`, keeping its config.
    pub fn reset(&mut self, initial: State) {
        *self = Self::with_initial_state(initial).with_config(self.config);
    }

    /// Configuration in effect.
    pub fn config(&self) -> &AutomatonConfig {
        &self.config
    }

    /// The initial state `q0`.
    pub fn initial_state(&self) -> &State {
        &self.initial
    }

    /// Position of the recognition cursor.
    pub fn current_state(&self) -> StateId {
        self.current
    }

    /// All states in `Q`, ordered by id.
    pub fn states(&self) -> impl Iterator<Item = &State> + '_ {
        self.states.values()
    }

    /// Look up a state of `Q` by id.
    pub fn state(&self, id: StateId) -> Option<&State> {
        self.states.get(&id)
    }

    /// Whether `id` is in `Q`.
    pub fn contains_state(&self, id: StateId) -> bool {
        self.states.contains_key(&id)
    }

    /// Ids of the final states `Qf`.
    pub fn final_states(&self) -> impl Iterator<Item = StateId> + '_ {
        self.finals.iter().copied()
    }

    /// Whether `id` is in `Qf`.
    pub fn is_final(&self, id: StateId) -> bool {
        self.finals.contains(&id)
    }

    /// Symbols of `E` in order.
    pub fn alphabet(&self) -> impl Iterator<Item = &Symbol<T>> + '_ {
        self.alphabet.iter()
    }

    /// Whether `symbol` is in `E`.
    pub fn contains_symbol(&self, symbol: &Symbol<T>) -> bool {
        self.alphabet.contains(symbol)
    }

    /// All rules in insertion order.
    pub fn rules(&self) -> &[Rule<T>] {
        &self.rules
    }

    /// Look up a rule by id.
    pub fn rule(&self, id: RuleId) -> Option<&Rule<T>> {
        self.rules.get(id.index())
    }

    /// Rules leaving `source`, grouped by symbol in alphabet order.
    pub fn transitions_from(&self, source: StateId) -> impl Iterator<Item = &Rule<T>> + '_ {
        self.transitions
            .get(&source)
            .into_iter()
            .flat_map(|by_symbol| by_symbol.values().flatten())
            .map(move |id| &self.rules[id.index()])
    }

    /// Number of rules per indexed `(state, symbol)` pair.
    pub(crate) fn transition_groups(
        &self,
    ) -> impl Iterator<Item = (StateId, &Symbol<T>, usize)> + '_ {
        self.transitions.iter().flat_map(|(state, by_symbol)| {
            by_symbol
                .iter()
                .map(move |(symbol, candidates)| (*state, symbol, candidates.len()))
        })
    }

    /// Whether every `(state, symbol)` pair has at most one rule.
    pub fn is_deterministic(&self) -> bool {
        self.transitions
            .values()
            .flat_map(BTreeMap::values)
            .all(|candidates| candidates.len() <= 1)
    }

    /// Mark `state` as final, adding it to `Q` if needed.
    ///
    /// Returns `Ok(true)` if the state was not already final. A state whose
    /// id is already in `Q` with a different ancestor is refused and
    /// nothing changes.
    pub fn try_add_final_state(&mut self, state: State) -> Result<bool, RuleError> {
        if let Err(err) = self.check_known(&state) {
            warn!(state = %state, error = %err, "final state rejected");
            return Err(err);
        }
        self.states.entry(state.id()).or_insert(state);
        let added = self.finals.insert(state.id());
        if added {
            debug!(state = %state, "marked final");
        }
        Ok(added)
    }

    /// Boolean form of [`FiniteAutomaton::try_add_final_state`].
    ///
    /// Returns `true` only if the state became final by this call.
    pub fn add_final_state(&mut self, state: State) -> bool {
        self.try_add_final_state(state).unwrap_or(false)
    }

    /// Insert a rule, adding its symbol to `E` and its states to `Q`.
    ///
    /// The insertion is all-or-nothing: on error nothing changes.
    pub fn try_add_rule(&mut self, rule: Rule<T>) -> Result<RuleId, RuleError> {
        if let Err(err) = self.admit(&rule) {
            warn!(rule = %rule, error = %err, "rule rejected");
            return Err(err);
        }
        self.states.entry(rule.source.id()).or_insert(rule.source);
        self.states
            .entry(rule.destination.id())
            .or_insert(rule.destination);
        self.alphabet.insert(rule.symbol.clone());
        debug!(rule = %rule, "rule added");
        Ok(self.insert(rule))
    }

    /// Boolean form of [`FiniteAutomaton::try_add_rule`].
    pub fn add_rule(&mut self, rule: Rule<T>) -> bool {
        self.try_add_rule(rule).is_ok()
    }

    fn admit(&self, rule: &Rule<T>) -> Result<(), RuleError> {
        self.check_known(&rule.source)?;
        self.check_known(&rule.destination)?;

        let candidates = self.candidates(rule.source.id(), &rule.symbol);
        if candidates.iter().any(|id| self.rules[id.index()] == *rule) {
            return Err(RuleError::Duplicate {
                rule: rule.to_string(),
            });
        }
        if self.config.rejects_nondeterminism() {
            if let Some(existing) = candidates.first() {
                return Err(RuleError::Nondeterministic {
                    rule: rule.to_string(),
                    existing: self.rules[existing.index()].to_string(),
                });
            }
        }
        Ok(())
    }

    fn check_known(&self, state: &State) -> Result<(), RuleError> {
        match self.states.get(&state.id()) {
            Some(known) if known.ancestor() != state.ancestor() => Err(RuleError::StateConflict {
                id: state.id(),
                existing: known.ancestor(),
                incoming: state.ancestor(),
            }),
            _ => Ok(()),
        }
    }

    /// Store a rule and index it. Performs no validation.
    fn insert(&mut self, rule: Rule<T>) -> RuleId {
        let id = RuleId::new(self.rules.len());
        let rendered = rule.to_string();
        let rules = &self.rules;
        let slot = self
            .transitions
            .entry(rule.source.id())
            .or_default()
            .entry(rule.symbol.clone())
            .or_default();
        let position = slot.partition_point(|other| rules[other.index()].to_string() < rendered);
        slot.insert(position, id);
        self.rules.push(rule);
        id
    }

    fn candidates(&self, source: StateId, symbol: &Symbol<T>) -> &[RuleId] {
        self.transitions
            .get(&source)
            .and_then(|by_symbol| by_symbol.get(symbol))
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// First rule for `(source, symbol)` in canonical textual order.
    pub fn get_rule(&self, source: StateId, symbol: &Symbol<T>) -> Option<&Rule<T>> {
        self.candidates(source, symbol)
            .first()
            .map(|id| &self.rules[id.index()])
    }

    /// Move the cursor back to the initial state.
    pub fn restart(&mut self) {
        self.current = self.initial.id();
    }

    /// Follow the rule for `symbol` from the current state.
    ///
    /// Returns `false` and leaves the cursor where it is when the symbol is
    /// outside the alphabet or no rule applies.
    pub fn step(&mut self, symbol: &Symbol<T>) -> bool {
        if !self.alphabet.contains(symbol) {
            trace!(state = %self.current, symbol = %symbol, "symbol outside alphabet");
            return false;
        }
        let Some(next) = self
            .get_rule(self.current, symbol)
            .map(|rule| rule.destination.id())
        else {
            trace!(state = %self.current, symbol = %symbol, "no transition");
            return false;
        };
        trace!(from = %self.current, symbol = %symbol, to = %next, "step");
        self.current = next;
        true
    }

    /// Whether the automaton accepts `pattern`.
    ///
    /// The cursor starts at `q0` and is back at `q0` when this returns,
    /// whatever the outcome.
    pub fn recognize<I>(&mut self, pattern: I) -> bool
    where
        I: IntoIterator<Item = T>,
    {
        let cursor = Cursor::acquire(self);
        for value in pattern {
            if !cursor.automaton.step(&Symbol::new(value)) {
                return false;
            }
        }
        cursor.accepting()
    }

    /// Recognize `pattern`, recording every step taken.
    pub fn trace<I>(&mut self, pattern: I) -> Run<T>
    where
        I: IntoIterator<Item = T>,
    {
        let cursor = Cursor::acquire(self);
        let mut run = Run::new(cursor.automaton.current);
        for value in pattern {
            let symbol = Symbol::new(value);
            let from = cursor.automaton.current;
            if !cursor.automaton.step(&symbol) {
                return run.finish(false, false);
            }
            run = run.record(Step {
                from,
                symbol,
                to: cursor.automaton.current,
            });
        }
        let accepted = cursor.accepting();
        run.finish(true, accepted)
    }
}

/// Exclusive hold on an automaton's cursor for one recognition.
///
/// Starts at `q0` and puts the cursor back there when dropped.
struct Cursor<'a, T: Letter> {
    automaton: &'a mut FiniteAutomaton<T>,
}

impl<'a, T: Letter> Cursor<'a, T> {
    fn acquire(automaton: &'a mut FiniteAutomaton<T>) -> Self {
        if automaton.current != automaton.initial.id() {
            automaton.restart();
        }
        Self { automaton }
    }

    fn accepting(&self) -> bool {
        self.automaton.is_final(self.automaton.current)
    }
}

impl<T: Letter> Drop for Cursor<'_, T> {
    fn drop(&mut self) {
        self.automaton.restart();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixture {
        automaton: FiniteAutomaton<char>,
        q0: State,
        q1: State,
        q2: State,
    }

    fn fixture() -> Fixture {
        let mut registry = StateRegistry::new();
        let automaton = FiniteAutomaton::new(&mut registry);
        let q0 = *automaton.initial_state();
        let q1 = registry.create(Some(&q0));
        let q2 = registry.create(Some(&q1));
        Fixture {
            automaton,
            q0,
            q1,
            q2,
        }
    }

    fn rule(source: State, symbol: char, destination: State) -> Rule<char> {
        Rule::new(source, Symbol::new(symbol), destination)
    }

    fn chars(word: &str) -> Vec<char> {
        word.chars().collect()
    }

    #[test]
    fn new_automaton_has_only_initial_state() {
        let Fixture { automaton, q0, .. } = fixture();

        assert_eq!(automaton.states().count(), 1);
        assert!(automaton.contains_state(q0.id()));
        assert_eq!(automaton.current_state(), q0.id());
        assert_eq!(automaton.final_states().count(), 0);
        assert_eq!(automaton.alphabet().count(), 0);
        assert!(automaton.rules().is_empty());
    }

    #[test]
    fn add_final_state_is_idempotent() {
        let Fixture {
            mut automaton, q2, ..
        } = fixture();

        assert!(automaton.add_final_state(q2));
        assert!(!automaton.add_final_state(q2));
        assert!(automaton.contains_state(q2.id()));
        assert_eq!(automaton.final_states().count(), 1);
    }

    #[test]
    fn add_rule_extends_states_and_alphabet() {
        let Fixture {
            mut automaton,
            q0,
            q1,
            ..
        } = fixture();

        assert!(automaton.add_rule(rule(q0, 'a', q1)));

        assert!(automaton.contains_state(q1.id()));
        assert!(automaton.contains_symbol(&Symbol::new('a')));
        assert_eq!(automaton.rules().len(), 1);
    }

    #[test]
    fn duplicate_rule_is_rejected() {
        let Fixture {
            mut automaton,
            q0,
            q1,
            ..
        } = fixture();
        automaton.add_rule(rule(q0, 'a', q1));

        let result = automaton.try_add_rule(rule(q0, 'a', q1));

        assert!(matches!(result, Err(RuleError::Duplicate { .. })));
        assert_eq!(automaton.rules().len(), 1);
    }

    #[test]
    fn nondeterministic_rule_is_rejected_by_default() {
        let Fixture {
            mut automaton,
            q0,
            q1,
            q2,
        } = fixture();
        automaton.add_rule(rule(q0, 'a', q1));

        let result = automaton.try_add_rule(rule(q0, 'a', q2));

        assert!(matches!(result, Err(RuleError::Nondeterministic { .. })));
        assert!(!automaton.contains_state(q2.id()));
        assert!(automaton.is_deterministic());
    }

    #[test]
    fn permissive_config_accepts_nondeterminism() {
        let Fixture {
            automaton,
            q0,
            q1,
            q2,
        } = fixture();
        let mut automaton = automaton.with_config(AutomatonConfig::permissive());

        assert!(automaton.add_rule(rule(q0, 'a', q2)));
        assert!(automaton.add_rule(rule(q0, 'a', q1)));
        assert!(!automaton.is_deterministic());

        // "q0 --a--> q1" sorts before "q0 --a--> q2"
        let chosen = automaton.get_rule(q0.id(), &Symbol::new('a')).unwrap();
        assert_eq!(chosen.destination, q1);
    }

    #[test]
    fn aliased_state_is_rejected() {
        let Fixture {
            mut automaton,
            q0,
            q1,
            ..
        } = fixture();
        automaton.add_rule(rule(q0, 'a', q1));

        let mut other_epoch = StateRegistry::new();
        other_epoch.create(None);
        let alias = other_epoch.create(None);
        assert_eq!(alias.id(), q1.id());

        let result = automaton.try_add_rule(rule(alias, 'b', q0));

        assert!(matches!(result, Err(RuleError::StateConflict { .. })));
        assert!(!automaton.contains_symbol(&Symbol::new('b')));
    }

    #[test]
    fn aliased_final_state_is_rejected() {
        let Fixture {
            mut automaton,
            q0,
            q1,
            ..
        } = fixture();
        automaton.add_rule(rule(q0, 'a', q1));

        let mut other_epoch = StateRegistry::new();
        other_epoch.create(None);
        let alias = other_epoch.create(None);
        assert_eq!(alias.id(), q1.id());

        let result = automaton.try_add_final_state(alias);

        assert!(matches!(result, Err(RuleError::StateConflict { .. })));
        assert!(!automaton.add_final_state(alias));
        assert!(!automaton.is_final(q1.id()));
        assert_eq!(automaton.state(q1.id()).map(State::ancestor), Some(Some(q0.id())));
        assert!(!automaton.recognize(chars("a")));
    }

    #[test]
    fn step_outside_alphabet_fails_closed() {
        let Fixture {
            mut automaton,
            q0,
            q1,
            ..
        } = fixture();
        automaton.add_rule(rule(q0, 'a', q1));

        assert!(!automaton.step(&Symbol::new('z')));
        assert_eq!(automaton.current_state(), q0.id());
    }

    #[test]
    fn step_without_rule_keeps_cursor() {
        let Fixture {
            mut automaton,
            q0,
            q1,
            ..
        } = fixture();
        automaton.add_rule(rule(q0, 'a', q1));

        assert!(automaton.step(&Symbol::new('a')));
        assert_eq!(automaton.current_state(), q1.id());
        assert!(!automaton.step(&Symbol::new('a')));
        assert_eq!(automaton.current_state(), q1.id());

        automaton.restart();
        assert_eq!(automaton.current_state(), q0.id());
    }

    #[test]
    fn recognizes_words_ending_with_b() {
        let Fixture {
            mut automaton,
            q0,
            q1,
            ..
        } = fixture();
        automaton.add_rule(rule(q0, 'a', q0));
        automaton.add_rule(rule(q0, 'b', q1));
        automaton.add_rule(rule(q1, 'a', q0));
        automaton.add_rule(rule(q1, 'b', q1));
        automaton.add_final_state(q1);

        assert!(automaton.recognize(chars("aaaaab")));
        assert!(!automaton.recognize(chars("aaaaaba")));
        assert!(automaton.recognize(chars("bbb")));
    }

    #[test]
    fn recognizes_words_ending_with_ab() {
        let Fixture {
            mut automaton,
            q0,
            q1,
            q2,
        } = fixture();
        automaton.add_rule(rule(q0, 'a', q1));
        automaton.add_rule(rule(q0, 'b', q0));
        automaton.add_rule(rule(q1, 'a', q1));
        automaton.add_rule(rule(q1, 'b', q2));
        automaton.add_rule(rule(q2, 'a', q1));
        automaton.add_rule(rule(q2, 'b', q0));
        automaton.add_final_state(q2);

        assert!(automaton.recognize(chars("aaaaab")));
        assert!(!automaton.recognize(chars("aaaaaba")));
        assert!(!automaton.recognize(chars("bbb")));
    }

    #[test]
    fn recognize_resets_cursor_on_every_outcome() {
        let Fixture {
            mut automaton,
            q0,
            q1,
            ..
        } = fixture();
        automaton.add_rule(rule(q0, 'a', q1));
        automaton.add_final_state(q1);

        assert!(automaton.recognize(chars("a")));
        assert_eq!(automaton.current_state(), q0.id());

        assert!(!automaton.recognize(chars("aa")));
        assert_eq!(automaton.current_state(), q0.id());

        assert!(!automaton.recognize(chars("x")));
        assert_eq!(automaton.current_state(), q0.id());
    }

    #[test]
    fn recognize_restarts_a_moved_cursor() {
        let Fixture {
            mut automaton,
            q0,
            q1,
            ..
        } = fixture();
        automaton.add_rule(rule(q0, 'a', q1));
        automaton.add_final_state(q1);
        automaton.step(&Symbol::new('a'));

        assert!(automaton.recognize(chars("a")));
    }

    #[test]
    fn empty_pattern_depends_on_initial_finality() {
        let Fixture {
            mut automaton, q0, ..
        } = fixture();

        assert!(!automaton.recognize(Vec::new()));
        automaton.add_final_state(q0);
        assert!(automaton.recognize(Vec::new()));
    }

    #[test]
    fn trace_records_path() {
        let Fixture {
            mut automaton,
            q0,
            q1,
            q2,
        } = fixture();
        automaton.add_rule(rule(q0, 'a', q1));
        automaton.add_rule(rule(q1, 'b', q2));
        automaton.add_final_state(q2);

        let run = automaton.trace(chars("ab"));
        assert!(run.is_accepted());
        assert_eq!(run.path(), vec![q0.id(), q1.id(), q2.id()]);
        assert_eq!(automaton.current_state(), q0.id());

        let partial = automaton.trace(chars("ac"));
        assert!(!partial.consumed_all());
        assert!(!partial.is_accepted());
        assert_eq!(partial.last_state(), q1.id());
    }

    #[test]
    fn transitions_from_lists_outgoing_rules() {
        let Fixture {
            mut automaton,
            q0,
            q1,
            q2,
        } = fixture();
        automaton.add_rule(rule(q0, 'b', q2));
        automaton.add_rule(rule(q0, 'a', q1));
        automaton.add_rule(rule(q1, 'a', q2));

        let symbols: Vec<char> = automaton
            .transitions_from(q0.id())
            .map(|rule| *rule.symbol.value())
            .collect();
        assert_eq!(symbols, vec!['a', 'b']);
        assert_eq!(automaton.transitions_from(q2.id()).count(), 0);
    }

    #[test]
    fn reset_discards_everything_but_config() {
        let Fixture {
            automaton, q0, q1, ..
        } = fixture();
        let mut automaton = automaton.with_config(AutomatonConfig::permissive());
        automaton.add_rule(rule(q0, 'a', q1));
        automaton.add_final_state(q1);

        automaton.reset(q1);

        assert_eq!(automaton.initial_state(), &q1);
        assert_eq!(automaton.states().count(), 1);
        assert!(automaton.rules().is_empty());
        assert_eq!(automaton.config(), &AutomatonConfig::permissive());
    }

    #[test]
    fn generic_alphabet_recognizes_token_sequences() {
        let mut registry = StateRegistry::new();
        let mut automaton: FiniteAutomaton<u16> = FiniteAutomaton::new(&mut registry);
        let q0 = *automaton.initial_state();
        let q1 = registry.create(Some(&q0));
        automaton.add_rule(Rule::new(q0, Symbol::new(404), q1));
        automaton.add_rule(Rule::new(q1, Symbol::new(200), q0));
        automaton.add_final_state(q0);

        assert!(automaton.recognize([404, 200, 404, 200]));
        assert!(!automaton.recognize([404]));
        assert!(!automaton.recognize([500]));
    }
}
