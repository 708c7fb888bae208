//! Prefix-tree acceptor construction from positive examples.

use crate::automaton::{AutomatonConfig, WordAutomaton};
use crate::builder::error::BuildError;
use crate::core::{Rule, State, StateId, StateRegistry, Symbol};
use tracing::debug;

/// Builds the minimal prefix tree accepting exactly a set of samples.
///
/// The builder owns the [`StateRegistry`] used for every state it
/// allocates, so ids never collide with another builder's.
///
/// # Example
///
/// ```rust
/// use seedling::builder::PrefixTreeBuilder;
///
/// let mut automaton = PrefixTreeBuilder::new()
///     .samples(["aa", "ab"])
///     .unwrap()
///     .build();
///
/// assert!(automaton.recognize("aa"));
/// assert!(automaton.recognize("ab"));
/// assert!(!automaton.recognize("a"));
/// ```
#[derive(Clone, Debug)]
pub struct PrefixTreeBuilder {
    registry: StateRegistry,
    automaton: WordAutomaton,
    samples: usize,
}

impl PrefixTreeBuilder {
    /// Create a builder with an empty tree rooted at a fresh `q0`.
    pub fn new() -> Self {
        let mut registry = StateRegistry::new();
        let automaton = WordAutomaton::new(&mut registry);
        Self {
            registry,
            automaton,
            samples: 0,
        }
    }

    /// Continue building on top of an existing automaton.
    ///
    /// New states are numbered after the largest id already present.
    pub fn extend(automaton: WordAutomaton) -> Self {
        let last = automaton
            .states()
            .map(State::id)
            .max()
            .unwrap_or(automaton.initial_state().id());
        Self {
            registry: StateRegistry::resume_after(last),
            automaton,
            samples: 0,
        }
    }

    /// Set the automaton configuration.
    pub fn config(mut self, config: AutomatonConfig) -> Self {
        self.automaton = self.automaton.with_config(config);
        self
    }

    /// Add one sample, returning the builder.
    pub fn sample(mut self, sample: &str) -> Result<Self, BuildError> {
        self.insert(sample)?;
        Ok(self)
    }

    /// Add samples in order, returning the builder.
    pub fn samples<I, S>(mut self, samples: I) -> Result<Self, BuildError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for sample in samples {
            self.insert(sample.as_ref())?;
        }
        Ok(self)
    }

    /// Walk `sample` down the tree, reusing existing transitions and
    /// growing new branches where none exist, then mark the end final.
    ///
    /// Returns the final state for `sample`. Inserting a sample twice
    /// changes nothing.
    pub fn insert(&mut self, sample: &str) -> Result<StateId, BuildError> {
        let mut current = *self.automaton.initial_state();
        for c in sample.chars() {
            let existing = self
                .automaton
                .get_rule(current.id(), c)
                .map(|rule| rule.destination);
            current = match existing {
                Some(next) => next,
                None => {
                    let next = self.registry.derive(&current);
                    self.automaton
                        .try_add_rule(Rule::new(current, Symbol::new(c), next))
                        .map_err(|source| BuildError::Rule {
                            sample: sample.to_string(),
                            source,
                        })?;
                    next
                }
            };
        }
        self.automaton.add_final_state(current);
        self.samples += 1;
        debug!(sample, state = %current, "sample inserted");
        Ok(current.id())
    }

    /// Start a new construction epoch: numbering restarts at `q0` and the
    /// tree is discarded. The configuration is kept.
    pub fn reset(&mut self) {
        let config = *self.automaton.config();
        self.registry.reset();
        self.automaton = WordAutomaton::new(&mut self.registry).with_config(config);
        self.samples = 0;
    }

    /// Number of samples inserted, duplicates included.
    pub fn sample_count(&self) -> usize {
        self.samples
    }

    /// The tree built so far.
    pub fn automaton(&self) -> &WordAutomaton {
        &self.automaton
    }

    pub fn build(self) -> WordAutomaton {
        self.automaton
    }
}

impl Default for PrefixTreeBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Build the prefix-tree acceptor for `samples`.
///
/// The resulting automaton accepts exactly the distinct samples. A fresh
/// tree never refuses a sample, so no error is surfaced here; use
/// [`PrefixTreeBuilder`] to observe insertion errors.
///
/// # Example
///
/// ```rust
/// use seedling::build_from_positive_examples;
///
/// let mut automaton = build_from_positive_examples(&["a", "b"]);
/// assert!(automaton.recognize("a"));
/// assert!(!automaton.recognize("ab"));
/// ```
pub fn build_from_positive_examples<S: AsRef<str>>(samples: &[S]) -> WordAutomaton {
    let mut builder = PrefixTreeBuilder::new();
    for sample in samples {
        if let Err(err) = builder.insert(sample.as_ref()) {
            tracing::warn!(error = %err, "sample skipped");
        }
    }
    builder.build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::automaton::RuleError;

    #[test]
    fn single_letters_are_accepted_exactly() {
        let mut automaton = build_from_positive_examples(&["a", "b"]);

        assert!(automaton.recognize("a"));
        assert!(automaton.recognize("b"));
        assert!(!automaton.recognize(""));
        assert!(!automaton.recognize("ab"));
        assert!(!automaton.recognize("c"));
    }

    #[test]
    fn shared_prefix_is_reused() {
        let mut automaton = build_from_positive_examples(&["aa", "ab"]);

        assert!(automaton.recognize("aa"));
        assert!(automaton.recognize("ab"));
        assert!(!automaton.recognize("a"));
        assert!(!automaton.recognize("b"));
        assert!(!automaton.recognize("aaa"));

        // q0 -a-> q1, q1 -a-> q2, q1 -b-> q3
        assert_eq!(automaton.states().count(), 4);
        assert_eq!(automaton.rules().len(), 3);
    }

    #[test]
    fn every_word_of_a_sentence_is_accepted() {
        let words = ["hello", "world", "how", "are", "you"];
        let mut automaton = build_from_positive_examples(&words);

        for word in words {
            assert!(automaton.recognize(word), "{word} should be accepted");
        }
        assert!(!automaton.recognize("he"));
        assert!(!automaton.recognize("hows"));
    }

    #[test]
    fn repeated_samples_are_idempotent() {
        let once = build_from_positive_examples(&["abc"]);
        let twice = build_from_positive_examples(&["abc", "abc", "ab", "abc"]);

        assert_eq!(once.rules().len(), 3);
        assert_eq!(twice.rules().len(), 3);
        assert_eq!(twice.states().count(), 4);
        assert_eq!(twice.final_states().count(), 2);
    }

    #[test]
    fn empty_sample_marks_root_final() {
        let mut automaton = build_from_positive_examples(&["", "x"]);

        assert!(automaton.recognize(""));
        assert!(automaton.recognize("x"));
        assert!(automaton.is_final(automaton.initial_state().id()));
    }

    #[test]
    fn empty_sample_list_rejects_everything() {
        let mut automaton = build_from_positive_examples::<&str>(&[]);

        assert!(!automaton.recognize(""));
        assert!(!automaton.recognize("a"));

        let root = *automaton.initial_state();
        automaton.add_final_state(root);
        assert!(automaton.recognize(""));
        assert!(!automaton.recognize("a"));
    }

    #[test]
    fn new_states_descend_from_root() {
        let automaton = build_from_positive_examples(&["abc", "abd"]);
        let root = automaton.initial_state().id();

        for state in automaton.states().filter(|s| s.id() != root) {
            assert_eq!(state.ancestor(), Some(root));
        }
    }

    #[test]
    fn language_equals_distinct_samples() {
        let automaton = build_from_positive_examples(&["to", "tea", "ted", "ten", "to", "i", "in"]);

        let language: Vec<String> = automaton.language().unwrap().into_iter().collect();
        assert_eq!(language, vec!["i", "in", "tea", "ted", "ten", "to"]);
    }

    #[test]
    fn insert_returns_final_state() {
        let mut builder = PrefixTreeBuilder::new();
        let first = builder.insert("ab").unwrap();
        let again = builder.insert("ab").unwrap();

        assert_eq!(first, again);
        assert_eq!(builder.sample_count(), 2);
        assert!(builder.automaton().is_final(first));
    }

    #[test]
    fn reset_starts_new_epoch() {
        let mut builder = PrefixTreeBuilder::new()
            .config(AutomatonConfig::permissive())
            .sample("abc")
            .unwrap();

        builder.reset();

        assert_eq!(builder.sample_count(), 0);
        assert_eq!(builder.automaton().states().count(), 1);
        assert_eq!(builder.automaton().initial_state().id().get(), 0);
        assert_eq!(
            builder.automaton().config(),
            &AutomatonConfig::permissive()
        );
    }

    #[test]
    fn extend_grows_existing_automaton() {
        let base = build_from_positive_examples(&["ab"]);
        let mut automaton = PrefixTreeBuilder::extend(base)
            .samples(["ac", "b"])
            .unwrap()
            .build();

        assert!(automaton.recognize("ab"));
        assert!(automaton.recognize("ac"));
        assert!(automaton.recognize("b"));
        assert!(!automaton.recognize("a"));
        assert!(automaton.check_invariants().is_success());
    }

    #[test]
    fn extend_numbers_after_existing_states() {
        let mut registry = StateRegistry::new();
        let mut base = WordAutomaton::new(&mut registry);
        let q0 = *base.initial_state();
        let q1 = registry.create(None);
        base.add_rule(Rule::new(q0, Symbol::new('a'), q1));

        let mut builder = PrefixTreeBuilder::extend(base);
        let end = builder.insert("ab").unwrap();

        assert_eq!(end, StateId::new(2));
        // q1 has no ancestor, so it roots the lineage of its new child
        let state = builder.automaton().state(end).unwrap();
        assert_eq!(state.ancestor(), Some(q1.id()));
        assert!(builder.automaton().check_invariants().is_success());
    }

    #[test]
    fn build_error_names_the_sample() {
        let err = BuildError::Rule {
            sample: "ab".to_string(),
            source: RuleError::Duplicate {
                rule: "q0 --a--> q1".to_string(),
            },
        };

        assert_eq!(
            err.to_string(),
            "Sample \"ab\" could not be inserted: Rule q0 --a--> q1 is already present"
        );
    }
}
