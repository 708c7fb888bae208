//! Hand-built Automaton
//!
//! This example assembles a two-state automaton over {a, b} that accepts
//! the words ending with `b`, rule by rule.
//!
//! Key concepts:
//! - States come from an explicit registry
//! - Rules are validated on insertion
//! - The cursor is back at q0 after every recognition
//!
//! Run with: cargo run --example ends_with_b

use seedling::{Rule, StateRegistry, Symbol, WordAutomaton};

fn main() {
    println!("=== Ends-With-b Example ===\n");

    let mut registry = StateRegistry::new();
    let mut automaton = WordAutomaton::new(&mut registry);
    let q0 = *automaton.initial_state();
    let q1 = registry.create(Some(&q0));

    for (source, symbol, destination) in [(q0, 'a', q0), (q0, 'b', q1), (q1, 'a', q0), (q1, 'b', q1)] {
        let rule = Rule::new(source, Symbol::new(symbol), destination);
        let rendered = rule.to_string();
        println!("add {rendered}: {}", automaton.add_rule(rule));
    }
    automaton.add_final_state(q1);

    // Rejected: a second destination for (q0, a)
    println!("add q0 --a--> q1: {}", automaton.add_rule_str(q0, "a", q1));
    // Rejected: not a single character
    println!("add q0 --ab--> q1: {}", automaton.add_rule_str(q0, "ab", q1));

    println!();
    for word in ["aaaaab", "bbb", "aaaaaba", ""] {
        println!("{:>9?} -> {}", word, automaton.recognize(word));
        assert_eq!(automaton.current_state(), q0.id());
    }

    println!("\n=== Example Complete ===");
}
