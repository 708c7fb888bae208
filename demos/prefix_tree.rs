//! Prefix-Tree Acceptor
//!
//! This example builds the prefix-tree acceptor for a handful of words and
//! shows that it accepts exactly those words.
//!
//! Key concepts:
//! - Shared prefixes are walked, not duplicated
//! - The accepted language equals the distinct samples
//! - Recognition traces show the states visited
//!
//! Run with: cargo run --example prefix_tree

use seedling::PrefixTreeBuilder;

fn main() {
    println!("=== Prefix-Tree Acceptor Example ===\n");

    let samples = ["hello", "help", "world", "how", "are", "you", "help"];

    let mut automaton = PrefixTreeBuilder::new()
        .samples(samples)
        .expect("fresh prefix trees accept every sample")
        .build();

    println!("Samples: {:?}", samples);
    println!("States: {}", automaton.states().count());
    println!("Rules: {}", automaton.rules().len());

    if let Some(language) = automaton.language() {
        println!("Language: {:?}", language);
    }

    println!("\nRecognition:");
    for word in ["hello", "help", "hel", "how", "hows", ""] {
        let run = automaton.trace(word);
        let path: Vec<String> = run.path().iter().map(|id| id.to_string()).collect();
        println!(
            "  {:>7?} -> {:<8} path: {}",
            word,
            if run.is_accepted() { "accepted" } else { "rejected" },
            path.join(" ")
        );
    }

    println!("\n=== Example Complete ===");
}
