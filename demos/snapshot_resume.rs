//! Snapshot and Resume
//!
//! This example snapshots a prefix tree, writes it to disk, then restores
//! it and keeps growing it with new samples.
//!
//! Key concepts:
//! - Serialization formats (JSON for readability, binary for compactness)
//! - Atomic writes to prevent corruption
//! - Restore re-validates every structural invariant
//!
//! Run with: cargo run --example snapshot_resume

use seedling::{build_from_positive_examples, PrefixTreeBuilder, Snapshot};
use std::fs;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== Snapshot and Resume Example ===\n");

    let automaton = build_from_positive_examples(&["GET", "GETS", "POST"]);
    let snapshot = automaton.snapshot();

    let dir = std::env::temp_dir().join("seedling-snapshots");
    fs::create_dir_all(&dir)?;
    let path = dir.join(format!("snapshot-{}.json", snapshot.id));

    // Atomic write: write to temp file, then rename
    let temp_path = path.with_extension("json.tmp");
    fs::write(&temp_path, snapshot.to_json()?)?;
    fs::rename(&temp_path, &path)?;
    println!("  [Snapshot] Saved to {}", path.display());
    println!(
        "  [Snapshot] Binary size: {} bytes",
        snapshot.to_binary()?.len()
    );

    let json = fs::read_to_string(&path)?;
    let restored = Snapshot::<char>::from_json(&json)?.restore_word()?;
    println!("  [Snapshot] Restored {} states", restored.states().count());

    let mut resumed = PrefixTreeBuilder::extend(restored)
        .samples(["PUT", "PATCH"])?
        .build();

    for word in ["GET", "POST", "PUT", "PATCH", "DELETE"] {
        println!("{:>8} -> {}", word, resumed.recognize(word));
    }

    fs::remove_file(&path)?;
    println!("\n=== Example Complete ===");
    Ok(())
}
