//! `distance <hash1> <hash2>` — print the Hamming distance between two
//! comma-encoded fingerprints. A small debugging/ops utility.

use anyhow::{Context, Result};
use clap::Parser;
use imgdupl::{distance, text};

#[derive(Parser, Debug)]
#[command(name = "distance", about = "Hamming distance between two encoded fingerprints")]
struct Args {
    hash1: String,
    hash2: String,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let a = text::decode(&args.hash1, None).context("parsing hash1")?;
    let b = text::decode(&args.hash2, None).context("parsing hash2")?;

    if a.word_count() != b.word_count() {
        anyhow::bail!(
            "hashes have different word counts ({} vs {})",
            a.word_count(),
            b.word_count()
        );
    }

    println!("Hamming distance: {}", distance::hamming(&a, &b));
    Ok(())
}
