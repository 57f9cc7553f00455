//! `clusterizer <hashes.db> <threshold> <threads>` — the Clusterizer Driver
//! binary: groups fingerprints loaded from a SQLite hashes table within a
//! Hamming-distance threshold, streaming `<image_id>\t<cluster_id>` lines.

use anyhow::{Context, Result};
use clap::Parser;
use imgdupl::cluster::{Clusterizer, ClusterizerConfig};
use imgdupl::store;
use rusqlite::Connection;
use std::io::{self, Write};
use std::path::PathBuf;
use std::time::Duration;

/// Group perceptually similar images loaded from a hashes database.
#[derive(Parser, Debug)]
#[command(name = "clusterizer", about = "Cluster perceptual hashes by Hamming distance")]
struct Args {
    /// SQLite database with perceptual hashes.
    data: PathBuf,

    /// Maximum Hamming distance between a seed and a cluster member.
    #[arg(value_parser = clap::value_parser!(u32).range(1..))]
    threshold: u32,

    /// Number of worker threads to run.
    #[arg(value_parser = clap::value_parser!(usize).range(1..))]
    threads: usize,

    /// Seconds between compaction sweeps of the working set.
    #[arg(long, default_value_t = 60)]
    compaction_interval_secs: u64,
}

fn main() -> Result<()> {
    imgdupl::logging::init(false);
    let args = Args::parse();

    let conn = Connection::open(&args.data)
        .with_context(|| format!("opening {}", args.data.display()))?;
    let working_set = store::hashes::load(&conn).context("loading hashes from store")?;

    let config = ClusterizerConfig {
        threshold: args.threshold,
        threads_num: args.threads,
        compaction_interval: Duration::from_secs(args.compaction_interval_secs),
    };

    let mut driver = Clusterizer::new(working_set, config);
    let stdout = io::stdout();
    let mut out = stdout.lock();

    driver.run(|cluster| {
        for entry in &cluster.entries {
            let _ = writeln!(out, "{}\t{}", entry.image_id, cluster.cluster_id);
            let _ = out.flush();
        }
    });

    Ok(())
}
