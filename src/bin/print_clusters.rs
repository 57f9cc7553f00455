//! `print-clusters --db-file <f> --table <t> [--min-size <n>]` — renders
//! clusters (joined against `hashes.path`) as indented JSON.

use anyhow::{Context, Result};
use clap::Parser;
use rusqlite::Connection;
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Render clusters of perceptually similar images as JSON.
#[derive(Parser, Debug)]
#[command(name = "print-clusters", about = "Print clusters of perceptually similar images")]
struct Args {
    /// SQLite database file.
    #[arg(short = 'd', long = "db-file")]
    db_file: PathBuf,

    /// Name of the table with clusters in the database.
    #[arg(short = 't', long = "table")]
    table: String,

    /// Minimal cluster size.
    #[arg(short = 's', long = "min-size", default_value_t = 1)]
    min_size: i64,
}

/// A cluster keyed by its id, for the same one-map-per-cluster JSON shape
/// the original `print-clusters.cpp` produces with nlohmann::json.
#[derive(Serialize)]
struct RenderedCluster(BTreeMap<String, Vec<String>>);

fn main() -> Result<()> {
    imgdupl::logging::init(false);
    let args = Args::parse();

    imgdupl::store::clusters::validate_table_name(&args.table)?;

    let conn = Connection::open_with_flags(&args.db_file, rusqlite::OpenFlags::SQLITE_OPEN_READ_ONLY)
        .with_context(|| format!("opening {}", args.db_file.display()))?;

    let clusters = load_clusters(&conn, &args.table, args.min_size)?;

    let json = serde_json::to_string_pretty(&clusters)?;
    println!("{json}");

    Ok(())
}

fn load_clusters(conn: &Connection, table: &str, min_size: i64) -> Result<Vec<RenderedCluster>> {
    let sql = format!("SELECT cluster_id, images FROM {table} WHERE count >= ?1");
    let mut stmt = conn.prepare(&sql)?;

    let mut select_path = conn.prepare("SELECT path FROM hashes WHERE id = ?1")?;

    let rows = stmt.query_map([min_size], |row| {
        let cluster_id: i64 = row.get(0)?;
        let images: String = row.get(1)?;
        Ok((cluster_id, images))
    })?;

    let mut clusters = Vec::new();

    for row in rows {
        let (cluster_id, images) = row?;
        let mut paths = Vec::new();

        for id in images.split(',') {
            let image_id: i64 = id.parse().context("parsing image id in cluster's images column")?;
            let path: String = select_path.query_row([image_id], |row| row.get(0))?;
            paths.push(path);
        }

        let mut cluster = BTreeMap::new();
        cluster.insert(cluster_id.to_string(), paths);
        clusters.push(RenderedCluster(cluster));
    }

    Ok(clusters)
}
