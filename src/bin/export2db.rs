//! `export2db <hashes|clusters> <data_file> <db_file> [<clusters_table>]` —
//! imports a text file of hash lines or cluster-stream lines into SQLite.

use anyhow::{bail, Context, Result};
use clap::Parser;
use imgdupl::store;
use rusqlite::Connection;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::PathBuf;

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
enum DataType {
    Hashes,
    Clusters,
}

/// Import a hash file or a cluster stream into a SQLite database.
#[derive(Parser, Debug)]
#[command(name = "export2db", about = "Import hashes or clusters into SQLite")]
struct Args {
    /// Either "hashes" or "clusters".
    data_type: DataType,

    /// File with data to import.
    data_file: PathBuf,

    /// SQLite database file.
    db_file: PathBuf,

    /// Name of the clusters table (required when data_type is "clusters").
    clusters_table: Option<String>,
}

fn main() -> Result<()> {
    imgdupl::logging::init(false);
    let args = Args::parse();

    let conn = Connection::open(&args.db_file)
        .with_context(|| format!("opening {}", args.db_file.display()))?;

    match args.data_type {
        DataType::Hashes => import_hashes(&conn, &args.data_file),
        DataType::Clusters => {
            let table = args
                .clusters_table
                .context("clusters export requires a table name")?;
            import_clusters(&conn, &args.data_file, &table)
        }
    }
}

fn import_hashes(conn: &Connection, data_file: &PathBuf) -> Result<()> {
    store::hashes::create_table(conn)?;

    let file = File::open(data_file).with_context(|| format!("opening {}", data_file.display()))?;
    let tx = conn.unchecked_transaction().context("starting transaction")?;

    for line in BufReader::new(file).lines() {
        let line = line.context("reading data file")?;
        let (hash, path) = imgdupl::text::split_hash_line(&line)?;
        store::hashes::insert(&tx, hash, path)?;
    }

    tx.commit().context("committing transaction")?;
    Ok(())
}

fn import_clusters(conn: &Connection, data_file: &PathBuf, table: &str) -> Result<()> {
    store::clusters::validate_table_name(table)?;
    store::clusters::create_table(conn, table)?;

    let file = File::open(data_file).with_context(|| format!("opening {}", data_file.display()))?;
    let tx = conn.unchecked_transaction().context("starting transaction")?;

    let mut prev_cluster_id: Option<u64> = None;
    let mut images = String::new();
    let mut count = 0u32;

    for line in BufReader::new(file).lines() {
        let line = line.context("reading data file")?;
        let Some((image_id, cluster_id)) = line.split_once('\t') else {
            bail!("malformed cluster line, expected \"<image_id>\\t<cluster_id>\": {line:?}");
        };
        let cluster_id: u64 = cluster_id.parse().context("parsing cluster_id")?;

        match prev_cluster_id {
            Some(prev) if prev != cluster_id => {
                store::clusters::insert_cluster(&tx, table, prev, count, &images)?;
                images = image_id.to_string();
                count = 1;
            }
            _ => {
                if images.is_empty() {
                    images = image_id.to_string();
                } else {
                    images.push(',');
                    images.push_str(image_id);
                }
                count += 1;
            }
        }

        prev_cluster_id = Some(cluster_id);
    }

    if let Some(cluster_id) = prev_cluster_id {
        store::clusters::insert_cluster(&tx, table, cluster_id, count, &images)?;
    }

    tx.commit().context("committing transaction")?;
    Ok(())
}
