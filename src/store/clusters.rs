//! The clusters export table: one row per emitted cluster, `images` a
//! comma-joined list of `hashes.id` values. Table name is caller-chosen (the
//! original accepts it as a CLI argument), so the DDL/DML are built with
//! `format!` rather than a fixed literal — never from untrusted input in
//! practice, but see [`validate_table_name`].

use crate::error::{ConfigError, StoreError};
use rusqlite::Connection;

/// Table names come from a trusted CLI argument, not request input, but we
/// still refuse anything that isn't a plausible SQL identifier before
/// splicing it into a statement string.
pub fn validate_table_name(table: &str) -> Result<(), ConfigError> {
    let valid = !table.is_empty()
        && table.chars().next().is_some_and(|c| c.is_alphabetic() || c == '_')
        && table.chars().all(|c| c.is_alphanumeric() || c == '_');

    if valid {
        Ok(())
    } else {
        Err(ConfigError::InvalidDataType(table.to_string()))
    }
}

pub fn create_table(conn: &Connection, table: &str) -> Result<(), StoreError> {
    let sql = format!(
        "CREATE TABLE IF NOT EXISTS {table} (cluster_id INTEGER UNIQUE, count INTEGER, images TEXT)"
    );
    conn.execute(&sql, ()).map_err(StoreError::Write)?;
    Ok(())
}

/// Insert one cluster row. `images` is the comma-joined list of member
/// `hashes.id`s, matching the original's accumulate-then-flush-on-change
/// loop in `fill_clusters_db`.
pub fn insert_cluster(
    conn: &Connection,
    table: &str,
    cluster_id: u64,
    count: u32,
    images: &str,
) -> Result<(), StoreError> {
    let sql = format!("INSERT INTO {table} (cluster_id, count, images) VALUES (?1, ?2, ?3)");
    conn.execute(&sql, (cluster_id, count, images))
        .map_err(StoreError::Write)?;
    Ok(())
}
