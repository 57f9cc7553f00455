//! The `hashes` table: written by `imghash`/`export2db`, read by the
//! clusterizer driver.

use crate::error::StoreError;
use crate::model::ImageRecord;
use crate::text;
use rusqlite::Connection;

pub const CREATE_TABLE_SQL: &str =
    "CREATE TABLE IF NOT EXISTS hashes (id INTEGER PRIMARY KEY AUTOINCREMENT, hash TEXT, path TEXT)";

pub fn create_table(conn: &Connection) -> Result<(), StoreError> {
    conn.execute(CREATE_TABLE_SQL, ())
        .map_err(StoreError::Write)?;
    Ok(())
}

/// Insert one `(hash, path)` row, as `imghash`'s batch writer and
/// `export2db hashes` both do.
pub fn insert(conn: &Connection, hash: &str, path: &str) -> Result<(), StoreError> {
    conn.execute(
        "INSERT INTO hashes (hash, path) VALUES (?1, ?2)",
        (hash, path),
    )
    .map_err(StoreError::Write)?;
    Ok(())
}

/// Load every row into the clusterizer's working set, in `id` order.
///
/// Every word count across rows is expected to agree with the first row
/// read; a store mixing bit budgets (e.g. from two `Hasher` configs) fails
/// fast rather than silently truncating or zero-padding.
pub fn load(conn: &Connection) -> Result<Vec<ImageRecord>, StoreError> {
    let mut stmt = conn
        .prepare("SELECT id, hash FROM hashes ORDER BY id")
        .map_err(StoreError::Read)?;

    let rows = stmt
        .query_map((), |row| {
            let id: i64 = row.get(0)?;
            let hash: String = row.get(1)?;
            Ok((id, hash))
        })
        .map_err(StoreError::Read)?;

    let mut expected_words = None;
    let mut records = Vec::new();

    for row in rows {
        let (id, hash_text) = row.map_err(StoreError::Read)?;
        let fingerprint = text::decode(&hash_text, expected_words)?;
        expected_words.get_or_insert(fingerprint.word_count());
        records.push(ImageRecord::new(id as u32, fingerprint));
    }

    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn memory_db() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        create_table(&conn).unwrap();
        conn
    }

    #[test]
    fn insert_then_load_round_trips() {
        let conn = memory_db();
        insert(&conn, "1,2,3", "/tmp/a.jpg").unwrap();
        insert(&conn, "4,5,6", "/tmp/b.jpg").unwrap();

        let records = load(&conn).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].image_id, 1);
        assert_eq!(records[1].image_id, 2);
        assert_eq!(records[0].fingerprint.words(), &[1, 2, 3]);
    }

    #[test]
    fn empty_table_loads_no_records() {
        let conn = memory_db();
        assert!(load(&conn).unwrap().is_empty());
    }

    #[test]
    fn mismatched_word_count_is_a_fatal_parse_error() {
        let conn = memory_db();
        insert(&conn, "1,2,3", "/tmp/a.jpg").unwrap();
        insert(&conn, "1,2", "/tmp/b.jpg").unwrap();

        assert!(load(&conn).is_err());
    }
}
