//! Same flow as `clusterizer_store_roundtrip.rs`, but against a real `.db`
//! file on disk rather than an in-memory connection — exercising the path
//! `export2db`/`print-clusters` actually take (open, write, close, reopen).

use imgdupl::cluster::{Clusterizer, ClusterizerConfig};
use imgdupl::store;
use rusqlite::Connection;
use std::time::Duration;

#[test]
fn hashes_and_clusters_survive_a_close_and_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("hashes.db");

    {
        let conn = Connection::open(&db_path).unwrap();
        store::hashes::create_table(&conn).unwrap();
        store::hashes::insert(&conn, "240", "/a.jpg").unwrap();
        store::hashes::insert(&conn, "240", "/b.jpg").unwrap();
        store::hashes::insert(&conn, "15", "/c.jpg").unwrap();
    }

    let working_set = {
        let conn = Connection::open(&db_path).unwrap();
        store::hashes::load(&conn).unwrap()
    };
    assert_eq!(working_set.len(), 3);

    let mut driver = Clusterizer::new(
        working_set,
        ClusterizerConfig {
            threshold: 2,
            threads_num: 2,
            compaction_interval: Duration::from_secs(3600),
        },
    );

    let clusters_table = "clusters";
    let conn = Connection::open(&db_path).unwrap();
    store::clusters::validate_table_name(clusters_table).unwrap();
    store::clusters::create_table(&conn, clusters_table).unwrap();

    driver.run(|cluster| {
        let images = cluster
            .entries
            .iter()
            .map(|e| e.image_id.to_string())
            .collect::<Vec<_>>()
            .join(",");
        store::clusters::insert_cluster(
            &conn,
            clusters_table,
            cluster.cluster_id,
            cluster.entries.len() as u32,
            &images,
        )
        .unwrap();
    });

    drop(conn);

    let conn = Connection::open(&db_path).unwrap();
    let row_count: i64 = conn
        .query_row("SELECT COUNT(*) FROM clusters", (), |row| row.get(0))
        .unwrap();
    assert_eq!(row_count, 2);

    let first_images: String = conn
        .query_row(
            "SELECT images FROM clusters WHERE cluster_id = 1",
            (),
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(first_images, "1,2");
}
