//! A5: SQLite persistence (bundled `rusqlite`) for the hashes and clusters
//! tables described in spec.md §6.

pub mod clusters;
pub mod hashes;
