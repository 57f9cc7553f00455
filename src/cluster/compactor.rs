//! C8: rebuild the working set containing only still-unprocessed records.

use crate::model::ImageRecord;

/// Produce a fresh sequence containing exactly the records in `records`
/// whose `processed` flag is false, preserving relative order. The caller
/// must treat every prior index into `records` as invalidated.
pub fn compactify(records: &[ImageRecord]) -> Vec<ImageRecord> {
    records.iter().filter(|r| !r.processed).cloned().collect()
}
