//! C7: the worker pool. Long-lived threads loop on `pending.wait_and_pop()`
//! and never terminate until a `Task::Shutdown` poison pill arrives.

use crate::cluster::task::Task;
use crate::distance::within;
use crate::model::{ClusterEntry, ImageRecord};
use crate::queue::ConcurrentQueue;
use std::panic;
use std::sync::Arc;
use std::thread::{self, JoinHandle};

pub type ResultQueue = ConcurrentQueue<Vec<ClusterEntry>>;

/// Scan `records` in order, absorbing every not-yet-processed record within
/// `threshold` of `seed` into the returned entries and marking it processed.
///
/// Different workers operate on disjoint slices, so this shared mutation of
/// `processed` is race-free by construction — no per-record lock needed
/// (spec.md §4.7).
fn scan_slice(seed: &crate::model::PHash, threshold: u32, records: &mut [ImageRecord]) -> Vec<ClusterEntry> {
    let mut entries = Vec::new();
    for record in records.iter_mut() {
        if !record.processed && within(seed, &record.fingerprint, threshold) {
            entries.push(ClusterEntry {
                fingerprint: record.fingerprint.clone(),
                image_id: record.image_id,
            });
            record.processed = true;
        }
    }
    entries
}

/// Spawn `threads_num` long-lived worker threads.
///
/// A worker task panicking is fatal to the whole process (spec.md §7): we
/// catch the unwind only long enough to log a diagnostic before aborting,
/// there is no partial-result recovery.
pub fn spawn_pool(threads_num: usize, pending: Arc<ConcurrentQueue<Task>>, done: Arc<ResultQueue>) -> Vec<JoinHandle<()>> {
    (0..threads_num)
        .map(|id| {
            let pending = pending.clone();
            let done = done.clone();
            thread::Builder::new()
                .name(format!("imgdupl-worker-{id}"))
                .spawn(move || worker_loop(&pending, &done))
                .expect("failed to spawn worker thread")
        })
        .collect()
}

fn worker_loop(pending: &ConcurrentQueue<Task>, done: &ResultQueue) {
    loop {
        match pending.wait_and_pop() {
            Task::Shutdown => break,
            Task::Scan { seed, threshold, slice } => {
                let result = panic::catch_unwind(panic::AssertUnwindSafe(|| {
                    // SAFETY: the driver guarantees this slice is disjoint
                    // from every other outstanding task's slice and that the
                    // working set's layout is frozen until all of this
                    // cluster's tasks report back (see task.rs).
                    let records = unsafe { slice.as_mut_slice() };
                    scan_slice(&seed, threshold, records)
                }));

                match result {
                    Ok(entries) => done.push(entries),
                    Err(payload) => {
                        tracing::error!("worker thread panicked scanning a cluster slice: {payload:?}");
                        std::process::abort();
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::PHash;
    use smallvec::smallvec;

    #[test]
    fn scan_absorbs_within_threshold_and_marks_processed() {
        let seed = PHash::from_words(smallvec![0x00u64]);
        let mut records = vec![
            ImageRecord::new(1, PHash::from_words(smallvec![0x00u64])),
            ImageRecord::new(2, PHash::from_words(smallvec![0x03u64])),
            ImageRecord::new(3, PHash::from_words(smallvec![0x0Fu64])),
        ];

        let entries = scan_slice(&seed, 2, &mut records);

        assert_eq!(entries.len(), 2);
        assert!(records[0].processed);
        assert!(records[1].processed);
        assert!(!records[2].processed);
    }

    #[test]
    fn scan_skips_already_processed_records() {
        let seed = PHash::from_words(smallvec![0x00u64]);
        let mut records = vec![ImageRecord::new(1, PHash::from_words(smallvec![0x00u64]))];
        records[0].processed = true;

        let entries = scan_slice(&seed, 5, &mut records);
        assert!(entries.is_empty());
    }
}
