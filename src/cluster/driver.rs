//! C6: the single-threaded outer loop that seeds clusters, fans work out to
//! the worker pool, joins by count, and triggers periodic compaction.

use crate::cluster::compactor::compactify;
use crate::cluster::task::{SlicePtr, Task};
use crate::cluster::timer::CompactionTimer;
use crate::cluster::worker::{spawn_pool, ResultQueue};
use crate::model::{Cluster, ClusterEntry, ImageRecord};
use crate::queue::ConcurrentQueue;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::JoinHandle;
use std::time::Duration;

/// Fan-out splits a residual only once it's large enough to pay the
/// synchronization cost; below this, a single slice avoids pointless thread
/// handoffs (spec.md §4.6).
const FAN_OUT_THRESHOLD_PER_THREAD: usize = 1000;

pub struct ClusterizerConfig {
    pub threshold: u32,
    pub threads_num: usize,
    pub compaction_interval: Duration,
}

impl Default for ClusterizerConfig {
    fn default() -> Self {
        Self {
            threshold: 10,
            threads_num: 4,
            compaction_interval: Duration::from_secs(60),
        }
    }
}

pub struct Clusterizer {
    working_set: Vec<ImageRecord>,
    cur: usize,
    cluster_id: u64,
    threshold: u32,
    threads_num: usize,
    pending: Arc<ConcurrentQueue<Task>>,
    done: Arc<ResultQueue>,
    pool: Vec<JoinHandle<()>>,
    deflate: Arc<AtomicBool>,
    timer: Option<CompactionTimer>,
}

impl Clusterizer {
    pub fn new(working_set: Vec<ImageRecord>, config: ClusterizerConfig) -> Self {
        let pending = Arc::new(ConcurrentQueue::new());
        let done = Arc::new(ConcurrentQueue::new());
        let pool = spawn_pool(config.threads_num, pending.clone(), done.clone());

        let deflate = Arc::new(AtomicBool::new(false));
        let timer = CompactionTimer::spawn(config.compaction_interval, deflate.clone());

        Self {
            working_set,
            cur: 0,
            cluster_id: 0,
            threshold: config.threshold,
            threads_num: config.threads_num,
            pending,
            done,
            pool,
            deflate,
            timer: Some(timer),
        }
    }

    pub fn cluster_count(&self) -> u64 {
        self.cluster_id
    }

    /// Run the outer loop to completion, invoking `emit` once per cluster in
    /// strictly increasing `cluster_id` order. Streams rather than buffers:
    /// `emit` is called inline as each cluster finishes, the same shape as
    /// the original's `output_cluster` call inline in the loop.
    pub fn run(&mut self, mut emit: impl FnMut(&Cluster)) {
        loop {
            if self.cur >= self.working_set.len() {
                break;
            }

            let skip = self.working_set[self.cur].processed
                || self.working_set[self.cur].fingerprint.is_absent_sentinel();
            if skip {
                self.cur += 1;
                continue;
            }

            let seed_hash = self.working_set[self.cur].fingerprint.clone();
            let seed_id = self.working_set[self.cur].image_id;

            let mut entries = vec![ClusterEntry {
                fingerprint: seed_hash.clone(),
                image_id: seed_id,
            }];
            self.working_set[self.cur].processed = true;
            self.cur += 1;

            if self.cur >= self.working_set.len() {
                self.emit_cluster(entries, &mut emit);
                break;
            }

            let slice_count = self.fan_out_slice_count();
            let joined = self.dispatch_and_join(&seed_hash, slice_count);
            entries.extend(joined);

            self.emit_cluster(entries, &mut emit);
            self.compact_if_requested();
        }
    }

    fn fan_out_slice_count(&self) -> usize {
        let residual_len = self.working_set.len() - self.cur;
        if residual_len > self.threads_num * FAN_OUT_THRESHOLD_PER_THREAD {
            self.threads_num
        } else {
            1
        }
    }

    /// Split the residual into `slice_count` contiguous slices (the last
    /// absorbing the remainder), push one scan task per slice, then block
    /// until exactly that many results have arrived on `done`.
    fn dispatch_and_join(&mut self, seed: &crate::model::PHash, slice_count: usize) -> Vec<ClusterEntry> {
        let end_of_residual = self.working_set.len();
        let bounds = slice_bounds(self.cur, end_of_residual, slice_count);

        for (begin, end) in bounds {
            let slice = SlicePtr::new(&mut self.working_set[begin..end]);
            self.pending.push(Task::Scan {
                seed: seed.clone(),
                threshold: self.threshold,
                slice,
            });
        }

        let mut joined = Vec::new();
        for _ in 0..slice_count {
            let mut result = self.done.wait_and_pop();
            joined.append(&mut result);
        }
        joined
    }

    fn emit_cluster(&mut self, entries: Vec<ClusterEntry>, emit: &mut impl FnMut(&Cluster)) {
        self.cluster_id += 1;
        let cluster = Cluster {
            cluster_id: self.cluster_id,
            entries,
        };
        emit(&cluster);
    }

    fn compact_if_requested(&mut self) {
        if self.deflate.swap(false, Ordering::SeqCst) {
            self.working_set = compactify(&self.working_set[self.cur..]);
            self.cur = 0;
        }
    }
}

/// Split `[begin, end)` into `slice_count` contiguous `(begin, end)` ranges
/// of length `(end - begin) / slice_count` each, except the last range,
/// which absorbs whatever remainder the division drops (spec.md §4.6:
/// "the last slice absorbs the remainder" is normative).
fn slice_bounds(begin: usize, end: usize, slice_count: usize) -> Vec<(usize, usize)> {
    let residual_len = end - begin;
    let job_length = residual_len / slice_count;

    let mut bounds = Vec::with_capacity(slice_count);
    let mut slice_begin = begin;
    for i in 0..slice_count {
        let slice_end = if i == slice_count - 1 { end } else { slice_begin + job_length };
        bounds.push((slice_begin, slice_end));
        slice_begin = slice_end;
    }
    bounds
}

impl Drop for Clusterizer {
    fn drop(&mut self) {
        for _ in 0..self.pool.len() {
            self.pending.push(Task::Shutdown);
        }
        for handle in self.pool.drain(..) {
            let _ = handle.join();
        }
        if let Some(timer) = self.timer.take() {
            timer.stop();
        }
    }
}
