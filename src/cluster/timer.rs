//! C9: a periodic signaller that sets "please compact after the next
//! cluster" on each tick, cancellable on driver shutdown.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Condvar, Mutex};
use std::thread::{self, JoinHandle};
use std::time::Duration;

/// Handle to a running compaction timer thread.
pub struct CompactionTimer {
    shutdown: Arc<(Mutex<bool>, Condvar)>,
    handle: Option<JoinHandle<()>>,
}

impl CompactionTimer {
    /// Spawn a timer that sets `deflate` every `period`, until shut down.
    pub fn spawn(period: Duration, deflate: Arc<AtomicBool>) -> Self {
        let shutdown = Arc::new((Mutex::new(false), Condvar::new()));
        let shutdown_for_thread = shutdown.clone();

        let handle = thread::Builder::new()
            .name("imgdupl-compaction-timer".into())
            .spawn(move || {
                let (lock, cv) = &*shutdown_for_thread;
                let mut guard = lock.lock().expect("timer shutdown mutex poisoned");
                loop {
                    let (g, timeout) = cv
                        .wait_timeout(guard, period)
                        .expect("timer shutdown condvar poisoned");
                    guard = g;
                    if *guard {
                        break;
                    }
                    if timeout.timed_out() {
                        deflate.store(true, Ordering::SeqCst);
                    }
                }
            })
            .expect("failed to spawn compaction timer thread");

        Self {
            shutdown,
            handle: Some(handle),
        }
    }

    /// Signal the timer to exit and join it. Safe to call once; dropping
    /// without calling this also shuts the timer down cleanly.
    pub fn stop(mut self) {
        self.stop_inner();
    }

    fn stop_inner(&mut self) {
        let (lock, cv) = &*self.shutdown;
        {
            let mut guard = lock.lock().expect("timer shutdown mutex poisoned");
            *guard = true;
        }
        cv.notify_one();
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

impl Drop for CompactionTimer {
    fn drop(&mut self) {
        if self.handle.is_some() {
            self.stop_inner();
        }
    }
}
