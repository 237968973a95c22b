//! Decode progress observation.
//!
//! The decoder owns the only writer; any number of readers may poll. Both
//! counters are monotonic within a decode, so relaxed atomics suffice.
//! The background [`Reporter`] is strictly cosmetic: it never touches
//! decode state and is joined deterministically when stopped or dropped,
//! so no poller outlives the decode that spawned it.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Condvar, Mutex};
use std::thread::{self, JoinHandle};
use std::time::Duration;

/// Shared bits-consumed / bits-total counters for a decode in flight.
#[derive(Clone, Debug, Default)]
pub struct Progress {
    inner: Arc<Counters>,
}

#[derive(Debug, Default)]
struct Counters {
    consumed: AtomicU64,
    total: AtomicU64,
}

impl Progress {
    /// Fresh counters, both zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the total meaningful bits and reset consumption. Called by
    /// the decoder before it reads the first bit.
    pub fn start(&self, total_bits: u64) {
        self.inner.total.store(total_bits, Ordering::Relaxed);
        self.inner.consumed.store(0, Ordering::Relaxed);
    }

    /// Advance the consumed-bit counter.
    pub fn advance(&self, bits: u64) {
        self.inner.consumed.fetch_add(bits, Ordering::Relaxed);
    }

    /// Bits consumed so far.
    pub fn bits_consumed(&self) -> u64 {
        self.inner.consumed.load(Ordering::Relaxed)
    }

    /// Total meaningful bits in the payload being decoded.
    pub fn total_bits(&self) -> u64 {
        self.inner.total.load(Ordering::Relaxed)
    }
}

/// A background thread that reports progress on a fixed interval.
///
/// The callback receives `(consumed, total)` bit counts. Stopping wakes
/// the thread immediately rather than waiting out the interval.
pub struct Reporter {
    stop: Arc<(Mutex<bool>, Condvar)>,
    handle: Option<JoinHandle<()>>,
}

impl Reporter {
    /// Spawn a poller over `progress` that invokes `report` every
    /// `interval` until stopped.
    pub fn spawn<F>(progress: Progress, interval: Duration, mut report: F) -> Self
    where
        F: FnMut(u64, u64) + Send + 'static,
    {
        let stop = Arc::new((Mutex::new(false), Condvar::new()));
        let shared = Arc::clone(&stop);

        let handle = thread::Builder::new()
            .name("huff-progress".into())
            .spawn(move || {
                let (lock, condvar) = &*shared;
                let mut stopped = lock.lock().unwrap();
                // The flag is checked while holding the lock, so a stop
                // raised before the first wait is never missed.
                while !*stopped {
                    let (next, timeout) = condvar.wait_timeout(stopped, interval).unwrap();
                    stopped = next;
                    if !*stopped && timeout.timed_out() {
                        report(progress.bits_consumed(), progress.total_bits());
                    }
                }
            })
            .expect("failed to spawn progress reporter thread");

        Self {
            stop,
            handle: Some(handle),
        }
    }

    /// Stop the poller and wait for it to exit.
    pub fn stop(mut self) {
        self.shutdown();
    }

    fn shutdown(&mut self) {
        if let Some(handle) = self.handle.take() {
            let (lock, condvar) = &*self.stop;
            *lock.lock().unwrap() = true;
            condvar.notify_all();
            let _ = handle.join();
        }
    }
}

impl Drop for Reporter {
    fn drop(&mut self) {
        self.shutdown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;

    #[test]
    fn test_counters_track_consumption() {
        let progress = Progress::new();
        progress.start(100);
        assert_eq!(progress.total_bits(), 100);
        assert_eq!(progress.bits_consumed(), 0);
        progress.advance(30);
        progress.advance(20);
        assert_eq!(progress.bits_consumed(), 50);
    }

    #[test]
    fn test_clones_share_counters() {
        let progress = Progress::new();
        let observer = progress.clone();
        progress.start(10);
        progress.advance(7);
        assert_eq!(observer.bits_consumed(), 7);
        assert_eq!(observer.total_bits(), 10);
    }

    #[test]
    fn test_reporter_polls_and_stops() {
        let progress = Progress::new();
        progress.start(8);
        progress.advance(8);

        let calls = Arc::new(AtomicUsize::new(0));
        let seen = Arc::clone(&calls);
        let reporter = Reporter::spawn(
            progress,
            Duration::from_millis(5),
            move |consumed, total| {
                assert_eq!((consumed, total), (8, 8));
                seen.fetch_add(1, Ordering::SeqCst);
            },
        );

        thread::sleep(Duration::from_millis(40));
        reporter.stop();
        assert!(calls.load(Ordering::SeqCst) >= 1);
    }

    #[test]
    fn test_reporter_stops_promptly_on_drop() {
        let reporter = Reporter::spawn(Progress::new(), Duration::from_secs(3600), |_, _| {
            panic!("poller fired despite immediate drop");
        });
        // Dropping must join well before the hour-long interval elapses.
        drop(reporter);
    }
}
