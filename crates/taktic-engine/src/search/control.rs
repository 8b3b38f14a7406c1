//! Search control: cancellation flag and deadline.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

/// Nodes between clock checks, minus one.
const POLL_MASK: u64 = 1023;

/// Decides when a running search must give up.
///
/// The searcher polls [`should_stop`](Self::should_stop) every 1024 nodes
/// while an iteration deeper than one is running; depth 1 is never
/// interrupted. Between iterations the driver asks
/// [`should_stop_iterating`](Self::should_stop_iterating).
#[derive(Debug)]
pub struct SearchControl {
    stopped: Arc<AtomicBool>,
    start: Instant,
    deadline: Option<Duration>,
}

impl SearchControl {
    /// No deadline; only the external stop flag ends the search early.
    pub fn new_infinite(stopped: Arc<AtomicBool>) -> Self {
        Self {
            stopped,
            start: Instant::now(),
            deadline: None,
        }
    }

    /// Give up once `limit` has elapsed; the clock starts now.
    pub fn new_timed(stopped: Arc<AtomicBool>, limit: Duration) -> Self {
        Self {
            stopped,
            start: Instant::now(),
            deadline: Some(limit),
        }
    }

    /// Control with a private flag and no deadline.
    pub fn unbounded() -> Self {
        Self::new_infinite(Arc::new(AtomicBool::new(false)))
    }

    /// Request cancellation.
    pub fn stop(&self) {
        self.stopped.store(true, Ordering::Release);
    }

    /// Whether cancellation was requested or the deadline passed.
    ///
    /// The clock is only read when `nodes` is a multiple of 1024. A passed
    /// deadline latches the stop flag so later calls return immediately.
    pub fn should_stop(&self, nodes: u64) -> bool {
        if self.stopped.load(Ordering::Relaxed) {
            return true;
        }

        if nodes & POLL_MASK != 0 {
            return false;
        }

        if let Some(limit) = self.deadline
            && self.elapsed() >= limit
        {
            self.stopped.store(true, Ordering::Release);
            return true;
        }

        false
    }

    /// Whether iterative deepening should not start another iteration.
    pub fn should_stop_iterating(&self) -> bool {
        if self.stopped.load(Ordering::Relaxed) {
            return true;
        }
        self.deadline.is_some_and(|limit| self.elapsed() >= limit)
    }

    /// Time since this control was created.
    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    /// Reference to the shared stop flag.
    pub fn stop_flag(&self) -> &Arc<AtomicBool> {
        &self.stopped
    }
}
