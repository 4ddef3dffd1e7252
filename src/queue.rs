//! # Bounded work queue and in-flight accounting.
//!
//! [`WorkQueue`] is the hand-off between the producer and the worker pool: a
//! bounded MPMC FIFO where a full queue parks the producer (backpressure)
//! and an empty queue returns control to workers after a timeout so they can
//! re-check the goal.
//!
//! ```text
//! Producer ── push().await ──► [ c1 c2 c3 .. ] ── pull(wait).await ──► Worker × W
//!             (parks when full)   bounded FIFO      (Empty after `wait`)
//! ```
//!
//! ## Rules
//! - Capacity is fixed at construction and clamped to at least 1.
//! - `push` never drops: it waits for space or for the channel to close.
//! - `pull` returns [`Pulled::Closed`] only when the queue is closed **and**
//!   drained, so leftover candidates stay observable after a close.
//!
//! [`InflightGauge`] counts candidates between dequeue and terminal outcome;
//! the RAII [`InflightSlot`] decrements on drop, so early returns and error
//! paths cannot leak a count.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use crate::candidate::Candidate;

/// Result of one timed dequeue attempt.
#[derive(Debug, PartialEq, Eq)]
pub enum Pulled {
    /// A candidate was dequeued.
    Item(Candidate),
    /// Nothing arrived within the wait window.
    Empty,
    /// The queue is closed and fully drained.
    Closed,
}

/// Bounded FIFO between the producer and the workers.
///
/// Cheap to clone; all clones share the same channel.
#[derive(Debug, Clone)]
pub struct WorkQueue {
    tx: async_channel::Sender<Candidate>,
    rx: async_channel::Receiver<Candidate>,
    capacity: usize,
}

impl WorkQueue {
    /// Creates a queue holding at most `capacity` candidates (clamped to 1).
    pub fn bounded(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        let (tx, rx) = async_channel::bounded(capacity);
        Self { tx, rx, capacity }
    }

    /// Enqueues one candidate, waiting while the queue is full.
    ///
    /// Returns `false` if the queue was closed; the candidate is dropped.
    pub async fn push(&self, candidate: Candidate) -> bool {
        self.tx.send(candidate).await.is_ok()
    }

    /// Dequeues one candidate, waiting at most `wait`.
    pub async fn pull(&self, wait: Duration) -> Pulled {
        match tokio::time::timeout(wait, self.rx.recv()).await {
            Ok(Ok(candidate)) => Pulled::Item(candidate),
            Ok(Err(_)) => Pulled::Closed,
            Err(_) => Pulled::Empty,
        }
    }

    /// Closes the queue for all clones. Queued candidates remain pullable;
    /// subsequent pushes fail.
    pub fn close(&self) {
        self.tx.close();
    }

    /// Candidates currently queued.
    pub fn len(&self) -> usize {
        self.tx.len()
    }

    /// True when nothing is queued.
    pub fn is_empty(&self) -> bool {
        self.tx.is_empty()
    }

    /// The configured capacity.
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

/// Counts candidates that were dequeued but have not reached a terminal
/// outcome yet. Used for the drain report when a grace window expires.
#[derive(Debug, Default)]
pub struct InflightGauge {
    active: AtomicUsize,
}

impl InflightGauge {
    /// Creates a gauge at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks one candidate in flight; the returned slot decrements on drop.
    pub fn begin(&self) -> InflightSlot<'_> {
        self.active.fetch_add(1, Ordering::SeqCst);
        InflightSlot { gauge: self }
    }

    /// Candidates currently in flight.
    pub fn current(&self) -> usize {
        self.active.load(Ordering::SeqCst)
    }
}

/// RAII guard for one in-flight candidate.
#[derive(Debug)]
pub struct InflightSlot<'a> {
    gauge: &'a InflightGauge,
}

impl Drop for InflightSlot<'_> {
    fn drop(&mut self) {
        self.gauge.active.fetch_sub(1, Ordering::SeqCst);
    }
}
