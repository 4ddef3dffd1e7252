//! # Exactly-N admission control.
//!
//! [`GoalTracker`] is the shared stop condition of a run: it counts accepted
//! candidates up to a fixed target and exposes the done signal the producer
//! and every worker poll.
//!
//! ## Rules
//! - [`try_accept`](GoalTracker::try_accept) is the only mutation. It admits
//!   at most `target` times across all callers and hands out distinct,
//!   gapless sequence numbers `1..=target`.
//! - [`is_done`](GoalTracker::is_done) is a cheap non-exclusive read. It may
//!   briefly lag the final acceptance; staleness only delays wind-down and
//!   never corrupts the count.
//! - [`force_done`](GoalTracker::force_done) closes admissions immediately
//!   without touching the count (interruption path).

use std::sync::atomic::{AtomicU64, Ordering};

use tokio_util::sync::CancellationToken;

/// Shared admission state for one collection run.
#[derive(Debug)]
pub struct GoalTracker {
    target: u64,
    accepted: AtomicU64,
    halt: CancellationToken,
}

impl GoalTracker {
    /// Creates a tracker for `target` acceptances.
    ///
    /// A zero target starts in the done state.
    pub fn new(target: u64) -> Self {
        let tracker = Self {
            target,
            accepted: AtomicU64::new(0),
            halt: CancellationToken::new(),
        };
        if target == 0 {
            tracker.halt.cancel();
        }
        tracker
    }

    /// Claims the next acceptance slot.
    ///
    /// Returns `Some(seq)` with the 1-based sequence number while the goal
    /// is open, `None` once `target` slots were claimed or the run was
    /// forced done. The compare-and-swap on the counter is the exclusive
    /// section: racing callers can never claim the same slot or exceed the
    /// target. The callers serialize the surrounding admit-and-record step
    /// with the sink lock.
    pub fn try_accept(&self) -> Option<u64> {
        if self.halt.is_cancelled() {
            return None;
        }
        let claimed = self
            .accepted
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| {
                (n < self.target).then_some(n + 1)
            });
        match claimed {
            Ok(prev) => {
                let seq = prev + 1;
                if seq == self.target {
                    self.halt.cancel();
                }
                Some(seq)
            }
            Err(_) => None,
        }
    }

    /// True once the goal was reached or the run was forced done.
    pub fn is_done(&self) -> bool {
        self.halt.is_cancelled()
    }

    /// Closes admissions immediately, regardless of the count.
    pub fn force_done(&self) {
        self.halt.cancel();
    }

    /// Completes when the goal closes. Lets the producer break out of a
    /// blocked enqueue instead of waiting for queue space that may never
    /// come.
    pub async fn done(&self) {
        self.halt.cancelled().await;
    }

    /// Number of acceptances claimed so far.
    pub fn accepted(&self) -> u64 {
        self.accepted.load(Ordering::SeqCst)
    }

    /// The configured goal.
    pub fn target(&self) -> u64 {
        self.target
    }

    /// True when every slot up to the target was claimed.
    pub fn goal_met(&self) -> bool {
        self.accepted() >= self.target
    }
}
