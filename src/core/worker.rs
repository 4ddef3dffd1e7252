//! # Worker: drives candidates to terminal outcomes.
//!
//! Each of the W identical workers loops over the queue until the goal
//! closes or the queue drains out:
//!
//! ```text
//! loop {
//!   ├─► goal done? ───────────────► exit
//!   ├─► pull(poll)
//!   │     ├─ Empty  ──► re-check goal
//!   │     ├─ Closed ──► exit
//!   │     └─ Item(candidate):
//!   │          ├─► publish ProbeStarted
//!   │          ├─► validate(candidate)
//!   │          │     ├─ Rejected / TransportFailed ──► event, discard
//!   │          │     └─ Accepted:
//!   │          │          ├─► lock sink
//!   │          │          ├─► try_accept()          (inside the lock)
//!   │          │          │     ├─ None ──► discard (goal closed meanwhile)
//!   │          │          │     └─ Some(seq) ──► append record, publish
//!   │          │          └─► unlock
//!   └─ continue
//! }
//! ```
//!
//! ## Rules
//! - Admission and the sink append share the sink lock on every path, so
//!   record order in the sink always matches sequence order.
//! - The in-flight slot spans validation **and** recording; drain accounting
//!   covers the sink write.
//! - A failed append is fatal: the worker returns the error and the
//!   supervisor stops the rest of the pool.
//! - Workers never exit on `Empty` alone; only a closed goal or a closed
//!   and drained queue ends the loop.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;

use crate::candidate::Candidate;
use crate::error::RuntimeError;
use crate::events::{Bus, Event, EventKind};
use crate::goal::GoalTracker;
use crate::queue::{InflightGauge, Pulled, WorkQueue};
use crate::sink::{ResultRecord, Sink};
use crate::validate::{Validate, ValidationOutcome};

/// One member of the validation pool.
pub struct Worker {
    /// Pool index, carried on every event this worker publishes.
    pub id: u32,
    /// Shared candidate queue.
    pub queue: WorkQueue,
    /// Shared admission state.
    pub goal: Arc<GoalTracker>,
    /// Validation client, shared across the pool.
    pub validator: Arc<dyn Validate>,
    /// Result sink behind the admission lock.
    pub sink: Arc<Mutex<Box<dyn Sink>>>,
    /// In-flight accounting for the drain report.
    pub inflight: Arc<InflightGauge>,
    /// Event bus for probe events.
    pub bus: Bus,
    /// How long one idle pull waits before re-checking the goal.
    pub poll: Duration,
}

impl Worker {
    /// Runs until the goal closes or the queue is closed and drained.
    pub async fn run(self) -> Result<(), RuntimeError> {
        loop {
            if self.goal.is_done() {
                break;
            }
            match self.queue.pull(self.poll).await {
                Pulled::Item(candidate) => self.process(candidate).await?,
                Pulled::Empty => continue,
                Pulled::Closed => break,
            }
        }
        Ok(())
    }

    /// Drives one candidate to its terminal outcome.
    async fn process(&self, candidate: Candidate) -> Result<(), RuntimeError> {
        let _slot = self.inflight.begin();
        self.bus.publish(
            Event::new(EventKind::ProbeStarted)
                .with_worker(self.id)
                .with_candidate(&candidate),
        );

        match self.validator.validate(&candidate).await {
            ValidationOutcome::Accepted => self.record(candidate).await,
            ValidationOutcome::Rejected { reason } => {
                self.bus.publish(
                    Event::new(EventKind::CandidateRejected)
                        .with_worker(self.id)
                        .with_candidate(&candidate)
                        .with_reason(reason),
                );
                Ok(())
            }
            ValidationOutcome::TransportFailed { detail } => {
                self.bus.publish(
                    Event::new(EventKind::ProbeFailed)
                        .with_worker(self.id)
                        .with_candidate(&candidate)
                        .with_reason(detail),
                );
                Ok(())
            }
        }
    }

    /// Admits and appends one confirmed candidate under the sink lock.
    async fn record(&self, candidate: Candidate) -> Result<(), RuntimeError> {
        let mut sink = self.sink.lock().await;
        let Some(seq) = self.goal.try_accept() else {
            // Goal closed while this probe was in flight.
            return Ok(());
        };

        let record = ResultRecord { seq, candidate };
        match sink.append(&record).await {
            Ok(()) => {
                self.bus.publish(
                    Event::new(EventKind::CandidateAccepted)
                        .with_worker(self.id)
                        .with_candidate(&record.candidate)
                        .with_seq(seq),
                );
                if seq == self.goal.target() {
                    self.bus.publish(Event::new(EventKind::GoalReached));
                }
                Ok(())
            }
            Err(source) => {
                self.bus.publish(
                    Event::new(EventKind::SinkFailed)
                        .with_seq(seq)
                        .with_reason(source.to_string()),
                );
                Err(RuntimeError::SinkWrite { seq, source })
            }
        }
    }
}
