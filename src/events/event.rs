//! # Runtime events emitted by the producer, workers, and supervisor.
//!
//! The [`EventKind`] enum classifies events across three categories:
//! - **Probe events**: per-candidate flow (started, accepted, rejected, failed)
//! - **Run events**: goal reached, shutdown requested, drained
//! - **Failure events**: sink write failure, grace exceeded
//!
//! The [`Event`] struct carries the metadata a kind needs: timestamp, worker
//! id, candidate text, reason, and the acceptance sequence number.
//!
//! ## Example
//! ```rust
//! use prospector::{Event, EventKind};
//!
//! let ev = Event::new(EventKind::CandidateAccepted)
//!     .with_worker(2)
//!     .with_candidate("48213")
//!     .with_seq(7);
//!
//! assert_eq!(ev.kind, EventKind::CandidateAccepted);
//! assert_eq!(ev.candidate.as_deref(), Some("48213"));
//! assert_eq!(ev.seq, Some(7));
//! ```

use std::sync::Arc;
use std::time::SystemTime;

/// Classification of runtime events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    // === Probe events ===
    /// A worker dequeued a candidate and is probing the service.
    ///
    /// Sets:
    /// - `worker`: worker id
    /// - `candidate`: candidate text
    /// - `at`: wall-clock timestamp
    ProbeStarted,

    /// The service confirmed the candidate; it was admitted and recorded.
    ///
    /// Sets:
    /// - `worker`: worker id
    /// - `candidate`: candidate text
    /// - `seq`: acceptance sequence number (1-based)
    /// - `at`: wall-clock timestamp
    CandidateAccepted,

    /// The service turned the candidate down.
    ///
    /// Sets:
    /// - `worker`: worker id
    /// - `candidate`: candidate text
    /// - `reason`: service-provided reason
    /// - `at`: wall-clock timestamp
    CandidateRejected,

    /// The probe produced no verdict (I/O error, HTTP status, bad body).
    ///
    /// Sets:
    /// - `worker`: worker id
    /// - `candidate`: candidate text
    /// - `reason`: transport detail
    /// - `at`: wall-clock timestamp
    ProbeFailed,

    // === Run events ===
    /// The final acceptance slot was claimed; the run is winding down.
    GoalReached,

    /// Shutdown requested (OS signal observed).
    ShutdownRequested,

    /// Every worker joined; no probe is in flight anymore.
    Drained,

    // === Failure events ===
    /// Appending an accepted candidate to the sink failed; the run aborts.
    ///
    /// Sets:
    /// - `seq`: sequence number that could not be recorded
    /// - `reason`: I/O error text
    /// - `at`: wall-clock timestamp
    SinkFailed,

    /// The interrupt drain exceeded its grace window.
    GraceExceeded,
}

/// Runtime event with optional metadata.
///
/// - `at`: wall-clock timestamp (for logs)
/// - other optional fields are set depending on the [`EventKind`]
#[derive(Clone)]
pub struct Event {
    /// Wall-clock timestamp.
    pub at: SystemTime,
    /// Event classification.
    pub kind: EventKind,
    /// Id of the worker that produced the event, if any.
    pub worker: Option<u32>,
    /// Candidate text, if the event concerns one candidate.
    pub candidate: Option<Arc<str>>,
    /// Human-readable reason (rejections, transport and sink failures).
    pub reason: Option<Arc<str>>,
    /// Acceptance sequence number (1-based), for acceptance and sink events.
    pub seq: Option<u64>,
}

impl Event {
    /// Creates a new event of the given kind with the current timestamp.
    pub fn new(kind: EventKind) -> Self {
        Self {
            at: SystemTime::now(),
            kind,
            worker: None,
            candidate: None,
            reason: None,
            seq: None,
        }
    }

    /// Attaches the id of the emitting worker.
    #[inline]
    pub fn with_worker(mut self, id: u32) -> Self {
        self.worker = Some(id);
        self
    }

    /// Attaches the candidate text.
    #[inline]
    pub fn with_candidate(mut self, candidate: impl Into<Arc<str>>) -> Self {
        self.candidate = Some(candidate.into());
        self
    }

    /// Attaches a human-readable reason.
    #[inline]
    pub fn with_reason(mut self, reason: impl Into<Arc<str>>) -> Self {
        self.reason = Some(reason.into());
        self
    }

    /// Attaches an acceptance sequence number.
    #[inline]
    pub fn with_seq(mut self, seq: u64) -> Self {
        self.seq = Some(seq);
        self
    }
}
