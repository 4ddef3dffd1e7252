//! Error types for the prospector runtime.
//!
//! Only failures that abort a whole run live here. Per-candidate outcomes
//! (rejections, transport failures) are not errors; they are
//! [`ValidationOutcome`](crate::ValidationOutcome) values handled inside the
//! worker loop. An interrupt is a controlled shutdown, not an error.

use std::io;
use std::time::Duration;

use thiserror::Error;

/// # Errors that abort a collection run.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum RuntimeError {
    /// Appending an accepted candidate failed.
    ///
    /// The run aborts so the acceptance counter and the sink cannot
    /// silently diverge; records `1..seq-1` stay durable.
    #[error("failed to record acceptance #{seq}: {source}")]
    SinkWrite {
        /// Sequence number that could not be recorded.
        seq: u64,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// Interrupt drain exceeded the grace period.
    #[error("drain grace {grace:?} exceeded; {inflight} probe(s) still in flight")]
    GraceExceeded {
        /// The configured grace duration.
        grace: Duration,
        /// Probes that had not reached a terminal outcome.
        inflight: usize,
    },
}

impl RuntimeError {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    ///
    /// # Example
    /// ```
    /// use prospector::RuntimeError;
    /// use std::time::Duration;
    ///
    /// let err = RuntimeError::GraceExceeded { grace: Duration::from_secs(5), inflight: 2 };
    /// assert_eq!(err.as_label(), "grace_exceeded");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            RuntimeError::SinkWrite { .. } => "sink_write",
            RuntimeError::GraceExceeded { .. } => "grace_exceeded",
        }
    }

    /// Returns a human-readable message with details about the error.
    pub fn as_message(&self) -> String {
        match self {
            RuntimeError::SinkWrite { seq, source } => {
                format!("sink write failed at record #{seq}: {source}")
            }
            RuntimeError::GraceExceeded { grace, inflight } => {
                format!("grace exceeded after {grace:?}; in-flight probes={inflight}")
            }
        }
    }
}
