//! Terminal classification of one validation probe.

/// What one probe of the external service concluded.
///
/// Exactly one worker observes each outcome; outcomes are never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationOutcome {
    /// The service confirmed the candidate is available.
    Accepted,
    /// The service answered and turned the candidate down.
    Rejected {
        /// Service-provided reason (taken, filtered, too short, ...).
        reason: String,
    },
    /// The probe never produced a verdict: connect/timeout failure,
    /// non-success HTTP status, or an undecodable body.
    TransportFailed {
        /// What went wrong, for diagnostics only.
        detail: String,
    },
}

impl ValidationOutcome {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    pub fn as_label(&self) -> &'static str {
        match self {
            ValidationOutcome::Accepted => "accepted",
            ValidationOutcome::Rejected { .. } => "rejected",
            ValidationOutcome::TransportFailed { .. } => "transport_failed",
        }
    }

    /// True only for [`ValidationOutcome::Accepted`].
    pub fn is_accepted(&self) -> bool {
        matches!(self, ValidationOutcome::Accepted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labels_are_stable() {
        assert_eq!(ValidationOutcome::Accepted.as_label(), "accepted");
        assert_eq!(
            ValidationOutcome::Rejected { reason: "taken".into() }.as_label(),
            "rejected"
        );
        assert_eq!(
            ValidationOutcome::TransportFailed { detail: "timeout".into() }.as_label(),
            "transport_failed"
        );
    }

    #[test]
    fn test_only_accepted_counts() {
        assert!(ValidationOutcome::Accepted.is_accepted());
        assert!(!ValidationOutcome::Rejected { reason: String::new() }.is_accepted());
        assert!(!ValidationOutcome::TransportFailed { detail: String::new() }.is_accepted());
    }
}
