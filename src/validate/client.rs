//! # Validation seam.
//!
//! Workers only ever see this trait; swapping the HTTP client for a fake in
//! tests or a different backend is a one-line change in the wiring.

use async_trait::async_trait;

use crate::candidate::Candidate;
use crate::validate::ValidationOutcome;

/// # Asynchronous candidate validator.
///
/// Probes one candidate against the external service. Transport problems
/// fold into the outcome; this call itself never fails and never retries.
///
/// Implementations must be safe to call concurrently from every worker.
///
/// # Example
/// ```
/// use async_trait::async_trait;
/// use prospector::{Candidate, Validate, ValidationOutcome};
///
/// struct EvenOnly;
///
/// #[async_trait]
/// impl Validate for EvenOnly {
///     async fn validate(&self, candidate: &Candidate) -> ValidationOutcome {
///         if candidate.as_str().len() % 2 == 0 {
///             ValidationOutcome::Accepted
///         } else {
///             ValidationOutcome::Rejected { reason: "odd length".into() }
///         }
///     }
/// }
/// ```
#[async_trait]
pub trait Validate: Send + Sync + 'static {
    /// Probes one candidate and classifies the result.
    async fn validate(&self, candidate: &Candidate) -> ValidationOutcome;
}
