//! # Candidate validation.
//!
//! This module groups the validation **seam** and its production
//! implementation:
//! - [`Validate`] async trait every validator implements
//! - [`ValidationOutcome`] tri-state verdict for one probe
//! - [`HttpValidator`] reqwest-backed client for the availability endpoint
//!
//! ## Quick wiring
//! ```text
//! Worker ── validate(&Candidate).await ──► ValidationOutcome
//!                                            ├─ Accepted        → try_accept + sink
//!                                            ├─ Rejected        → discard (event)
//!                                            └─ TransportFailed → discard (event)
//! ```

mod client;
mod http;
mod outcome;

pub use client::Validate;
pub use http::HttpValidator;
pub use outcome::ValidationOutcome;
