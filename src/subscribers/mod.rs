//! # Event subscribers for the prospector runtime.
//!
//! This module provides the [`Subscribe`] trait, the [`SubscriberSet`]
//! fan-out, and the built-in [`ConsoleReporter`] that renders events
//! broadcast through the [`Bus`](crate::events::Bus).
//!
//! ## Architecture
//! ```text
//! Event flow:
//!   Worker ── publish(Event) ──► Bus ──► supervisor listener
//!                                              │
//!                                              ▼
//!                                       SubscriberSet::emit
//!                                    ┌────────┴────────┐
//!                                    ▼                 ▼
//!                              ConsoleReporter     custom subscriber
//! ```
//!
//! ## Implementing custom subscribers
//! ```no_run
//! use prospector::{Event, EventKind, Subscribe};
//! use async_trait::async_trait;
//!
//! struct AcceptCounter;
//!
//! #[async_trait]
//! impl Subscribe for AcceptCounter {
//!     async fn on_event(&self, event: &Event) {
//!         if event.kind == EventKind::CandidateAccepted {
//!             // increment a counter, push a metric, ...
//!         }
//!     }
//!     fn name(&self) -> &'static str { "accept-counter" }
//! }
//! ```

mod console;
mod set;
mod subscribe;

pub use console::ConsoleReporter;
pub use set::SubscriberSet;
pub use subscribe::Subscribe;
