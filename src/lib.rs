//! # prospector
//!
//! **Prospector** collects a fixed number of service-confirmed identifiers.
//!
//! It generates random candidates over a configurable alphabet, probes an
//! HTTP verification service for each one through a bounded worker pool,
//! and stops at exactly N confirmed candidates. The crate is the library
//! behind the `prospector` binary and is usable on its own with custom
//! validators, sinks, and subscribers.
//!
//! ## Architecture
//! ### Overview
//! ```text
//! ┌────────────┐   push     ┌──────────────┐   pull     ┌──────────────┐
//! │  Producer  │ ─────────► │   WorkQueue  │ ─────────► │  Worker × W  │
//! │ (Generator)│ (parks on  │  W × factor  │ (timeout,  │   validate   │
//! └─────┬──────┘   full)    │    slots)    │  re-check) └──────┬───────┘
//!       │                   └──────────────┘                   │
//!       │ stops at done()                            Accepted? │
//!       │                                                      ▼
//! ┌─────┴────────┐   try_accept ─► Some(seq) | None   ┌───────────────┐
//! │  GoalTracker │ ◄───────────────────────────────── │   sink lock   │
//! │  (exactly N) │        (closes at seq == N)        │  append(seq)  │
//! └──────────────┘                                    └───────────────┘
//!
//! every stage ── publish(Event) ──► Bus ──► listener ──► SubscriberSet
//!                                                 ┌─────────┬─────────┐
//!                                                 ▼         ▼         ▼
//!                                            ConsoleReporter  custom subs
//! ```
//!
//! ### Lifecycle
//! ```text
//! Supervisor::run(validator, sink)
//!
//! loop (each worker) {
//!   ├─► goal done? ─► exit
//!   ├─► pull(poll_interval)
//!   │     ├─ Empty  ─► re-check goal
//!   │     ├─ Closed ─► exit
//!   │     └─ Item(candidate):
//!   │          ├─► publish ProbeStarted
//!   │          ├─► validate
//!   │          │     ├─ Rejected / TransportFailed ─► event, discard
//!   │          │     └─ Accepted ─► lock sink ─► try_accept()
//!   │          │          ├─ None ─► discard (goal filled meanwhile)
//!   │          │          └─ Some(seq) ─► append ─► CandidateAccepted
//!   │          │               └─ seq == N ─► GoalReached, halt
//!   └─ continue
//! }
//!
//! run() resolves when:
//!   - goal reached (N accepted)         ─► RunReport { interrupted: false }
//!   - SIGINT/SIGTERM, drained ≤ grace   ─► RunReport { interrupted: true }
//!   - sink append failed                ─► RuntimeError::SinkWrite
//!   - drain exceeded grace              ─► RuntimeError::GraceExceeded
//! ```
//!
//! ## Features
//! | Area              | Description                                                  | Key types / traits                             |
//! |-------------------|--------------------------------------------------------------|------------------------------------------------|
//! | **Candidates**    | Random identifier generation over a fixed alphabet.          | [`Generator`], [`Alphabet`], [`Candidate`]     |
//! | **Validation**    | One HTTP probe per candidate, three-way outcome.             | [`Validate`], [`HttpValidator`], [`ValidationOutcome`] |
//! | **Goal**          | Exactly-N admission with gapless sequence numbers.           | [`GoalTracker`]                                |
//! | **Pipeline**      | Bounded queue with backpressure between producer and pool.   | [`WorkQueue`], [`Pulled`]                      |
//! | **Persistence**   | Append-only result sink, flushed per record.                 | [`Sink`], [`FileSink`], [`ResultRecord`]       |
//! | **Subscriber API**| Hook into run events (progress output, custom subscribers).  | [`Subscribe`], [`ConsoleReporter`]             |
//! | **Supervision**   | Drive one run to a report with graceful shutdown.            | [`Supervisor`], [`RunReport`]                  |
//! | **Errors**        | Typed errors for run-aborting failures.                      | [`RuntimeError`]                               |
//! | **Configuration** | Centralize runtime settings.                                 | [`Config`]                                     |
//!
//! ## Example
//! ```no_run
//! use std::sync::Arc;
//! use std::time::Duration;
//! use prospector::{
//!     Alphabet, Config, ConsoleReporter, FileSink, HttpValidator, Subscribe, Supervisor,
//! };
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut cfg = Config::default();
//!     cfg.target = 25;
//!     cfg.length = 6;
//!     cfg.alphabet = Alphabet::Alphanumeric;
//!     cfg.workers = 8;
//!     cfg.grace = Duration::from_secs(10);
//!
//!     let validator = Arc::new(HttpValidator::new(
//!         "https://api.example.com/check",
//!         "1999-04-20",
//!         cfg.request_timeout,
//!     )?);
//!     let sink = Box::new(FileSink::open("valid_names.txt").await?);
//!
//!     let subs: Vec<Arc<dyn Subscribe>> =
//!         vec![Arc::new(ConsoleReporter::new(cfg.target, cfg.verbose))];
//!
//!     let report = Supervisor::new(cfg, subs).run(validator, sink).await?;
//!     println!("collected {} of {}", report.accepted, report.target);
//!     Ok(())
//! }
//! ```
mod candidate;
mod config;
mod core;
mod error;
mod events;
mod goal;
mod queue;
mod sink;
mod subscribers;
mod validate;

// ---- Public re-exports ----

pub use candidate::{Alphabet, Candidate, Generator};
pub use config::Config;
pub use core::{RunReport, Supervisor};
pub use error::RuntimeError;
pub use events::{Bus, Event, EventKind};
pub use goal::GoalTracker;
pub use queue::{InflightGauge, InflightSlot, Pulled, WorkQueue};
pub use sink::{FileSink, ResultRecord, Sink};
pub use subscribers::{ConsoleReporter, Subscribe, SubscriberSet};
pub use validate::{HttpValidator, Validate, ValidationOutcome};
