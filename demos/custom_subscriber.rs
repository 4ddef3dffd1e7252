//! # Example: custom_subscriber
//!
//! Demonstrates how to build and attach a custom event subscriber.
//!
//! Shows how to:
//! - Implement the [`Subscribe`] trait.
//! - Inspect [`Event`] / [`EventKind`] for run metrics.
//! - Wire the subscriber into [`Supervisor::new`].
//!
//! ## Flow
//! ```text
//! Supervisor::run()
//!     ├─► Producer ──► WorkQueue ──► Worker × W
//!     │                                 ├─► publish(ProbeStarted)
//!     │                                 ├─► publish(CandidateAccepted | CandidateRejected)
//!     │                                 └─► publish(GoalReached)
//!     └─► subscriber_listener (in Supervisor)
//!           └─► SubscriberSet.emit() ──► AcceptCounter.on_event()
//! ```
//!
//! ## Run
//! ```bash
//! cargo run --example custom_subscriber
//! ```

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use prospector::{
    Candidate, Config, Event, EventKind, ResultRecord, Sink, Subscribe, Supervisor, Validate,
    ValidationOutcome,
};

/// Accepts candidates ending in an even digit, like a picky endpoint.
struct EvenEnding;

#[async_trait::async_trait]
impl Validate for EvenEnding {
    async fn validate(&self, candidate: &Candidate) -> ValidationOutcome {
        match candidate.as_str().chars().last() {
            Some(c) if c.to_digit(10).is_some_and(|d| d % 2 == 0) => ValidationOutcome::Accepted,
            _ => ValidationOutcome::Rejected {
                reason: "odd ending".into(),
            },
        }
    }
}

/// Discards accepted candidates; the subscriber is the point here.
struct DiscardSink;

#[async_trait::async_trait]
impl Sink for DiscardSink {
    async fn append(&mut self, _record: &ResultRecord) -> std::io::Result<()> {
        Ok(())
    }
}

/// Counts acceptances and prints selected events.
/// In real life, you could export metrics, ship logs, or trigger alerts.
struct AcceptCounter {
    seen: AtomicU64,
}

#[async_trait::async_trait]
impl Subscribe for AcceptCounter {
    async fn on_event(&self, ev: &Event) {
        match ev.kind {
            EventKind::CandidateAccepted => {
                let n = self.seen.fetch_add(1, Ordering::SeqCst) + 1;
                println!(
                    "[sub] accepted #{n}: {}",
                    ev.candidate.as_deref().unwrap_or("<unknown>")
                );
            }
            EventKind::CandidateRejected => {
                println!(
                    "[sub] rejected: {} ({})",
                    ev.candidate.as_deref().unwrap_or("<unknown>"),
                    ev.reason.as_deref().unwrap_or("no reason"),
                );
            }
            EventKind::GoalReached => println!("[sub] goal reached"),
            EventKind::Drained => println!("[sub] all workers stopped"),
            _ => {}
        }
    }

    fn name(&self) -> &'static str {
        "accept_counter"
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut cfg = Config::default();
    cfg.target = 5;
    cfg.workers = 3;
    cfg.poll_interval = Duration::from_millis(20);

    let counter = Arc::new(AcceptCounter {
        seen: AtomicU64::new(0),
    });
    let subs: Vec<Arc<dyn Subscribe>> = vec![counter];

    let report = Supervisor::new(cfg, subs)
        .run(Arc::new(EvenEnding), Box::new(DiscardSink))
        .await?;

    println!("collected {} of {}", report.accepted, report.target);
    Ok(())
}
