//! # Example: basic_collect
//!
//! Smallest possible run: collect 5 candidates with the default
//! [`ConsoleReporter`] and a stub validator, no network involved.
//!
//! Shows how to:
//! - Implement the [`Validate`] and [`Sink`] traits for testing/demo use.
//! - Wire subscribers into [`Supervisor::new`] and read the [`RunReport`].
//!
//! ## Run
//! ```bash
//! cargo run --example basic_collect
//! ```

use std::sync::Arc;
use std::time::Duration;

use prospector::{
    Candidate, Config, ConsoleReporter, ResultRecord, Sink, Subscribe, Supervisor, Validate,
    ValidationOutcome,
};

/// Pretends every candidate is available after a short probe delay.
struct AlwaysAvailable;

#[async_trait::async_trait]
impl Validate for AlwaysAvailable {
    async fn validate(&self, _candidate: &Candidate) -> ValidationOutcome {
        tokio::time::sleep(Duration::from_millis(10)).await;
        ValidationOutcome::Accepted
    }
}

/// Discards accepted candidates instead of writing a file.
struct DiscardSink;

#[async_trait::async_trait]
impl Sink for DiscardSink {
    async fn append(&mut self, _record: &ResultRecord) -> std::io::Result<()> {
        Ok(())
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut cfg = Config::default();
    cfg.target = 5;
    cfg.workers = 3;
    cfg.poll_interval = Duration::from_millis(20);

    let subs: Vec<Arc<dyn Subscribe>> =
        vec![Arc::new(ConsoleReporter::new(cfg.target, cfg.verbose))];

    let report = Supervisor::new(cfg, subs)
        .run(Arc::new(AlwaysAvailable), Box::new(DiscardSink))
        .await?;

    println!("collected {} of {}", report.accepted, report.target);
    Ok(())
}
