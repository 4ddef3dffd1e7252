//! # Runtime configuration.
//!
//! [`Config`] defines one collection run: the goal, the shape of the
//! candidates, the size of the worker pool and its queue, the probe and
//! drain timings, and the event bus capacity.
//!
//! # Example
//! ```
//! use std::time::Duration;
//! use prospector::Config;
//!
//! let mut cfg = Config::default();
//! cfg.target = 25;
//! cfg.workers = 8;
//! cfg.grace = Duration::from_secs(10);
//!
//! assert_eq!(cfg.queue_capacity(), 40);
//! ```

use std::time::Duration;

use crate::candidate::Alphabet;

/// Knobs for one collection run.
///
/// All values are fixed at startup; nothing is reconfigured mid-run.
#[derive(Clone, Debug)]
pub struct Config {
    /// How many validated candidates to collect.
    pub target: u64,
    /// Candidate length in characters.
    pub length: usize,
    /// Character set candidates are drawn from.
    pub alphabet: Alphabet,
    /// Number of concurrent validation workers (0 is treated as 1).
    pub workers: usize,
    /// Queue capacity as a multiple of the worker count.
    pub queue_factor: usize,
    /// Per-probe HTTP timeout.
    pub request_timeout: Duration,
    /// How long an idle worker waits on the queue before re-checking the goal.
    pub poll_interval: Duration,
    /// Maximum time to wait for in-flight probes after an interrupt.
    pub grace: Duration,
    /// Capacity of the event bus channel.
    pub bus_capacity: usize,
    /// Report every probe, not just acceptances.
    pub verbose: bool,
}

impl Config {
    /// Effective worker count; a zero setting still runs one worker.
    pub fn worker_count(&self) -> usize {
        self.workers.max(1)
    }

    /// Bounded queue capacity: `workers * queue_factor`, at least 1.
    pub fn queue_capacity(&self) -> usize {
        (self.worker_count() * self.queue_factor).max(1)
    }
}

impl Default for Config {
    /// Provides a default configuration:
    /// - `target = 10`, `length = 5` over digits
    /// - `workers = 5`, `queue_factor = 5`
    /// - `request_timeout = 5s`, `poll_interval = 1s`, `grace = 30s`
    /// - `bus_capacity = 1024`, `verbose = false`
    fn default() -> Self {
        Self {
            target: 10,
            length: 5,
            alphabet: Alphabet::Digits,
            workers: 5,
            queue_factor: 5,
            request_timeout: Duration::from_secs(5),
            poll_interval: Duration::from_secs(1),
            grace: Duration::from_secs(30),
            bus_capacity: 1024,
            verbose: false,
        }
    }
}
