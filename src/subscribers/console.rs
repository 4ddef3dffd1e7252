//! # Console reporter.
//!
//! [`ConsoleReporter`] renders runtime events as colored terminal lines.
//! Acceptances and run-level events always print; per-probe noise
//! (probes, rejections, transport failures) only prints in verbose mode.
//!
//! ## Output format
//! ```text
//! [3/10] [+] 48213 is available
//! [-] 90125: already in use            (verbose)
//! [!] 55555: connection refused        (verbose)
//! [*] goal reached, draining in-flight probes
//! [!] interrupt received, shutting down
//! ```

use async_trait::async_trait;

use crate::events::{Event, EventKind};

use super::Subscribe;

const HEADER: &str = "\x1b[95m";
const BLUE: &str = "\x1b[94m";
const GRAY: &str = "\x1b[90m";
const YELLOW: &str = "\x1b[93m";
const RED: &str = "\x1b[91m";
const RESET: &str = "\x1b[0m";

/// Colored stdout/stderr reporter.
///
/// Failures that abort the run go to stderr; everything else to stdout.
pub struct ConsoleReporter {
    target: u64,
    verbose: bool,
}

impl ConsoleReporter {
    /// Creates a reporter for a run collecting `target` candidates.
    pub fn new(target: u64, verbose: bool) -> Self {
        Self { target, verbose }
    }
}

#[async_trait]
impl Subscribe for ConsoleReporter {
    async fn on_event(&self, event: &Event) {
        let candidate = event.candidate.as_deref().unwrap_or("?");
        match event.kind {
            EventKind::ProbeStarted => {
                if self.verbose {
                    println!("{GRAY}[>] probing {candidate}{RESET}");
                }
            }
            EventKind::CandidateAccepted => {
                if let Some(seq) = event.seq {
                    println!(
                        "{BLUE}[{seq}/{}] [+] {candidate} is available{RESET}",
                        self.target
                    );
                }
            }
            EventKind::CandidateRejected => {
                if self.verbose {
                    let reason = event.reason.as_deref().unwrap_or("rejected");
                    println!("{GRAY}[-] {candidate}: {reason}{RESET}");
                }
            }
            EventKind::ProbeFailed => {
                if self.verbose {
                    let reason = event.reason.as_deref().unwrap_or("transport failure");
                    println!("{YELLOW}[!] {candidate}: {reason}{RESET}");
                }
            }
            EventKind::GoalReached => {
                println!("{HEADER}[*] goal reached, draining in-flight probes{RESET}");
            }
            EventKind::ShutdownRequested => {
                println!("{YELLOW}[!] interrupt received, shutting down{RESET}");
            }
            EventKind::Drained => {
                if self.verbose {
                    println!("{GRAY}[.] all workers stopped{RESET}");
                }
            }
            EventKind::SinkFailed => {
                let seq = event.seq.unwrap_or(0);
                let reason = event.reason.as_deref().unwrap_or("unknown");
                eprintln!("{RED}[x] could not record #{seq}: {reason}{RESET}");
            }
            EventKind::GraceExceeded => {
                eprintln!("{RED}[x] grace window expired with probes still in flight{RESET}");
            }
        }
    }

    fn name(&self) -> &'static str {
        "console"
    }
}
