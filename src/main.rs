use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;

use prospector::{
    Alphabet, Config, ConsoleReporter, FileSink, HttpValidator, Subscribe, Supervisor,
};

const HEADER: &str = "\x1b[95m";
const BLUE: &str = "\x1b[94m";
const YELLOW: &str = "\x1b[93m";
const RED: &str = "\x1b[91m";
const RESET: &str = "\x1b[0m";

/// Collects a fixed number of service-confirmed identifiers.
///
/// Random candidates are generated over the chosen alphabet, probed against
/// the verification endpoint by a bounded worker pool, and appended to the
/// output file until exactly the target count is confirmed.
#[derive(Parser, Debug)]
#[command(name = "prospector", version, about)]
struct CliArgs {
    /// Verification endpoint probed once per candidate.
    #[arg(long)]
    endpoint: String,

    /// How many confirmed candidates to collect.
    #[arg(short = 'n', long, default_value_t = 10)]
    target: u64,

    /// Candidate length in characters.
    #[arg(short, long, default_value_t = 5)]
    length: usize,

    /// Alphabet candidates are drawn from: digits, letters, or alnum.
    #[arg(long, default_value = "digits")]
    alphabet: Alphabet,

    /// Number of concurrent validation workers.
    #[arg(short, long, default_value_t = 5)]
    workers: usize,

    /// Queue capacity as a multiple of the worker count.
    #[arg(long, default_value_t = 5)]
    queue_factor: usize,

    /// Per-probe HTTP timeout, in seconds.
    #[arg(long, default_value_t = 5)]
    timeout_secs: u64,

    /// How long an idle worker waits on the queue before re-checking the
    /// goal, in milliseconds.
    #[arg(long, default_value_t = 1000)]
    poll_ms: u64,

    /// Maximum time to wait for in-flight probes after an interrupt,
    /// in seconds.
    #[arg(long, default_value_t = 30)]
    grace_secs: u64,

    /// Birthdate the verification endpoint expects alongside every probe.
    #[arg(long, default_value = "1999-04-20")]
    birthday: String,

    /// File confirmed candidates are appended to, one per line.
    #[arg(short, long, default_value = "valid_names.txt")]
    output: PathBuf,

    /// Report every probe, not just acceptances.
    #[arg(short, long)]
    verbose: bool,
}

impl CliArgs {
    fn to_config(&self) -> Config {
        Config {
            target: self.target,
            length: self.length,
            alphabet: self.alphabet,
            workers: self.workers,
            queue_factor: self.queue_factor,
            request_timeout: Duration::from_secs(self.timeout_secs),
            poll_interval: Duration::from_millis(self.poll_ms),
            grace: Duration::from_secs(self.grace_secs),
            verbose: self.verbose,
            ..Config::default()
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = CliArgs::parse();
    let cfg = args.to_config();

    println!("{HEADER}--- prospector ---{RESET}");
    println!(
        "Seeking {} candidates of length {} ({}) using {} workers.",
        cfg.target,
        cfg.length,
        cfg.alphabet,
        cfg.worker_count()
    );
    if cfg.verbose {
        println!("{YELLOW}Verbose mode is ON. Expect per-probe output.{RESET}");
    }

    let validator = match HttpValidator::new(&args.endpoint, &args.birthday, cfg.request_timeout) {
        Ok(validator) => Arc::new(validator),
        Err(err) => {
            eprintln!("{RED}[x] could not build the HTTP client: {err}{RESET}");
            return ExitCode::FAILURE;
        }
    };
    let sink = match FileSink::open(&args.output).await {
        Ok(sink) => Box::new(sink),
        Err(err) => {
            eprintln!(
                "{RED}[x] could not open {}: {err}{RESET}",
                args.output.display()
            );
            return ExitCode::FAILURE;
        }
    };

    let subs: Vec<Arc<dyn Subscribe>> =
        vec![Arc::new(ConsoleReporter::new(cfg.target, cfg.verbose))];

    let report = match Supervisor::new(cfg, subs).run(validator, sink).await {
        Ok(report) => report,
        Err(err) => {
            eprintln!("{RED}[x] {}{RESET}", err.as_message());
            return ExitCode::FAILURE;
        }
    };

    if report.interrupted {
        println!(
            "\n{YELLOW}[!] Interrupted. Collected {}/{} candidates into {}.{RESET}",
            report.accepted,
            report.target,
            args.output.display()
        );
        // 128 + SIGINT, the usual shell convention.
        ExitCode::from(130)
    } else {
        println!(
            "\n{BLUE}[!] Finished. Collected {}/{} candidates into {}.{RESET}",
            report.accepted,
            report.target,
            args.output.display()
        );
        ExitCode::SUCCESS
    }
}
