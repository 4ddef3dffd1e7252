//! # Supervisor: wires the pipeline together and drives it to a report.
//!
//! The [`Supervisor`] owns the event bus and the subscriber fan-out. Its
//! [`run`](Supervisor::run) consumes the supervisor, spawns the producer and
//! the worker pool around one queue and one goal tracker, and resolves to a
//! [`RunReport`] once the goal is met or an interrupt was drained.
//!
//! ## Key responsibilities
//! - spawn the producer and W workers sharing one queue and one goal
//! - subscribe to the [`Bus`] and fan events out via [`SubscriberSet`]
//! - handle OS termination signals (SIGINT/SIGTERM/Ctrl-C) and the
//!   programmatic [`interrupt_handle`](Supervisor::interrupt_handle)
//! - drain in-flight probes within [`Config::grace`] after an interrupt
//!
//! ## High-level architecture
//! ```text
//! Supervisor::run(validator, sink)
//!   │
//!   ├─ GoalTracker(target)        WorkQueue(workers × queue_factor)
//!   ├─ spawn Producer ── push ──────► queue
//!   ├─ spawn Worker × W ◄── pull ─────┘     validate ─► admit ─► sink
//!   ├─ listener: Bus.subscribe() ─► SubscriberSet::emit(&Event)
//!   │                                  ┌─────────┬─────────┐
//!   │                                  ▼         ▼         ▼
//!   │                           [queue S1] [queue S2] .. [queue SN]
//!   └─ select:
//!        ├─ all workers joined ────────────────► Drained ► RunReport
//!        └─ interrupt ► ShutdownRequested ► force_done
//!                       ├─ drained within grace ► Drained ► RunReport
//!                       └─ grace exceeded ► GraceExceeded error
//! ```
//!
//! ## Rules
//! - Event delivery settles before `run` returns: the bus is dropped, the
//!   listener drains the backlog, and the subscriber set is shut down. The
//!   caller's final summary always prints after the last event.
//! - A worker error (failed sink append) closes the goal so the rest of the
//!   pool winds down; the first error is returned after all workers joined.
//!   The same holds while draining an interrupt: a probe that admitted a
//!   sequence number and then failed its append surfaces as an error, never
//!   as a successful interrupted report.
//! - When the grace window expires, stuck probes are abandoned and the
//!   listener is aborted instead of drained: a stuck worker still holds a
//!   bus handle, so the backlog would never close.
//!
//! ## Example
//! ```no_run
//! use std::sync::Arc;
//! use prospector::{Config, ConsoleReporter, FileSink, HttpValidator, Subscribe, Supervisor};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let cfg = Config::default();
//!     let validator = Arc::new(HttpValidator::new(
//!         "https://api.example.com/check",
//!         "1999-04-20",
//!         cfg.request_timeout,
//!     )?);
//!     let sink = Box::new(FileSink::open("valid_names.txt").await?);
//!
//!     let subs: Vec<Arc<dyn Subscribe>> =
//!         vec![Arc::new(ConsoleReporter::new(cfg.target, cfg.verbose))];
//!     let report = Supervisor::new(cfg, subs).run(validator, sink).await?;
//!
//!     println!("collected {} of {}", report.accepted, report.target);
//!     Ok(())
//! }
//! ```

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;
use tokio::task::{JoinHandle, JoinSet};
use tokio_util::sync::CancellationToken;

use crate::candidate::Generator;
use crate::config::Config;
use crate::core::{producer::Producer, shutdown, worker::Worker};
use crate::error::RuntimeError;
use crate::events::{Bus, Event, EventKind};
use crate::goal::GoalTracker;
use crate::queue::{InflightGauge, WorkQueue};
use crate::sink::Sink;
use crate::subscribers::{Subscribe, SubscriberSet};
use crate::validate::Validate;

/// Final tally of one collection run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunReport {
    /// Candidates accepted and recorded.
    pub accepted: u64,
    /// The configured goal.
    pub target: u64,
    /// True when an interrupt ended the run before the goal was met.
    pub interrupted: bool,
}

impl RunReport {
    /// True when every slot up to the target was filled.
    pub fn goal_met(&self) -> bool {
        self.accepted >= self.target
    }
}

/// Coordinates the producer, the worker pool, event delivery, and shutdown.
pub struct Supervisor {
    cfg: Config,
    bus: Bus,
    subs: Arc<SubscriberSet>,
    interrupt: CancellationToken,
}

impl Supervisor {
    /// Creates a supervisor with the given config and subscribers.
    pub fn new(cfg: Config, subscribers: Vec<Arc<dyn Subscribe>>) -> Self {
        let bus = Bus::new(cfg.bus_capacity);
        let subs = Arc::new(SubscriberSet::new(subscribers));
        Self {
            cfg,
            bus,
            subs,
            interrupt: CancellationToken::new(),
        }
    }

    /// A handle that triggers the same controlled shutdown as SIGINT.
    ///
    /// Cancelling it closes the goal and drains in-flight probes; the run
    /// then resolves with `interrupted` set if the goal was not met.
    pub fn interrupt_handle(&self) -> CancellationToken {
        self.interrupt.clone()
    }

    /// Runs one collection until the goal is met, an interrupt is drained,
    /// or a sink write fails.
    ///
    /// Consumes the supervisor: dropping the bus at the end is what lets the
    /// listener drain, so every published event reaches the subscribers
    /// before the report is returned.
    pub async fn run(
        self,
        validator: Arc<dyn Validate>,
        sink: Box<dyn Sink>,
    ) -> Result<RunReport, RuntimeError> {
        let Self {
            cfg,
            bus,
            subs,
            interrupt,
        } = self;

        let goal = Arc::new(GoalTracker::new(cfg.target));
        let queue = WorkQueue::bounded(cfg.queue_capacity());
        let inflight = Arc::new(InflightGauge::new());
        let sink = Arc::new(Mutex::new(sink));

        let listener = Self::subscriber_listener(&bus, &subs);

        let generator = Generator::new(cfg.alphabet, cfg.length);
        let producer =
            tokio::spawn(Producer::new(generator, queue.clone(), Arc::clone(&goal)).run());

        let mut workers = JoinSet::new();
        for id in 0..cfg.worker_count() {
            workers.spawn(
                Worker {
                    id: id as u32,
                    queue: queue.clone(),
                    goal: Arc::clone(&goal),
                    validator: Arc::clone(&validator),
                    sink: Arc::clone(&sink),
                    inflight: Arc::clone(&inflight),
                    bus: bus.clone(),
                    poll: cfg.poll_interval,
                }
                .run(),
            );
        }

        let driven = Self::drive(&bus, &goal, &inflight, &interrupt, cfg.grace, &mut workers).await;

        // The producer exits as soon as the goal closes or its queue closes;
        // every path through `drive` guarantees one of the two.
        let _ = producer.await;

        match driven {
            Ok(signal_observed) => {
                bus.publish(Event::new(EventKind::Drained));
                let accepted = goal.accepted();
                let interrupted = signal_observed && !goal.goal_met();
                Self::settle_events(bus, listener, subs, true).await;
                Ok(RunReport {
                    accepted,
                    target: cfg.target,
                    interrupted,
                })
            }
            Err(err) => {
                let drain = !matches!(err, RuntimeError::GraceExceeded { .. });
                Self::settle_events(bus, listener, subs, drain).await;
                Err(err)
            }
        }
    }

    /// Subscribes to the bus and forwards events to the subscriber set.
    ///
    /// Exits when the bus closes; a lagged receiver skips the overwritten
    /// events and keeps forwarding.
    fn subscriber_listener(bus: &Bus, subs: &Arc<SubscriberSet>) -> JoinHandle<()> {
        let mut rx = bus.subscribe();
        let subs = Arc::clone(subs);
        tokio::spawn(async move {
            loop {
                match rx.recv().await {
                    Ok(ev) => subs.emit(&ev),
                    Err(tokio::sync::broadcast::error::RecvError::Lagged(_)) => continue,
                    Err(tokio::sync::broadcast::error::RecvError::Closed) => break,
                }
            }
        })
    }

    /// Waits until either all workers finish or an interrupt arrives.
    ///
    /// Returns `Ok(true)` when an interrupt was observed and drained,
    /// `Ok(false)` when the pool wound down on its own.
    async fn drive(
        bus: &Bus,
        goal: &GoalTracker,
        inflight: &InflightGauge,
        interrupt: &CancellationToken,
        grace: Duration,
        workers: &mut JoinSet<Result<(), RuntimeError>>,
    ) -> Result<bool, RuntimeError> {
        tokio::select! {
            _ = Self::interrupted(interrupt) => {
                bus.publish(Event::new(EventKind::ShutdownRequested));
                goal.force_done();
                Self::drain_with_grace(bus, inflight, grace, workers).await?;
                Ok(true)
            }
            res = Self::join_workers(goal, workers) => {
                res?;
                Ok(false)
            }
        }
    }

    /// Completes when an OS termination signal arrives or the supervisor's
    /// [interrupt handle](Supervisor::interrupt_handle) is cancelled.
    async fn interrupted(interrupt: &CancellationToken) {
        tokio::select! {
            _ = interrupt.cancelled() => {}
            _ = shutdown::wait_for_interrupt() => {}
        }
    }

    /// Joins every worker. The first worker error closes the goal so the
    /// rest of the pool winds down, and is returned once all have joined.
    async fn join_workers(
        goal: &GoalTracker,
        workers: &mut JoinSet<Result<(), RuntimeError>>,
    ) -> Result<(), RuntimeError> {
        let mut first_err = None;
        while let Some(joined) = workers.join_next().await {
            match joined {
                Ok(Ok(())) => {}
                Ok(Err(err)) => {
                    goal.force_done();
                    first_err.get_or_insert(err);
                }
                // A panicked worker shrinks the pool; the rest keep going.
                Err(_) => {}
            }
        }
        // Panics can empty the pool before the goal closes. Close it now so
        // the producer is not left parked on a full queue.
        if !goal.is_done() {
            goal.force_done();
        }
        match first_err {
            None => Ok(()),
            Some(err) => Err(err),
        }
    }

    /// Waits for the pool to finish within the grace window.
    ///
    /// A worker that admitted a sequence number before the goal closed may
    /// still fail its append while draining; the first such error is
    /// returned so an interrupted run never reports a record the sink did
    /// not store.
    async fn drain_with_grace(
        bus: &Bus,
        inflight: &InflightGauge,
        grace: Duration,
        workers: &mut JoinSet<Result<(), RuntimeError>>,
    ) -> Result<(), RuntimeError> {
        let all_joined = async {
            let mut first_err = None;
            while let Some(joined) = workers.join_next().await {
                if let Ok(Err(err)) = joined {
                    first_err.get_or_insert(err);
                }
            }
            first_err
        };
        match tokio::time::timeout(grace, all_joined).await {
            Ok(None) => Ok(()),
            Ok(Some(err)) => Err(err),
            Err(_) => {
                bus.publish(Event::new(EventKind::GraceExceeded));
                Err(RuntimeError::GraceExceeded {
                    grace,
                    inflight: inflight.current(),
                })
            }
        }
    }

    /// Closes the bus, waits for the listener, and shuts the subscriber set
    /// down so every delivered event was processed.
    ///
    /// `drain` is false when stuck workers may still hold bus handles; the
    /// listener is aborted then, because the bus would never close.
    async fn settle_events(
        bus: Bus,
        listener: JoinHandle<()>,
        subs: Arc<SubscriberSet>,
        drain: bool,
    ) {
        drop(bus);
        if !drain {
            listener.abort();
        }
        let _ = listener.await;
        if let Some(set) = Arc::into_inner(subs) {
            set.shutdown().await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::io;
    use std::sync::Mutex as StdMutex;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tokio::sync::Notify;

    use crate::candidate::Candidate;
    use crate::sink::ResultRecord;
    use crate::validate::ValidationOutcome;

    fn test_config(target: u64, workers: usize) -> Config {
        let mut cfg = Config::default();
        cfg.target = target;
        cfg.workers = workers;
        cfg.queue_factor = 2;
        cfg.length = 5;
        cfg.poll_interval = Duration::from_millis(10);
        cfg.grace = Duration::from_secs(5);
        cfg
    }

    #[derive(Clone, Default)]
    struct MemorySink {
        records: Arc<StdMutex<Vec<ResultRecord>>>,
    }

    #[async_trait]
    impl Sink for MemorySink {
        async fn append(&mut self, record: &ResultRecord) -> io::Result<()> {
            self.records.lock().unwrap().push(record.clone());
            Ok(())
        }
    }

    struct FailingSink;

    #[async_trait]
    impl Sink for FailingSink {
        async fn append(&mut self, _record: &ResultRecord) -> io::Result<()> {
            Err(io::Error::other("read-only file system"))
        }
    }

    /// Fails every append after signalling entry and stalling, so a test
    /// can interrupt the run while the write is still in flight.
    struct StallingFailingSink {
        entered: Arc<Notify>,
    }

    #[async_trait]
    impl Sink for StallingFailingSink {
        async fn append(&mut self, _record: &ResultRecord) -> io::Result<()> {
            self.entered.notify_one();
            tokio::time::sleep(Duration::from_millis(200)).await;
            Err(io::Error::other("device not ready"))
        }
    }

    struct StaticValidate(ValidationOutcome);

    #[async_trait]
    impl Validate for StaticValidate {
        async fn validate(&self, _candidate: &Candidate) -> ValidationOutcome {
            self.0.clone()
        }
    }

    /// Accepts the first `n` probes, rejects everything after.
    struct AcceptFirst {
        left: AtomicUsize,
    }

    impl AcceptFirst {
        fn new(n: usize) -> Self {
            Self {
                left: AtomicUsize::new(n),
            }
        }
    }

    #[async_trait]
    impl Validate for AcceptFirst {
        async fn validate(&self, _candidate: &Candidate) -> ValidationOutcome {
            let claimed = self
                .left
                .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
                .is_ok();
            if claimed {
                ValidationOutcome::Accepted
            } else {
                ValidationOutcome::Rejected {
                    reason: "taken".into(),
                }
            }
        }
    }

    /// Panics on every probe, as a buggy user-supplied validator would.
    struct PanickingValidate;

    #[async_trait]
    impl Validate for PanickingValidate {
        async fn validate(&self, _candidate: &Candidate) -> ValidationOutcome {
            panic!("validator blew up");
        }
    }

    /// Cycles through the given outcomes, one per probe.
    struct CyclingValidate {
        outcomes: Vec<ValidationOutcome>,
        next: AtomicUsize,
    }

    impl CyclingValidate {
        fn new(outcomes: Vec<ValidationOutcome>) -> Self {
            Self {
                outcomes,
                next: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl Validate for CyclingValidate {
        async fn validate(&self, _candidate: &Candidate) -> ValidationOutcome {
            let i = self.next.fetch_add(1, Ordering::SeqCst);
            self.outcomes[i % self.outcomes.len()].clone()
        }
    }

    #[derive(Default)]
    struct Recorder {
        kinds: StdMutex<Vec<EventKind>>,
    }

    #[async_trait]
    impl Subscribe for Recorder {
        async fn on_event(&self, event: &Event) {
            self.kinds.lock().unwrap().push(event.kind);
        }
    }

    #[tokio::test]
    async fn test_collects_exactly_target_in_sequence_order() {
        let sink = MemorySink::default();
        let report = Supervisor::new(test_config(7, 3), Vec::new())
            .run(
                Arc::new(StaticValidate(ValidationOutcome::Accepted)),
                Box::new(sink.clone()),
            )
            .await
            .expect("run failed");

        assert_eq!(report.accepted, 7);
        assert_eq!(report.target, 7);
        assert!(report.goal_met());
        assert!(!report.interrupted);

        let records = sink.records.lock().unwrap();
        let seqs: Vec<u64> = records.iter().map(|r| r.seq).collect();
        assert_eq!(seqs, (1..=7).collect::<Vec<u64>>(), "records out of order");
    }

    #[tokio::test]
    async fn test_rejections_and_transport_failures_do_not_count() {
        let sink = MemorySink::default();
        let validator = CyclingValidate::new(vec![
            ValidationOutcome::Rejected {
                reason: "taken".into(),
            },
            ValidationOutcome::Accepted,
            ValidationOutcome::TransportFailed {
                detail: "timeout".into(),
            },
        ]);
        let report = Supervisor::new(test_config(5, 2), Vec::new())
            .run(Arc::new(validator), Box::new(sink.clone()))
            .await
            .expect("run failed");

        assert_eq!(report.accepted, 5);
        let records = sink.records.lock().unwrap();
        assert_eq!(records.len(), 5);
        let seqs: Vec<u64> = records.iter().map(|r| r.seq).collect();
        assert_eq!(seqs, (1..=5).collect::<Vec<u64>>());
    }

    #[tokio::test]
    async fn test_sink_failure_aborts_run() {
        let err = Supervisor::new(test_config(5, 2), Vec::new())
            .run(
                Arc::new(StaticValidate(ValidationOutcome::Accepted)),
                Box::new(FailingSink),
            )
            .await
            .expect_err("run must abort on sink failure");

        assert_eq!(err.as_label(), "sink_write");
    }

    #[tokio::test]
    async fn test_zero_target_completes_immediately_with_empty_sink() {
        let sink = MemorySink::default();
        let report = Supervisor::new(test_config(0, 3), Vec::new())
            .run(
                Arc::new(StaticValidate(ValidationOutcome::Accepted)),
                Box::new(sink.clone()),
            )
            .await
            .expect("run failed");

        assert_eq!(report.accepted, 0);
        assert!(report.goal_met());
        assert!(!report.interrupted);
        assert!(sink.records.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_events_delivered_before_run_returns() {
        let recorder = Arc::new(Recorder::default());
        let report = Supervisor::new(test_config(3, 2), vec![recorder.clone()])
            .run(
                Arc::new(StaticValidate(ValidationOutcome::Accepted)),
                Box::new(MemorySink::default()),
            )
            .await
            .expect("run failed");
        assert_eq!(report.accepted, 3);

        let kinds = recorder.kinds.lock().unwrap();
        let count = |kind: EventKind| kinds.iter().filter(|&&k| k == kind).count();
        assert_eq!(count(EventKind::CandidateAccepted), 3);
        assert_eq!(count(EventKind::GoalReached), 1);
        assert_eq!(count(EventKind::Drained), 1);
        assert_eq!(count(EventKind::ShutdownRequested), 0);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_parallel_run_keeps_sequence_gapless() {
        let sink = MemorySink::default();
        let report = Supervisor::new(test_config(25, 8), Vec::new())
            .run(
                Arc::new(StaticValidate(ValidationOutcome::Accepted)),
                Box::new(sink.clone()),
            )
            .await
            .expect("run failed");

        assert_eq!(report.accepted, 25);
        let records = sink.records.lock().unwrap();
        let seqs: Vec<u64> = records.iter().map(|r| r.seq).collect();
        assert_eq!(
            seqs,
            (1..=25).collect::<Vec<u64>>(),
            "sequence has gaps or reorders"
        );
    }

    #[tokio::test]
    async fn test_interrupt_midway_reports_partial_count() {
        let recorder = Arc::new(Recorder::default());
        let supervisor = Supervisor::new(test_config(10, 3), vec![recorder.clone()]);
        let interrupt = supervisor.interrupt_handle();

        let sink = MemorySink::default();
        let records = Arc::clone(&sink.records);
        tokio::spawn(async move {
            while records.lock().unwrap().len() < 3 {
                tokio::time::sleep(Duration::from_millis(5)).await;
            }
            interrupt.cancel();
        });

        let report = supervisor
            .run(Arc::new(AcceptFirst::new(3)), Box::new(sink.clone()))
            .await
            .expect("run failed");

        assert!(report.interrupted);
        assert_eq!(report.accepted, 3);
        assert_eq!(report.target, 10);
        assert!(!report.goal_met());

        let records = sink.records.lock().unwrap();
        let seqs: Vec<u64> = records.iter().map(|r| r.seq).collect();
        assert_eq!(seqs, vec![1, 2, 3]);

        let kinds = recorder.kinds.lock().unwrap();
        let count = |kind: EventKind| kinds.iter().filter(|&&k| k == kind).count();
        assert_eq!(count(EventKind::ShutdownRequested), 1);
        assert_eq!(count(EventKind::Drained), 1);
        assert_eq!(count(EventKind::GoalReached), 0);
    }

    #[tokio::test]
    async fn test_append_failure_while_draining_surfaces() {
        let supervisor = Supervisor::new(test_config(2, 1), Vec::new());
        let interrupt = supervisor.interrupt_handle();

        let entered = Arc::new(Notify::new());
        let sink = StallingFailingSink {
            entered: Arc::clone(&entered),
        };
        tokio::spawn(async move {
            entered.notified().await;
            interrupt.cancel();
        });

        let err = supervisor
            .run(
                Arc::new(StaticValidate(ValidationOutcome::Accepted)),
                Box::new(sink),
            )
            .await
            .expect_err("an append that fails mid-drain must abort the run");
        assert_eq!(err.as_label(), "sink_write");
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_panicked_pool_still_resolves_the_run() {
        let sink = MemorySink::default();
        let run = Supervisor::new(test_config(1, 2), Vec::new())
            .run(Arc::new(PanickingValidate), Box::new(sink.clone()));

        let report = tokio::time::timeout(Duration::from_secs(5), run)
            .await
            .expect("run hung after the whole pool panicked")
            .expect("run failed");

        assert_eq!(report.accepted, 0);
        assert!(!report.goal_met());
        assert!(sink.records.lock().unwrap().is_empty());
    }
}
