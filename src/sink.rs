//! # Persistence for accepted candidates.
//!
//! [`Sink`] is the seam between the worker pool and wherever results go.
//! Appends happen one at a time under the supervisor's admission lock, in
//! sequence order, and an append error aborts the run (records already
//! written stay durable).
//!
//! [`FileSink`] is the production implementation: an append-only text file,
//! one candidate per line, flushed after every append so an interrupted run
//! leaves every accepted candidate on disk.

use std::io;
use std::path::Path;

use async_trait::async_trait;
use tokio::fs::{File, OpenOptions};
use tokio::io::AsyncWriteExt;

use crate::candidate::Candidate;

/// One accepted candidate and its place in the goal count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultRecord {
    /// 1-based acceptance sequence number, gapless within a run.
    pub seq: u64,
    /// The accepted candidate.
    pub candidate: Candidate,
}

/// Destination for accepted candidates.
#[async_trait]
pub trait Sink: Send + 'static {
    /// Appends one record. Called in sequence order, never concurrently.
    async fn append(&mut self, record: &ResultRecord) -> io::Result<()>;
}

/// Append-only line-oriented file sink.
///
/// The line number is the sequence number: line `k` holds the candidate
/// accepted as `seq == k` (counting any lines already present when the
/// file was opened).
pub struct FileSink {
    file: File,
}

impl FileSink {
    /// Opens `path` for appending, creating the file if absent.
    pub async fn open(path: impl AsRef<Path>) -> io::Result<Self> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .await?;
        Ok(Self { file })
    }
}

#[async_trait]
impl Sink for FileSink {
    async fn append(&mut self, record: &ResultRecord) -> io::Result<()> {
        let line = format!("{}\n", record.candidate);
        self.file.write_all(line.as_bytes()).await?;
        self.file.flush().await
    }
}
