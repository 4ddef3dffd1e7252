//! Runtime core: orchestration and lifecycle.
//!
//! This module contains the embedded implementation of the prospector
//! runtime. The public API from this module is [`Supervisor`], which wires
//! the producer, the worker pool, and event delivery into one run, and the
//! [`RunReport`] it resolves to.
//!
//! Internal modules:
//! - [`producer`]: generates candidates into the bounded queue;
//! - [`worker`]: pulls, validates, admits, and records candidates;
//! - [`supervisor`]: orchestrates the pipeline and graceful shutdown;
//! - [`shutdown`]: cross-platform shutdown signal handling.

mod producer;
mod shutdown;
mod supervisor;
mod worker;

pub use supervisor::{RunReport, Supervisor};
