//! Long-running generation job orchestration.
//!
//! Drives one generation job end to end: submit the request to the
//! provider, poll the resulting remote operation to completion under a
//! bounded deadline while honoring caller cancellation, stage every
//! produced artifact locally (isolating per-artifact failures), and
//! reduce everything into a single [`mediaforge_core::outcome::JobOutcome`].
//!
//! The public entry point is [`job::run_job`]; it never returns an
//! error — total failure is still a `JobOutcome`.

pub mod job;
pub mod materialize;
pub mod notify;
pub mod outcome;
pub mod poller;
pub mod submit;

pub use job::run_job;
pub use notify::{ChannelSink, NullSink, ProgressNotification, ProgressSink, ProgressStatus};
pub use poller::{PollerConfig, TerminalState};
pub use submit::SubmissionError;
