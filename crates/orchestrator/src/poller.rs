//! Operation polling state machine.
//!
//! Repeatedly fetches the status of a remote operation on a fixed
//! cadence until it reaches a terminal state, the operation-scoped
//! deadline elapses, or the caller cancels. Every suspension point —
//! including the status fetch itself — races caller cancellation and
//! the deadline in a single `tokio::select!`, so a hung network call
//! can never outlive the deadline and a cancellation is never missed
//! mid-call. The select is `biased` with the cancellation arm first:
//! when cancellation and a completed fetch are ready in the same wait
//! cycle, cancellation wins.

use std::time::Duration;

use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

use mediaforge_core::operation::{Operation, OperationHandle};
use mediaforge_provider::OperationsClient;

use crate::notify::{ProgressNotification, ProgressSink, ProgressStatus};

/// Delay between consecutive status fetches.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(15);

/// Ceiling on one operation's lifetime, measured from poll start.
pub const DEFAULT_OPERATION_DEADLINE: Duration = Duration::from_secs(5 * 60);

/// Tunable polling parameters.
#[derive(Debug, Clone)]
pub struct PollerConfig {
    /// Delay between consecutive status fetches.
    pub interval: Duration,
    /// Operation-scoped deadline, independent of the caller's lifetime.
    pub deadline: Duration,
}

impl Default for PollerConfig {
    fn default() -> Self {
        Self {
            interval: DEFAULT_POLL_INTERVAL,
            deadline: DEFAULT_OPERATION_DEADLINE,
        }
    }
}

/// State the poller does not transition out of.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TerminalState {
    /// The operation completed without error. The artifact list may
    /// still be empty; the outcome reporter surfaces that case.
    Succeeded(Operation),
    /// The provider reported a terminal error.
    OperationFailed {
        /// Provider error code.
        code: i32,
        /// Provider error message.
        message: String,
    },
    /// The operation deadline elapsed before `done` became true. The
    /// remote operation may still be running; no remote cancel is sent.
    TimedOut,
    /// The caller cancelled while polling was in flight.
    Cancelled,
}

/// Poll `handle` to a terminal state.
///
/// The operation deadline runs from `started_at` — the submission
/// instant — not from poll start, so a slow create call eats into the
/// operation's time budget. Emits a heartbeat notification before
/// every status fetch (so caller-side inactivity timers reset before
/// the potentially slow network call, not after), a richer status
/// update after each successful non-terminal fetch, and exactly one
/// final notification carrying the terminal status. On caller
/// cancellation a best-effort remote cancel is attempted; on timeout
/// it is not.
pub async fn poll_operation(
    client: &dyn OperationsClient,
    handle: &OperationHandle,
    sink: &dyn ProgressSink,
    cancel: &CancellationToken,
    config: &PollerConfig,
    started_at: Instant,
) -> TerminalState {
    let deadline = started_at + config.deadline;
    let terminal = poll_loop(client, handle, sink, cancel, config.interval, deadline).await;

    if matches!(terminal, TerminalState::Cancelled) {
        abandon_remote(client, handle).await;
    }

    sink.notify(terminal_notification(&terminal));
    terminal
}

/// The polling loop proper. Returns the first terminal state reached.
async fn poll_loop(
    client: &dyn OperationsClient,
    handle: &OperationHandle,
    sink: &dyn ProgressSink,
    cancel: &CancellationToken,
    interval: Duration,
    deadline: Instant,
) -> TerminalState {
    loop {
        // Heartbeat before the fetch: the caller's idle timer must
        // reset before the slow part starts, not after.
        sink.notify(ProgressNotification::new(
            ProgressStatus::Polling,
            format!("Checking status of operation {}", handle.name),
        ));

        let fetch = tokio::select! {
            biased;
            _ = cancel.cancelled() => return TerminalState::Cancelled,
            _ = tokio::time::sleep_until(deadline) => return TerminalState::TimedOut,
            result = client.get_status(handle) => result,
        };

        match fetch {
            Ok(op) if op.done => {
                return match op.error {
                    Some(err) => {
                        tracing::warn!(
                            operation = %handle.name,
                            code = err.code,
                            error = %err.message,
                            "Operation failed",
                        );
                        TerminalState::OperationFailed {
                            code: err.code,
                            message: err.message,
                        }
                    }
                    None => {
                        tracing::info!(
                            operation = %handle.name,
                            artifact_count = op.artifacts.len(),
                            "Operation completed",
                        );
                        TerminalState::Succeeded(op)
                    }
                };
            }
            Ok(op) => {
                sink.notify(status_update(&op));
            }
            Err(e) => {
                // Transient: notify and stay on cadence.
                tracing::warn!(
                    operation = %handle.name,
                    error = %e,
                    "Status fetch failed; will retry on next interval",
                );
                sink.notify(ProgressNotification::new(
                    ProgressStatus::PollingIssue,
                    format!("Status check failed ({e}); continuing to poll"),
                ));
            }
        }

        // Wait for the next tick, racing cancellation and the deadline.
        tokio::select! {
            biased;
            _ = cancel.cancelled() => return TerminalState::Cancelled,
            _ = tokio::time::sleep_until(deadline) => return TerminalState::TimedOut,
            _ = tokio::time::sleep(interval) => {}
        }
    }
}

/// Richer update emitted after a successful non-terminal fetch.
fn status_update(op: &Operation) -> ProgressNotification {
    let message = match op.state_label() {
        Some(label) => format!("Operation {} is {label}", op.name),
        None => format!("Operation {} is still running", op.name),
    };
    let notification = ProgressNotification::new(ProgressStatus::Processing, message);
    match op.progress_percent() {
        Some(percent) => notification.with_percent(percent.min(100)),
        None => notification,
    }
}

/// The single final notification for a job.
fn terminal_notification(terminal: &TerminalState) -> ProgressNotification {
    match terminal {
        TerminalState::Succeeded(op) => ProgressNotification::new(
            ProgressStatus::CompletedSuccessfully,
            format!(
                "Operation {} completed with {} artifact(s)",
                op.name,
                op.artifacts.len()
            ),
        )
        .with_percent(100),
        TerminalState::OperationFailed { code, message } => ProgressNotification::new(
            ProgressStatus::CompletedWithError,
            format!("Operation failed (code {code}): {message}"),
        ),
        TerminalState::TimedOut => ProgressNotification::new(
            ProgressStatus::CompletedWithError,
            "Operation timed out before completing".to_string(),
        ),
        TerminalState::Cancelled => ProgressNotification::new(
            ProgressStatus::CompletedWithError,
            "Operation cancelled by caller".to_string(),
        ),
    }
}

/// Best-effort remote abandon after a caller cancellation.
async fn abandon_remote(client: &dyn OperationsClient, handle: &OperationHandle) {
    match client.cancel(handle).await {
        Ok(()) => {
            tracing::info!(operation = %handle.name, "Remote operation abandoned");
        }
        Err(e) => {
            // The local outcome stays Cancelled regardless.
            tracing::warn!(
                operation = %handle.name,
                error = %e,
                "Failed to abandon remote operation",
            );
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
