//! Progress notification sink.
//!
//! The poller reports progress through an explicit [`ProgressSink`]
//! passed in at construction, decoupling it from whatever transport
//! the caller uses to surface notifications. [`ChannelSink`] forwards
//! to an unbounded mpsc channel; [`NullSink`] discards everything.

use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;

/// Lifecycle phase carried by a progress notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProgressStatus {
    /// The operation was created; polling is about to begin.
    Initiated,
    /// Heartbeat emitted immediately before a status fetch.
    Polling,
    /// A status fetch failed transiently; polling continues.
    PollingIssue,
    /// The provider reported in-flight progress.
    Processing,
    /// Terminal: the operation finished without error.
    CompletedSuccessfully,
    /// Terminal: the job ended in failure, timeout, or cancellation.
    CompletedWithError,
}

/// One progress message emitted to the caller's sink.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressNotification {
    /// Human-readable progress text.
    pub message: String,
    /// Lifecycle phase.
    pub status: ProgressStatus,
    /// Completion percentage (0-100), when known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub progress_percent: Option<u8>,
}

impl ProgressNotification {
    /// Create a notification without a percentage.
    pub fn new(status: ProgressStatus, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            status,
            progress_percent: None,
        }
    }

    /// Attach a completion percentage.
    pub fn with_percent(mut self, percent: u8) -> Self {
        self.progress_percent = Some(percent);
        self
    }
}

/// Destination for progress notifications.
///
/// Implementations must not block: the poller calls `notify` from
/// inside its polling loop.
pub trait ProgressSink: Send + Sync {
    /// Deliver one notification. Delivery failures are swallowed.
    fn notify(&self, notification: ProgressNotification);
}

/// Sink that forwards notifications to an unbounded mpsc channel.
///
/// A closed receiver is tolerated: notifications are dropped silently,
/// matching the side-channel nature of progress reporting.
pub struct ChannelSink {
    tx: mpsc::UnboundedSender<ProgressNotification>,
}

impl ChannelSink {
    /// Create a sink plus the receiving half for the caller.
    pub fn new() -> (Self, mpsc::UnboundedReceiver<ProgressNotification>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

impl ProgressSink for ChannelSink {
    fn notify(&self, notification: ProgressNotification) {
        let _ = self.tx.send(notification);
    }
}

/// Sink that discards every notification.
pub struct NullSink;

impl ProgressSink for NullSink {
    fn notify(&self, _notification: ProgressNotification) {}
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
