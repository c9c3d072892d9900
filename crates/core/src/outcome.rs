//! Final job outcome types.
//!
//! A job always ends in exactly one [`JobOutcome`], whatever happened
//! along the way. The status derivation itself lives in the
//! orchestrator; these are the shared shapes it produces.

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::operation::ArtifactRef;

/// Overall status of a finished job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobStatus {
    /// Every requested artifact was produced and (if requested) staged.
    Succeeded,
    /// The operation succeeded but at least one artifact failed to stage.
    PartialFailure,
    /// The operation succeeded yet produced no artifacts.
    NoArtifacts,
    /// The create call was rejected or pre-empted; no polling happened.
    SubmissionFailed,
    /// The provider reported a terminal error.
    OperationFailed,
    /// The operation-scoped deadline elapsed before completion.
    TimedOut,
    /// The caller cancelled while the job was in flight.
    Cancelled,
}

/// One row of the final report: an artifact reference plus the result
/// of its (optional) local staging attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaterializedArtifact {
    /// The originating remote artifact reference.
    pub artifact: ArtifactRef,
    /// Local copy path, when staging succeeded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub local_path: Option<PathBuf>,
    /// Staging error, when staging was attempted and failed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl MaterializedArtifact {
    /// An artifact that was not staged locally (remote reference only).
    pub fn remote_only(artifact: ArtifactRef) -> Self {
        Self {
            artifact,
            local_path: None,
            error: None,
        }
    }

    /// An artifact whose local staging succeeded.
    pub fn staged(artifact: ArtifactRef, local_path: PathBuf) -> Self {
        Self {
            artifact,
            local_path: Some(local_path),
            error: None,
        }
    }

    /// An artifact whose local staging failed.
    pub fn failed(artifact: ArtifactRef, error: String) -> Self {
        Self {
            artifact,
            local_path: None,
            error: Some(error),
        }
    }
}

/// The single structured result every job run produces.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobOutcome {
    /// Derived overall status.
    pub status: JobStatus,
    /// Per-artifact results, in the operation's artifact order.
    pub artifacts: Vec<MaterializedArtifact>,
    /// Wall-clock time from submission to terminal state.
    pub elapsed: Duration,
}
