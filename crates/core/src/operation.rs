//! Remote operation types.
//!
//! The provider tracks each submitted job as a long-running operation.
//! Its status payload is loosely structured on the wire; this module
//! gives it a strict shape: a monotonic `done` flag, an explicit
//! optional metadata struct, and an error that is mutually exclusive
//! with the artifact list once the operation is done.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Handle
// ---------------------------------------------------------------------------

/// Opaque handle to a remote operation, assigned at submission.
///
/// Carries the provider's operation name and nothing else; no status is
/// known until the first poll.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperationHandle {
    /// Provider-assigned operation name.
    pub name: String,
}

// ---------------------------------------------------------------------------
// Status payload
// ---------------------------------------------------------------------------

/// One remote-produced output referenced by the terminal operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtifactRef {
    /// Remote URI of the produced artifact.
    pub uri: String,
    /// Declared media type (e.g. `video/mp4`).
    #[serde(default)]
    pub media_type: String,
}

/// Optional status hints attached to an in-flight operation.
///
/// Absence of the whole struct, or of any field, is a normal case.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperationMetadata {
    /// Coarse provider-side state label (e.g. `"RENDERING"`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state_label: Option<String>,
    /// Completion percentage (0-100), when the provider exposes one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub progress_percent: Option<u8>,
}

/// Terminal error payload reported by the provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperationError {
    /// Provider error code.
    #[serde(default)]
    pub code: i32,
    /// Human-readable error description.
    pub message: String,
}

/// Snapshot of a remote operation's status.
///
/// `done` is monotonic: once the provider reports `true` it never
/// reverts. When `done` is true, `error` and a non-empty `artifacts`
/// list are mutually exclusive; both absent is the valid (if unusual)
/// zero-artifact success.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Operation {
    /// Provider-assigned operation name.
    pub name: String,
    /// Whether the operation has reached a terminal state.
    #[serde(default)]
    pub done: bool,
    /// Free-form status hints, modeled as explicit optional fields.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<OperationMetadata>,
    /// Terminal error, if the operation failed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<OperationError>,
    /// Artifacts produced by a successful operation.
    #[serde(default)]
    pub artifacts: Vec<ArtifactRef>,
}

impl Operation {
    /// State label from the metadata, if present.
    pub fn state_label(&self) -> Option<&str> {
        self.metadata.as_ref()?.state_label.as_deref()
    }

    /// Progress percentage from the metadata, if present.
    pub fn progress_percent(&self) -> Option<u8> {
        self.metadata.as_ref()?.progress_percent
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
