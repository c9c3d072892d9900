//! Outcome reporting.
//!
//! Reduces a job's terminal condition and its per-artifact
//! materialization results into one [`JobOutcome`]. The mapping is a
//! pure function of its inputs and never fails.

use std::time::Duration;

use mediaforge_core::outcome::{JobOutcome, JobStatus, MaterializedArtifact};

use crate::poller::TerminalState;
use crate::submit::SubmissionError;

/// How a job ended, before artifact accounting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobEnd {
    /// The create call failed; polling never started.
    SubmissionFailed,
    /// The provider reported a terminal error.
    OperationFailed,
    /// The operation deadline elapsed.
    TimedOut,
    /// The caller cancelled.
    Cancelled,
    /// The operation completed without error.
    Succeeded,
}

impl From<&TerminalState> for JobEnd {
    fn from(terminal: &TerminalState) -> Self {
        match terminal {
            TerminalState::Succeeded(_) => JobEnd::Succeeded,
            TerminalState::OperationFailed { .. } => JobEnd::OperationFailed,
            TerminalState::TimedOut => JobEnd::TimedOut,
            TerminalState::Cancelled => JobEnd::Cancelled,
        }
    }
}

impl From<&SubmissionError> for JobEnd {
    fn from(error: &SubmissionError) -> Self {
        match error {
            // A caller cancellation during submit is still a
            // cancellation, not a provider rejection.
            SubmissionError::Cancelled => JobEnd::Cancelled,
            SubmissionError::Rejected { .. } => JobEnd::SubmissionFailed,
        }
    }
}

/// Derive the final [`JobOutcome`].
///
/// Non-success terminals map directly to their status with no
/// artifacts considered. A success with an empty artifact list is
/// surfaced as [`JobStatus::NoArtifacts`]; with artifacts it is
/// [`JobStatus::Succeeded`] only when every staging attempt succeeded
/// (or none was requested), else [`JobStatus::PartialFailure`].
pub fn report(
    end: JobEnd,
    artifacts: Vec<MaterializedArtifact>,
    elapsed: Duration,
) -> JobOutcome {
    let (status, artifacts) = match end {
        JobEnd::SubmissionFailed => (JobStatus::SubmissionFailed, Vec::new()),
        JobEnd::OperationFailed => (JobStatus::OperationFailed, Vec::new()),
        JobEnd::TimedOut => (JobStatus::TimedOut, Vec::new()),
        JobEnd::Cancelled => (JobStatus::Cancelled, Vec::new()),
        JobEnd::Succeeded => {
            if artifacts.is_empty() {
                (JobStatus::NoArtifacts, artifacts)
            } else if artifacts.iter().all(|a| a.error.is_none()) {
                (JobStatus::Succeeded, artifacts)
            } else {
                (JobStatus::PartialFailure, artifacts)
            }
        }
    };

    JobOutcome {
        status,
        artifacts,
        elapsed,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    use mediaforge_core::operation::ArtifactRef;

    fn artifact(uri: &str) -> ArtifactRef {
        ArtifactRef {
            uri: uri.to_string(),
            media_type: "video/mp4".to_string(),
        }
    }

    fn staged(uri: &str) -> MaterializedArtifact {
        MaterializedArtifact::staged(artifact(uri), PathBuf::from("/tmp/out").join("clip.mp4"))
    }

    fn failed(uri: &str) -> MaterializedArtifact {
        MaterializedArtifact::failed(artifact(uri), "404".to_string())
    }

    #[test]
    fn success_with_empty_list_is_no_artifacts() {
        let outcome = report(JobEnd::Succeeded, Vec::new(), Duration::from_secs(42));
        assert_eq!(outcome.status, JobStatus::NoArtifacts);
        assert!(outcome.artifacts.is_empty());
    }

    #[test]
    fn success_with_all_staged_is_succeeded() {
        let outcome = report(
            JobEnd::Succeeded,
            vec![staged("mfs://out/a.mp4"), staged("mfs://out/b.mp4")],
            Duration::from_secs(42),
        );
        assert_eq!(outcome.status, JobStatus::Succeeded);
        assert_eq!(outcome.artifacts.len(), 2);
    }

    #[test]
    fn success_without_staging_requested_is_succeeded() {
        let outcome = report(
            JobEnd::Succeeded,
            vec![MaterializedArtifact::remote_only(artifact("mfs://out/a.mp4"))],
            Duration::from_secs(42),
        );
        assert_eq!(outcome.status, JobStatus::Succeeded);
    }

    #[test]
    fn one_staging_failure_is_partial_failure() {
        let outcome = report(
            JobEnd::Succeeded,
            vec![
                staged("mfs://out/a.mp4"),
                failed("mfs://out/b.mp4"),
                staged("mfs://out/c.mp4"),
            ],
            Duration::from_secs(42),
        );
        assert_eq!(outcome.status, JobStatus::PartialFailure);
        assert!(outcome.artifacts[0].local_path.is_some());
        assert!(outcome.artifacts[1].error.is_some());
        assert!(outcome.artifacts[2].local_path.is_some());
    }

    #[test]
    fn non_success_terminals_carry_no_artifacts() {
        for end in [
            JobEnd::SubmissionFailed,
            JobEnd::OperationFailed,
            JobEnd::TimedOut,
            JobEnd::Cancelled,
        ] {
            // Even if artifacts are passed in, they are not considered.
            let outcome = report(end, vec![staged("mfs://out/a.mp4")], Duration::ZERO);
            assert!(outcome.artifacts.is_empty(), "{end:?} must drop artifacts");
        }
    }

    #[test]
    fn direct_status_mapping() {
        let cases = [
            (JobEnd::SubmissionFailed, JobStatus::SubmissionFailed),
            (JobEnd::OperationFailed, JobStatus::OperationFailed),
            (JobEnd::TimedOut, JobStatus::TimedOut),
            (JobEnd::Cancelled, JobStatus::Cancelled),
        ];
        for (end, expected) in cases {
            assert_eq!(report(end, Vec::new(), Duration::ZERO).status, expected);
        }
    }

    #[test]
    fn report_is_idempotent() {
        let inputs = vec![staged("mfs://out/a.mp4"), failed("mfs://out/b.mp4")];
        let first = report(JobEnd::Succeeded, inputs.clone(), Duration::from_secs(7));
        let second = report(JobEnd::Succeeded, inputs, Duration::from_secs(7));
        assert_eq!(first, second);
    }

    #[test]
    fn submission_cancel_maps_to_cancelled() {
        assert_eq!(JobEnd::from(&SubmissionError::Cancelled), JobEnd::Cancelled);
        assert_eq!(
            JobEnd::from(&SubmissionError::Rejected {
                message: "bad model".to_string()
            }),
            JobEnd::SubmissionFailed
        );
    }
}
