//! Job submission.
//!
//! Issues exactly one create call against the provider. A failed
//! create is never retried, and a caller cancellation observed before
//! or during the call is reported distinctly from a provider
//! rejection.

use tokio_util::sync::CancellationToken;

use mediaforge_core::job::JobSpec;
use mediaforge_core::operation::OperationHandle;
use mediaforge_provider::OperationsClient;

/// Why a submission did not produce an operation handle.
#[derive(Debug, thiserror::Error)]
pub enum SubmissionError {
    /// The caller cancelled before or during the create call.
    #[error("Submission cancelled by caller")]
    Cancelled,

    /// The provider rejected the create call.
    #[error("Provider rejected the job: {message}")]
    Rejected {
        /// Provider-side rejection detail.
        message: String,
    },
}

/// Submit `spec` to the provider, returning an opaque operation handle.
///
/// Performs exactly one outbound call and creates no local state. The
/// cancellation token is checked before the call and raced against it,
/// so a cancelled caller never waits out a slow create.
pub async fn submit(
    client: &dyn OperationsClient,
    spec: &JobSpec,
    cancel: &CancellationToken,
) -> Result<OperationHandle, SubmissionError> {
    if cancel.is_cancelled() {
        return Err(SubmissionError::Cancelled);
    }

    let result = tokio::select! {
        biased;
        _ = cancel.cancelled() => return Err(SubmissionError::Cancelled),
        result = client.create(spec) => result,
    };

    match result {
        Ok(handle) => {
            tracing::info!(
                operation = %handle.name,
                model = spec.capability.id,
                "Job submitted",
            );
            Ok(handle)
        }
        Err(e) => {
            tracing::warn!(error = %e, model = spec.capability.id, "Job submission rejected");
            Err(SubmissionError::Rejected {
                message: e.to_string(),
            })
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use mediaforge_core::capability::{capability_for, MODEL_MOTION_1};
    use mediaforge_core::job::GenerationMode;
    use mediaforge_core::operation::Operation;
    use mediaforge_provider::ProviderError;

    fn test_spec() -> JobSpec {
        JobSpec::normalized(
            Some("test".to_string()),
            GenerationMode::TextToGeneration,
            capability_for(MODEL_MOTION_1).unwrap(),
            "16:9",
            None,
            None,
            "mfs://outputs/jobs".to_string(),
            None,
        )
        .unwrap()
    }

    /// Client scripted to accept or reject the create call.
    struct ScriptedClient {
        accept: bool,
        create_calls: AtomicUsize,
    }

    #[async_trait]
    impl OperationsClient for ScriptedClient {
        async fn create(&self, _spec: &JobSpec) -> Result<OperationHandle, ProviderError> {
            self.create_calls.fetch_add(1, Ordering::SeqCst);
            if self.accept {
                Ok(OperationHandle {
                    name: "operations/op-1".to_string(),
                })
            } else {
                Err(ProviderError::Api {
                    status: 400,
                    body: "unsupported model".to_string(),
                })
            }
        }

        async fn get_status(&self, _handle: &OperationHandle) -> Result<Operation, ProviderError> {
            unreachable!("submission tests never poll");
        }

        async fn cancel(&self, _handle: &OperationHandle) -> Result<(), ProviderError> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn successful_submission_returns_handle() {
        let client = ScriptedClient {
            accept: true,
            create_calls: AtomicUsize::new(0),
        };
        let handle = submit(&client, &test_spec(), &CancellationToken::new())
            .await
            .unwrap();
        assert_eq!(handle.name, "operations/op-1");
        assert_eq!(client.create_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn rejection_is_not_retried() {
        let client = ScriptedClient {
            accept: false,
            create_calls: AtomicUsize::new(0),
        };
        let result = submit(&client, &test_spec(), &CancellationToken::new()).await;
        assert_matches!(result, Err(SubmissionError::Rejected { .. }));
        assert_eq!(client.create_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn pre_cancelled_token_skips_the_network_call() {
        let client = ScriptedClient {
            accept: true,
            create_calls: AtomicUsize::new(0),
        };
        let cancel = CancellationToken::new();
        cancel.cancel();

        let result = submit(&client, &test_spec(), &cancel).await;
        assert_matches!(result, Err(SubmissionError::Cancelled));
        assert_eq!(client.create_calls.load(Ordering::SeqCst), 0);
    }
}
