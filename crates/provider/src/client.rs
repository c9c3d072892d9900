//! The operations client trait and its error type.
//!
//! The orchestrator is written against [`OperationsClient`] so that
//! tests (and alternative providers) can substitute the transport.

use async_trait::async_trait;

use mediaforge_core::job::JobSpec;
use mediaforge_core::operation::{Operation, OperationHandle};

/// Errors from the provider transport layer.
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    /// The HTTP request itself failed (network, DNS, TLS, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The provider returned a non-2xx status code.
    #[error("Provider API error ({status}): {body}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },
}

/// Abstract remote operation API.
///
/// Three calls cover everything the orchestrator needs: create one
/// operation, fetch its latest status, and (best-effort) abandon it.
#[async_trait]
pub trait OperationsClient: Send + Sync {
    /// Create a remote generation operation from `spec`.
    ///
    /// Called exactly once per job; a failed create is never retried.
    async fn create(&self, spec: &JobSpec) -> Result<OperationHandle, ProviderError>;

    /// Fetch the latest status snapshot for `handle`.
    async fn get_status(&self, handle: &OperationHandle) -> Result<Operation, ProviderError>;

    /// Ask the provider to abandon a running operation.
    ///
    /// Best-effort: used when the caller cancels; a failure here never
    /// changes the local outcome.
    async fn cancel(&self, handle: &OperationHandle) -> Result<(), ProviderError>;
}
