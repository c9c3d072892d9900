//! REST implementation of the operations client.
//!
//! Wraps the provider's HTTP API (operation creation, status retrieval,
//! cancellation) using [`reqwest`]. Endpoints:
//!
//! - `POST {base}/v1/operations` — create
//! - `GET  {base}/v1/operations/{name}` — status
//! - `POST {base}/v1/operations/{name}:cancel` — abandon

use async_trait::async_trait;
use serde::Serialize;

use mediaforge_core::job::JobSpec;
use mediaforge_core::operation::{Operation, OperationHandle};

use crate::client::{OperationsClient, ProviderError};
use crate::config::ProviderConfig;

/// HTTP client for a single generation provider.
pub struct HttpOperationsClient {
    client: reqwest::Client,
    config: ProviderConfig,
}

/// Request body for operation creation.
#[derive(Debug, Serialize)]
struct CreateRequest<'a> {
    model: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    prompt: Option<&'a str>,
    aspect_ratio: &'a str,
    artifact_count: u32,
    duration_secs: u32,
    output_uri: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    reference_image: Option<ReferenceImageBody<'a>>,
}

/// Reference-image block, present only for image-to-generation jobs.
#[derive(Debug, Serialize)]
struct ReferenceImageBody<'a> {
    uri: &'a str,
    media_type: &'a str,
}

impl HttpOperationsClient {
    /// Create a client from an immutable provider config.
    pub fn new(config: ProviderConfig) -> Result<Self, ProviderError> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()?;
        Ok(Self { client, config })
    }

    /// Create a client reusing an existing [`reqwest::Client`]
    /// (useful for connection pooling across providers).
    pub fn with_client(client: reqwest::Client, config: ProviderConfig) -> Self {
        Self { client, config }
    }

    // ---- private helpers ----

    /// Attach the bearer token when the config carries one.
    fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.config.api_key {
            Some(key) => request.bearer_auth(key),
            None => request,
        }
    }

    /// Ensure the response has a success status code. Returns the
    /// response unchanged on success, or a [`ProviderError::Api`]
    /// containing the status and body text on failure.
    async fn ensure_success(
        response: reqwest::Response,
    ) -> Result<reqwest::Response, ProviderError> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(ProviderError::Api {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }

    /// Parse a successful JSON response body into the expected type.
    async fn parse_response<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, ProviderError> {
        let response = Self::ensure_success(response).await?;
        Ok(response.json::<T>().await?)
    }

    /// Assert the response has a success status code, discarding the body.
    async fn check_status(response: reqwest::Response) -> Result<(), ProviderError> {
        Self::ensure_success(response).await?;
        Ok(())
    }
}

#[async_trait]
impl OperationsClient for HttpOperationsClient {
    async fn create(&self, spec: &JobSpec) -> Result<OperationHandle, ProviderError> {
        let body = CreateRequest {
            model: spec.capability.id,
            prompt: spec.prompt.as_deref(),
            aspect_ratio: &spec.aspect_ratio,
            artifact_count: spec.artifact_count,
            duration_secs: spec.duration_secs,
            output_uri: &spec.output_uri,
            reference_image: spec.reference_image().map(|img| ReferenceImageBody {
                uri: &img.uri,
                media_type: &img.media_type,
            }),
        };

        let response = self
            .authorize(
                self.client
                    .post(format!("{}/v1/operations", self.config.base_url)),
            )
            .json(&body)
            .send()
            .await?;

        let handle: OperationHandle = Self::parse_response(response).await?;

        tracing::info!(
            operation = %handle.name,
            model = spec.capability.id,
            artifact_count = spec.artifact_count,
            "Generation operation created",
        );

        Ok(handle)
    }

    async fn get_status(&self, handle: &OperationHandle) -> Result<Operation, ProviderError> {
        let response = self
            .authorize(self.client.get(format!(
                "{}/v1/operations/{}",
                self.config.base_url, handle.name
            )))
            .send()
            .await?;

        Self::parse_response(response).await
    }

    async fn cancel(&self, handle: &OperationHandle) -> Result<(), ProviderError> {
        let response = self
            .authorize(self.client.post(format!(
                "{}/v1/operations/{}:cancel",
                self.config.base_url, handle.name
            )))
            .send()
            .await?;

        Self::check_status(response).await
    }
}
