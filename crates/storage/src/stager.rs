//! Artifact staging trait and HTTP downloader.
//!
//! [`ArtifactStager`] is the seam between the orchestrator's
//! materialization step and actual object transfer. The shipped
//! implementation streams an HTTP(S) artifact to a local file.

use std::path::Path;

use async_trait::async_trait;
use futures::StreamExt;
use tokio::io::AsyncWriteExt;

/// Errors from a single staging attempt.
#[derive(Debug, thiserror::Error)]
pub enum StageError {
    /// The HTTP request failed (network, DNS, TLS, etc.).
    #[error("Download request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The remote returned a non-2xx status code.
    #[error("Download failed with status {status} for {uri}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// The artifact URI that failed.
        uri: String,
    },

    /// Writing the local file failed.
    #[error("Local write failed: {0}")]
    Io(#[from] std::io::Error),
}

/// Stages one remote artifact to one local destination.
#[async_trait]
pub trait ArtifactStager: Send + Sync {
    /// Copy `remote_uri` to `destination`, overwriting any existing file.
    async fn stage(&self, remote_uri: &str, destination: &Path) -> Result<(), StageError>;
}

/// HTTP(S) artifact downloader.
pub struct HttpArtifactStager {
    client: reqwest::Client,
}

impl HttpArtifactStager {
    /// Create a stager with a fresh connection pool.
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }

    /// Create a stager reusing an existing [`reqwest::Client`].
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

impl Default for HttpArtifactStager {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ArtifactStager for HttpArtifactStager {
    async fn stage(&self, remote_uri: &str, destination: &Path) -> Result<(), StageError> {
        let response = self.client.get(remote_uri).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(StageError::Api {
                status: status.as_u16(),
                uri: remote_uri.to_string(),
            });
        }

        if let Some(parent) = destination.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        let mut file = tokio::fs::File::create(destination).await?;
        let mut stream = response.bytes_stream();
        let mut bytes_written: u64 = 0;

        while let Some(chunk) = stream.next().await {
            let chunk = chunk?;
            file.write_all(&chunk).await?;
            bytes_written += chunk.len() as u64;
        }
        file.flush().await?;

        tracing::debug!(
            uri = remote_uri,
            destination = %destination.display(),
            bytes_written,
            "Artifact staged",
        );

        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// Serve exactly one HTTP response on an ephemeral local port and
    /// return the base URL to request it from.
    async fn serve_once(status_line: &'static str, body: &'static [u8]) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            // Drain the request headers; the content is irrelevant.
            let mut buf = [0u8; 1024];
            let _ = socket.read(&mut buf).await;

            let header = format!(
                "{status_line}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
                body.len()
            );
            socket.write_all(header.as_bytes()).await.unwrap();
            socket.write_all(body).await.unwrap();
            let _ = socket.shutdown().await;
        });

        format!("http://{addr}")
    }

    #[tokio::test]
    async fn stages_remote_bytes_to_local_file() {
        let base = serve_once("HTTP/1.1 200 OK", b"clip-bytes").await;
        let dir = tempfile::tempdir().unwrap();
        let destination = dir.path().join("clip.mp4");

        HttpArtifactStager::new()
            .stage(&format!("{base}/clip.mp4"), &destination)
            .await
            .unwrap();

        assert_eq!(std::fs::read(&destination).unwrap(), b"clip-bytes");
    }

    #[tokio::test]
    async fn creates_missing_parent_directories() {
        let base = serve_once("HTTP/1.1 200 OK", b"x").await;
        let dir = tempfile::tempdir().unwrap();
        let destination = dir.path().join("nested").join("deeper").join("clip.mp4");

        HttpArtifactStager::new()
            .stage(&format!("{base}/clip.mp4"), &destination)
            .await
            .unwrap();

        assert!(destination.exists());
    }

    #[tokio::test]
    async fn overwrites_an_existing_destination() {
        let base = serve_once("HTTP/1.1 200 OK", b"new-bytes").await;
        let dir = tempfile::tempdir().unwrap();
        let destination = dir.path().join("clip.mp4");
        std::fs::write(&destination, b"stale-and-longer-content").unwrap();

        HttpArtifactStager::new()
            .stage(&format!("{base}/clip.mp4"), &destination)
            .await
            .unwrap();

        assert_eq!(std::fs::read(&destination).unwrap(), b"new-bytes");
    }

    #[tokio::test]
    async fn non_success_status_is_an_api_error() {
        let base = serve_once("HTTP/1.1 404 Not Found", b"missing").await;
        let dir = tempfile::tempdir().unwrap();
        let destination = dir.path().join("clip.mp4");

        let result = HttpArtifactStager::new()
            .stage(&format!("{base}/clip.mp4"), &destination)
            .await;

        assert_matches!(result, Err(StageError::Api { status: 404, ref uri }) if uri.contains("clip.mp4"));
        // No partial file is left behind on a rejected download.
        assert!(!destination.exists());
    }

    #[tokio::test]
    async fn unreachable_remote_is_a_request_error() {
        // Bind-then-drop guarantees a port nothing is listening on.
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let dir = tempfile::tempdir().unwrap();
        let destination = dir.path().join("clip.mp4");

        let result = HttpArtifactStager::new()
            .stage(&format!("http://{addr}/clip.mp4"), &destination)
            .await;

        assert_matches!(result, Err(StageError::Request(_)));
    }
}
