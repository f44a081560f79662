use reqwest::{Client, StatusCode};
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur when downloading the model artifact
#[derive(Debug, Error)]
pub enum ArtifactError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("artifact store returned {0}")]
    Status(StatusCode),

    #[error("failed to write artifact: {0}")]
    Io(#[from] std::io::Error),
}

impl ArtifactError {
    /// Whether a second attempt could plausibly succeed
    fn is_transient(&self) -> bool {
        match self {
            ArtifactError::RequestError(e) => e.is_timeout() || e.is_connect() || e.is_request(),
            ArtifactError::Status(status) => {
                status.is_server_error() || *status == StatusCode::TOO_MANY_REQUESTS
            }
            ArtifactError::Io(_) => false,
        }
    }
}

/// Client for the remote object store holding the trained model
///
/// Artifacts are addressed by a fixed content identifier and downloaded as
/// opaque bytes.
pub struct ArtifactFetcher {
    base_url: String,
    client: Client,
    retries: u32,
}

impl ArtifactFetcher {
    /// Create a new fetcher
    pub fn new(base_url: String, timeout_secs: u64, retries: u32) -> Result<Self, ArtifactError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()?;

        Ok(Self {
            base_url,
            client,
            retries,
        })
    }

    /// Download URL for a content identifier
    pub fn url_for(&self, file_id: &str) -> String {
        format!(
            "{}?id={}&export=download&confirm=t",
            self.base_url.trim_end_matches('/'),
            urlencoding::encode(file_id)
        )
    }

    /// Download an artifact into `destination`, returning its size in bytes
    ///
    /// The body is written beside the destination and renamed into place, so
    /// an interrupted download never leaves a partial artifact behind.
    pub async fn fetch_to(&self, file_id: &str, destination: &Path) -> Result<u64, ArtifactError> {
        let mut attempt = 0;
        loop {
            match self.fetch_once(file_id, destination).await {
                Ok(size) => return Ok(size),
                Err(e) if e.is_transient() && attempt < self.retries => {
                    attempt += 1;
                    tracing::warn!("Artifact download failed ({}), retrying ({}/{})", e, attempt, self.retries);
                }
                Err(e) => return Err(e),
            }
        }
    }

    async fn fetch_once(&self, file_id: &str, destination: &Path) -> Result<u64, ArtifactError> {
        let url = self.url_for(file_id);
        tracing::info!("Downloading model artifact {} from {}", file_id, url);

        let response = self.client.get(&url).send().await?;
        if !response.status().is_success() {
            return Err(ArtifactError::Status(response.status()));
        }
        let bytes = response.bytes().await?;

        if let Some(parent) = destination.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }
        let partial = destination.with_extension("part");
        tokio::fs::write(&partial, &bytes).await?;
        tokio::fs::rename(&partial, destination).await?;

        tracing::info!("Stored {} byte artifact at {}", bytes.len(), destination.display());
        Ok(bytes.len() as u64)
    }
}
