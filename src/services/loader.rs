use crate::services::artifact::{ArtifactError, ArtifactFetcher};
use crate::services::model::{load_artifact, FareRegressor, ModelError};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::OnceCell;

/// When the model is first loaded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LoadPolicy {
    /// On the first prediction request
    #[default]
    Lazy,
    /// Once at startup; requests never trigger a load
    Eager,
}

/// Errors that can occur while acquiring the model
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("download failed: {0}")]
    Download(#[from] ArtifactError),

    #[error("no artifact at {0} and remote fetching is disabled")]
    Missing(PathBuf),

    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("artifact at {path} is unusable: {source}")]
    Corrupt {
        path: PathBuf,
        #[source]
        source: ModelError,
    },
}

/// Process-wide, load-once holder for the fare model
///
/// Concurrent first callers coalesce onto a single load. A failed load leaves
/// the holder empty so a later call can try again. The network is only
/// touched when no local copy exists; the local copy is always deserialized.
pub struct ModelLoader {
    file_id: String,
    local_path: PathBuf,
    fetcher: Option<ArtifactFetcher>,
    policy: LoadPolicy,
    handle: OnceCell<Arc<dyn FareRegressor>>,
}

impl ModelLoader {
    pub fn new(
        file_id: String,
        local_path: PathBuf,
        fetcher: Option<ArtifactFetcher>,
        policy: LoadPolicy,
    ) -> Self {
        Self {
            file_id,
            local_path,
            fetcher,
            policy,
            handle: OnceCell::new(),
        }
    }

    /// A loader that is already holding a model
    pub fn preloaded(model: Arc<dyn FareRegressor>) -> Self {
        Self {
            file_id: String::new(),
            local_path: PathBuf::new(),
            fetcher: None,
            policy: LoadPolicy::Eager,
            handle: OnceCell::new_with(Some(model)),
        }
    }

    pub fn policy(&self) -> LoadPolicy {
        self.policy
    }

    pub fn local_path(&self) -> &Path {
        &self.local_path
    }

    /// The loaded model, if a load has succeeded
    pub fn current(&self) -> Option<Arc<dyn FareRegressor>> {
        self.handle.get().cloned()
    }

    /// Return the model, loading it first if this is the first use
    pub async fn get_or_load(&self) -> Result<Arc<dyn FareRegressor>, LoadError> {
        self.handle
            .get_or_try_init(|| self.load())
            .await
            .map(Arc::clone)
    }

    async fn load(&self) -> Result<Arc<dyn FareRegressor>, LoadError> {
        let cached = tokio::fs::try_exists(&self.local_path)
            .await
            .map_err(|source| LoadError::Read {
                path: self.local_path.clone(),
                source,
            })?;

        if cached {
            tracing::info!("Using cached model artifact at {}", self.local_path.display());
        } else {
            let fetcher = self
                .fetcher
                .as_ref()
                .ok_or_else(|| LoadError::Missing(self.local_path.clone()))?;
            fetcher.fetch_to(&self.file_id, &self.local_path).await?;
        }

        let bytes = tokio::fs::read(&self.local_path).await.map_err(|source| LoadError::Read {
            path: self.local_path.clone(),
            source,
        })?;

        let model = match load_artifact(&bytes) {
            Ok(model) => model,
            Err(source) => {
                // A fresh download that does not decode must not shadow the store
                if !cached {
                    if let Err(e) = tokio::fs::remove_file(&self.local_path).await {
                        tracing::warn!("Failed to discard undecodable artifact at {}: {}", self.local_path.display(), e);
                    }
                }
                return Err(LoadError::Corrupt {
                    path: self.local_path.clone(),
                    source,
                });
            }
        };

        tracing::info!("Loaded {} model ({} bytes)", model.name(), bytes.len());
        Ok(model)
    }
}
