use crate::core::{encode_itinerary, inverse_log_fare, EncodingError};
use crate::models::{FeatureVector, ItineraryInput, PredictionResult, ValidationError};
use crate::services::loader::{LoadError, LoadPolicy, ModelLoader};
use crate::services::model::{FareRegressor, ModelError};
use chrono::NaiveDate;
use std::sync::Arc;
use thiserror::Error;
use uuid::Uuid;

/// Why a single prediction could not be produced
///
/// Every variant aborts only the request that raised it.
#[derive(Debug, Error)]
pub enum PredictionError {
    #[error("{0}")]
    Configuration(#[from] EncodingError),

    #[error("{0}")]
    Validation(#[from] ValidationError),

    #[error("model artifact unavailable: {0}")]
    ArtifactUnavailable(String),

    #[error("model artifact corrupt: {0}")]
    ArtifactCorrupt(String),

    #[error("model has not been loaded")]
    ModelUninitialized,

    #[error("inference failed: {0}")]
    InferenceFailure(String),
}

impl From<LoadError> for PredictionError {
    fn from(err: LoadError) -> Self {
        match err {
            LoadError::Corrupt { .. } => PredictionError::ArtifactCorrupt(err.to_string()),
            LoadError::Download(_) | LoadError::Missing(_) | LoadError::Read { .. } => {
                PredictionError::ArtifactUnavailable(err.to_string())
            }
        }
    }
}

impl From<ModelError> for PredictionError {
    fn from(err: ModelError) -> Self {
        PredictionError::InferenceFailure(err.to_string())
    }
}

/// One completed prediction
#[derive(Debug, Clone)]
pub struct Quote {
    pub prediction_id: Uuid,
    pub days_left: u32,
    pub features: FeatureVector,
    pub result: PredictionResult,
    pub model: String,
}

/// Encode, infer and convert back to rupees
#[derive(Clone)]
pub struct FarePredictor {
    loader: Arc<ModelLoader>,
    allow_same_city: bool,
}

impl FarePredictor {
    pub fn new(loader: Arc<ModelLoader>, allow_same_city: bool) -> Self {
        Self {
            loader,
            allow_same_city,
        }
    }

    pub fn loader(&self) -> &ModelLoader {
        &self.loader
    }

    /// Run one prediction for an itinerary departing on or after `today`
    pub async fn predict(&self, input: &ItineraryInput, today: NaiveDate) -> Result<Quote, PredictionError> {
        input.validate(today, self.allow_same_city)?;
        let features = encode_itinerary(input, today)?;

        let model = self.model().await?;
        let log_price = model.predict(&features)?;
        let result = inverse_log_fare(log_price).ok_or_else(|| {
            PredictionError::InferenceFailure(format!("model returned unusable output {}", log_price))
        })?;

        tracing::debug!(
            "Predicted {} for {} {} -> {} (log {:.4})",
            result.price,
            input.airline,
            input.source_city,
            input.destination_city,
            log_price
        );

        Ok(Quote {
            prediction_id: Uuid::new_v4(),
            days_left: features.days_left(),
            features,
            result,
            model: model.name().to_string(),
        })
    }

    async fn model(&self) -> Result<Arc<dyn FareRegressor>, PredictionError> {
        match self.loader.policy() {
            LoadPolicy::Lazy => Ok(self.loader.get_or_load().await?),
            LoadPolicy::Eager => self.loader.current().ok_or(PredictionError::ModelUninitialized),
        }
    }
}
