// Service exports
pub mod artifact;
pub mod loader;
pub mod model;
pub mod predictor;

pub use artifact::{ArtifactError, ArtifactFetcher};
pub use loader::{LoadError, LoadPolicy, ModelLoader};
pub use model::{load_artifact, FareRegressor, ModelArtifact, ModelError};
pub use predictor::{FarePredictor, PredictionError, Quote};
