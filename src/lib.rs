//! Fare Predictor - flight ticket price prediction service
//!
//! Encodes an itinerary into the feature layout the fare model was trained
//! on, runs the model, and converts its log-scale output back to rupees.
//! Also builds the two-city route map shown beside the prediction form.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use crate::core::{encode_itinerary, format_rupees, inverse_log_fare, RouteMapper};
pub use models::{FeatureVector, ItineraryInput, PredictRequest, PredictResponse, PredictionResult, RouteMapSpec};
pub use services::{FarePredictor, ModelLoader, PredictionError};
