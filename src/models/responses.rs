use serde::{Deserialize, Serialize};
use crate::models::domain::{Airline, City, Stops, TimeOfDay, TravelClass};

/// Response for the predict endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictResponse {
    pub prediction_id: String,
    pub price: u64,
    /// Price as shown on the form, e.g. `₹5,953`
    pub display: String,
    pub log_price: f64,
    pub days_left: u32,
    pub features: Vec<f64>,
    pub model: String,
}

/// Selectable values and bounds for every form field
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormOptionsResponse {
    pub airlines: Vec<Airline>,
    pub cities: Vec<City>,
    pub times_of_day: Vec<TimeOfDay>,
    pub stops: Vec<Stops>,
    pub travel_classes: Vec<TravelClass>,
    pub min_duration: f64,
    pub max_duration: f64,
    pub min_departure_date: chrono::NaiveDate,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub model_loaded: bool,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}
