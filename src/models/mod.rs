// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{
    Airline, City, Coordinates, FeatureVector, ItineraryInput, LayerStyle, MapLine, MapPoint,
    PredictionResult, RouteMapSpec, Stops, TimeOfDay, TravelClass, UnknownLabel, ValidationError,
    ViewState, FEATURE_COUNT, FEATURE_NAMES, MAX_DURATION_HOURS,
};
pub use requests::{PredictRequest, RouteQuery};
pub use responses::{ErrorResponse, FormOptionsResponse, HealthResponse, PredictResponse};
