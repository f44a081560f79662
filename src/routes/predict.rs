use actix_web::{http::StatusCode, web, HttpResponse, Responder, ResponseError};
use validator::Validate;
use crate::core::{format_rupees, today_local, RouteMapper};
use crate::models::{
    Airline, City, ErrorResponse, FormOptionsResponse, HealthResponse, PredictRequest,
    PredictResponse, RouteQuery, Stops, TimeOfDay, TravelClass, MAX_DURATION_HOURS,
};
use crate::services::{FarePredictor, LoadPolicy, PredictionError};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub predictor: FarePredictor,
    pub mapper: RouteMapper,
}

/// Configure all prediction-related routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/health", web::get().to(health_check))
        .route("/options", web::get().to(form_options))
        .route("/predict", web::post().to(predict_price))
        .route("/route", web::get().to(route_map));
}

impl PredictionError {
    fn code(&self) -> &'static str {
        match self {
            PredictionError::Configuration(_) => "invalid_value",
            PredictionError::Validation(_) => "invalid_itinerary",
            PredictionError::ArtifactUnavailable(_) => "artifact_unavailable",
            PredictionError::ArtifactCorrupt(_) => "artifact_corrupt",
            PredictionError::ModelUninitialized => "model_uninitialized",
            PredictionError::InferenceFailure(_) => "inference_failure",
        }
    }
}

impl ResponseError for PredictionError {
    fn status_code(&self) -> StatusCode {
        match self {
            PredictionError::Configuration(_) | PredictionError::Validation(_) => StatusCode::BAD_REQUEST,
            PredictionError::ArtifactUnavailable(_) | PredictionError::ModelUninitialized => {
                StatusCode::SERVICE_UNAVAILABLE
            }
            PredictionError::ArtifactCorrupt(_) | PredictionError::InferenceFailure(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        HttpResponse::build(status).json(ErrorResponse {
            error: self.code().to_string(),
            message: self.to_string(),
            status_code: status.as_u16(),
        })
    }
}

/// Health check endpoint
async fn health_check(state: web::Data<AppState>) -> impl Responder {
    let loader = state.predictor.loader();
    let model_loaded = loader.current().is_some();
    // A lazy loader without a model is waiting for its first prediction
    let status = if model_loaded || loader.policy() == LoadPolicy::Lazy {
        "healthy"
    } else {
        "degraded"
    };

    HttpResponse::Ok().json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        model_loaded,
        timestamp: chrono::Utc::now(),
    })
}

/// Form field domains
///
/// GET /api/v1/options
async fn form_options() -> impl Responder {
    HttpResponse::Ok().json(FormOptionsResponse {
        airlines: Airline::ALL.to_vec(),
        cities: City::ALL.to_vec(),
        times_of_day: TimeOfDay::ALL.to_vec(),
        stops: Stops::ALL.to_vec(),
        travel_classes: TravelClass::ALL.to_vec(),
        min_duration: 0.0,
        max_duration: MAX_DURATION_HOURS,
        min_departure_date: today_local(),
    })
}

/// Predict a fare
///
/// POST /api/v1/predict
///
/// Request body:
/// ```json
/// {
///   "airline": "IndiGo",
///   "sourceCity": "Delhi",
///   "destinationCity": "Mumbai",
///   "departureTime": "Morning",
///   "arrivalTime": "Evening",
///   "stops": "one",
///   "travelClass": "Economy",
///   "duration": 2.5,
///   "departureDate": "2025-03-01"
/// }
/// ```
async fn predict_price(
    state: web::Data<AppState>,
    req: web::Json<PredictRequest>,
) -> Result<HttpResponse, PredictionError> {
    if let Err(errors) = req.validate() {
        tracing::info!("Validation failed for predict request: {:?}", errors);
        return Ok(HttpResponse::BadRequest().json(ErrorResponse {
            error: "invalid_request".to_string(),
            message: errors.to_string(),
            status_code: 400,
        }));
    }

    let input = req.to_itinerary()?;

    let quote = state
        .predictor
        .predict(&input, today_local())
        .await
        .inspect_err(|e| tracing::warn!("Prediction failed: {}", e))?;

    tracing::info!(
        "Prediction {}: {} {} -> {} = {}",
        quote.prediction_id,
        input.airline,
        input.source_city,
        input.destination_city,
        quote.result.price
    );

    Ok(HttpResponse::Ok().json(PredictResponse {
        prediction_id: quote.prediction_id.to_string(),
        price: quote.result.price,
        display: format_rupees(quote.result.price),
        log_price: quote.result.log_price,
        days_left: quote.days_left,
        features: quote.features.as_slice().to_vec(),
        model: quote.model,
    }))
}

/// Route map for a city pair; never runs the model
///
/// GET /api/v1/route?source={city}&destination={city}
async fn route_map(
    state: web::Data<AppState>,
    query: web::Query<RouteQuery>,
) -> Result<HttpResponse, PredictionError> {
    let (source, destination) = query.cities()?;
    Ok(HttpResponse::Ok().json(state.mapper.build(source, destination)))
}
