use crate::core::EncodingError;
use crate::models::{City, ItineraryInput};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Form submission for a price prediction
///
/// Categorical fields carry the form labels verbatim and are parsed into
/// their domains by [`PredictRequest::to_itinerary`].
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct PredictRequest {
    #[validate(length(min = 1, max = 32))]
    pub airline: String,
    #[validate(length(min = 1, max = 32))]
    #[serde(alias = "source_city", rename = "sourceCity")]
    pub source_city: String,
    #[validate(length(min = 1, max = 32))]
    #[serde(alias = "destination_city", rename = "destinationCity")]
    pub destination_city: String,
    #[validate(length(min = 1, max = 32))]
    #[serde(alias = "departure_time", rename = "departureTime")]
    pub departure_time: String,
    #[validate(length(min = 1, max = 32))]
    #[serde(alias = "arrival_time", rename = "arrivalTime")]
    pub arrival_time: String,
    #[validate(length(min = 1, max = 32))]
    pub stops: String,
    #[validate(length(min = 1, max = 32))]
    #[serde(alias = "travel_class", rename = "travelClass")]
    pub travel_class: String,
    #[validate(range(min = 0.0, max = 1440.0))]
    #[serde(alias = "duration_hours", rename = "duration")]
    pub duration: f64,
    #[serde(alias = "departure_date", rename = "departureDate")]
    pub departure_date: NaiveDate,
}

impl PredictRequest {
    /// Parse every label into its closed domain
    pub fn to_itinerary(&self) -> Result<ItineraryInput, EncodingError> {
        Ok(ItineraryInput {
            airline: self.airline.parse()?,
            source_city: self.source_city.parse()?,
            destination_city: self.destination_city.parse()?,
            departure_time: self.departure_time.parse()?,
            arrival_time: self.arrival_time.parse()?,
            stops: self.stops.parse()?,
            travel_class: self.travel_class.parse()?,
            duration_hours: self.duration,
            departure_date: self.departure_date,
        })
    }
}

/// Query for the route map
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RouteQuery {
    pub source: String,
    pub destination: String,
}

impl RouteQuery {
    pub fn cities(&self) -> Result<(City, City), EncodingError> {
        Ok((self.source.parse()?, self.destination.parse()?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Airline, Stops};

    fn request() -> PredictRequest {
        serde_json::from_value(serde_json::json!({
            "airline": "Air India",
            "sourceCity": "Chennai",
            "destinationCity": "Delhi",
            "departureTime": "Early Morning",
            "arrivalTime": "Afternoon",
            "stops": "two_or_more",
            "travelClass": "Business",
            "duration": 14.0,
            "departureDate": "2025-02-14"
        }))
        .unwrap()
    }

    #[test]
    fn test_request_parses_labels() {
        let req = request();
        assert!(req.validate().is_ok());
        let input = req.to_itinerary().unwrap();
        assert_eq!(input.airline, Airline::AirIndia);
        assert_eq!(input.stops, Stops::TwoOrMore);
        assert_eq!(input.departure_date, NaiveDate::from_ymd_opt(2025, 2, 14).unwrap());
    }

    #[test]
    fn test_unknown_label_is_encoding_error() {
        let req = PredictRequest { airline: "Jet Airways".into(), ..request() };
        assert!(matches!(req.to_itinerary(), Err(EncodingError::UnknownValue(_))));
    }

    #[test]
    fn test_duration_range_validated() {
        let req = PredictRequest { duration: 2000.0, ..request() };
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_snake_case_aliases_accepted() {
        let req: PredictRequest = serde_json::from_value(serde_json::json!({
            "airline": "IndiGo",
            "source_city": "Delhi",
            "destination_city": "Mumbai",
            "departure_time": "Morning",
            "arrival_time": "Evening",
            "stops": "one",
            "travel_class": "Economy",
            "duration_hours": 2.5,
            "departure_date": "2025-02-14"
        }))
        .unwrap();
        assert_eq!(req.source_city, "Delhi");
    }
}
