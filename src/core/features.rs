use crate::core::encoding::{encode_airline, encode_city, encode_class, encode_stops, encode_time, INDICATOR_WIDTH};
use crate::core::schedule::days_left;
use crate::models::{FeatureVector, ItineraryInput, ValidationError, FEATURE_COUNT};
use chrono::NaiveDate;

const AIRLINE_OFFSET: usize = 6;
const SOURCE_OFFSET: usize = AIRLINE_OFFSET + INDICATOR_WIDTH;
const DESTINATION_OFFSET: usize = SOURCE_OFFSET + INDICATOR_WIDTH;

/// Assemble the model input for an itinerary
///
/// Layout:
/// `[departure_time, stops, arrival_time, class, duration, days_left,
///   airline x5, source_city x5, destination_city x5]`
pub fn encode_itinerary(input: &ItineraryInput, today: NaiveDate) -> Result<FeatureVector, ValidationError> {
    let days = days_left(input.departure_date, today)?;

    let mut values = [0.0; FEATURE_COUNT];
    values[0] = f64::from(encode_time(input.departure_time));
    values[1] = f64::from(encode_stops(input.stops));
    values[2] = f64::from(encode_time(input.arrival_time));
    values[3] = f64::from(encode_class(input.travel_class));
    values[4] = input.duration_hours;
    values[5] = f64::from(days);

    values[AIRLINE_OFFSET..SOURCE_OFFSET].copy_from_slice(&encode_airline(input.airline).to_block());
    values[SOURCE_OFFSET..DESTINATION_OFFSET].copy_from_slice(&encode_city(input.source_city).to_block());
    values[DESTINATION_OFFSET..].copy_from_slice(&encode_city(input.destination_city).to_block());

    Ok(FeatureVector::new(values))
}
