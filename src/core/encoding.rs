use crate::models::{Airline, City, Stops, TimeOfDay, TravelClass, UnknownLabel};
use thiserror::Error;

/// Width of every one-hot indicator block
pub const INDICATOR_WIDTH: usize = 5;

/// Errors raised while mapping form values to and from model codes
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EncodingError {
    #[error("value outside encoding table: {0}")]
    UnknownValue(#[from] UnknownLabel),

    #[error("indicator block for {field} has {count} bits set")]
    AmbiguousIndicators { field: &'static str, count: usize },

    #[error("indicator block for {field} holds non-binary value {value}")]
    NonBinaryIndicator { field: &'static str, value: f64 },
}

/// Explicit form of a treatment-coded categorical value
///
/// `Reference` is the category the model was trained against as its baseline
/// and is emitted as an all-zero block. `Indicator(i)` sets slot `i`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OneHot {
    Reference,
    Indicator(usize),
}

impl OneHot {
    /// Expand into the fixed-width block the model consumes
    pub fn to_block(self) -> [f64; INDICATOR_WIDTH] {
        let mut block = [0.0; INDICATOR_WIDTH];
        if let OneHot::Indicator(slot) = self {
            block[slot] = 1.0;
        }
        block
    }

    /// Read a block back, treating all-zero as the reference category
    pub fn from_block(field: &'static str, block: &[f64; INDICATOR_WIDTH]) -> Result<Self, EncodingError> {
        if let Some(value) = block.iter().copied().find(|v| *v != 0.0 && *v != 1.0) {
            return Err(EncodingError::NonBinaryIndicator { field, value });
        }

        let set: Vec<usize> = block
            .iter()
            .enumerate()
            .filter(|(_, v)| **v == 1.0)
            .map(|(i, _)| i)
            .collect();

        match set.as_slice() {
            [] => Ok(OneHot::Reference),
            [slot] => Ok(OneHot::Indicator(*slot)),
            many => Err(EncodingError::AmbiguousIndicators {
                field,
                count: many.len(),
            }),
        }
    }
}

// Indicator column order matches the alphabetical dummy columns the model
// was trained with.
const AIRLINE_SLOTS: [Airline; INDICATOR_WIDTH] = [
    Airline::AirIndia,
    Airline::GoFirst,
    Airline::IndiGo,
    Airline::SpiceJet,
    Airline::Vistara,
];
const AIRLINE_REFERENCE: Airline = Airline::AkasaAir;

const CITY_SLOTS: [City; INDICATOR_WIDTH] = [
    City::Chennai,
    City::Delhi,
    City::Hyderabad,
    City::Kolkata,
    City::Mumbai,
];
const CITY_REFERENCE: City = City::Bangalore;

pub fn encode_stops(stops: Stops) -> u8 {
    match stops {
        Stops::Zero => 0,
        Stops::One => 1,
        Stops::TwoOrMore => 2,
    }
}

pub fn encode_class(class: TravelClass) -> u8 {
    match class {
        TravelClass::Economy => 0,
        TravelClass::Business => 1,
    }
}

/// Shared table for departure and arrival slots
pub fn encode_time(time: TimeOfDay) -> u8 {
    match time {
        TimeOfDay::EarlyMorning => 0,
        TimeOfDay::Morning => 1,
        TimeOfDay::Afternoon => 2,
        TimeOfDay::Evening => 3,
        TimeOfDay::Night => 4,
        TimeOfDay::LateNight => 5,
    }
}

pub fn encode_airline(airline: Airline) -> OneHot {
    match AIRLINE_SLOTS.iter().position(|a| *a == airline) {
        Some(slot) => OneHot::Indicator(slot),
        None => OneHot::Reference,
    }
}

/// Source and destination blocks use the same column order, each in its
/// own block of the vector.
pub fn encode_city(city: City) -> OneHot {
    match CITY_SLOTS.iter().position(|c| *c == city) {
        Some(slot) => OneHot::Indicator(slot),
        None => OneHot::Reference,
    }
}

pub fn decode_airline(block: &[f64; INDICATOR_WIDTH]) -> Result<Airline, EncodingError> {
    Ok(match OneHot::from_block("airline", block)? {
        OneHot::Reference => AIRLINE_REFERENCE,
        OneHot::Indicator(slot) => AIRLINE_SLOTS[slot],
    })
}

pub fn decode_city(block: &[f64; INDICATOR_WIDTH]) -> Result<City, EncodingError> {
    Ok(match OneHot::from_block("city", block)? {
        OneHot::Reference => CITY_REFERENCE,
        OneHot::Indicator(slot) => CITY_SLOTS[slot],
    })
}
