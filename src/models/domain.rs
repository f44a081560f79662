use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Maximum flight duration accepted by the form, in hours
pub const MAX_DURATION_HOURS: f64 = 1440.0;

/// Number of fields in the model's training schema
pub const FEATURE_COUNT: usize = 21;

/// Column names of the training schema, in vector order
pub const FEATURE_NAMES: [&str; FEATURE_COUNT] = [
    "departure_time",
    "stops",
    "arrival_time",
    "class",
    "duration",
    "days_left",
    "airline_Air_India",
    "airline_GO_FIRST",
    "airline_IndiGo",
    "airline_SpiceJet",
    "airline_Vistara",
    "source_city_Chennai",
    "source_city_Delhi",
    "source_city_Hyderabad",
    "source_city_Kolkata",
    "source_city_Mumbai",
    "destination_city_Chennai",
    "destination_city_Delhi",
    "destination_city_Hyderabad",
    "destination_city_Kolkata",
    "destination_city_Mumbai",
];

/// A form value that is not part of a field's enumerated domain
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {field} '{value}'")]
pub struct UnknownLabel {
    pub field: &'static str,
    pub value: String,
}

/// Declares a closed form domain whose variants parse from and display as
/// their form labels.
macro_rules! form_enum {
    (
        $(#[$meta:meta])*
        $name:ident, $field:literal {
            $($variant:ident => $label:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(
                #[serde(rename = $label)]
                $variant,
            )+
        }

        impl $name {
            /// Every value, in the order the form lists them
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn label(self) -> &'static str {
                match self {
                    $($name::$variant => $label,)+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.label())
            }
        }

        impl FromStr for $name {
            type Err = UnknownLabel;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($label => Ok($name::$variant),)+
                    other => Err(UnknownLabel {
                        field: $field,
                        value: other.to_string(),
                    }),
                }
            }
        }
    };
}

form_enum! {
    /// Operating airline
    Airline, "airline" {
        IndiGo => "IndiGo",
        AirIndia => "Air India",
        Vistara => "Vistara",
        SpiceJet => "SpiceJet",
        GoFirst => "GO_FIRST",
        AkasaAir => "Akasa_Air",
    }
}

form_enum! {
    /// Served city, used for both ends of the route
    City, "city" {
        Delhi => "Delhi",
        Mumbai => "Mumbai",
        Kolkata => "Kolkata",
        Hyderabad => "Hyderabad",
        Bangalore => "Bangalore",
        Chennai => "Chennai",
    }
}

form_enum! {
    /// Coarse departure/arrival time slot
    TimeOfDay, "time of day" {
        EarlyMorning => "Early Morning",
        Morning => "Morning",
        Afternoon => "Afternoon",
        Evening => "Evening",
        Night => "Night",
        LateNight => "Late Night",
    }
}

form_enum! {
    Stops, "stops" {
        Zero => "zero",
        One => "one",
        TwoOrMore => "two_or_more",
    }
}

form_enum! {
    TravelClass, "travel class" {
        Economy => "Economy",
        Business => "Business",
    }
}

/// Itinerary-level constraints that the form cannot express on its own
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("duration must be between 0 and {max} hours, got {0}", max = MAX_DURATION_HOURS)]
    DurationOutOfRange(f64),

    #[error("departure date {departure} is before {today}")]
    DepartureInPast { departure: NaiveDate, today: NaiveDate },

    #[error("source and destination are both {0}")]
    SameCity(City),
}

/// A fully typed set of form selections
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItineraryInput {
    pub airline: Airline,
    pub source_city: City,
    pub destination_city: City,
    pub departure_time: TimeOfDay,
    pub arrival_time: TimeOfDay,
    pub stops: Stops,
    pub travel_class: TravelClass,
    pub duration_hours: f64,
    pub departure_date: NaiveDate,
}

impl ItineraryInput {
    /// Check cross-field constraints against the given calendar date.
    ///
    /// Identical source and destination cities are only accepted when
    /// `allow_same_city` is set.
    pub fn validate(&self, today: NaiveDate, allow_same_city: bool) -> Result<(), ValidationError> {
        if !self.duration_hours.is_finite()
            || self.duration_hours < 0.0
            || self.duration_hours > MAX_DURATION_HOURS
        {
            return Err(ValidationError::DurationOutOfRange(self.duration_hours));
        }

        if self.departure_date < today {
            return Err(ValidationError::DepartureInPast {
                departure: self.departure_date,
                today,
            });
        }

        if !allow_same_city && self.source_city == self.destination_city {
            return Err(ValidationError::SameCity(self.source_city));
        }

        Ok(())
    }
}

/// Model input in training-schema order
///
/// Only the encoder builds these; the layout is fixed by how the model was
/// trained.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FeatureVector([f64; FEATURE_COUNT]);

impl FeatureVector {
    pub(crate) fn new(values: [f64; FEATURE_COUNT]) -> Self {
        Self(values)
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    /// Whole days between today and departure, as encoded
    pub fn days_left(&self) -> u32 {
        self.0[5] as u32
    }

    /// Look up a field by its training column name
    pub fn get(&self, name: &str) -> Option<f64> {
        FEATURE_NAMES
            .iter()
            .position(|n| *n == name)
            .map(|i| self.0[i])
    }
}

/// Predicted fare in whole rupees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    /// Raw model output in log-fare space
    pub log_price: f64,
    pub price: u64,
}

/// Latitude/longitude pair
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lon: f64,
}

/// A labelled point on the route map
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapPoint {
    pub name: String,
    pub city: City,
    pub lat: f64,
    pub lon: f64,
}

/// The single segment joining source and destination
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MapLine {
    pub from_lat: f64,
    pub from_lon: f64,
    pub to_lat: f64,
    pub to_lon: f64,
}

/// Camera placement for the map
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewState {
    pub latitude: f64,
    pub longitude: f64,
    pub zoom: f64,
    pub pitch: f64,
}

/// Rendering attributes for the point and line layers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayerStyle {
    pub point_color: [u8; 4],
    pub point_radius: u32,
    pub line_color: [u8; 3],
    pub line_width: u32,
}

/// Everything a client needs to draw the two-city route map
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteMapSpec {
    pub points: [MapPoint; 2],
    pub line: MapLine,
    pub view_state: ViewState,
    pub map_style: String,
    pub style: LayerStyle,
    pub distance_km: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_input() -> ItineraryInput {
        ItineraryInput {
            airline: Airline::IndiGo,
            source_city: City::Delhi,
            destination_city: City::Mumbai,
            departure_time: TimeOfDay::Morning,
            arrival_time: TimeOfDay::Evening,
            stops: Stops::One,
            travel_class: TravelClass::Economy,
            duration_hours: 2.5,
            departure_date: NaiveDate::from_ymd_opt(2025, 3, 11).unwrap(),
        }
    }

    #[test]
    fn test_labels_round_trip_through_from_str() {
        for airline in Airline::ALL {
            assert_eq!(airline.label().parse::<Airline>().unwrap(), *airline);
        }
        for time in TimeOfDay::ALL {
            assert_eq!(time.to_string().parse::<TimeOfDay>().unwrap(), *time);
        }
        assert_eq!("Air India".parse::<Airline>().unwrap(), Airline::AirIndia);
        assert_eq!("two_or_more".parse::<Stops>().unwrap(), Stops::TwoOrMore);
    }

    #[test]
    fn test_unknown_label_names_field() {
        let err = "Pune".parse::<City>().unwrap_err();
        assert_eq!(err.field, "city");
        assert_eq!(err.to_string(), "unknown city 'Pune'");
    }

    #[test]
    fn test_domain_sizes() {
        assert_eq!(Airline::ALL.len(), 6);
        assert_eq!(City::ALL.len(), 6);
        assert_eq!(TimeOfDay::ALL.len(), 6);
        assert_eq!(Stops::ALL.len(), 3);
        assert_eq!(TravelClass::ALL.len(), 2);
    }

    #[test]
    fn test_validate_accepts_same_day() {
        let input = sample_input();
        assert!(input.validate(input.departure_date, false).is_ok());
    }

    #[test]
    fn test_validate_rejects_past_date() {
        let input = sample_input();
        let tomorrow = input.departure_date.succ_opt().unwrap();
        assert!(matches!(
            input.validate(tomorrow, false),
            Err(ValidationError::DepartureInPast { .. })
        ));
    }

    #[test]
    fn test_validate_duration_bounds() {
        let today = sample_input().departure_date;
        for bad in [-0.5, 1440.5, f64::NAN] {
            let input = ItineraryInput { duration_hours: bad, ..sample_input() };
            assert!(matches!(
                input.validate(today, false),
                Err(ValidationError::DurationOutOfRange(_))
            ));
        }
        let input = ItineraryInput { duration_hours: 1440.0, ..sample_input() };
        assert!(input.validate(today, false).is_ok());
    }

    #[test]
    fn test_same_city_policy() {
        let input = ItineraryInput {
            source_city: City::Bangalore,
            destination_city: City::Bangalore,
            ..sample_input()
        };
        let today = input.departure_date;
        assert_eq!(
            input.validate(today, false),
            Err(ValidationError::SameCity(City::Bangalore))
        );
        assert!(input.validate(today, true).is_ok());
    }

    #[test]
    fn test_feature_lookup_by_name() {
        let mut values = [0.0; FEATURE_COUNT];
        values[4] = 2.5;
        values[5] = 10.0;
        let vector = FeatureVector::new(values);
        assert_eq!(vector.get("duration"), Some(2.5));
        assert_eq!(vector.days_left(), 10);
        assert_eq!(vector.get("nope"), None);
    }
}
