use crate::models::ValidationError;
use chrono::{Local, NaiveDate};

/// The host's local calendar date
pub fn today_local() -> NaiveDate {
    Local::now().date_naive()
}

/// Whole days between `today` and the departure date
///
/// Same-day departures give 0. Dates before `today` are rejected; there is
/// no upper bound.
pub fn days_left(departure: NaiveDate, today: NaiveDate) -> Result<u32, ValidationError> {
    let days = departure.signed_duration_since(today).num_days();
    u32::try_from(days).map_err(|_| ValidationError::DepartureInPast { departure, today })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Days;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 12, 20).unwrap()
    }

    #[test]
    fn test_same_day_is_zero() {
        assert_eq!(days_left(today(), today()).unwrap(), 0);
    }

    #[test]
    fn test_thirty_days_out() {
        let departure = today().checked_add_days(Days::new(30)).unwrap();
        assert_eq!(days_left(departure, today()).unwrap(), 30);
    }

    #[test]
    fn test_crosses_year_boundary() {
        let departure = NaiveDate::from_ymd_opt(2025, 1, 2).unwrap();
        assert_eq!(days_left(departure, today()).unwrap(), 13);
    }

    #[test]
    fn test_past_date_rejected() {
        let departure = today().pred_opt().unwrap();
        assert!(days_left(departure, today()).is_err());
    }
}
