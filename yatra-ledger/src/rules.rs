use chrono::NaiveDate;
use yatra_catalog::TravelClass;

use crate::models::PassengerDetails;

/// Bookings are accepted at most this many days ahead of the journey
pub const MAX_ADVANCE_DAYS: i64 = 60;

/// Fixed fare per class, in rupees
pub fn fare_for(class: TravelClass) -> u32 {
    match class {
        TravelClass::Sleeper => 600,
        TravelClass::ThirdAc => 1000,
        TravelClass::SecondAc => 1500,
    }
}

/// True iff the journey is today or up to 60 days out, both ends inclusive
pub fn journey_date_within_window(date: NaiveDate, today: NaiveDate) -> bool {
    let delta = (date - today).num_days();
    (0..=MAX_ADVANCE_DAYS).contains(&delta)
}

/// Check required passenger fields, collecting every problem
pub fn validate_passenger(passenger: &PassengerDetails) -> Result<(), ValidationError> {
    let mut problems = Vec::new();

    if passenger.name.trim().is_empty() {
        problems.push("name is required".to_string());
    }
    if passenger.mobile.trim().is_empty() {
        problems.push("mobile is required".to_string());
    }
    if passenger.from.trim().is_empty() {
        problems.push("from station is required".to_string());
    }
    if passenger.to.trim().is_empty() {
        problems.push("to station is required".to_string());
    }
    if !(1..=120).contains(&passenger.age) {
        problems.push("age must be between 1 and 120".to_string());
    }

    if problems.is_empty() {
        Ok(())
    } else {
        Err(ValidationError { problems })
    }
}

#[derive(Debug, Clone, thiserror::Error)]
#[error("Validation failed: {}", problems.join("; "))]
pub struct ValidationError {
    pub problems: Vec<String>,
}
