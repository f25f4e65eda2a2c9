use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use yatra_catalog::TravelClass;

/// Ticket lifecycle status
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TicketStatus {
    Confirmed,
    Cancelled,
}

impl std::fmt::Display for TicketStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TicketStatus::Confirmed => f.write_str("CONFIRMED"),
            TicketStatus::Cancelled => f.write_str("CANCELLED"),
        }
    }
}

/// A booked ticket.
///
/// Serialized field names and date formats match the tickets document
/// exactly; train name/departure/arrival and the fare are snapshots taken
/// at booking time and are not recomputed afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ticket {
    #[serde(rename = "PNR")]
    pub pnr: String,
    #[serde(rename = "User")]
    pub user: String,
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "From")]
    pub from: String,
    #[serde(rename = "To")]
    pub to: String,
    #[serde(rename = "Mobile")]
    pub mobile: String,
    #[serde(rename = "Age")]
    pub age: u8,
    #[serde(rename = "Nationality")]
    pub nationality: String,
    #[serde(rename = "Address")]
    pub address: String,
    #[serde(rename = "Journey Date", with = "journey_date_format")]
    pub journey_date: NaiveDate,
    #[serde(rename = "Train")]
    pub train_name: String,
    #[serde(rename = "Train No")]
    pub train_no: String,
    #[serde(rename = "Class")]
    pub class: TravelClass,
    #[serde(rename = "Fare")]
    pub fare: u32,
    #[serde(rename = "Departure")]
    pub departure: String,
    #[serde(rename = "Arrival")]
    pub arrival: String,
    #[serde(rename = "Booking Time", with = "booking_time_format")]
    pub booking_time: NaiveDateTime,
    #[serde(rename = "Status")]
    pub status: TicketStatus,
}

/// Passenger and route fields supplied when booking
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PassengerDetails {
    pub name: String,
    pub age: u8,
    pub mobile: String,
    pub nationality: String,
    pub address: String,
    pub from: String,
    pub to: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingRequest {
    pub passenger: PassengerDetails,
    pub train_no: String,
    pub class: TravelClass,
    pub journey_date: NaiveDate,
}

/// Mutable fields of an existing ticket
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TicketUpdate {
    pub name: String,
    pub age: u8,
    pub nationality: String,
    pub address: String,
    pub class: TravelClass,
    pub journey_date: NaiveDate,
}

/// `DD-MM-YYYY`, the journey-date format of the tickets document
pub mod journey_date_format {
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serializer};

    pub const FORMAT: &str = "%d-%m-%Y";

    pub fn serialize<S: Serializer>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&date.format(FORMAT).to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDate, D::Error> {
        let raw = String::deserialize(deserializer)?;
        NaiveDate::parse_from_str(&raw, FORMAT).map_err(serde::de::Error::custom)
    }
}

/// `DD-MM-YYYY HH:MM`, the booking-time format of the tickets document
pub mod booking_time_format {
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub const FORMAT: &str = "%d-%m-%Y %H:%M";

    pub fn serialize<S: Serializer>(time: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&time.format(FORMAT).to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDateTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        NaiveDateTime::parse_from_str(&raw, FORMAT).map_err(serde::de::Error::custom)
    }
}
