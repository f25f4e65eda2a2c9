use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Fare/service tiers offered on every train
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TravelClass {
    #[serde(rename = "SL")]
    Sleeper,
    #[serde(rename = "3A")]
    ThirdAc,
    #[serde(rename = "2A")]
    SecondAc,
}

impl TravelClass {
    pub const ALL: [TravelClass; 3] = [TravelClass::Sleeper, TravelClass::ThirdAc, TravelClass::SecondAc];

    pub fn code(&self) -> &'static str {
        match self {
            TravelClass::Sleeper => "SL",
            TravelClass::ThirdAc => "3A",
            TravelClass::SecondAc => "2A",
        }
    }
}

impl fmt::Display for TravelClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for TravelClass {
    type Err = UnknownClass;

    fn from_str(code: &str) -> Result<Self, Self::Err> {
        match code {
            "SL" => Ok(TravelClass::Sleeper),
            "3A" => Ok(TravelClass::ThirdAc),
            "2A" => Ok(TravelClass::SecondAc),
            other => Err(UnknownClass(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown travel class: {0}")]
pub struct UnknownClass(pub String);

/// A catalog train. Departure/arrival are local wall-clock strings with no
/// timezone; `seats` holds the currently available count per class.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Train {
    pub train_no: String,
    pub name: String,
    pub from: String,
    pub to: String,
    pub departure: String,
    pub arrival: String,
    pub seats: HashMap<TravelClass, u32>,
}

impl Train {
    pub fn seats_in(&self, class: TravelClass) -> u32 {
        self.seats.get(&class).copied().unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_class_codes_round_trip() {
        for class in TravelClass::ALL {
            assert_eq!(class.code().parse::<TravelClass>().unwrap(), class);
        }
    }

    #[test]
    fn test_unknown_class() {
        let err = "1A".parse::<TravelClass>().unwrap_err();
        assert_eq!(err, UnknownClass("1A".to_string()));
    }

    #[test]
    fn test_seat_map_serde_codes() {
        let mut seats = HashMap::new();
        seats.insert(TravelClass::Sleeper, 10);
        seats.insert(TravelClass::ThirdAc, 8);
        seats.insert(TravelClass::SecondAc, 5);
        let train = Train {
            train_no: "T101".to_string(),
            name: "Express A".to_string(),
            from: "Delhi".to_string(),
            to: "Mumbai".to_string(),
            departure: "09:00".to_string(),
            arrival: "18:00".to_string(),
            seats,
        };

        let json = serde_json::to_value(&train).unwrap();
        assert_eq!(json["seats"]["SL"], 10);
        assert_eq!(json["seats"]["3A"], 8);
        assert_eq!(json["seats"]["2A"], 5);
    }
}
