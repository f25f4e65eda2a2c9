//! The built-in train catalog.
//!
//! The engine itself accepts any train list; this is the fixed set the demo
//! deployment runs with.

use std::collections::HashMap;

use crate::train::{Train, TravelClass};

fn train(
    train_no: &str,
    name: &str,
    from: &str,
    to: &str,
    departure: &str,
    arrival: &str,
    sleeper: u32,
    third_ac: u32,
    second_ac: u32,
) -> Train {
    let mut seats = HashMap::new();
    seats.insert(TravelClass::Sleeper, sleeper);
    seats.insert(TravelClass::ThirdAc, third_ac);
    seats.insert(TravelClass::SecondAc, second_ac);
    Train {
        train_no: train_no.to_string(),
        name: name.to_string(),
        from: from.to_string(),
        to: to.to_string(),
        departure: departure.to_string(),
        arrival: arrival.to_string(),
        seats,
    }
}

pub fn trains() -> Vec<Train> {
    vec![
        train("T101", "Express A", "Delhi", "Mumbai", "09:00", "18:00", 10, 8, 5),
        train("T202", "Rajdhani B", "Delhi", "Kolkata", "10:00", "20:00", 12, 6, 4),
        train("T303", "Duronto C", "Delhi", "Chennai", "07:00", "22:00", 15, 10, 6),
        train("UP101", "Gomti Express", "Lucknow", "Delhi", "06:00", "13:30", 15, 10, 6),
        train("UP102", "Prayagraj Express", "Prayagraj", "Delhi", "21:30", "07:00", 20, 12, 8),
        train("UP103", "Varanasi Shatabdi", "Varanasi", "Delhi", "06:30", "15:00", 18, 12, 6),
        train("UP104", "Lucknow Mail", "Delhi", "Lucknow", "22:00", "06:00", 25, 15, 8),
        train("UP105", "Kanpur Intercity", "Kanpur", "Delhi", "05:00", "11:00", 20, 10, 5),
        train("UP106", "Gorakhpur Express", "Gorakhpur", "Lucknow", "08:00", "14:00", 18, 12, 6),
        train("UP107", "Agra Intercity", "Agra", "Lucknow", "07:00", "13:00", 14, 10, 6),
        train("UP108", "Meerut Express", "Delhi", "Meerut", "08:30", "10:30", 30, 12, 5),
        train("UP109", "Bareilly Mail", "Bareilly", "Delhi", "05:45", "12:00", 18, 8, 4),
        train("UP110", "Noida Express", "Lucknow", "Noida", "09:30", "16:30", 15, 10, 5),
    ]
}
