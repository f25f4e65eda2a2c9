use std::collections::BTreeMap;
use std::collections::HashMap;

use crate::train::{Train, TravelClass};

struct TrainInventory {
    train: Train,
    /// Seat counts at catalog load time, kept as the release safety net
    allotment: HashMap<TravelClass, u32>,
}

/// Seat accounting over the static train catalog.
///
/// `reserve` is the only way a count goes down and it checks availability
/// first, so counts can never go negative. `release` is caller-disciplined:
/// it increments unconditionally and only logs when a count climbs past the
/// original allotment.
pub struct SeatInventory {
    trains: BTreeMap<String, TrainInventory>,
}

impl SeatInventory {
    pub fn from_trains(trains: Vec<Train>) -> Self {
        Self {
            trains: trains
                .into_iter()
                .map(|train| {
                    let allotment = train.seats.clone();
                    (train.train_no.clone(), TrainInventory { train, allotment })
                })
                .collect(),
        }
    }

    pub fn find(&self, train_no: &str) -> Result<&Train, InventoryError> {
        self.trains
            .get(train_no)
            .map(|entry| &entry.train)
            .ok_or_else(|| InventoryError::TrainNotFound(train_no.to_string()))
    }

    /// All trains in stable train-number order
    pub fn list(&self) -> Vec<&Train> {
        self.trains.values().map(|entry| &entry.train).collect()
    }

    /// Atomically check-then-decrement one seat; no mutation on `SoldOut`
    pub fn reserve(&mut self, train_no: &str, class: TravelClass) -> Result<(), InventoryError> {
        let entry = self.entry_mut(train_no)?;
        let seats = entry.train.seats.entry(class).or_insert(0);
        if *seats == 0 {
            return Err(InventoryError::SoldOut {
                train_no: train_no.to_string(),
                class,
            });
        }
        *seats -= 1;
        Ok(())
    }

    /// Return one seat to the pool
    pub fn release(&mut self, train_no: &str, class: TravelClass) -> Result<(), InventoryError> {
        let entry = self.entry_mut(train_no)?;
        let seats = entry.train.seats.entry(class).or_insert(0);
        *seats += 1;

        let allotment = entry.allotment.get(&class).copied().unwrap_or(0);
        if *seats > allotment {
            tracing::warn!(
                train_no = %train_no,
                class = %class,
                seats = *seats,
                allotment,
                "seat count released past original allotment"
            );
        }
        Ok(())
    }

    pub fn seats_available(&self, train_no: &str, class: TravelClass) -> Result<u32, InventoryError> {
        Ok(self.find(train_no)?.seats_in(class))
    }

    fn entry_mut(&mut self, train_no: &str) -> Result<&mut TrainInventory, InventoryError> {
        self.trains
            .get_mut(train_no)
            .ok_or_else(|| InventoryError::TrainNotFound(train_no.to_string()))
    }
}

#[derive(Debug, thiserror::Error)]
pub enum InventoryError {
    #[error("Train not found: {0}")]
    TrainNotFound(String),

    #[error("No seats available in {class} class on train {train_no}")]
    SoldOut { train_no: String, class: TravelClass },
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed;

    #[test]
    fn test_reserve_release_lifecycle() {
        let mut inventory = SeatInventory::from_trains(seed::trains());

        assert_eq!(inventory.seats_available("T101", TravelClass::Sleeper).unwrap(), 10);

        inventory.reserve("T101", TravelClass::Sleeper).unwrap();
        assert_eq!(inventory.seats_available("T101", TravelClass::Sleeper).unwrap(), 9);

        inventory.release("T101", TravelClass::Sleeper).unwrap();
        assert_eq!(inventory.seats_available("T101", TravelClass::Sleeper).unwrap(), 10);
    }

    #[test]
    fn test_reserve_sold_out_leaves_count_unchanged() {
        let mut inventory = SeatInventory::from_trains(seed::trains());

        // Drain 2A on T202 (4 seats)
        for _ in 0..4 {
            inventory.reserve("T202", TravelClass::SecondAc).unwrap();
        }
        let err = inventory.reserve("T202", TravelClass::SecondAc).unwrap_err();
        assert!(matches!(err, InventoryError::SoldOut { .. }));
        assert_eq!(inventory.seats_available("T202", TravelClass::SecondAc).unwrap(), 0);
    }

    #[test]
    fn test_unknown_train() {
        let mut inventory = SeatInventory::from_trains(seed::trains());

        assert!(matches!(
            inventory.reserve("ZZ999", TravelClass::Sleeper),
            Err(InventoryError::TrainNotFound(_))
        ));
        assert!(matches!(
            inventory.find("ZZ999"),
            Err(InventoryError::TrainNotFound(_))
        ));
    }

    #[test]
    fn test_release_past_allotment_still_counts() {
        let mut inventory = SeatInventory::from_trains(seed::trains());

        inventory.release("T101", TravelClass::SecondAc).unwrap();
        assert_eq!(inventory.seats_available("T101", TravelClass::SecondAc).unwrap(), 6);
    }

    #[test]
    fn test_list_is_ordered_by_train_number() {
        let inventory = SeatInventory::from_trains(seed::trains());
        let numbers: Vec<&str> = inventory.list().iter().map(|t| t.train_no.as_str()).collect();

        assert_eq!(numbers.first(), Some(&"T101"));
        assert_eq!(numbers.len(), 13);
        let mut sorted = numbers.clone();
        sorted.sort();
        assert_eq!(numbers, sorted);
    }
}
