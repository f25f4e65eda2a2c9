use std::collections::HashMap;

use yatra_core::codes;

use crate::models::Ticket;

/// Attempts before PNR allocation gives up
const MAX_PNR_ATTEMPTS: usize = 8;

/// All tickets ever issued, keyed by PNR
pub struct TicketLedger {
    tickets: HashMap<String, Ticket>,
}

impl TicketLedger {
    pub fn new() -> Self {
        Self {
            tickets: HashMap::new(),
        }
    }

    /// Rehydrate from a loaded tickets document
    pub fn from_tickets(tickets: HashMap<String, Ticket>) -> Self {
        Self { tickets }
    }

    /// Snapshot for whole-document persistence
    pub fn tickets(&self) -> &HashMap<String, Ticket> {
        &self.tickets
    }

    pub fn get(&self, pnr: &str) -> Option<&Ticket> {
        self.tickets.get(pnr)
    }

    pub fn get_mut(&mut self, pnr: &str) -> Option<&mut Ticket> {
        self.tickets.get_mut(pnr)
    }

    pub fn insert(&mut self, ticket: Ticket) {
        self.tickets.insert(ticket.pnr.clone(), ticket);
    }

    pub fn remove(&mut self, pnr: &str) -> Option<Ticket> {
        self.tickets.remove(pnr)
    }

    pub fn contains(&self, pnr: &str) -> bool {
        self.tickets.contains_key(pnr)
    }

    /// Generate a PNR that is not already in the ledger.
    ///
    /// The generator alone gives no uniqueness guarantee, so allocation
    /// retries against the existing records.
    pub fn allocate_pnr(&self) -> Option<String> {
        for _ in 0..MAX_PNR_ATTEMPTS {
            let pnr = codes::new_pnr();
            if !self.tickets.contains_key(&pnr) {
                return Some(pnr);
            }
        }
        None
    }
}

impl Default for TicketLedger {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TicketStatus;
    use chrono::NaiveDate;
    use yatra_catalog::TravelClass;

    fn ticket(pnr: &str) -> Ticket {
        Ticket {
            pnr: pnr.to_string(),
            user: "a@b.com".to_string(),
            name: "Asha Verma".to_string(),
            from: "Delhi".to_string(),
            to: "Mumbai".to_string(),
            mobile: "9876543210".to_string(),
            age: 34,
            nationality: "Indian".to_string(),
            address: "14 MG Road".to_string(),
            journey_date: NaiveDate::from_ymd_opt(2025, 11, 20).unwrap(),
            train_name: "Express A".to_string(),
            train_no: "T101".to_string(),
            class: TravelClass::Sleeper,
            fare: 600,
            departure: "09:00".to_string(),
            arrival: "18:00".to_string(),
            booking_time: NaiveDate::from_ymd_opt(2025, 11, 1)
                .unwrap()
                .and_hms_opt(14, 30, 0)
                .unwrap(),
            status: TicketStatus::Confirmed,
        }
    }

    #[test]
    fn test_insert_and_lookup() {
        let mut ledger = TicketLedger::new();
        ledger.insert(ticket("1000000000001"));

        assert!(ledger.contains("1000000000001"));
        assert_eq!(ledger.get("1000000000001").unwrap().train_no, "T101");
        assert!(ledger.get("1000000000002").is_none());
    }

    #[test]
    fn test_allocated_pnr_is_fresh() {
        let mut ledger = TicketLedger::new();
        for i in 0..50 {
            ledger.insert(ticket(&format!("{:013}", 1_000_000_000_000u64 + i)));
        }

        let pnr = ledger.allocate_pnr().unwrap();
        assert_eq!(pnr.len(), 13);
        assert!(!ledger.contains(&pnr));
    }
}
