pub mod ledger;
pub mod models;
pub mod payload;
pub mod repository;
pub mod rules;
pub mod service;

pub use ledger::TicketLedger;
pub use models::{BookingRequest, PassengerDetails, Ticket, TicketStatus, TicketUpdate};
pub use repository::{AccountsDocument, StateStore, StoreError, TicketsDocument};
pub use rules::ValidationError;
pub use service::{BookingService, CancelReceipt, LedgerError};
