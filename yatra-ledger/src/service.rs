use std::sync::Arc;

use chrono::{Local, NaiveDate};
use tokio::sync::Mutex;
use yatra_catalog::{InventoryError, SeatInventory, Train, TravelClass};
use yatra_core::identity::normalize_email;
use yatra_core::{AccountStore, IdentityError};

use crate::ledger::TicketLedger;
use crate::models::{BookingRequest, PassengerDetails, Ticket, TicketStatus, TicketUpdate};
use crate::repository::{StateStore, StoreError};
use crate::rules::{self, ValidationError};

/// Result of a cancellation; the refund is computed for display and never
/// persisted.
#[derive(Debug, Clone)]
pub struct CancelReceipt {
    pub ticket: Ticket,
    pub refund: u32,
}

/// The booking engine: accounts, seat inventory, and the ticket ledger
/// behind one service.
///
/// Lock order is tickets → accounts/inventory; the inventory lock is held
/// only across each check-then-act seat mutation, never across a document
/// save. Seat reservations whose dependent write fails are released again,
/// so a failed persist never strands a seat.
pub struct BookingService {
    inventory: Mutex<SeatInventory>,
    tickets: Mutex<TicketLedger>,
    accounts: Mutex<AccountStore>,
    store: Arc<dyn StateStore>,
}

impl BookingService {
    /// Fresh service with empty accounts/ledger
    pub fn new(inventory: SeatInventory, store: Arc<dyn StateStore>) -> Self {
        Self {
            inventory: Mutex::new(inventory),
            tickets: Mutex::new(TicketLedger::new()),
            accounts: Mutex::new(AccountStore::new()),
            store,
        }
    }

    /// Load persisted documents and re-apply confirmed tickets against the
    /// catalog so seat counts honour the inventory invariant across
    /// restarts.
    pub async fn load(mut inventory: SeatInventory, store: Arc<dyn StateStore>) -> Result<Self, StoreError> {
        let accounts = store.load_accounts().await?;
        let tickets = store.load_tickets().await?;

        for ticket in tickets.values() {
            if ticket.status == TicketStatus::Confirmed {
                if let Err(err) = inventory.reserve(&ticket.train_no, ticket.class) {
                    tracing::warn!(
                        pnr = %ticket.pnr,
                        error = %err,
                        "could not re-apply seat for confirmed ticket"
                    );
                }
            }
        }

        Ok(Self {
            inventory: Mutex::new(inventory),
            tickets: Mutex::new(TicketLedger::from_tickets(tickets)),
            accounts: Mutex::new(AccountStore::from_accounts(accounts)),
            store,
        })
    }

    /// Create an account from an already-hashed credential
    pub async fn register_account(&self, email: &str, password_hash: &str) -> Result<(), LedgerError> {
        let mut accounts = self.accounts.lock().await;
        accounts.register(email, password_hash)?;
        if let Err(err) = self.store.save_accounts(accounts.accounts()).await {
            accounts.remove(email);
            return Err(err.into());
        }
        tracing::info!(email = %normalize_email(email), "account registered");
        Ok(())
    }

    pub async fn account_exists(&self, email: &str) -> bool {
        self.accounts.lock().await.credential_exists(email)
    }

    /// Catalog snapshot with live seat counts
    pub async fn trains(&self) -> Vec<Train> {
        self.inventory.lock().await.list().into_iter().cloned().collect()
    }

    pub async fn seats_available(&self, train_no: &str, class: TravelClass) -> Result<u32, LedgerError> {
        Ok(self.inventory.lock().await.seats_available(train_no, class)?)
    }

    /// Book a ticket.
    ///
    /// Validation happens before any mutation. The seat is reserved first;
    /// if either document write afterwards fails, the reservation is
    /// released again.
    pub async fn book(&self, user: &str, request: &BookingRequest, today: NaiveDate) -> Result<Ticket, LedgerError> {
        rules::validate_passenger(&request.passenger)?;
        if !rules::journey_date_within_window(request.journey_date, today) {
            return Err(LedgerError::JourneyDateOutOfWindow);
        }

        let user = normalize_email(user);
        if !self.account_exists(&user).await {
            return Err(IdentityError::NotFound(user).into());
        }

        let train = {
            let mut inventory = self.inventory.lock().await;
            let train = inventory.find(&request.train_no)?.clone();
            inventory.reserve(&request.train_no, request.class)?;
            train
        };

        let ticket = {
            let mut tickets = self.tickets.lock().await;
            let Some(pnr) = tickets.allocate_pnr() else {
                drop(tickets);
                self.release_seat(&request.train_no, request.class).await;
                return Err(LedgerError::PnrSpaceExhausted);
            };

            let ticket = Ticket {
                pnr,
                user: user.clone(),
                name: request.passenger.name.clone(),
                from: request.passenger.from.clone(),
                to: request.passenger.to.clone(),
                mobile: request.passenger.mobile.clone(),
                age: request.passenger.age,
                nationality: request.passenger.nationality.clone(),
                address: request.passenger.address.clone(),
                journey_date: request.journey_date,
                train_name: train.name.clone(),
                train_no: train.train_no.clone(),
                class: request.class,
                fare: rules::fare_for(request.class),
                departure: train.departure.clone(),
                arrival: train.arrival.clone(),
                booking_time: Local::now().naive_local(),
                status: TicketStatus::Confirmed,
            };
            tickets.insert(ticket.clone());
            if let Err(err) = self.store.save_tickets(tickets.tickets()).await {
                tickets.remove(&ticket.pnr);
                drop(tickets);
                self.release_seat(&request.train_no, request.class).await;
                return Err(err.into());
            }
            ticket
        };

        {
            let mut accounts = self.accounts.lock().await;
            if let Err(err) = accounts.append_ticket(&user, &ticket.pnr) {
                drop(accounts);
                self.unwind_booked_ticket(&ticket).await;
                return Err(err.into());
            }
            if let Err(err) = self.store.save_accounts(accounts.accounts()).await {
                let _ = accounts.remove_ticket(&user, &ticket.pnr);
                drop(accounts);
                self.unwind_booked_ticket(&ticket).await;
                return Err(err.into());
            }
        }

        tracing::info!(pnr = %ticket.pnr, train_no = %ticket.train_no, class = %ticket.class, "ticket booked");
        Ok(ticket)
    }

    /// Cancel a confirmed ticket.
    ///
    /// The status flips to CANCELLED and the 80% refund is reported back;
    /// the seat stays consumed (cancellation does not resell it).
    pub async fn cancel(&self, pnr: &str, user: &str) -> Result<CancelReceipt, LedgerError> {
        let user = normalize_email(user);
        let mut tickets = self.tickets.lock().await;

        let ticket = tickets
            .get_mut(pnr)
            .filter(|ticket| ticket.user == user)
            .ok_or_else(|| LedgerError::TicketNotFound(pnr.to_string()))?;
        if ticket.status != TicketStatus::Confirmed {
            return Err(LedgerError::InvalidState {
                pnr: pnr.to_string(),
                status: ticket.status,
            });
        }

        let previous = ticket.clone();
        ticket.status = TicketStatus::Cancelled;
        let updated = ticket.clone();

        if let Err(err) = self.store.save_tickets(tickets.tickets()).await {
            tickets.insert(previous);
            return Err(err.into());
        }

        let refund = updated.fare * 4 / 5;
        tracing::info!(pnr = %updated.pnr, refund, "ticket cancelled");
        Ok(CancelReceipt { ticket: updated, refund })
    }

    /// Update a ticket's mutable fields.
    ///
    /// A class change releases the old seat and reserves the new one under
    /// a single inventory lock; if the new class is sold out the release is
    /// rolled back and nothing changes.
    pub async fn edit(
        &self,
        pnr: &str,
        user: &str,
        update: &TicketUpdate,
        today: NaiveDate,
    ) -> Result<Ticket, LedgerError> {
        let user = normalize_email(user);
        let mut tickets = self.tickets.lock().await;

        let ticket = tickets
            .get_mut(pnr)
            .filter(|ticket| ticket.user == user)
            .ok_or_else(|| LedgerError::TicketNotFound(pnr.to_string()))?;
        let previous = ticket.clone();

        let merged = PassengerDetails {
            name: update.name.clone(),
            age: update.age,
            mobile: previous.mobile.clone(),
            nationality: update.nationality.clone(),
            address: update.address.clone(),
            from: previous.from.clone(),
            to: previous.to.clone(),
        };
        rules::validate_passenger(&merged)?;
        if !rules::journey_date_within_window(update.journey_date, today) {
            return Err(LedgerError::JourneyDateOutOfWindow);
        }

        let class_changed = update.class != previous.class;
        if class_changed {
            let mut inventory = self.inventory.lock().await;
            inventory.release(&previous.train_no, previous.class)?;
            if let Err(err) = inventory.reserve(&previous.train_no, update.class) {
                // roll the release back; the seat we just freed is still there
                if inventory.reserve(&previous.train_no, previous.class).is_err() {
                    tracing::error!(pnr = %pnr, "could not restore seat after failed class change");
                }
                return Err(err.into());
            }
        }

        ticket.name = update.name.clone();
        ticket.age = update.age;
        ticket.nationality = update.nationality.clone();
        ticket.address = update.address.clone();
        ticket.class = update.class;
        ticket.journey_date = update.journey_date;
        ticket.fare = rules::fare_for(update.class);
        ticket.booking_time = Local::now().naive_local();
        let updated = ticket.clone();
        if let Err(err) = self.store.save_tickets(tickets.tickets()).await {
            tickets.insert(previous.clone());
            if class_changed {
                let mut inventory = self.inventory.lock().await;
                let _ = inventory.release(&previous.train_no, update.class);
                let _ = inventory.reserve(&previous.train_no, previous.class);
            }
            return Err(err.into());
        }

        tracing::info!(pnr = %updated.pnr, class = %updated.class, "ticket updated");
        Ok(updated)
    }

    /// Tickets owned by the account, skipping stale references
    pub async fn list_for_account(&self, user: &str) -> Result<Vec<Ticket>, LedgerError> {
        let user = normalize_email(user);
        let pnrs = {
            let accounts = self.accounts.lock().await;
            accounts
                .get(&user)
                .ok_or(IdentityError::NotFound(user.clone()))?
                .bookings
                .clone()
        };

        let tickets = self.tickets.lock().await;
        Ok(pnrs.iter().filter_map(|pnr| tickets.get(pnr).cloned()).collect())
    }

    /// Remove every ticket the account owns; seats stay consumed, matching
    /// the cancellation policy.
    pub async fn clear_all(&self, user: &str) -> Result<usize, LedgerError> {
        let user = normalize_email(user);
        let pnrs = {
            let accounts = self.accounts.lock().await;
            accounts
                .get(&user)
                .ok_or(IdentityError::NotFound(user.clone()))?
                .bookings
                .clone()
        };

        let count = {
            let mut tickets = self.tickets.lock().await;
            let removed: Vec<Ticket> = pnrs.iter().filter_map(|pnr| tickets.remove(pnr)).collect();
            let count = removed.len();
            if let Err(err) = self.store.save_tickets(tickets.tickets()).await {
                for ticket in removed {
                    tickets.insert(ticket);
                }
                return Err(err.into());
            }
            count
        };

        {
            let mut accounts = self.accounts.lock().await;
            let drained = accounts.clear_tickets(&user)?;
            if let Err(err) = self.store.save_accounts(accounts.accounts()).await {
                for pnr in drained {
                    let _ = accounts.append_ticket(&user, &pnr);
                }
                return Err(err.into());
            }
        }

        tracing::info!(email = %user, count, "bookings cleared");
        Ok(count)
    }

    /// Public PNR lookup; deliberately unauthenticated
    pub async fn track_by_pnr(&self, pnr: &str) -> Result<Ticket, LedgerError> {
        self.tickets
            .lock()
            .await
            .get(pnr)
            .cloned()
            .ok_or_else(|| LedgerError::TicketNotFound(pnr.to_string()))
    }

    async fn release_seat(&self, train_no: &str, class: TravelClass) {
        let mut inventory = self.inventory.lock().await;
        if let Err(err) = inventory.release(train_no, class) {
            tracing::error!(train_no, %class, error = %err, "seat release failed during compensation");
        }
    }

    async fn unwind_booked_ticket(&self, ticket: &Ticket) {
        {
            let mut tickets = self.tickets.lock().await;
            tickets.remove(&ticket.pnr);
            if let Err(err) = self.store.save_tickets(tickets.tickets()).await {
                tracing::error!(pnr = %ticket.pnr, error = %err, "tickets document rollback failed");
            }
        }
        self.release_seat(&ticket.train_no, ticket.class).await;
    }
}

#[derive(Debug, thiserror::Error)]
pub enum LedgerError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Journey date must be within {} days from today", rules::MAX_ADVANCE_DAYS)]
    JourneyDateOutOfWindow,

    #[error("Ticket not found: {0}")]
    TicketNotFound(String),

    #[error("Only confirmed tickets can be cancelled: {pnr} is {status}")]
    InvalidState { pnr: String, status: TicketStatus },

    #[error(transparent)]
    Inventory(#[from] InventoryError),

    #[error(transparent)]
    Identity(#[from] IdentityError),

    #[error("Could not allocate an unused PNR")]
    PnrSpaceExhausted,

    #[error(transparent)]
    Store(#[from] StoreError),
}
