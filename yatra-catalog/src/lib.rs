pub mod inventory;
pub mod seed;
pub mod train;

pub use inventory::{InventoryError, SeatInventory};
pub use train::{Train, TravelClass, UnknownClass};
