//! Fuel Station POS is the core of a fuel station point of sale.
//!
//! This library records fuel sales in an append-only ledger, prices them
//! with the member discount, and produces sales reports over the ledger.
//! Everything is stored in a single SQLite database.
//!
//! ```no_run
//! use std::sync::{Arc, Mutex};
//!
//! use fuel_station_pos::{
//!     Caller, TransactionProcessor, TransactionRequest, initialize_db,
//!     stores::sqlite::{SQLiteFuelTypeStore, SQLiteTransactionStore, SQLiteUserStore},
//! };
//! use rust_decimal_macros::dec;
//!
//! let conn = rusqlite::Connection::open("pos.db").unwrap();
//! initialize_db(&conn).unwrap();
//! let conn = Arc::new(Mutex::new(conn));
//!
//! let mut processor = TransactionProcessor::new(
//!     SQLiteFuelTypeStore::new(conn.clone()),
//!     SQLiteUserStore::new(conn.clone()),
//!     SQLiteTransactionStore::new(conn),
//!     "Europe/Kyiv",
//! );
//!
//! let request = TransactionRequest {
//!     fuel_type_id: Some(1),
//!     volume: Some(dec!(20.5)),
//!     total_amount: None,
//! };
//! let transaction = processor.process(request, &Caller::Guest).unwrap();
//! ```

#![warn(missing_docs)]

pub mod analytics;
mod database_id;
mod db;
mod error;
mod fuel_type;
mod logging;
pub mod pagination;
mod password;
mod register_user;
pub mod stores;
mod timezone;
pub mod transaction;
mod user;

#[cfg(test)]
mod test_utils;

pub use analytics::{Analytics, DashboardSummary, Period};
pub use database_id::{DatabaseId, TransactionId};
pub use db::initialize as initialize_db;
pub use error::{Error, ErrorKind};
pub use fuel_type::{FuelType, FuelTypeId};
pub use logging::setup_logging;
pub use pagination::{Page, PageRequest, PaginationConfig};
pub use password::{PasswordHash, ValidatedPassword};
pub use register_user::{DEFAULT_FUEL_CATALOG, register_user, seed_fuel_catalog, seed_guest_user};
pub use timezone::{get_local_offset, local_now};
pub use transaction::{
    Caller, Transaction, TransactionFilter, TransactionProcessor, TransactionRequest,
    list_transactions, list_user_transactions,
};
pub use user::{GUEST_USERNAME, NewUser, Role, User, UserID};
