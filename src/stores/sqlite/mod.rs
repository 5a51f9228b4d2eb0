//! SQLite backed implementations of the store traits.
//!
//! All stores share a single connection, so that the catalog, the users and
//! the ledger live in the same database file.

mod fuel_type;
mod transaction;
mod user;

pub use fuel_type::SQLiteFuelTypeStore;
pub use transaction::SQLiteTransactionStore;
pub use user::SQLiteUserStore;

use std::sync::{Arc, Mutex, MutexGuard};

use rusqlite::Connection;

use crate::Error;

/// Acquire the shared connection, turning a poisoned lock into an error.
fn lock(connection: &Arc<Mutex<Connection>>) -> Result<MutexGuard<'_, Connection>, Error> {
    connection.lock().map_err(|_| Error::DatabaseLockError)
}

/// Whether `error` is a violation of a UNIQUE constraint.
fn is_unique_violation(error: &rusqlite::Error) -> bool {
    matches!(
        error,
        rusqlite::Error::SqliteFailure(
            rusqlite::ffi::Error {
                code: _,
                extended_code: rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE,
            },
            _,
        )
    )
}
