//! Defines the core data model and schema for ledger transactions.

use rusqlite::{Connection, Row};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use time::PrimitiveDateTime;

use crate::{
    database_id::TransactionId, db::get_decimal, fuel_type::FuelTypeId, user::UserID,
};

// ============================================================================
// MODELS
// ============================================================================

/// A completed fuel purchase.
///
/// The fuel type name and price are snapshots taken when the purchase was
/// made, so later catalog changes do not rewrite history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// The ID of the transaction.
    pub id: TransactionId,
    /// The fuel type that was sold.
    pub fuel_type_id: FuelTypeId,
    /// The name of the fuel type at the time of sale.
    pub fuel_type_name: String,
    /// The price per liter that was actually charged, after any discount.
    pub price_per_liter: Decimal,
    /// How many liters were sold.
    pub volume: Decimal,
    /// The amount of money charged.
    pub total_amount: Decimal,
    /// The local date and time of the sale.
    pub transaction_date: PrimitiveDateTime,
    /// The user who made the purchase, the guest user for anonymous sales.
    pub user_id: UserID,
}

/// A fully priced transaction that has not been saved yet.
#[derive(Debug, Clone, PartialEq)]
pub struct NewTransaction {
    /// The fuel type that was sold.
    pub fuel_type_id: FuelTypeId,
    /// The name of the fuel type at the time of sale.
    pub fuel_type_name: String,
    /// The price per liter that was actually charged, after any discount.
    pub price_per_liter: Decimal,
    /// How many liters were sold.
    pub volume: Decimal,
    /// The amount of money charged.
    pub total_amount: Decimal,
    /// The local date and time of the sale.
    pub transaction_date: PrimitiveDateTime,
    /// The user who made the purchase.
    pub user_id: UserID,
}

// ============================================================================
// DATABASE FUNCTIONS
// ============================================================================

/// The columns selected for every transaction query, in the order expected
/// by [map_transaction_row].
pub(crate) const TRANSACTION_COLUMNS: &str = "id, fuel_type_id, fuel_type_name, price_per_liter, \
    volume, total_amount, transaction_date, user_id";

/// Create the transaction table in the database.
///
/// # Errors
/// Returns an error if the table cannot be created or if there is an SQL error.
pub fn create_transaction_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS \"transaction\" (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                fuel_type_id INTEGER NOT NULL,
                fuel_type_name TEXT NOT NULL,
                price_per_liter TEXT NOT NULL,
                volume TEXT NOT NULL,
                total_amount TEXT NOT NULL,
                transaction_date TEXT NOT NULL,
                user_id INTEGER NOT NULL,
                FOREIGN KEY(fuel_type_id) REFERENCES fuel_type(id) ON UPDATE CASCADE,
                FOREIGN KEY(user_id) REFERENCES user(id) ON UPDATE CASCADE
                )",
        (),
    )?;

    // Index used by the analytics range scans.
    connection.execute(
        "CREATE INDEX IF NOT EXISTS idx_transaction_date ON \"transaction\"(transaction_date);",
        (),
    )?;

    connection.execute(
        "CREATE INDEX IF NOT EXISTS idx_transaction_user ON \"transaction\"(user_id, transaction_date);",
        (),
    )?;

    Ok(())
}

/// Map a database row to a Transaction.
pub fn map_transaction_row(row: &Row) -> Result<Transaction, rusqlite::Error> {
    let id = row.get(0)?;
    let fuel_type_id = row.get(1)?;
    let fuel_type_name = row.get(2)?;
    let price_per_liter = get_decimal(row, 3)?;
    let volume = get_decimal(row, 4)?;
    let total_amount = get_decimal(row, 5)?;
    let transaction_date = row.get(6)?;
    let user_id = UserID::new(row.get(7)?);

    Ok(Transaction {
        id,
        fuel_type_id,
        fuel_type_name,
        price_per_liter,
        volume,
        total_amount,
        transaction_date,
        user_id,
    })
}
