//! The fuel catalog: the products sold at the station and their prices.

use rusqlite::{Connection, Row};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{database_id::DatabaseId, db::get_decimal};

/// The ID of a fuel type in the catalog.
pub type FuelTypeId = DatabaseId;

/// A priced product sold per liter, e.g. "A95" or "Diesel".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FuelType {
    /// The ID of the fuel type.
    pub id: FuelTypeId,
    /// The unique display name of the fuel type.
    pub name: String,
    /// The catalog price for one liter, before any discount.
    pub price_per_liter: Decimal,
}

/// Create the fuel type table.
///
/// # Errors
/// Returns an error if the SQL query failed.
pub fn create_fuel_type_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS fuel_type (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL UNIQUE,
                price_per_liter TEXT NOT NULL
                )",
        (),
    )?;

    Ok(())
}

/// Map a database row to a [FuelType].
pub fn map_fuel_type_row(row: &Row) -> Result<FuelType, rusqlite::Error> {
    let id = row.get(0)?;
    let name = row.get(1)?;
    let price_per_liter = get_decimal(row, 2)?;

    Ok(FuelType {
        id,
        name,
        price_per_liter,
    })
}
