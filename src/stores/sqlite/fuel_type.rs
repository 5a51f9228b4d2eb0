//! Implements a SQLite backed fuel catalog.
use std::sync::{Arc, Mutex};

use rusqlite::Connection;
use rust_decimal::Decimal;

use crate::{
    Error,
    fuel_type::{FuelType, FuelTypeId, map_fuel_type_row},
    stores::FuelTypeStore,
};

use super::{is_unique_violation, lock};

/// Stores the fuel catalog in a SQLite database.
#[derive(Debug, Clone)]
pub struct SQLiteFuelTypeStore {
    connection: Arc<Mutex<Connection>>,
}

impl SQLiteFuelTypeStore {
    /// Create a new store for the SQLite `connection`.
    pub fn new(connection: Arc<Mutex<Connection>>) -> Self {
        Self { connection }
    }
}

impl FuelTypeStore for SQLiteFuelTypeStore {
    /// Add a fuel type to the catalog.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::NegativePrice] if `price_per_liter` is below zero,
    /// - [Error::DuplicateFuelType] if the name is already in the catalog,
    /// - or [Error::SqlError] if there is some other SQL error.
    fn create(&mut self, name: &str, price_per_liter: Decimal) -> Result<FuelType, Error> {
        if price_per_liter < Decimal::ZERO {
            return Err(Error::NegativePrice(price_per_liter));
        }

        lock(&self.connection)?
            .prepare(
                "INSERT INTO fuel_type (name, price_per_liter) VALUES (?1, ?2)
                 RETURNING id, name, price_per_liter",
            )?
            .query_row((name, price_per_liter.to_string()), map_fuel_type_row)
            .map_err(|error| {
                if is_unique_violation(&error) {
                    Error::DuplicateFuelType(name.to_owned())
                } else {
                    error.into()
                }
            })
    }

    /// Get the fuel type with the specified `id`.
    ///
    /// # Errors
    /// Returns [Error::NotFound] if `id` does not refer to a fuel type, or
    /// [Error::SqlError] if there is some other SQL error.
    fn get(&self, id: FuelTypeId) -> Result<FuelType, Error> {
        lock(&self.connection)?
            .prepare("SELECT id, name, price_per_liter FROM fuel_type WHERE id = :id")?
            .query_row(&[(":id", &id)], map_fuel_type_row)
            .map_err(|error| error.into())
    }

    /// Get the whole catalog ordered by name.
    ///
    /// # Errors
    /// Returns [Error::SqlError] if there is an SQL error.
    fn get_all(&self) -> Result<Vec<FuelType>, Error> {
        lock(&self.connection)?
            .prepare("SELECT id, name, price_per_liter FROM fuel_type ORDER BY name ASC")?
            .query_map([], map_fuel_type_row)?
            .map(|maybe_fuel_type| maybe_fuel_type.map_err(Error::from))
            .collect()
    }
}
