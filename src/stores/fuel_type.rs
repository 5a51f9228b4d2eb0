//! Defines the fuel catalog store trait.

use rust_decimal::Decimal;

use crate::{
    Error,
    fuel_type::{FuelType, FuelTypeId},
};

/// Handles the creation and retrieval of fuel types.
pub trait FuelTypeStore {
    /// Add a fuel type to the catalog.
    fn create(&mut self, name: &str, price_per_liter: Decimal) -> Result<FuelType, Error>;

    /// Get a fuel type by its ID.
    ///
    /// Returns [Error::NotFound] if no fuel type with the given ID exists.
    fn get(&self, id: FuelTypeId) -> Result<FuelType, Error>;

    /// Get every fuel type in the catalog, ordered by name.
    fn get_all(&self) -> Result<Vec<FuelType>, Error>;
}
