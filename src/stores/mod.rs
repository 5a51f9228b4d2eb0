//! Contains traits and implementations for objects that store the domain models.

mod fuel_type;
mod transaction;
mod user;

pub mod sqlite;

pub use fuel_type::FuelTypeStore;
pub use transaction::{SortOrder, TransactionQuery, TransactionStore};
pub use user::UserStore;
