//! Defines the app level error type and how each error is classified.

use rust_decimal::Decimal;

use crate::fuel_type::FuelTypeId;

/// The broad category an [Error] falls into.
///
/// Callers use this to decide who has to fix the problem: validation errors
/// are fixed by the caller correcting their input, state errors by seeding
/// the missing data, and internal errors by an operator reading the logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The request is malformed or breaks a business rule.
    Validation,
    /// Data the application needs to exist is missing.
    State,
    /// Something went wrong in the storage or hashing layers.
    Internal,
}

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// A transaction request did not name a fuel type.
    #[error("Fuel type ID cannot be null")]
    MissingFuelTypeId,

    /// The fuel type ID in a transaction request does not refer to a fuel
    /// type in the catalog.
    #[error("Invalid fuel type ID: {0}")]
    InvalidFuelType(FuelTypeId),

    /// A transaction request had neither a volume nor a total amount.
    #[error("Either volume or totalAmount must be provided")]
    MissingQuantity,

    /// The requested or derived volume is below the minimum purchase.
    #[error("Volume must be at least 1 liter")]
    VolumeTooSmall,

    /// A total amount was given for a fuel that costs nothing per liter, so
    /// there is no volume to derive.
    #[error("Cannot derive volume when the price per liter is zero")]
    ZeroPrice,

    /// The volume or total amount of a sale is too large to represent.
    #[error("Volume or total amount is too large")]
    QuantityOutOfRange,

    /// The string does not name one of the aggregation periods.
    #[error("Invalid period: {0}")]
    InvalidPeriod(String),

    /// A page of results was requested with a page size of zero.
    #[error("Page size must be at least 1")]
    InvalidPageSize,

    /// An empty username was used for registration.
    #[error("Username cannot be null or empty")]
    EmptyUsername,

    /// An empty password was used for registration.
    #[error("Password cannot be null or empty")]
    EmptyPassword,

    /// The string does not name one of the user roles.
    #[error("Invalid role: {0}")]
    InvalidRole(String),

    /// Tried to register the reserved guest username.
    #[error("Cannot register user with username 'guest'")]
    ReservedUsername,

    /// The username is already taken.
    #[error("Username already exists: {0}")]
    DuplicateUsername(String),

    /// A fuel type was given a price below zero.
    #[error("Price per liter cannot be negative: {0}")]
    NegativePrice(Decimal),

    /// The fuel type name is already in the catalog.
    #[error("Fuel type already exists: {0}")]
    DuplicateFuelType(String),

    /// An authenticated caller has no matching user record.
    #[error("User not found: {0}")]
    UserNotFound(String),

    /// The reserved guest user has not been seeded.
    #[error("Guest user not found")]
    GuestUserNotFound,

    /// The requested resource was not found.
    ///
    /// Internally, this error may occur when a query returns no rows.
    #[error("the requested resource could not be found")]
    NotFound,

    /// An unexpected error occurred with the underlying hashing library.
    ///
    /// The error string should only be logged for debugging.
    #[error("hashing failed: {0}")]
    HashingError(String),

    /// An unhandled/unexpected SQL error.
    #[error("an unexpected SQL error occurred: {0}")]
    SqlError(rusqlite::Error),

    /// Could not acquire the database lock
    #[error("could not acquire the database lock")]
    DatabaseLockError,

    /// An error occurred while getting the local timezone from a canonical timezone string.
    #[error("invalid timezone {0}")]
    InvalidTimezoneError(String),

    /// A result could not be rendered as JSON.
    #[error("could not serialize output: {0}")]
    SerializationError(String),
}

impl Error {
    /// Classify the error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::MissingFuelTypeId
            | Error::InvalidFuelType(_)
            | Error::MissingQuantity
            | Error::VolumeTooSmall
            | Error::ZeroPrice
            | Error::QuantityOutOfRange
            | Error::InvalidPeriod(_)
            | Error::InvalidPageSize
            | Error::EmptyUsername
            | Error::EmptyPassword
            | Error::InvalidRole(_)
            | Error::ReservedUsername
            | Error::DuplicateUsername(_)
            | Error::NegativePrice(_)
            | Error::DuplicateFuelType(_) => ErrorKind::Validation,
            Error::UserNotFound(_) | Error::GuestUserNotFound => ErrorKind::State,
            Error::NotFound
            | Error::HashingError(_)
            | Error::SqlError(_)
            | Error::DatabaseLockError
            | Error::InvalidTimezoneError(_)
            | Error::SerializationError(_) => ErrorKind::Internal,
        }
    }
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        match value {
            rusqlite::Error::QueryReturnedNoRows => Error::NotFound,
            error => {
                tracing::error!("an unhandled SQL error occurred: {}", error);
                Error::SqlError(error)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Error, ErrorKind};

    #[test]
    fn messages_name_the_offending_value() {
        assert_eq!(
            Error::InvalidFuelType(999).to_string(),
            "Invalid fuel type ID: 999"
        );
        assert_eq!(
            Error::InvalidPeriod("yearly".to_owned()).to_string(),
            "Invalid period: yearly"
        );
        assert_eq!(
            Error::UserNotFound("alice".to_owned()).to_string(),
            "User not found: alice"
        );
    }

    #[test]
    fn missing_seed_data_is_a_state_error() {
        assert_eq!(Error::GuestUserNotFound.kind(), ErrorKind::State);
        assert_eq!(Error::UserNotFound("bob".to_owned()).kind(), ErrorKind::State);
    }

    #[test]
    fn bad_input_is_a_validation_error() {
        assert_eq!(Error::VolumeTooSmall.kind(), ErrorKind::Validation);
        assert_eq!(Error::MissingQuantity.kind(), ErrorKind::Validation);
        assert_eq!(Error::InvalidFuelType(1).kind(), ErrorKind::Validation);
        assert_eq!(Error::QuantityOutOfRange.kind(), ErrorKind::Validation);
    }

    #[test]
    fn serialization_failure_is_an_internal_error() {
        let error = Error::SerializationError("key must be a string".to_owned());

        assert_eq!(error.kind(), ErrorKind::Internal);
        assert_eq!(
            error.to_string(),
            "could not serialize output: key must be a string"
        );
    }

    #[test]
    fn no_rows_maps_to_not_found() {
        let error: Error = rusqlite::Error::QueryReturnedNoRows.into();

        assert_eq!(error, Error::NotFound);
        assert_eq!(error.kind(), ErrorKind::Internal);
    }
}
