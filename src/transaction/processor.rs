//! Turns a purchase request into a priced, persisted transaction.

use rust_decimal::Decimal;
use serde::Deserialize;
use time::PrimitiveDateTime;

use crate::{
    Error,
    fuel_type::FuelTypeId,
    stores::{FuelTypeStore, TransactionStore, UserStore},
    timezone::local_now,
    user::{GUEST_USERNAME, User},
};

use super::{
    core::{NewTransaction, Transaction},
    pricing::{check_minimum_volume, effective_price, resolve_quantities},
};

/// A customer's request to buy fuel.
///
/// Exactly one of `volume` and `total_amount` is normally given. If both are
/// given, `volume` is used.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct TransactionRequest {
    /// The fuel type to buy.
    pub fuel_type_id: Option<FuelTypeId>,
    /// How many liters to buy.
    pub volume: Option<Decimal>,
    /// How much money to spend.
    pub total_amount: Option<Decimal>,
}

/// Who is making a purchase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Caller {
    /// Someone who has not logged in. Their purchases are recorded against
    /// the guest user.
    Guest,
    /// A logged in user.
    Authenticated {
        /// The username the caller logged in with.
        username: String,
    },
}

impl Caller {
    /// Create a caller for the logged in user `username`.
    pub fn authenticated(username: &str) -> Self {
        Self::Authenticated {
            username: username.to_owned(),
        }
    }
}

/// Validates, prices and records fuel purchases.
#[derive(Debug, Clone)]
pub struct TransactionProcessor<F, U, T> {
    fuel_types: F,
    users: U,
    transactions: T,
    local_timezone: String,
}

impl<F, U, T> TransactionProcessor<F, U, T>
where
    F: FuelTypeStore,
    U: UserStore,
    T: TransactionStore,
{
    /// Create a processor over the given stores.
    ///
    /// `local_timezone` should be a valid, canonical timezone name, e.g.
    /// "Europe/Kyiv". It is used to date new transactions.
    pub fn new(fuel_types: F, users: U, transactions: T, local_timezone: &str) -> Self {
        Self {
            fuel_types,
            users,
            transactions,
            local_timezone: local_timezone.to_owned(),
        }
    }

    /// Record a purchase made now, in the processor's local timezone.
    ///
    /// See [TransactionProcessor::process_at] for the rules applied.
    ///
    /// # Errors
    /// Returns [Error::InvalidTimezoneError] if the configured timezone is
    /// unknown, otherwise the errors of [TransactionProcessor::process_at].
    pub fn process(
        &mut self,
        request: TransactionRequest,
        caller: &Caller,
    ) -> Result<Transaction, Error> {
        let now = local_now(&self.local_timezone)?;

        self.process_at(request, caller, now)
    }

    /// Record a purchase made at `transaction_date`.
    ///
    /// Every [Caller::Authenticated] caller gets the member discount, whichever
    /// user record they resolve to. Guests pay the catalog price and the sale
    /// is recorded against the guest user.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::MissingFuelTypeId] if the request has no fuel type,
    /// - [Error::InvalidFuelType] if the fuel type is not in the catalog,
    /// - [Error::UserNotFound] if a logged in caller has no user record,
    /// - [Error::GuestUserNotFound] if the guest user has not been seeded,
    /// - [Error::MissingQuantity] if the request has neither a volume nor a total amount,
    /// - [Error::ZeroPrice] if a volume cannot be derived because the fuel is free,
    /// - [Error::QuantityOutOfRange] if the volume or total is too large to represent,
    /// - [Error::VolumeTooSmall] if the volume is below one liter,
    /// - or an internal error if the stores fail.
    pub fn process_at(
        &mut self,
        request: TransactionRequest,
        caller: &Caller,
        transaction_date: PrimitiveDateTime,
    ) -> Result<Transaction, Error> {
        let fuel_type_id = request.fuel_type_id.ok_or(Error::MissingFuelTypeId)?;
        tracing::info!("Creating transaction with fuel type ID {fuel_type_id}");

        let fuel_type = self
            .fuel_types
            .get(fuel_type_id)
            .map_err(|error| match error {
                Error::NotFound => Error::InvalidFuelType(fuel_type_id),
                error => error,
            })?;
        tracing::debug!("Found fuel type {}", fuel_type.name);

        let user = self.resolve_user(caller)?;
        let is_member = matches!(caller, Caller::Authenticated { .. });
        let price_per_liter = effective_price(fuel_type.price_per_liter, is_member);

        let (volume, total_amount) =
            resolve_quantities(request.volume, request.total_amount, price_per_liter)?;
        check_minimum_volume(volume)?;

        let transaction = self.transactions.create(NewTransaction {
            fuel_type_id: fuel_type.id,
            fuel_type_name: fuel_type.name,
            price_per_liter,
            volume,
            total_amount,
            transaction_date,
            user_id: user.id,
        })?;

        tracing::info!(
            "Recorded transaction {} for user {}: {} L at {} = {}",
            transaction.id,
            user.username,
            transaction.volume,
            transaction.price_per_liter,
            transaction.total_amount
        );

        Ok(transaction)
    }

    fn resolve_user(&self, caller: &Caller) -> Result<User, Error> {
        match caller {
            Caller::Authenticated { username } => self
                .users
                .get_by_username(username)
                .map_err(|error| match error {
                    Error::NotFound => Error::UserNotFound(username.clone()),
                    error => error,
                }),
            Caller::Guest => {
                self.users
                    .get_by_username(GUEST_USERNAME)
                    .map_err(|error| match error {
                        Error::NotFound => Error::GuestUserNotFound,
                        error => error,
                    })
            }
        }
    }
}
