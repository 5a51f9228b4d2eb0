//! Defines the transaction store trait.

use time::PrimitiveDateTime;

use crate::{
    Error,
    transaction::{NewTransaction, Transaction},
    user::UserID,
};

/// Handles the creation and retrieval of transactions.
///
/// The ledger is append-only: there is no way to update or delete a
/// transaction through the store.
pub trait TransactionStore {
    /// Save a new transaction and assign it an ID.
    ///
    /// Implementers must store the snapshot fields exactly as given.
    fn create(&mut self, transaction: NewTransaction) -> Result<Transaction, Error>;

    /// Retrieve transactions from the store in the way defined by `query`.
    fn get_query(&self, query: &TransactionQuery) -> Result<Vec<Transaction>, Error>;

    /// Count the transactions matching `query`, ignoring its limit and offset.
    fn count(&self, query: &TransactionQuery) -> Result<u64, Error>;
}

/// Defines how transactions should be fetched from [TransactionStore::get_query].
#[derive(Debug, Default, Clone, PartialEq)]
pub struct TransactionQuery {
    /// Include transactions on or after this date.
    pub start_date: Option<PrimitiveDateTime>,
    /// Include transactions strictly before this date.
    pub end_date: Option<PrimitiveDateTime>,
    /// Include transactions strictly after this date.
    pub after_date: Option<PrimitiveDateTime>,
    /// Only include transactions made by this user.
    pub user_id: Option<UserID>,
    /// Only include transactions of the fuel type with this name.
    pub fuel_type_name: Option<String>,
    /// How to order the results. None returns transactions in the order
    /// they were stored.
    pub sort: Option<SortOrder>,
    /// Selects up to the first N (`limit`) transactions.
    pub limit: Option<u64>,
    /// Skip the first N transactions, only used together with `limit`.
    pub offset: u64,
}

impl TransactionQuery {
    /// A query for every transaction in `[start_date, end_date)`.
    ///
    /// A missing bound leaves that side of the range open.
    pub fn between(
        start_date: Option<PrimitiveDateTime>,
        end_date: Option<PrimitiveDateTime>,
    ) -> Self {
        Self {
            start_date,
            end_date,
            ..Default::default()
        }
    }
}

/// The order to sort transactions in a [TransactionQuery].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    /// Oldest transactions first.
    DateAscending,
    /// Newest transactions first.
    DateDescending,
}
