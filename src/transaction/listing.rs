//! Filtered, paged views of the ledger.

use time::PrimitiveDateTime;

use crate::{
    Error,
    pagination::{Page, PageRequest},
    stores::{SortOrder, TransactionQuery, TransactionStore},
    user::UserID,
};

use super::core::Transaction;

/// Optional filters for listing transactions.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransactionFilter {
    /// Only include transactions of this fuel type.
    pub fuel_type_name: Option<String>,
    /// Only include transactions made strictly after this date.
    pub start_date: Option<PrimitiveDateTime>,
}

impl TransactionFilter {
    /// Build a filter, treating an empty fuel type name as no filter.
    pub fn new(fuel_type_name: Option<&str>, start_date: Option<PrimitiveDateTime>) -> Self {
        Self {
            fuel_type_name: fuel_type_name
                .filter(|name| !name.is_empty())
                .map(str::to_owned),
            start_date,
        }
    }

    fn to_query(&self, request: PageRequest) -> TransactionQuery {
        TransactionQuery {
            after_date: self.start_date,
            fuel_type_name: self
                .fuel_type_name
                .clone()
                .filter(|name| !name.is_empty()),
            limit: Some(request.size()),
            offset: request.offset(),
            ..Default::default()
        }
    }
}

/// List every transaction in the ledger in the order they were recorded.
///
/// # Errors
/// Returns an error if the store fails.
pub fn list_transactions(
    store: &impl TransactionStore,
    filter: &TransactionFilter,
    request: PageRequest,
) -> Result<Page<Transaction>, Error> {
    let query = filter.to_query(request);

    fetch_page(store, &query, request)
}

/// List the transactions made by `user_id`, newest first.
///
/// # Errors
/// Returns an error if the store fails.
pub fn list_user_transactions(
    store: &impl TransactionStore,
    user_id: UserID,
    filter: &TransactionFilter,
    request: PageRequest,
) -> Result<Page<Transaction>, Error> {
    let query = TransactionQuery {
        user_id: Some(user_id),
        sort: Some(SortOrder::DateDescending),
        ..filter.to_query(request)
    };

    fetch_page(store, &query, request)
}

fn fetch_page(
    store: &impl TransactionStore,
    query: &TransactionQuery,
    request: PageRequest,
) -> Result<Page<Transaction>, Error> {
    let items = store.get_query(query)?;
    let total_items = store.count(query)?;
    tracing::debug!(
        "Fetched {} of {total_items} transactions for page {}",
        items.len(),
        request.page()
    );

    Ok(Page::new(items, request, total_items))
}
