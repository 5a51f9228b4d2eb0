//! Fuel sales and the ledger that records them.
//!
//! This module contains everything related to transactions:
//! - The `Transaction` model and its database schema
//! - The pricing rules and the processor that records new sales
//! - Paged listings of the ledger

mod core;
mod listing;
mod pricing;
mod processor;

pub use core::{NewTransaction, Transaction, create_transaction_table, map_transaction_row};
pub use listing::{TransactionFilter, list_transactions, list_user_transactions};
pub use pricing::{
    DISCOUNT_PER_LITER, MINIMUM_VOLUME, VOLUME_SCALE, check_minimum_volume, effective_price,
    resolve_quantities,
};
pub use processor::{Caller, TransactionProcessor, TransactionRequest};

pub(crate) use core::TRANSACTION_COLUMNS;
