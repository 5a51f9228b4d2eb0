//! Sales reports over the ledger.
//!
//! Every report scans the transactions in an optional date range and adds
//! up volumes or revenue with exact decimal arithmetic. Ranges are half-open,
//! `[start_date, end_date)`, and only apply when both bounds are given. A
//! lone bound is ignored and the whole ledger is scanned.

mod aggregation;
mod period;
mod summary;

pub use aggregation::{
    FuelTypePeriodTotals, FuelTypeTotals, Measure, PeriodTotals, sum_by_fuel_type,
    sum_by_fuel_type_and_period, sum_by_period,
};
pub use period::Period;
pub use summary::{DashboardSummary, RECENT_TRANSACTION_COUNT};

use rust_decimal::Decimal;
use time::PrimitiveDateTime;

use crate::{
    Error,
    stores::{SortOrder, TransactionQuery, TransactionStore},
    transaction::Transaction,
};

/// Produces sales reports from a transaction store.
#[derive(Debug, Clone)]
pub struct Analytics<T> {
    transactions: T,
}

impl<T> Analytics<T>
where
    T: TransactionStore,
{
    /// Create a report generator over `transactions`.
    pub fn new(transactions: T) -> Self {
        Self { transactions }
    }

    /// Liters sold per fuel type.
    ///
    /// # Errors
    /// Returns an error if the store fails.
    pub fn sales_by_fuel_type(
        &self,
        start_date: Option<PrimitiveDateTime>,
        end_date: Option<PrimitiveDateTime>,
    ) -> Result<FuelTypeTotals, Error> {
        let transactions = self.fetch(start_date, end_date)?;

        Ok(sum_by_fuel_type(&transactions, Measure::Volume))
    }

    /// Revenue per fuel type, split into `period` buckets.
    ///
    /// # Errors
    /// Returns an error if the store fails.
    pub fn revenue_by_fuel_type_grouped_by_period(
        &self,
        start_date: Option<PrimitiveDateTime>,
        end_date: Option<PrimitiveDateTime>,
        period: Period,
    ) -> Result<FuelTypePeriodTotals, Error> {
        let transactions = self.fetch(start_date, end_date)?;

        Ok(sum_by_fuel_type_and_period(
            &transactions,
            Measure::Revenue,
            period,
        ))
    }

    /// Liters sold per fuel type, split into `period` buckets.
    ///
    /// # Errors
    /// Returns an error if the store fails.
    pub fn sales_by_fuel_type_grouped_by_period(
        &self,
        start_date: Option<PrimitiveDateTime>,
        end_date: Option<PrimitiveDateTime>,
        period: Period,
    ) -> Result<FuelTypePeriodTotals, Error> {
        let transactions = self.fetch(start_date, end_date)?;

        Ok(sum_by_fuel_type_and_period(
            &transactions,
            Measure::Volume,
            period,
        ))
    }

    /// Revenue across all fuel types, split into `period` buckets.
    ///
    /// # Errors
    /// Returns an error if the store fails.
    pub fn total_revenue_grouped_by_period(
        &self,
        start_date: Option<PrimitiveDateTime>,
        end_date: Option<PrimitiveDateTime>,
        period: Period,
    ) -> Result<PeriodTotals, Error> {
        let transactions = self.fetch(start_date, end_date)?;

        Ok(sum_by_period(&transactions, Measure::Revenue, period))
    }

    /// Count, revenue and the latest sales across the whole ledger.
    ///
    /// # Errors
    /// Returns an error if the store fails.
    pub fn dashboard_summary(&self) -> Result<DashboardSummary, Error> {
        let all = TransactionQuery::default();
        let transaction_count = self.transactions.count(&all)?;
        let total_revenue = self
            .transactions
            .get_query(&all)?
            .iter()
            .map(|transaction| transaction.total_amount)
            .sum::<Decimal>();

        let recent_transactions = self.transactions.get_query(&TransactionQuery {
            sort: Some(SortOrder::DateDescending),
            limit: Some(RECENT_TRANSACTION_COUNT),
            ..Default::default()
        })?;

        Ok(DashboardSummary::new(
            transaction_count,
            total_revenue,
            recent_transactions,
        ))
    }

    fn fetch(
        &self,
        start_date: Option<PrimitiveDateTime>,
        end_date: Option<PrimitiveDateTime>,
    ) -> Result<Vec<Transaction>, Error> {
        let query = match (start_date, end_date) {
            (Some(start_date), Some(end_date)) => {
                TransactionQuery::between(Some(start_date), Some(end_date))
            }
            _ => TransactionQuery::default(),
        };
        let transactions = self.transactions.get_query(&query)?;
        tracing::debug!(
            "Aggregating {} transactions between {start_date:?} and {end_date:?}",
            transactions.len()
        );

        Ok(transactions)
    }
}
