//! Exact decimal sums over a set of transactions.

use std::collections::BTreeMap;

use rust_decimal::Decimal;

use crate::transaction::Transaction;

use super::Period;

/// Sums keyed by fuel type name.
pub type FuelTypeTotals = BTreeMap<String, Decimal>;

/// Sums keyed by period key, e.g. "2025-04-01".
pub type PeriodTotals = BTreeMap<String, Decimal>;

/// Sums keyed by fuel type name and then by period key.
pub type FuelTypePeriodTotals = BTreeMap<String, PeriodTotals>;

/// Which quantity of a transaction to add up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Measure {
    /// Liters sold.
    Volume,
    /// Money taken.
    Revenue,
}

impl Measure {
    fn of(&self, transaction: &Transaction) -> Decimal {
        match self {
            Measure::Volume => transaction.volume,
            Measure::Revenue => transaction.total_amount,
        }
    }
}

/// Sum `measure` for each fuel type.
pub fn sum_by_fuel_type(transactions: &[Transaction], measure: Measure) -> FuelTypeTotals {
    let mut totals = FuelTypeTotals::new();

    for transaction in transactions {
        *totals
            .entry(transaction.fuel_type_name.clone())
            .or_insert(Decimal::ZERO) += measure.of(transaction);
    }

    totals
}

/// Sum `measure` for each fuel type and each `period` bucket.
pub fn sum_by_fuel_type_and_period(
    transactions: &[Transaction],
    measure: Measure,
    period: Period,
) -> FuelTypePeriodTotals {
    let mut totals = FuelTypePeriodTotals::new();

    for transaction in transactions {
        *totals
            .entry(transaction.fuel_type_name.clone())
            .or_default()
            .entry(period.key(&transaction.transaction_date))
            .or_insert(Decimal::ZERO) += measure.of(transaction);
    }

    totals
}

/// Sum `measure` for each `period` bucket across all fuel types.
pub fn sum_by_period(
    transactions: &[Transaction],
    measure: Measure,
    period: Period,
) -> PeriodTotals {
    let mut totals = PeriodTotals::new();

    for transaction in transactions {
        *totals
            .entry(period.key(&transaction.transaction_date))
            .or_insert(Decimal::ZERO) += measure.of(transaction);
    }

    totals
}
