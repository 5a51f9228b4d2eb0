//! The headline numbers shown on the admin dashboard.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;

use crate::transaction::Transaction;

/// How many of the latest transactions the summary includes.
pub const RECENT_TRANSACTION_COUNT: u64 = 5;

/// An overview of the whole ledger.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardSummary {
    /// The number of transactions ever recorded.
    pub transaction_count: u64,
    /// The sum of every transaction's total amount.
    pub total_revenue: Decimal,
    /// The mean total amount, rounded half-up to cents. Zero for an empty ledger.
    pub average_transaction_amount: Decimal,
    /// The latest transactions, newest first.
    pub recent_transactions: Vec<Transaction>,
}

impl DashboardSummary {
    /// Build a summary from the ledger totals and the latest transactions.
    pub fn new(
        transaction_count: u64,
        total_revenue: Decimal,
        recent_transactions: Vec<Transaction>,
    ) -> Self {
        Self {
            transaction_count,
            total_revenue,
            average_transaction_amount: average(total_revenue, transaction_count),
            recent_transactions,
        }
    }
}

fn average(total: Decimal, count: u64) -> Decimal {
    total
        .checked_div(Decimal::from(count))
        .map(|mean| mean.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero))
        .unwrap_or(Decimal::ZERO)
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    use super::{DashboardSummary, average};

    #[test]
    fn empty_ledger_averages_zero() {
        let summary = DashboardSummary::new(0, Decimal::ZERO, vec![]);

        assert_eq!(summary.average_transaction_amount, Decimal::ZERO);
    }

    #[test]
    fn average_rounds_half_up_to_cents() {
        // 10.01 / 2 = 5.005
        assert_eq!(average(dec!(10.01), 2), dec!(5.01));
        // 100 / 3 = 33.333...
        assert_eq!(average(dec!(100), 3), dec!(33.33));
    }

    #[test]
    fn average_of_two_sales() {
        assert_eq!(average(dec!(1339.50), 2), dec!(669.75));
    }
}
