//! Ledger aggregation: totals plus monthly and per-category expense series.

use serde::Serialize;
use std::collections::BTreeMap;

use crate::transaction::{Category, Transaction, TxnType, YearMonth};

/// Derived aggregates for one ledger.
///
/// Expense figures are magnitudes (sums of absolute amounts), so
/// `total_expense` is always non-negative. Months and categories with no
/// expense transactions are absent from the series, not zero.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct Aggregates {
    pub total_income: f64,
    pub total_expense: f64,
    pub balance: f64,
    pub monthly_expense: BTreeMap<YearMonth, f64>,
    pub category_expense: BTreeMap<Category, f64>,
}

/// Compute aggregates from a ledger. Pure; the ledger is not modified.
pub fn aggregate(ledger: &[Transaction]) -> Aggregates {
    let mut agg = Aggregates::default();

    for txn in ledger {
        match txn.kind {
            TxnType::Income => agg.total_income += txn.amount,
            TxnType::Expense => {
                let magnitude = txn.abs_amount();
                agg.total_expense += magnitude;
                *agg.monthly_expense.entry(txn.month).or_insert(0.0) += magnitude;
                *agg.category_expense.entry(txn.category).or_insert(0.0) += magnitude;
            }
        }
    }

    agg.balance = agg.total_income - agg.total_expense;
    agg
}
