//! Overspending detection: flags months whose expense exceeds a fixed
//! multiple of the mean monthly expense. A heuristic threshold, not a model.

use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

use crate::transaction::YearMonth;

/// Months above mean * this multiplier are flagged.
pub const OVERSPEND_MULTIPLIER: f64 = 1.2;

/// Per-month verdict against the global threshold
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub enum BudgetStatus {
    #[serde(rename = "within-budget")]
    WithinBudget,
    #[serde(rename = "at-risk")]
    AtRisk,
}

impl fmt::Display for BudgetStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BudgetStatus::WithinBudget => write!(f, "Within Budget"),
            BudgetStatus::AtRisk => write!(f, "Overspending Risk"),
        }
    }
}

/// One month's expense judged against the threshold
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct MonthlyAssessment {
    pub month: YearMonth,
    pub expense: f64,
    pub status: BudgetStatus,
}

/// Threshold = mean of the monthly series * [`OVERSPEND_MULTIPLIER`].
/// `None` when the series is empty; never NaN.
pub fn budget_threshold(monthly_expense: &BTreeMap<YearMonth, f64>) -> Option<f64> {
    if monthly_expense.is_empty() {
        return None;
    }
    let mean = monthly_expense.values().sum::<f64>() / monthly_expense.len() as f64;
    Some(mean * OVERSPEND_MULTIPLIER)
}

/// Judge every month against the single global threshold, month-ascending.
/// An empty series yields an empty result.
pub fn detect_overspending(monthly_expense: &BTreeMap<YearMonth, f64>) -> Vec<MonthlyAssessment> {
    let Some(threshold) = budget_threshold(monthly_expense) else {
        return Vec::new();
    };

    monthly_expense
        .iter()
        .map(|(&month, &expense)| MonthlyAssessment {
            month,
            expense,
            status: if expense > threshold {
                BudgetStatus::AtRisk
            } else {
                BudgetStatus::WithinBudget
            },
        })
        .collect()
}
