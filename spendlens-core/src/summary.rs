//! Summary brief handed to the budget assistant. Pure string formatting.

use crate::advisor::CategorySpend;
use crate::aggregate::Aggregates;
use crate::overspend::{BudgetStatus, MonthlyAssessment};

/// Serialize the aggregates into the fixed multi-line brief the assistant
/// receives as context. At-risk months and top categories are comma-joined;
/// either list may be empty.
pub fn format_summary(
    aggregates: &Aggregates,
    assessments: &[MonthlyAssessment],
    top: &[CategorySpend],
) -> String {
    let top_names = top
        .iter()
        .map(|c| c.category.to_string())
        .collect::<Vec<_>>()
        .join(", ");

    let risky_months = assessments
        .iter()
        .filter(|a| a.status == BudgetStatus::AtRisk)
        .map(|a| a.month.to_string())
        .collect::<Vec<_>>()
        .join(", ");

    format!(
        "- Total Income: {:.2}\n\
         - Total Expense: {:.2}\n\
         - Balance: {:.2}\n\
         - Top Categories: {}\n\
         - Overspending Months: {}",
        aggregates.total_income, aggregates.total_expense, aggregates.balance, top_names, risky_months
    )
}
