//! Pipeline composition and plain-text report rendering.

use spendlens_core::{
    advise, aggregate, detect_overspending, format_summary, top_categories, Aggregates,
    BudgetStatus, CategorySpend, MonthlyAssessment, Transaction,
};

/// Everything derived from one statement, computed once per run.
pub struct Analysis {
    pub ledger: Vec<Transaction>,
    pub aggregates: Aggregates,
    pub assessments: Vec<MonthlyAssessment>,
    pub top: Vec<CategorySpend>,
    pub advice: Vec<String>,
    pub summary: String,
}

impl Analysis {
    pub fn from_ledger(ledger: Vec<Transaction>) -> Self {
        let aggregates = aggregate(&ledger);
        let assessments = detect_overspending(&aggregates.monthly_expense);
        let top = top_categories(&aggregates.category_expense, 3);
        let advice = advise(&top);
        let summary = format_summary(&aggregates, &assessments, &top);
        Self {
            ledger,
            aggregates,
            assessments,
            top,
            advice,
            summary,
        }
    }

    pub fn has_overspending(&self) -> bool {
        self.assessments
            .iter()
            .any(|a| a.status == BudgetStatus::AtRisk)
    }
}

pub fn print_report(analysis: &Analysis) {
    let agg = &analysis.aggregates;

    println!("== Cleaned & Categorized Transactions ==\n");
    println!(
        "{:<12} {:>12}  {:<8} {:<14} Description",
        "Date", "Amount", "Type", "Category"
    );
    for txn in &analysis.ledger {
        println!(
            "{:<12} {:>12.2}  {:<8} {:<14} {}",
            txn.date.to_string(),
            txn.amount,
            txn.kind.to_string(),
            txn.category.to_string(),
            txn.description
        );
    }

    println!("\n== Metrics ==\n");
    println!("Total Income:  {:>12.2}", agg.total_income);
    println!("Total Expense: {:>12.2}", agg.total_expense);
    println!("Net Balance:   {:>12.2}", agg.balance);

    println!("\n== Monthly Expense Trend ==\n");
    for (month, expense) in &agg.monthly_expense {
        println!("{month}  {expense:>12.2}");
    }

    println!("\n== Expense by Category ==\n");
    for (category, total) in &agg.category_expense {
        println!("{:<14} {:>12.2}", category.to_string(), total);
    }

    println!("\n== Overspending Check ==\n");
    println!("{:<9} {:>12}  Status", "Month", "Expense");
    for a in &analysis.assessments {
        println!("{:<9} {:>12.2}  {}", a.month.to_string(), a.expense, a.status);
    }
    if analysis.has_overspending() {
        println!("\nWarning: you are at risk of overspending in some months.");
    }

    println!("\n== Top Spending Categories ==\n");
    for c in &analysis.top {
        println!("{:<14} {:>12.2}", c.category.to_string(), c.total);
    }

    println!("\n== Budget Advice ==\n");
    for tip in &analysis.advice {
        println!("- {tip}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn txn(ymd: (i32, u32, u32), description: &str, amount: f64) -> Transaction {
        let date = NaiveDate::from_ymd_opt(ymd.0, ymd.1, ymd.2).unwrap();
        Transaction::new(date, description, amount)
    }

    #[test]
    fn test_analysis_from_empty_ledger() {
        let analysis = Analysis::from_ledger(Vec::new());
        assert!(!analysis.has_overspending());
        assert!(analysis.advice.is_empty());
        assert!(analysis.summary.contains("- Total Income: 0.00"));
    }

    #[test]
    fn test_analysis_flags_spike_month() {
        let mut ledger = vec![
            txn((2024, 1, 10), "Uber ride", -100.0),
            txn((2024, 2, 10), "Uber ride", -100.0),
            txn((2024, 3, 10), "Uber ride", -100.0),
        ];
        ledger.push(txn((2024, 4, 10), "Amazon order", -500.0));

        let analysis = Analysis::from_ledger(ledger);
        assert!(analysis.has_overspending());
        assert!(analysis.summary.contains("- Overspending Months: 2024-04"));
    }
}
