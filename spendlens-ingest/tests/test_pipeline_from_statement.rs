//! Full-pipeline regression over the checked-in sample statement:
//! load -> aggregate -> overspending -> advice -> summary.

use std::path::PathBuf;

use spendlens_core::{
    advise, aggregate, budget_threshold, detect_overspending, format_summary, top_categories,
    BudgetStatus, Category, YearMonth,
};
use spendlens_ingest::load_statement;

fn statement_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .unwrap()
        .join("sample_statement.csv")
}

fn ym(year: i32, month: u32) -> YearMonth {
    YearMonth { year, month }
}

#[test]
fn test_load_drops_malformed_rows_only() {
    let ledger = load_statement(statement_path()).unwrap();
    // 15 data rows, 2 malformed (bad date, bad amount)
    assert_eq!(ledger.len(), 13);
    assert!(!ledger.iter().any(|t| t.description.contains("Mystery")));
    assert!(!ledger.iter().any(|t| t.description.contains("Gym")));
    // order preserved: salary first, internet bill last
    assert_eq!(ledger[0].description, "Salary credit January");
    assert_eq!(ledger[12].description, "Internet bill renewal");
}

#[test]
fn test_aggregates_from_statement() {
    let ledger = load_statement(statement_path()).unwrap();
    let agg = aggregate(&ledger);

    assert_eq!(agg.total_income, 150000.0);
    assert_eq!(agg.total_expense, 19698.0);
    assert_eq!(agg.balance, 130302.0);

    assert_eq!(agg.monthly_expense.get(&ym(2024, 1)), Some(&2450.0));
    assert_eq!(agg.monthly_expense.get(&ym(2024, 2)), Some(&4649.0));
    assert_eq!(agg.monthly_expense.get(&ym(2024, 3)), Some(&12599.0));

    assert_eq!(agg.category_expense.get(&Category::Food), Some(&1100.0));
    assert_eq!(agg.category_expense.get(&Category::Transport), Some(&2300.0));
    assert_eq!(agg.category_expense.get(&Category::Utilities), Some(&2199.0));
    assert_eq!(agg.category_expense.get(&Category::Shopping), Some(&5600.0));
    assert_eq!(agg.category_expense.get(&Category::Entertainment), Some(&499.0));
    assert_eq!(agg.category_expense.get(&Category::Other), Some(&8000.0));
    // no expense ever categorized Salary
    assert!(!agg.category_expense.contains_key(&Category::Salary));
}

#[test]
fn test_overspending_flags_march() {
    let ledger = load_statement(statement_path()).unwrap();
    let agg = aggregate(&ledger);

    let threshold = budget_threshold(&agg.monthly_expense).unwrap();
    assert!((threshold - 7879.2).abs() < 1e-9);

    let assessments = detect_overspending(&agg.monthly_expense);
    assert_eq!(assessments.len(), 3);
    assert_eq!(assessments[0].status, BudgetStatus::WithinBudget);
    assert_eq!(assessments[1].status, BudgetStatus::WithinBudget);
    assert_eq!(assessments[2].status, BudgetStatus::AtRisk);
    assert_eq!(assessments[2].month, ym(2024, 3));
}

#[test]
fn test_advice_and_summary() {
    let ledger = load_statement(statement_path()).unwrap();
    let agg = aggregate(&ledger);
    let assessments = detect_overspending(&agg.monthly_expense);
    let top = top_categories(&agg.category_expense, 3);

    let ranked: Vec<Category> = top.iter().map(|c| c.category).collect();
    assert_eq!(ranked, vec![Category::Other, Category::Shopping, Category::Transport]);

    let advice = advise(&top);
    assert_eq!(advice.len(), 3);
    assert!(advice[0].starts_with("Spending on Other"));
    assert!(advice[1].contains("shopping"));

    let summary = format_summary(&agg, &assessments, &top);
    assert!(summary.contains("- Total Income: 150000.00"));
    assert!(summary.contains("- Top Categories: Other, Shopping, Transport"));
    assert!(summary.contains("- Overspending Months: 2024-03"));
}
