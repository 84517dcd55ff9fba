//! Ranks categories by spend and maps the top entries to guidance text.

use serde::Serialize;
use std::collections::BTreeMap;

use crate::transaction::Category;

/// Total expense attributed to one category
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CategorySpend {
    pub category: Category,
    pub total: f64,
}

/// Top `n` categories by descending spend. Equal totals keep taxonomy
/// order (the source map iterates in taxonomy order; the sort is stable).
pub fn top_categories(category_expense: &BTreeMap<Category, f64>, n: usize) -> Vec<CategorySpend> {
    let mut ranked: Vec<CategorySpend> = category_expense
        .iter()
        .map(|(&category, &total)| CategorySpend { category, total })
        .collect();

    ranked.sort_by(|a, b| b.total.partial_cmp(&a.total).unwrap());
    ranked.truncate(n);
    ranked
}

/// One advice string per ranked category, in rank order. Advises on however
/// many categories exist; an empty ranking yields no advice.
pub fn advise(top: &[CategorySpend]) -> Vec<String> {
    top.iter().map(|c| advice_for(c.category)).collect()
}

fn advice_for(category: Category) -> String {
    match category {
        Category::Food => {
            "You're spending a lot on food. Try cooking at home more often or setting a monthly dining budget.".to_string()
        }
        Category::Shopping => {
            "High shopping bills detected. Consider limiting impulse buys or setting a wishlist before shopping.".to_string()
        }
        Category::Transport => {
            "Transport costs are high. Try carpooling, using public transport, or optimizing your routes.".to_string()
        }
        Category::Utilities => {
            "Utilities seem high. Consider energy-saving habits or reviewing your internet/electricity plans.".to_string()
        }
        Category::Entertainment => {
            "Subscriptions and entertainment are adding up. Cancel unused subscriptions or switch to cheaper plans.".to_string()
        }
        other => format!(
            "Spending on {other} is significant. Try to review if all those purchases were essential."
        ),
    }
}
