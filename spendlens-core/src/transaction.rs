//! Transaction types for a normalized bank-statement ledger

use chrono::{Datelike, NaiveDate};
use serde::de::Error as DeError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

use crate::categorizer::categorize;

/// One validated row of a bank statement
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Transaction {
    /// Date of the transaction
    pub date: NaiveDate,
    /// Human-readable description; may be empty
    pub description: String,
    /// Positive = income, negative = expense
    pub amount: f64,
    /// Derived from the sign of `amount`
    pub kind: TxnType,
    /// Deterministic category from the description
    pub category: Category,
    /// Calendar-month bucket of `date`
    pub month: YearMonth,
}

impl Transaction {
    /// Build a transaction from a cleaned row, deriving kind, category, and month.
    pub fn new(date: NaiveDate, description: impl Into<String>, amount: f64) -> Self {
        let description = description.into();
        Self {
            date,
            kind: TxnType::from_amount(amount),
            category: categorize(&description),
            month: YearMonth::from(date),
            description,
            amount,
        }
    }

    /// Returns true if this is an expense
    pub fn is_expense(&self) -> bool {
        self.kind == TxnType::Expense
    }

    /// Returns true if this is income
    pub fn is_income(&self) -> bool {
        self.kind == TxnType::Income
    }

    /// Get the absolute amount
    pub fn abs_amount(&self) -> f64 {
        self.amount.abs()
    }
}

/// Income/expense split, derived from the amount sign
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum TxnType {
    #[serde(rename = "income")]
    Income,
    #[serde(rename = "expense")]
    Expense,
}

impl TxnType {
    /// Income iff the amount is strictly positive. A zero amount is an expense.
    pub fn from_amount(amount: f64) -> Self {
        if amount > 0.0 {
            TxnType::Income
        } else {
            TxnType::Expense
        }
    }
}

impl fmt::Display for TxnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TxnType::Income => write!(f, "Income"),
            TxnType::Expense => write!(f, "Expense"),
        }
    }
}

/// Spending categories matched deterministically from descriptions.
///
/// Declaration order is the matching precedence order; the derived `Ord`
/// follows it, so ordered maps iterate in taxonomy order.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Category {
    #[serde(rename = "food")]
    Food,
    #[serde(rename = "transport")]
    Transport,
    #[serde(rename = "utilities")]
    Utilities,
    #[serde(rename = "shopping")]
    Shopping,
    #[serde(rename = "salary")]
    Salary,
    #[serde(rename = "entertainment")]
    Entertainment,
    #[serde(rename = "other")]
    Other,
}

impl Category {
    /// Display label
    pub fn label(&self) -> &'static str {
        match self {
            Category::Food => "Food",
            Category::Transport => "Transport",
            Category::Utilities => "Utilities",
            Category::Shopping => "Shopping",
            Category::Salary => "Salary",
            Category::Entertainment => "Entertainment",
            Category::Other => "Other",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Calendar-month bucket used for monthly grouping.
///
/// Kept as a (year, month) pair so ordering is calendar order across year
/// boundaries; only formatted to "YYYY-MM" at the presentation edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct YearMonth {
    pub year: i32,
    pub month: u32,
}

impl From<NaiveDate> for YearMonth {
    fn from(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl Serialize for YearMonth {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for YearMonth {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        let (y, m) = s
            .split_once('-')
            .ok_or_else(|| D::Error::custom(format!("expected YYYY-MM, got '{s}'")))?;
        let year: i32 = y
            .parse()
            .map_err(|_| D::Error::custom(format!("invalid year in '{s}'")))?;
        let month: u32 = m
            .parse()
            .map_err(|_| D::Error::custom(format!("invalid month in '{s}'")))?;
        if !(1..=12).contains(&month) {
            return Err(D::Error::custom(format!("month out of range in '{s}'")));
        }
        Ok(Self { year, month })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_type_from_amount_sign() {
        assert_eq!(TxnType::from_amount(50000.0), TxnType::Income);
        assert_eq!(TxnType::from_amount(-450.0), TxnType::Expense);
    }

    #[test]
    fn test_zero_amount_is_expense() {
        assert_eq!(TxnType::from_amount(0.0), TxnType::Expense);
    }

    #[test]
    fn test_transaction_derives_fields() {
        let txn = Transaction::new(date(2024, 1, 5), "Zomato order", -450.0);
        assert!(txn.is_expense());
        assert_eq!(txn.category, Category::Food);
        assert_eq!(txn.month, YearMonth { year: 2024, month: 1 });
        assert_eq!(txn.abs_amount(), 450.0);
    }

    #[test]
    fn test_year_month_orders_across_years() {
        let dec = YearMonth::from(date(2023, 12, 31));
        let jan = YearMonth::from(date(2024, 1, 1));
        assert!(dec < jan);
        assert_eq!(jan.to_string(), "2024-01");
    }

    #[test]
    fn test_year_month_serde_round_trip() {
        let ym = YearMonth { year: 2024, month: 3 };
        let json = serde_json::to_string(&ym).unwrap();
        assert_eq!(json, "\"2024-03\"");
        let back: YearMonth = serde_json::from_str(&json).unwrap();
        assert_eq!(back, ym);
    }

    #[test]
    fn test_year_month_rejects_bad_month() {
        assert!(serde_json::from_str::<YearMonth>("\"2024-13\"").is_err());
        assert!(serde_json::from_str::<YearMonth>("\"202403\"").is_err());
    }
}
