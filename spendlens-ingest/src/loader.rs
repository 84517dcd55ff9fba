//! CSV statement loader: raw rows in, validated ledger out.
//!
//! Expected header: Date,Description,Amount (extra columns ignored), e.g.
//!   Date,Description,Amount,Balance
//!   2024-01-05,Zomato order lunch,-450,49550
//!
//! A missing required column fails the whole load. A row whose date or
//! amount will not parse is dropped and the rest of the file still loads.

use chrono::NaiveDate;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use thiserror::Error;
use tracing::debug;

use spendlens_core::Transaction;

/// Header names the statement must carry.
pub const REQUIRED_COLUMNS: [&str; 3] = ["Date", "Description", "Amount"];

/// Accepted date renderings, tried in order. ISO first, then day-first
/// forms, then month-first.
const DATE_FORMATS: [&str; 4] = ["%Y-%m-%d", "%d/%m/%Y", "%d-%m-%Y", "%m/%d/%Y"];

#[derive(Debug, Error)]
pub enum StatementError {
    #[error("statement is missing required column '{0}'")]
    MissingColumn(&'static str),
    #[error("reading statement: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed csv: {0}")]
    Csv(#[from] csv::Error),
}

/// Load and normalize a statement file into a ledger.
pub fn load_statement(path: impl AsRef<Path>) -> Result<Vec<Transaction>, StatementError> {
    let file = File::open(path.as_ref())?;
    load_statement_from_reader(file)
}

/// Load and normalize a statement from any reader.
///
/// Row order is preserved; every returned transaction has a parsed date and
/// a numeric amount.
pub fn load_statement_from_reader<R: Read>(reader: R) -> Result<Vec<Transaction>, StatementError> {
    let mut rdr = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(reader);

    let headers = rdr.headers()?.clone();
    let date_idx = column_index(&headers, "Date")?;
    let desc_idx = column_index(&headers, "Description")?;
    let amount_idx = column_index(&headers, "Amount")?;

    let mut ledger = Vec::new();

    for (i, result) in rdr.records().enumerate() {
        let record = result?;
        let line = i + 2; // header is line 1

        let date_raw = record.get(date_idx).unwrap_or("").trim();
        let Some(date) = parse_date(date_raw) else {
            debug!("dropping row {line}: unparseable date '{date_raw}'");
            continue;
        };

        let amount_raw = record.get(amount_idx).unwrap_or("").trim();
        let Some(amount) = parse_amount(amount_raw) else {
            debug!("dropping row {line}: unparseable amount '{amount_raw}'");
            continue;
        };

        let description = record.get(desc_idx).unwrap_or("").trim();
        ledger.push(Transaction::new(date, description, amount));
    }

    Ok(ledger)
}

fn column_index(
    headers: &csv::StringRecord,
    name: &'static str,
) -> Result<usize, StatementError> {
    headers
        .iter()
        .position(|h| h.trim() == name)
        .ok_or(StatementError::MissingColumn(name))
}

fn parse_date(raw: &str) -> Option<NaiveDate> {
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(raw, fmt).ok())
}

/// Coerce an amount cell to a number, tolerating a currency prefix and
/// thousands separators. Anything else fails the row.
fn parse_amount(raw: &str) -> Option<f64> {
    let s = raw
        .trim_start_matches(['₹', '$', '€', '£'])
        .trim()
        .replace(',', "");
    if s.is_empty() {
        return None;
    }
    s.parse().ok()
}
