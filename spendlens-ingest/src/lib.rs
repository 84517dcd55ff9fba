//! spendlens-ingest: bank-statement CSV ingestion into a validated ledger.

pub mod loader;

pub use loader::{load_statement, load_statement_from_reader, StatementError, REQUIRED_COLUMNS};
