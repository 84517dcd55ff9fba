//! spendlens-core: transaction model and budget analytics for one
//! bank-statement ledger.
//!
//! Everything here is pure and in-memory; statement parsing lives in
//! spendlens-ingest and all I/O (report printing, config, the assistant
//! HTTP call) lives in spendlens-cli. Data flows one way:
//! ledger -> aggregates -> {overspending, advice} -> summary brief.

pub mod advisor;
pub mod aggregate;
pub mod categorizer;
pub mod overspend;
pub mod summary;
pub mod transaction;

pub use advisor::{advise, top_categories, CategorySpend};
pub use aggregate::{aggregate, Aggregates};
pub use categorizer::{categorize, RULES};
pub use overspend::{
    budget_threshold, detect_overspending, BudgetStatus, MonthlyAssessment, OVERSPEND_MULTIPLIER,
};
pub use summary::format_summary;
pub use transaction::{Category, Transaction, TxnType, YearMonth};
