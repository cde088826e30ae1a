//! Budgeting ledger engine.
//!
//! A [`Ledger`] holds a pool of available funds and the named budgets carved
//! out of it. See [`Ledger`] for the accounting rules.
pub use error::LedgerError;
pub use ledger::{Budget, DEFAULT_INITIAL_AMOUNT, Ledger};
pub use money::MoneyCents;
pub use name::BudgetName;
pub use snapshot::LedgerSnapshot;
pub use summary::{Summary, SummaryRow, TOTAL_ROW};

mod error;
mod ledger;
mod money;
mod name;
mod snapshot;
mod summary;

pub type ResultLedger<T> = Result<T, LedgerError>;
