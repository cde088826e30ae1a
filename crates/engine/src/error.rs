//! The module contains the errors the ledger can return.
//!
//! The errors are:
//!
//! - [`DuplicateBudget`] returned when a budget with the same folded name exists.
//! - [`BudgetNotFound`] returned when resizing or spending against a missing budget.
//! - [`InvalidAmount`] returned for negative or unparsable amounts.
//! - [`InsufficientFunds`] returned when an allocation exceeds the available funds.
//! - [`InvalidName`] returned for budget names that are empty after trimming.
//! - [`CorruptSnapshot`] returned when a persisted record breaks an invariant.
//!
//!  [`DuplicateBudget`]: LedgerError::DuplicateBudget
//!  [`BudgetNotFound`]: LedgerError::BudgetNotFound
//!  [`InvalidAmount`]: LedgerError::InvalidAmount
//!  [`InsufficientFunds`]: LedgerError::InsufficientFunds
//!  [`InvalidName`]: LedgerError::InvalidName
//!  [`CorruptSnapshot`]: LedgerError::CorruptSnapshot
use thiserror::Error;

use crate::MoneyCents;

/// Ledger custom errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LedgerError {
    #[error("Budget exists: \"{0}\"")]
    DuplicateBudget(String),
    #[error("No such budget: \"{0}\"")]
    BudgetNotFound(String),
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),
    #[error("Insufficient funds: requested {requested}, available {available}")]
    InsufficientFunds {
        requested: MoneyCents,
        available: MoneyCents,
    },
    #[error("Invalid budget name: {0}")]
    InvalidName(String),
    #[error("Corrupt ledger record: {0}")]
    CorruptSnapshot(String),
}
