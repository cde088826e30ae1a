pub mod confirm;
pub mod ledger;
