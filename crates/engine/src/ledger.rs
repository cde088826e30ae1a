//! The module contains the ledger: the fund pool and the budgets carved out of it.
use std::collections::HashMap;

use crate::{
    BudgetName, LedgerError, MoneyCents, ResultLedger,
    summary::{Summary, SummaryRow},
};

/// Funds a fresh ledger starts with when nothing else is configured.
pub const DEFAULT_INITIAL_AMOUNT: MoneyCents = MoneyCents::from_units(1000);

/// A named allocation with the spends recorded against it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Budget {
    name: BudgetName,
    allocated: MoneyCents,
    spends: Vec<MoneyCents>,
}

impl Budget {
    fn new(name: BudgetName, allocated: MoneyCents) -> Self {
        Self {
            name,
            allocated,
            spends: Vec::new(),
        }
    }

    pub fn name(&self) -> &BudgetName {
        &self.name
    }

    pub fn allocated(&self) -> MoneyCents {
        self.allocated
    }

    /// Spends in recording order.
    pub fn spends(&self) -> &[MoneyCents] {
        &self.spends
    }

    pub fn spent(&self) -> MoneyCents {
        self.spends.iter().sum()
    }

    /// Allocation minus cumulative spend. Negative means overspent.
    pub fn remaining(&self) -> MoneyCents {
        self.allocated - self.spent()
    }
}

/// The budgeting ledger.
///
/// Funds are conserved: `available + Σ allocated` always equals the amount
/// the ledger was funded with. Creating or growing a budget moves money out
/// of `available`; shrinking one moves it back. Spends never touch
/// `available`, they only lower a budget's remaining balance, which may go
/// negative to signal an overspend.
///
/// Every operation validates before it mutates, so a failed call leaves the
/// ledger exactly as it was.
///
/// The ledger does no locking; callers sharing it must serialize access.
///
/// # Examples
///
/// ```rust
/// use engine::{Ledger, MoneyCents};
///
/// let mut ledger = Ledger::default();
/// let available = ledger.create_budget("Groceries", MoneyCents::from_units(500)).unwrap();
/// assert_eq!(available, MoneyCents::from_units(500));
///
/// let remaining = ledger.record_spend("GROCERIES", MoneyCents::from_units(120)).unwrap();
/// assert_eq!(remaining, MoneyCents::from_units(380));
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Ledger {
    /// Amount a reset restores.
    initial: MoneyCents,
    /// Conservation total: `available + Σ allocated`.
    funded: MoneyCents,
    available: MoneyCents,
    budgets: Vec<Budget>,
    /// Folded name -> position in `budgets`. Budgets are never removed one by
    /// one, so positions stay valid until `reset`.
    index: HashMap<BudgetName, usize>,
}

impl Default for Ledger {
    fn default() -> Self {
        Self::empty(DEFAULT_INITIAL_AMOUNT)
    }
}

impl Ledger {
    /// Create a ledger funded with `initial`.
    pub fn new(initial: MoneyCents) -> ResultLedger<Self> {
        ensure_amount(initial, "initial amount")?;
        Ok(Self::empty(initial))
    }

    fn empty(initial: MoneyCents) -> Self {
        Self {
            initial,
            funded: initial,
            available: initial,
            budgets: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Funds not allocated to any budget.
    pub fn available(&self) -> MoneyCents {
        self.available
    }

    /// Amount the ledger returns to on [`Ledger::reset`].
    pub fn initial(&self) -> MoneyCents {
        self.initial
    }

    /// Total money in the ledger, allocated or not.
    pub fn funded(&self) -> MoneyCents {
        self.funded
    }

    /// Look a budget up by any casing of its name.
    pub fn budget(&self, name: &str) -> Option<&Budget> {
        let name = BudgetName::parse(name).ok()?;
        self.index.get(&name).map(|&pos| &self.budgets[pos])
    }

    /// Budgets in creation order.
    pub fn budgets(&self) -> impl Iterator<Item = &Budget> {
        self.budgets.iter()
    }

    pub fn len(&self) -> usize {
        self.budgets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.budgets.is_empty()
    }

    /// Carve a new budget out of the available funds.
    ///
    /// Returns the available balance after the allocation.
    pub fn create_budget(&mut self, name: &str, amount: MoneyCents) -> ResultLedger<MoneyCents> {
        let name = BudgetName::parse(name)?;
        ensure_amount(amount, "budget amount")?;
        if self.index.contains_key(&name) {
            return Err(LedgerError::DuplicateBudget(name.into()));
        }
        if amount > self.available {
            return Err(LedgerError::InsufficientFunds {
                requested: amount,
                available: self.available,
            });
        }

        self.available -= amount;
        self.index.insert(name.clone(), self.budgets.len());
        tracing::debug!(budget = %name, %amount, available = %self.available, "budget created");
        self.budgets.push(Budget::new(name, amount));

        Ok(self.available)
    }

    /// Change a budget's allocation, moving the difference from or back to
    /// the available funds. Recorded spends are left untouched, so shrinking
    /// below the spent total is allowed.
    ///
    /// Returns the available balance after the change.
    pub fn resize_budget(
        &mut self,
        name: &str,
        new_amount: MoneyCents,
    ) -> ResultLedger<MoneyCents> {
        let name = BudgetName::parse(name)?;
        ensure_amount(new_amount, "budget amount")?;
        let pos = self.position(&name)?;

        let old_amount = self.budgets[pos].allocated;
        let delta = new_amount - old_amount;
        if delta > self.available {
            return Err(LedgerError::InsufficientFunds {
                requested: delta,
                available: self.available,
            });
        }

        self.available -= delta;
        self.budgets[pos].allocated = new_amount;
        tracing::debug!(
            budget = %name,
            from = %old_amount,
            to = %new_amount,
            available = %self.available,
            "budget resized"
        );

        Ok(self.available)
    }

    /// Append a spend to a budget. There is no cap: spending past the
    /// allocation is recorded and shows up as a negative remaining balance.
    ///
    /// Returns the budget's remaining balance after the spend.
    pub fn record_spend(&mut self, name: &str, amount: MoneyCents) -> ResultLedger<MoneyCents> {
        let name = BudgetName::parse(name)?;
        ensure_amount(amount, "spend amount")?;
        let pos = self.position(&name)?;

        // Keep every column of the summary representable.
        let total_spent: MoneyCents = self.budgets.iter().map(Budget::spent).sum();
        if total_spent.checked_add(amount).is_none() {
            return Err(LedgerError::InvalidAmount("amount too large".to_string()));
        }

        let budget = &mut self.budgets[pos];
        budget.spends.push(amount);
        let remaining = budget.remaining();
        tracing::debug!(budget = %name, %amount, %remaining, "spend recorded");

        Ok(remaining)
    }

    /// One row per budget in creation order, plus the `Total` row.
    pub fn summarize(&self) -> Summary {
        let rows = self
            .budgets
            .iter()
            .map(|budget| SummaryRow::new(budget.name.as_str(), budget.allocated, budget.spent()))
            .collect();
        Summary::from_rows(rows)
    }

    /// Drop every budget and spend and go back to the initial amount.
    pub fn reset(&mut self) {
        tracing::debug!(budgets = self.budgets.len(), initial = %self.initial, "ledger reset");
        self.budgets.clear();
        self.index.clear();
        self.funded = self.initial;
        self.available = self.initial;
    }

    /// Overrides the reset target without touching current balances.
    pub(crate) fn set_initial(&mut self, initial: MoneyCents) {
        self.initial = initial;
    }

    fn position(&self, name: &BudgetName) -> ResultLedger<usize> {
        self.index
            .get(name)
            .copied()
            .ok_or_else(|| LedgerError::BudgetNotFound(name.to_string()))
    }
}

fn ensure_amount(amount: MoneyCents, label: &str) -> ResultLedger<()> {
    if amount.is_negative() {
        return Err(LedgerError::InvalidAmount(format!(
            "{label} must not be negative, got {amount}"
        )));
    }
    if amount.exceeds_max() {
        return Err(LedgerError::InvalidAmount(format!(
            "{label} must not exceed {}, got {amount}",
            MoneyCents::MAX
        )));
    }
    Ok(())
}
