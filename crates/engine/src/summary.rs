//! Read-only reporting over the ledger.
use std::fmt;

use serde::Serialize;

use crate::MoneyCents;

/// Name of the synthetic row that closes every summary.
pub const TOTAL_ROW: &str = "Total";

/// One line of a summary: a budget (or the total) with its balances.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SummaryRow {
    pub name: String,
    pub budgeted: MoneyCents,
    pub spent: MoneyCents,
    /// `budgeted - spent`; negative when the budget is overspent.
    pub remaining: MoneyCents,
}

impl SummaryRow {
    pub fn new(name: impl Into<String>, budgeted: MoneyCents, spent: MoneyCents) -> Self {
        Self {
            name: name.into(),
            budgeted,
            spent,
            remaining: budgeted - spent,
        }
    }

    pub fn is_overspent(&self) -> bool {
        self.remaining.is_negative()
    }
}

/// Per-budget rows in creation order plus the trailing total.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub rows: Vec<SummaryRow>,
    pub total: SummaryRow,
}

impl Summary {
    pub(crate) fn from_rows(rows: Vec<SummaryRow>) -> Self {
        let budgeted = rows.iter().map(|row| row.budgeted).sum();
        let spent = rows.iter().map(|row| row.spent).sum();
        let total = SummaryRow::new(TOTAL_ROW, budgeted, spent);
        Self { rows, total }
    }

    /// Budget rows followed by the total row.
    pub fn iter_with_total(&self) -> impl Iterator<Item = &SummaryRow> {
        self.rows.iter().chain(std::iter::once(&self.total))
    }

    /// Rows as `(name, budgeted, spent, remaining)` tuples, total included.
    pub fn to_tuples(&self) -> Vec<(&str, MoneyCents, MoneyCents, MoneyCents)> {
        self.iter_with_total()
            .map(|row| (row.name.as_str(), row.budgeted, row.spent, row.remaining))
            .collect()
    }
}

const RULE: &str = "--------------- ---------- ---------- ----------";

/// Fixed-width text table, one budget per line.
impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{:<15} {:>10} {:>10} {:>10}",
            "Budget", "Budgeted", "Spent", "Remaining"
        )?;
        writeln!(f, "{RULE}")?;
        for row in &self.rows {
            write_row(f, row)?;
        }
        writeln!(f, "{RULE}")?;
        write_row(f, &self.total)
    }
}

fn write_row(f: &mut fmt::Formatter<'_>, row: &SummaryRow) -> fmt::Result {
    writeln!(
        f,
        "{:<15} {:>10} {:>10} {:>10}",
        row.name, row.budgeted, row.spent, row.remaining
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn total_sums_every_column() {
        let summary = Summary::from_rows(vec![
            SummaryRow::new("rent", MoneyCents::from_units(500), MoneyCents::from_units(500)),
            SummaryRow::new("food", MoneyCents::from_units(50), MoneyCents::from_units(70)),
        ]);

        assert_eq!(summary.total.name, TOTAL_ROW);
        assert_eq!(summary.total.budgeted, MoneyCents::from_units(550));
        assert_eq!(summary.total.spent, MoneyCents::from_units(570));
        assert_eq!(summary.total.remaining, MoneyCents::from_units(-20));
        assert!(summary.rows[1].is_overspent());
        assert_eq!(summary.iter_with_total().count(), 3);
    }

    #[test]
    fn renders_fixed_width_table() {
        let summary = Summary::from_rows(vec![SummaryRow::new(
            "groceries",
            MoneyCents::from_units(500),
            MoneyCents::from_units(120),
        )]);

        let expected = "\
Budget            Budgeted      Spent  Remaining
--------------- ---------- ---------- ----------
groceries           500.00     120.00     380.00
--------------- ---------- ---------- ----------
Total               500.00     120.00     380.00
";
        assert_eq!(summary.to_string(), expected);
    }
}
