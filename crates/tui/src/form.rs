use engine::{BudgetName, LedgerError, MoneyCents};
use thiserror::Error;

pub const NAME_PLACEHOLDER: &str = "Budget Name";
pub const AMOUNT_PLACEHOLDER: &str = "Amount";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Name,
    Amount,
}

#[derive(Debug, Error, PartialEq)]
pub enum FormError {
    #[error("Enter a valid budget name")]
    MissingName,
    #[error("Enter a valid amount")]
    MissingAmount,
    #[error(transparent)]
    BadAmount(LedgerError),
}

/// Validated contents of the input fields.
#[derive(Debug, Clone, PartialEq)]
pub struct FormInput {
    pub name: BudgetName,
    pub amount: MoneyCents,
}

/// The two free-text inputs every action reads.
#[derive(Debug, Clone)]
pub struct FormState {
    pub name: String,
    pub amount: String,
    pub focus: Field,
}

impl Default for FormState {
    fn default() -> Self {
        Self {
            name: String::new(),
            amount: String::new(),
            focus: Field::Name,
        }
    }
}

impl FormState {
    pub fn next_field(&mut self) {
        self.focus = match self.focus {
            Field::Name => Field::Amount,
            Field::Amount => Field::Name,
        };
    }

    pub fn active_mut(&mut self) -> &mut String {
        match self.focus {
            Field::Name => &mut self.name,
            Field::Amount => &mut self.amount,
        }
    }

    pub fn clear(&mut self) {
        self.name.clear();
        self.amount.clear();
        self.focus = Field::Name;
    }

    pub fn read(&self) -> Result<FormInput, FormError> {
        let name = filled(&self.name, NAME_PLACEHOLDER).ok_or(FormError::MissingName)?;
        let amount = filled(&self.amount, AMOUNT_PLACEHOLDER).ok_or(FormError::MissingAmount)?;

        let name = BudgetName::parse(name).map_err(|_| FormError::MissingName)?;
        let amount = amount.parse::<MoneyCents>().map_err(FormError::BadAmount)?;

        Ok(FormInput { name, amount })
    }
}

/// Field text, unless it is blank or still the placeholder.
fn filled<'a>(value: &'a str, placeholder: &str) -> Option<&'a str> {
    let trimmed = value.trim();
    if trimmed.is_empty() || trimmed.eq_ignore_ascii_case(placeholder) {
        None
    } else {
        Some(trimmed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(name: &str, amount: &str) -> FormState {
        FormState {
            name: name.to_string(),
            amount: amount.to_string(),
            focus: Field::Name,
        }
    }

    #[test]
    fn reads_folded_name_and_amount() {
        let input = form("  Groceries ", "120,50").read().unwrap();
        assert_eq!(input.name.as_str(), "groceries");
        assert_eq!(input.amount, MoneyCents::new(12_050));
    }

    #[test]
    fn empty_or_placeholder_fields_are_rejected() {
        assert_eq!(form("", "10").read(), Err(FormError::MissingName));
        assert_eq!(form("Budget Name", "10").read(), Err(FormError::MissingName));
        assert_eq!(form("budget name", "10").read(), Err(FormError::MissingName));
        assert_eq!(form("rent", "   ").read(), Err(FormError::MissingAmount));
        assert_eq!(form("rent", "Amount").read(), Err(FormError::MissingAmount));
    }

    #[test]
    fn unparsable_amount_keeps_the_reason() {
        let err = form("rent", "ten").read().unwrap_err();
        assert!(matches!(err, FormError::BadAmount(LedgerError::InvalidAmount(_))));
        assert_eq!(err.to_string(), "Invalid amount: \"ten\" is not a number");
    }

    #[test]
    fn negative_amounts_parse_so_the_ledger_can_reject_them() {
        let input = form("rent", "-1").read().unwrap();
        assert_eq!(input.amount, MoneyCents::from_units(-1));
    }

    #[test]
    fn focus_cycles_and_clear_resets() {
        let mut state = form("a", "1");
        state.next_field();
        assert_eq!(state.focus, Field::Amount);
        state.active_mut().push('5');
        assert_eq!(state.amount, "15");
        state.next_field();
        assert_eq!(state.focus, Field::Name);

        state.clear();
        assert!(state.name.is_empty() && state.amount.is_empty());
    }
}
