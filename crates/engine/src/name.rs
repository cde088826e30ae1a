//! Case-insensitive budget identity.

use std::{borrow::Borrow, fmt};

use serde::{Deserialize, Serialize};
use unicode_normalization::UnicodeNormalization;

use crate::{LedgerError, ResultLedger};

/// A budget name in its folded (canonical) form.
///
/// Folding trims the input, collapses whitespace runs to a single space,
/// lower-cases it and applies Unicode NFC, so `"  Eating  Out"` and
/// `"eating out"` name the same budget. The folded form is also the name
/// shown in summaries.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct BudgetName(String);

impl BudgetName {
    pub fn parse(raw: &str) -> ResultLedger<Self> {
        let mut collapsed = String::with_capacity(raw.len());
        for token in raw.split_whitespace() {
            if !collapsed.is_empty() {
                collapsed.push(' ');
            }
            collapsed.push_str(token);
        }
        if collapsed.is_empty() {
            return Err(LedgerError::InvalidName(
                "budget name must not be empty".to_string(),
            ));
        }

        // NFC last: lower-casing can leave a decomposed sequence behind.
        let folded: String = collapsed.to_lowercase().nfc().collect();
        Ok(Self(folded))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BudgetName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.0)
    }
}

impl Borrow<str> for BudgetName {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for BudgetName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for BudgetName {
    type Error = LedgerError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<BudgetName> for String {
    fn from(value: BudgetName) -> Self {
        value.0
    }
}
