//! Serializable form of a [`Ledger`], used by the persistence layer.
//!
//! The record has three fields: `available`, `budgets` (name to allocation)
//! and `expenditure` (name to recorded spends). Both maps keep the budget
//! creation order when written and when read back.
use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::{BudgetName, Ledger, LedgerError, MoneyCents, ResultLedger};

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerSnapshot {
    pub available: MoneyCents,
    #[serde(with = "ordered_map")]
    pub budgets: Vec<(String, MoneyCents)>,
    #[serde(with = "ordered_map")]
    pub expenditure: Vec<(String, Vec<MoneyCents>)>,
}

impl Ledger {
    /// Capture the current state.
    pub fn snapshot(&self) -> LedgerSnapshot {
        LedgerSnapshot {
            available: self.available(),
            budgets: self
                .budgets()
                .map(|budget| (budget.name().to_string(), budget.allocated()))
                .collect(),
            expenditure: self
                .budgets()
                .map(|budget| (budget.name().to_string(), budget.spends().to_vec()))
                .collect(),
        }
    }

    /// Rebuild a ledger from a persisted record.
    ///
    /// The record is replayed through the regular operations, so every
    /// invariant is checked on the way in. The loaded ledger is funded with
    /// `available + Σ budgets`; `initial` only sets what a later reset
    /// returns to.
    pub fn from_snapshot(initial: MoneyCents, snapshot: &LedgerSnapshot) -> ResultLedger<Self> {
        let corrupt = |err: LedgerError| LedgerError::CorruptSnapshot(err.to_string());

        if snapshot.available.is_negative() {
            return Err(LedgerError::CorruptSnapshot(format!(
                "available funds are negative ({})",
                snapshot.available
            )));
        }
        let funded = snapshot
            .budgets
            .iter()
            .try_fold(snapshot.available, |acc, (_, amount)| acc.checked_add(*amount))
            .ok_or_else(|| LedgerError::CorruptSnapshot("funds overflow".to_string()))?;

        let mut ledger = Ledger::new(funded).map_err(corrupt)?;
        for (name, amount) in &snapshot.budgets {
            ledger.create_budget(name, *amount).map_err(corrupt)?;
        }

        let mut seen = HashSet::new();
        for (name, spends) in &snapshot.expenditure {
            let folded = BudgetName::parse(name).map_err(corrupt)?;
            if !seen.insert(folded.clone()) {
                return Err(LedgerError::CorruptSnapshot(format!(
                    "expenditure listed twice for \"{folded}\""
                )));
            }
            for amount in spends {
                ledger.record_spend(name, *amount).map_err(corrupt)?;
            }
        }
        if let Some(missing) = ledger.budgets().find(|budget| !seen.contains(budget.name())) {
            return Err(LedgerError::CorruptSnapshot(format!(
                "no expenditure entry for \"{}\"",
                missing.name()
            )));
        }

        ledger.set_initial(initial);
        Ok(ledger)
    }
}

/// Serde adapter: an ordered `Vec<(String, V)>` as a JSON object.
mod ordered_map {
    use std::{fmt, marker::PhantomData};

    use serde::{
        Deserialize, Deserializer, Serialize, Serializer,
        de::{MapAccess, Visitor},
        ser::SerializeMap,
    };

    pub fn serialize<S, V>(entries: &Vec<(String, V)>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
        V: Serialize,
    {
        let mut map = serializer.serialize_map(Some(entries.len()))?;
        for (key, value) in entries {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }

    pub fn deserialize<'de, D, V>(deserializer: D) -> Result<Vec<(String, V)>, D::Error>
    where
        D: Deserializer<'de>,
        V: Deserialize<'de>,
    {
        deserializer.deserialize_map(EntriesVisitor(PhantomData))
    }

    struct EntriesVisitor<V>(PhantomData<V>);

    impl<'de, V: Deserialize<'de>> Visitor<'de> for EntriesVisitor<V> {
        type Value = Vec<(String, V)>;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a map keyed by budget name")
        }

        fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
            let mut entries = Vec::with_capacity(access.size_hint().unwrap_or(0));
            while let Some(entry) = access.next_entry::<String, V>()? {
                entries.push(entry);
            }
            Ok(entries)
        }
    }
}
