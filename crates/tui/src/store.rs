use std::{
    fs, io,
    path::{Path, PathBuf},
};

use engine::{Ledger, LedgerError, LedgerSnapshot, MoneyCents};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("cannot access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("{path} is not a valid ledger file: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("{path}: {source}")]
    Ledger {
        path: PathBuf,
        #[source]
        source: LedgerError,
    },
}

/// JSON file holding the ledger between sessions.
#[derive(Debug, Clone)]
pub struct Store {
    path: PathBuf,
}

impl Store {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the ledger. A missing file yields a fresh ledger funded with
    /// `initial`.
    pub fn load(&self, initial: MoneyCents) -> Result<Ledger, StoreError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                tracing::info!(path = %self.path.display(), "no ledger file, starting fresh");
                return Ledger::new(initial).map_err(|source| self.ledger_error(source));
            }
            Err(source) => return Err(self.io_error(source)),
        };

        let snapshot: LedgerSnapshot =
            serde_json::from_str(&content).map_err(|source| StoreError::Json {
                path: self.path.clone(),
                source,
            })?;
        let ledger = Ledger::from_snapshot(initial, &snapshot)
            .map_err(|source| self.ledger_error(source))?;
        tracing::info!(
            path = %self.path.display(),
            budgets = ledger.len(),
            available = %ledger.available(),
            "ledger loaded"
        );
        Ok(ledger)
    }

    /// Write the ledger, replacing the previous file in one rename.
    pub fn save(&self, ledger: &Ledger) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).map_err(|source| self.io_error(source))?;
        }
        let payload =
            serde_json::to_string_pretty(&ledger.snapshot()).map_err(|source| StoreError::Json {
                path: self.path.clone(),
                source,
            })?;

        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, payload).map_err(|source| self.io_error(source))?;
        fs::rename(&tmp, &self.path).map_err(|source| self.io_error(source))?;
        tracing::debug!(path = %self.path.display(), "ledger saved");
        Ok(())
    }

    /// Move the ledger file to `<path>.corrupt` (or `.corrupt.N` when taken)
    /// so the next save starts a new file instead of replacing it.
    pub fn set_aside(&self) -> Result<PathBuf, StoreError> {
        let mut target = suffixed(&self.path, ".corrupt");
        let mut attempt = 1;
        while target.exists() {
            target = suffixed(&self.path, &format!(".corrupt.{attempt}"));
            attempt += 1;
        }

        fs::rename(&self.path, &target).map_err(|source| self.io_error(source))?;
        tracing::warn!(
            path = %self.path.display(),
            moved_to = %target.display(),
            "unreadable ledger file set aside"
        );
        Ok(target)
    }

    fn io_error(&self, source: io::Error) -> StoreError {
        StoreError::Io {
            path: self.path.clone(),
            source,
        }
    }

    fn ledger_error(&self, source: LedgerError) -> StoreError {
        StoreError::Ledger {
            path: self.path.clone(),
            source,
        }
    }
}

impl StoreError {
    /// The file exists but its content cannot become a ledger.
    pub fn is_bad_content(&self) -> bool {
        matches!(self, StoreError::Json { .. } | StoreError::Ledger { .. })
    }
}

fn suffixed(path: &Path, suffix: &str) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(suffix);
    PathBuf::from(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn units(value: i64) -> MoneyCents {
        MoneyCents::from_units(value)
    }

    #[test]
    fn missing_file_gives_default_ledger() {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::new(dir.path().join("budget.json"));

        let ledger = store.load(units(1000)).unwrap();
        assert!(ledger.is_empty());
        assert_eq!(ledger.available(), units(1000));
    }

    #[test]
    fn save_then_load_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::new(dir.path().join("nested/budget.json"));

        let mut ledger = Ledger::new(units(1000)).unwrap();
        ledger.create_budget("Groceries", units(500)).unwrap();
        ledger.record_spend("groceries", units(120)).unwrap();
        store.save(&ledger).unwrap();

        let loaded = store.load(units(1000)).unwrap();
        assert_eq!(loaded, ledger);
        assert!(!store.path().with_extension("json.tmp").exists());
    }

    #[test]
    fn file_uses_the_three_field_record() {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::new(dir.path().join("budget.json"));
        let mut ledger = Ledger::new(units(1000)).unwrap();
        ledger.create_budget("rent", units(300)).unwrap();
        store.save(&ledger).unwrap();

        let raw: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(store.path()).unwrap()).unwrap();
        assert_eq!(raw["available"], serde_json::json!(700));
        assert_eq!(raw["budgets"]["rent"], serde_json::json!(300));
        assert_eq!(raw["expenditure"]["rent"], serde_json::json!([]));
    }

    #[test]
    fn malformed_file_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("budget.json");
        let store = Store::new(&path);

        fs::write(&path, "{ not json").unwrap();
        assert!(matches!(store.load(units(1000)), Err(StoreError::Json { .. })));

        fs::write(
            &path,
            r#"{"available": 10, "budgets": {"a": 5}, "expenditure": {}}"#,
        )
        .unwrap();
        assert!(matches!(store.load(units(1000)), Err(StoreError::Ledger { .. })));
    }

    #[test]
    fn amounts_at_the_limit_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::new(dir.path().join("budget.json"));
        let near_max = MoneyCents::new(MoneyCents::MAX.cents() - 1);

        let mut ledger = Ledger::new(MoneyCents::MAX).unwrap();
        ledger.create_budget("house", near_max).unwrap();
        ledger.record_spend("house", near_max).unwrap();
        ledger.record_spend("house", MoneyCents::MAX).unwrap();
        store.save(&ledger).unwrap();

        let raw = fs::read_to_string(store.path()).unwrap();
        assert!(raw.contains("9999999999999.99"), "{raw}");
        assert_eq!(store.load(MoneyCents::MAX).unwrap(), ledger);
    }

    #[test]
    fn bad_file_is_set_aside_and_kept() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("budget.json");
        let store = Store::new(&path);
        fs::write(&path, "{ not json").unwrap();

        let err = store.load(units(1000)).unwrap_err();
        assert!(err.is_bad_content());
        let moved = store.set_aside().unwrap();
        assert_eq!(moved, dir.path().join("budget.json.corrupt"));

        store.save(&Ledger::new(units(1000)).unwrap()).unwrap();
        assert_eq!(fs::read_to_string(&moved).unwrap(), "{ not json");
        assert!(store.load(units(1000)).is_ok());

        fs::write(&path, "[]").unwrap();
        assert_eq!(
            store.set_aside().unwrap(),
            dir.path().join("budget.json.corrupt.1")
        );
        assert_eq!(fs::read_to_string(&moved).unwrap(), "{ not json");
    }

    #[test]
    fn unreadable_path_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        // A directory cannot be read as a file.
        let store = Store::new(dir.path());
        let err = store.load(units(1000)).unwrap_err();
        assert!(matches!(err, StoreError::Io { .. }));
        assert!(!err.is_bad_content());
    }
}
