use std::path::{Path, PathBuf};

use crate::core::services::{ImportReport, ImportService, SummaryService, TransactionService};
use crate::errors::TrackerError;
use crate::ledger::{Store, Transaction};
use crate::utils::persistence::{load_store_with_backup, save_store};

/// Facade that owns the in-memory store and writes it back to its data file
/// after every mutation.
pub struct StoreManager {
    store: Store,
    path: PathBuf,
    backup: Option<PathBuf>,
}

impl StoreManager {
    /// Loads the store from `path`, starting empty when the file is missing
    /// or unreadable. An unreadable file is copied aside first.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let loaded = load_store_with_backup(&path);
        let store = loaded.store;
        tracing::debug!(
            path = %path.display(),
            transactions = store.len(),
            "store loaded"
        );
        Self {
            store,
            path,
            backup: loaded.backup,
        }
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Where the unreadable data file found at startup was copied, if any.
    pub fn recovered_backup(&self) -> Option<&Path> {
        self.backup.as_deref()
    }

    pub fn add(
        &mut self,
        category: &str,
        amount: u64,
        date: &str,
    ) -> Result<(String, usize), TrackerError> {
        let added = TransactionService::add(&mut self.store, category, amount, date)?;
        self.save()?;
        Ok(added)
    }

    pub fn update(
        &mut self,
        category: &str,
        index: usize,
        amount: u64,
        date: &str,
    ) -> Result<Transaction, TrackerError> {
        let previous = TransactionService::update(&mut self.store, category, index, amount, date)?;
        self.save()?;
        Ok(previous)
    }

    pub fn remove(&mut self, category: &str, index: usize) -> Result<Transaction, TrackerError> {
        let removed = TransactionService::remove(&mut self.store, category, index)?;
        self.save()?;
        Ok(removed)
    }

    /// Imports a bulk file and persists once at the end.
    pub fn import_file(&mut self, path: &Path) -> Result<ImportReport, TrackerError> {
        let report = ImportService::import_file(&mut self.store, path)?;
        self.save()?;
        tracing::debug!(
            path = %path.display(),
            imported = report.imported,
            skipped = report.skipped,
            "bulk import finished"
        );
        Ok(report)
    }

    pub fn total(&self) -> u128 {
        SummaryService::total(&self.store)
    }

    pub fn save(&self) -> Result<(), TrackerError> {
        save_store(&self.store, &self.path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn manager_in(temp: &TempDir) -> StoreManager {
        StoreManager::open(temp.path().join("transactions.json"))
    }

    #[test]
    fn every_mutation_is_written_to_disk() {
        let temp = TempDir::new().unwrap();
        let mut manager = manager_in(&temp);
        manager.add("food", 100, "2024-01-01").unwrap();
        assert_eq!(manager_in(&temp).store().total(), 100);

        manager.update("Food", 1, 120, "2024-01-02").unwrap();
        assert_eq!(
            manager_in(&temp).store().transactions("Food").unwrap(),
            &[Transaction::new(120, "2024-01-02")]
        );

        manager.remove("food", 1).unwrap();
        assert!(manager_in(&temp).store().is_empty());
    }

    #[test]
    fn failed_mutation_leaves_file_untouched() {
        let temp = TempDir::new().unwrap();
        let mut manager = manager_in(&temp);
        assert!(manager.remove("food", 1).is_err());
        assert!(!manager.path().exists());
    }

    #[test]
    fn import_file_persists_once() {
        let temp = TempDir::new().unwrap();
        let source = temp.path().join("batch.txt");
        fs::write(&source, "food,10,x,2024-01-01\nrent,500,y,2024-01-02\n").unwrap();
        let mut manager = manager_in(&temp);
        let report = manager.import_file(&source).unwrap();
        assert_eq!(report.imported, 2);
        assert_eq!(manager_in(&temp).store().total(), 510);
    }

    #[test]
    fn failed_import_does_not_leak_into_later_saves() {
        let temp = TempDir::new().unwrap();
        let source = temp.path().join("broken.txt");
        let mut bytes = b"food,10,x,2024-01-01\n".to_vec();
        bytes.extend_from_slice(&[0xff, 0xfe]);
        fs::write(&source, bytes).unwrap();

        let mut manager = manager_in(&temp);
        assert!(manager.import_file(&source).is_err());
        assert_eq!(manager.total(), 0);

        manager.add("rent", 5, "2024-01-02").unwrap();
        let reloaded = manager_in(&temp);
        assert_eq!(reloaded.total(), 5);
        assert!(!reloaded.store().contains_category("Food"));
    }

    #[test]
    fn import_of_missing_file_is_not_found() {
        let temp = TempDir::new().unwrap();
        let mut manager = manager_in(&temp);
        let err = manager.import_file(&temp.path().join("nope.txt")).unwrap_err();
        assert!(
            matches!(err, TrackerError::Io(ref io) if io.kind() == std::io::ErrorKind::NotFound)
        );
    }
}
