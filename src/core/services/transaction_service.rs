//! Business logic helpers for managing transactions.

use crate::errors::Result;
use crate::ledger::{Store, Transaction};

/// Provides validated CRUD helpers for store transactions.
pub struct TransactionService;

impl TransactionService {
    /// Validates and appends a transaction, returning the normalized category
    /// and the 1-based position it landed at.
    pub fn add(
        store: &mut Store,
        category: &str,
        amount: u64,
        date: &str,
    ) -> Result<(String, usize)> {
        let transaction = Transaction::validated(amount, date)?;
        store.add(category, transaction)
    }

    /// Replaces the transaction at the 1-based `index` with a validated one.
    pub fn update(
        store: &mut Store,
        category: &str,
        index: usize,
        amount: u64,
        date: &str,
    ) -> Result<Transaction> {
        let transaction = Transaction::validated(amount, date)?;
        store.update(category, index, transaction)
    }

    /// Removes the transaction at the 1-based `index`, returning it.
    pub fn remove(store: &mut Store, category: &str, index: usize) -> Result<Transaction> {
        store.remove(category, index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::TrackerError;

    #[test]
    fn add_validates_before_touching_store() {
        let mut store = Store::new();
        let err = TransactionService::add(&mut store, "food", 0, "2024-01-01")
            .expect_err("zero amount must be rejected");
        assert!(matches!(err, TrackerError::InvalidInput(_)));
        assert!(store.is_empty());
    }

    #[test]
    fn update_keeps_category_position() {
        let mut store = Store::new();
        TransactionService::add(&mut store, "food", 10, "a").unwrap();
        TransactionService::add(&mut store, "food", 20, "b").unwrap();
        TransactionService::update(&mut store, "Food", 1, 15, "c").unwrap();
        let amounts: Vec<u64> = store
            .transactions("food")
            .unwrap()
            .iter()
            .map(|t| t.amount)
            .collect();
        assert_eq!(amounts, vec![15, 20]);
    }

    #[test]
    fn remove_returns_deleted_transaction() {
        let mut store = Store::new();
        TransactionService::add(&mut store, "rent", 500, "2024-01-01").unwrap();
        let removed = TransactionService::remove(&mut store, "rent", 1).unwrap();
        assert_eq!(removed, Transaction::new(500, "2024-01-01"));
        assert!(store.is_empty());
    }
}
