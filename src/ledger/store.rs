use std::fmt;

use serde::{
    de::{MapAccess, Visitor},
    ser::SerializeMap,
    Deserialize, Deserializer, Serialize, Serializer,
};

use super::{category::normalize_category, transaction::Transaction};
use crate::errors::{Result, TrackerError};

/// Category-keyed collection of transactions. Categories keep the order in
/// which they were first created, both in memory and in the data file, and
/// never hold an empty list; the key is dropped together with its last
/// transaction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Store {
    categories: Vec<(String, Vec<Transaction>)>,
}

/// Flattened `(category, amount, date)` view of one transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionRow {
    pub category: String,
    pub amount: u64,
    pub date: String,
}

impl Store {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    /// Number of transactions across every category.
    pub fn len(&self) -> usize {
        self.categories.iter().map(|(_, txns)| txns.len()).sum()
    }

    pub fn category_names(&self) -> impl Iterator<Item = &str> {
        self.categories.iter().map(|(name, _)| name.as_str())
    }

    pub fn categories(&self) -> impl Iterator<Item = (&str, &[Transaction])> {
        self.categories
            .iter()
            .map(|(name, txns)| (name.as_str(), txns.as_slice()))
    }

    pub fn contains_category(&self, category: &str) -> bool {
        self.position(&normalize_category(category)).is_some()
    }

    pub fn transactions(&self, category: &str) -> Option<&[Transaction]> {
        self.position(&normalize_category(category))
            .map(|idx| self.categories[idx].1.as_slice())
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.categories.iter().position(|(key, _)| key == name)
    }

    fn entries_mut(&mut self, name: &str) -> Result<&mut Vec<Transaction>> {
        match self.position(name) {
            Some(idx) => Ok(&mut self.categories[idx].1),
            None => Err(TrackerError::CategoryNotFound(name.to_string())),
        }
    }

    /// Appends a transaction under the normalized category and returns the
    /// category name with the 1-based position of the new entry.
    pub fn add(&mut self, category: &str, transaction: Transaction) -> Result<(String, usize)> {
        let name = normalize_category(category);
        if name.is_empty() {
            return Err(TrackerError::InvalidInput(
                "category must not be empty".into(),
            ));
        }
        let idx = match self.position(&name) {
            Some(idx) => idx,
            None => {
                self.categories.push((name.clone(), Vec::new()));
                self.categories.len() - 1
            }
        };
        let entries = &mut self.categories[idx].1;
        entries.push(transaction);
        Ok((name, entries.len()))
    }

    /// Replaces the transaction at the 1-based `index`, returning the old one.
    pub fn update(
        &mut self,
        category: &str,
        index: usize,
        transaction: Transaction,
    ) -> Result<Transaction> {
        let name = normalize_category(category);
        let entries = self.entries_mut(&name)?;
        let slot = index
            .checked_sub(1)
            .and_then(|offset| entries.get_mut(offset))
            .ok_or(TrackerError::InvalidIndex {
                category: name,
                index,
            })?;
        Ok(std::mem::replace(slot, transaction))
    }

    /// Removes the transaction at the 1-based `index`; the category goes away
    /// when it was the last one.
    pub fn remove(&mut self, category: &str, index: usize) -> Result<Transaction> {
        let name = normalize_category(category);
        let entries = self.entries_mut(&name)?;
        if index == 0 || index > entries.len() {
            return Err(TrackerError::InvalidIndex {
                category: name,
                index,
            });
        }
        let removed = entries.remove(index - 1);
        if entries.is_empty() {
            self.categories.retain(|(key, _)| *key != name);
        }
        Ok(removed)
    }

    /// Sum of every amount in the store. Accumulates in `u128` so any number
    /// of `u64` amounts adds up exactly.
    pub fn total(&self) -> u128 {
        self.categories
            .iter()
            .flat_map(|(_, txns)| txns)
            .map(|txn| u128::from(txn.amount))
            .sum()
    }

    /// All transactions flattened in store order.
    pub fn rows(&self) -> Vec<TransactionRow> {
        self.categories
            .iter()
            .flat_map(|(category, txns)| {
                txns.iter().map(move |txn| TransactionRow {
                    category: category.clone(),
                    amount: txn.amount,
                    date: txn.date.clone(),
                })
            })
            .collect()
    }
}

impl Serialize for Store {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.categories.len()))?;
        for (name, txns) in &self.categories {
            map.serialize_entry(name, txns)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Store {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        deserializer.deserialize_map(StoreVisitor)
    }
}

/// Reads the category map keeping key order; a repeated key replaces the
/// earlier list in place.
struct StoreVisitor;

impl<'de> Visitor<'de> for StoreVisitor {
    type Value = Store;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a map of category names to transaction lists")
    }

    fn visit_map<M: MapAccess<'de>>(self, mut access: M) -> std::result::Result<Store, M::Error> {
        let mut store = Store::new();
        while let Some((name, txns)) = access.next_entry::<String, Vec<Transaction>>()? {
            match store.position(&name) {
                Some(idx) => store.categories[idx].1 = txns,
                None => store.categories.push((name, txns)),
            }
        }
        store.categories.retain(|(_, txns)| !txns.is_empty());
        Ok(store)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_with(entries: &[(&str, u64, &str)]) -> Store {
        let mut store = Store::new();
        for (category, amount, date) in entries {
            store
                .add(category, Transaction::new(*amount, *date))
                .expect("add transaction");
        }
        store
    }

    #[test]
    fn add_files_transaction_under_capitalized_category() {
        let mut store = Store::new();
        let (name, position) = store
            .add("food", Transaction::new(100, "2024-01-01"))
            .unwrap();
        assert_eq!(name, "Food");
        assert_eq!(position, 1);
        assert_eq!(
            store.transactions("FOOD").unwrap(),
            &[Transaction::new(100, "2024-01-01")]
        );
    }

    #[test]
    fn add_rejects_blank_category() {
        let mut store = Store::new();
        let err = store.add("  ", Transaction::new(1, "x")).unwrap_err();
        assert!(matches!(err, TrackerError::InvalidInput(_)));
        assert!(store.is_empty());
    }

    #[test]
    fn insertion_order_is_kept_within_category() {
        let store = store_with(&[("rent", 500, "2024-01-01"), ("Rent", 510, "2024-02-01")]);
        let amounts: Vec<u64> = store
            .transactions("Rent")
            .unwrap()
            .iter()
            .map(|t| t.amount)
            .collect();
        assert_eq!(amounts, vec![500, 510]);
    }

    #[test]
    fn update_replaces_by_one_based_index() {
        let mut store = store_with(&[("food", 10, "a"), ("food", 20, "b")]);
        let old = store
            .update("food", 2, Transaction::new(25, "c"))
            .unwrap();
        assert_eq!(old, Transaction::new(20, "b"));
        assert_eq!(store.transactions("Food").unwrap()[1], Transaction::new(25, "c"));
    }

    #[test]
    fn update_and_remove_reject_out_of_range_index() {
        let mut store = store_with(&[("food", 10, "a")]);
        assert!(matches!(
            store.update("food", 0, Transaction::new(1, "x")),
            Err(TrackerError::InvalidIndex { index: 0, .. })
        ));
        assert!(matches!(
            store.remove("food", 2),
            Err(TrackerError::InvalidIndex { index: 2, .. })
        ));
        assert!(matches!(
            store.remove("travel", 1),
            Err(TrackerError::CategoryNotFound(name)) if name == "Travel"
        ));
    }

    #[test]
    fn removing_last_transaction_drops_category() {
        let mut store = store_with(&[("food", 10, "a"), ("rent", 500, "b")]);
        store.remove("food", 1).unwrap();
        assert!(!store.contains_category("Food"));
        assert_eq!(store.category_names().collect::<Vec<_>>(), vec!["Rent"]);
    }

    #[test]
    fn total_sums_every_category() {
        let store = store_with(&[("food", 100, "2024-01-01"), ("rent", 500, "2024-01-02")]);
        assert_eq!(store.total(), 600);
        assert_eq!(Store::new().total(), 0);
    }

    #[test]
    fn total_does_not_overflow_on_large_amounts() {
        let store = store_with(&[("food", u64::MAX, "a"), ("food", 1, "b"), ("rent", u64::MAX, "c")]);
        assert_eq!(store.total(), u128::from(u64::MAX) * 2 + 1);
    }

    #[test]
    fn rows_flatten_in_creation_order() {
        let store = store_with(&[("transport", 30, "b"), ("food", 10, "a"), ("food", 12, "c")]);
        let categories: Vec<String> = store.rows().into_iter().map(|r| r.category).collect();
        assert_eq!(categories, vec!["Transport", "Food", "Food"]);
        assert_eq!(store.len(), 3);
    }

    #[test]
    fn serialization_keeps_category_creation_order() {
        let json = r#"{"Rent":[{"amount":5,"date":"a"}],"Food":[{"amount":1,"date":"b"}]}"#;
        let mut store: Store = serde_json::from_str(json).unwrap();
        store.add("bills", Transaction::new(2, "c")).unwrap();
        assert_eq!(
            store.category_names().collect::<Vec<_>>(),
            vec!["Rent", "Food", "Bills"]
        );
        let written = serde_json::to_string(&store).unwrap();
        assert!(written.starts_with(r#"{"Rent":"#));
        assert!(written.find("\"Food\"").unwrap() < written.find("\"Bills\"").unwrap());
    }

    #[test]
    fn removing_then_re_adding_moves_category_to_the_end() {
        let mut store = store_with(&[("food", 1, "a"), ("rent", 2, "b")]);
        store.remove("food", 1).unwrap();
        store.add("food", Transaction::new(3, "c")).unwrap();
        assert_eq!(store.category_names().collect::<Vec<_>>(), vec!["Rent", "Food"]);
    }

    #[test]
    fn deserializes_from_category_map() {
        let json = r#"{"Food": [{"amount": 100, "date": "2024-01-01"}]}"#;
        let store: Store = serde_json::from_str(json).unwrap();
        assert_eq!(store.total(), 100);
    }
}
