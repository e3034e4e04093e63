use crate::ledger::Store;

/// Aggregate figures derived from the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StoreSummary {
    pub total: u128,
    pub categories: usize,
    pub transactions: usize,
}

pub struct SummaryService;

impl SummaryService {
    /// Sum of every amount; the data model has no income/expense split.
    pub fn total(store: &Store) -> u128 {
        store.total()
    }

    pub fn summarize(store: &Store) -> StoreSummary {
        StoreSummary {
            total: store.total(),
            categories: store.category_names().count(),
            transactions: store.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::Transaction;

    #[test]
    fn total_adds_amounts_across_categories() {
        let mut store = Store::new();
        store.add("Food", Transaction::new(100, "2024-01-01")).unwrap();
        store.add("Rent", Transaction::new(500, "2024-01-01")).unwrap();
        assert_eq!(SummaryService::total(&store), 600);
        assert_eq!(
            SummaryService::summarize(&store),
            StoreSummary {
                total: 600,
                categories: 2,
                transactions: 2
            }
        );
    }

    #[test]
    fn summary_of_huge_amounts_is_exact() {
        let mut store = Store::new();
        store.add("Food", Transaction::new(u64::MAX, "2024-01-01")).unwrap();
        store.add("Food", Transaction::new(1, "2024-01-02")).unwrap();
        assert_eq!(
            SummaryService::summarize(&store).total,
            18_446_744_073_709_551_616
        );
    }

    #[test]
    fn empty_store_summarizes_to_zero() {
        assert_eq!(SummaryService::summarize(&Store::new()), StoreSummary::default());
    }
}
