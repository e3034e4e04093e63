//! Ledger domain models: transactions, category names, and the store that
//! groups them.

pub mod category;
pub mod store;
pub mod transaction;

pub use category::normalize_category;
pub use store::{Store, TransactionRow};
pub use transaction::Transaction;
