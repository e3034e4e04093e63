//! Handlers behind the main menu entries. Each one reads what it needs from
//! the [`Console`](crate::cli::io::Console) and goes through the
//! [`StoreManager`](crate::core::StoreManager) so changes hit the disk
//! immediately.

pub mod import;
pub mod summary;
pub mod transaction;
