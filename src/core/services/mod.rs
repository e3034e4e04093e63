pub mod import_service;
pub mod summary_service;
pub mod transaction_service;

pub use import_service::{ImportReport, ImportService};
pub use summary_service::SummaryService;
pub use transaction_service::TransactionService;
