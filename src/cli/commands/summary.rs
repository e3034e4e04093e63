use crate::cli::output;
use crate::core::services::SummaryService;
use crate::ledger::Store;

/// Prints the grand total of every transaction.
pub fn display(store: &Store) {
    let summary = SummaryService::summarize(store);
    output::info(format!("\nTotal Income: {}", summary.total));
    output::info(format!(
        "({} transactions in {} categories)\n",
        summary.transactions, summary.categories
    ));
}
