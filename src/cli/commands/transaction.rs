use crate::cli::io::Console;
use crate::cli::output;
use crate::cli::ui::table_renderer::{Alignment, Table, TableColumn};
use crate::core::StoreManager;
use crate::errors::CliError;
use crate::ledger::{normalize_category, Store, Transaction};

const CATEGORY_PROMPT: &str = "Enter the category:";
const SUGGESTION_THRESHOLD: f64 = 0.6;

pub fn add(console: &mut Console, manager: &mut StoreManager) -> Result<(), CliError> {
    console.set_completions(manager.store().category_names());
    let category = console.prompt_text(CATEGORY_PROMPT)?;
    let amount = console.prompt_positive("Enter the amount:")?;
    let date = console.prompt_text("Enter the date (YYYY-MM-DD):")?;
    let (name, position) = manager.add(&category, amount, &date)?;
    tracing::debug!(category = %name, position, amount, "transaction added");
    output::success("\nTransaction successfully saved!!\n");
    Ok(())
}

pub fn view(store: &Store) {
    if store.is_empty() {
        output::info("No transactions found.");
        return;
    }
    for (category, transactions) in store.categories() {
        output::info(format!("\nTransaction category: {category}"));
        for line in category_table(transactions).render_lines() {
            output::info(format!("    {line}"));
        }
    }
}

fn category_table(transactions: &[Transaction]) -> Table {
    let rows = transactions
        .iter()
        .enumerate()
        .map(|(idx, txn)| vec![(idx + 1).to_string(), txn.amount.to_string(), txn.date.clone()])
        .collect();
    Table::new(vec![
        TableColumn::new("#", Alignment::Right),
        TableColumn::new("Amount", Alignment::Right),
        TableColumn::new("Date", Alignment::Left),
    ])
    .with_rows(rows)
}

pub fn update(console: &mut Console, manager: &mut StoreManager) -> Result<(), CliError> {
    view(manager.store());
    if manager.store().is_empty() {
        return Ok(());
    }
    let (category, count) = select_existing_category(console, manager.store())?;
    let index = console.prompt_index("Enter which transaction to update:", count)?;
    let amount = console.prompt_positive("Enter the new amount:")?;
    let date = console.prompt_text("Enter the new date (YYYY-MM-DD):")?;
    manager.update(&category, index, amount, &date)?;
    output::success("\nTransaction successfully updated!!\n");
    Ok(())
}

pub fn delete(console: &mut Console, manager: &mut StoreManager) -> Result<(), CliError> {
    view(manager.store());
    if manager.store().is_empty() {
        return Ok(());
    }
    let (category, count) = select_existing_category(console, manager.store())?;
    let index = console.prompt_index("Enter which transaction to delete:", count)?;
    manager.remove(&category, index)?;
    output::success("\nTransaction successfully deleted!!\n");
    Ok(())
}

/// Asks until the answer names a category in the store. Returns the
/// normalized name and how many transactions it holds.
fn select_existing_category(
    console: &mut Console,
    store: &Store,
) -> Result<(String, usize), CliError> {
    console.set_completions(store.category_names());
    loop {
        let name = normalize_category(&console.prompt_text(CATEGORY_PROMPT)?);
        if let Some(transactions) = store.transactions(&name) {
            return Ok((name, transactions.len()));
        }
        output::warning("Please enter a category that already exists!!");
        if let Some(candidate) = suggest_category(store, &name) {
            output::info(format!("Did you mean `{candidate}`?"));
        }
    }
}

/// Closest existing category to `name`, if any is reasonably similar.
pub fn suggest_category<'a>(store: &'a Store, name: &str) -> Option<&'a str> {
    let needle = name.to_lowercase();
    store
        .category_names()
        .map(|candidate| {
            let score = strsim::normalized_damerau_levenshtein(&needle, &candidate.to_lowercase());
            (candidate, score)
        })
        .filter(|(_, score)| *score >= SUGGESTION_THRESHOLD)
        .max_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(candidate, _)| candidate)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use tempfile::TempDir;

    fn fixture(temp: &TempDir) -> StoreManager {
        let mut manager = StoreManager::open(temp.path().join("transactions.json"));
        manager.add("food", 100, "2024-01-01").unwrap();
        manager.add("food", 40, "2024-01-09").unwrap();
        manager.add("rent", 500, "2024-01-02").unwrap();
        manager
    }

    fn console(input: &str) -> Console {
        Console::script(Cursor::new(input.to_string()))
    }

    #[test]
    fn add_retries_amount_and_files_under_capitalized_category() {
        let temp = TempDir::new().unwrap();
        let mut manager = StoreManager::open(temp.path().join("transactions.json"));
        let mut console = console("groceries\nten\n-1\n12\n2024-04-01\n");
        add(&mut console, &mut manager).unwrap();
        assert_eq!(
            manager.store().transactions("Groceries").unwrap(),
            &[Transaction::new(12, "2024-04-01")]
        );
    }

    #[test]
    fn update_reprompts_for_unknown_category_and_index() {
        let temp = TempDir::new().unwrap();
        let mut manager = fixture(&temp);
        let mut console = console("travel\nFOOD\n5\n2\n45\n2024-01-10\n");
        update(&mut console, &mut manager).unwrap();
        assert_eq!(
            manager.store().transactions("Food").unwrap()[1],
            Transaction::new(45, "2024-01-10")
        );
    }

    #[test]
    fn deleting_last_entry_removes_category() {
        let temp = TempDir::new().unwrap();
        let mut manager = fixture(&temp);
        let mut console = console("rent\n1\n");
        delete(&mut console, &mut manager).unwrap();
        assert!(!manager.store().contains_category("Rent"));
        assert_eq!(manager.store().total(), 140);
    }

    #[test]
    fn update_on_empty_store_asks_nothing() {
        let temp = TempDir::new().unwrap();
        let mut manager = StoreManager::open(temp.path().join("transactions.json"));
        let mut console = console("");
        update(&mut console, &mut manager).unwrap();
        delete(&mut console, &mut manager).unwrap();
    }

    #[test]
    fn suggestion_picks_closest_category() {
        let temp = TempDir::new().unwrap();
        let manager = fixture(&temp);
        assert_eq!(suggest_category(manager.store(), "Fod"), Some("Food"));
        assert_eq!(suggest_category(manager.store(), "Vacation"), None);
    }

    #[test]
    fn category_table_numbers_rows_from_one() {
        let table = category_table(&[Transaction::new(7, "a"), Transaction::new(8, "b")]);
        let lines = table.render_lines();
        assert!(lines[2].trim_start().starts_with("1 "));
        assert!(lines[3].trim_start().starts_with("2 "));
    }
}
