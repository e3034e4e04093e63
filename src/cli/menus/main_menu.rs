/// Entries of the numbered main menu, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MainMenuOption {
    AddTransaction,
    ViewTransactions,
    UpdateTransaction,
    DeleteTransaction,
    DisplaySummary,
    BulkImport,
    TableView,
    Exit,
}

impl MainMenuOption {
    pub const ALL: [MainMenuOption; 8] = [
        MainMenuOption::AddTransaction,
        MainMenuOption::ViewTransactions,
        MainMenuOption::UpdateTransaction,
        MainMenuOption::DeleteTransaction,
        MainMenuOption::DisplaySummary,
        MainMenuOption::BulkImport,
        MainMenuOption::TableView,
        MainMenuOption::Exit,
    ];

    /// Maps the number typed at the menu prompt to an option.
    pub fn from_choice(choice: u64) -> Option<Self> {
        let index = usize::try_from(choice).ok()?.checked_sub(1)?;
        Self::ALL.get(index).copied()
    }

    pub fn number(self) -> usize {
        Self::ALL
            .iter()
            .position(|option| *option == self)
            .map(|index| index + 1)
            .unwrap_or_default()
    }

    pub fn label(self) -> &'static str {
        match self {
            MainMenuOption::AddTransaction => "Add Transaction",
            MainMenuOption::ViewTransactions => "View Transactions",
            MainMenuOption::UpdateTransaction => "Update Transaction",
            MainMenuOption::DeleteTransaction => "Delete Transaction",
            MainMenuOption::DisplaySummary => "Display Summary",
            MainMenuOption::BulkImport => "Read data in bulk",
            MainMenuOption::TableView => "Table view",
            MainMenuOption::Exit => "Exit",
        }
    }
}

/// Renders the menu body as shown before each prompt.
pub fn menu_lines() -> Vec<String> {
    MainMenuOption::ALL
        .iter()
        .map(|option| format!("{}. {}", option.number(), option.label()))
        .collect()
}
