//! Sortable, searchable table of every transaction. The [`TableView`] model
//! holds no terminal state; [`run`] drives it either from key presses on an
//! alternate screen or from script lines.

use std::cmp::Ordering;
use std::io::{self, Stdout, Write};
use std::path::Path;

use crossterm::{
    cursor,
    event::KeyCode,
    terminal::{self, ClearType, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};

use crate::cli::io::{CliMode, Console};
use crate::cli::output::{self, current_preferences};
use crate::cli::ui::banner::TITLE;
use crate::cli::ui::navigation::read_key_press;
use crate::cli::ui::table_renderer::{Alignment, Table, TableColumn};
use crate::errors::CliError;
use crate::ledger::{normalize_category, Store, TransactionRow};
use crate::utils::persistence::load_store;

pub const SORT_QUESTION: &str = "Is it in ascending order?";

const SCRIPT_PROMPT: &str = "table>";
const KEY_HINT: &str =
    "[1] Category  [2] Amount  [3] Date: sort   [/] search   [r] reset   [↑/↓] scroll   [q] close";
const SCRIPT_HINT: &str =
    "Commands: sort <category|amount|date>, search <text>, reset, close";
const DATE_WIDTH: usize = 32;
const CHROME_LINES: usize = 7;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
    Category,
    Amount,
    Date,
}

impl Column {
    pub const ALL: [Column; 3] = [Column::Category, Column::Amount, Column::Date];

    pub fn header(self) -> &'static str {
        match self {
            Column::Category => "Category",
            Column::Amount => "Amount",
            Column::Date => "Date",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|column| column.header().eq_ignore_ascii_case(name.trim()))
    }

    pub fn cell(self, row: &TransactionRow) -> String {
        match self {
            Column::Category => row.category.clone(),
            Column::Amount => row.amount.to_string(),
            Column::Date => row.date.clone(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Ascending,
    Descending,
}

impl SortOrder {
    pub fn from_ascending(ascending: bool) -> Self {
        if ascending {
            SortOrder::Ascending
        } else {
            SortOrder::Descending
        }
    }
}

/// Comparison key for a cell: integers compare numerically and order before
/// any text.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum SortKey {
    Number(i64),
    Text(String),
}

impl SortKey {
    pub fn parse(cell: &str) -> Self {
        match cell.trim().parse::<i64>() {
            Ok(number) => SortKey::Number(number),
            Err(_) => SortKey::Text(cell.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableView {
    rows: Vec<TransactionRow>,
    visible: Vec<TransactionRow>,
    query: String,
    sorted_by: Option<(Column, SortOrder)>,
}

impl TableView {
    pub fn new(rows: Vec<TransactionRow>) -> Self {
        Self {
            visible: rows.clone(),
            rows,
            query: String::new(),
            sorted_by: None,
        }
    }

    pub fn from_store(store: &Store) -> Self {
        Self::new(store.rows())
    }

    /// Reads its own copy of the data file.
    pub fn load(path: &Path) -> Self {
        Self::from_store(&load_store(path))
    }

    pub fn visible(&self) -> &[TransactionRow] {
        &self.visible
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn sorted_by(&self) -> Option<(Column, SortOrder)> {
        self.sorted_by
    }

    /// Stable sort of the rows currently displayed.
    pub fn sort(&mut self, column: Column, order: SortOrder) {
        self.visible.sort_by(|a, b| {
            let ordering: Ordering =
                SortKey::parse(&column.cell(a)).cmp(&SortKey::parse(&column.cell(b)));
            match order {
                SortOrder::Ascending => ordering,
                SortOrder::Descending => ordering.reverse(),
            }
        });
        self.sorted_by = Some((column, order));
    }

    /// Shows the rows, in store order, whose category, amount or date
    /// contains the capitalized query.
    pub fn search(&mut self, query: &str) {
        let needle = normalize_category(query);
        self.visible = self
            .rows
            .iter()
            .filter(|row| {
                Column::ALL
                    .iter()
                    .any(|column| column.cell(row).contains(&needle))
            })
            .cloned()
            .collect();
        self.query = needle;
        self.sorted_by = None;
    }

    /// Clears the search and restores the full listing.
    pub fn reset(&mut self) {
        self.visible = self.rows.clone();
        self.query.clear();
        self.sorted_by = None;
    }

    pub fn table(&self) -> Table {
        let prefs = current_preferences();
        let columns = Column::ALL
            .into_iter()
            .map(|column| {
                let mut header = column.header().to_string();
                if let Some((_, order)) = self.sorted_by.filter(|(sorted, _)| *sorted == column) {
                    header.push_str(match (order, prefs.plain_mode) {
                        (SortOrder::Ascending, false) => " ▲",
                        (SortOrder::Descending, false) => " ▼",
                        (SortOrder::Ascending, true) => " (asc)",
                        (SortOrder::Descending, true) => " (desc)",
                    });
                }
                match column {
                    Column::Amount => TableColumn::new(header, Alignment::Right),
                    Column::Date => {
                        TableColumn::new(header, Alignment::Left).with_max_width(DATE_WIDTH)
                    }
                    Column::Category => TableColumn::new(header, Alignment::Left),
                }
            })
            .collect();
        let rows = self
            .visible
            .iter()
            .map(|row| Column::ALL.iter().map(|c| c.cell(row)).collect())
            .collect();
        Table::new(columns).with_rows(rows)
    }

    /// Header, rule and up to `limit` rows starting at `offset`.
    pub fn render_window(&self, offset: usize, limit: usize) -> Vec<String> {
        let mut lines = self.table().render_lines();
        if self.visible.is_empty() {
            lines.push(" No transactions found.".to_string());
            return lines;
        }
        let body: Vec<String> = lines.drain(2..).skip(offset).take(limit).collect();
        lines.extend(body);
        lines
    }

    pub fn render_lines(&self) -> Vec<String> {
        self.render_window(0, self.visible.len())
    }
}

/// Commands accepted by the table view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewCommand {
    Sort(Column),
    Search(String),
    Reset,
    Close,
}

/// Parses one script line. Blank lines yield `Ok(None)`.
pub fn parse_script_command(line: &str) -> Result<Option<ViewCommand>, String> {
    let tokens = shell_words::split(line).map_err(|err| err.to_string())?;
    let Some((command, args)) = tokens.split_first() else {
        return Ok(None);
    };
    match command.to_ascii_lowercase().as_str() {
        "sort" => {
            let name = args.first().map(String::as_str).unwrap_or_default();
            Column::from_name(name)
                .map(|column| Some(ViewCommand::Sort(column)))
                .ok_or_else(|| format!("Unknown column `{name}`. {SCRIPT_HINT}"))
        }
        "search" => Ok(Some(ViewCommand::Search(args.join(" ")))),
        "reset" => Ok(Some(ViewCommand::Reset)),
        "close" | "exit" | "quit" => Ok(Some(ViewCommand::Close)),
        other => Err(format!("Unknown table command `{other}`. {SCRIPT_HINT}")),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Sort(Column),
    EditSearch,
    Reset,
    ScrollUp,
    ScrollDown,
    Close,
    Ignore,
}

pub fn key_action(code: KeyCode) -> KeyAction {
    match code {
        KeyCode::Char('1') => KeyAction::Sort(Column::Category),
        KeyCode::Char('2') => KeyAction::Sort(Column::Amount),
        KeyCode::Char('3') => KeyAction::Sort(Column::Date),
        KeyCode::Char('/') | KeyCode::Char('s') => KeyAction::EditSearch,
        KeyCode::Char('r') | KeyCode::Char('R') => KeyAction::Reset,
        KeyCode::Up | KeyCode::PageUp => KeyAction::ScrollUp,
        KeyCode::Down | KeyCode::PageDown => KeyAction::ScrollDown,
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => KeyAction::Close,
        _ => KeyAction::Ignore,
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchEdit {
    Editing,
    Submit(String),
    Cancel,
}

/// Line editor for the search box while it has focus.
#[derive(Debug, Default)]
pub struct SearchField {
    buffer: String,
}

impl SearchField {
    pub fn new(initial: &str) -> Self {
        Self {
            buffer: initial.to_string(),
        }
    }

    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    pub fn handle(&mut self, code: KeyCode) -> SearchEdit {
        match code {
            KeyCode::Enter => SearchEdit::Submit(std::mem::take(&mut self.buffer)),
            KeyCode::Esc => SearchEdit::Cancel,
            KeyCode::Backspace => {
                self.buffer.pop();
                SearchEdit::Editing
            }
            KeyCode::Delete => {
                self.buffer.clear();
                SearchEdit::Editing
            }
            KeyCode::Char(ch) => {
                self.buffer.push(ch);
                SearchEdit::Editing
            }
            _ => SearchEdit::Editing,
        }
    }
}

/// Opens the table view over a fresh load of `data_file`.
pub fn run(console: &mut Console, data_file: &Path) -> Result<(), CliError> {
    let mut view = TableView::load(data_file);
    tracing::debug!(rows = view.visible().len(), "table view opened");
    match console.mode() {
        CliMode::Interactive => run_interactive(&mut view, console),
        CliMode::Script => run_script(&mut view, console),
    }
}

fn run_script(view: &mut TableView, console: &mut Console) -> Result<(), CliError> {
    output::section(TITLE);
    output::info(SCRIPT_HINT);
    print_view(view);
    loop {
        let line = console.read_line(SCRIPT_PROMPT)?;
        match parse_script_command(&line) {
            Ok(Some(ViewCommand::Sort(column))) => {
                let ascending = console.confirm(SORT_QUESTION)?;
                view.sort(column, SortOrder::from_ascending(ascending));
            }
            Ok(Some(ViewCommand::Search(query))) => view.search(&query),
            Ok(Some(ViewCommand::Reset)) => view.reset(),
            Ok(Some(ViewCommand::Close)) => return Ok(()),
            Ok(None) => continue,
            Err(message) => {
                output::warning(message);
                continue;
            }
        }
        print_view(view);
    }
}

fn print_view(view: &TableView) {
    for line in view.render_lines() {
        output::info(line);
    }
    output::info(format!("Search: {}", view.query()));
}

fn run_interactive(view: &mut TableView, console: &mut Console) -> Result<(), CliError> {
    let mut screen = ScreenGuard::enter()?;
    let mut stdout = io::stdout();
    let mut search: Option<SearchField> = None;
    let mut offset = 0usize;

    loop {
        let capacity = body_capacity();
        offset = offset.min(view.visible().len().saturating_sub(capacity));
        draw(&mut stdout, view, search.as_ref(), offset, capacity)?;
        let code = read_key_press()?;

        if let Some(field) = search.as_mut() {
            match field.handle(code) {
                SearchEdit::Editing => {}
                SearchEdit::Submit(query) => {
                    view.search(&query);
                    offset = 0;
                    search = None;
                }
                SearchEdit::Cancel => search = None,
            }
            continue;
        }

        match key_action(code) {
            KeyAction::Sort(column) => {
                screen.suspend()?;
                let answer = console.confirm(SORT_QUESTION);
                screen.resume()?;
                view.sort(column, SortOrder::from_ascending(answer?));
            }
            KeyAction::EditSearch => search = Some(SearchField::new(view.query())),
            KeyAction::Reset => {
                view.reset();
                offset = 0;
            }
            KeyAction::ScrollUp => offset = offset.saturating_sub(1),
            KeyAction::ScrollDown => offset += 1,
            KeyAction::Close => break,
            KeyAction::Ignore => {}
        }
    }
    Ok(())
}

fn body_capacity() -> usize {
    terminal::size()
        .map(|(_, rows)| usize::from(rows).saturating_sub(CHROME_LINES))
        .unwrap_or(20)
        .max(1)
}

fn draw(
    stdout: &mut Stdout,
    view: &TableView,
    search: Option<&SearchField>,
    offset: usize,
    capacity: usize,
) -> io::Result<()> {
    stdout.execute(terminal::Clear(ClearType::All))?;
    stdout.execute(cursor::MoveTo(0, 0))?;
    write!(stdout, "{TITLE}\r\n\r\n")?;
    for line in view.render_window(offset, capacity) {
        write!(stdout, "{line}\r\n")?;
    }
    let search_line = match search {
        Some(field) => format!("Search: {}_", field.buffer()),
        None => format!("Search: {}", view.query()),
    };
    write!(stdout, "\r\n{search_line}\r\n{KEY_HINT}")?;
    stdout.flush()
}

/// Raw mode plus alternate screen for the lifetime of the view.
struct ScreenGuard {
    active: bool,
}

impl ScreenGuard {
    fn enter() -> io::Result<Self> {
        let mut guard = Self { active: false };
        guard.resume()?;
        Ok(guard)
    }

    fn resume(&mut self) -> io::Result<()> {
        let mut stdout = io::stdout();
        stdout.execute(EnterAlternateScreen)?;
        stdout.execute(cursor::Hide)?;
        terminal::enable_raw_mode()?;
        self.active = true;
        Ok(())
    }

    /// Hands the terminal back for a dialog.
    fn suspend(&mut self) -> io::Result<()> {
        if self.active {
            terminal::disable_raw_mode()?;
            let mut stdout = io::stdout();
            stdout.execute(cursor::Show)?;
            stdout.execute(LeaveAlternateScreen)?;
            self.active = false;
        }
        Ok(())
    }
}

impl Drop for ScreenGuard {
    fn drop(&mut self) {
        let _ = self.suspend();
    }
}
