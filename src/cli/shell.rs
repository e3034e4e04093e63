use std::env;

use crate::cli::commands::{import, summary, transaction};
use crate::cli::io::{CliMode, Console};
use crate::cli::menus::{menu_lines, MainMenuOption};
use crate::cli::output::{self, OutputPreferences};
use crate::cli::ui::{banner::Banner, banner::TITLE, table_view};
use crate::config::{Config, ConfigManager};
use crate::core::StoreManager;
use crate::errors::CliError;

const EXIT_MESSAGE: &str = "Exiting program.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopControl {
    Continue,
    Exit,
}

pub fn run_cli() -> Result<(), CliError> {
    let config = ConfigManager::new()?.resolve()?;
    output::set_preferences(OutputPreferences {
        plain_mode: config.plain_output || env::var_os("NO_COLOR").is_some(),
    });

    let mode = CliMode::from_env();
    let console = Console::for_mode(mode)?;
    let manager = StoreManager::open(&config.data_file);
    tracing::debug!(?mode, data_file = %config.data_file.display(), "starting menu loop");

    Session::new(console, manager, config).run()
}

/// One run of the numbered menu over a loaded store.
pub struct Session {
    console: Console,
    manager: StoreManager,
    config: Config,
}

impl Session {
    pub fn new(console: Console, manager: StoreManager, config: Config) -> Self {
        Self {
            console,
            manager,
            config,
        }
    }

    pub fn manager(&self) -> &StoreManager {
        &self.manager
    }

    pub fn run(&mut self) -> Result<(), CliError> {
        Banner::render();
        if let Some(backup) = self.manager.recovered_backup() {
            output::warning(format!(
                "Could not read {}; a copy was saved to {}. Starting with no transactions.",
                self.manager.path().display(),
                backup.display()
            ));
        }
        loop {
            match self.step() {
                Ok(LoopControl::Continue) => {}
                Ok(LoopControl::Exit) => break,
                Err(CliError::EndOfInput) => {
                    output::info(EXIT_MESSAGE);
                    break;
                }
                Err(CliError::Core(err)) => {
                    tracing::warn!(error = %err, "command failed");
                    output::error(err);
                }
                Err(err) => return Err(err),
            }
        }
        Ok(())
    }

    fn step(&mut self) -> Result<LoopControl, CliError> {
        output::section(TITLE);
        for line in menu_lines() {
            output::info(line);
        }
        let choice = self.console.prompt_positive("Enter your choice:")?;
        match MainMenuOption::from_choice(choice) {
            Some(option) => self.dispatch(option),
            None => {
                output::warning("Invalid choice. please try again");
                Ok(LoopControl::Continue)
            }
        }
    }

    pub fn dispatch(&mut self, option: MainMenuOption) -> Result<LoopControl, CliError> {
        match option {
            MainMenuOption::AddTransaction => {
                transaction::add(&mut self.console, &mut self.manager)?
            }
            MainMenuOption::ViewTransactions => transaction::view(self.manager.store()),
            MainMenuOption::UpdateTransaction => {
                transaction::update(&mut self.console, &mut self.manager)?
            }
            MainMenuOption::DeleteTransaction => {
                transaction::delete(&mut self.console, &mut self.manager)?
            }
            MainMenuOption::DisplaySummary => summary::display(self.manager.store()),
            MainMenuOption::BulkImport => import::run(
                &mut self.console,
                &mut self.manager,
                &self.config.import_extension,
            )?,
            MainMenuOption::TableView => table_view::run(&mut self.console, self.manager.path())?,
            MainMenuOption::Exit => {
                output::info(EXIT_MESSAGE);
                return Ok(LoopControl::Exit);
            }
        }
        Ok(LoopControl::Continue)
    }
}
