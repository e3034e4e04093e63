use std::{
    borrow::Cow,
    io::{self, BufRead, BufReader, Write},
};

use dialoguer::{theme::ColorfulTheme, Confirm};
use rustyline::{
    completion::{Completer, Pair},
    error::ReadlineError,
    highlight::Highlighter,
    hint::Hinter,
    history::DefaultHistory,
    validate::Validator,
    Context as ReadlineContext, Editor, Helper,
};

use crate::cli::output;
use crate::errors::CliError;

/// Environment variable that switches the CLI to reading answers from stdin.
pub const SCRIPT_ENV: &str = "FINANCE_TRACKER_CLI_SCRIPT";

const INVALID_INPUT: &str = "Invalid Input!!!";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliMode {
    Interactive,
    Script,
}

impl CliMode {
    pub fn from_env() -> Self {
        if std::env::var_os(SCRIPT_ENV).is_some() {
            CliMode::Script
        } else {
            CliMode::Interactive
        }
    }
}

enum LineSource {
    Editor(Box<Editor<CategoryHelper, DefaultHistory>>),
    Script(Box<dyn BufRead>),
}

/// Line-oriented input shared by the menu, the commands and the table view.
/// Every prompt helper re-asks until it gets a usable answer; running out of
/// input surfaces as [`CliError::EndOfInput`].
pub struct Console {
    source: LineSource,
}

impl Console {
    pub fn for_mode(mode: CliMode) -> Result<Self, CliError> {
        match mode {
            CliMode::Interactive => Self::interactive(),
            CliMode::Script => Ok(Self::script(BufReader::new(io::stdin()))),
        }
    }

    pub fn interactive() -> Result<Self, CliError> {
        let mut editor = Editor::<CategoryHelper, DefaultHistory>::new()?;
        editor.set_helper(Some(CategoryHelper::default()));
        Ok(Self {
            source: LineSource::Editor(Box::new(editor)),
        })
    }

    pub fn script<R: BufRead + 'static>(reader: R) -> Self {
        Self {
            source: LineSource::Script(Box::new(reader)),
        }
    }

    pub fn mode(&self) -> CliMode {
        match self.source {
            LineSource::Editor(_) => CliMode::Interactive,
            LineSource::Script(_) => CliMode::Script,
        }
    }

    /// Replaces the names offered by tab completion.
    pub fn set_completions<I, S>(&mut self, names: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        if let LineSource::Editor(editor) = &mut self.source {
            if let Some(helper) = editor.helper_mut() {
                helper.replace(names);
            }
        }
    }

    pub fn read_line(&mut self, prompt: &str) -> Result<String, CliError> {
        match &mut self.source {
            LineSource::Editor(editor) => match editor.readline(&format!("{prompt} ")) {
                Ok(line) => {
                    if !line.trim().is_empty() {
                        editor.add_history_entry(line.trim()).ok();
                    }
                    Ok(line)
                }
                Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => {
                    Err(CliError::EndOfInput)
                }
                Err(err) => Err(err.into()),
            },
            LineSource::Script(reader) => {
                println!("{prompt}");
                io::stdout().flush()?;
                let mut line = String::new();
                if reader.read_line(&mut line)? == 0 {
                    return Err(CliError::EndOfInput);
                }
                Ok(line.trim_end_matches(['\r', '\n']).to_string())
            }
        }
    }

    /// Asks until a non-blank answer is given; the answer is trimmed.
    pub fn prompt_text(&mut self, prompt: &str) -> Result<String, CliError> {
        loop {
            let line = self.read_line(prompt)?;
            let trimmed = line.trim();
            if !trimmed.is_empty() {
                return Ok(trimmed.to_string());
            }
            output::error(INVALID_INPUT);
        }
    }

    /// Asks until the answer parses as an integer greater than zero.
    pub fn prompt_positive(&mut self, prompt: &str) -> Result<u64, CliError> {
        loop {
            let line = self.read_line(prompt)?;
            match parse_positive(&line) {
                Some(value) => return Ok(value),
                None => output::error(INVALID_INPUT),
            }
        }
    }

    /// Asks for a 1-based position no larger than `max`.
    pub fn prompt_index(&mut self, prompt: &str, max: usize) -> Result<usize, CliError> {
        loop {
            let value = self.prompt_positive(prompt)?;
            match usize::try_from(value) {
                Ok(index) if index <= max => return Ok(index),
                _ => output::warning(format!(
                    "Please enter a transaction number between 1 and {max}"
                )),
            }
        }
    }

    /// Yes/no question. Interactive sessions use a dialog; scripts answer with
    /// a `yes`/`no` line.
    pub fn confirm(&mut self, prompt: &str) -> Result<bool, CliError> {
        if let LineSource::Editor(_) = self.source {
            return Confirm::with_theme(&ColorfulTheme::default())
                .with_prompt(prompt)
                .default(true)
                .interact()
                .map_err(CliError::from);
        }
        loop {
            let line = self.read_line(&format!("{prompt} [y/n]"))?;
            match parse_yes_no(&line) {
                Some(answer) => return Ok(answer),
                None => output::error(INVALID_INPUT),
            }
        }
    }
}

pub fn parse_positive(input: &str) -> Option<u64> {
    input.trim().parse::<u64>().ok().filter(|value| *value > 0)
}

pub fn parse_yes_no(input: &str) -> Option<bool> {
    match input.trim().to_ascii_lowercase().as_str() {
        "y" | "yes" => Some(true),
        "n" | "no" => Some(false),
        _ => None,
    }
}

/// Offers the known category names on tab.
#[derive(Default)]
struct CategoryHelper {
    names: Vec<String>,
}

impl CategoryHelper {
    fn replace<I, S>(&mut self, names: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.names = names.into_iter().map(Into::into).collect();
        self.names.sort();
        self.names.dedup();
    }
}

impl Helper for CategoryHelper {}

impl Completer for CategoryHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &ReadlineContext<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let prefix = line[..pos].trim_start();
        let start = pos - prefix.len();
        let needle = prefix.to_lowercase();
        let candidates = self
            .names
            .iter()
            .filter(|name| name.to_lowercase().starts_with(&needle))
            .map(|name| Pair {
                display: name.clone(),
                replacement: name.clone(),
            })
            .collect();
        Ok((start, candidates))
    }
}

impl Hinter for CategoryHelper {
    type Hint = String;
}

impl Highlighter for CategoryHelper {
    fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        Cow::Borrowed(line)
    }
}

impl Validator for CategoryHelper {}
