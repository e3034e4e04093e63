use std::io::ErrorKind;

use crate::cli::io::Console;
use crate::cli::output;
use crate::core::services::ImportService;
use crate::core::StoreManager;
use crate::errors::{CliError, TrackerError};

const FILE_PROMPT: &str = "Enter the file name without extension :";

/// Bulk-loads a `category,amount,unused,date` file, re-asking for the name
/// until an existing file is given.
pub fn run(
    console: &mut Console,
    manager: &mut StoreManager,
    extension: &str,
) -> Result<(), CliError> {
    loop {
        let name = unquote(&console.prompt_text(FILE_PROMPT)?);
        let path = ImportService::resolve_path(&name, extension);
        match manager.import_file(&path) {
            Ok(report) => {
                output::success("Bulk reading success!\n");
                output::info(format!(
                    "Imported {} transaction(s), skipped {} line(s).",
                    report.imported, report.skipped
                ));
                return Ok(());
            }
            Err(TrackerError::Io(err)) if err.kind() == ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "import file not found");
                output::error("Invalid text file!");
            }
            Err(err) => return Err(err.into()),
        }
    }
}

/// Strips shell-style quoting from a single file name; anything that does
/// not split into exactly one word is used verbatim.
fn unquote(input: &str) -> String {
    match shell_words::split(input) {
        Ok(mut words) if words.len() == 1 => words.remove(0),
        _ => input.to_string(),
    }
}
