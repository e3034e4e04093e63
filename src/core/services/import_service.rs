//! Bulk loading of `category,amount,unused,date` text files.

use std::{
    fs::File,
    io::{BufRead, BufReader},
    path::{Path, PathBuf},
};

use crate::errors::Result;
use crate::ledger::{normalize_category, Store, Transaction};

const FIELD_COUNT: usize = 4;

/// Outcome of a bulk import.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ImportReport {
    pub imported: usize,
    pub skipped: usize,
}

pub struct ImportService;

impl ImportService {
    /// Maps a user-supplied file name to a path, appending `extension` unless
    /// the name already carries it.
    pub fn resolve_path(name: &str, extension: &str) -> PathBuf {
        let name = name.trim();
        let extension = extension.trim_start_matches('.');
        if extension.is_empty() || name.ends_with(&format!(".{extension}")) {
            PathBuf::from(name)
        } else {
            PathBuf::from(format!("{name}.{extension}"))
        }
    }

    /// Parses one line into a normalized category and a transaction. Lines
    /// without exactly four fields, with a non-positive amount or with a
    /// blank category/date are rejected.
    pub fn parse_line(line: &str) -> Option<(String, Transaction)> {
        let fields: Vec<&str> = line.trim().split(',').collect();
        if fields.len() != FIELD_COUNT {
            return None;
        }
        let category = normalize_category(fields[0]);
        if category.is_empty() {
            return None;
        }
        let amount = fields[1].trim().parse::<u64>().ok()?;
        let transaction = Transaction::validated(amount, fields[3]).ok()?;
        Some((category, transaction))
    }

    /// Appends every well-formed line of `reader` to the store. The whole
    /// input is read before anything is added, so a read error leaves the
    /// store untouched.
    pub fn import_reader<R: BufRead>(store: &mut Store, reader: R) -> Result<ImportReport> {
        let mut staged = Vec::new();
        let mut skipped = 0;
        for (number, line) in reader.lines().enumerate() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            match Self::parse_line(&line) {
                Some(entry) => staged.push(entry),
                None => {
                    tracing::debug!(line = number + 1, content = %line, "skipping malformed import line");
                    skipped += 1;
                }
            }
        }

        let imported = staged.len();
        for (category, transaction) in staged {
            store.add(&category, transaction)?;
        }
        Ok(ImportReport { imported, skipped })
    }

    /// Opens `path` and imports it. A missing file surfaces as an IO error
    /// with kind `NotFound`.
    pub fn import_file(store: &mut Store, path: &Path) -> Result<ImportReport> {
        let file = File::open(path)?;
        let report = Self::import_reader(store, BufReader::new(file))?;
        if report.skipped > 0 {
            tracing::warn!(
                path = %path.display(),
                skipped = report.skipped,
                "some import lines were not recognised"
            );
        }
        Ok(report)
    }
}
