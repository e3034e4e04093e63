use std::{
    ffi::OsString,
    fs, io,
    path::{Path, PathBuf},
};

use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};

use crate::{errors::TrackerError, ledger::Store};

const INDENT: &[u8] = b"    ";

/// Loads the store from `path`. A missing or unreadable-as-JSON file yields
/// an empty store.
pub fn load_store(path: &Path) -> Store {
    match try_load_store(path) {
        Ok(store) => store,
        Err(TrackerError::Io(err)) if err.kind() == io::ErrorKind::NotFound => {
            tracing::debug!(path = %path.display(), "no data file yet, starting empty");
            Store::new()
        }
        Err(err) => {
            tracing::warn!(path = %path.display(), error = %err, "ignoring unreadable data file");
            Store::new()
        }
    }
}

/// Store read at startup together with the copy kept of an unreadable file.
#[derive(Debug, Default)]
pub struct LoadedStore {
    pub store: Store,
    pub backup: Option<PathBuf>,
}

/// Like [`load_store`], but an unreadable file is first copied to a `.bak`
/// sibling so the next save cannot destroy it.
pub fn load_store_with_backup(path: &Path) -> LoadedStore {
    let err = match try_load_store(path) {
        Ok(store) => return LoadedStore { store, backup: None },
        Err(TrackerError::Io(err)) if err.kind() == io::ErrorKind::NotFound => {
            tracing::debug!(path = %path.display(), "no data file yet, starting empty");
            return LoadedStore::default();
        }
        Err(err) => err,
    };

    let backup = backup_path(path);
    match fs::copy(path, &backup) {
        Ok(_) => {
            tracing::warn!(
                path = %path.display(),
                backup = %backup.display(),
                error = %err,
                "unreadable data file backed up, starting empty"
            );
            LoadedStore {
                store: Store::new(),
                backup: Some(backup),
            }
        }
        Err(copy_err) => {
            tracing::warn!(
                path = %path.display(),
                error = %err,
                backup_error = %copy_err,
                "unreadable data file could not be backed up, starting empty"
            );
            LoadedStore::default()
        }
    }
}

/// `transactions.json` becomes `transactions.json.bak`.
pub fn backup_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|name| name.to_os_string())
        .unwrap_or_else(|| OsString::from("data"));
    name.push(".bak");
    path.with_file_name(name)
}

/// Loads the store from `path`, returning structured errors on failure.
pub fn try_load_store(path: &Path) -> Result<Store, TrackerError> {
    let data = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&data)?)
}

/// Writes the full store to `path` with a four-space indent, staging the
/// bytes in a temporary sibling file first.
pub fn save_store(store: &Store, path: &Path) -> Result<(), TrackerError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let json = to_pretty_json(store)?;
    let tmp = path.with_extension("tmp");
    fs::write(&tmp, json)?;
    fs::rename(&tmp, path)?;
    tracing::debug!(path = %path.display(), transactions = store.len(), "store saved");
    Ok(())
}

/// Serializes a value the way the data file is laid out on disk.
pub fn to_pretty_json<T: Serialize>(value: &T) -> Result<Vec<u8>, TrackerError> {
    let mut buffer = Vec::new();
    let mut serializer = Serializer::with_formatter(&mut buffer, PrettyFormatter::with_indent(INDENT));
    value.serialize(&mut serializer)?;
    Ok(buffer)
}
