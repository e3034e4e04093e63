use serde::{Deserialize, Serialize};
use std::{
    env,
    ffi::OsString,
    fs,
    path::{Path, PathBuf},
};

use crate::core::utils::{app_data_dir, config_file_in, ensure_dir, DATA_ENV};
use crate::errors::TrackerError;

const DEFAULT_DATA_FILE: &str = "transactions.json";
const DEFAULT_IMPORT_EXTENSION: &str = "txt";

/// User-tunable settings stored as `config.json` in the application directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Data file holding the store. Relative paths resolve against the
    /// working directory.
    pub data_file: PathBuf,
    /// Extension appended to bulk-import file names.
    pub import_extension: String,
    /// Disables coloured output.
    pub plain_output: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_file: PathBuf::from(DEFAULT_DATA_FILE),
            import_extension: DEFAULT_IMPORT_EXTENSION.into(),
            plain_output: false,
        }
    }
}

impl Config {
    /// Applies the data-file override taken from the environment, if any.
    pub fn with_data_override(mut self, data_file: Option<OsString>) -> Self {
        if let Some(path) = data_file.filter(|p| !p.is_empty()) {
            self.data_file = PathBuf::from(path);
        }
        self
    }
}

pub struct ConfigManager {
    path: PathBuf,
}

impl ConfigManager {
    pub fn new() -> Result<Self, TrackerError> {
        Self::with_base_dir(app_data_dir())
    }

    pub fn with_base_dir(base: PathBuf) -> Result<Self, TrackerError> {
        ensure_dir(&base)?;
        Ok(Self {
            path: config_file_in(&base),
        })
    }

    pub fn load(&self) -> Result<Config, TrackerError> {
        if self.path.exists() {
            let data = fs::read_to_string(&self.path)?;
            serde_json::from_str(&data).map_err(|err| {
                TrackerError::Config(format!("{}: {err}", self.path.display()))
            })
        } else {
            Ok(Config::default())
        }
    }

    /// Loads the configuration, writing the defaults on first run.
    pub fn load_or_init(&self) -> Result<Config, TrackerError> {
        let config = self.load()?;
        if !self.path.exists() {
            self.save(&config)?;
            tracing::debug!(path = %self.path.display(), "wrote default configuration");
        }
        Ok(config)
    }

    /// Configuration with environment overrides applied.
    pub fn resolve(&self) -> Result<Config, TrackerError> {
        Ok(self.load_or_init()?.with_data_override(env::var_os(DATA_ENV)))
    }

    pub fn save(&self, config: &Config) -> Result<(), TrackerError> {
        if let Some(parent) = self.path.parent() {
            ensure_dir(parent)?;
        }
        let json = serde_json::to_string_pretty(config)?;
        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, json)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}
