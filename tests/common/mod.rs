#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::Mutex;

use assert_cmd::Command;
use finance_tracker::ledger::Store;
use finance_tracker::utils::persistence::{load_store, save_store};
use once_cell::sync::Lazy;
use tempfile::TempDir;

pub const BIN_NAME: &str = "finance_tracker";

/// Holds TempDir guards so temporary folders live for the duration of the test run.
static TEST_DIRS: Lazy<Mutex<Vec<TempDir>>> = Lazy::new(|| Mutex::new(Vec::new()));

/// Isolated working directory, application home and data file for one test.
pub struct TestEnv {
    pub dir: PathBuf,
    pub home: PathBuf,
    pub data_file: PathBuf,
}

impl TestEnv {
    pub fn seed(&self, store: &Store) {
        save_store(store, &self.data_file).expect("seed data file");
    }

    pub fn store(&self) -> Store {
        load_store(&self.data_file)
    }

    /// Binary configured for script mode inside this environment.
    pub fn script_command(&self) -> Command {
        let mut cmd = Command::cargo_bin(BIN_NAME).expect("binary exists");
        cmd.current_dir(&self.dir)
            .env("FINANCE_TRACKER_CLI_SCRIPT", "1")
            .env("FINANCE_TRACKER_HOME", &self.home)
            .env("FINANCE_TRACKER_DATA", &self.data_file)
            .env("NO_COLOR", "1")
            .env_remove("RUST_LOG");
        cmd
    }
}

pub fn setup_test_env() -> TestEnv {
    let temp = TempDir::new().expect("create temp dir");
    let dir = temp.path().to_path_buf();
    TEST_DIRS.lock().expect("lock temp dir registry").push(temp);

    TestEnv {
        home: dir.join("home"),
        data_file: dir.join("transactions.json"),
        dir,
    }
}
