pub mod commands;
pub mod io;
pub mod menus;
pub mod output;
mod shell;
pub mod ui;

pub use shell::{run_cli, LoopControl, Session};
