pub mod main_menu;

pub use main_menu::{menu_lines, MainMenuOption};
