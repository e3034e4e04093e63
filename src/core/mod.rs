pub mod services;
pub mod store_manager;
pub mod utils;

pub use store_manager::StoreManager;
