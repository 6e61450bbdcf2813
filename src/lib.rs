pub mod config;
pub mod database;
pub mod api;
pub mod types;
pub mod services;

pub use config::Config;
pub use database::Database;
pub use services::TransferService;
pub use types::*;
