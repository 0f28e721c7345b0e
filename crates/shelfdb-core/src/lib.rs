pub mod book;
pub mod config;
pub mod isbn;

pub use book::{BookInfo, PriceQuote};
pub use config::{load_app_config, load_app_config_from_env, AppConfig, ConfigError};
pub use isbn::normalize_isbn;
