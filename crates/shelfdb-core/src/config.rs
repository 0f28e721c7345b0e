//! Environment-driven application configuration.

use std::net::SocketAddr;

use thiserror::Error;

/// Default User-Agent for the storefront price scraper. The target site
/// blocks default HTTP-client identifiers, so a realistic desktop browser
/// profile is required.
pub const DEFAULT_SCRAPER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
     AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}

/// Fully-resolved application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub bind_addr: SocketAddr,
    pub log_level: String,

    /// Base URL of the openBD bibliographic API (primary lookup source).
    pub openbd_base_url: String,
    /// Base URL of the NDL OpenSearch API (fallback lookup source).
    pub ndl_base_url: String,
    /// Base URL of the Book-Off Online storefront (price source).
    pub bookoff_base_url: String,

    /// Per-request timeout applied to every external fetch.
    pub http_timeout_secs: u64,
    pub scraper_user_agent: String,

    pub db_max_connections: u32,
    pub db_min_connections: u32,
    pub db_acquire_timeout_secs: u64,
}

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the
/// process, without touching `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// The parsing/validation logic is decoupled from the real environment so it
/// can be tested with a pure `HashMap` lookup — no `set_var`/`remove_var`
/// needed.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let require = |var: &str| -> Result<String, ConfigError> {
        lookup(var).map_err(|_| ConfigError::MissingEnvVar(var.to_string()))
    };

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_addr = |var: &str, default: &str| -> Result<SocketAddr, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<SocketAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u32>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let database_url = require("DATABASE_URL")?;

    let bind_addr = parse_addr("SHELFDB_BIND_ADDR", "0.0.0.0:3000")?;
    let log_level = or_default("SHELFDB_LOG_LEVEL", "info");

    let openbd_base_url = or_default("SHELFDB_OPENBD_BASE_URL", "https://api.openbd.jp/v1");
    let ndl_base_url = or_default("SHELFDB_NDL_BASE_URL", "https://iss.ndl.go.jp/api");
    let bookoff_base_url = or_default(
        "SHELFDB_BOOKOFF_BASE_URL",
        "https://shopping.bookoff.co.jp",
    );

    let http_timeout_secs = parse_u64("SHELFDB_HTTP_TIMEOUT_SECS", "30")?;
    let scraper_user_agent = or_default("SHELFDB_SCRAPER_USER_AGENT", DEFAULT_SCRAPER_USER_AGENT);

    let db_max_connections = parse_u32("SHELFDB_DB_MAX_CONNECTIONS", "10")?;
    let db_min_connections = parse_u32("SHELFDB_DB_MIN_CONNECTIONS", "1")?;
    let db_acquire_timeout_secs = parse_u64("SHELFDB_DB_ACQUIRE_TIMEOUT_SECS", "10")?;

    Ok(AppConfig {
        database_url,
        bind_addr,
        log_level,
        openbd_base_url,
        ndl_base_url,
        bookoff_base_url,
        http_timeout_secs,
        scraper_user_agent,
        db_max_connections,
        db_min_connections,
        db_acquire_timeout_secs,
    })
}
