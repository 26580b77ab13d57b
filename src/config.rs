//! Application configuration module.
//!
//! Handles loading configuration from environment variables.

use std::env;
use std::str::FromStr;
use std::time::Duration;

use crate::constants::{
    DEFAULT_ACCESS_TOKEN_TTL_SECS, DEFAULT_DB_POOL_SIZE, DEFAULT_IDENTITY_TIMEOUT_SECS,
    DEFAULT_SHUTDOWN_TIMEOUT_SECS, DEFAULT_STORE_CONNECT_TIMEOUT_SECS,
    DEFAULT_STORE_OP_TIMEOUT_SECS,
};
use crate::errors::AppError;

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Database file path
    pub database_url: String,
    /// Server host address
    pub host: String,
    /// Server port
    pub port: u16,
    /// Maximum number of pooled store connections
    pub db_pool_size: u32,
    /// Startup connection timeout in seconds
    pub store_connect_timeout_secs: u64,
    /// Per-operation store timeout in seconds
    pub store_op_timeout_secs: u64,
    /// Path to the identity provider service-account credentials
    pub firebase_credentials_file: Option<String>,
    /// Host:port of a local auth emulator
    pub firebase_auth_emulator_host: Option<String>,
    /// Project id override (required with the emulator)
    pub firebase_project_id: Option<String>,
    /// Fixed set of known user ids for local development
    pub allowed_user_ids: Option<Vec<String>>,
    /// Identity provider request timeout in seconds
    pub identity_timeout_secs: u64,
    /// Cached access token lifetime in seconds
    pub access_token_ttl_secs: u64,
    /// Enable Prometheus metrics endpoint
    pub metrics_enabled: bool,
    /// Grace period for in-flight requests on shutdown
    pub shutdown_timeout_secs: u64,
}

impl Config {
    /// Load configuration from environment variables
    ///
    /// # Environment Variables
    /// - `DATABASE_URL`: Path to SQLite database (default: "slugs.db")
    /// - `HOST`: Server host (default: "127.0.0.1")
    /// - `PORT`: Server port (default: 8080)
    /// - `DB_POOL_SIZE`: Maximum pooled connections (default: 10)
    /// - `STORE_CONNECT_TIMEOUT_SECS`: Startup connection timeout (default: 10)
    /// - `STORE_OP_TIMEOUT_SECS`: Per-operation store timeout (default: 30)
    /// - `FIREBASE_CREDENTIALS_FILE`: Service-account JSON file
    /// - `FIREBASE_AUTH_EMULATOR_HOST`: Auth emulator host:port
    /// - `FIREBASE_PROJECT_ID`: Project id override
    /// - `ALLOWED_USER_IDS`: Comma-separated known user ids (local development)
    /// - `IDENTITY_TIMEOUT_SECS`: Identity provider request timeout (default: 10)
    /// - `ACCESS_TOKEN_TTL_SECS`: Cached access token lifetime (default: 3000)
    /// - `METRICS_ENABLED`: Enable Prometheus metrics endpoint (default: true)
    /// - `SHUTDOWN_TIMEOUT_SECS`: Graceful shutdown window (default: 30)
    pub fn from_env() -> Result<Self, AppError> {
        let defaults = Self::default();

        Ok(Self {
            database_url: env::var("DATABASE_URL").unwrap_or(defaults.database_url),
            host: env::var("HOST").unwrap_or(defaults.host),
            port: parse_var("PORT", defaults.port)?,
            db_pool_size: positive_var("DB_POOL_SIZE", defaults.db_pool_size)?,
            store_connect_timeout_secs: positive_var(
                "STORE_CONNECT_TIMEOUT_SECS",
                defaults.store_connect_timeout_secs,
            )?,
            store_op_timeout_secs: positive_var(
                "STORE_OP_TIMEOUT_SECS",
                defaults.store_op_timeout_secs,
            )?,
            firebase_credentials_file: optional_var("FIREBASE_CREDENTIALS_FILE"),
            firebase_auth_emulator_host: optional_var("FIREBASE_AUTH_EMULATOR_HOST"),
            firebase_project_id: optional_var("FIREBASE_PROJECT_ID"),
            allowed_user_ids: optional_var("ALLOWED_USER_IDS").map(|ids| parse_id_list(&ids)),
            identity_timeout_secs: positive_var(
                "IDENTITY_TIMEOUT_SECS",
                defaults.identity_timeout_secs,
            )?,
            access_token_ttl_secs: parse_var(
                "ACCESS_TOKEN_TTL_SECS",
                defaults.access_token_ttl_secs,
            )?,
            metrics_enabled: env::var("METRICS_ENABLED")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.metrics_enabled),
            shutdown_timeout_secs: parse_var(
                "SHUTDOWN_TIMEOUT_SECS",
                defaults.shutdown_timeout_secs,
            )?,
        })
    }

    /// Address the HTTP server binds to
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Time budget for a single store operation
    pub fn store_op_timeout(&self) -> Duration {
        Duration::from_secs(self.store_op_timeout_secs)
    }

    /// Time budget for the startup store connection
    pub fn store_connect_timeout(&self) -> Duration {
        Duration::from_secs(self.store_connect_timeout_secs)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_url: "slugs.db".to_string(),
            host: "127.0.0.1".to_string(),
            port: 8080,
            db_pool_size: DEFAULT_DB_POOL_SIZE,
            store_connect_timeout_secs: DEFAULT_STORE_CONNECT_TIMEOUT_SECS,
            store_op_timeout_secs: DEFAULT_STORE_OP_TIMEOUT_SECS,
            firebase_credentials_file: None,
            firebase_auth_emulator_host: None,
            firebase_project_id: None,
            allowed_user_ids: None,
            identity_timeout_secs: DEFAULT_IDENTITY_TIMEOUT_SECS,
            access_token_ttl_secs: DEFAULT_ACCESS_TOKEN_TTL_SECS,
            metrics_enabled: true,
            shutdown_timeout_secs: DEFAULT_SHUTDOWN_TIMEOUT_SECS,
        }
    }
}

/// Read a variable, treating blank values as unset
fn optional_var(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Parse a variable into `T`, falling back to `default` when unset
fn parse_var<T: FromStr>(name: &str, default: T) -> Result<T, AppError> {
    match optional_var(name) {
        Some(raw) => raw
            .parse()
            .map_err(|_| {
                AppError::config(format!("{} must be a valid number, got '{}'", name, raw))
            }),
        None => Ok(default),
    }
}

/// Like [`parse_var`], but zero is rejected
fn positive_var<T: FromStr + PartialEq + Default>(name: &str, default: T) -> Result<T, AppError> {
    let value = parse_var(name, default)?;
    if value == T::default() {
        return Err(AppError::config(format!("{} must be greater than zero", name)));
    }
    Ok(value)
}

/// Split a comma-separated id list, dropping blanks
fn parse_id_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|id| id.trim().to_string())
        .filter(|id| !id.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.database_url, "slugs.db");
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 8080);
        assert_eq!(config.store_op_timeout(), Duration::from_secs(30));
        assert_eq!(config.store_connect_timeout(), Duration::from_secs(10));
        assert_eq!(config.bind_addr(), "127.0.0.1:8080");
    }

    #[test]
    fn test_parse_id_list() {
        assert_eq!(parse_id_list("u1, u2,,u3 "), vec!["u1", "u2", "u3"]);
        assert!(parse_id_list(" , ").is_empty());
    }

    #[test]
    fn test_parse_var_rejects_garbage() {
        env::set_var("SLUG_SHORTENER_TEST_PORT", "eighty");
        let result: Result<u16, _> = parse_var("SLUG_SHORTENER_TEST_PORT", 8080);
        assert!(matches!(result, Err(AppError::ConfigError(_))));
        env::remove_var("SLUG_SHORTENER_TEST_PORT");
    }

    #[test]
    fn test_parse_var_uses_default_when_unset() {
        let result: u64 = parse_var("SLUG_SHORTENER_TEST_UNSET", 42).unwrap();
        assert_eq!(result, 42);
    }

    #[test]
    fn test_positive_var_rejects_zero() {
        env::set_var("SLUG_SHORTENER_TEST_POOL_SIZE", "0");
        let result: Result<u32, _> = positive_var("SLUG_SHORTENER_TEST_POOL_SIZE", 10);
        assert!(matches!(result, Err(AppError::ConfigError(_))));
        env::remove_var("SLUG_SHORTENER_TEST_POOL_SIZE");
    }

    #[test]
    fn test_positive_var_accepts_non_zero() {
        env::set_var("SLUG_SHORTENER_TEST_CONNECT_TIMEOUT", "5");
        let result: u64 = positive_var("SLUG_SHORTENER_TEST_CONNECT_TIMEOUT", 10).unwrap();
        assert_eq!(result, 5);
        env::remove_var("SLUG_SHORTENER_TEST_CONNECT_TIMEOUT");

        let fallback: u64 = positive_var("SLUG_SHORTENER_TEST_UNSET_TIMEOUT", 10).unwrap();
        assert_eq!(fallback, 10);
    }
}
