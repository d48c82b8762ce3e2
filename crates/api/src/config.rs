//! Blog API configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `BLOG_DATABASE_URL` - Post store URL (`postgres://...` or `memory://<name>`).
//!   Falls back to `DATABASE_URL`.
//!
//! ## Optional
//! - `TEST_DATABASE_URL` - Post store used by the integration suite
//!   (default: `memory://test-blog-app`)
//! - `BLOG_HOST` - Bind address (default: 127.0.0.1)
//! - `BLOG_PORT` - Listen port (default: 8080)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name

use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use secrecy::SecretString;
use thiserror::Error;

/// Default store for the integration suite.
pub const DEFAULT_TEST_DATABASE_URL: &str = "memory://test-blog-app";

const DEFAULT_PORT: &str = "8080";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Blog API configuration.
#[derive(Debug, Clone)]
pub struct BlogConfig {
    /// Post store URL (may contain a password)
    pub database_url: SecretString,
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on (0 picks a free port)
    pub port: u16,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment (e.g., production, staging)
    pub sentry_environment: Option<String>,
}

impl BlogConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let database_url = get_database_url("BLOG_DATABASE_URL")?;
        let host = get_env_or_default("BLOG_HOST", "127.0.0.1")
            .parse::<IpAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar("BLOG_HOST".to_string(), e.to_string()))?;
        let port = get_env_or_default("BLOG_PORT", DEFAULT_PORT)
            .parse::<u16>()
            .map_err(|e| ConfigError::InvalidEnvVar("BLOG_PORT".to_string(), e.to_string()))?;

        Ok(Self {
            database_url,
            host,
            port,
            sentry_dsn: get_optional_env("SENTRY_DSN"),
            sentry_environment: get_optional_env("SENTRY_ENVIRONMENT"),
        })
    }

    /// Configuration for an ephemeral server on a free loopback port.
    ///
    /// Used by the test suite to bind a server against a test database.
    #[must_use]
    pub fn for_database(database_url: SecretString) -> Self {
        Self {
            database_url,
            host: IpAddr::V4(Ipv4Addr::LOCALHOST),
            port: 0,
            sentry_dsn: None,
            sentry_environment: None,
        }
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

/// The store URL the integration suite runs against.
///
/// Reads `TEST_DATABASE_URL` (after loading `.env`), defaulting to an
/// in-memory collection.
#[must_use]
pub fn test_database_url() -> SecretString {
    let _ = dotenvy::dotenv();
    SecretString::from(get_env_or_default(
        "TEST_DATABASE_URL",
        DEFAULT_TEST_DATABASE_URL,
    ))
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get database URL with fallback to generic `DATABASE_URL`.
fn get_database_url(primary_key: &str) -> Result<SecretString, ConfigError> {
    if let Ok(value) = std::env::var(primary_key) {
        return Ok(SecretString::from(value));
    }
    if let Ok(value) = std::env::var("DATABASE_URL") {
        return Ok(SecretString::from(value));
    }
    Err(ConfigError::MissingEnvVar(primary_key.to_string()))
}

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use secrecy::ExposeSecret;

    use super::*;

    #[test]
    fn test_socket_addr() {
        let config = BlogConfig {
            database_url: SecretString::from("memory://blog"),
            host: "127.0.0.1".parse().unwrap(),
            port: 8080,
            sentry_dsn: None,
            sentry_environment: None,
        };

        let addr = config.socket_addr();
        assert_eq!(addr.ip().to_string(), "127.0.0.1");
        assert_eq!(addr.port(), 8080);
    }

    #[test]
    fn test_for_database_binds_ephemeral_loopback() {
        let config = BlogConfig::for_database(SecretString::from("memory://t"));
        assert_eq!(config.socket_addr().port(), 0);
        assert!(config.socket_addr().ip().is_loopback());
        assert_eq!(config.database_url.expose_secret(), "memory://t");
        assert!(config.sentry_dsn.is_none());
    }

    #[test]
    fn test_debug_redacts_database_url() {
        let config =
            BlogConfig::for_database(SecretString::from("postgres://user:hunter2@db/blog"));
        let debug_output = format!("{config:?}");
        assert!(!debug_output.contains("hunter2"));
    }

    #[test]
    fn test_env_or_default_falls_back() {
        assert_eq!(
            get_env_or_default("BLOG_TEST_SURELY_UNSET_VARIABLE", "fallback"),
            "fallback"
        );
    }
}
