//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `ORCHARD_DATABASE_URL` - `PostgreSQL` connection string (falls back to `DATABASE_URL`)
//!
//! ## Optional
//! - `ORCHARD_HOST` - Bind address (default: 127.0.0.1)
//! - `ORCHARD_PORT` - Listen port (default: 3000)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name
//! - `SENTRY_SAMPLE_RATE` - Error event sample rate (default: 1.0)
//! - `SENTRY_TRACES_SAMPLE_RATE` - Transaction sample rate (default: 0.0)

use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;

use secrecy::SecretString;
use thiserror::Error;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront application configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// `PostgreSQL` database connection URL (contains password)
    pub database_url: SecretString,
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment name (e.g. `production`)
    pub sentry_environment: Option<String>,
    /// Fraction of error events sent to Sentry
    pub sentry_sample_rate: f32,
    /// Fraction of transactions sent to Sentry
    pub sentry_traces_sample_rate: f32,
}

impl StorefrontConfig {
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

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or invalid.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let database_url = lookup("ORCHARD_DATABASE_URL")
            .or_else(|| lookup("DATABASE_URL"))
            .map(SecretString::from)
            .ok_or_else(|| ConfigError::MissingEnvVar("ORCHARD_DATABASE_URL".to_string()))?;

        Ok(Self {
            database_url,
            host: parse_or_default(&lookup, "ORCHARD_HOST", IpAddr::from([127, 0, 0, 1]))?,
            port: parse_or_default(&lookup, "ORCHARD_PORT", 3000)?,
            sentry_dsn: lookup("SENTRY_DSN").filter(|v| !v.is_empty()),
            sentry_environment: lookup("SENTRY_ENVIRONMENT").filter(|v| !v.is_empty()),
            sentry_sample_rate: parse_rate(&lookup, "SENTRY_SAMPLE_RATE", 1.0)?,
            sentry_traces_sample_rate: parse_rate(&lookup, "SENTRY_TRACES_SAMPLE_RATE", 0.0)?,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Parse an optional variable, falling back to `default` when unset.
fn parse_or_default<T>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: T,
) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    lookup(key).map_or(Ok(default), |raw| {
        raw.parse::<T>()
            .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
    })
}

/// Parse a sample rate, which must lie in `0.0..=1.0`.
fn parse_rate(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: f32,
) -> Result<f32, ConfigError> {
    let rate = parse_or_default(lookup, key, default)?;
    if !(0.0..=1.0).contains(&rate) {
        return Err(ConfigError::InvalidEnvVar(
            key.to_string(),
            format!("must be between 0.0 and 1.0 (got {rate})"),
        ));
    }
    Ok(rate)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::HashMap;

    use secrecy::ExposeSecret;

    use super::*;

    fn load(vars: &[(&str, &str)]) -> Result<StorefrontConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        StorefrontConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = load(&[("ORCHARD_DATABASE_URL", "postgres://localhost/orchard")]).unwrap();

        assert_eq!(config.database_url.expose_secret(), "postgres://localhost/orchard");
        assert_eq!(config.socket_addr().to_string(), "127.0.0.1:3000");
        assert!(config.sentry_dsn.is_none());
        assert!((config.sentry_sample_rate - 1.0).abs() < f32::EPSILON);
        assert!(config.sentry_traces_sample_rate.abs() < f32::EPSILON);
    }

    #[test]
    fn test_database_url_fallback() {
        let config = load(&[("DATABASE_URL", "postgres://fallback/db")]).unwrap();
        assert_eq!(config.database_url.expose_secret(), "postgres://fallback/db");
    }

    #[test]
    fn test_missing_database_url() {
        let err = load(&[]).unwrap_err();
        assert!(matches!(err, ConfigError::MissingEnvVar(ref key) if key == "ORCHARD_DATABASE_URL"));
    }

    #[test]
    fn test_invalid_port() {
        let err = load(&[
            ("ORCHARD_DATABASE_URL", "postgres://localhost/orchard"),
            ("ORCHARD_PORT", "not-a-port"),
        ])
        .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar(ref key, _) if key == "ORCHARD_PORT"));
    }

    #[test]
    fn test_sample_rate_out_of_range() {
        let err = load(&[
            ("ORCHARD_DATABASE_URL", "postgres://localhost/orchard"),
            ("SENTRY_TRACES_SAMPLE_RATE", "1.5"),
        ])
        .unwrap_err();
        assert!(
            matches!(err, ConfigError::InvalidEnvVar(ref key, _) if key == "SENTRY_TRACES_SAMPLE_RATE")
        );
    }

    #[test]
    fn test_custom_bind_address() {
        let config = load(&[
            ("ORCHARD_DATABASE_URL", "postgres://localhost/orchard"),
            ("ORCHARD_HOST", "0.0.0.0"),
            ("ORCHARD_PORT", "8080"),
        ])
        .unwrap();
        assert_eq!(config.socket_addr().to_string(), "0.0.0.0:8080");
    }

    #[test]
    fn test_debug_redacts_database_url() {
        let config = load(&[("ORCHARD_DATABASE_URL", "postgres://user:hunter2@db/orchard")]).unwrap();
        let debug_output = format!("{config:?}");
        assert!(!debug_output.contains("hunter2"));
    }
}
