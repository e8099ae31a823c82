//! API configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `EMPORIUM_DATABASE_URL` - `PostgreSQL` connection string (falls back to `DATABASE_URL`)
//! - `EMPORIUM_BASE_URL` - Public URL used in links sent by email
//!
//! ## Optional
//! - `EMPORIUM_HOST` - Bind address (default: 127.0.0.1)
//! - `EMPORIUM_PORT` - Listen port (default: 8000)
//! - `EMPORIUM_GRAPHQL_PLAYGROUND` - Serve `GraphiQL` on `GET /graphql` (default: true)
//! - `EMPORIUM_GRAPHQL_DEPTH_LIMIT` - Maximum query depth (default: 10)
//! - `EMPORIUM_GRAPHQL_COMPLEXITY_LIMIT` - Maximum query complexity (default: 200)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name
//! - `SMTP_HOST`, `SMTP_USERNAME`, `SMTP_PASSWORD`, `EMAIL_FROM` - Outgoing mail
//!   (all four or none; without them mail is logged and dropped)
//! - `SMTP_PORT` - SMTP port (default: 587)

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

/// API application configuration.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// `PostgreSQL` database connection URL (contains password)
    pub database_url: SecretString,
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Public base URL, used to build activation and reset links
    pub base_url: String,
    /// GraphQL schema settings
    pub graphql: GraphQlConfig,
    /// Outgoing mail settings, if configured
    pub email: Option<EmailConfig>,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment (e.g. "production")
    pub sentry_environment: Option<String>,
}

/// GraphQL schema limits and tooling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GraphQlConfig {
    /// Serve the `GraphiQL` playground on `GET /graphql`.
    pub playground: bool,
    /// Maximum nesting depth of a query.
    pub depth_limit: usize,
    /// Maximum computed complexity of a query.
    pub complexity_limit: usize,
}

impl Default for GraphQlConfig {
    fn default() -> Self {
        Self {
            playground: true,
            depth_limit: 10,
            complexity_limit: 200,
        }
    }
}

/// SMTP configuration for transactional email.
///
/// Implements `Debug` manually to redact the password.
#[derive(Clone)]
pub struct EmailConfig {
    pub smtp_host: String,
    pub smtp_port: u16,
    pub smtp_username: String,
    pub smtp_password: SecretString,
    pub from_address: String,
}

impl std::fmt::Debug for EmailConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EmailConfig")
            .field("smtp_host", &self.smtp_host)
            .field("smtp_port", &self.smtp_port)
            .field("smtp_username", &self.smtp_username)
            .field("smtp_password", &"[REDACTED]")
            .field("from_address", &self.from_address)
            .finish()
    }
}

impl ApiConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or a value
    /// cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let database_url = get_database_url("EMPORIUM_DATABASE_URL")?;
        let host = parse_env_or_default("EMPORIUM_HOST", "127.0.0.1")?;
        let port = parse_env_or_default("EMPORIUM_PORT", "8000")?;
        let base_url = get_required_env("EMPORIUM_BASE_URL")?;
        url::Url::parse(&base_url).map_err(|e| {
            ConfigError::InvalidEnvVar("EMPORIUM_BASE_URL".to_string(), e.to_string())
        })?;

        Ok(Self {
            database_url,
            host,
            port,
            base_url: base_url.trim_end_matches('/').to_string(),
            graphql: GraphQlConfig::from_env()?,
            email: EmailConfig::from_env()?,
            sentry_dsn: get_optional_env("SENTRY_DSN"),
            sentry_environment: get_optional_env("SENTRY_ENVIRONMENT"),
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

impl GraphQlConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();
        Ok(Self {
            playground: parse_env_or_default(
                "EMPORIUM_GRAPHQL_PLAYGROUND",
                &defaults.playground.to_string(),
            )?,
            depth_limit: parse_env_or_default(
                "EMPORIUM_GRAPHQL_DEPTH_LIMIT",
                &defaults.depth_limit.to_string(),
            )?,
            complexity_limit: parse_env_or_default(
                "EMPORIUM_GRAPHQL_COMPLEXITY_LIMIT",
                &defaults.complexity_limit.to_string(),
            )?,
        })
    }
}

impl EmailConfig {
    /// Returns `None` when no SMTP variable is set at all.
    fn from_env() -> Result<Option<Self>, ConfigError> {
        let Some(smtp_host) = get_optional_env("SMTP_HOST") else {
            return Ok(None);
        };

        Ok(Some(Self {
            smtp_host,
            smtp_port: parse_env_or_default("SMTP_PORT", "587")?,
            smtp_username: get_required_env("SMTP_USERNAME")?,
            smtp_password: SecretString::from(get_required_env("SMTP_PASSWORD")?),
            from_address: get_required_env("EMAIL_FROM")?,
        }))
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get a required environment variable.
fn get_required_env(key: &str) -> Result<String, ConfigError> {
    std::env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_string()))
}

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

/// Get an optional environment variable, treating empty values as unset.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Parse an environment variable (or its default) into `T`.
fn parse_env_or_default<T>(key: &str, default: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    parse_value(key, &get_env_or_default(key, default))
}

fn parse_value<T>(key: &str, raw: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    raw.trim()
        .parse::<T>()
        .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn config() -> ApiConfig {
        ApiConfig {
            database_url: SecretString::from("postgres://localhost/emporium"),
            host: "127.0.0.1".parse().unwrap(),
            port: 8000,
            base_url: "http://localhost:8000".to_string(),
            graphql: GraphQlConfig::default(),
            email: None,
            sentry_dsn: None,
            sentry_environment: None,
        }
    }

    #[test]
    fn test_socket_addr() {
        let addr = config().socket_addr();
        assert_eq!(addr.ip().to_string(), "127.0.0.1");
        assert_eq!(addr.port(), 8000);
    }

    #[test]
    fn test_graphql_defaults() {
        let graphql = GraphQlConfig::default();
        assert!(graphql.playground);
        assert_eq!(graphql.depth_limit, 10);
        assert_eq!(graphql.complexity_limit, 200);
    }

    #[test]
    fn test_parse_value() {
        let port: u16 = parse_value("EMPORIUM_PORT", " 8080 ").unwrap();
        assert_eq!(port, 8080);

        let flag: bool = parse_value("EMPORIUM_GRAPHQL_PLAYGROUND", "false").unwrap();
        assert!(!flag);

        let err = parse_value::<u16>("EMPORIUM_PORT", "eighty").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar(key, _) if key == "EMPORIUM_PORT"));
    }

    #[test]
    fn test_config_debug_redacts_secrets() {
        let mut config = config();
        config.email = Some(EmailConfig {
            smtp_host: "smtp.example.com".to_string(),
            smtp_port: 587,
            smtp_username: "mailer".to_string(),
            smtp_password: SecretString::from("super_secret_smtp_password"),
            from_address: "Emporium <noreply@example.com>".to_string(),
        });

        let debug_output = format!("{config:?}");

        assert!(debug_output.contains("smtp.example.com"));
        assert!(debug_output.contains("[REDACTED]"));
        assert!(!debug_output.contains("super_secret_smtp_password"));
        assert!(!debug_output.contains("postgres://localhost/emporium"));
    }
}
