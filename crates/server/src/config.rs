//! Server configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `SMARTCART_DATABASE_URL` - `PostgreSQL` connection string
//! - `SMARTCART_BASE_URL` - Public shop URL (used in email links)
//!
//! ## Optional
//! - `SMARTCART_HOST` - Bind address (default: 127.0.0.1)
//! - `SMARTCART_PORT` - Listen port (default: 3000)
//! - `OUTBOX_SCAN_INTERVAL_SECS` - Outbox drain interval (default: 30)
//! - `OUTBOX_BATCH_SIZE` - Max emails claimed per drain pass (default: 20)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name
//! - `SENTRY_SAMPLE_RATE` - Sentry error sample rate (default: 1.0)
//! - `SENTRY_TRACES_SAMPLE_RATE` - Sentry traces sample rate (default: 1.0)
//!
//! ## Optional (SMTP - enables confirmation email delivery)
//! - `SMTP_HOST` - SMTP server hostname
//! - `SMTP_PORT` - SMTP port (default: 587)
//! - `SMTP_USERNAME` - SMTP authentication username
//! - `SMTP_PASSWORD` - SMTP authentication password
//! - `SMTP_FROM` - Email sender address
//!
//! Without the SMTP group the server still enqueues confirmation emails into
//! the outbox; they are delivered once a worker with SMTP access drains it.

use std::collections::HashMap;
use std::net::{IpAddr, SocketAddr};

use secrecy::SecretString;
use thiserror::Error;

/// Secrets must clear this many bits of entropy per character.
const MIN_ENTROPY_BITS_PER_CHAR: f64 = 3.3;

/// Substrings that mark a secret as a template value, matched
/// case-insensitively.
const PLACEHOLDER_MARKERS: &[&str] = &[
    "your-",
    "changeme",
    "replace",
    "placeholder",
    "example",
    "secret",
    "password",
    "xxx",
    "todo",
    "fixme",
    "insert",
    "enter-",
    "put-your",
    "add-your",
];

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("environment variable {0} is not set")]
    MissingEnvVar(String),
    #[error("environment variable {0} is invalid: {1}")]
    InvalidEnvVar(String, String),
    #[error("refusing insecure value for {0}: {1}")]
    InsecureSecret(String, String),
}

/// Server application configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// `PostgreSQL` connection URL (contains the password)
    pub database_url: SecretString,
    /// Bind address
    pub host: IpAddr,
    /// Listen port
    pub port: u16,
    /// Public base URL of the shop (email links point here)
    pub base_url: String,
    /// SMTP settings; absent means this process never sends mail
    pub smtp: Option<SmtpConfig>,
    /// Outbox worker tuning
    pub outbox: OutboxConfig,
    /// Sentry DSN; absent disables error reporting
    pub sentry_dsn: Option<String>,
    /// Sentry environment name
    pub sentry_environment: Option<String>,
    /// Fraction of errors reported to Sentry
    pub sentry_sample_rate: f32,
    /// Fraction of requests traced for performance
    pub sentry_traces_sample_rate: f32,
}

/// SMTP configuration.
///
/// Implements `Debug` manually to redact the password.
#[derive(Clone)]
pub struct SmtpConfig {
    /// Relay hostname
    pub smtp_host: String,
    /// Relay port
    pub smtp_port: u16,
    /// Relay login user
    pub smtp_username: String,
    /// Relay login password
    pub smtp_password: SecretString,
    /// Sender address for the From header
    pub from_address: String,
}

impl std::fmt::Debug for SmtpConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SmtpConfig")
            .field("smtp_host", &self.smtp_host)
            .field("smtp_port", &self.smtp_port)
            .field("smtp_username", &self.smtp_username)
            .field("smtp_password", &"[REDACTED]")
            .field("from_address", &self.from_address)
            .finish()
    }
}

/// Outbox drain worker tuning.
#[derive(Debug, Clone)]
pub struct OutboxConfig {
    /// Seconds between drain passes.
    pub scan_interval_secs: u64,
    /// Maximum number of emails claimed per pass.
    pub batch_size: i64,
}

impl Config {
    /// Load configuration from the environment, reading `.env` first when
    /// one exists.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` when a required variable is missing, a value
    /// does not parse, or the SMTP password fails the secret checks.
    pub fn from_env() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();

        let database_url = database_url_from_env("SMARTCART_DATABASE_URL")?;
        let host = parsed_env("SMARTCART_HOST", "127.0.0.1")?;
        let port = parsed_env("SMARTCART_PORT", "3000")?;
        let base_url = require_env("SMARTCART_BASE_URL")?;

        let smtp = SmtpConfig::from_env()?;
        let outbox = OutboxConfig::from_env()?;
        let sentry_dsn = optional_env("SENTRY_DSN");
        let sentry_environment = optional_env("SENTRY_ENVIRONMENT");
        let sentry_sample_rate = optional_env("SENTRY_SAMPLE_RATE")
            .and_then(|s| s.parse().ok())
            .unwrap_or(1.0);
        let sentry_traces_sample_rate = optional_env("SENTRY_TRACES_SAMPLE_RATE")
            .and_then(|s| s.parse().ok())
            .unwrap_or(1.0);

        Ok(Self {
            database_url,
            host,
            port,
            base_url,
            smtp,
            outbox,
            sentry_dsn,
            sentry_environment,
            sentry_sample_rate,
            sentry_traces_sample_rate,
        })
    }

    /// The address to bind the listener to.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// SMTP settings, or `None` when this process should leave the outbox
    /// to another worker.
    #[must_use]
    pub const fn smtp(&self) -> Option<&SmtpConfig> {
        self.smtp.as_ref()
    }
}

impl SmtpConfig {
    /// The SMTP group is all-or-nothing: a partial group is a deployment
    /// mistake, not a request to run without mail.
    fn from_env() -> Result<Option<Self>, ConfigError> {
        let host = optional_env("SMTP_HOST");
        let username = optional_env("SMTP_USERNAME");
        let password = optional_env("SMTP_PASSWORD");
        let from_address = optional_env("SMTP_FROM");

        match (host, username, password, from_address) {
            (Some(smtp_host), Some(smtp_username), Some(password), Some(from_address)) => {
                validate_secret_strength(&password, "SMTP_PASSWORD")?;
                let smtp_port = parsed_env("SMTP_PORT", "587")?;

                Ok(Some(Self {
                    smtp_host,
                    smtp_port,
                    smtp_username,
                    smtp_password: SecretString::from(password),
                    from_address,
                }))
            }
            (None, None, None, None) => Ok(None),
            _ => Err(ConfigError::InvalidEnvVar(
                "SMTP_*".to_string(),
                "SMTP_HOST, SMTP_USERNAME, SMTP_PASSWORD, and SMTP_FROM must be set together"
                    .to_string(),
            )),
        }
    }
}

impl OutboxConfig {
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            scan_interval_secs: parsed_env("OUTBOX_SCAN_INTERVAL_SECS", "30")?,
            batch_size: parsed_env("OUTBOX_BATCH_SIZE", "20")?,
        })
    }
}

// =============================================================================
// Environment helpers
// =============================================================================

/// A variable that must be present.
fn require_env(key: &str) -> Result<String, ConfigError> {
    std::env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_string()))
}

/// A variable that may be absent.
fn optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// A variable with a default, parsed into its target type.
fn parsed_env<T: std::str::FromStr>(key: &str, default: &str) -> Result<T, ConfigError>
where
    T::Err: std::fmt::Display,
{
    std::env::var(key)
        .unwrap_or_else(|_| default.to_string())
        .parse()
        .map_err(|e: T::Err| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
}

/// The app-specific variable wins; bare `DATABASE_URL` is what Fly.io
/// postgres attach sets.
fn database_url_from_env(primary_key: &str) -> Result<SecretString, ConfigError> {
    std::env::var(primary_key)
        .or_else(|_| std::env::var("DATABASE_URL"))
        .map(SecretString::from)
        .map_err(|_| ConfigError::MissingEnvVar(primary_key.to_string()))
}

/// Shannon entropy in bits per character.
#[allow(clippy::cast_precision_loss)] // counts are far below f64 precision
fn shannon_entropy(s: &str) -> f64 {
    if s.is_empty() {
        return 0.0;
    }

    let mut counts: HashMap<char, usize> = HashMap::new();
    for ch in s.chars() {
        *counts.entry(ch).or_insert(0) += 1;
    }

    let len = s.len() as f64;
    counts
        .into_values()
        .map(|count| {
            let p = count as f64 / len;
            -p * p.log2()
        })
        .sum()
}

/// Reject template values and low-entropy strings before they reach the
/// SMTP relay as credentials.
fn validate_secret_strength(secret: &str, var_name: &str) -> Result<(), ConfigError> {
    let lower = secret.to_lowercase();
    if let Some(marker) = PLACEHOLDER_MARKERS.iter().find(|m| lower.contains(**m)) {
        return Err(ConfigError::InsecureSecret(
            var_name.to_string(),
            format!("looks like a placeholder (contains '{marker}')"),
        ));
    }

    let entropy = shannon_entropy(secret);
    if entropy < MIN_ENTROPY_BITS_PER_CHAR {
        return Err(ConfigError::InsecureSecret(
            var_name.to_string(),
            format!(
                "entropy {entropy:.2} bits/char is below the {MIN_ENTROPY_BITS_PER_CHAR:.1} floor; generate a random secret"
            ),
        ));
    }

    Ok(())
}
