//! Configuration loaded from environment variables.
//!
//! Two independent configurations live here: [`Config`] for the mock provider
//! binary and [`DashboardConfig`] for the dashboard CLI. Both are loaded once at
//! startup and validated before use. Binaries call `dotenvy::dotenv()` first, so
//! a `.env` file works too.
//!
//! ## Provider Variables
//!
//! - `LISTEN` - Bind address (default: `0.0.0.0:3000`)
//! - `RUST_LOG` - Log level (default: `info`)
//! - `LOG_FORMAT` - Log format: `text` or `json` (default: `text`)
//! - `TOKEN_SIGNING_SECRET` - HMAC key for session token hashes
//!   (default: random per process, which is fine because sessions die with it)
//! - `RANDOM_SEED` - Seed for random subject selection (default: OS entropy)
//! - `RATE_LIMIT_ENABLED` - Throttle `/signup` and `/login` (default: `true`)
//!
//! ## Dashboard Variables
//!
//! - `WANIKANI_API_BASE` - Upstream base URL (default: `https://api.wanikani.com/v2/`)
//! - `WANIKANI_API_TOKEN` - Bearer token to pre-fill the login prompt
//! - `HTTP_TIMEOUT_SECS` - Per-request timeout (default: 30, range 1-600)
//! - `LOG_FORMAT` - Shared with the provider

use anyhow::{Context, Result};
use std::env;
use std::time::Duration;
use url::Url;

/// Upstream used when `WANIKANI_API_BASE` is unset.
pub const DEFAULT_API_BASE: &str = "https://api.wanikani.com/v2/";

/// Provider configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub listen_addr: String,
    pub log_level: String,
    pub log_format: String,
    /// HMAC key used to hash session tokens before storage.
    pub token_signing_secret: String,
    /// Seed for the subject picker; `None` seeds from the OS.
    pub random_seed: Option<u64>,
    pub rate_limit_enabled: bool,
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if `RANDOM_SEED` is set but not a `u64`, or if a
    /// signing secret has to be generated and the OS RNG fails.
    pub fn from_env() -> Result<Self> {
        let listen_addr = env::var("LISTEN").unwrap_or_else(|_| "0.0.0.0:3000".to_string());
        let log_level = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
        let log_format = env::var("LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

        let token_signing_secret = match env::var("TOKEN_SIGNING_SECRET") {
            Ok(secret) => secret,
            Err(_) => generate_secret()?,
        };

        let random_seed = env::var("RANDOM_SEED")
            .ok()
            .map(|v| v.parse::<u64>())
            .transpose()
            .context("RANDOM_SEED must be an unsigned integer")?;

        let rate_limit_enabled = env::var("RATE_LIMIT_ENABLED")
            .map(|v| v.eq_ignore_ascii_case("true") || v == "1")
            .unwrap_or(true);

        Ok(Self {
            listen_addr,
            log_level,
            log_format,
            token_signing_secret,
            random_seed,
            rate_limit_enabled,
        })
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `log_format` is not `text` or `json`
    /// - `listen_addr` is not `host:port`
    /// - `token_signing_secret` is empty
    pub fn validate(&self) -> Result<()> {
        validate_log_format(&self.log_format)?;

        if !self.listen_addr.contains(':') {
            anyhow::bail!(
                "LISTEN must be in format 'host:port', got '{}'",
                self.listen_addr
            );
        }

        if self.token_signing_secret.is_empty() {
            anyhow::bail!("TOKEN_SIGNING_SECRET must not be empty");
        }

        Ok(())
    }

    /// Prints configuration summary (without sensitive data).
    pub fn print_summary(&self) {
        tracing::info!("Configuration loaded:");
        tracing::info!("  Listen address: {}", self.listen_addr);
        tracing::info!("  Log level: {}", self.log_level);
        tracing::info!("  Log format: {}", self.log_format);
        match self.random_seed {
            Some(seed) => tracing::info!("  Random seed: {}", seed),
            None => tracing::info!("  Random seed: OS entropy"),
        }
        tracing::info!(
            "  Rate limiting: {}",
            if self.rate_limit_enabled { "enabled" } else { "disabled" }
        );
    }
}

/// Dashboard CLI configuration.
#[derive(Debug, Clone)]
pub struct DashboardConfig {
    /// Base URL every API path is joined onto. Always ends with `/`.
    pub api_base: Url,
    pub api_token: Option<String>,
    pub http_timeout_secs: u64,
    pub log_format: String,
}

impl DashboardConfig {
    /// Loads configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if `WANIKANI_API_BASE` is not a URL or
    /// `HTTP_TIMEOUT_SECS` is not a number.
    pub fn from_env() -> Result<Self> {
        let base = env::var("WANIKANI_API_BASE").unwrap_or_else(|_| DEFAULT_API_BASE.to_string());
        let api_base = parse_api_base(&base)?;

        let api_token = env::var("WANIKANI_API_TOKEN")
            .ok()
            .filter(|t| !t.trim().is_empty());

        let http_timeout_secs = match env::var("HTTP_TIMEOUT_SECS") {
            Ok(v) => v
                .parse()
                .with_context(|| format!("HTTP_TIMEOUT_SECS must be a number, got '{v}'"))?,
            Err(_) => 30,
        };

        let log_format = env::var("LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

        Ok(Self {
            api_base,
            api_token,
            http_timeout_secs,
            log_format,
        })
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the timeout is outside 1-600 seconds or the log
    /// format is unknown.
    pub fn validate(&self) -> Result<()> {
        if !(1..=600).contains(&self.http_timeout_secs) {
            anyhow::bail!(
                "HTTP_TIMEOUT_SECS must be between 1 and 600, got {}",
                self.http_timeout_secs
            );
        }

        validate_log_format(&self.log_format)
    }

    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_secs)
    }
}

/// Parses an API base URL, forcing a trailing slash so relative paths join
/// underneath it rather than replacing its last segment.
///
/// # Errors
///
/// Returns an error if the value is not an `http` or `https` URL.
pub fn parse_api_base(raw: &str) -> Result<Url> {
    let mut url = Url::parse(raw).with_context(|| format!("Invalid API base URL '{raw}'"))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        anyhow::bail!("API base URL must use http or https, got '{}'", raw);
    }

    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }

    Ok(url)
}

fn validate_log_format(format: &str) -> Result<()> {
    if format != "text" && format != "json" {
        anyhow::bail!("LOG_FORMAT must be 'text' or 'json', got '{}'", format);
    }
    Ok(())
}

fn generate_secret() -> Result<String> {
    let mut buffer = [0u8; 32];
    getrandom::fill(&mut buffer)
        .map_err(|e| anyhow::anyhow!("Failed to generate signing secret: {e}"))?;
    Ok(hex::encode(buffer))
}

/// Loads and validates provider configuration from environment variables.
///
/// # Errors
///
/// Returns an error if required variables are malformed or validation fails.
pub fn load_from_env() -> Result<Config> {
    let config = Config::from_env()?;
    config.validate()?;
    Ok(config)
}
