//! Shell configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `BAZAAR_SEARCH_DELAY_MS` - Simulated latency before search results apply (default: 500)
//! - `BAZAAR_FILTER_DELAY_MS` - Simulated latency before filter results apply (default: 300)
//! - `BAZAAR_DECORATION` - `minimal` or `animated` (default: animated)
//! - `BAZAAR_CATALOG_PATH` - YAML product catalog; the built-in sample catalog otherwise
//! - `BAZAAR_LOG_FORMAT` - `pretty` or `json` (default: pretty)

use std::path::PathBuf;
use std::time::Duration;

use bazaar_core::DecorationLevel;
use thiserror::Error;

const DEFAULT_SEARCH_DELAY_MS: u64 = 500;
const DEFAULT_FILTER_DELAY_MS: u64 = 300;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Shell configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShellConfig {
    /// Delay before search results are applied
    pub search_delay: Duration,
    /// Delay before filter results are applied
    pub filter_delay: Duration,
    /// Presentation mode for every view
    pub decoration: DecorationLevel,
    /// Optional YAML catalog file
    pub catalog_path: Option<PathBuf>,
    /// Log output format
    pub log_format: LogFormat,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            search_delay: Duration::from_millis(DEFAULT_SEARCH_DELAY_MS),
            filter_delay: Duration::from_millis(DEFAULT_FILTER_DELAY_MS),
            decoration: DecorationLevel::default(),
            catalog_path: None,
            log_format: LogFormat::default(),
        }
    }
}

impl ShellConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set but can't be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable source.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set but can't be parsed.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let search_delay = parse_millis(
            &lookup,
            "BAZAAR_SEARCH_DELAY_MS",
            DEFAULT_SEARCH_DELAY_MS,
        )?;
        let filter_delay = parse_millis(
            &lookup,
            "BAZAAR_FILTER_DELAY_MS",
            DEFAULT_FILTER_DELAY_MS,
        )?;

        let decoration = match lookup("BAZAAR_DECORATION") {
            Some(value) => value
                .parse::<DecorationLevel>()
                .map_err(|e| ConfigError::InvalidEnvVar("BAZAAR_DECORATION".to_string(), e))?,
            None => DecorationLevel::default(),
        };

        let log_format = match lookup("BAZAAR_LOG_FORMAT").as_deref().map(str::trim) {
            None | Some("" | "pretty") => LogFormat::Pretty,
            Some("json") => LogFormat::Json,
            Some(other) => {
                return Err(ConfigError::InvalidEnvVar(
                    "BAZAAR_LOG_FORMAT".to_string(),
                    format!("expected pretty or json, got {other}"),
                ));
            }
        };

        Ok(Self {
            search_delay,
            filter_delay,
            decoration,
            catalog_path: lookup("BAZAAR_CATALOG_PATH")
                .filter(|path| !path.trim().is_empty())
                .map(PathBuf::from),
            log_format,
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Parse a millisecond duration, falling back to `default` when unset.
fn parse_millis(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: u64,
) -> Result<Duration, ConfigError> {
    let millis = match lookup(key) {
        Some(value) => value
            .trim()
            .parse::<u64>()
            .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))?,
        None => default,
    };
    Ok(Duration::from_millis(millis))
}
