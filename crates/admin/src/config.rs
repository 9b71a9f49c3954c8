//! Banner console configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `BANNER_CAROUSEL_INTERVAL_MS` - Autoplay interval in milliseconds (default: 3000, min: 100)
//! - `BANNER_CAROUSEL_AUTOPLAY` - Start playing when the preview opens (default: true)

use std::time::Duration;

use thiserror::Error;

const DEFAULT_CAROUSEL_INTERVAL_MS: u64 = 3000;
const MIN_CAROUSEL_INTERVAL_MS: u64 = 100;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Banner console configuration.
#[derive(Debug, Clone, Default)]
pub struct BannerConsoleConfig {
    /// Carousel preview settings
    pub carousel: CarouselConfig,
}

/// Carousel preview settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CarouselConfig {
    /// Time between autoplay advances
    pub interval: Duration,
    /// Whether a newly opened preview starts playing
    pub autoplay_on_open: bool,
}

impl Default for CarouselConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_millis(DEFAULT_CAROUSEL_INTERVAL_MS),
            autoplay_on_open: true,
        }
    }
}

impl BannerConsoleConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set but invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();
        Self::from_lookup(get_optional_env)
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        Ok(Self {
            carousel: CarouselConfig::from_lookup(&lookup)?,
        })
    }

    /// Returns the carousel preview settings.
    #[must_use]
    pub const fn carousel(&self) -> CarouselConfig {
        self.carousel
    }
}

impl CarouselConfig {
    fn from_lookup(lookup: &impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let interval_ms = match lookup("BANNER_CAROUSEL_INTERVAL_MS") {
            Some(raw) => raw.trim().parse::<u64>().map_err(|e| {
                ConfigError::InvalidEnvVar("BANNER_CAROUSEL_INTERVAL_MS".to_string(), e.to_string())
            })?,
            None => DEFAULT_CAROUSEL_INTERVAL_MS,
        };
        if interval_ms < MIN_CAROUSEL_INTERVAL_MS {
            return Err(ConfigError::InvalidEnvVar(
                "BANNER_CAROUSEL_INTERVAL_MS".to_string(),
                format!("must be at least {MIN_CAROUSEL_INTERVAL_MS} (got {interval_ms})"),
            ));
        }

        let autoplay_on_open = match lookup("BANNER_CAROUSEL_AUTOPLAY") {
            Some(raw) => parse_bool(&raw).ok_or_else(|| {
                ConfigError::InvalidEnvVar(
                    "BANNER_CAROUSEL_AUTOPLAY".to_string(),
                    format!("expected true or false (got {raw:?})"),
                )
            })?,
            None => true,
        };

        Ok(Self {
            interval: Duration::from_millis(interval_ms),
            autoplay_on_open,
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}
