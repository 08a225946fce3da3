//! Runtime configuration: TOML file, environment overrides, validation.
//!
//! Every field has a default, so an empty file (or no file at all) yields a
//! working configuration pointed at the public CoinGecko API and a
//! classification service on `localhost:8000`.
//!
//! Entrypoints:
//! - Parse from a TOML string: [`TrendConfig::from_toml_str`]
//! - Parse from a file path: [`TrendConfig::from_path`]
//! - File (optional) + environment + validation: [`TrendConfig::load`]

use std::{
    path::{Path, PathBuf},
    time::Duration,
};

use secrecy::SecretString;
use serde::Deserialize;
use shared_utils::env::get_optional_env_var;
use thiserror::Error;

use crate::models::horizon::MIN_WINDOW_SAMPLES;

/// Overrides [`TrendConfig::market_base_url`].
pub const MARKET_URL_ENV: &str = "MARKET_TREND_MARKET_URL";
/// Overrides [`TrendConfig::classifier_base_url`].
pub const BACKEND_URL_ENV: &str = "MARKET_TREND_BACKEND_URL";
/// Optional market API credential.
pub const API_KEY_ENV: &str = "MARKET_TREND_API_KEY";
/// News feed credential; the news provider refuses to start without it.
pub const NEWS_KEY_ENV: &str = "MARKET_TREND_NEWS_KEY";

/// Errors related to loading or validating configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config TOML")]
    Parse(#[from] toml::de::Error),

    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Settings for the trend pipeline and the HTTP sources behind it.
#[derive(Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TrendConfig {
    /// Base URL of the market data API (history, markets, quotes).
    pub market_base_url: String,
    /// Base URL of the classification service; requests go to `{base}/predict`.
    pub classifier_base_url: String,
    /// Quote currency for prices.
    pub vs_currency: String,
    /// Length of the long horizon, in daily samples.
    pub lookback_days: u32,
    /// Debounce quiet period for selection changes.
    pub quiet_period_ms: u64,
    /// Upper bound on every outbound call.
    pub request_timeout_ms: u64,
    /// Number of entities fetched per registry refresh.
    pub top_entities: u32,
    /// Client-side rate limit for the market API.
    pub requests_per_minute: u32,
    /// Base URL of the news API; requests go to `{base}/posts/`.
    pub news_base_url: String,
    /// Headlines kept per news fetch.
    pub news_items: usize,
    /// Never read from TOML; only from [`API_KEY_ENV`].
    #[serde(skip)]
    api_key: Option<SecretString>,
    /// Never read from TOML; only from [`NEWS_KEY_ENV`].
    #[serde(skip)]
    news_api_key: Option<SecretString>,
}

impl Default for TrendConfig {
    fn default() -> Self {
        Self {
            market_base_url: "https://api.coingecko.com/api/v3".to_string(),
            classifier_base_url: "http://localhost:8000".to_string(),
            vs_currency: "usd".to_string(),
            lookback_days: 30,
            quiet_period_ms: 300,
            request_timeout_ms: 10_000,
            top_entities: 20,
            requests_per_minute: 30,
            news_base_url: "https://cryptopanic.com/api/v1".to_string(),
            news_items: 5,
            api_key: None,
            news_api_key: None,
        }
    }
}

impl TrendConfig {
    /// Loads the config file (if any), applies environment overrides and validates.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) => Self::from_path(path)?,
            None => Self::default(),
        };
        config.apply_overrides(get_optional_env_var);
        config.validate()?;
        Ok(config)
    }

    /// Parses a config from TOML text. Missing keys take their defaults.
    pub fn from_toml_str(toml_str: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(toml_str)?)
    }

    /// Reads and parses a TOML config file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    /// Applies overrides looked up by variable name (normally the process environment).
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(MARKET_URL_ENV) {
            self.market_base_url = url;
        }
        if let Some(url) = lookup(BACKEND_URL_ENV) {
            self.classifier_base_url = url;
        }
        if let Some(key) = lookup(API_KEY_ENV) {
            self.api_key = Some(SecretString::from(key));
        }
        if let Some(key) = lookup(NEWS_KEY_ENV) {
            self.news_api_key = Some(SecretString::from(key));
        }
    }

    /// Rejects values that would make the pipeline unusable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let checks = [
            (
                (self.lookback_days as usize) < MIN_WINDOW_SAMPLES,
                "lookback_days must cover at least two samples",
            ),
            (self.quiet_period_ms == 0, "quiet_period_ms must be positive"),
            (self.request_timeout_ms == 0, "request_timeout_ms must be positive"),
            (self.top_entities == 0, "top_entities must be positive"),
            (self.requests_per_minute == 0, "requests_per_minute must be positive"),
            (self.market_base_url.trim().is_empty(), "market_base_url cannot be empty"),
            (
                self.classifier_base_url.trim().is_empty(),
                "classifier_base_url cannot be empty",
            ),
            (self.vs_currency.trim().is_empty(), "vs_currency cannot be empty"),
            (self.news_base_url.trim().is_empty(), "news_base_url cannot be empty"),
            (self.news_items == 0, "news_items must be positive"),
        ];
        match checks.iter().find(|(failed, _)| *failed) {
            Some((_, message)) => Err(ConfigError::Invalid((*message).to_string())),
            None => Ok(()),
        }
    }

    pub fn quiet_period(&self) -> Duration {
        Duration::from_millis(self.quiet_period_ms)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }

    pub fn api_key(&self) -> Option<&SecretString> {
        self.api_key.as_ref()
    }

    pub fn news_api_key(&self) -> Option<&SecretString> {
        self.news_api_key.as_ref()
    }
}
