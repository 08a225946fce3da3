//! Outbound boundaries of the trend pipeline.
//!
//! This module defines the traits the pipeline talks to and the error types
//! concrete vendors report through them:
//!
//! - [`HistorySource`]: ordered price history for one entity. Never fails;
//!   an empty sequence means "no usable history".
//! - [`TrendClassifier`]: three horizon windows in, three labels out. Fails
//!   loudly instead of defaulting, so the caller decides what degraded means.
//! - [`MarketSource`]: the entity list, spot quotes and per-entity price
//!   card behind the registry and the movers view.
//! - [`NewsSource`]: recent headlines. Callers usually go through
//!   [`NewsSource::latest`], which turns a failure into a flagged empty feed.
//!
//! All traits are async and object safe, so the pipeline can hold them as
//! `Arc<dyn ..>` and tests can swap in fakes.
//!
//! # Example
//!
//! ```rust
//! use async_trait::async_trait;
//! use market_trend::providers::HistorySource;
//!
//! struct FlatHistory;
//!
//! #[async_trait]
//! impl HistorySource for FlatHistory {
//!     async fn fetch_history(&self, _entity_id: &str, lookback_days: u32) -> Vec<f64> {
//!         vec![100.0; lookback_days as usize]
//!     }
//! }
//! ```

pub mod coingecko;
pub mod cryptopanic;
pub mod heuristic;
pub mod predict_rest;

use async_trait::async_trait;
use shared_utils::env::MissingEnvVarError;
use snafu::{Backtrace, Snafu};
use tracing::warn;

use crate::models::{
    detail::CoinDetail,
    entity::Entity,
    horizon::{HorizonWindows, PriceSample},
    news::{NewsFeed, NewsItem},
    quote::PriceQuote,
    trend::TrendResult,
};

/// Fetches a time-ordered price history for an entity.
#[async_trait]
pub trait HistorySource: Send + Sync {
    /// Returns up to `lookback_days` of prices for `entity_id`, oldest first.
    ///
    /// Implementations swallow transport and parse failures and return an
    /// empty vector instead. No retries happen here.
    async fn fetch_history(&self, entity_id: &str, lookback_days: u32) -> Vec<PriceSample>;
}

/// Turns the three horizon windows into one label per horizon.
#[async_trait]
pub trait TrendClassifier: Send + Sync {
    /// Classifies already validated windows.
    ///
    /// # Returns
    ///
    /// * `Ok(TrendResult)` - one label per horizon.
    /// * `Err(ProviderError)` - the call failed or the answer was malformed.
    async fn classify(&self, windows: &HorizonWindows) -> Result<TrendResult, ProviderError>;
}

/// Lists tradable entities and their spot quotes.
#[async_trait]
pub trait MarketSource: Send + Sync {
    /// The `limit` largest entities by market cap, largest first.
    async fn fetch_top_entities(&self, limit: u32) -> Result<Vec<Entity>, ProviderError>;

    /// Latest price and 24h change for each entity the vendor knows about.
    async fn fetch_quotes(&self, entities: &[Entity]) -> Result<Vec<PriceQuote>, ProviderError>;

    /// Price, market cap, ROI and 24h change for one entity.
    async fn fetch_coin_detail(&self, entity_id: &str) -> Result<CoinDetail, ProviderError>;
}

/// Supplies recent market headlines, newest first.
#[async_trait]
pub trait NewsSource: Send + Sync {
    async fn fetch_headlines(&self) -> Result<Vec<NewsItem>, ProviderError>;

    /// The first `limit` headlines, or an empty feed flagged unavailable if
    /// the fetch failed.
    async fn latest(&self, limit: usize) -> NewsFeed {
        match self.fetch_headlines().await {
            Ok(items) => NewsFeed::available(items, limit),
            Err(error) => {
                warn!(%error, "news feed unavailable");
                NewsFeed::unavailable()
            }
        }
    }
}

/// Errors that can occur during the creation of a provider instance
#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum ProviderInitError {
    /// missed environment variable.
    #[snafu(display("Missing environment variable: {source}"))]
    MissingEnvVar {
        source: MissingEnvVarError,
        backtrace: Backtrace,
    },

    /// failed to init reqwest client
    #[snafu(display("Failed to build HTTP client: {source}"))]
    ClientBuild {
        source: reqwest::Error,
        backtrace: Backtrace,
    },

    /// API key contains invalid characters.
    #[snafu(display("Invalid API key format: {source}"))]
    InvalidApiKey {
        source: reqwest::header::InvalidHeaderValue,
        backtrace: Backtrace,
    },
}

/// Errors that can occur within a provider implementation.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum ProviderError {
    /// An error during an API request (e.g., network failure, undecodable body).
    #[snafu(display("API request failed: {source}"))]
    Reqwest {
        source: reqwest::Error,
        backtrace: Backtrace,
    },

    /// The API answered with a non-success status.
    #[snafu(display("API error ({status}): {message}"))]
    Api {
        status: u16,
        message: String,
        backtrace: Backtrace,
    },

    /// The call did not finish within the configured bound.
    #[snafu(display("Request timed out after {timeout_ms} ms"))]
    Timeout { timeout_ms: u64, backtrace: Backtrace },

    /// The request parameters were invalid for this specific provider.
    #[snafu(display("Invalid parameters for provider: {message}"))]
    Validation {
        message: String,
        backtrace: Backtrace,
    },

    /// An error during provider configuration or initialization.
    #[snafu(display("Provider initialization error: {source}"))]
    Init {
        #[snafu(backtrace)]
        source: ProviderInitError,
    },
}
