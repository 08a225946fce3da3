use std::num::NonZeroU32;

use async_trait::async_trait;
use governor::{DefaultDirectRateLimiter, Quota, RateLimiter};
use nonzero_ext::nonzero;
use reqwest::{Client, header};
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use snafu::ResultExt;
use tracing::{debug, warn};

use crate::{
    config::TrendConfig,
    models::{detail::CoinDetail, entity::Entity, horizon::PriceSample, quote::PriceQuote},
    providers::{
        ApiSnafu, ClientBuildSnafu, HistorySource, InvalidApiKeySnafu, MarketSource,
        ProviderError, ProviderInitError, ReqwestSnafu, ValidationSnafu,
        coingecko::{
            params::{
                QueryParams, coin_detail_params, market_chart_params, markets_params,
                simple_price_params, validate_entity_id,
            },
            response::{
                CoinDetailResponse, MarketChartResponse, MarketCoin, SimplePriceResponse,
                quotes_from_simple_price,
            },
        },
    },
};

const API_KEY_HEADER: &str = "x-cg-demo-api-key";
const DEFAULT_REQUESTS_PER_MINUTE: NonZeroU32 = nonzero!(30u32);

/// CoinGecko v3 REST client serving price history, markets, quotes and
/// per-coin detail.
pub struct CoinGeckoProvider {
    client: Client,
    base_url: String,
    vs_currency: String,
    limiter: DefaultDirectRateLimiter,
    _api_key: Option<SecretString>,
}

impl CoinGeckoProvider {
    /// Creates a new CoinGecko provider from the runtime configuration.
    ///
    /// The configured API key, if any, is sent as a default header on every
    /// request. The client enforces [`TrendConfig::request_timeout`].
    pub fn new(config: &TrendConfig) -> Result<Self, ProviderInitError> {
        let mut headers = header::HeaderMap::new();
        let api_key = config
            .api_key()
            .map(|key| SecretString::from(key.expose_secret().to_string()));
        if let Some(key) = &api_key {
            let mut value =
                header::HeaderValue::from_str(key.expose_secret()).context(InvalidApiKeySnafu)?;
            value.set_sensitive(true);
            headers.insert(API_KEY_HEADER, value);
        }

        let client = Client::builder()
            .default_headers(headers)
            .timeout(config.request_timeout())
            .build()
            .context(ClientBuildSnafu)?;

        let per_minute =
            NonZeroU32::new(config.requests_per_minute).unwrap_or(DEFAULT_REQUESTS_PER_MINUTE);

        Ok(Self {
            client,
            base_url: config.market_base_url.trim_end_matches('/').to_string(),
            vs_currency: config.vs_currency.clone(),
            limiter: RateLimiter::direct(Quota::per_minute(per_minute)),
            _api_key: api_key,
        })
    }

    /// Like [`HistorySource::fetch_history`], but surfaces the failure.
    pub async fn try_fetch_history(
        &self,
        entity_id: &str,
        lookback_days: u32,
    ) -> Result<Vec<PriceSample>, ProviderError> {
        validate_entity_id(entity_id).map_err(|message| ValidationSnafu { message }.build())?;

        let body: MarketChartResponse = self
            .get_json(
                &format!("coins/{entity_id}/market_chart"),
                &market_chart_params(&self.vs_currency, lookback_days),
            )
            .await?;
        Ok(body.into_prices())
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &QueryParams,
    ) -> Result<T, ProviderError> {
        self.limiter.until_ready().await;

        let url = format!("{}/{}", self.base_url, path);
        let response = self
            .client
            .get(&url)
            .query(query)
            .send()
            .await
            .context(ReqwestSnafu)?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown API error".to_string());
            return ApiSnafu {
                status: status.as_u16(),
                message,
            }
            .fail();
        }

        response.json::<T>().await.context(ReqwestSnafu)
    }
}

#[async_trait]
impl HistorySource for CoinGeckoProvider {
    async fn fetch_history(&self, entity_id: &str, lookback_days: u32) -> Vec<PriceSample> {
        match self.try_fetch_history(entity_id, lookback_days).await {
            Ok(prices) => {
                debug!(entity_id, samples = prices.len(), "fetched price history");
                prices
            }
            Err(error) => {
                warn!(entity_id, %error, "price history unavailable");
                Vec::new()
            }
        }
    }
}

#[async_trait]
impl MarketSource for CoinGeckoProvider {
    async fn fetch_top_entities(&self, limit: u32) -> Result<Vec<Entity>, ProviderError> {
        let rows: Vec<MarketCoin> = self
            .get_json("coins/markets", &markets_params(&self.vs_currency, limit))
            .await?;
        Ok(rows.into_iter().map(Entity::from).collect())
    }

    async fn fetch_quotes(&self, entities: &[Entity]) -> Result<Vec<PriceQuote>, ProviderError> {
        if entities.is_empty() {
            return Ok(Vec::new());
        }
        let response: SimplePriceResponse = self
            .get_json(
                "simple/price",
                &simple_price_params(entities, &self.vs_currency),
            )
            .await?;
        Ok(quotes_from_simple_price(
            entities,
            &response,
            &self.vs_currency,
        ))
    }

    async fn fetch_coin_detail(&self, entity_id: &str) -> Result<CoinDetail, ProviderError> {
        validate_entity_id(entity_id).map_err(|message| ValidationSnafu { message }.build())?;

        let body: CoinDetailResponse = self
            .get_json(&format!("coins/{entity_id}"), &coin_detail_params())
            .await?;
        body.into_detail(&self.vs_currency)
            .map_err(|message| ValidationSnafu { message }.build())
    }
}
