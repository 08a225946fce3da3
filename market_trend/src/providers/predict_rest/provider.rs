use async_trait::async_trait;
use reqwest::Client;
use snafu::ResultExt;
use tracing::debug;

use crate::{
    config::TrendConfig,
    models::{horizon::HorizonWindows, trend::TrendResult},
    providers::{
        ApiSnafu, ClientBuildSnafu, ProviderError, ProviderInitError, ReqwestSnafu,
        TrendClassifier,
    },
};

/// Client for the external classification service (`POST {base}/predict`).
///
/// The request body is the three windows as `prices_1d`, `prices_7d` and
/// `prices_30d`; the response must carry `trend_1d`, `trend_7d` and
/// `trend_30d`, each one of the four label strings.
pub struct PredictClient {
    client: Client,
    endpoint: String,
}

impl PredictClient {
    /// Creates a client for the service at `config.classifier_base_url`.
    ///
    /// `MARKET_TREND_BACKEND_URL` overrides that field in
    /// [`TrendConfig::load`].
    pub fn new(config: &TrendConfig) -> Result<Self, ProviderInitError> {
        let base_url = &config.classifier_base_url;
        let client = Client::builder()
            .timeout(config.request_timeout())
            .build()
            .context(ClientBuildSnafu)?;

        Ok(Self {
            client,
            endpoint: format!("{}/predict", base_url.trim_end_matches('/')),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl TrendClassifier for PredictClient {
    async fn classify(&self, windows: &HorizonWindows) -> Result<TrendResult, ProviderError> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(windows)
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

        let result = response.json::<TrendResult>().await.context(ReqwestSnafu)?;
        debug!(
            trend_1d = %result.trend_1d,
            trend_7d = %result.trend_7d,
            trend_30d = %result.trend_30d,
            "classification received"
        );
        Ok(result)
    }
}
