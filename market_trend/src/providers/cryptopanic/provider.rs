use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use shared_utils::env::MissingEnvVarError;
use snafu::ResultExt;
use tracing::debug;

use crate::{
    config::{NEWS_KEY_ENV, TrendConfig},
    models::news::NewsItem,
    providers::{
        ApiSnafu, ClientBuildSnafu, MissingEnvVarSnafu, NewsSource, ProviderError,
        ProviderInitError, ReqwestSnafu, cryptopanic::response::PostsResponse,
    },
};

/// CryptoPanic REST client serving public headlines.
///
/// The auth token travels as a query parameter, so request URLs are stripped
/// from every error this provider returns.
pub struct CryptoPanicProvider {
    client: Client,
    endpoint: String,
    auth_token: SecretString,
}

impl CryptoPanicProvider {
    /// Creates a provider from the runtime configuration.
    ///
    /// Fails with [`ProviderInitError::MissingEnvVar`] when no news key was
    /// supplied through [`NEWS_KEY_ENV`].
    pub fn new(config: &TrendConfig) -> Result<Self, ProviderInitError> {
        let auth_token = config
            .news_api_key()
            .map(|key| SecretString::from(key.expose_secret().to_string()))
            .ok_or_else(|| MissingEnvVarError(NEWS_KEY_ENV.to_string()))
            .context(MissingEnvVarSnafu)?;

        let client = Client::builder()
            .timeout(config.request_timeout())
            .build()
            .context(ClientBuildSnafu)?;

        Ok(Self {
            client,
            endpoint: format!("{}/posts/", config.news_base_url.trim_end_matches('/')),
            auth_token,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl NewsSource for CryptoPanicProvider {
    async fn fetch_headlines(&self) -> Result<Vec<NewsItem>, ProviderError> {
        let response = self
            .client
            .get(&self.endpoint)
            .query(&[
                ("auth_token", self.auth_token.expose_secret()),
                ("public", "true"),
            ])
            .send()
            .await
            .map_err(reqwest::Error::without_url)
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

        let body = response
            .json::<PostsResponse>()
            .await
            .map_err(reqwest::Error::without_url)
            .context(ReqwestSnafu)?;
        let items = body.into_items();
        debug!(count = items.len(), "fetched headlines");
        Ok(items)
    }
}
