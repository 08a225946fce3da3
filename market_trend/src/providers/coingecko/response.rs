use indexmap::IndexMap;
use serde::Deserialize;

use crate::models::{detail::CoinDetail, entity::Entity, horizon::PriceSample, quote::PriceQuote};

/// Body of `/coins/{id}/market_chart`. Only `prices` is used.
#[derive(Deserialize, Debug)]
pub struct MarketChartResponse {
    /// `[timestamp_ms, price]` pairs. Prices can be `null` for gaps.
    pub prices: Vec<(f64, Option<f64>)>,
}

impl MarketChartResponse {
    /// Prices ordered oldest to newest. Gaps become NaN so that downstream
    /// validation can reject them.
    pub fn into_prices(mut self) -> Vec<PriceSample> {
        self.prices.sort_by(|a, b| a.0.total_cmp(&b.0));
        self.prices
            .into_iter()
            .map(|(_, price)| price.unwrap_or(f64::NAN))
            .collect()
    }
}

/// One row of `/coins/markets`.
#[derive(Deserialize, Debug)]
pub struct MarketCoin {
    pub id: String,
    pub symbol: String,
}

impl From<MarketCoin> for Entity {
    fn from(coin: MarketCoin) -> Self {
        Entity::new(coin.id, coin.symbol)
    }
}

/// Body of `/simple/price`: entity id -> (`usd`, `usd_24h_change`, ...).
pub type SimplePriceResponse = IndexMap<String, IndexMap<String, Option<f64>>>;

/// Builds quotes in `entities` order, skipping entities the response lacks
/// or that have no price in `vs_currency`.
pub fn quotes_from_simple_price(
    entities: &[Entity],
    response: &SimplePriceResponse,
    vs_currency: &str,
) -> Vec<PriceQuote> {
    let change_key = format!("{vs_currency}_24h_change");
    entities
        .iter()
        .filter_map(|entity| {
            let fields = response.get(&entity.id)?;
            let price = (*fields.get(vs_currency)?)?;
            let change_24h = fields.get(&change_key).copied().flatten().unwrap_or(f64::NAN);
            Some(PriceQuote {
                id: entity.id.clone(),
                symbol: entity.symbol.clone(),
                price,
                change_24h,
            })
        })
        .collect()
}

/// Body of `/coins/{id}`. Only the identity and `market_data` are used.
#[derive(Deserialize, Debug)]
pub struct CoinDetailResponse {
    pub id: String,
    pub symbol: String,
    pub market_data: MarketData,
}

/// Per-currency figures are keyed by lower-case currency code.
#[derive(Deserialize, Debug)]
pub struct MarketData {
    #[serde(default)]
    pub current_price: IndexMap<String, Option<f64>>,
    #[serde(default)]
    pub market_cap: IndexMap<String, Option<f64>>,
    pub roi: Option<Roi>,
    pub price_change_percentage_24h: Option<f64>,
}

#[derive(Deserialize, Debug)]
pub struct Roi {
    pub percentage: Option<f64>,
}

impl CoinDetailResponse {
    /// Picks the `vs_currency` figures. Fails only when there is no price.
    pub fn into_detail(self, vs_currency: &str) -> Result<CoinDetail, String> {
        let data = self.market_data;
        let price = data
            .current_price
            .get(vs_currency)
            .copied()
            .flatten()
            .ok_or_else(|| format!("no {vs_currency} price for {}", self.id))?;

        Ok(CoinDetail {
            entity: Entity::new(self.id, self.symbol),
            price,
            market_cap: data
                .market_cap
                .get(vs_currency)
                .copied()
                .flatten()
                .unwrap_or(f64::NAN),
            roi_percentage: data.roi.and_then(|roi| roi.percentage).unwrap_or(0.0),
            change_24h: data.price_change_percentage_24h.unwrap_or(f64::NAN),
        })
    }
}
