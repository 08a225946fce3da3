#![cfg(test)]
use market_trend::{
    config::TrendConfig,
    providers::{HistorySource, MarketSource, coingecko::CoinGeckoProvider},
};
use serial_test::serial;

#[tokio::test]
#[serial]
#[ignore]
async fn test_coingecko_provider_live() {
    // This test talks to the public CoinGecko API; run with `--ignored`.
    let config = TrendConfig::load(None).expect("default config loads");
    let provider = CoinGeckoProvider::new(&config).expect("Failed to create CoinGeckoProvider");

    let history = provider.fetch_history("bitcoin", 30).await;
    assert!(history.len() >= 2, "expected daily history for bitcoin");
    assert!(history.iter().all(|p| p.is_finite() && *p > 0.0));

    let entities = provider.fetch_top_entities(5).await.expect("markets request");
    assert_eq!(entities.len(), 5);
    assert!(entities.iter().all(|e| e.symbol == e.symbol.to_uppercase()));

    let quotes = provider.fetch_quotes(&entities).await.expect("simple price request");
    assert!(!quotes.is_empty());
    assert!(quotes.iter().all(|q| q.price > 0.0));

    let detail = provider.fetch_coin_detail("bitcoin").await.expect("coin detail request");
    assert_eq!(detail.entity.symbol, "BTC");
    assert!(detail.price > 0.0);
    assert!(detail.market_cap > detail.price);
}

#[tokio::test]
#[serial]
#[ignore]
async fn test_coingecko_unknown_coin_gives_empty_history() {
    let config = TrendConfig::load(None).expect("default config loads");
    let provider = CoinGeckoProvider::new(&config).expect("Failed to create CoinGeckoProvider");

    let history = provider.fetch_history("surely-not-a-listed-coin-xyz", 30).await;
    assert!(history.is_empty());
}
