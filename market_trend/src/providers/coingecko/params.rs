//! Query strings for the CoinGecko v3 endpoints.

use crate::models::entity::Entity;

/// Query parameters as sent on the wire.
pub type QueryParams = Vec<(&'static str, String)>;

/// `GET /coins/{id}/market_chart`, one sample per day.
pub fn market_chart_params(vs_currency: &str, days: u32) -> QueryParams {
    vec![
        ("vs_currency", vs_currency.to_string()),
        ("days", days.to_string()),
        ("interval", "daily".to_string()),
    ]
}

/// `GET /coins/markets`, largest market cap first.
pub fn markets_params(vs_currency: &str, per_page: u32) -> QueryParams {
    vec![
        ("vs_currency", vs_currency.to_string()),
        ("order", "market_cap_desc".to_string()),
        ("per_page", per_page.to_string()),
        ("page", "1".to_string()),
    ]
}

/// `GET /simple/price` for a batch of entities, with 24h change.
pub fn simple_price_params(entities: &[Entity], vs_currency: &str) -> QueryParams {
    let ids = entities
        .iter()
        .map(|e| e.id.as_str())
        .collect::<Vec<_>>()
        .join(",");
    vec![
        ("ids", ids),
        ("vs_currencies", vs_currency.to_string()),
        ("include_24hr_change", "true".to_string()),
    ]
}

/// `GET /coins/{id}` trimmed down to the market data block.
pub fn coin_detail_params() -> QueryParams {
    vec![
        ("localization", "false".to_string()),
        ("tickers", "false".to_string()),
        ("market_data", "true".to_string()),
        ("community_data", "false".to_string()),
        ("developer_data", "false".to_string()),
        ("sparkline", "false".to_string()),
    ]
}

/// Entity ids are interpolated into URL paths, so only the characters
/// CoinGecko uses in ids are accepted.
pub fn validate_entity_id(entity_id: &str) -> Result<(), String> {
    if entity_id.is_empty() {
        return Err("entity id cannot be empty".to_string());
    }
    if let Some(c) = entity_id
        .chars()
        .find(|c| !(c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.')))
    {
        return Err(format!("entity id {entity_id:?} contains invalid character {c:?}"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn price_params_join_ids() {
        let entities = vec![Entity::new("bitcoin", "btc"), Entity::new("ethereum", "eth")];
        let params = simple_price_params(&entities, "usd");
        assert_eq!(params[0], ("ids", "bitcoin,ethereum".to_string()));
        assert!(params.contains(&("include_24hr_change", "true".to_string())));
    }

    #[test]
    fn chart_params_request_daily_samples() {
        let params = market_chart_params("eur", 30);
        assert!(params.contains(&("days", "30".to_string())));
        assert!(params.contains(&("interval", "daily".to_string())));
        assert!(params.contains(&("vs_currency", "eur".to_string())));
    }

    #[test]
    fn detail_params_keep_market_data_only() {
        let params = coin_detail_params();
        assert!(params.contains(&("market_data", "true".to_string())));
        assert!(params.contains(&("tickers", "false".to_string())));
    }

    #[test]
    fn entity_id_validation() {
        assert!(validate_entity_id("bitcoin").is_ok());
        assert!(validate_entity_id("usd-coin").is_ok());
        assert!(validate_entity_id("").is_err());
        assert!(validate_entity_id("../admin").is_err());
        assert!(validate_entity_id("a b").is_err());
    }
}
