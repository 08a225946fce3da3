//! Lock-free, read-mostly registry of known entities.
//!
//! Readers call [`EntityRegistry::get`] or [`EntityRegistry::search`], which load
//! an `Arc<Vec<Entity>>` snapshot without contention. A refresh replaces the
//! whole set in one atomic swap; readers see either the old or the new list,
//! never a mix.

use std::sync::Arc;

use arc_swap::ArcSwap;
use tracing::info;

use crate::{
    models::entity::Entity,
    providers::{MarketSource, ProviderError},
};

/// Known entities, in the order the market source ranked them.
#[derive(Clone)]
pub struct EntityRegistry {
    entities: Arc<ArcSwap<Vec<Entity>>>,
}

impl Default for EntityRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl EntityRegistry {
    /// Starts empty; until [`replace`](Self::replace) or [`refresh`](Self::refresh)
    /// runs, every lookup misses.
    pub fn new() -> Self {
        Self {
            entities: Arc::new(ArcSwap::from_pointee(Vec::new())),
        }
    }

    /// Swaps in a new entity set wholesale.
    pub fn replace(&self, entities: Vec<Entity>) {
        self.entities.store(Arc::new(entities));
    }

    /// Fetches the top `limit` entities and swaps them in.
    ///
    /// On error the previous set is kept.
    pub async fn refresh(
        &self,
        source: &dyn MarketSource,
        limit: u32,
    ) -> Result<usize, ProviderError> {
        let entities = source.fetch_top_entities(limit).await?;
        let count = entities.len();
        self.replace(entities);
        info!(count, "entity registry refreshed");
        Ok(count)
    }

    pub fn get(&self, id: &str) -> Option<Entity> {
        self.entities.load().iter().find(|e| e.id == id).cloned()
    }

    /// Entities whose symbol contains `query`, case-insensitively, in registry order.
    pub fn search(&self, query: &str) -> Vec<Entity> {
        self.entities
            .load()
            .iter()
            .filter(|e| e.matches(query))
            .cloned()
            .collect()
    }

    /// Returns an `Arc` snapshot of the current set.
    pub fn snapshot(&self) -> Arc<Vec<Entity>> {
        self.entities.load_full()
    }

    pub fn len(&self) -> usize {
        self.entities.load().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;

    use super::*;
    use crate::{
        models::{detail::CoinDetail, quote::PriceQuote},
        providers::{ApiSnafu, ValidationSnafu},
    };

    struct StaticMarket(Vec<Entity>);
    struct DownMarket;

    #[async_trait]
    impl MarketSource for StaticMarket {
        async fn fetch_top_entities(&self, limit: u32) -> Result<Vec<Entity>, ProviderError> {
            Ok(self.0.iter().take(limit as usize).cloned().collect())
        }

        async fn fetch_quotes(
            &self,
            _entities: &[Entity],
        ) -> Result<Vec<PriceQuote>, ProviderError> {
            Ok(Vec::new())
        }

        async fn fetch_coin_detail(&self, entity_id: &str) -> Result<CoinDetail, ProviderError> {
            ValidationSnafu {
                message: format!("no detail for {entity_id}"),
            }
            .fail()
        }
    }

    #[async_trait]
    impl MarketSource for DownMarket {
        async fn fetch_top_entities(&self, _limit: u32) -> Result<Vec<Entity>, ProviderError> {
            ApiSnafu {
                status: 429u16,
                message: "rate limited",
            }
            .fail()
        }

        async fn fetch_quotes(
            &self,
            _entities: &[Entity],
        ) -> Result<Vec<PriceQuote>, ProviderError> {
            Ok(Vec::new())
        }

        async fn fetch_coin_detail(&self, entity_id: &str) -> Result<CoinDetail, ProviderError> {
            ValidationSnafu {
                message: format!("no detail for {entity_id}"),
            }
            .fail()
        }
    }

    fn coins() -> Vec<Entity> {
        vec![
            Entity::new("bitcoin", "btc"),
            Entity::new("ethereum", "eth"),
            Entity::new("wrapped-bitcoin", "wbtc"),
            Entity::new("tether", "usdt"),
        ]
    }

    #[test]
    fn replace_is_wholesale() {
        let registry = EntityRegistry::new();
        assert!(registry.is_empty());
        registry.replace(coins());
        assert_eq!(registry.len(), 4);

        let held = registry.snapshot();
        registry.replace(vec![Entity::new("solana", "sol")]);
        assert_eq!(held.len(), 4);
        assert!(registry.get("bitcoin").is_none());
        assert_eq!(registry.get("solana").unwrap().symbol, "SOL");
    }

    #[test]
    fn search_keeps_registry_order() {
        let registry = EntityRegistry::new();
        registry.replace(coins());
        let ids: Vec<String> = registry.search("btc").into_iter().map(|e| e.id).collect();
        assert_eq!(ids, vec!["bitcoin", "wrapped-bitcoin"]);
        assert_eq!(registry.search("").len(), 4);
        assert!(registry.search("xrp").is_empty());
    }

    #[tokio::test]
    async fn refresh_respects_limit() {
        let registry = EntityRegistry::new();
        let count = registry.refresh(&StaticMarket(coins()), 2).await.unwrap();
        assert_eq!(count, 2);
        assert!(registry.get("ethereum").is_some());
        assert!(registry.get("tether").is_none());
    }

    #[tokio::test]
    async fn failed_refresh_keeps_previous_set() {
        let registry = EntityRegistry::new();
        registry.replace(coins());
        assert!(registry.refresh(&DownMarket, 20).await.is_err());
        assert_eq!(registry.len(), 4);
    }
}
