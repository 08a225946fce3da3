//! Last published trend result per entity.
//!
//! Reads load an `Arc<HashMap<..>>` snapshot with no locking; writes copy the
//! map and swap it in with `rcu`, so concurrent writers never lose each
//! other's entries.

use std::{collections::HashMap, sync::Arc};

use arc_swap::ArcSwap;

use crate::models::trend::TrendResult;

type Snapshot = HashMap<String, TrendResult>;

/// Shared, cheaply cloneable handle to the per-entity result map.
#[derive(Clone)]
pub struct ResultCache {
    results: Arc<ArcSwap<Snapshot>>,
}

impl Default for ResultCache {
    fn default() -> Self {
        Self::new()
    }
}

impl ResultCache {
    pub fn new() -> Self {
        Self {
            results: Arc::new(ArcSwap::from_pointee(Snapshot::new())),
        }
    }

    /// The last result stored for `entity_id`, or the degraded triple if none.
    pub fn get(&self, entity_id: &str) -> TrendResult {
        self.results
            .load()
            .get(entity_id)
            .copied()
            .unwrap_or_else(TrendResult::degraded)
    }

    pub fn contains(&self, entity_id: &str) -> bool {
        self.results.load().contains_key(entity_id)
    }

    /// Replaces the entry for `entity_id`.
    pub fn store(&self, entity_id: &str, result: TrendResult) {
        self.results.rcu(|current| {
            let mut next = Snapshot::clone(current);
            next.insert(entity_id.to_string(), result);
            next
        });
    }

    /// Returns an `Arc` snapshot of every stored result.
    pub fn snapshot(&self) -> Arc<Snapshot> {
        self.results.load_full()
    }

    /// Drops every entry. Useful for tests.
    pub fn clear(&self) {
        self.results.store(Arc::new(Snapshot::new()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::trend::TrendLabel;

    fn bullish() -> TrendResult {
        TrendResult::new(TrendLabel::Bullish, TrendLabel::Bullish, TrendLabel::Bullish)
    }

    #[test]
    fn unknown_before_first_store() {
        let cache = ResultCache::new();
        assert!(!cache.contains("bitcoin"));
        assert!(cache.get("bitcoin").is_degraded());
    }

    #[test]
    fn store_overwrites_per_entity() {
        let cache = ResultCache::new();
        cache.store("bitcoin", bullish());
        cache.store("ethereum", TrendResult::degraded());
        assert_eq!(cache.get("bitcoin"), bullish());

        cache.store("bitcoin", TrendResult::degraded());
        assert!(cache.get("bitcoin").is_degraded());
        assert_eq!(cache.snapshot().len(), 2);
    }

    #[test]
    fn clones_share_state() {
        let cache = ResultCache::new();
        let reader = cache.clone();
        cache.store("solana", bullish());
        assert_eq!(reader.get("solana"), bullish());
        reader.clear();
        assert!(!cache.contains("solana"));
    }

    #[test]
    fn concurrent_writers_keep_all_entries() {
        let cache = ResultCache::new();
        let handles: Vec<_> = (0..8)
            .map(|i| {
                let cache = cache.clone();
                std::thread::spawn(move || {
                    for j in 0..50 {
                        cache.store(&format!("coin-{i}-{j}"), bullish());
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }
        assert_eq!(cache.snapshot().len(), 400);
    }
}
