//! Snapshot of one entity's market data, shown next to its trend.

use serde::Serialize;

use super::entity::Entity;

/// Price card for a single entity.
///
/// Missing numbers are NaN, except `roi_percentage`, which falls back to 0
/// for entities the vendor tracks no ROI for.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CoinDetail {
    pub entity: Entity,
    pub price: f64,
    pub market_cap: f64,
    pub roi_percentage: f64,
    /// Percentage change over the last 24 hours.
    pub change_24h: f64,
}

impl CoinDetail {
    pub fn is_up(&self) -> bool {
        self.change_24h > 0.0
    }
}
