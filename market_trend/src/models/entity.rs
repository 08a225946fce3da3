//! Market entities (coins) the dashboard can select.

use serde::{Deserialize, Serialize};

/// A single market entity, identified by the vendor's stable id.
///
/// Entities are immutable once fetched; the known set is replaced wholesale by
/// [`EntityRegistry::replace`](crate::registry::EntityRegistry::replace).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Entity {
    /// Vendor id used in API paths (e.g. "bitcoin").
    pub id: String,
    /// Display ticker, always upper-case (e.g. "BTC").
    pub symbol: String,
}

impl Entity {
    pub fn new(id: impl Into<String>, symbol: impl AsRef<str>) -> Self {
        Self {
            id: id.into(),
            symbol: symbol.as_ref().to_uppercase(),
        }
    }

    /// Case-insensitive substring match against the display symbol.
    ///
    /// An empty (or blank) query matches every entity.
    pub fn matches(&self, query: &str) -> bool {
        let query = query.trim();
        query.is_empty() || self.symbol.to_lowercase().contains(&query.to_lowercase())
    }
}
