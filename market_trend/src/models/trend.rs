//! Categorical trend labels and the per-entity result triple.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::models::horizon::Horizon;

/// Direction of a price series over one horizon.
///
/// `Unknown` is the degraded sentinel; classification itself only ever yields
/// the other three.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendLabel {
    Bullish,
    Bearish,
    Neutral,
    #[default]
    Unknown,
}

impl TrendLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            TrendLabel::Bullish => "bullish",
            TrendLabel::Bearish => "bearish",
            TrendLabel::Neutral => "neutral",
            TrendLabel::Unknown => "unknown",
        }
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self, TrendLabel::Unknown)
    }
}

impl fmt::Display for TrendLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One label per horizon, keyed the way the classification service keys them.
///
/// Missing keys or unrecognised label strings fail deserialization; nothing is
/// defaulted on the way in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TrendResult {
    pub trend_1d: TrendLabel,
    pub trend_7d: TrendLabel,
    pub trend_30d: TrendLabel,
}

impl TrendResult {
    /// The all-`unknown` triple published whenever a run cannot complete.
    pub const DEGRADED: TrendResult = TrendResult {
        trend_1d: TrendLabel::Unknown,
        trend_7d: TrendLabel::Unknown,
        trend_30d: TrendLabel::Unknown,
    };

    pub fn new(short: TrendLabel, medium: TrendLabel, long: TrendLabel) -> Self {
        Self {
            trend_1d: short,
            trend_7d: medium,
            trend_30d: long,
        }
    }

    pub fn degraded() -> Self {
        Self::DEGRADED
    }

    pub fn is_degraded(&self) -> bool {
        *self == Self::DEGRADED
    }

    pub fn label(&self, horizon: Horizon) -> TrendLabel {
        match horizon {
            Horizon::Short => self.trend_1d,
            Horizon::Medium => self.trend_7d,
            Horizon::Long => self.trend_30d,
        }
    }
}

impl Default for TrendResult {
    fn default() -> Self {
        Self::DEGRADED
    }
}
