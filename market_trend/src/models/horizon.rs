//! Horizon windows derived from a single price history.
//!
//! The long window is the full fetched history; the medium and short windows
//! are suffixes of it. Every window must hold at least
//! [`MIN_WINDOW_SAMPLES`] finite prices before it may be classified.

use std::fmt;

use serde::Serialize;

use crate::errors::TrendError;

/// A single price observation. Sequences are ordered oldest to newest.
pub type PriceSample = f64;

/// Number of trailing samples forming the medium window.
pub const MEDIUM_WINDOW_LEN: usize = 7;

/// Number of trailing samples forming the short window.
pub const SHORT_WINDOW_LEN: usize = 2;

/// Fewest samples a window may hold and still yield a trend.
pub const MIN_WINDOW_SAMPLES: usize = 2;

/// The three lookback horizons a trend is computed over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Horizon {
    /// Last two samples ("1d").
    Short,
    /// Last seven samples ("7d").
    Medium,
    /// The whole fetched window ("30d").
    Long,
}

impl Horizon {
    pub const ALL: [Horizon; 3] = [Horizon::Short, Horizon::Medium, Horizon::Long];

    pub fn name(&self) -> &'static str {
        match self {
            Horizon::Short => "short",
            Horizon::Medium => "medium",
            Horizon::Long => "long",
        }
    }
}

impl fmt::Display for Horizon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The short, medium and long windows, serialized with the field names the
/// classification service expects.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HorizonWindows {
    #[serde(rename = "prices_1d")]
    pub short: Vec<PriceSample>,
    #[serde(rename = "prices_7d")]
    pub medium: Vec<PriceSample>,
    #[serde(rename = "prices_30d")]
    pub long: Vec<PriceSample>,
}

impl HorizonWindows {
    /// Slices `long` into the three horizon windows and validates them.
    ///
    /// # Errors
    /// * [`TrendError::EmptyHistory`] if `long` is empty.
    /// * [`TrendError::InsufficientSamples`] if any window has fewer than
    ///   [`MIN_WINDOW_SAMPLES`] samples.
    /// * [`TrendError::InvalidSample`] if any window holds a NaN or infinite price.
    pub fn derive(long: Vec<PriceSample>) -> Result<Self, TrendError> {
        if long.is_empty() {
            return Err(TrendError::EmptyHistory);
        }

        let windows = Self {
            short: suffix(&long, SHORT_WINDOW_LEN),
            medium: suffix(&long, MEDIUM_WINDOW_LEN),
            long,
        };
        windows.validate()?;
        Ok(windows)
    }

    /// Checks every window for length and sample validity.
    pub fn validate(&self) -> Result<(), TrendError> {
        for horizon in Horizon::ALL {
            let window = self.window(horizon);
            if window.len() < MIN_WINDOW_SAMPLES {
                return Err(TrendError::InsufficientSamples {
                    horizon,
                    len: window.len(),
                });
            }
            if let Some(index) = window.iter().position(|p| !p.is_finite()) {
                return Err(TrendError::InvalidSample { horizon, index });
            }
        }
        Ok(())
    }

    pub fn window(&self, horizon: Horizon) -> &[PriceSample] {
        match horizon {
            Horizon::Short => &self.short,
            Horizon::Medium => &self.medium,
            Horizon::Long => &self.long,
        }
    }
}

fn suffix(samples: &[PriceSample], len: usize) -> Vec<PriceSample> {
    samples[samples.len().saturating_sub(len)..].to_vec()
}
