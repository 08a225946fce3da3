//! Offline classifier: compares the first and last price of each window.

use std::cmp::Ordering;

use async_trait::async_trait;

use crate::{
    models::{
        horizon::{Horizon, HorizonWindows, MIN_WINDOW_SAMPLES, PriceSample},
        trend::{TrendLabel, TrendResult},
    },
    providers::{ProviderError, TrendClassifier, ValidationSnafu},
};

/// Labels each window by its net move: up is bullish, down is bearish,
/// flat is neutral.
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalHeuristic;

impl LocalHeuristic {
    /// `None` when the window is too short or its endpoints are not comparable.
    pub fn label(window: &[PriceSample]) -> Option<TrendLabel> {
        if window.len() < MIN_WINDOW_SAMPLES {
            return None;
        }
        let first = window.first()?;
        let last = window.last()?;
        match last.partial_cmp(first)? {
            Ordering::Greater => Some(TrendLabel::Bullish),
            Ordering::Less => Some(TrendLabel::Bearish),
            Ordering::Equal => Some(TrendLabel::Neutral),
        }
    }
}

#[async_trait]
impl TrendClassifier for LocalHeuristic {
    async fn classify(&self, windows: &HorizonWindows) -> Result<TrendResult, ProviderError> {
        let mut labels = [TrendLabel::Unknown; 3];
        for (slot, horizon) in labels.iter_mut().zip(Horizon::ALL) {
            *slot = Self::label(windows.window(horizon)).ok_or_else(|| {
                ValidationSnafu {
                    message: format!("{horizon} window cannot be classified"),
                }
                .build()
            })?;
        }
        let [short, medium, long] = labels;
        Ok(TrendResult::new(short, medium, long))
    }
}
