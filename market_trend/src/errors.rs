use thiserror::Error;

use crate::models::horizon::{Horizon, MIN_WINDOW_SAMPLES};
use crate::providers::ProviderError;

/// Reasons a pipeline run falls back to the degraded result.
///
/// None of these escape [`TrendPipeline::run`](crate::pipeline::TrendPipeline::run);
/// they are logged and mapped to
/// [`TrendResult::DEGRADED`](crate::models::trend::TrendResult::DEGRADED).
#[derive(Debug, Error)]
pub enum TrendError {
    /// The history source returned no samples.
    #[error("no usable price history")]
    EmptyHistory,

    /// A horizon window is too short to carry a trend.
    #[error(
        "{horizon} window has {len} samples, at least {min} required",
        min = MIN_WINDOW_SAMPLES
    )]
    InsufficientSamples { horizon: Horizon, len: usize },

    /// A horizon window holds a NaN or infinite price.
    #[error("{horizon} window holds a non-numeric sample at index {index}")]
    InvalidSample { horizon: Horizon, index: usize },

    /// The classifier errored, timed out, or answered with a malformed payload.
    #[error("trend classification failed: {0}")]
    ClassificationFailure(#[source] ProviderError),
}
