//! Selection debouncing, trend runs, and the published-result cache.
//!
//! Data flow: raw selections go into a [`SelectionDebouncer`]; each settled
//! selection is handed to [`TrendPipeline`], which fetches history, derives
//! the horizon windows, classifies them, and publishes a [`TrendUpdate`]
//! (real or degraded) into the [`ResultCache`] and its watch channel.

mod cache;
mod debounce;
mod trend;

pub use cache::ResultCache;
pub use debounce::SelectionDebouncer;
pub use trend::{PipelineSettings, Ticket, TrendPipeline, TrendUpdate};
