//! Multi-horizon trend signals for crypto market entities.
//!
//! The crate turns a raw price history into one [`TrendLabel`](models::trend::TrendLabel)
//! per horizon (short, medium, long), with debounced selection, graceful
//! degradation to `unknown`, and a per-entity cache of the last published
//! result. Rendering is left to the caller, which reads
//! [`TrendPipeline::subscribe`](pipeline::TrendPipeline::subscribe) or
//! [`ResultCache`](pipeline::ResultCache).

#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod errors;
pub mod models;
pub mod pipeline;
pub mod providers;
pub mod registry;
