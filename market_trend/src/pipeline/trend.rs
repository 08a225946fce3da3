//! One classification run per settled selection.

use std::{
    sync::{
        Arc,
        atomic::{AtomicU64, Ordering},
    },
    time::Duration,
};

use serde::Serialize;
use tokio::{
    sync::{mpsc, watch},
    task::{JoinHandle, JoinSet},
    time,
};
use tracing::{debug, info, warn};

use crate::{
    config::TrendConfig,
    errors::TrendError,
    models::{
        horizon::{HorizonWindows, PriceSample},
        trend::TrendResult,
    },
    pipeline::{ResultCache, SelectionDebouncer},
    providers::{HistorySource, TimeoutSnafu, TrendClassifier},
};

/// Knobs for [`TrendPipeline`].
#[derive(Debug, Clone, Copy)]
pub struct PipelineSettings {
    /// Samples requested for, and kept in, the long window.
    pub lookback_days: u32,
    /// Bound applied separately to the history fetch and the classifier call.
    pub call_timeout: Duration,
}

impl Default for PipelineSettings {
    fn default() -> Self {
        Self {
            lookback_days: 30,
            call_timeout: Duration::from_secs(10),
        }
    }
}

impl From<&TrendConfig> for PipelineSettings {
    fn from(config: &TrendConfig) -> Self {
        Self {
            lookback_days: config.lookback_days,
            call_timeout: config.request_timeout(),
        }
    }
}

/// A selection the pipeline has accepted, tagged with its generation.
///
/// Only the ticket from the most recent [`TrendPipeline::select`] may publish.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ticket {
    entity_id: String,
    generation: u64,
}

impl Ticket {
    pub fn entity_id(&self) -> &str {
        &self.entity_id
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// A published result, tagged with the selection it answers.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendUpdate {
    pub entity_id: String,
    pub generation: u64,
    pub result: TrendResult,
}

/// Fetches history, derives horizon windows, classifies them and publishes
/// the outcome for the current selection.
pub struct TrendPipeline {
    history: Arc<dyn HistorySource>,
    classifier: Arc<dyn TrendClassifier>,
    cache: ResultCache,
    settings: PipelineSettings,
    generation: AtomicU64,
    updates: watch::Sender<Option<TrendUpdate>>,
}

impl TrendPipeline {
    pub fn new(
        history: Arc<dyn HistorySource>,
        classifier: Arc<dyn TrendClassifier>,
        settings: PipelineSettings,
    ) -> Self {
        let (updates, _) = watch::channel(None);
        Self {
            history,
            classifier,
            cache: ResultCache::new(),
            settings,
            generation: AtomicU64::new(0),
            updates,
        }
    }

    /// Marks `entity_id` as the current selection.
    ///
    /// Every run holding an older ticket becomes stale and will not publish.
    pub fn select(&self, entity_id: &str) -> Ticket {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        debug!(entity_id, generation, "selection accepted");
        Ticket {
            entity_id: entity_id.to_string(),
            generation,
        }
    }

    pub fn is_current(&self, ticket: &Ticket) -> bool {
        self.generation.load(Ordering::SeqCst) == ticket.generation
    }

    /// Runs the pipeline for `ticket` and publishes exactly one result.
    ///
    /// Any failure along the way publishes [`TrendResult::DEGRADED`]. Returns
    /// `None` when the ticket went stale before the run finished; nothing is
    /// published or cached in that case.
    pub async fn run(&self, ticket: &Ticket) -> Option<TrendUpdate> {
        let result = match self.evaluate(&ticket.entity_id).await {
            Ok(result) => result,
            Err(error) => {
                warn!(entity_id = %ticket.entity_id, %error, "trend run degraded");
                TrendResult::degraded()
            }
        };
        self.publish(ticket, result)
    }

    /// Subscribes to published updates. The initial value is `None`.
    pub fn subscribe(&self) -> watch::Receiver<Option<TrendUpdate>> {
        self.updates.subscribe()
    }

    /// The most recently published update, if any.
    pub fn latest(&self) -> Option<TrendUpdate> {
        self.updates.borrow().clone()
    }

    pub fn cache(&self) -> &ResultCache {
        &self.cache
    }

    /// Consumes settled selections, starting one run per selection.
    ///
    /// Runs may overlap; the generation check at publish time keeps late
    /// finishers from overwriting newer results. Once `settled` closes, the
    /// returned task finishes after the runs still in flight do.
    pub fn spawn_driver(
        self: &Arc<Self>,
        mut settled: mpsc::UnboundedReceiver<String>,
    ) -> JoinHandle<()> {
        let pipeline = Arc::clone(self);
        tokio::spawn(async move {
            let mut runs = JoinSet::new();
            while let Some(entity_id) = settled.recv().await {
                let ticket = pipeline.select(&entity_id);
                let run = Arc::clone(&pipeline);
                runs.spawn(async move {
                    run.run(&ticket).await;
                });
                while runs.try_join_next().is_some() {}
            }
            debug!(in_flight = runs.len(), "settled selection stream closed");
            while runs.join_next().await.is_some() {}
        })
    }

    /// Wires a debouncer in front of the pipeline.
    ///
    /// Selections submitted to the returned debouncer settle after
    /// `quiet_period` and are then run.
    pub fn attach(
        self: &Arc<Self>,
        quiet_period: Duration,
    ) -> (SelectionDebouncer<String>, JoinHandle<()>) {
        let (debouncer, settled) = SelectionDebouncer::spawn(quiet_period);
        let driver = self.spawn_driver(settled);
        (debouncer, driver)
    }

    async fn evaluate(&self, entity_id: &str) -> Result<TrendResult, TrendError> {
        let lookback = self.settings.lookback_days;
        let timeout = self.settings.call_timeout;

        let fetch = self.history.fetch_history(entity_id, lookback);
        let history = match time::timeout(timeout, fetch).await {
            Ok(samples) => samples,
            Err(_) => {
                warn!(
                    entity_id,
                    timeout_ms = timeout.as_millis() as u64,
                    "history fetch timed out"
                );
                Vec::new()
            }
        };

        let windows = HorizonWindows::derive(keep_last(history, lookback as usize))?;
        debug!(
            entity_id,
            short = windows.short.len(),
            medium = windows.medium.len(),
            long = windows.long.len(),
            "horizon windows ready"
        );

        match time::timeout(timeout, self.classifier.classify(&windows)).await {
            Ok(classified) => classified.map_err(TrendError::ClassificationFailure),
            Err(_) => Err(TrendError::ClassificationFailure(
                TimeoutSnafu {
                    timeout_ms: timeout.as_millis() as u64,
                }
                .build(),
            )),
        }
    }

    fn publish(&self, ticket: &Ticket, result: TrendResult) -> Option<TrendUpdate> {
        let update = TrendUpdate {
            entity_id: ticket.entity_id.clone(),
            generation: ticket.generation,
            result,
        };

        // The check and the write happen under the watch lock, so a newer
        // publish can never be overwritten by an older one.
        let published = self.updates.send_if_modified(|current| {
            let newer_published = current
                .as_ref()
                .is_some_and(|u| u.generation > ticket.generation);
            if !self.is_current(ticket) || newer_published {
                return false;
            }
            self.cache.store(&ticket.entity_id, result);
            *current = Some(update.clone());
            true
        });

        if published {
            info!(
                entity_id = %update.entity_id,
                generation = update.generation,
                trend_1d = %result.trend_1d,
                trend_7d = %result.trend_7d,
                trend_30d = %result.trend_30d,
                "trend published"
            );
            Some(update)
        } else {
            debug!(
                entity_id = %ticket.entity_id,
                generation = ticket.generation,
                "stale trend result discarded"
            );
            None
        }
    }
}

fn keep_last(mut samples: Vec<PriceSample>, len: usize) -> Vec<PriceSample> {
    if samples.len() > len {
        samples.drain(..samples.len() - len);
    }
    samples
}
