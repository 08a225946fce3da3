#![allow(dead_code)]

use std::{
    collections::HashMap,
    sync::{
        Mutex,
        atomic::{AtomicUsize, Ordering},
    },
    time::Duration,
};

use async_trait::async_trait;
use market_trend::{
    models::{
        horizon::HorizonWindows,
        trend::{TrendLabel, TrendResult},
    },
    providers::{ApiSnafu, HistorySource, ProviderError, TrendClassifier},
};

/// History source serving canned series, optionally after a delay.
#[derive(Default)]
pub struct FakeHistory {
    series: Mutex<HashMap<String, Vec<f64>>>,
    delays: HashMap<String, Duration>,
    calls: Mutex<Vec<(String, u32)>>,
}

impl FakeHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_series(self, entity_id: &str, prices: Vec<f64>) -> Self {
        self.series
            .lock()
            .unwrap()
            .insert(entity_id.to_string(), prices);
        self
    }

    /// Makes later fetches for `entity_id` come back empty.
    pub fn remove_series(&self, entity_id: &str) {
        self.series.lock().unwrap().remove(entity_id);
    }

    pub fn with_delay(mut self, entity_id: &str, delay: Duration) -> Self {
        self.delays.insert(entity_id.to_string(), delay);
        self
    }

    pub fn calls(&self) -> Vec<(String, u32)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl HistorySource for FakeHistory {
    async fn fetch_history(&self, entity_id: &str, lookback_days: u32) -> Vec<f64> {
        self.calls
            .lock()
            .unwrap()
            .push((entity_id.to_string(), lookback_days));
        if let Some(delay) = self.delays.get(entity_id) {
            tokio::time::sleep(*delay).await;
        }
        self.series
            .lock()
            .unwrap()
            .get(entity_id)
            .cloned()
            .unwrap_or_default()
    }
}

enum Reply {
    Labels(TrendResult),
    Fail,
    Hang,
}

/// Classifier that records every request and answers from a script.
pub struct ScriptedClassifier {
    reply: Reply,
    seen: Mutex<Vec<HorizonWindows>>,
    calls: AtomicUsize,
}

impl ScriptedClassifier {
    fn with_reply(reply: Reply) -> Self {
        Self {
            reply,
            seen: Mutex::new(Vec::new()),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn returning(result: TrendResult) -> Self {
        Self::with_reply(Reply::Labels(result))
    }

    pub fn failing() -> Self {
        Self::with_reply(Reply::Fail)
    }

    /// Never answers; exercises the pipeline's timeout.
    pub fn hanging() -> Self {
        Self::with_reply(Reply::Hang)
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn seen(&self) -> Vec<HorizonWindows> {
        self.seen.lock().unwrap().clone()
    }
}

#[async_trait]
impl TrendClassifier for ScriptedClassifier {
    async fn classify(&self, windows: &HorizonWindows) -> Result<TrendResult, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.seen.lock().unwrap().push(windows.clone());
        match &self.reply {
            Reply::Labels(result) => Ok(*result),
            Reply::Fail => ApiSnafu {
                status: 500u16,
                message: "model crashed",
            }
            .fail(),
            Reply::Hang => std::future::pending().await,
        }
    }
}

pub fn labels(short: TrendLabel, medium: TrendLabel, long: TrendLabel) -> TrendResult {
    TrendResult::new(short, medium, long)
}

/// Upward drift with small pullbacks.
pub fn rising_series(len: usize) -> Vec<f64> {
    (0..len)
        .map(|i| 100.0 + i as f64 + if i % 2 == 1 { 2.0 } else { 0.0 } - (i / 2) as f64 * 0.5)
        .collect()
}
