//! Coalesces bursts of selections into one settled selection.
//!
//! A background task owns a single pending value and a [`QuietTimer`]. Every
//! submission replaces the pending value and re-arms the timer; when the timer
//! fires, the pending value is sent downstream exactly once. A superseded value
//! is dropped before anything downstream sees it. [`SelectionDebouncer::flush`]
//! settles the pending value without waiting out the quiet period.

use std::{future, pin::Pin, time::Duration};

use tokio::{
    sync::mpsc,
    time::{self, Sleep},
};
use tracing::{debug, trace};

/// Cancellable one-shot deadline.
///
/// Re-arming replaces the previous deadline outright, so a timer can fire at
/// most once per arm.
struct QuietTimer {
    period: Duration,
    deadline: Option<Pin<Box<Sleep>>>,
}

impl QuietTimer {
    fn new(period: Duration) -> Self {
        Self {
            period,
            deadline: None,
        }
    }

    fn arm(&mut self) {
        self.deadline = Some(Box::pin(time::sleep(self.period)));
    }

    fn cancel(&mut self) {
        self.deadline = None;
    }

    /// Resolves when the armed deadline passes and disarms the timer.
    /// Never resolves while disarmed.
    async fn fired(&mut self) {
        match self.deadline.as_mut() {
            Some(deadline) => {
                deadline.as_mut().await;
                self.deadline = None;
            }
            None => future::pending().await,
        }
    }
}

enum Input<T> {
    Submit(T),
    Flush,
}

/// Input side of a debounced selection stream.
///
/// Cloning gives another submitter for the same stream. When every submitter
/// is dropped, any pending value is discarded and the settled stream ends.
pub struct SelectionDebouncer<T> {
    input: mpsc::UnboundedSender<Input<T>>,
}

impl<T> Clone for SelectionDebouncer<T> {
    fn clone(&self) -> Self {
        Self {
            input: self.input.clone(),
        }
    }
}

impl<T: Send + 'static> SelectionDebouncer<T> {
    /// Spawns the debounce task on the current tokio runtime.
    ///
    /// Returns the submitter and the stream of settled values.
    pub fn spawn(quiet_period: Duration) -> (Self, mpsc::UnboundedReceiver<T>) {
        let (input, requests) = mpsc::unbounded_channel();
        let (settled_tx, settled_rx) = mpsc::unbounded_channel();
        tokio::spawn(debounce(requests, settled_tx, quiet_period));
        (Self { input }, settled_rx)
    }

    /// Replaces the pending selection and restarts the quiet period.
    ///
    /// Returns `false` if the debounce task has stopped.
    pub fn submit(&self, value: T) -> bool {
        self.input.send(Input::Submit(value)).is_ok()
    }

    /// Settles the pending selection now, if there is one.
    ///
    /// Returns `false` if the debounce task has stopped.
    pub fn flush(&self) -> bool {
        self.input.send(Input::Flush).is_ok()
    }
}

async fn debounce<T>(
    mut requests: mpsc::UnboundedReceiver<Input<T>>,
    settled: mpsc::UnboundedSender<T>,
    quiet_period: Duration,
) {
    let mut pending: Option<T> = None;
    let mut timer = QuietTimer::new(quiet_period);

    loop {
        tokio::select! {
            biased;

            request = requests.recv() => match request {
                Some(Input::Submit(value)) => {
                    if pending.replace(value).is_some() {
                        trace!("pending selection superseded");
                    }
                    timer.arm();
                }
                Some(Input::Flush) => {
                    timer.cancel();
                    if let Some(value) = pending.take() {
                        if settled.send(value).is_err() {
                            debug!("settled selection receiver dropped");
                            break;
                        }
                    }
                }
                None => {
                    timer.cancel();
                    if pending.take().is_some() {
                        debug!("selection input closed, pending selection discarded");
                    }
                    break;
                }
            },

            () = timer.fired() => {
                if let Some(value) = pending.take() {
                    if settled.send(value).is_err() {
                        debug!("settled selection receiver dropped");
                        break;
                    }
                }
            }
        }
    }
}
