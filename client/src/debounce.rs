//! Cancellable delayed delivery of rapidly changing values.

use std::time::Duration;

use derive_more::Debug;
use tokio::{sync::mpsc, task::JoinHandle};

/// Quiet period of the search input.
pub const SEARCH_DEBOUNCE: Duration = Duration::from_millis(300);

/// Delivers the last [`Debounce::schedule()`]d value once it stays unchanged
/// for the quiet period.
///
/// A superseded value is never delivered: scheduling a new value or
/// [`Debounce::cancel()`]ing aborts the pending timer, and dropping the
/// [`Debounce`] cancels it as well.
#[derive(Debug)]
pub struct Debounce<T> {
    /// Quiet period of this [`Debounce`].
    delay: Duration,

    /// Timer of the pending value, if any.
    pending: Option<JoinHandle<()>>,

    /// Generation of the latest scheduled value.
    ///
    /// Values of older generations are discarded on delivery.
    generation: u64,

    /// Sending side of the fired values.
    #[debug(skip)]
    tx: mpsc::UnboundedSender<(u64, T)>,

    /// Receiving side of the fired values.
    #[debug(skip)]
    rx: mpsc::UnboundedReceiver<(u64, T)>,
}

impl<T> Debounce<T> {
    /// Creates a new [`Debounce`] with the provided quiet period.
    #[must_use]
    pub fn new(delay: Duration) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            delay,
            pending: None,
            generation: 0,
            tx,
            rx,
        }
    }

    /// Returns the quiet period of this [`Debounce`].
    #[must_use]
    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Indicates whether a scheduled value awaits delivery.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Cancels the pending value, if any.
    pub fn cancel(&mut self) {
        if let Some(timer) = self.pending.take() {
            timer.abort();
        }
        self.generation += 1;
    }

    /// Waits for the pending value to fire.
    ///
    /// Returns [`None`] immediately if nothing is pending.
    pub async fn fired(&mut self) -> Option<T> {
        while self.pending.is_some() {
            let (generation, value) = self.rx.recv().await?;
            if generation == self.generation {
                self.pending = None;
                return Some(value);
            }
        }
        None
    }
}

impl<T: Send + 'static> Debounce<T> {
    /// Schedules the provided `value` to be delivered after the quiet
    /// period, superseding the pending one.
    ///
    /// Must be called within a [`tokio`] runtime.
    pub fn schedule(&mut self, value: T) {
        self.cancel();

        let (generation, delay, tx) =
            (self.generation, self.delay, self.tx.clone());
        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            _ = tx.send((generation, value));
        }));
    }
}

impl<T> Drop for Debounce<T> {
    fn drop(&mut self) {
        self.cancel();
    }
}
